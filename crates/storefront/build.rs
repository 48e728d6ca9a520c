//! Build script for storefront crate.
//!
//! Fingerprints static assets so templates can reference them by content
//! hash and browsers can cache them forever.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    fingerprint("css/main.css", "CSS_HASH");
}

/// Copy `static/{relative}` to `static/{dir}/derived/{stem}.{hash}.{ext}`.
///
/// Sets `env_var` to the 8-char hash (empty if the asset is missing) for use
/// with `env!`.
fn fingerprint(relative: &str, env_var: &str) {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let static_dir = Path::new(&manifest_dir).join("static");
    let asset_path = static_dir.join(relative);

    println!("cargo:rerun-if-changed={}", asset_path.display());

    let content = match fs::read(&asset_path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {relative}: {e}");
            println!("cargo:rustc-env={env_var}=");
            return;
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = &digest[..8];
    println!("cargo:rustc-env={env_var}={short_hash}");

    let parent = asset_path.parent().unwrap_or(&static_dir);
    let stem = asset_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("asset");
    let ext = asset_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("bin");

    let derived_dir = parent.join("derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived asset directory");
    fs::copy(&asset_path, derived_dir.join(format!("{stem}.{short_hash}.{ext}")))
        .expect("Failed to copy fingerprinted asset");
}
