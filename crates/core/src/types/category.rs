//! Product categories.
//!
//! The mock catalog assigns every product one of four fixed categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Home,
}

impl Category {
    /// Every category, in assignment order.
    pub const ALL: [Self; 4] = [Self::Electronics, Self::Clothing, Self::Books, Self::Home];

    /// Display name, also used for search matching.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::Books => "Books",
            Self::Home => "Home",
        }
    }

    /// Map an index in `0..4` onto a category, wrapping larger values.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Electronics,
            1 => Self::Clothing,
            2 => Self::Books,
            _ => Self::Home,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
