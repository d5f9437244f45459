use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The fixed set of categories a post can belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Tech,
    Design,
    Tutorial,
    Lifestyle,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 4] = [
        Category::Tech,
        Category::Design,
        Category::Tutorial,
        Category::Lifestyle,
    ];

    /// The display name, as stored in the persisted record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tech => "Tech",
            Self::Design => "Design",
            Self::Tutorial => "Tutorial",
            Self::Lifestyle => "Lifestyle",
        }
    }

    /// Lowercase slug used in category routes (`/category/tech`).
    pub fn slug(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Tech
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TypeError;

    /// Parse a category name or slug, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| TypeError::UnknownCategory(s.to_string()))
    }
}
