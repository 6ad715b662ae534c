use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Post-type discriminator used by the actions feed and delete dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Leadership,
    Opportunity,
    Announcement,
    Activity,
    Document,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Leadership,
        Category::Opportunity,
        Category::Announcement,
        Category::Activity,
        Category::Document,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Leadership => "Leadership",
            Category::Opportunity => "Opportunity",
            Category::Announcement => "Announcement",
            Category::Activity => "Activity",
            Category::Document => "Document",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::UnknownCategory(s.to_string()))
    }
}
