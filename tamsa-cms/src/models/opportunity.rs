use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{Author, Category};
use crate::error::AppError;
use crate::media::MediaKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OpportunityKind {
    Opportunity,
    Announcement,
}

impl OpportunityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityKind::Opportunity => "opportunity",
            OpportunityKind::Announcement => "announcement",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            OpportunityKind::Opportunity => Category::Opportunity,
            OpportunityKind::Announcement => Category::Announcement,
        }
    }
}

impl FromStr for OpportunityKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opportunity" => Ok(OpportunityKind::Opportunity),
            "announcement" => Ok(OpportunityKind::Announcement),
            other => Err(AppError::BadRequest(format!(
                "Type must be 'opportunity' or 'announcement', got '{}'",
                other
            ))),
        }
    }
}

/// Opportunity or announcement listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Opportunity {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: OpportunityKind,
    pub deadline: Option<String>,
    pub event_date: Option<String>,
    pub location: Option<String>,
    pub media_url: Option<String>,
    pub media_public_id: Option<String>,
    pub media_type: Option<MediaKind>,
    pub author: String,
    pub created_date: NaiveDateTime,
}

#[derive(Debug, Clone, Validate)]
pub struct NewOpportunity {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub kind: OpportunityKind,
    pub deadline: Option<String>,
    pub event_date: Option<String>,
    pub location: Option<String>,
    pub author: Author,
}

impl NewOpportunity {
    /// Opportunities close on a deadline; announcements happen on an event date.
    pub fn check_dates(&self) -> Result<(), AppError> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        match self.kind {
            OpportunityKind::Opportunity if !present(&self.deadline) => Err(AppError::BadRequest(
                "Please provide a deadline for opportunities".to_string(),
            )),
            OpportunityKind::Announcement if !present(&self.event_date) => Err(AppError::BadRequest(
                "Please provide an event date for announcements".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
