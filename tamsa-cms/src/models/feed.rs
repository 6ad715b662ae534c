use chrono::NaiveDateTime;
use serde::Serialize;

use super::{Activity, Category, Document, Leader, Opportunity};

/// One row of the admin actions feed, projected from any of the four stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: NaiveDateTime,
    pub category: Category,
}

impl From<&Leader> for FeedEntry {
    fn from(leader: &Leader) -> Self {
        Self {
            id: leader.id,
            title: leader.name.clone(),
            kind: "leadership".to_string(),
            date: leader.created_date,
            category: Category::Leadership,
        }
    }
}

impl From<&Opportunity> for FeedEntry {
    fn from(opportunity: &Opportunity) -> Self {
        Self {
            id: opportunity.id,
            title: opportunity.title.clone(),
            kind: opportunity.kind.as_str().to_string(),
            date: opportunity.created_date,
            category: opportunity.kind.category(),
        }
    }
}

impl From<&Activity> for FeedEntry {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            title: activity.title.clone(),
            kind: "activity".to_string(),
            date: activity.created_date,
            category: Category::Activity,
        }
    }
}

impl From<&Document> for FeedEntry {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id,
            title: document.title.clone(),
            kind: "document".to_string(),
            date: document.upload_date,
            category: Category::Document,
        }
    }
}
