use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    pub id: String,
    pub student_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub title: String,
    pub value: f64,
    pub max_value: f64,
    #[serde(default)]
    pub is_exempted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkDraft {
    pub student_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub title: String,
    pub value: f64,
    pub max_value: f64,
    #[serde(default)]
    pub is_exempted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkMarkEntry {
    pub student_id: String,
    pub value: f64,
    #[serde(default)]
    pub is_exempted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One assessment's marks for a whole classroom or group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkMarks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub title: String,
    pub max_value: f64,
    #[serde(default)]
    pub entries: Vec<BulkMarkEntry>,
}

impl BulkMarks {
    /// Expands the submission into one draft per entry.
    pub fn drafts(&self) -> Vec<MarkDraft> {
        self.entries
            .iter()
            .map(|e| MarkDraft {
                student_id: e.student_id.clone(),
                classroom_id: self.classroom_id.clone(),
                group_id: self.group_id.clone(),
                title: self.title.clone(),
                value: e.value,
                max_value: self.max_value,
                is_exempted: e.is_exempted,
                comment: e.comment.clone(),
            })
            .collect()
    }
}

impl Entity for Mark {
    fn id(&self) -> &str {
        &self.id
    }
}
