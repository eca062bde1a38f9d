use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

/// Fields shared by students, teachers and parents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonCore {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub pending_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Form fields shared by every person draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub pending_amount: f64,
}

/// Read access the person selectors need, whatever the concrete role.
pub trait Person: Entity {
    fn core(&self) -> &PersonCore;

    fn is_active(&self) -> bool {
        self.core().status == Status::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(flatten)]
    pub core: PersonCore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    #[serde(flatten)]
    pub person: PersonDraft,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(flatten)]
    pub core: PersonCore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDraft {
    #[serde(flatten)]
    pub person: PersonDraft,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    #[serde(flatten)]
    pub core: PersonCore,
    #[serde(default)]
    pub child_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentDraft {
    #[serde(flatten)]
    pub person: PersonDraft,
    #[serde(default)]
    pub child_ids: Vec<String>,
}

macro_rules! person_entity {
    ($($ty:ty),+) => {
        $(
            impl Entity for $ty {
                fn id(&self) -> &str {
                    &self.core.id
                }
            }

            impl Person for $ty {
                fn core(&self) -> &PersonCore {
                    &self.core
                }
            }
        )+
    };
}

person_entity!(Student, Teacher, Parent);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn student_flattens_core_fields_in_camel_case() {
        let s: Student = serde_json::from_value(json!({
            "id": "s1",
            "name": "Amina",
            "status": "Inactive",
            "pendingAmount": 120.5,
            "parentId": "p1"
        }))
        .expect("decode student");
        assert_eq!(s.id(), "s1");
        assert_eq!(s.core.status, Status::Inactive);
        assert_eq!(s.parent_id.as_deref(), Some("p1"));
        assert!(!s.is_active());

        let back = serde_json::to_value(&s).expect("encode student");
        assert_eq!(back["pendingAmount"], json!(120.5));
        assert!(back.get("email").is_none());
    }

    #[test]
    fn status_defaults_to_active() {
        let t: Teacher =
            serde_json::from_value(json!({ "id": "t1", "name": "Karim" })).expect("decode");
        assert!(t.is_active());
        assert_eq!(t.core.pending_amount, 0.0);
    }
}
