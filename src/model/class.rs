use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: String,
    pub name: String,
    pub grade: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub student_ids: Vec<String>,
    #[serde(default)]
    pub current_students: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDraft {
    pub name: String,
    pub grade: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    /// Left out on update to keep the stored roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_ids: Option<Vec<String>>,
}

impl Class {
    /// Appends the student unless already enrolled. Returns whether the roster changed.
    pub fn add_student(&mut self, student_id: &str) -> bool {
        if self.student_ids.iter().any(|s| s == student_id) {
            return false;
        }
        self.student_ids.push(student_id.to_string());
        self.current_students = self.student_ids.len();
        true
    }

    pub fn remove_student(&mut self, student_id: &str) -> bool {
        let before = self.student_ids.len();
        self.student_ids.retain(|s| s != student_id);
        self.current_students = self.student_ids.len();
        before != self.student_ids.len()
    }
}

impl Entity for Class {
    fn id(&self) -> &str {
        &self.id
    }

    fn normalize(&mut self) {
        self.current_students = self.student_ids.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(ids: &[&str]) -> Class {
        Class {
            id: "c1".into(),
            name: "5A".into(),
            grade: "5".into(),
            teacher_id: None,
            student_ids: ids.iter().map(|s| s.to_string()).collect(),
            current_students: 0,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn roster_counts_follow_the_id_list() {
        let mut c = class(&["a"]);
        c.normalize();
        assert_eq!(c.current_students, 1);

        assert!(c.add_student("b"));
        assert!(!c.add_student("b"));
        assert_eq!(c.student_ids, vec!["a", "b"]);
        assert_eq!(c.current_students, 2);

        assert!(c.remove_student("a"));
        assert!(!c.remove_student("zzz"));
        assert_eq!(c.student_ids, vec!["b"]);
        assert_eq!(c.current_students, 1);
    }
}
