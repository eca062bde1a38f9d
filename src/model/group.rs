use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    #[default]
    Annual,
    /// Membership scoped to a half-year term; needs explicit start and end dates.
    Semestral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: GroupKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub member_ids: Vec<String>,
    pub max_members: usize,
    #[serde(default)]
    pub current_members: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDraft {
    pub name: String,
    #[serde(default)]
    pub kind: GroupKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    /// Left out on update to keep the stored roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_ids: Option<Vec<String>>,
    pub max_members: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl Group {
    pub fn is_full(&self) -> bool {
        self.member_ids.len() >= self.max_members
    }

    /// Adds the member when absent and below capacity; anything else is a silent no-op.
    pub fn add_member(&mut self, member_id: &str) -> bool {
        if self.member_ids.iter().any(|m| m == member_id) || self.is_full() {
            return false;
        }
        self.member_ids.push(member_id.to_string());
        self.current_members = self.member_ids.len();
        true
    }

    pub fn remove_member(&mut self, member_id: &str) -> bool {
        let before = self.member_ids.len();
        self.member_ids.retain(|m| m != member_id);
        self.current_members = self.member_ids.len();
        before != self.member_ids.len()
    }
}

impl Entity for Group {
    fn id(&self) -> &str {
        &self.id
    }

    fn normalize(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.member_ids.retain(|m| seen.insert(m.clone()));
        if self.member_ids.len() > self.max_members {
            tracing::warn!(
                group_id = %self.id,
                members = self.member_ids.len(),
                max = self.max_members,
                "group over capacity; clipping member list"
            );
            self.member_ids.truncate(self.max_members);
        }
        self.current_members = self.member_ids.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(max: usize, ids: &[&str]) -> Group {
        let mut g = Group {
            id: "g1".into(),
            name: "Robotics".into(),
            kind: GroupKind::Annual,
            teacher_id: None,
            member_ids: ids.iter().map(|s| s.to_string()).collect(),
            max_members: max,
            current_members: 0,
            start_date: None,
            end_date: None,
            created_at: None,
            updated_at: None,
        };
        g.normalize();
        g
    }

    #[test]
    fn add_member_until_capacity_then_no_op() {
        let mut g = group(2, &["a"]);
        assert!(g.add_member("b"));
        assert_eq!(g.member_ids, vec!["a", "b"]);
        assert_eq!(g.current_members, 2);

        assert!(!g.add_member("c"));
        assert_eq!(g.member_ids, vec!["a", "b"]);
        assert_eq!(g.current_members, 2);
    }

    #[test]
    fn duplicate_add_is_no_op() {
        let mut g = group(5, &["a"]);
        assert!(!g.add_member("a"));
        assert_eq!(g.member_ids, vec!["a"]);
    }

    #[test]
    fn remove_is_unconditional_and_recounts() {
        let mut g = group(2, &["a", "b"]);
        assert!(g.remove_member("a"));
        assert!(!g.remove_member("a"));
        assert_eq!(g.current_members, 1);
        assert!(!g.is_full());
    }

    #[test]
    fn normalize_dedupes_and_clips_to_capacity() {
        let g = group(2, &["a", "a", "b", "c"]);
        assert_eq!(g.member_ids, vec!["a", "b"]);
        assert_eq!(g.current_members, 2);
    }
}
