use serde::{Deserialize, Serialize};

use crate::model::{
    BulkMarks, CalendarEventDraft, ClassDraft, GroupDraft, GroupKind, MarkDraft, MessageDraft,
    ParentDraft, PaymentDraft, PersonDraft, StudentDraft, TeacherDraft,
};

use super::{Checks, Validate, ValidationErrors};

const NAME_MAX: usize = 120;
const GROUP_MAX_MEMBERS: usize = 500;

fn person(c: &mut Checks, p: &PersonDraft) {
    c.required("name", &p.name, NAME_MAX)
        .optional_max_len("phone", p.phone.as_deref(), 32)
        .non_negative("pendingAmount", p.pending_amount);
    if let Some(email) = p.email.as_deref().filter(|e| !e.trim().is_empty()) {
        c.email("email", email);
    }
}

impl Validate for StudentDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checks::new();
        person(&mut c, &self.person);
        c.optional_max_len("grade", self.grade.as_deref(), 32);
        c.finish()
    }
}

impl Validate for TeacherDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checks::new();
        person(&mut c, &self.person);
        c.optional_max_len("subject", self.subject.as_deref(), 80);
        c.finish()
    }
}

impl Validate for ParentDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checks::new();
        person(&mut c, &self.person);
        c.distinct("childIds", &self.child_ids);
        c.finish()
    }
}

impl Validate for ClassDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checks::new();
        c.required("name", &self.name, NAME_MAX)
            .required("grade", &self.grade, 32)
            .distinct("studentIds", self.student_ids.as_deref().unwrap_or_default());
        c.finish()
    }
}

impl Validate for GroupDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checks::new();
        c.required("name", &self.name, NAME_MAX)
            .range("maxMembers", self.max_members, 1, GROUP_MAX_MEMBERS)
            .distinct("memberIds", self.member_ids.as_deref().unwrap_or_default());
        if let Some(ids) = &self.member_ids {
            if ids.len() > self.max_members {
                c.fail("memberIds", "overCapacity", vec![]);
            }
        }

        if self.kind == GroupKind::Semestral {
            match (self.start_date, self.end_date) {
                (Some(start), Some(end)) => {
                    if end <= start {
                        c.fail("endDate", "endBeforeStart", vec![]);
                    }
                }
                (start, end) => {
                    if start.is_none() {
                        c.fail("startDate", "required", vec![]);
                    }
                    if end.is_none() {
                        c.fail("endDate", "required", vec![]);
                    }
                }
            }
        } else if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end <= start {
                c.fail("endDate", "endBeforeStart", vec![]);
            }
        }
        c.finish()
    }
}

fn mark_target(c: &mut Checks, classroom_id: Option<&str>, group_id: Option<&str>) {
    let present = |v: Option<&str>| v.is_some_and(|s| !s.trim().is_empty());
    if !present(classroom_id) && !present(group_id) {
        c.fail("classroomId", "missingTarget", vec![]);
    }
}

fn mark_value(c: &mut Checks, value: f64, max_value: f64, is_exempted: bool) {
    c.non_negative("value", value);
    if value.is_finite() && max_value.is_finite() && value > max_value && !is_exempted {
        c.fail("value", "exceedsMax", vec![("max", max_value.to_string())]);
    }
}

impl Validate for MarkDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checks::new();
        c.required("studentId", &self.student_id, 64)
            .required("title", &self.title, NAME_MAX)
            .positive("maxValue", self.max_value)
            .optional_max_len("comment", self.comment.as_deref(), 500);
        mark_target(
            &mut c,
            self.classroom_id.as_deref(),
            self.group_id.as_deref(),
        );
        mark_value(&mut c, self.value, self.max_value, self.is_exempted);
        c.finish()
    }
}

impl Validate for BulkMarks {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checks::new();
        mark_target(
            &mut c,
            self.classroom_id.as_deref(),
            self.group_id.as_deref(),
        );
        c.required("title", &self.title, NAME_MAX)
            .positive("maxValue", self.max_value);
        if self.entries.is_empty() {
            c.fail("entries", "empty", vec![]);
        }
        for (i, e) in self.entries.iter().enumerate() {
            c.nested(&format!("entries[{i}]"), |c| {
                c.required("studentId", &e.student_id, 64);
                mark_value(c, e.value, self.max_value, e.is_exempted);
            });
        }
        c.finish()
    }
}

impl Validate for PaymentDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checks::new();
        c.required("payerId", &self.payer_id, 64)
            .positive("amount", self.amount)
            .max_len("description", &self.description, 200);
        c.finish()
    }
}

impl Validate for CalendarEventDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checks::new();
        c.required("title", &self.title, NAME_MAX)
            .optional_max_len("description", self.description.as_deref(), 1000);
        if self.end <= self.start {
            c.fail("end", "endBeforeStart", vec![]);
        }
        c.finish()
    }
}

impl Validate for MessageDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checks::new();
        if self.to_ids.iter().all(|t| t.trim().is_empty()) {
            c.fail("toIds", "required", vec![]);
        }
        c.required("subject", &self.subject, 200)
            .required("body", &self.body, 10_000);
        c.finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checks::new();
        c.email("email", &self.email).min_len("password", &self.password, 6);
        c.finish()
    }
}
