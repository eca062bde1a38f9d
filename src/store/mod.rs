//! Client-side domain state.
//!
//! The `Store` is an ordinary value owned by the process state. Every mutation
//! goes through `Store::dispatch` with a typed action; nothing here talks to the
//! network or to disk.

mod slice;
mod ui;

use chrono::{DateTime, Utc};

use crate::i18n::Locale;
use crate::model::{Class, Group, Mark, Message, Parent, Payment, PaymentStatus, Student, Teacher};

pub use slice::{Slice, SliceAction};
pub use ui::{AuthAction, AuthState, CalendarAction, CalendarState, Theme, UiAction, UiState};

#[derive(Debug, Clone)]
pub enum ClassAction {
    Slice(SliceAction<Class>),
    AddStudent { class_id: String, student_id: String },
    RemoveStudent { class_id: String, student_id: String },
}

#[derive(Debug, Clone)]
pub enum GroupAction {
    Slice(SliceAction<Group>),
    AddMember { group_id: String, member_id: String },
    RemoveMember { group_id: String, member_id: String },
}

#[derive(Debug, Clone)]
pub enum PaymentAction {
    Slice(SliceAction<Payment>),
    MarkPaid { id: String, paid_at: DateTime<Utc> },
}

#[derive(Debug, Clone)]
pub enum InboxAction {
    Slice(SliceAction<Message>),
    MarkRead(String),
}

#[derive(Debug, Clone)]
pub enum Action {
    Students(SliceAction<Student>),
    Teachers(SliceAction<Teacher>),
    Parents(SliceAction<Parent>),
    Classes(ClassAction),
    Groups(GroupAction),
    Marks(SliceAction<Mark>),
    Payments(PaymentAction),
    Calendar(CalendarAction),
    Inbox(InboxAction),
    Ui(UiAction),
    Auth(AuthAction),
}

#[derive(Debug, Clone)]
pub struct Store {
    pub students: Slice<Student>,
    pub teachers: Slice<Teacher>,
    pub parents: Slice<Parent>,
    pub classes: Slice<Class>,
    pub groups: Slice<Group>,
    pub marks: Slice<Mark>,
    pub payments: Slice<Payment>,
    pub calendar: CalendarState,
    pub inbox: Slice<Message>,
    pub ui: UiState,
    pub auth: AuthState,
}

impl Store {
    pub fn new(locale: Locale) -> Self {
        Self {
            students: Slice::default(),
            teachers: Slice::default(),
            parents: Slice::default(),
            classes: Slice::default(),
            groups: Slice::default(),
            marks: Slice::default(),
            payments: Slice::default(),
            calendar: CalendarState::default(),
            inbox: Slice::default(),
            ui: UiState::new(locale),
            auth: AuthState::default(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.ui.locale
    }

    /// Applies one action synchronously. Returns whether state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        tracing::trace!(?action, "dispatch");
        match action {
            Action::Students(a) => self.students.reduce(a),
            Action::Teachers(a) => self.teachers.reduce(a),
            Action::Parents(a) => self.parents.reduce(a),
            Action::Classes(a) => reduce_classes(&mut self.classes, a),
            Action::Groups(a) => reduce_groups(&mut self.groups, a),
            Action::Marks(a) => self.marks.reduce(a),
            Action::Payments(a) => reduce_payments(&mut self.payments, a),
            Action::Calendar(a) => self.calendar.reduce(a),
            Action::Inbox(a) => reduce_inbox(&mut self.inbox, a),
            Action::Ui(a) => self.ui.reduce(a),
            Action::Auth(a) => self.auth.reduce(a),
        }
    }
}

fn reduce_classes(classes: &mut Slice<Class>, action: ClassAction) -> bool {
    match action {
        ClassAction::Slice(a) => classes.reduce(a),
        ClassAction::AddStudent {
            class_id,
            student_id,
        } => classes
            .get_mut(&class_id)
            .is_some_and(|c| c.add_student(&student_id)),
        ClassAction::RemoveStudent {
            class_id,
            student_id,
        } => classes
            .get_mut(&class_id)
            .is_some_and(|c| c.remove_student(&student_id)),
    }
}

fn reduce_groups(groups: &mut Slice<Group>, action: GroupAction) -> bool {
    match action {
        GroupAction::Slice(a) => groups.reduce(a),
        GroupAction::AddMember {
            group_id,
            member_id,
        } => groups
            .get_mut(&group_id)
            .is_some_and(|g| g.add_member(&member_id)),
        GroupAction::RemoveMember {
            group_id,
            member_id,
        } => groups
            .get_mut(&group_id)
            .is_some_and(|g| g.remove_member(&member_id)),
    }
}

fn reduce_payments(payments: &mut Slice<Payment>, action: PaymentAction) -> bool {
    match action {
        PaymentAction::Slice(a) => payments.reduce(a),
        PaymentAction::MarkPaid { id, paid_at } => match payments.get_mut(&id) {
            Some(p) if p.status != PaymentStatus::Paid => {
                p.status = PaymentStatus::Paid;
                p.paid_at = Some(paid_at);
                true
            }
            _ => false,
        },
    }
}

fn reduce_inbox(inbox: &mut Slice<Message>, action: InboxAction) -> bool {
    match action {
        InboxAction::Slice(a) => inbox.reduce(a),
        InboxAction::MarkRead(id) => match inbox.get_mut(&id) {
            Some(m) if !m.read => {
                m.read = true;
                true
            }
            _ => false,
        },
    }
}
