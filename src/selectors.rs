//! Derived views over the store. Plain linear scans; nothing is cached.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::model::{CalendarEvent, Group, Message, Payment, PaymentStatus, Person, Role, Student};
use crate::store::{CalendarState, Slice, Store};

pub fn active_count<P: Person>(people: &Slice<P>) -> usize {
    people.items.iter().filter(|p| p.is_active()).count()
}

pub fn inactive_count<P: Person>(people: &Slice<P>) -> usize {
    people.items.len() - active_count(people)
}

pub fn pending_amount_total<P: Person>(people: &Slice<P>) -> f64 {
    people.items.iter().map(|p| p.core().pending_amount).sum()
}

pub fn pending_payments_total(payments: &Slice<Payment>) -> f64 {
    payments
        .items
        .iter()
        .filter(|p| p.status == PaymentStatus::Pending)
        .map(|p| p.amount)
        .sum()
}

pub fn overdue_payments(payments: &Slice<Payment>, now: DateTime<Utc>) -> Vec<&Payment> {
    payments.items.iter().filter(|p| p.is_overdue(now)).collect()
}

/// Class roster resolved against the student slice; ids with no student are skipped.
pub fn students_in_class<'a>(store: &'a Store, class_id: &str) -> Vec<&'a Student> {
    let Some(class) = store.classes.get(class_id) else {
        return Vec::new();
    };
    class
        .student_ids
        .iter()
        .filter_map(|id| store.students.get(id))
        .collect()
}

pub fn groups_with_open_seats(groups: &Slice<Group>) -> Vec<&Group> {
    groups.items.iter().filter(|g| !g.is_full()).collect()
}

pub fn full_groups(groups: &Slice<Group>) -> Vec<&Group> {
    groups.items.iter().filter(|g| g.is_full()).collect()
}

/// Events in visible categories overlapping `[from, to)`, earliest first.
pub fn visible_events(
    calendar: &CalendarState,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Vec<&CalendarEvent> {
    let mut out: Vec<&CalendarEvent> = calendar
        .events
        .items
        .iter()
        .filter(|e| calendar.is_visible(e.category) && e.overlaps(from, to))
        .collect();
    out.sort_by_key(|e| e.start);
    out
}

pub fn unread_count(inbox: &Slice<Message>) -> usize {
    inbox.items.iter().filter(|m| !m.read).count()
}

pub fn current_role(store: &Store) -> Option<Role> {
    store.auth.user.as_ref().map(|u| u.role)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_students: usize,
    pub inactive_students: usize,
    pub active_teachers: usize,
    pub active_parents: usize,
    pub student_pending_total: f64,
    pub parent_pending_total: f64,
    pub pending_payments_total: f64,
    pub overdue_payments: usize,
    pub classes: usize,
    pub enrolled_students: usize,
    pub groups: usize,
    pub full_groups: usize,
    pub unread_messages: usize,
    pub upcoming_events: usize,
}

pub fn dashboard(store: &Store, now: DateTime<Utc>) -> DashboardStats {
    DashboardStats {
        active_students: active_count(&store.students),
        inactive_students: inactive_count(&store.students),
        active_teachers: active_count(&store.teachers),
        active_parents: active_count(&store.parents),
        student_pending_total: pending_amount_total(&store.students),
        parent_pending_total: pending_amount_total(&store.parents),
        pending_payments_total: pending_payments_total(&store.payments),
        overdue_payments: overdue_payments(&store.payments, now).len(),
        classes: store.classes.len(),
        enrolled_students: store.classes.items.iter().map(|c| c.current_students).sum(),
        groups: store.groups.len(),
        full_groups: full_groups(&store.groups).len(),
        unread_messages: unread_count(&store.inbox),
        upcoming_events: visible_events(&store.calendar, now, now + Duration::days(7)).len(),
    }
}
