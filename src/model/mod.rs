mod calendar;
mod class;
mod group;
mod mark;
mod message;
mod payment;
mod person;
mod user;

pub use calendar::{CalendarEvent, CalendarEventDraft, EventCategory};
pub use class::{Class, ClassDraft};
pub use group::{Group, GroupDraft, GroupKind};
pub use mark::{BulkMarks, Mark, MarkDraft};
pub use message::{Message, MessageDraft};
pub use payment::{Payment, PaymentDraft, PaymentStatus};
pub use person::{
    Parent, ParentDraft, Person, PersonDraft, Student, StudentDraft, Teacher, TeacherDraft,
};
pub use user::{Role, User};

#[cfg(test)]
pub use mark::BulkMarkEntry;
#[cfg(test)]
pub use person::{PersonCore, Status};

/// A record owned by exactly one slice, keyed by a generated id.
pub trait Entity {
    fn id(&self) -> &str;

    /// Re-establish derived fields after the record entered or changed inside a slice.
    fn normalize(&mut self) {}
}
