//! The one submission path every entity form goes through:
//! validate, call the API, then dispatch into the store.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{ApiClient, ApiError, Service};
use crate::i18n::{self, Locale};
use crate::model::{
    BulkMarks, CalendarEvent, CalendarEventDraft, Class, ClassDraft, Entity, Group, GroupDraft, Mark,
    MarkDraft, Message, MessageDraft, Parent, ParentDraft, Payment, PaymentDraft, Student,
    StudentDraft, Teacher, TeacherDraft,
};
use crate::store::{
    Action, CalendarAction, ClassAction, GroupAction, InboxAction, PaymentAction, Slice,
    SliceAction, Store,
};
use crate::validate::{Validate, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// An entity that has a form, a backend collection and a slice.
pub trait Resource: Entity + Clone + Serialize + DeserializeOwned {
    type Draft: Validate + Serialize + DeserializeOwned;

    const SERVICE: Service;
    /// Collection path on the service, also the IPC method family.
    const PATH: &'static str;
    /// Catalog key of the entity's display name.
    const LABEL_KEY: &'static str;

    fn slice(store: &Store) -> &Slice<Self>;
    fn wrap(action: SliceAction<Self>) -> Action;
}

macro_rules! resource {
    ($ty:ty, $draft:ty, $service:expr, $path:literal, $label:literal, $field:ident, $wrap:expr) => {
        impl Resource for $ty {
            type Draft = $draft;

            const SERVICE: Service = $service;
            const PATH: &'static str = $path;
            const LABEL_KEY: &'static str = $label;

            fn slice(store: &Store) -> &Slice<Self> {
                &store.$field
            }

            fn wrap(action: SliceAction<Self>) -> Action {
                $wrap(action)
            }
        }
    };
}

resource!(Student, StudentDraft, Service::Users, "students", "entity.student", students, Action::Students);
resource!(Teacher, TeacherDraft, Service::Users, "teachers", "entity.teacher", teachers, Action::Teachers);
resource!(Parent, ParentDraft, Service::Users, "parents", "entity.parent", parents, Action::Parents);
resource!(Class, ClassDraft, Service::Classroom, "classes", "entity.class", classes, |a| Action::Classes(ClassAction::Slice(a)));
resource!(Group, GroupDraft, Service::Classroom, "groups", "entity.group", groups, |a| Action::Groups(GroupAction::Slice(a)));
resource!(Mark, MarkDraft, Service::Classroom, "marks", "entity.mark", marks, Action::Marks);
resource!(Payment, PaymentDraft, Service::Classroom, "payments", "entity.payment", payments, |a| Action::Payments(PaymentAction::Slice(a)));
resource!(Message, MessageDraft, Service::Classroom, "messages", "entity.message", inbox, |a| Action::Inbox(InboxAction::Slice(a)));

impl Resource for CalendarEvent {
    type Draft = CalendarEventDraft;

    const SERVICE: Service = Service::Classroom;
    const PATH: &'static str = "events";
    const LABEL_KEY: &'static str = "entity.event";

    fn slice(store: &Store) -> &Slice<Self> {
        &store.calendar.events
    }

    fn wrap(action: SliceAction<Self>) -> Action {
        Action::Calendar(CalendarAction::Events(action))
    }
}

/// Localized toast text for a finished mutation, e.g. "Student created".
pub fn notice<R: Resource>(locale: Locale, verb_key: &str) -> String {
    let entity = i18n::t(locale, R::LABEL_KEY).to_string();
    i18n::render(locale, verb_key, &[("entity", entity)])
}

/// Reloads the collection. On failure the slice keeps its items and records the error.
pub fn refresh<R: Resource>(store: &mut Store, api: &ApiClient) -> Result<usize, ApiError> {
    store.dispatch(R::wrap(SliceAction::Started));
    match api.list::<R>(R::SERVICE, R::PATH) {
        Ok(items) => {
            let n = items.len();
            store.dispatch(R::wrap(SliceAction::Loaded(items)));
            Ok(n)
        }
        Err(e) => {
            let message = i18n::t(store.locale(), e.message_key()).to_string();
            store.dispatch(R::wrap(SliceAction::Failed(message)));
            Err(e)
        }
    }
}

pub fn create<R: Resource>(
    store: &mut Store,
    api: &ApiClient,
    draft: &R::Draft,
) -> Result<R, SubmitError> {
    if let Err(e) = draft.validate() {
        tracing::info!(entity = R::PATH, fields = ?e.fields().collect::<Vec<_>>(), "draft rejected");
        return Err(e.into());
    }
    let mut record: R = api.post(R::SERVICE, R::PATH, draft)?;
    record.normalize();
    tracing::info!(entity = R::PATH, id = record.id(), "created");
    store.dispatch(R::wrap(SliceAction::Added(record.clone())));
    Ok(record)
}

pub fn update<R: Resource>(
    store: &mut Store,
    api: &ApiClient,
    id: &str,
    draft: &R::Draft,
) -> Result<R, SubmitError> {
    if let Err(e) = draft.validate() {
        tracing::info!(entity = R::PATH, id, fields = ?e.fields().collect::<Vec<_>>(), "draft rejected");
        return Err(e.into());
    }
    let mut record: R = api.put(R::SERVICE, R::PATH, id, draft)?;
    record.normalize();
    tracing::info!(entity = R::PATH, id, "updated");
    store.dispatch(R::wrap(SliceAction::Updated(record.clone())));
    Ok(record)
}

pub fn remove<R: Resource>(store: &mut Store, api: &ApiClient, id: &str) -> Result<(), SubmitError> {
    api.delete(R::SERVICE, R::PATH, id)?;
    tracing::info!(entity = R::PATH, id, "deleted");
    store.dispatch(R::wrap(SliceAction::Removed(id.to_string())));
    Ok(())
}

/// Pushes a full record (e.g. after a membership change) without running a draft schema.
pub fn push<R: Resource>(api: &ApiClient, record: &R) -> Result<R, SubmitError> {
    Ok(api.put(R::SERVICE, R::PATH, record.id(), record)?)
}

/// One request for a whole marking sheet; every returned mark lands in the slice.
pub fn submit_bulk_marks(
    store: &mut Store,
    api: &ApiClient,
    sheet: &BulkMarks,
) -> Result<Vec<Mark>, SubmitError> {
    if let Err(e) = sheet.validate() {
        tracing::info!(entity = "marks", fields = ?e.fields().collect::<Vec<_>>(), "bulk sheet rejected");
        return Err(e.into());
    }
    let marks: Vec<Mark> = api.post(Service::Classroom, "marks/bulk", sheet)?;
    tracing::info!(count = marks.len(), "bulk marks created");
    for m in &marks {
        store.dispatch(Action::Marks(SliceAction::Added(m.clone())));
    }
    Ok(marks)
}
