//! Status workflows for appointments and request forms.
//!
//! Appointments move `pending -> approved | rejected`. Request forms move
//! `pending -> ready -> released`. A missing status counts as `pending`.
//! Every status step an administrator takes also leaves a notification for
//! the record's owner.
//!
//! Priest-assigned appointments additionally carry a priest and that
//! priest's confirmation, managed by [`Workflow::assign_priest`],
//! [`Workflow::confirm_priest`] and [`Workflow::decline_priest`].

mod visibility;

pub use visibility::{is_visible, priest_id_for, visible_to};

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use crate::Result;
use crate::accessor::{Accessor, Clock, CollectionHandle};
use crate::display::separate_pascal_case;
use crate::entities::{
    AppointmentStatus, Notification, NotificationType, PriestConfirmationStatus,
    RequestFormStatus, kinds,
};
use crate::error::{AuthError, StoreError, WorkflowError};
use crate::repo::Document;
use crate::traits::Store;
use crate::types::{Collection, RecordId, RecordPath};
use crate::user::User;

const STATUS_FIELD: &str = "status";
const OWNER_FIELD: &str = "userId";

/// Minimum length of a release recipient's name, after trimming.
pub const MIN_RELEASED_TO_LEN: usize = 2;

/// Which status lifecycle a collection follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Appointment,
    RequestForm,
}

impl Lifecycle {
    pub fn of(collection: Collection) -> Option<Self> {
        match collection {
            Collection::MassAppointments
            | Collection::HouseLiturgyAppointment
            | Collection::ChurchLiturgyAppointment
            | Collection::BaptismAppointment
            | Collection::ConfirmationAppointment
            | Collection::WeddingAppointment
            | Collection::FuneralAppointment => Some(Lifecycle::Appointment),
            Collection::BaptismRequestForm
            | Collection::ConfirmationRequestForm
            | Collection::WeddingRequestForm
            | Collection::FuneralRequestForm => Some(Lifecycle::RequestForm),
            Collection::Priests
            | Collection::Announcements
            | Collection::WeddingAnnouncements
            | Collection::Notification => None,
        }
    }
}

/// Outcome of a workflow step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub path: RecordPath,
    /// The notification left for the owner, if one was created.
    pub notification: Option<RecordId>,
}

/// Drives status changes on records in a store.
#[derive(Debug, Clone)]
pub struct Workflow<S> {
    store: S,
    clock: Clock,
}

impl<S: Store + Clone> Workflow<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Utc::now,
        }
    }

    /// Replace the clock used for stamps and notification dates.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn handle(&self, collection: Collection) -> CollectionHandle<S> {
        CollectionHandle::new(self.store.clone(), collection).with_clock(self.clock)
    }

    /// Approve a pending appointment.
    pub async fn approve(&self, actor: &User, collection: Collection, id: &RecordId) -> Result<Transition> {
        self.review(actor, collection, id, AppointmentStatus::Approved).await
    }

    /// Reject a pending appointment.
    pub async fn reject(&self, actor: &User, collection: Collection, id: &RecordId) -> Result<Transition> {
        self.review(actor, collection, id, AppointmentStatus::Rejected).await
    }

    #[instrument(skip(self, actor), fields(user = %actor.id))]
    async fn review(
        &self,
        actor: &User,
        collection: Collection,
        id: &RecordId,
        to: AppointmentStatus,
    ) -> Result<Transition> {
        require_admin(actor, &format!("{} appointments", verb(to)))?;
        require_lifecycle(collection, Lifecycle::Appointment, verb(to))?;

        let handle = self.handle(collection);
        let record = fetch_existing(&handle, id).await?;
        let path = RecordPath::from_parts(collection, id.clone());
        require_status(&path, &record, AppointmentStatus::Pending.as_str(), to.as_str())?;

        handle
            .patch(id, single_field(STATUS_FIELD, json!(to)))
            .await?;

        let title = notification_title(collection);
        let message = format!("{} has been {}", title.as_deref().unwrap_or_default(), to);
        let notification = self.notify(collection, &record, message).await;

        info!(%path, status = %to, "Appointment reviewed");
        Ok(Transition { path, notification })
    }

    /// Mark a pending request form's certificate as ready for release.
    #[instrument(skip(self, actor), fields(user = %actor.id))]
    pub async fn mark_ready(&self, actor: &User, collection: Collection, id: &RecordId) -> Result<Transition> {
        require_admin(actor, "mark certificates ready")?;
        require_lifecycle(collection, Lifecycle::RequestForm, "mark ready")?;

        let handle = self.handle(collection);
        let record = fetch_existing(&handle, id).await?;
        let path = RecordPath::from_parts(collection, id.clone());
        require_status(
            &path,
            &record,
            RequestFormStatus::Pending.as_str(),
            RequestFormStatus::Ready.as_str(),
        )?;

        handle
            .patch(id, single_field(STATUS_FIELD, json!(RequestFormStatus::Ready)))
            .await?;

        let notification = self
            .notify(collection, &record, "Certificate is ready to be released".to_string())
            .await;

        info!(%path, "Certificate marked ready");
        Ok(Transition { path, notification })
    }

    /// Record that a ready certificate was handed to `released_to`.
    #[instrument(skip(self, actor), fields(user = %actor.id))]
    pub async fn release(
        &self,
        actor: &User,
        collection: Collection,
        id: &RecordId,
        released_to: &str,
    ) -> Result<Transition> {
        require_admin(actor, "release certificates")?;
        require_lifecycle(collection, Lifecycle::RequestForm, "release")?;

        let released_to = released_to.trim();
        if released_to.chars().count() < MIN_RELEASED_TO_LEN {
            return Err(WorkflowError::Release {
                reason: format!("name must have at least {} letters", MIN_RELEASED_TO_LEN),
            }
            .into());
        }

        let handle = self.handle(collection);
        let record = fetch_existing(&handle, id).await?;
        let path = RecordPath::from_parts(collection, id.clone());
        let current = current_status(&record);
        if current.as_deref() != Some(RequestFormStatus::Ready.as_str()) {
            return Err(WorkflowError::InvalidTransition {
                path: path.to_string(),
                from: current.unwrap_or_else(|| RequestFormStatus::Pending.to_string()),
                to: RequestFormStatus::Released.to_string(),
            }
            .into());
        }

        let mut changes = single_field(STATUS_FIELD, json!(RequestFormStatus::Released));
        changes.insert("releasedTo", json!(released_to));
        changes.insert("releasedDate", json!(day_stamp((self.clock)())));
        handle.patch(id, changes).await?;

        let notification = self
            .notify(
                collection,
                &record,
                format!("Certificate has been released to {}", released_to),
            )
            .await;

        info!(%path, released_to, "Certificate released");
        Ok(Transition { path, notification })
    }

    /// Assign a priest to an appointment.
    ///
    /// With `send_request` the priest must still confirm; otherwise the
    /// assignment is confirmed outright.
    #[instrument(skip(self, actor), fields(user = %actor.id))]
    pub async fn assign_priest(
        &self,
        actor: &User,
        collection: Collection,
        id: &RecordId,
        priest_id: &RecordId,
        send_request: bool,
    ) -> Result<Transition> {
        require_admin(actor, "assign priests")?;
        require_priest_assigned(collection, "assign a priest")?;

        let priests = Accessor::<_, kinds::Priests>::new(self.store.clone());
        priests.require(priest_id).await?;

        let confirmation = if send_request {
            PriestConfirmationStatus::Pending
        } else {
            PriestConfirmationStatus::Approved
        };
        let mut changes = single_field("priestId", json!(priest_id.as_str()));
        changes.insert("priestConfirmationStatus", json!(confirmation));
        self.handle(collection).patch(id, changes).await?;

        let path = RecordPath::from_parts(collection, id.clone());
        info!(%path, %priest_id, %confirmation, "Priest assigned");
        Ok(Transition {
            path,
            notification: None,
        })
    }

    /// Accept an assignment on behalf of the assigned priest.
    pub async fn confirm_priest(&self, actor: &User, collection: Collection, id: &RecordId) -> Result<Transition> {
        self.answer_assignment(actor, collection, id, PriestConfirmationStatus::Approved)
            .await
    }

    /// Decline an assignment on behalf of the assigned priest.
    pub async fn decline_priest(&self, actor: &User, collection: Collection, id: &RecordId) -> Result<Transition> {
        self.answer_assignment(actor, collection, id, PriestConfirmationStatus::Rejected)
            .await
    }

    #[instrument(skip(self, actor), fields(user = %actor.id))]
    async fn answer_assignment(
        &self,
        actor: &User,
        collection: Collection,
        id: &RecordId,
        to: PriestConfirmationStatus,
    ) -> Result<Transition> {
        require_priest_assigned(collection, "confirm a priest")?;

        let handle = self.handle(collection);
        let record = fetch_existing(&handle, id).await?;
        let path = RecordPath::from_parts(collection, id.clone());

        if !actor.is_super_admin {
            let own = priest_id_for(&self.store, actor).await?;
            let assigned = record.get("priestId").and_then(Value::as_str);
            if own.is_none() || assigned != own.as_ref().map(RecordId::as_str) {
                return Err(AuthError::Forbidden {
                    user: actor.id.clone(),
                    action: format!("answer the assignment on {}", path),
                }
                .into());
            }
        }

        let current = record
            .get("priestConfirmationStatus")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());
        if let Some(from) = current.filter(|s| *s != PriestConfirmationStatus::Pending.as_str()) {
            return Err(WorkflowError::InvalidTransition {
                path: path.to_string(),
                from: from.to_string(),
                to: to.to_string(),
            }
            .into());
        }

        handle
            .patch(id, single_field("priestConfirmationStatus", json!(to)))
            .await?;

        info!(%path, confirmation = %to, "Priest answered assignment");
        Ok(Transition {
            path,
            notification: None,
        })
    }

    /// Leave a notification for the record's owner. A failed write is
    /// logged and reported as no notification.
    async fn notify(
        &self,
        collection: Collection,
        record: &Document,
        message: String,
    ) -> Option<RecordId> {
        let kind = NotificationType::for_collection(collection)?;

        let notification = Notification {
            message,
            timestamp: day_stamp((self.clock)()),
            title: separate_pascal_case(kind.as_str()),
            kind,
            user_id: record
                .get(OWNER_FIELD)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            read: None,
            from_admin: Some(true),
        };

        let notifications = Accessor::<_, kinds::Notifications>::new(self.store.clone())
            .with_clock(self.clock);
        match notifications.create(&notification).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(%collection, error = %e, "Status saved but notification was not written");
                None
            }
        }
    }
}

fn verb(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Approved => "approve",
        AppointmentStatus::Rejected => "reject",
        AppointmentStatus::Pending => "reopen",
    }
}

fn notification_title(collection: Collection) -> Option<String> {
    NotificationType::for_collection(collection).map(|kind| separate_pascal_case(kind.as_str()))
}

/// Day form used for notification timestamps and release dates.
fn day_stamp(time: DateTime<Utc>) -> String {
    time.format("%a %b %d %Y").to_string()
}

fn single_field(key: &str, value: Value) -> Document {
    let mut doc = Document::empty();
    doc.insert(key, value);
    doc
}

fn require_admin(actor: &User, action: &str) -> Result<()> {
    if actor.is_super_admin {
        Ok(())
    } else {
        Err(AuthError::Forbidden {
            user: actor.id.clone(),
            action: action.to_string(),
        }
        .into())
    }
}

fn require_lifecycle(collection: Collection, expected: Lifecycle, action: &str) -> Result<()> {
    if Lifecycle::of(collection) == Some(expected) {
        Ok(())
    } else {
        Err(WorkflowError::Unsupported {
            collection: collection.to_string(),
            action: action.to_string(),
        }
        .into())
    }
}

fn require_priest_assigned(collection: Collection, action: &str) -> Result<()> {
    if collection.is_priest_assigned() {
        Ok(())
    } else {
        Err(WorkflowError::Unsupported {
            collection: collection.to_string(),
            action: action.to_string(),
        }
        .into())
    }
}

async fn fetch_existing<S: Store>(handle: &CollectionHandle<S>, id: &RecordId) -> Result<Document> {
    handle.fetch(id).await?.ok_or_else(|| {
        StoreError::not_found(RecordPath::from_parts(handle.collection(), id.clone())).into()
    })
}

fn current_status(record: &Document) -> Option<String> {
    record
        .get(STATUS_FIELD)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Only records in `from` (or with no status yet) may move to `to`.
fn require_status(path: &RecordPath, record: &Document, from: &str, to: &str) -> Result<()> {
    match current_status(record) {
        Some(current) if current != from => Err(WorkflowError::InvalidTransition {
            path: path.to_string(),
            from: current,
            to: to.to_string(),
        }
        .into()),
        _ => Ok(()),
    }
}
