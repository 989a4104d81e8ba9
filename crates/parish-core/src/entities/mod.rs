//! Entity shapes and the compile-time collection mapping.
//!
//! Each collection has a zero-sized marker in [`kinds`] implementing
//! [`CollectionKind`], which ties the collection name to the record shape
//! an [`Accessor`](crate::Accessor) reads and writes:
//!
//! ```
//! use parish_core::Collection;
//! use parish_core::entities::{CollectionKind, kinds};
//!
//! assert_eq!(kinds::FuneralAppointments::COLLECTION, Collection::FuneralAppointment);
//! ```

mod notification;
mod records;
mod status;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::types::Collection;

pub use notification::{Notification, NotificationType};
pub use records::{
    Announcement, BaptismAppointment, BaptismRequestForm, ChurchLiturgy, ConfirmationAppointment,
    ConfirmationRequestForm, FuneralRequestForm, HouseLiturgy, MassAppointment, Priest, Release,
    WeddingAnnouncement, WeddingAppointment, WeddingRequestForm,
};
pub use status::{AppointmentStatus, FuneralStatus, PriestConfirmationStatus, RequestFormStatus};

/// Binds a collection to the shape of its records.
pub trait CollectionKind: Send + Sync + 'static {
    const COLLECTION: Collection;
    type Record: Serialize + DeserializeOwned + Send + Sync;
}

macro_rules! collection_kinds {
    ($($kind:ident => $collection:ident as $record:ty),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $kind;

            impl $crate::entities::CollectionKind for $kind {
                const COLLECTION: $crate::types::Collection = $crate::types::Collection::$collection;
                type Record = $record;
            }
        )*
    };
}

/// Marker types, one per collection.
pub mod kinds {
    use super::*;

    collection_kinds! {
        Priests => Priests as Priest,
        Announcements => Announcements as Announcement,
        MassAppointments => MassAppointments as MassAppointment,
        HouseLiturgyAppointments => HouseLiturgyAppointment as HouseLiturgy,
        ChurchLiturgyAppointments => ChurchLiturgyAppointment as ChurchLiturgy,
        BaptismAppointments => BaptismAppointment as BaptismAppointment,
        BaptismRequestForms => BaptismRequestForm as BaptismRequestForm,
        ConfirmationAppointments => ConfirmationAppointment as ConfirmationAppointment,
        ConfirmationRequestForms => ConfirmationRequestForm as ConfirmationRequestForm,
        WeddingAnnouncements => WeddingAnnouncements as WeddingAnnouncement,
        WeddingAppointments => WeddingAppointment as WeddingAppointment,
        WeddingRequestForms => WeddingRequestForm as WeddingRequestForm,
        FuneralAppointments => FuneralAppointment as FuneralRequestForm,
        FuneralRequestForms => FuneralRequestForm as FuneralRequestForm,
        Notifications => Notification as Notification,
    }
}
