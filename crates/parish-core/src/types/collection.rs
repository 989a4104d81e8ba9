//! Collection name type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A logical collection in the record store.
///
/// The set is closed: one collection per entity kind. Each maps 1:1 to a
/// top-level namespace in the store, named by [`Collection::as_str`].
///
/// # Example
///
/// ```
/// use parish_core::Collection;
///
/// let collection = Collection::new("massAppointments").unwrap();
/// assert_eq!(collection, Collection::MassAppointments);
/// assert_eq!(collection.to_string(), "massAppointments");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Collection {
    Priests,
    Announcements,
    MassAppointments,
    HouseLiturgyAppointment,
    ChurchLiturgyAppointment,
    BaptismAppointment,
    BaptismRequestForm,
    ConfirmationAppointment,
    ConfirmationRequestForm,
    WeddingAnnouncements,
    WeddingAppointment,
    WeddingRequestForm,
    FuneralAppointment,
    FuneralRequestForm,
    Notification,
}

impl Collection {
    /// Every collection, in declaration order.
    pub const ALL: [Collection; 15] = [
        Collection::Priests,
        Collection::Announcements,
        Collection::MassAppointments,
        Collection::HouseLiturgyAppointment,
        Collection::ChurchLiturgyAppointment,
        Collection::BaptismAppointment,
        Collection::BaptismRequestForm,
        Collection::ConfirmationAppointment,
        Collection::ConfirmationRequestForm,
        Collection::WeddingAnnouncements,
        Collection::WeddingAppointment,
        Collection::WeddingRequestForm,
        Collection::FuneralAppointment,
        Collection::FuneralRequestForm,
        Collection::Notification,
    ];

    /// Parse a collection from its store name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not one of the known collections.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                InvalidInputError::Collection {
                    value: s.to_string(),
                    reason: "not a known collection".to_string(),
                }
                .into()
            })
    }

    /// Returns the store namespace of this collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Priests => "priests",
            Collection::Announcements => "announcements",
            Collection::MassAppointments => "massAppointments",
            Collection::HouseLiturgyAppointment => "houseLiturgyAppointment",
            Collection::ChurchLiturgyAppointment => "churchLiturgyAppointment",
            Collection::BaptismAppointment => "baptismAppointment",
            Collection::BaptismRequestForm => "baptismRequestForm",
            Collection::ConfirmationAppointment => "confirmationAppointment",
            Collection::ConfirmationRequestForm => "confirmationRequestForm",
            Collection::WeddingAnnouncements => "weddingAnnouncements",
            Collection::WeddingAppointment => "weddingAppointment",
            Collection::WeddingRequestForm => "weddingRequestForm",
            Collection::FuneralAppointment => "funeralAppointment",
            Collection::FuneralRequestForm => "funeralRequestForm",
            Collection::Notification => "notification",
        }
    }

    /// Returns true for collections whose records carry a priest assignment.
    pub fn is_priest_assigned(&self) -> bool {
        matches!(
            self,
            Collection::MassAppointments
                | Collection::HouseLiturgyAppointment
                | Collection::ChurchLiturgyAppointment
        )
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Collection {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Collection> for String {
    fn from(collection: Collection) -> Self {
        collection.as_str().to_string()
    }
}

impl AsRef<str> for Collection {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
