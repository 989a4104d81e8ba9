//! Notifications addressed to record owners.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Collection;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationType {
    MassAppointment,
    HouseLiturgyAppointment,
    ChurchLiturgyAppointment,
    BaptismAppointment,
    BaptismRequestForm,
    ConfirmationAppointment,
    ConfirmationRequestForm,
    WeddingAnnouncement,
    WeddingAppointment,
    WeddingRequestForm,
    FuneralRequestForm,
    FuneralAppointment,
}

impl NotificationType {
    /// The notification type for records of `collection`, if it has one.
    pub fn for_collection(collection: Collection) -> Option<Self> {
        Some(match collection {
            Collection::MassAppointments => NotificationType::MassAppointment,
            Collection::HouseLiturgyAppointment => NotificationType::HouseLiturgyAppointment,
            Collection::ChurchLiturgyAppointment => NotificationType::ChurchLiturgyAppointment,
            Collection::BaptismAppointment => NotificationType::BaptismAppointment,
            Collection::BaptismRequestForm => NotificationType::BaptismRequestForm,
            Collection::ConfirmationAppointment => NotificationType::ConfirmationAppointment,
            Collection::ConfirmationRequestForm => NotificationType::ConfirmationRequestForm,
            Collection::WeddingAnnouncements => NotificationType::WeddingAnnouncement,
            Collection::WeddingAppointment => NotificationType::WeddingAppointment,
            Collection::WeddingRequestForm => NotificationType::WeddingRequestForm,
            Collection::FuneralRequestForm => NotificationType::FuneralRequestForm,
            Collection::FuneralAppointment => NotificationType::FuneralAppointment,
            Collection::Priests | Collection::Announcements | Collection::Notification => {
                return None;
            }
        })
    }

    /// The PascalCase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::MassAppointment => "MassAppointment",
            NotificationType::HouseLiturgyAppointment => "HouseLiturgyAppointment",
            NotificationType::ChurchLiturgyAppointment => "ChurchLiturgyAppointment",
            NotificationType::BaptismAppointment => "BaptismAppointment",
            NotificationType::BaptismRequestForm => "BaptismRequestForm",
            NotificationType::ConfirmationAppointment => "ConfirmationAppointment",
            NotificationType::ConfirmationRequestForm => "ConfirmationRequestForm",
            NotificationType::WeddingAnnouncement => "WeddingAnnouncement",
            NotificationType::WeddingAppointment => "WeddingAppointment",
            NotificationType::WeddingRequestForm => "WeddingRequestForm",
            NotificationType::FuneralRequestForm => "FuneralRequestForm",
            NotificationType::FuneralAppointment => "FuneralAppointment",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message shown to a user about one of their records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    /// Day the notification was raised, e.g. `Mon Jun 03 2024`.
    pub timestamp: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_admin: Option<bool>,
}
