//! Status enumerations carried by appointments and request forms.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Review state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Approved,
    Rejected,
}

/// Issuance state of a certificate request form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestFormStatus {
    Pending,
    Ready,
    Released,
}

/// Whether the assigned priest accepted an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriestConfirmationStatus {
    Pending,
    Approved,
    Rejected,
}

/// Status of the shared funeral shape, which serves both as an
/// appointment and as a request form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FuneralStatus {
    Appointment(AppointmentStatus),
    RequestForm(RequestFormStatus),
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Approved => "approved",
            AppointmentStatus::Rejected => "rejected",
        }
    }
}

impl RequestFormStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestFormStatus::Pending => "pending",
            RequestFormStatus::Ready => "ready",
            RequestFormStatus::Released => "released",
        }
    }
}

impl PriestConfirmationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriestConfirmationStatus::Pending => "pending",
            PriestConfirmationStatus::Approved => "approved",
            PriestConfirmationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RequestFormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PriestConfirmationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
