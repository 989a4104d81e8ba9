//! Entity shapes, one per collection.
//!
//! Every shape is a plain serde struct in the store's camelCase field
//! naming. Audit fields (`id`, `dateTimeStamp`, `updated`) are not part of
//! these shapes; they live in [`RecordMeta`](crate::repo::RecordMeta).
//! `userId` names the account that submitted the record.

use serde::{Deserialize, Serialize};

use super::status::{AppointmentStatus, FuneralStatus, PriestConfirmationStatus, RequestFormStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Priest {
    /// Identity-provider user id of the priest's own account, if linked.
    pub auth_id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Announcement {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeddingAnnouncement {
    pub content: String,
    pub expiration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MassAppointment {
    pub date: String,
    pub time: String,
    pub mass_intentions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priest_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priest_confirmation_status: Option<PriestConfirmationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// A liturgy celebrated at the church on request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChurchLiturgy {
    pub appointment: String,
    pub full_name: String,
    pub place: String,
    pub date: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priest_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priest_confirmation_status: Option<PriestConfirmationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// A liturgy celebrated at a family's home.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HouseLiturgy {
    pub appointment: String,
    pub full_name: String,
    pub place: String,
    pub date: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priest_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priest_confirmation_status: Option<PriestConfirmationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BaptismAppointment {
    #[serde(rename = "child_sName")]
    pub child_s_name: String,
    #[serde(rename = "father_sName")]
    pub father_s_name: String,
    #[serde(rename = "mother_sName")]
    pub mother_s_name: String,
    pub birthdate: String,
    pub birth_place: String,
    pub address: String,
    pub baptism_date: String,
    pub baptism_place: String,
    pub baptism_sponsors: String,
    pub parents_contact_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BaptismRequestForm {
    pub name: String,
    pub father: String,
    pub mother: String,
    pub date_of_birth: String,
    pub date_of_baptism: String,
    pub place_of_baptism: String,
    pub contact_number: String,
    pub purpose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestFormStatus>,
    #[serde(flatten)]
    pub release: Release,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfirmationAppointment {
    pub name: String,
    pub email: String,
    pub number: String,
    pub birthdate: String,
    pub birth_place: String,
    pub baptism_date: String,
    pub church_place: String,
    pub father_name: String,
    pub mother_name: String,
    pub guardian_number: String,
    pub sponsor_name: String,
    pub sponsor_relation: String,
    pub purpose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfirmationRequestForm {
    pub name: String,
    pub father: String,
    pub mother: String,
    pub date_of_confirmation: String,
    pub contact_number: String,
    pub purpose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestFormStatus>,
    #[serde(flatten)]
    pub release: Release,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeddingAppointment {
    pub bride: String,
    pub bride_age: String,
    pub groom: String,
    pub groom_age: String,
    pub contact_number: String,
    pub venue: String,
    pub date: String,
    pub date_wedding: String,
    pub time_wedding: String,
    pub date_interview: String,
    pub time_interview: String,
    pub date_counseling: String,
    pub date_confirmation: String,
    pub time_confirmation: String,
    pub confirmed_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeddingRequestForm {
    pub brides_name: String,
    pub grooms_name: String,
    pub address: String,
    pub contact_number: String,
    pub date_of_wedding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestFormStatus>,
    #[serde(flatten)]
    pub release: Release,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Shape shared by funeral appointments and funeral certificate requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FuneralRequestForm {
    pub name_of_the_deceased: String,
    pub date_of_birth: String,
    pub date_of_death: String,
    pub date_of_burial: String,
    pub cause_of_death: String,
    pub religion: String,
    pub address: String,
    pub nearest_kin: String,
    pub name_of_informant: String,
    pub phone_number_of_informant: String,
    pub relation_to_the_deceased: String,
    pub funeral_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FuneralStatus>,
    #[serde(flatten)]
    pub release: Release,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Who collected a released certificate, and when.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Release {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn baptism_keeps_possessive_field_names() {
        let baptism = BaptismAppointment {
            child_s_name: "Ana".into(),
            father_s_name: "Jose".into(),
            mother_s_name: "Maria".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&baptism).unwrap();
        assert_eq!(value["child_sName"], "Ana");
        assert_eq!(value["father_sName"], "Jose");
        assert_eq!(value["mother_sName"], "Maria");
        assert!(value.get("status").is_none());
    }

    #[test]
    fn request_form_release_is_flattened() {
        let form: WeddingRequestForm = serde_json::from_value(json!({
            "bridesName": "Liza",
            "groomsName": "Paolo",
            "status": "released",
            "releasedTo": "Paolo",
            "releasedDate": "Mon Jun 03 2024"
        }))
        .unwrap();

        assert_eq!(form.status, Some(RequestFormStatus::Released));
        assert_eq!(form.release.released_to.as_deref(), Some("Paolo"));
        assert_eq!(form.address, "");
    }

    #[test]
    fn partial_documents_deserialize_with_defaults() {
        let mass: MassAppointment =
            serde_json::from_value(json!({"priestId": "p1", "priestConfirmationStatus": "pending"}))
                .unwrap();
        assert_eq!(mass.priest_id.as_deref(), Some("p1"));
        assert_eq!(
            mass.priest_confirmation_status,
            Some(PriestConfirmationStatus::Pending)
        );
        assert_eq!(mass.status, None);
    }
}
