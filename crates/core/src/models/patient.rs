//! Patient record.

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::types::PatientId;
use crate::validation::{FieldRule, Violation, validate};

use super::text;

/// Field rules for a patient, in declaration order.
pub static PATIENT_RULES: [FieldRule; 6] = [
    FieldRule::required("lastName", "last name", 2, 32),
    FieldRule::required("firstName", "first name", 2, 32),
    FieldRule::required("dateOfBirth", "date of birth", 8, 16),
    FieldRule::required("gender", "gender", 1, 32),
    FieldRule::optional("homeAddress", "home address", 0, 128),
    FieldRule::optional("phoneNumber", "phone number", 8, 16),
];

/// A patient of the clinic.
///
/// `date_of_birth` is stored as given; it is never parsed as a date.
/// Missing or `null` required fields deserialize to empty strings, and
/// scalar values to their text, so that they surface as validation
/// violations rather than decode errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Patient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<PatientId>,
    #[serde(deserialize_with = "text::required")]
    pub last_name: String,
    #[serde(deserialize_with = "text::required")]
    pub first_name: String,
    #[serde(deserialize_with = "text::required")]
    pub date_of_birth: String,
    #[serde(deserialize_with = "text::required")]
    pub gender: String,
    #[serde(deserialize_with = "text::optional")]
    pub home_address: Option<String>,
    #[serde(deserialize_with = "text::optional")]
    pub phone_number: Option<String>,
}

impl Record for Patient {
    type Id = PatientId;

    const KIND: &'static str = "patient";
    const LABEL: &'static str = "Patient";

    fn id(&self) -> Option<PatientId> {
        self.uuid
    }

    fn assign_id(&mut self, id: PatientId) {
        self.uuid = Some(id);
    }

    fn clear_id(&mut self) {
        self.uuid = None;
    }

    fn new_id() -> PatientId {
        PatientId::generate()
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }

    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn violations(&self) -> Vec<Violation> {
        let [last, first, dob, gender, address, phone] = &PATIENT_RULES;
        validate([
            (last, Some(self.last_name.as_str())),
            (first, Some(self.first_name.as_str())),
            (dob, Some(self.date_of_birth.as_str())),
            (gender, Some(self.gender.as_str())),
            (address, self.home_address.as_deref()),
            (phone, self.phone_number.as_deref()),
        ])
    }

    fn overwrite_with(&mut self, other: Self) {
        self.last_name = other.last_name;
        self.first_name = other.first_name;
        self.date_of_birth = other.date_of_birth;
        self.gender = other.gender;
        self.home_address = other.home_address;
        self.phone_number = other.phone_number;
    }
}
