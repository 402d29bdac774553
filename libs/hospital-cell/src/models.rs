use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HospitalAddress {
    pub address_line1: String,
    pub address_line2: String,
    pub address_line3: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorLink {
    pub doctor_id: String,
    #[serde(default)]
    pub when_joined: String,
    #[serde(default)]
    pub when_left: Option<String>,
    #[serde(default = "default_true")]
    pub is_joined: bool,
}

/// Doctors attached to a hospital arrive either as bare ids or as
/// membership records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DoctorReference {
    Id(String),
    Link(DoctorLink),
}

impl DoctorReference {
    pub fn doctor_id(&self) -> &str {
        match self {
            DoctorReference::Id(id) => id,
            DoctorReference::Link(link) => &link.doctor_id,
        }
    }
}

/// Hospital signup payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalRegistration {
    pub name: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub hospital_address: HospitalAddress,
    pub contact_number_of_hospital: String,
    pub email_of_hospital: String,
    pub license_number_of_hospital: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_of_hospital: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Base64 data URLs.
    #[serde(default)]
    pub hospital_images: Vec<String>,
    #[serde(default)]
    pub facilities_in_hospital: Vec<Facility>,
    #[serde(rename = "doctorUnderHospitalID", default)]
    pub doctor_under_hospital_id: Vec<DoctorReference>,
    #[serde(default)]
    pub admins_in_the_hospital: Vec<Value>,
}

/// Signed-in hospital as kept in the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HospitalProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub username: String,
    pub email_of_hospital: String,
    pub contact_number_of_hospital: String,
    pub license_number_of_hospital: String,
    pub hospital_address: HospitalAddress,
    pub facilities_in_hospital: Vec<Facility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_of_hospital: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    pub hospital_images: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HospitalProfile {
    pub fn apply(&mut self, update: &HospitalUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(address) = &update.hospital_address {
            self.hospital_address = address.clone();
        }
        if let Some(contact) = &update.contact_number_of_hospital {
            self.contact_number_of_hospital = contact.clone();
        }
        if let Some(email) = &update.email_of_hospital {
            self.email_of_hospital = email.clone();
        }
        if let Some(license) = &update.license_number_of_hospital {
            self.license_number_of_hospital = license.clone();
        }
        if update.rating_of_hospital.is_some() {
            self.rating_of_hospital = update.rating_of_hospital;
        }
        if update.is_active.is_some() {
            self.is_active = update.is_active;
        }
        if let Some(images) = &update.hospital_images {
            self.hospital_images = images.clone();
        }
        if let Some(facilities) = &update.facilities_in_hospital {
            self.facilities_in_hospital = facilities.clone();
        }
    }
}

/// Partial hospital edit; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HospitalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_address: Option<HospitalAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number_of_hospital: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_of_hospital: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number_of_hospital: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_of_hospital: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facilities_in_hospital: Option<Vec<Facility>>,
}

/// Outcome of a hospital login: the snapshot plus the bearer token the
/// backend handed out.
#[derive(Debug, Clone)]
pub struct HospitalLogin {
    pub message: String,
    pub token: Option<String>,
    pub profile: HospitalProfile,
}
