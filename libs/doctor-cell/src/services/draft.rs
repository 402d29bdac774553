use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::models::{DoctorRegistration, HospitalAffiliation, Location};
use crate::services::editor::ScheduleEditor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum LocationField {
    #[serde(rename = "addressline1")]
    AddressLine1(String),
    AddressLine2(String),
    AddressLine3(String),
    IsPrimaryLocation(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum HospitalField {
    HospitalId(String),
    Status(String),
    WhenJoined(String),
    WhenLeft(Option<String>),
    IsJoined(bool),
}

/// In-progress doctor signup form.
///
/// Starts with one blank primary location and an empty schedule. Nothing is
/// checked here; run the result of [`RegistrationDraft::into_registration`]
/// through the registration validator before submitting.
#[derive(Debug, Clone)]
pub struct RegistrationDraft {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub specialization: String,
    pub license_number: String,
    pub years_of_experience: i32,
    pub consultation_fee: f64,
    pub average_consultation_time: i32,
    pub doctor_image: Option<String>,
    pub schedule: ScheduleEditor,
    locations: Vec<Location>,
    hospitals: Vec<HospitalAffiliation>,
}

impl Default for RegistrationDraft {
    fn default() -> Self {
        Self {
            username: String::new(),
            name: String::new(),
            email: String::new(),
            password: String::new(),
            specialization: String::new(),
            license_number: String::new(),
            years_of_experience: 0,
            consultation_fee: 0.0,
            average_consultation_time: 0,
            doctor_image: None,
            schedule: ScheduleEditor::new(),
            locations: vec![Location::blank(true)],
            hospitals: Vec::new(),
        }
    }
}

impl RegistrationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn hospitals(&self) -> &[HospitalAffiliation] {
        &self.hospitals
    }

    /// Additional locations start as non-primary.
    pub fn add_location(&mut self) -> usize {
        let is_primary = self.locations.is_empty();
        self.locations.push(Location::blank(is_primary));
        self.locations.len() - 1
    }

    pub fn remove_location(&mut self, index: usize) -> Result<Location, EditorError> {
        if index >= self.locations.len() {
            return Err(EditorError::UnknownLocation(index));
        }
        if self.locations.len() <= 1 {
            return Err(EditorError::LastLocation);
        }
        Ok(self.locations.remove(index))
    }

    pub fn update_location(&mut self, index: usize, field: LocationField) -> Result<(), EditorError> {
        let location = self
            .locations
            .get_mut(index)
            .ok_or(EditorError::UnknownLocation(index))?;
        match field {
            LocationField::AddressLine1(value) => location.address_line1 = value,
            LocationField::AddressLine2(value) => location.address_line2 = value,
            LocationField::AddressLine3(value) => location.address_line3 = value,
            LocationField::IsPrimaryLocation(value) => location.is_primary_location = value,
        }
        Ok(())
    }

    pub fn add_hospital(&mut self) -> usize {
        self.hospitals.push(HospitalAffiliation::default());
        self.hospitals.len() - 1
    }

    pub fn remove_hospital(&mut self, index: usize) -> Result<HospitalAffiliation, EditorError> {
        if index >= self.hospitals.len() {
            return Err(EditorError::UnknownHospital(index));
        }
        Ok(self.hospitals.remove(index))
    }

    pub fn update_hospital(&mut self, index: usize, field: HospitalField) -> Result<(), EditorError> {
        let hospital = self
            .hospitals
            .get_mut(index)
            .ok_or(EditorError::UnknownHospital(index))?;
        match field {
            HospitalField::HospitalId(value) => hospital.hospital_id = value,
            HospitalField::Status(value) => hospital.status = value,
            HospitalField::WhenJoined(value) => hospital.when_joined = value,
            HospitalField::WhenLeft(value) => hospital.when_left = value,
            HospitalField::IsJoined(value) => hospital.is_joined = value,
        }
        Ok(())
    }

    pub fn into_registration(self) -> DoctorRegistration {
        DoctorRegistration {
            username: self.username,
            name: self.name,
            email: self.email,
            password: self.password,
            specialization: self.specialization,
            license_number: self.license_number,
            years_of_experience: self.years_of_experience,
            consultation_fee: self.consultation_fee,
            average_consultation_time: self.average_consultation_time,
            locations_of_doctor: self.locations,
            time_slots: self.schedule.to_days(),
            hospital_joined: self.hospitals,
            doctor_image: self.doctor_image,
        }
    }
}
