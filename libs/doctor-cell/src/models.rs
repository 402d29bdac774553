use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use shared_utils::rules::{parse_iso_date, parse_time_of_day};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayName {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayName {
    /// Display order of the weekly grid.
    pub const WEEK: [DayName; 7] = [
        DayName::Monday,
        DayName::Tuesday,
        DayName::Wednesday,
        DayName::Thursday,
        DayName::Friday,
        DayName::Saturday,
        DayName::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayName::Monday => "Monday",
            DayName::Tuesday => "Tuesday",
            DayName::Wednesday => "Wednesday",
            DayName::Thursday => "Thursday",
            DayName::Friday => "Friday",
            DayName::Saturday => "Saturday",
            DayName::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DayName::WEEK
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown day name: {}", s))
    }
}

/// Unknown wire values land in `Unrecognized` verbatim and serialize back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    #[default]
    Active,
    Inactive,
    Busy,
    #[serde(untagged)]
    Unrecognized(String),
}

impl SlotStatus {
    pub fn is_recognized(&self) -> bool {
        !matches!(self, SlotStatus::Unrecognized(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExceptionStatus {
    #[default]
    DayOff,
    Leave,
    Holiday,
    #[serde(untagged)]
    Unrecognized(String),
}

impl ExceptionStatus {
    pub fn is_recognized(&self) -> bool {
        !matches!(self, ExceptionStatus::Unrecognized(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExceptionStatus::DayOff => "Day Off",
            ExceptionStatus::Leave => "Leave",
            ExceptionStatus::Holiday => "Holiday",
            ExceptionStatus::Unrecognized(_) => "Unavailable",
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_capacity() -> i32 {
    1
}

/// Date-specific override of a slot's recurring availability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exception {
    #[serde(default)]
    pub expected_date_of_exception: String,
    #[serde(default)]
    pub status: ExceptionStatus,
}

impl Exception {
    pub fn new(date: impl Into<String>, status: ExceptionStatus) -> Self {
        Self {
            expected_date_of_exception: date.into(),
            status,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.expected_date_of_exception)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default = "default_capacity")]
    pub max_patients_in_the_slot: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub status: SlotStatus,
    #[serde(default = "default_true")]
    pub recurring: bool,
    #[serde(default)]
    pub exceptions: Vec<Exception>,
}

impl Default for TimeSlot {
    /// A weekday-hours slot: 09:00 to 17:00, one patient, active and recurring.
    fn default() -> Self {
        Self {
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            max_patients_in_the_slot: 1,
            is_active: true,
            status: SlotStatus::Active,
            recurring: true,
            exceptions: Vec::new(),
        }
    }
}

impl TimeSlot {
    pub fn start(&self) -> Option<NaiveTime> {
        parse_time_of_day(&self.start_time)
    }

    pub fn end(&self) -> Option<NaiveTime> {
        parse_time_of_day(&self.end_time)
    }

    pub fn has_exceptions(&self) -> bool {
        !self.exceptions.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    #[serde(default)]
    pub day_name: String,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

impl DaySchedule {
    pub fn new(day: DayName, slots: Vec<TimeSlot>) -> Self {
        Self {
            day_name: day.as_str().to_string(),
            slots,
        }
    }

    pub fn day(&self) -> Option<DayName> {
        self.day_name.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(rename = "addressline1", default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    #[serde(default)]
    pub address_line3: String,
    #[serde(default = "default_true")]
    pub is_primary_location: bool,
}

impl Location {
    pub fn blank(is_primary_location: bool) -> Self {
        Self {
            address_line1: String::new(),
            address_line2: String::new(),
            address_line3: String::new(),
            is_primary_location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalAffiliation {
    #[serde(default)]
    pub hospital_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default)]
    pub when_joined: String,
    #[serde(default)]
    pub when_left: Option<String>,
    #[serde(default = "default_true")]
    pub is_joined: bool,
}

impl Default for HospitalAffiliation {
    fn default() -> Self {
        Self {
            hospital_id: String::new(),
            status: String::new(),
            when_joined: String::new(),
            when_left: None,
            is_joined: true,
        }
    }
}

/// Doctor signup payload as sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRegistration {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub specialization: String,
    pub license_number: String,
    pub years_of_experience: i32,
    pub consultation_fee: f64,
    pub average_consultation_time: i32,
    #[serde(default)]
    pub locations_of_doctor: Vec<Location>,
    #[serde(default)]
    pub time_slots: Vec<DaySchedule>,
    #[serde(default)]
    pub hospital_joined: Vec<HospitalAffiliation>,
    /// Base64 data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_image: Option<String>,
}

/// Signed-in doctor as returned by the backend and kept in the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DoctorProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub license_number: String,
    pub years_of_experience: i32,
    pub consultation_fee: f64,
    pub average_consultation_time: i32,
    pub locations_of_doctor: Vec<Location>,
    pub time_slots: Vec<DaySchedule>,
    pub hospital_joined: Vec<HospitalAffiliation>,
    #[serde(rename = "doctorAvatarURL", skip_serializing_if = "Option::is_none")]
    pub doctor_avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DoctorProfile {
    pub fn apply(&mut self, update: &ProfileUpdate) {
        self.name = update.name.clone();
        self.email = update.email.clone();
        self.specialization = update.specialization.clone();
        self.years_of_experience = update.years_of_experience;
        self.consultation_fee = update.consultation_fee;
        self.average_consultation_time = update.average_consultation_time;
        self.license_number = update.license_number.clone();
    }
}

/// Dashboard profile form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub years_of_experience: i32,
    pub consultation_fee: f64,
    pub average_consultation_time: i32,
    pub license_number: String,
}

impl From<&DoctorProfile> for ProfileUpdate {
    fn from(profile: &DoctorProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            specialization: profile.specialization.clone(),
            years_of_experience: profile.years_of_experience,
            consultation_fee: profile.consultation_fee,
            average_consultation_time: profile.average_consultation_time,
            license_number: profile.license_number.clone(),
        }
    }
}
