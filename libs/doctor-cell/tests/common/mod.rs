#![allow(dead_code)]

use doctor_cell::models::*;

pub fn weekday_slot(start: &str, end: &str) -> TimeSlot {
    TimeSlot {
        start_time: start.to_string(),
        end_time: end.to_string(),
        max_patients_in_the_slot: 4,
        ..TimeSlot::default()
    }
}

pub fn valid_registration() -> DoctorRegistration {
    DoctorRegistration {
        username: "asharao".to_string(),
        name: "Dr. Asha Rao".to_string(),
        email: "asha@caresetu.in".to_string(),
        password: "Str0ng!pass".to_string(),
        specialization: "Cardiology".to_string(),
        license_number: "KMC-44821".to_string(),
        years_of_experience: 12,
        consultation_fee: 800.0,
        average_consultation_time: 20,
        locations_of_doctor: vec![Location {
            address_line1: "12 MG Road".to_string(),
            address_line2: "Indiranagar".to_string(),
            address_line3: "Bengaluru".to_string(),
            is_primary_location: true,
        }],
        time_slots: vec![DaySchedule::new(
            DayName::Monday,
            vec![weekday_slot("09:00", "13:00")],
        )],
        hospital_joined: vec![],
        doctor_image: None,
    }
}
