//! Submission checks for the doctor signup and profile forms.
//!
//! Every rule runs; nothing short-circuits. Failures are collected under the
//! dotted path of the offending field, e.g. `timeSlots.0.slots.1.startTime`.

use tracing::{debug, instrument};

use shared_models::FieldErrors;
use shared_utils::rules::{
    is_blank, is_valid_email, parse_iso_date, parse_time_of_day, password_issues, username_issues,
};

use crate::models::{
    DayName, DaySchedule, DoctorRegistration, Exception, HospitalAffiliation, Location,
    ProfileUpdate, TimeSlot,
};

#[instrument(skip_all, fields(username = %registration.username))]
pub fn validate_registration(registration: &DoctorRegistration) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    for issue in username_issues(&registration.username) {
        errors.add("username", issue);
    }
    errors.check(is_blank(&registration.name), "name", "Full name is required");
    errors.check(
        !is_valid_email(&registration.email),
        "email",
        "Invalid email address",
    );
    for issue in password_issues(&registration.password) {
        errors.add("password", issue);
    }
    errors.check(
        is_blank(&registration.specialization),
        "specialization",
        "Specialization is required",
    );
    errors.check(
        is_blank(&registration.license_number),
        "licenseNumber",
        "License number is required",
    );
    errors.check(
        registration.years_of_experience < 0,
        "yearsOfExperience",
        "Years of experience must be a positive number",
    );
    errors.check(
        registration.consultation_fee.is_nan() || registration.consultation_fee < 0.0,
        "consultationFee",
        "Consultation fee must be a positive number",
    );
    errors.check(
        registration.average_consultation_time < 1,
        "averageConsultationTime",
        "Average consultation time must be at least 1 minute",
    );

    check_locations(&registration.locations_of_doctor, &mut errors);
    check_time_slots(&registration.time_slots, &mut errors);
    check_hospitals(&registration.hospital_joined, &mut errors);

    if !errors.is_empty() {
        debug!("Registration rejected with {} invalid field(s)", errors.len());
    }
    errors.into_result()
}

/// Schedule rules only, for validating an availability edit on its own.
#[instrument(skip_all, fields(days = days.len()))]
pub fn validate_time_slots(days: &[DaySchedule]) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_time_slots(days, &mut errors);
    errors.into_result()
}

#[instrument(skip_all)]
pub fn validate_profile_update(update: &ProfileUpdate) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    errors.check(
        update.name.trim().chars().count() < 2,
        "name",
        "Name must be at least 2 characters.",
    );
    errors.check(
        !is_valid_email(&update.email),
        "email",
        "Please enter a valid email address.",
    );
    errors.check(
        update.specialization.trim().chars().count() < 2,
        "specialization",
        "Please enter your specialization.",
    );
    errors.check(
        update.years_of_experience < 0,
        "yearsOfExperience",
        "Please enter valid years of experience.",
    );
    errors.check(
        update.consultation_fee.is_nan() || update.consultation_fee < 0.0,
        "consultationFee",
        "Please enter a valid consultation fee.",
    );
    errors.check(
        update.average_consultation_time < 0,
        "averageConsultationTime",
        "Please enter a valid consultation time.",
    );
    errors.check(
        is_blank(&update.license_number),
        "licenseNumber",
        "License number is required.",
    );

    errors.into_result()
}

fn check_locations(locations: &[Location], errors: &mut FieldErrors) {
    errors.check(
        locations.is_empty(),
        "locationsOfDoctor",
        "At least one location is required",
    );

    for (i, location) in locations.iter().enumerate() {
        let base = format!("locationsOfDoctor.{}", i);
        errors.check(
            is_blank(&location.address_line1),
            format!("{}.addressline1", base),
            "Address line 1 is required",
        );
        errors.check(
            is_blank(&location.address_line2),
            format!("{}.addressLine2", base),
            "Address line 2 is required",
        );
        errors.check(
            is_blank(&location.address_line3),
            format!("{}.addressLine3", base),
            "Address line 3 is required",
        );
    }
}

fn check_time_slots(days: &[DaySchedule], errors: &mut FieldErrors) {
    errors.check(
        days.is_empty(),
        "timeSlots",
        "At least one day with time slots is required",
    );

    for (i, day) in days.iter().enumerate() {
        let base = format!("timeSlots.{}", i);

        if is_blank(&day.day_name) {
            errors.add(format!("{}.dayName", base), "Day name is required");
        } else if day.day_name.parse::<DayName>().is_err() {
            errors.add(
                format!("{}.dayName", base),
                "Day name must be a weekday (Monday to Sunday)",
            );
        }

        errors.check(
            day.slots.is_empty(),
            format!("{}.slots", base),
            "At least one time slot is required",
        );

        for (j, slot) in day.slots.iter().enumerate() {
            check_slot(slot, &format!("{}.slots.{}", base, j), errors);
        }
    }
}

fn check_slot(slot: &TimeSlot, base: &str, errors: &mut FieldErrors) {
    check_time(&slot.start_time, &format!("{}.startTime", base), "Start time", errors);
    check_time(&slot.end_time, &format!("{}.endTime", base), "End time", errors);

    errors.check(
        slot.max_patients_in_the_slot < 1,
        format!("{}.maxPatientsInTheSlot", base),
        "Maximum patients must be at least 1",
    );
    errors.check(
        !slot.status.is_recognized(),
        format!("{}.status", base),
        "Status must be one of ACTIVE, INACTIVE or BUSY",
    );

    for (k, exception) in slot.exceptions.iter().enumerate() {
        check_exception(exception, &format!("{}.exceptions.{}", base, k), errors);
    }
}

fn check_time(value: &str, path: &str, label: &str, errors: &mut FieldErrors) {
    if is_blank(value) {
        errors.add(path, format!("{} is required", label));
    } else if parse_time_of_day(value).is_none() {
        errors.add(path, format!("{} must be in HH:MM format", label));
    }
}

fn check_exception(exception: &Exception, base: &str, errors: &mut FieldErrors) {
    let path = format!("{}.expectedDateOfException", base);
    if is_blank(&exception.expected_date_of_exception) {
        errors.add(path, "Exception date is required");
    } else if parse_iso_date(&exception.expected_date_of_exception).is_none() {
        errors.add(path, "Exception date must be a valid date (YYYY-MM-DD)");
    }

    errors.check(
        !exception.status.is_recognized(),
        format!("{}.status", base),
        "Status must be one of DAY_OFF, LEAVE or HOLIDAY",
    );
}

fn check_hospitals(hospitals: &[HospitalAffiliation], errors: &mut FieldErrors) {
    for (i, hospital) in hospitals.iter().enumerate() {
        errors.check(
            is_blank(&hospital.hospital_id),
            format!("hospitalJoined.{}.hospitalId", i),
            "Hospital ID is required",
        );
        errors.check(
            is_blank(&hospital.when_joined),
            format!("hospitalJoined.{}.whenJoined", i),
            "Joining date is required",
        );
    }
}
