use tracing::instrument;

use shared_models::FieldErrors;
use shared_utils::image::is_data_url;
use shared_utils::rules::{is_blank, is_valid_email, password_issues, username_issues};

use crate::models::{Facility, HospitalAddress, HospitalRegistration, HospitalUpdate};

const CONTACT_MIN: usize = 10;
const CONTACT_MAX: usize = 15;

#[instrument(skip_all, fields(username = %registration.username))]
pub fn validate_hospital_registration(registration: &HospitalRegistration) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    errors.check(is_blank(&registration.name), "name", "Name is required");
    for issue in username_issues(&registration.username) {
        errors.add("username", issue);
    }
    for issue in password_issues(&registration.password) {
        errors.add("password", issue);
    }
    check_address(&registration.hospital_address, &mut errors);
    check_contact(&registration.contact_number_of_hospital, &mut errors);
    errors.check(
        !is_valid_email(&registration.email_of_hospital),
        "emailOfHospital",
        "Invalid email address",
    );
    errors.check(
        is_blank(&registration.license_number_of_hospital),
        "licenseNumberOfHospital",
        "License number is required",
    );
    if let Some(rating) = registration.rating_of_hospital {
        check_rating(rating, &mut errors);
    }
    check_images(&registration.hospital_images, &mut errors);

    errors.check(
        registration.facilities_in_hospital.is_empty(),
        "facilitiesInHospital",
        "At least one facility is required",
    );
    check_facilities(&registration.facilities_in_hospital, &mut errors);

    errors.into_result()
}

/// Same rules as signup, applied only to the fields present.
#[instrument(skip_all)]
pub fn validate_hospital_update(update: &HospitalUpdate) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Some(name) = &update.name {
        errors.check(is_blank(name), "name", "Name is required");
    }
    if let Some(address) = &update.hospital_address {
        check_address(address, &mut errors);
    }
    if let Some(contact) = &update.contact_number_of_hospital {
        check_contact(contact, &mut errors);
    }
    if let Some(email) = &update.email_of_hospital {
        errors.check(!is_valid_email(email), "emailOfHospital", "Invalid email address");
    }
    if let Some(license) = &update.license_number_of_hospital {
        errors.check(
            is_blank(license),
            "licenseNumberOfHospital",
            "License number is required",
        );
    }
    if let Some(rating) = update.rating_of_hospital {
        check_rating(rating, &mut errors);
    }
    if let Some(images) = &update.hospital_images {
        check_images(images, &mut errors);
    }
    if let Some(facilities) = &update.facilities_in_hospital {
        errors.check(
            facilities.is_empty(),
            "facilitiesInHospital",
            "At least one facility is required",
        );
        check_facilities(facilities, &mut errors);
    }

    errors.into_result()
}

fn check_address(address: &HospitalAddress, errors: &mut FieldErrors) {
    errors.check(
        is_blank(&address.address_line1),
        "hospitalAddress.addressLine1",
        "Address line 1 is required",
    );
    errors.check(
        is_blank(&address.address_line2),
        "hospitalAddress.addressLine2",
        "Address line 2 is required",
    );
    errors.check(
        is_blank(&address.address_line3),
        "hospitalAddress.addressLine3",
        "Address line 3 is required",
    );
}

fn check_contact(contact: &str, errors: &mut FieldErrors) {
    let len = contact.chars().count();
    errors.check(
        len < CONTACT_MIN,
        "contactNumberOfHospital",
        "Phone number must be at least 10 digits",
    );
    errors.check(
        len > CONTACT_MAX,
        "contactNumberOfHospital",
        "Phone number must be at most 15 digits",
    );
}

fn check_rating(rating: f64, errors: &mut FieldErrors) {
    errors.check(
        !(0.0..=5.0).contains(&rating),
        "ratingOfHospital",
        "Rating must be between 0 and 5",
    );
}

fn check_images(images: &[String], errors: &mut FieldErrors) {
    for (i, image) in images.iter().enumerate() {
        errors.check(
            !is_data_url(image),
            format!("hospitalImages.{}", i),
            "Image must be a base64 data URL",
        );
    }
}

fn check_facilities(facilities: &[Facility], errors: &mut FieldErrors) {
    for (i, facility) in facilities.iter().enumerate() {
        errors.check(
            is_blank(&facility.name),
            format!("facilitiesInHospital.{}.name", i),
            "Facility name is required",
        );
        errors.check(
            is_blank(&facility.description),
            format!("facilitiesInHospital.{}.description", i),
            "Facility description is required",
        );
        errors.check(
            facility.cost.is_nan() || facility.cost < 0.0,
            format!("facilitiesInHospital.{}.cost", i),
            "Cost must be a positive number",
        );
    }
}
