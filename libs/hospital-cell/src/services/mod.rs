pub mod hospital;
pub mod validation;

pub use hospital::HospitalService;
pub use validation::{validate_hospital_registration, validate_hospital_update};
