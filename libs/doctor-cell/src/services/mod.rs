pub mod doctor;
pub mod draft;
pub mod editor;
pub mod formatter;
pub mod validation;

pub use doctor::DoctorService;
pub use draft::{HospitalField, LocationField, RegistrationDraft};
pub use editor::{DayId, ExceptionField, ExceptionId, ScheduleEditor, SlotField, SlotId};
pub use formatter::{format_time_display, DayView, ExceptionView, SlotView, WeeklyScheduleView};
pub use validation::{validate_profile_update, validate_registration, validate_time_slots};
