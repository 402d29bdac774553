use thiserror::Error;

use auth_cell::SessionError;
use shared_backend::BackendError;
use shared_models::error::AppError;
use shared_models::validation::FieldErrors;
use shared_utils::image::ImageError;

use crate::services::editor::{DayId, ExceptionId, SlotId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Unknown day entry: {0}")]
    UnknownDay(DayId),

    #[error("Unknown time slot: {0}")]
    UnknownSlot(SlotId),

    #[error("Unknown exception: {0}")]
    UnknownException(ExceptionId),

    #[error("Unknown location at position {0}")]
    UnknownLocation(usize),

    #[error("Unknown hospital affiliation at position {0}")]
    UnknownHospital(usize),

    #[error("At least one day must remain in the schedule")]
    LastDay,

    #[error("At least one time slot must remain for the day")]
    LastSlot,

    #[error("At least one practice location must remain")]
    LastLocation,
}

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{message}")]
    Backend {
        message: String,
        #[source]
        source: BackendError,
    },

    #[error("Doctor session is missing {0}")]
    MissingCredential(&'static str),

    #[error("Invalid image: {0}")]
    Image(#[from] ImageError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl DoctorError {
    pub(crate) fn backend(source: BackendError, fallback: &str) -> Self {
        DoctorError::Backend {
            message: source.banner(fallback),
            source,
        }
    }
}

impl From<FieldErrors> for DoctorError {
    fn from(errors: FieldErrors) -> Self {
        DoctorError::Validation(errors)
    }
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::Validation(fields) => AppError::InvalidFields(fields),
            DoctorError::Backend { message, source } => source.into_app_error(message),
            DoctorError::MissingCredential(what) => {
                AppError::Auth(format!("Session is missing {}, please sign in again", what))
            }
            DoctorError::Image(e) => AppError::BadRequest(e.to_string()),
            DoctorError::Editor(e) => AppError::BadRequest(e.to_string()),
            DoctorError::Session(e) => e.into(),
        }
    }
}
