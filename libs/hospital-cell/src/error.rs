use thiserror::Error;

use auth_cell::SessionError;
use shared_backend::BackendError;
use shared_models::error::AppError;
use shared_models::validation::FieldErrors;

#[derive(Error, Debug)]
pub enum HospitalError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{message}")]
    Backend {
        message: String,
        #[source]
        source: BackendError,
    },

    #[error("Hospital session is missing {0}")]
    MissingCredential(&'static str),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl HospitalError {
    pub(crate) fn backend(source: BackendError, fallback: &str) -> Self {
        HospitalError::Backend {
            message: source.banner(fallback),
            source,
        }
    }
}

impl From<FieldErrors> for HospitalError {
    fn from(errors: FieldErrors) -> Self {
        HospitalError::Validation(errors)
    }
}

impl From<HospitalError> for AppError {
    fn from(err: HospitalError) -> Self {
        match err {
            HospitalError::Validation(fields) => AppError::InvalidFields(fields),
            HospitalError::Backend { message, source } => source.into_app_error(message),
            HospitalError::MissingCredential(what) => {
                AppError::Auth(format!("Session is missing {}, please sign in again", what))
            }
            HospitalError::Session(e) => e.into(),
        }
    }
}
