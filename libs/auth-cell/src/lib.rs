pub mod handlers;
pub mod middleware;
pub mod router;
pub mod session;
pub mod storage;
pub mod validation;

pub use session::{SessionError, SessionKeys, SessionStore, DOCTOR_SESSION, HOSPITAL_SESSION};
pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageError};
