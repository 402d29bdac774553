use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub backend_api_url: String,
    pub session_store_path: PathBuf,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            backend_api_url: "http://localhost:8000".to_string(),
            session_store_path: std::env::temp_dir()
                .join(format!("caresetu-test-{}.json", Uuid::new_v4())),
        }
    }
}

impl TestConfig {
    pub fn with_backend(uri: &str) -> Self {
        Self {
            backend_api_url: uri.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            backend_api_url: self.backend_api_url.clone(),
            session_store_path: self.session_store_path.clone(),
            bind_address: "127.0.0.1:0".to_string(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Canned bodies in the shape the CareSetu backend answers with.
pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn doctor_record(doctor_id: &str, username: &str) -> serde_json::Value {
        json!({
            "_id": doctor_id,
            "username": username,
            "name": "Dr. Asha Rao",
            "email": format!("{}@caresetu.in", username),
            "specialization": "Cardiology",
            "licenseNumber": "KMC-44821",
            "yearsOfExperience": 12,
            "consultationFee": 800,
            "averageConsultationTime": 20,
            "locationsOfDoctor": [{
                "addressline1": "12 MG Road",
                "addressLine2": "Indiranagar",
                "addressLine3": "Bengaluru",
                "isPrimaryLocation": true
            }],
            "timeSlots": [{
                "dayName": "Monday",
                "slots": [{
                    "startTime": "09:00",
                    "endTime": "13:00",
                    "maxPatientsInTheSlot": 6,
                    "isActive": true,
                    "status": "ACTIVE",
                    "recurring": true,
                    "exceptions": []
                }]
            }],
            "hospitalJoined": [],
            "refreshToken": "refresh-token-123",
            "doctorAvatarURL": null
        })
    }

    pub fn doctor_login_response(doctor_id: &str, username: &str) -> serde_json::Value {
        json!({
            "statusCode": 200,
            "message": "Doctor logged in successfully",
            "data": Self::doctor_record(doctor_id, username),
            "success": true
        })
    }

    pub fn hospital_record(hospital_id: &str, username: &str) -> serde_json::Value {
        json!({
            "_id": hospital_id,
            "name": "City Care Hospital",
            "username": username,
            "emailOfHospital": "admin@citycare.in",
            "contactNumberOfHospital": "9876543210",
            "licenseNumberOfHospital": "HOSP-1001",
            "hospitalAddress": {
                "addressLine1": "1 Residency Road",
                "addressLine2": "Shanthala Nagar",
                "addressLine3": "Bengaluru"
            },
            "facilitiesInHospital": [{
                "name": "ICU",
                "description": "24x7 intensive care",
                "cost": 5000,
                "isAvailable": true
            }],
            "ratingOfHospital": 4.5,
            "isActive": true
        })
    }

    pub fn hospital_login_response(hospital_id: &str, username: &str) -> serde_json::Value {
        json!({
            "message": "Hospital logged in successfully",
            "token": "access-token-xyz",
            "data": Self::hospital_record(hospital_id, username)
        })
    }

    pub fn error_response(message: &str) -> serde_json::Value {
        json!({
            "success": false,
            "message": message
        })
    }
}
