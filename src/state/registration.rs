//! Registration form snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// Traveller details submitted on the first page. Field formats are checked
/// by the front-end before submission; only presence is enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub pin: String,
    pub timestamp: DateTime<Utc>,
}

impl Registration {
    pub fn new(full_name: &str, email: &str, phone: &str, pin: &str) -> Result<Self, BookingError> {
        let fields = [
            ("fullName", full_name),
            ("email", email),
            ("phone", phone),
            ("pin", pin),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(BookingError::IncompleteRegistration(*name));
        }

        Ok(Self {
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
            pin: pin.trim().to_string(),
            timestamp: Utc::now(),
        })
    }
}
