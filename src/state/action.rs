use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::booking_state::Page;
use crate::catalog::{City, Currency, OptionId};

/// Everything a front-end can ask the booking flow to do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserAction {
    #[serde(rename_all = "camelCase")]
    SubmitRegistration {
        full_name: String,
        email: String,
        phone: String,
        pin: String,
    },
    SelectCity {
        city: City,
    },
    /// Toggle by category and price, as rendered option lists address them
    ToggleSelection {
        category: String,
        price: Value,
    },
    ToggleOption {
        id: OptionId,
    },
    SetCurrency {
        currency: Currency,
    },
    Navigate {
        page: Page,
    },
    ConfirmBooking,
    Reset,
}

impl UserAction {
    /// Short name used for logging and last-action tracking
    pub fn name(&self) -> &'static str {
        match self {
            UserAction::SubmitRegistration { .. } => "submit-registration",
            UserAction::SelectCity { .. } => "select-city",
            UserAction::ToggleSelection { .. } => "toggle-selection",
            UserAction::ToggleOption { .. } => "toggle-option",
            UserAction::SetCurrency { .. } => "set-currency",
            UserAction::Navigate { .. } => "navigate",
            UserAction::ConfirmBooking => "confirm-booking",
            UserAction::Reset => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_actions_deserialize_from_tagged_json() {
        let action: UserAction = serde_json::from_value(json!({
            "type": "toggle_selection",
            "category": "food",
            "price": "2999"
        }))
        .unwrap();
        assert_eq!(
            action,
            UserAction::ToggleSelection {
                category: "food".to_string(),
                price: json!("2999"),
            }
        );

        let action: UserAction = serde_json::from_value(json!({
            "type": "submit_registration",
            "fullName": "Asha Rao",
            "email": "asha@example.com",
            "phone": "9876543210",
            "pin": "560001"
        }))
        .unwrap();
        assert_eq!(action.name(), "submit-registration");

        let action: UserAction =
            serde_json::from_value(json!({ "type": "navigate", "page": "page-2" })).unwrap();
        assert_eq!(action, UserAction::Navigate { page: Page::Destinations });

        let action: UserAction = serde_json::from_value(json!({ "type": "reset" })).unwrap();
        assert_eq!(action, UserAction::Reset);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        assert!(serde_json::from_value::<UserAction>(json!({ "type": "pay_now" })).is_err());
    }
}
