//! State management module
//! 
//! This module contains the booking state, its transitions and the controller
//! that owns it.

pub mod action;
pub mod app_state;
pub mod booking_state;
pub mod persistence;
pub mod registration;
pub mod selection;

// Re-export main types
pub use action::UserAction;
pub use app_state::AppState;
pub use booking_state::{BookingState, Page};
pub use registration::Registration;
pub use selection::{compute_total, SelectedOption, SelectionState};
