//! VoyageFlow - A state-managed HTTP service for multi-step trip booking
//! 
//! This library holds the selection and pricing model of the booking flow:
//! destinations and packages, the running total, currency display, and
//! persistence of the whole booking between sessions.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use api::create_router;
pub use catalog::{convert_for_display, Catalog, Category, City, Currency};
pub use config::Config;
pub use error::{BookingError, StorageError};
pub use state::{AppState, BookingState, UserAction};
pub use utils::signals::shutdown_signal;
