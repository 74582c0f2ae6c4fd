//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{
    action::UserAction,
    booking_state::{BookingState, Page},
    persistence,
    registration::Registration,
};
use crate::{catalog::Catalog, error::BookingError, storage::KeyValueStore};

/// Owns the booking state and everything needed to mutate it: the catalog,
/// durable storage and the change notification channel
pub struct AppState {
    /// Current booking state
    booking: Mutex<BookingState>,
    /// Submitted registration, if any
    registration: Mutex<Option<Registration>>,
    pub catalog: Catalog,
    storage: Arc<dyn KeyValueStore>,
    /// Server metadata
    pub start_time: Instant,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for state change notifications
    state_change_tx: broadcast::Sender<BookingState>,
}

impl AppState {
    /// Create an AppState with a fresh booking
    pub fn new(catalog: Catalog, storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_state(catalog, storage, BookingState::new(), None)
    }

    /// Create an AppState from whatever the storage holds
    pub fn load(catalog: Catalog, storage: Arc<dyn KeyValueStore>) -> Self {
        let registration = persistence::restore_registration(storage.as_ref());
        let registered = registration.is_some();
        let booking = match persistence::restore(storage.as_ref(), &catalog, registered) {
            Some(booking) => {
                info!(
                    "Restored saved booking: page={}, city={:?}, total={}",
                    booking.current_page, booking.selected_city, booking.total_price
                );
                booking
            }
            None => {
                info!("No saved booking, starting fresh");
                BookingState::new()
            }
        };
        Self::with_state(catalog, storage, booking, registration)
    }

    fn with_state(
        catalog: Catalog,
        storage: Arc<dyn KeyValueStore>,
        booking: BookingState,
        registration: Option<Registration>,
    ) -> Self {
        let (state_change_tx, _) = broadcast::channel(100);

        Self {
            booking: Mutex::new(booking),
            registration: Mutex::new(registration),
            catalog,
            storage,
            start_time: Instant::now(),
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            state_change_tx,
        }
    }

    /// Apply one user action and return the resulting state
    pub fn handle_user_action(&self, action: UserAction) -> Result<BookingState, BookingError> {
        let name = action.name();
        debug!("Handling action {}: {:?}", name, action);

        let registered = self.is_registered()?;
        match action {
            UserAction::SubmitRegistration {
                full_name,
                email,
                phone,
                pin,
            } => {
                let registration = Registration::new(&full_name, &email, &phone, &pin)?;
                let state = self.update_state(name, true, |state| {
                    state.navigate(Page::Destinations, true)?;
                    Ok(true)
                })?;
                if let Err(e) =
                    persistence::persist_registration(self.storage.as_ref(), &registration)
                {
                    warn!("Failed to save registration: {}", e);
                }
                *self.lock_registration()? = Some(registration);
                Ok(state)
            }
            UserAction::SelectCity { city } => {
                info!("Selecting destination {}", city);
                self.update_state(name, registered, |state| {
                    state.set_city(&self.catalog, city);
                    state.navigate(Page::Planner, registered)?;
                    Ok(true)
                })
            }
            UserAction::ToggleSelection { category, price } => {
                self.update_state(name, registered, |state| {
                    Ok(state.toggle_selection(&self.catalog, &category, &price))
                })
            }
            UserAction::ToggleOption { id } => self.update_state(name, registered, |state| {
                Ok(state.toggle_option(&self.catalog, &id))
            }),
            UserAction::SetCurrency { currency } => {
                self.update_state(name, registered, |state| Ok(state.set_currency(currency)))
            }
            UserAction::Navigate { page } => self.update_state(name, registered, |state| {
                state.navigate(page, registered)?;
                Ok(true)
            }),
            UserAction::ConfirmBooking => self.update_state(name, registered, |state| {
                state.navigate(Page::Confirmation, registered)?;
                info!("Booking confirmed, total={}", state.total_price);
                Ok(true)
            }),
            UserAction::Reset => self.reset(),
        }
    }

    /// Run `updater` against the booking state. When it reports a change the
    /// total is recomputed, the page is moved back if its prerequisites no
    /// longer hold, subscribers are notified and the snapshot is saved, in
    /// that order, before the lock is released.
    fn update_state<F>(
        &self,
        action: &str,
        registered: bool,
        updater: F,
    ) -> Result<BookingState, BookingError>
    where
        F: FnOnce(&mut BookingState) -> Result<bool, BookingError>,
    {
        let mut state = self.lock_booking()?;

        // Refused actions leave the state untouched
        let mut draft = state.clone();
        if !updater(&mut draft)? {
            debug!("Action {} changed nothing", action);
            return Ok(draft);
        }
        draft.recompute_total();
        draft.settle_page(registered);
        *state = draft;
        let new_state = state.clone();

        self.record_action(action);

        if let Err(e) = self.state_change_tx.send(new_state.clone()) {
            debug!("No state change subscribers: {}", e);
        }

        // Blocking write while the lock is held, so snapshots land in
        // mutation order. Snapshots are a few hundred bytes.
        if let Err(e) = persistence::persist(self.storage.as_ref(), &new_state) {
            warn!("Failed to save booking state: {}", e);
        }

        Ok(new_state)
    }

    /// Back to a fresh booking with both snapshots erased
    pub fn reset(&self) -> Result<BookingState, BookingError> {
        let mut state = self.lock_booking()?;
        *state = BookingState::new();
        *self.lock_registration()? = None;
        let new_state = state.clone();

        info!("Booking reset");
        self.record_action("reset");

        if let Err(e) = self.state_change_tx.send(new_state.clone()) {
            debug!("No state change subscribers: {}", e);
        }

        if let Err(e) = persistence::clear(self.storage.as_ref()) {
            warn!("Failed to clear saved state: {}", e);
        }

        Ok(new_state)
    }

    /// Get current booking state
    pub fn get_booking_state(&self) -> Result<BookingState, BookingError> {
        self.lock_booking().map(|state| state.clone())
    }

    /// Get the submitted registration
    pub fn get_registration(&self) -> Result<Option<Registration>, BookingError> {
        self.lock_registration().map(|reg| reg.clone())
    }

    pub fn is_registered(&self) -> Result<bool, BookingError> {
        self.lock_registration().map(|reg| reg.is_some())
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> broadcast::Receiver<BookingState> {
        self.state_change_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn lock_booking(&self) -> Result<std::sync::MutexGuard<'_, BookingState>, BookingError> {
        self.booking
            .lock()
            .map_err(|e| BookingError::StateLock(e.to_string()))
    }

    fn lock_registration(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, Option<Registration>>, BookingError> {
        self.registration
            .lock()
            .map_err(|e| BookingError::StateLock(e.to_string()))
    }
}
