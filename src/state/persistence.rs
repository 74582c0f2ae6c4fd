//! Saving and restoring snapshots

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    booking_state::{BookingState, Page},
    registration::Registration,
    selection::{parse_price, SelectedOption},
};
use crate::{
    catalog::{Catalog, Category, City, Currency, OptionId},
    error::StorageError,
    storage::{KeyValueStore, REGISTRATION_KEY, STATE_KEY},
};

/// Write the booking snapshot
pub fn persist(store: &dyn KeyValueStore, state: &BookingState) -> Result<(), StorageError> {
    let json = serde_json::to_string(state).map_err(|source| StorageError::Serialize {
        key: STATE_KEY.to_string(),
        source,
    })?;
    store.set(STATE_KEY, &json)
}

/// Read the booking snapshot back, re-linked against the live catalog.
///
/// Missing or unreadable snapshots yield `None`. Selections that no longer
/// match a live option are dropped, the total is recomputed, and the page
/// moves back to the furthest one the restored booking can still reach.
pub fn restore(
    store: &dyn KeyValueStore,
    catalog: &Catalog,
    registered: bool,
) -> Option<BookingState> {
    let raw = match store.get(STATE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Error loading saved state: {}", e);
            return None;
        }
    };

    let stored: StoredState = match serde_json::from_str(&raw) {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Error loading saved state: {}", e);
            return None;
        }
    };

    Some(stored.into_state(catalog, registered))
}

pub fn persist_registration(
    store: &dyn KeyValueStore,
    registration: &Registration,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(registration).map_err(|source| StorageError::Serialize {
        key: REGISTRATION_KEY.to_string(),
        source,
    })?;
    store.set(REGISTRATION_KEY, &json)
}

pub fn restore_registration(store: &dyn KeyValueStore) -> Option<Registration> {
    let raw = match store.get(REGISTRATION_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!("Error loading saved registration: {}", e);
            return None;
        }
    };
    serde_json::from_str(&raw)
        .map_err(|e| warn!("Error loading saved registration: {}", e))
        .ok()
}

/// Erase both snapshots
pub fn clear(store: &dyn KeyValueStore) -> Result<(), StorageError> {
    store.remove(STATE_KEY)?;
    store.remove(REGISTRATION_KEY)
}

/// Lenient view of a stored snapshot. Unknown or missing fields fall back to
/// defaults; only structurally broken JSON is rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredState {
    current_page: Option<String>,
    selected_options: Option<StoredSelections>,
    selected_city: Option<String>,
    current_currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredSelections {
    travel: Option<StoredOption>,
    food: Vec<StoredOption>,
    activities: Vec<StoredOption>,
}

/// Snapshots written before options had ids only carry a price
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredOption {
    id: Option<OptionId>,
    price: Option<Value>,
}

impl StoredState {
    fn into_state(self, catalog: &Catalog, registered: bool) -> BookingState {
        let mut state = BookingState::new();

        state.selected_city = self.selected_city.and_then(|id| {
            id.parse::<City>()
                .map_err(|e| debug!("Dropping saved city: {}", e))
                .ok()
        });
        let selectable = state.currency_selectable();
        state.current_currency = self
            .current_currency
            .and_then(|code| code.parse::<Currency>().ok())
            .filter(|_| selectable)
            .unwrap_or(Currency::REFERENCE);
        state.current_page = self
            .current_page
            .as_deref()
            .and_then(Page::from_id)
            .unwrap_or_default();

        if let Some(selections) = self.selected_options {
            let city = state.selected_city;
            let travel = selections.travel.map(|t| (Category::Travel, t));
            let food = selections.food.into_iter().map(|f| (Category::Food, f));
            let activities = selections
                .activities
                .into_iter()
                .map(|a| (Category::Activities, a));

            for (category, stored) in travel.into_iter().chain(food).chain(activities) {
                match relink(catalog, category, &stored, city) {
                    Some(selected) => state.selected_options.insert(category, selected),
                    None => debug!(
                        "Dropping saved {} selection {:?} / {:?}: no live option",
                        category, stored.id, stored.price
                    ),
                }
            }
        }

        state.recompute_total();
        state.settle_page(registered);
        state
    }
}

/// Find the live option a stored selection refers to: by id when the snapshot
/// has one (the price must still agree), otherwise by category and price
fn relink(
    catalog: &Catalog,
    category: Category,
    stored: &StoredOption,
    city: Option<City>,
) -> Option<SelectedOption> {
    let price = stored.price.as_ref().and_then(parse_price);
    let live = match &stored.id {
        Some(id) => catalog
            .find(id, city)
            .filter(|option| option.category == category)
            .filter(|option| price.map_or(true, |p| p == option.price)),
        None => catalog.find_by_price(category, price?, city),
    }?;
    Some(SelectedOption::from(&live))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn paris_state(catalog: &Catalog) -> BookingState {
        let mut state = BookingState::new();
        state.set_city(catalog, City::Paris);
        state.toggle_option(catalog, &OptionId::from("travel:economy"));
        state.toggle_option(catalog, &OptionId::from("food:street"));
        state.toggle_option(catalog, &OptionId::from("food:wine"));
        state.toggle_option(catalog, &OptionId::from("activities:spa"));
        state.set_currency(Currency::Eur);
        state.current_page = Page::Planner;
        state.recompute_total();
        state
    }

    #[test]
    fn test_persist_restore_roundtrip() {
        let catalog = Catalog::standard();
        let store = MemoryStore::new();
        let state = paris_state(&catalog);

        persist(&store, &state).unwrap();
        let restored = restore(&store, &catalog, true).unwrap();

        assert_eq!(restored, state);
        assert_eq!(restored.total_price, 24999 + 2999 + 34999 + 12499);
    }

    #[test]
    fn test_missing_snapshot_is_none() {
        let store = MemoryStore::new();
        assert!(restore(&store, &Catalog::standard(), true).is_none());
    }

    #[test]
    fn test_malformed_snapshot_is_none() {
        let catalog = Catalog::standard();
        let store = MemoryStore::new();

        store.set(STATE_KEY, "{not json").unwrap();
        assert!(restore(&store, &catalog, true).is_none());

        store.set(STATE_KEY, "[1, 2, 3]").unwrap();
        assert!(restore(&store, &catalog, true).is_none());
    }

    #[test]
    fn test_stale_price_is_dropped() {
        let catalog = Catalog::standard();
        let store = MemoryStore::new();
        let snapshot = json!({
            "currentPage": "page-3",
            "selectedOptions": {
                // 99999 is no Tokyo fare
                "travel": { "id": "travel:economy", "price": 99999 },
                "food": [{ "id": "food:street", "price": 2999 }, { "price": 123 }],
                "activities": [{ "id": "activities:bungee", "price": 5000 }]
            },
            "totalPrice": 999999,
            "selectedCity": "tokyo",
            "currentCurrency": "JPY"
        });
        store.set(STATE_KEY, &snapshot.to_string()).unwrap();

        let restored = restore(&store, &catalog, true).unwrap();
        assert!(restored.selected_options.travel.is_none());
        assert_eq!(restored.selected_options.food.len(), 1);
        assert!(restored.selected_options.activities.is_empty());
        assert_eq!(restored.total_price, 2999);
        assert_eq!(restored.current_currency, Currency::Jpy);
        assert_eq!(restored.current_page, Page::Planner);
    }

    #[test]
    fn test_legacy_snapshot_matches_by_price() {
        let catalog = Catalog::standard();
        let store = MemoryStore::new();
        let snapshot = json!({
            "currentPage": "page-3",
            "selectedOptions": {
                "travel": { "element": {}, "price": 8999 },
                "food": [{ "element": {}, "price": 5499 }],
                "activities": []
            },
            "totalPrice": 14498,
            "selectedCity": "jaipur",
            "currentCurrency": "USD"
        });
        store.set(STATE_KEY, &snapshot.to_string()).unwrap();

        let restored = restore(&store, &catalog, true).unwrap();
        let travel = restored.selected_options.travel.as_ref().unwrap();
        assert_eq!(travel.id.as_str(), "travel:economy");
        assert_eq!(restored.selected_options.food[0].id.as_str(), "food:local");
        assert_eq!(restored.total_price, 14498);
        // jaipur is domestic
        assert_eq!(restored.current_currency, Currency::Inr);
    }

    #[test]
    fn test_unknown_fields_fall_back_to_defaults() {
        let catalog = Catalog::standard();
        let store = MemoryStore::new();
        store
            .set(
                STATE_KEY,
                r#"{"currentPage":"page-9","selectedCity":"atlantis","currentCurrency":"XYZ"}"#,
            )
            .unwrap();

        let restored = restore(&store, &catalog, true).unwrap();
        assert_eq!(restored, BookingState::new());
    }

    #[test]
    fn test_restored_page_needs_its_prerequisites() {
        let catalog = Catalog::standard();
        let store = MemoryStore::new();
        let snapshot = json!({
            "currentPage": "page-4",
            "selectedOptions": {
                "travel": { "id": "travel:train", "price": 1 },
                "food": [],
                "activities": []
            },
            "selectedCity": "tokyo"
        });
        store.set(STATE_KEY, &snapshot.to_string()).unwrap();

        let restored = restore(&store, &catalog, true).unwrap();
        assert!(restored.selected_options.travel.is_none());
        assert_eq!(restored.current_page, Page::Planner);

        let restored = restore(&store, &catalog, false).unwrap();
        assert_eq!(restored.current_page, Page::Registration);

        store
            .set(STATE_KEY, r#"{"currentPage":"page-3","selectedCity":"atlantis"}"#)
            .unwrap();
        let restored = restore(&store, &catalog, true).unwrap();
        assert_eq!(restored.current_page, Page::Destinations);
    }

    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_unreadable_storage_restores_nothing() {
        assert!(restore_registration(&UnreadableStore).is_none());
        assert!(restore(&UnreadableStore, &Catalog::standard(), true).is_none());
    }

    #[test]
    fn test_registration_roundtrip_and_clear() {
        let store = MemoryStore::new();
        let reg = Registration::new("Asha Rao", "asha@example.com", "9876543210", "560001").unwrap();
        persist_registration(&store, &reg).unwrap();
        assert_eq!(restore_registration(&store), Some(reg));

        persist(&store, &BookingState::new()).unwrap();
        clear(&store).unwrap();
        clear(&store).unwrap();
        assert!(restore_registration(&store).is_none());
        assert!(store.get(STATE_KEY).unwrap().is_none());
    }
}
