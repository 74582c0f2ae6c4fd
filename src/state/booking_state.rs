//! Persisted booking state and its transitions

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::selection::{compute_total, parse_price, SelectedOption, SelectionState};
use crate::{
    catalog::{Catalog, Category, City, Currency, OptionId},
    error::BookingError,
};

/// Booking flow pages, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Page {
    #[default]
    #[serde(rename = "page-1")]
    Registration,
    #[serde(rename = "page-2")]
    Destinations,
    #[serde(rename = "page-3")]
    Planner,
    #[serde(rename = "page-4")]
    Confirmation,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Registration,
        Page::Destinations,
        Page::Planner,
        Page::Confirmation,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Page::Registration => "page-1",
            Page::Destinations => "page-2",
            Page::Planner => "page-3",
            Page::Confirmation => "page-4",
        }
    }

    pub fn from_id(id: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.id() == id)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Everything the booking flow remembers between requests and restarts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingState {
    pub current_page: Page,
    pub selected_options: SelectionState,
    pub total_price: u64,
    pub selected_city: Option<City>,
    pub current_currency: Currency,
}

impl BookingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-derive the total from the selections
    pub fn recompute_total(&mut self) {
        self.total_price = compute_total(&self.selected_options);
    }

    /// Toggle the live option in `category` priced at `price`.
    ///
    /// Returns false, leaving the state untouched, when the category is
    /// unknown, the price is not a number or nothing is offered at that price.
    pub fn toggle_selection(&mut self, catalog: &Catalog, category: &str, price: &Value) -> bool {
        let Ok(category) = category.parse::<Category>() else {
            debug!("Ignoring toggle for unknown category {:?}", category);
            return false;
        };
        let Some(price) = parse_price(price) else {
            debug!("Ignoring toggle with unparseable price {}", price);
            return false;
        };
        match catalog.find_by_price(category, price, self.selected_city) {
            Some(option) => {
                self.selected_options.toggle(&option);
                true
            }
            None => {
                debug!("No {} option priced {}", category, price);
                false
            }
        }
    }

    /// Toggle the live option with `id`. Returns false if it is not offered.
    pub fn toggle_option(&mut self, catalog: &Catalog, id: &OptionId) -> bool {
        match catalog.find(id, self.selected_city) {
            Some(option) => {
                self.selected_options.toggle(&option);
                true
            }
            None => {
                debug!("Ignoring toggle for unknown option {}", id);
                false
            }
        }
    }

    /// Switch destination.
    ///
    /// Travel prices are specific to a city's fare table: the travel selection
    /// survives only if the new table has a fare at the same price, and then
    /// points at that fare. Domestic cities are always priced in INR.
    pub fn set_city(&mut self, catalog: &Catalog, city: City) {
        self.selected_city = Some(city);

        if let Some(previous) = self.selected_options.travel.take() {
            let relinked = catalog
                .fares(city)
                .and_then(|table| table.fare_with_price(previous.price))
                .map(|fare| SelectedOption {
                    id: OptionId::new(Category::Travel, fare.key()),
                    price: previous.price,
                });
            if relinked.is_none() {
                debug!(
                    "Travel selection {} has no fare priced {} in {}, clearing it",
                    previous.id, previous.price, city
                );
            }
            self.selected_options.travel = relinked;
        }

        if !city.is_international() {
            self.current_currency = Currency::REFERENCE;
        }
    }

    /// Whether the currency selector is offered
    pub fn currency_selectable(&self) -> bool {
        self.selected_city.is_some_and(|c| c.is_international())
    }

    /// Change display currency. Returns false when the current destination
    /// does not offer currency selection.
    pub fn set_currency(&mut self, currency: Currency) -> bool {
        if currency != Currency::REFERENCE && !self.currency_selectable() {
            debug!("Currency {} not offered for {:?}", currency, self.selected_city);
            return false;
        }
        self.current_currency = currency;
        true
    }

    /// Move to `target`. Going back is always allowed; every page passed on
    /// the way forward must have its prerequisite met.
    pub fn navigate(&mut self, target: Page, registered: bool) -> Result<(), BookingError> {
        for page in Page::ALL
            .into_iter()
            .filter(|p| *p > self.current_page && *p <= target)
        {
            self.check_gate(page, registered)?;
        }
        self.current_page = target;
        Ok(())
    }

    /// Step back to the furthest page whose prerequisites, and those of every
    /// page before it, still hold. Returns true if the page changed.
    pub fn settle_page(&mut self, registered: bool) -> bool {
        let reachable = Page::ALL
            .into_iter()
            .take_while(|page| self.check_gate(*page, registered).is_ok())
            .last()
            .unwrap_or_default();
        if self.current_page <= reachable {
            return false;
        }
        debug!("Moving back from {} to {}", self.current_page, reachable);
        self.current_page = reachable;
        true
    }

    fn check_gate(&self, page: Page, registered: bool) -> Result<(), BookingError> {
        match page {
            Page::Registration => Ok(()),
            Page::Destinations if !registered => Err(BookingError::RegistrationRequired),
            Page::Planner if self.selected_city.is_none() => Err(BookingError::CityRequired),
            Page::Confirmation if self.selected_options.travel.is_none() => {
                Err(BookingError::MissingTravelSelection)
            }
            _ => Ok(()),
        }
    }
}
