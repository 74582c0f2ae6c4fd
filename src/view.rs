//! Read models derived from the booking state
//!
//! These are what the front-end renders: the destination guide, option lists,
//! the price breakdown, the cost chart and the confirmation summary. All prices are formatted in
//! the state's current currency; the state itself always stays in INR.

use serde::Serialize;

use crate::{
    catalog::{Catalog, Category, City, CityDetails, Currency, OptionId, Region},
    state::{BookingState, SelectedOption},
};

/// A destination card with its guide
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationView {
    pub id: City,
    pub title: &'static str,
    pub region: Region,
    #[serde(flatten)]
    pub details: CityDetails,
    /// Cheapest fare, in the current currency
    pub starting_fare: Option<String>,
    pub selected: bool,
}

/// Destinations in `region`, or all of them
pub fn destinations(
    catalog: &Catalog,
    state: &BookingState,
    region: Option<Region>,
) -> Vec<DestinationView> {
    let rate = state.current_currency.rate();
    City::ALL
        .into_iter()
        .filter(|city| region.map_or(true, |r| city.region() == r))
        .map(|city| DestinationView {
            id: city,
            title: city.title(),
            region: city.region(),
            details: city.details(),
            starting_fare: catalog
                .fares(city)
                .and_then(|table| table.fares().map(|(_, price)| price).min())
                .map(|price| rate.format(price)),
            selected: state.selected_city == Some(city),
        })
        .collect()
}

/// One option as the front-end should render it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedOption {
    pub id: OptionId,
    pub category: Category,
    pub price: u64,
    pub display_name: String,
    pub description: String,
    pub color_tag: String,
    pub formatted_price: String,
    pub selected: bool,
}

/// Options offered for `category` with their selection marks
pub fn option_list<'a>(
    catalog: &'a Catalog,
    state: &'a BookingState,
    category: Category,
) -> impl Iterator<Item = RenderedOption> + 'a {
    let rate = state.current_currency.rate();
    catalog
        .options(category, state.selected_city)
        .into_iter()
        .map(move |option| RenderedOption {
            selected: state.selected_options.is_selected(&option.id),
            formatted_price: rate.format(option.price),
            id: option.id,
            category: option.category,
            price: option.price,
            display_name: option.name,
            description: option.description,
            color_tag: option.color,
        })
}

/// A selection resolved to its display name
#[derive(Debug, Clone)]
struct ResolvedItem {
    category: Category,
    name: String,
    price: u64,
}

fn resolve_selections(catalog: &Catalog, state: &BookingState) -> Vec<ResolvedItem> {
    state
        .selected_options
        .iter()
        .map(|(category, selected)| ResolvedItem {
            category,
            name: display_name(catalog, selected, state.selected_city)
                .unwrap_or_else(|| category.label().to_string()),
            price: selected.price,
        })
        .collect()
}

fn display_name(catalog: &Catalog, selected: &SelectedOption, city: Option<City>) -> Option<String> {
    catalog
        .find(&selected.id, city)
        .map(|option| option.name)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: f64,
}

/// Input for the cost chart: one slice per selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub currency_symbol: &'static str,
    pub slices: Vec<ChartSlice>,
}

pub fn chart_data(catalog: &Catalog, state: &BookingState) -> ChartData {
    let rate = state.current_currency.rate();
    let slices = resolve_selections(catalog, state)
        .into_iter()
        .map(|item| ChartSlice {
            name: item.name,
            value: (rate.convert(item.price) * 100.0).round() / 100.0,
        })
        .collect();
    ChartData {
        currency_symbol: rate.symbol,
        slices,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownItem {
    pub name: String,
    pub category: &'static str,
    pub price: u64,
    pub formatted: String,
}

/// Itemised price list. The total line is only present when something is
/// selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub items: Vec<BreakdownItem>,
    pub total: Option<String>,
    pub total_price: u64,
}

pub fn price_breakdown(catalog: &Catalog, state: &BookingState) -> PriceBreakdown {
    let rate = state.current_currency.rate();
    let items: Vec<BreakdownItem> = resolve_selections(catalog, state)
        .into_iter()
        .map(|item| BreakdownItem {
            formatted: rate.format(item.price),
            category: item.category.label(),
            name: item.name,
            price: item.price,
        })
        .collect();
    let total = (!items.is_empty()).then(|| rate.format(state.total_price));
    PriceBreakdown {
        items,
        total,
        total_price: state.total_price,
    }
}

/// What the confirmation page lists
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationSummary {
    pub destination: Option<&'static str>,
    pub travel: Option<String>,
    pub food: Vec<String>,
    pub activities: Vec<String>,
    pub final_total: String,
}

pub fn confirmation_summary(catalog: &Catalog, state: &BookingState) -> ConfirmationSummary {
    let mut summary = ConfirmationSummary {
        destination: state.selected_city.map(|city| city.title()),
        travel: None,
        food: Vec::new(),
        activities: Vec::new(),
        final_total: state.current_currency.rate().format(state.total_price),
    };
    for item in resolve_selections(catalog, state) {
        match item.category {
            Category::Travel => summary.travel = Some(item.name),
            Category::Food => summary.food.push(item.name),
            Category::Activities => summary.activities.push(item.name),
        }
    }
    summary
}

/// Booking state plus the display fields every page needs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    #[serde(flatten)]
    pub state: BookingState,
    pub formatted_total: String,
    pub currency_symbol: &'static str,
    pub currency_selectable: bool,
    pub currencies: Vec<Currency>,
}

impl StateView {
    pub fn new(state: BookingState) -> Self {
        let rate = state.current_currency.rate();
        let currency_selectable = state.currency_selectable();
        let currencies = if currency_selectable {
            Currency::ALL.to_vec()
        } else {
            vec![Currency::REFERENCE]
        };
        Self {
            formatted_total: rate.format(state.total_price),
            currency_symbol: rate.symbol,
            currency_selectable,
            currencies,
            state,
        }
    }
}
