//! Selected options and price totals

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{CatalogOption, Category, OptionId};

/// One selected option. The price is captured at selection time so totals
/// never need the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub id: OptionId,
    pub price: u64,
}

impl From<&CatalogOption> for SelectedOption {
    fn from(option: &CatalogOption) -> Self {
        Self {
            id: option.id.clone(),
            price: option.price,
        }
    }
}

/// Current selections across all categories
///
/// `travel` holds at most one option. `food` and `activities` hold each
/// option at most once, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub travel: Option<SelectedOption>,
    pub food: Vec<SelectedOption>,
    pub activities: Vec<SelectedOption>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `option` in its category.
    ///
    /// Travel is exclusive: picking the current fare clears it, picking any
    /// other fare replaces it. Food and activities add the option, or remove it
    /// if it is already selected.
    pub fn toggle(&mut self, option: &CatalogOption) {
        let selected = SelectedOption::from(option);
        match option.category {
            Category::Travel => {
                if self.travel.as_ref().is_some_and(|t| t.id == selected.id) {
                    self.travel = None;
                } else {
                    self.travel = Some(selected);
                }
            }
            Category::Food | Category::Activities => {
                let entries = self.entries_mut(option.category);
                if let Some(pos) = entries.iter().position(|e| e.id == selected.id) {
                    entries.remove(pos);
                } else {
                    entries.push(selected);
                }
            }
        }
    }

    /// Insert without toggling; duplicates are ignored
    pub(crate) fn insert(&mut self, category: Category, selected: SelectedOption) {
        match category {
            Category::Travel => self.travel = Some(selected),
            Category::Food | Category::Activities => {
                let entries = self.entries_mut(category);
                if !entries.iter().any(|e| e.id == selected.id) {
                    entries.push(selected);
                }
            }
        }
    }

    fn entries_mut(&mut self, category: Category) -> &mut Vec<SelectedOption> {
        match category {
            Category::Food => &mut self.food,
            _ => &mut self.activities,
        }
    }

    /// Selected entries of one category
    pub fn entries(&self, category: Category) -> &[SelectedOption] {
        match category {
            Category::Travel => self.travel.as_slice(),
            Category::Food => &self.food,
            Category::Activities => &self.activities,
        }
    }

    /// All selections, travel first, then food, then activities
    pub fn iter(&self) -> impl Iterator<Item = (Category, &SelectedOption)> + '_ {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.entries(category).iter().map(move |e| (category, e)))
    }

    pub fn is_selected(&self, id: &OptionId) -> bool {
        self.iter().any(|(_, e)| &e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.travel.is_none() && self.food.is_empty() && self.activities.is_empty()
    }
}

/// Sum of the travel price (or 0) and every food and activity price
pub fn compute_total(selection: &SelectionState) -> u64 {
    selection.iter().map(|(_, e)| e.price).sum()
}

/// Parse a price as sent by a client: a non-negative integer, either as a JSON
/// number or a numeric string
pub fn parse_price(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
