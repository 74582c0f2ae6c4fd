//! Static booking catalog
//!
//! Destinations with their fare tables, the food and activity packages and the
//! currency rates. Nothing in here is mutated after startup.

pub mod cities;
pub mod currency;
pub mod packages;

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use cities::{City, CityDetails, FareClass, Region, TravelPriceTable};
pub use currency::{convert_for_display, Currency, CurrencyRate};
pub use packages::Package;

/// Selection category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Exclusive choice
    Travel,
    Food,
    Activities,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Travel, Category::Food, Category::Activities];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Travel => "travel",
            Category::Food => "food",
            Category::Activities => "activities",
        }
    }

    /// Label shown next to an item in the price breakdown
    pub fn label(&self) -> &'static str {
        match self {
            Category::Travel => "Travel",
            Category::Food => "Food",
            Category::Activities => "Activity",
        }
    }

    pub fn is_exclusive(&self) -> bool {
        matches!(self, Category::Travel)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Stable option identifier of the form `category:key`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    pub fn new(category: Category, key: &str) -> Self {
        Self(format!("{}:{}", category, key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Category encoded in the id, if it is well formed
    pub fn category(&self) -> Option<Category> {
        self.0.split_once(':').and_then(|(cat, _)| cat.parse().ok())
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A purchasable option as currently offered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogOption {
    pub id: OptionId,
    pub category: Category,
    pub price: u64,
    pub name: String,
    pub description: String,
    pub color: String,
}

/// All bookable data
#[derive(Debug, Clone)]
pub struct Catalog {
    fares: HashMap<City, TravelPriceTable>,
    food: Vec<Package>,
    activities: Vec<Package>,
}

impl Catalog {
    pub fn new(
        fares: HashMap<City, TravelPriceTable>,
        food: Vec<Package>,
        activities: Vec<Package>,
    ) -> Self {
        Self {
            fares,
            food,
            activities,
        }
    }

    /// Every destination with its standard fares and the standard packages
    pub fn standard() -> Self {
        let fares = City::ALL
            .into_iter()
            .map(|city| (city, city.standard_fares()))
            .collect();
        Self::new(fares, packages::food_packages(), packages::activity_packages())
    }

    pub fn fares(&self, city: City) -> Option<&TravelPriceTable> {
        self.fares.get(&city)
    }

    /// Options offered for `category`. Travel options exist only once a city
    /// is chosen.
    pub fn options(&self, category: Category, city: Option<City>) -> Vec<CatalogOption> {
        match category {
            Category::Travel => city
                .and_then(|city| self.fares(city))
                .map(|table| {
                    table
                        .fares()
                        .map(|(fare, price)| CatalogOption {
                            id: OptionId::new(Category::Travel, fare.key()),
                            category: Category::Travel,
                            price,
                            name: fare.name().to_string(),
                            description: fare.description().to_string(),
                            color: fare.color().to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            Category::Food => self.package_options(category, &self.food),
            Category::Activities => self.package_options(category, &self.activities),
        }
    }

    fn package_options(&self, category: Category, packages: &[Package]) -> Vec<CatalogOption> {
        packages
            .iter()
            .map(|pkg| CatalogOption {
                id: OptionId::new(category, &pkg.key),
                category,
                price: pkg.price,
                name: pkg.name.clone(),
                description: pkg.description.clone(),
                color: pkg.color.clone(),
            })
            .collect()
    }

    /// Look up a live option by id
    pub fn find(&self, id: &OptionId, city: Option<City>) -> Option<CatalogOption> {
        let category = id.category()?;
        self.options(category, city)
            .into_iter()
            .find(|option| &option.id == id)
    }

    /// First live option in `category` priced at `price`
    pub fn find_by_price(
        &self,
        category: Category,
        price: u64,
        city: Option<City>,
    ) -> Option<CatalogOption> {
        self.options(category, city)
            .into_iter()
            .find(|option| option.price == price)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
