//! Food and activity packages

/// A multi-choice package. Prices are in INR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub key: String,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub color: String,
}

impl Package {
    pub fn new(key: &str, name: &str, description: &str, price: u64, color: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            color: color.to_string(),
        }
    }
}

pub fn food_packages() -> Vec<Package> {
    vec![
        Package::new("street", "Street Food Tour", "Local delicacies", 2999, "orange-600"),
        Package::new("local", "Local Cuisine", "Authentic flavors", 5499, "blue-600"),
        Package::new("vegetarian", "Vegetarian Special", "Plant-based meals", 8999, "green-600"),
        Package::new("international", "International Dining", "Global tastes", 12499, "purple-600"),
        Package::new("seafood", "Seafood Deluxe", "Ocean fresh", 17499, "teal-600"),
        Package::new("gourmet", "Gourmet Experience", "Michelin stars", 24999, "pink-600"),
        Package::new("wine", "Wine & Dine", "Premium pairing", 34999, "red-600"),
    ]
}

pub fn activity_packages() -> Vec<Package> {
    vec![
        Package::new("sightseeing", "City Sightseeing", "Must-see attractions", 1999, "indigo-600"),
        Package::new("museum", "Museum Pass", "Cultural access", 3499, "blue-600"),
        Package::new("adventure", "Adventure Tours", "Thrilling experiences", 5499, "orange-600"),
        Package::new("water", "Water Sports", "Beach activities", 7499, "green-600"),
        Package::new("nightlife", "Nightlife Experience", "Evening entertainment", 6499, "purple-600"),
        Package::new("cultural", "Cultural Experiences", "Deep immersion", 8999, "pink-600"),
        Package::new("spa", "Spa & Wellness", "Relaxation & health", 12499, "teal-600"),
        Package::new("shopping", "Shopping Tour", "Retail therapy", 5999, "red-600"),
    ]
}
