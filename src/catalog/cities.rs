//! Destinations and their travel fare tables

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Bookable destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum City {
    Paris,
    Tokyo,
    Rome,
    Bali,
    NewYork,
    Jaipur,
    Kerala,
    Goa,
    Udaipur,
    Leh,
    Amritsar,
}

impl City {
    pub const ALL: [City; 11] = [
        City::Paris,
        City::Tokyo,
        City::Rome,
        City::Bali,
        City::NewYork,
        City::Jaipur,
        City::Kerala,
        City::Goa,
        City::Udaipur,
        City::Leh,
        City::Amritsar,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            City::Paris => "paris",
            City::Tokyo => "tokyo",
            City::Rome => "rome",
            City::Bali => "bali",
            City::NewYork => "newyork",
            City::Jaipur => "jaipur",
            City::Kerala => "kerala",
            City::Goa => "goa",
            City::Udaipur => "udaipur",
            City::Leh => "leh",
            City::Amritsar => "amritsar",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            City::Paris => "Paris, France",
            City::Tokyo => "Tokyo, Japan",
            City::Rome => "Rome, Italy",
            City::Bali => "Bali, Indonesia",
            City::NewYork => "New York City, USA",
            City::Jaipur => "Jaipur, Rajasthan",
            City::Kerala => "Kerala - God's Own Country",
            City::Goa => "Goa - Beach Paradise",
            City::Udaipur => "Udaipur - City of Lakes",
            City::Leh => "Leh - Himalayan Adventure",
            City::Amritsar => "Amritsar - Spiritual Journey",
        }
    }

    /// Currency selection is only offered for international destinations
    pub fn is_international(&self) -> bool {
        matches!(
            self,
            City::Paris | City::Tokyo | City::Rome | City::Bali | City::NewYork
        )
    }

    /// Standard fare table for this destination, in INR
    pub fn standard_fares(&self) -> TravelPriceTable {
        let prices = match self {
            City::Paris => [14999, 12499, 24999, 37499, 54999, 94999, 199999],
            City::Tokyo => [12999, 10499, 22999, 35499, 52999, 92999, 189999],
            City::Rome => [13499, 10999, 23999, 36499, 53999, 93999, 194999],
            City::Bali => [11999, 9499, 21999, 34499, 51999, 91999, 184999],
            City::NewYork => [15999, 13499, 25999, 38499, 55999, 95999, 204999],
            City::Jaipur => [4999, 2999, 8999, 14999, 24999, 44999, 89999],
            City::Kerala => [5999, 3999, 9999, 15999, 25999, 45999, 91999],
            City::Goa => [5499, 3499, 9499, 15499, 25499, 45499, 90999],
            City::Udaipur => [4799, 2799, 8799, 14799, 24799, 44799, 89799],
            City::Leh => [8999, 6999, 14999, 22499, 34999, 54999, 109999],
            City::Amritsar => [5299, 3299, 9299, 15299, 25299, 45299, 90299],
        };
        TravelPriceTable::new(prices)
    }

    /// Travel guide shown when a destination is explored
    pub fn details(&self) -> CityDetails {
        match self {
            City::Paris => CityDetails {
                image: "https://wallpaperaccess.com/full/383916.jpg",
                description: "Experience the City of Light in all its glory. From the iconic Eiffel Tower to the world-renowned Louvre Museum, Paris offers an unparalleled blend of art, culture, and romance. Stroll along the Seine, indulge in exquisite French cuisine, and immerse yourself in the timeless elegance that has captivated visitors for centuries.",
                attractions: [
                    "Eiffel Tower & Seine River Cruises",
                    "Louvre Museum & Mona Lisa",
                    "Champs-Élysées & Arc de Triomphe",
                    "Montmartre & Sacré-Cœur",
                    "Notre-Dame Cathedral",
                ],
                best_time: "April to June & September to October",
                travel_tips: "Book museum tickets in advance, learn basic French phrases, use metro for transport, try local bistros",
            },
            City::Tokyo => CityDetails {
                image: "https://wallpaperaccess.com/full/26365.jpg",
                description: "Discover the perfect harmony of ancient tradition and cutting-edge technology. Experience the energy of Shibuya Crossing, find tranquility in cherry blossom season, and savor world-class sushi. Tokyo offers a unique journey through time where futuristic skyscrapers stand beside historic temples.",
                attractions: [
                    "Shibuya Crossing & Harajuku",
                    "Senso-ji Temple in Asakusa",
                    "Mount Fuji day trips",
                    "Tsukiji Fish Market",
                    "Cherry blossom viewing in spring",
                ],
                best_time: "March to May & September to November",
                travel_tips: "Get JR Pass for trains, try convenience store food, respect local customs, carry cash",
            },
            City::Rome => CityDetails {
                image: "https://wallpaperaccess.com/full/129471.jpg",
                description: "Step into the eternal city where history comes alive at every corner. Marvel at the Colosseum's grandeur, explore the Vatican's treasures, and indulge in authentic Italian cuisine. Rome offers an immersive journey through 3,000 years of civilization, art, and culinary excellence.",
                attractions: [
                    "Colosseum & Roman Forum",
                    "Vatican Museums & Sistine Chapel",
                    "Trevi Fountain & Spanish Steps",
                    "Pantheon & Piazza Navona",
                    "Trastevere neighborhood",
                ],
                best_time: "April to June & September to October",
                travel_tips: "Buy skip-the-line tickets, dress modestly for churches, try gelato, explore on foot",
            },
            City::Bali => CityDetails {
                image: "https://wallpaperaccess.com/full/3525907.jpg",
                description: "Find your paradise in the Island of Gods. Experience spiritual awakening in Ubud's rice terraces, practice yoga in serene retreats, and discover ancient temples. Bali offers a perfect blend of natural beauty, spiritual culture, and tropical relaxation that will rejuvenate your soul.",
                attractions: [
                    "Ubud Rice Terraces & Monkey Forest",
                    "Uluwatu Temple & Kecak Dance",
                    "Seminyak Beach & Sunset",
                    "Tirta Empul Holy Spring Temple",
                    "Mount Batur sunrise trek",
                ],
                best_time: "April to October (dry season)",
                travel_tips: "Respect temple dress codes, try local warungs, bargain at markets, stay hydrated",
            },
            City::NewYork => CityDetails {
                image: "https://wallpaperaccess.com/full/283006.jpg",
                description: "Experience the city that never sleeps in all its vibrant energy. From the bright lights of Times Square to the tranquility of Central Park, New York offers an unparalleled urban adventure. Catch a Broadway show, explore diverse neighborhoods, and feel the pulse of American culture.",
                attractions: [
                    "Times Square & Broadway Shows",
                    "Central Park & Statue of Liberty",
                    "Empire State Building",
                    "Metropolitan Museum of Art",
                    "Brooklyn Bridge & DUMBO",
                ],
                best_time: "April to June & September to November",
                travel_tips: "Buy NYC Pass for attractions, use subway, book Broadway tickets early, tip 15-20%",
            },
            City::Jaipur => CityDetails {
                image: "https://wallpaperaccess.com/full/1266890.jpg",
                description: "Experience the royal heritage of Rajasthan in the Pink City. Explore magnificent forts, palaces, and vibrant bazaars. Jaipur offers a perfect blend of history, architecture, and culture that transports you to the era of Maharajas.",
                attractions: [
                    "Amber Fort & Elephant Ride",
                    "Hawa Mahal & City Palace",
                    "Jantar Mantar Observatory",
                    "Local Bazaars & Handicrafts",
                    "Rajasthani Folk Performances",
                ],
                best_time: "October to March",
                travel_tips: "Hire a local guide, try Rajasthani thali, bargain in bazaars, stay in heritage hotels",
            },
            City::Kerala => CityDetails {
                image: "https://wallpaperaccess.com/full/1635209.jpg",
                description: "Discover tranquility in God's Own Country. Cruise through serene backwaters, experience Ayurvedic wellness, and enjoy lush green landscapes. Kerala offers a rejuvenating tropical escape with its unique culture and natural beauty.",
                attractions: [
                    "Alleppey Backwaters & Houseboats",
                    "Munnar Tea Plantations",
                    "Kochi Fort & Chinese Nets",
                    "Kathakali Performances",
                    "Periyar Wildlife Sanctuary",
                ],
                best_time: "September to March",
                travel_tips: "Book houseboats in advance, try Ayurvedic massage, taste Kerala sadya, carry mosquito repellent",
            },
            City::Goa => CityDetails {
                image: "https://wallpaperaccess.com/full/14949598.jpg",
                description: "Find your bliss in Goa's sun-kissed beaches and vibrant nightlife. From Portuguese heritage to seafood delights, Goa offers the perfect coastal getaway with a unique blend of Indian and European cultures.",
                attractions: [
                    "Calangute & Baga Beaches",
                    "Basilica of Bom Jesus",
                    "Dudhsagar Waterfalls",
                    "Fontainhas Latin Quarter",
                    "Anjuna Flea Market",
                ],
                best_time: "November to February",
                travel_tips: "Rent a scooter for travel, try seafood shacks, visit both North & South Goa, respect beach safety",
            },
            City::Udaipur => CityDetails {
                image: "https://wallpaperaccess.com/full/6373674.jpg",
                description: "Fall in love with the romantic City of Lakes. With its stunning palaces, tranquil lakes, and royal charm, Udaipur is a dream destination for every traveler seeking beauty and serenity.",
                attractions: [
                    "Lake Pichola Boat Ride",
                    "City Palace & Museum",
                    "Jag Mandir & Jag Niwas",
                    "Sunset at Monsoon Palace",
                    "Vintage Car Museum",
                ],
                best_time: "September to March",
                travel_tips: "Book lake-view hotels, enjoy rooftop dining, visit during festivals, shop for mini paintings",
            },
            City::Leh => CityDetails {
                image: "https://wallpaperaccess.com/full/1398665.jpg",
                description: "Conquer the Himalayas in Leh-Ladakh. Experience dramatic landscapes, Buddhist monasteries, and thrilling adventures at one of the highest inhabited places on Earth.",
                attractions: [
                    "Pangong Tso Lake",
                    "Nubra Valley & Diskit Monastery",
                    "Khardung La Pass",
                    "Thiksey & Hemis Monasteries",
                    "Magnetic Hill",
                ],
                best_time: "May to September",
                travel_tips: "Acclimatize for altitude, carry altitude sickness meds, pack warm clothes, get inner line permits",
            },
            City::Amritsar => CityDetails {
                image: "https://imgs.search.brave.com/bNGdjaYBxL4enjvjGnn3VsinV_TaXtgT94je_1PU1MA/rs:fit:860:0:0:0/g:ce/aHR0cHM6Ly90aHVt/YnMuZHJlYW1zdGlt/ZS5jb20vYi93YWdh/aC1ib3JkZXItd2Fn/YWgtYm9yZGVyLWF0/dGFyaS1wdW5qYWIt/YW1yaXRzYXItY3Jv/d2QtaW5kaWEtMTYy/NzI3ODMyLmpwZw",
                description: "Experience spiritual bliss in Amritsar. Visit the Golden Temple, witness the Wagah Border ceremony, and savor authentic Punjabi cuisine in this sacred city that embodies the heart of Sikh culture.",
                attractions: [
                    "Golden Temple & Langar",
                    "Wagah Border Ceremony",
                    "Jallianwala Bagh",
                    "Partition Museum",
                    "Amritsari Food Tour",
                ],
                best_time: "October to March",
                travel_tips: "Cover head at Golden Temple, try langar food, arrive early for Wagah ceremony, taste Amritsari kulcha",
            },
        }
    }

    pub fn region(&self) -> Region {
        if self.is_international() {
            Region::International
        } else {
            Region::India
        }
    }
}


impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|c| c.id() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown city: {}", s))
    }
}

/// Destination filter on the destinations page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    India,
    International,
}

/// Guide text for one destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDetails {
    pub image: &'static str,
    pub description: &'static str,
    pub attractions: [&'static str; 5],
    pub best_time: &'static str,
    pub travel_tips: &'static str,
}

/// The seven fare classes every destination is priced for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FareClass {
    Train,
    Road,
    Economy,
    Premium,
    Business,
    First,
    Private,
}

impl FareClass {
    pub const ALL: [FareClass; 7] = [
        FareClass::Train,
        FareClass::Road,
        FareClass::Economy,
        FareClass::Premium,
        FareClass::Business,
        FareClass::First,
        FareClass::Private,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FareClass::Train => "train",
            FareClass::Road => "road",
            FareClass::Economy => "economy",
            FareClass::Premium => "premium",
            FareClass::Business => "business",
            FareClass::First => "first",
            FareClass::Private => "private",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FareClass::Train => "Train Journey",
            FareClass::Road => "Road Trip",
            FareClass::Economy => "Economy Flight",
            FareClass::Premium => "Premium Economy",
            FareClass::Business => "Business Class",
            FareClass::First => "First Class",
            FareClass::Private => "Private Jet",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FareClass::Train => "Scenic rail routes",
            FareClass::Road => "Drive yourself",
            FareClass::Economy => "Standard comfort",
            FareClass::Premium => "Extra legroom",
            FareClass::Business => "Premium comfort",
            FareClass::First => "Ultimate luxury",
            FareClass::Private => "Exclusive charter",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            FareClass::Train => "blue-600",
            FareClass::Road => "green-600",
            FareClass::Economy => "orange-600",
            FareClass::Premium => "purple-600",
            FareClass::Business => "red-600",
            FareClass::First => "pink-600",
            FareClass::Private => "indigo-600",
        }
    }

    fn index(&self) -> usize {
        FareClass::ALL
            .iter()
            .position(|fare| fare == self)
            .unwrap_or_default()
    }
}

/// Base price per fare class for one destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelPriceTable {
    prices: [u64; 7],
}

impl TravelPriceTable {
    /// Prices ordered as [`FareClass::ALL`]
    pub fn new(prices: [u64; 7]) -> Self {
        Self { prices }
    }

    pub fn price(&self, fare: FareClass) -> u64 {
        self.prices[fare.index()]
    }

    pub fn fares(&self) -> impl Iterator<Item = (FareClass, u64)> + '_ {
        FareClass::ALL.into_iter().map(|fare| (fare, self.price(fare)))
    }

    /// First fare class priced at `price`, if any
    pub fn fare_with_price(&self, price: u64) -> Option<FareClass> {
        self.fares()
            .find(|(_, fare_price)| *fare_price == price)
            .map(|(fare, _)| fare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_international_subset() {
        let international: Vec<City> = City::ALL
            .into_iter()
            .filter(City::is_international)
            .collect();
        assert_eq!(
            international,
            vec![City::Paris, City::Tokyo, City::Rome, City::Bali, City::NewYork]
        );
        assert!(!City::Goa.is_international());
    }

    #[test]
    fn test_parse_city_ids() {
        assert_eq!("newyork".parse::<City>(), Ok(City::NewYork));
        assert_eq!("Leh".parse::<City>(), Ok(City::Leh));
        assert!("atlantis".parse::<City>().is_err());
        assert_eq!(serde_json::to_string(&City::NewYork).unwrap(), "\"newyork\"");
    }

    #[test]
    fn test_fare_lookup() {
        let fares = City::Paris.standard_fares();
        assert_eq!(fares.price(FareClass::Train), 14999);
        assert_eq!(fares.price(FareClass::Private), 199999);
        assert_eq!(fares.fare_with_price(24999), Some(FareClass::Economy));
        assert_eq!(fares.fare_with_price(1), None);
    }

    #[test]
    fn test_same_price_maps_to_different_fare_across_cities() {
        // Paris train and Leh economy share a price
        assert_eq!(
            City::Paris.standard_fares().fare_with_price(14999),
            Some(FareClass::Train)
        );
        assert_eq!(
            City::Leh.standard_fares().fare_with_price(14999),
            Some(FareClass::Economy)
        );
    }

    #[test]
    fn test_every_city_has_a_guide() {
        for city in City::ALL {
            let details = city.details();
            assert!(!details.description.is_empty(), "{city}");
            assert!(details.attractions.iter().all(|a| !a.is_empty()), "{city}");
            assert!(!details.best_time.is_empty(), "{city}");
        }
        assert_eq!(City::Leh.details().best_time, "May to September");
        assert_eq!(City::Paris.details().attractions[2], "Champs-Élysées & Arc de Triomphe");
        assert_eq!(City::Goa.region(), Region::India);
        assert_eq!(City::Bali.region(), Region::International);
    }
}
