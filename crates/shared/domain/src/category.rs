//! Word categories and their static generation/verification profiles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A thematic bucket controlling prompt content and verification keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Places,
    Singlish,
    All,
}

/// Returned when a string does not name a known [`Category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

/// Static configuration for a [`Category`].
#[derive(Debug, PartialEq, Eq)]
pub struct CategoryProfile {
    /// Topic description embedded into the system prompt.
    pub description: &'static str,
    /// Style-calibration words shown to the model.
    pub examples: &'static [&'static str],
    /// Appended to `"<word> singapore"` when searching for evidence.
    pub query_tail: &'static str,
    /// A search result must mention at least one of these (lowercase).
    pub keywords: &'static [&'static str],
    /// Noun used in the user prompt ("a unique Singapore <noun> word").
    pub subject: &'static str,
}

static FOOD: CategoryProfile = CategoryProfile {
    description: "Singapore food, hawker dishes, local cuisine, drinks, ingredients, or cooking \
                  terms. Include iconic dishes, snacks, desserts, and beverages that tourists and \
                  locals love",
    examples: &[
        "LAKSA", "SATAY", "KAYA", "ROJAK", "ONDEH", "BANDUNG", "HOKKIEN", "PRATA", "CHENDOL",
        "OTAH",
    ],
    query_tail: "food dish",
    keywords: &["singapore", "food", "dish", "hawker", "cuisine", "eat"],
    subject: "food",
};

static PLACES: CategoryProfile = CategoryProfile {
    description: "places in Singapore - neighborhoods, landmarks, MRT stations, attractions, \
                  parks, beaches, buildings, streets, or famous spots. From Marina Bay to Sentosa \
                  to heartland gems",
    examples: &[
        "BUGIS", "ORCHARD", "SENTOSA", "JEWEL", "CHINATOWN", "BEDOK", "TAMPINES", "CLEMENTI",
        "UBIN", "ESPLANADE",
    ],
    query_tail: "place landmark",
    keywords: &[
        "singapore",
        "mrt",
        "station",
        "district",
        "landmark",
        "park",
        "street",
        "neighbourhood",
        "neighborhood",
        "island",
    ],
    subject: "places",
};

static SINGLISH: CategoryProfile = CategoryProfile {
    description: "Singlish words, Singapore slang, colloquial expressions, Malay/Hokkien/\
                  Cantonese/Tamil words commonly used in Singapore English. Fun local expressions \
                  everyone uses",
    examples: &[
        "SHIOK", "KIASU", "MAKAN", "CHOPE", "WALAO", "BOJIO", "LEPAK", "PAISEH", "ALAMAK",
        "JIALAT",
    ],
    query_tail: "singlish slang meaning",
    keywords: &["singlish", "slang", "singapore", "colloquial", "expression", "meaning"],
    subject: "singlish",
};

static ALL: CategoryProfile = CategoryProfile {
    description: "anything uniquely Singaporean - food, places, Singlish, traditions, festivals, \
                  activities, or cultural references. Surprise the player with something fun",
    examples: &[
        "LAKSA", "SHIOK", "ORCHARD", "MERLION", "CHOPE", "DURIAN", "HAWKER", "KOPITIAM", "MRT",
        "VESAK",
    ],
    query_tail: "culture",
    keywords: &["singapore", "singaporean", "culture", "local", "food", "place", "slang"],
    subject: "culture",
};

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Self; 4] = [Self::Food, Self::Places, Self::Singlish, Self::All];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Places => "places",
            Self::Singlish => "singlish",
            Self::All => "all",
        }
    }

    #[must_use]
    pub const fn profile(self) -> &'static CategoryProfile {
        match self {
            Self::Food => &FOOD,
            Self::Places => &PLACES,
            Self::Singlish => &SINGLISH,
            Self::All => &ALL,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Exact, case-sensitive match on the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}
