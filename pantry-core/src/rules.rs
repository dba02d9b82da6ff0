//! Static rule tables: shelf-life defaults, healthier alternatives, and
//! item pairings.
//!
//! Each table is an ordered slice scanned front to back; a key matches
//! when it is a substring of the normalized item name, and the first
//! match wins. The iteration order is part of the contract: more specific
//! keys ("white bread") must appear before any shorter key that could
//! also match.

/// Shelf life assumed when no rule matches and no better estimate exists.
pub const DEFAULT_SHELF_LIFE_DAYS: i64 = 7;

/// Keyword to shelf life in days.
pub const SHELF_LIFE: &[(&str, i64)] = &[
    ("milk", 7),
    ("eggs", 14),
    ("bread", 5),
    ("cheese", 14),
    ("yogurt", 7),
    ("chicken", 3),
    ("beef", 3),
    ("fish", 2),
    ("meat", 3),
    ("rice", 30),
    ("pasta", 30),
    ("apples", 10),
    ("bananas", 4),
    ("vegetables", 7),
    ("fruits", 5),
    ("shampoo", 30),
    ("soap", 14),
    ("toothpaste", 30),
];

/// Keyword to a healthier substitute.
pub const HEALTHIER_ALTERNATIVES: &[(&str, &str)] = &[
    ("white bread", "whole wheat bread"),
    ("soda", "sparkling water"),
    ("coke", "sparkling water"),
    ("pepsi", "sparkling water"),
    ("chips", "popcorn"),
    ("crisps", "nuts"),
    ("sugar", "honey"),
    ("butter", "olive oil"),
    ("white rice", "brown rice"),
    ("chocolate", "dark chocolate"),
    ("ice cream", "frozen yogurt"),
    ("mayo", "greek yogurt"),
    ("candy", "fresh fruit"),
    ("cookies", "oatmeal cookies"),
    ("burger", "turkey burger"),
    ("pizza", "cauliflower pizza"),
];

/// Keyword to items commonly bought together.
pub const PAIRINGS: &[(&str, &[&str])] = &[
    ("bread", &["butter", "jam"]),
    ("cereal", &["milk"]),
    ("pasta", &["pasta sauce", "cheese"]),
    ("eggs", &["bread"]),
    ("pancake", &["syrup"]),
    ("coffee", &["milk", "sugar"]),
];

/// Shelf life for `item` from the static table, if any key matches.
/// `item` must already be normalized.
pub fn shelf_life_days(item: &str) -> Option<i64> {
    SHELF_LIFE
        .iter()
        .find(|(key, _)| item.contains(key))
        .map(|&(_, days)| days)
}

/// Shelf life for `item`, falling back to [`DEFAULT_SHELF_LIFE_DAYS`].
pub fn shelf_life_or_default(item: &str) -> i64 {
    shelf_life_days(item).unwrap_or(DEFAULT_SHELF_LIFE_DAYS)
}

/// Healthier substitute for `item`, if any key matches.
pub fn healthier_alternative(item: &str) -> Option<&'static str> {
    HEALTHIER_ALTERNATIVES
        .iter()
        .find(|(key, _)| item.contains(key))
        .map(|&(_, alt)| alt)
}

/// Items commonly bought together with `item`, if any key matches.
pub fn pairings(item: &str) -> Option<&'static [&'static str]> {
    PAIRINGS
        .iter()
        .find(|(key, _)| item.contains(key))
        .map(|&(_, pairs)| pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shelf_life_substring_match() {
        assert_eq!(shelf_life_days("milk"), Some(7));
        assert_eq!(shelf_life_days("oat milk"), Some(7));
        assert_eq!(shelf_life_days("white bread"), Some(5));
        assert_eq!(shelf_life_days("laundry detergent"), None);
        assert_eq!(shelf_life_or_default("laundry detergent"), 7);
    }

    #[test]
    fn test_healthier_alternative_specific_key_first() {
        // "white bread" sits ahead of anything else that could match it.
        assert_eq!(healthier_alternative("white bread"), Some("whole wheat bread"));
        assert_eq!(healthier_alternative("white rice"), Some("brown rice"));
        assert_eq!(healthier_alternative("spinach"), None);
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        // "chocolate chips" matches both "chips" and "chocolate";
        // "chips" comes first in the table and wins.
        assert_eq!(healthier_alternative("chocolate chips"), Some("popcorn"));
    }

    #[test]
    fn test_pairings() {
        assert_eq!(pairings("bread"), Some(&["butter", "jam"][..]));
        assert_eq!(pairings("sourdough bread"), Some(&["butter", "jam"][..]));
        assert_eq!(pairings("coffee"), Some(&["milk", "sugar"][..]));
        assert_eq!(pairings("spinach"), None);
    }
}
