//! Fixed word lists of the recipe language.

/// Every lowercase phrase the lexer accepts.
pub const KEY_PHRASES: &[&str] = &[
    "set up",
    "set up a",
    "add",
    "into",
    "add water to",
    "at a",
    "ratio",
    "pour half of contents of",
    "remove",
    "from",
    "if",
    "is empty",
    "is not empty",
    "proceed to step",
    "place",
    "in the oven and bake at",
    "clean",
    "pour contents of",
    "go back to step",
    "serves",
    "recipe",
    "ingredients",
    "method",
    "grams of",
    "brand",
    "remove a layer from",
    "and dump into",
    "microwave",
    "serve with",
    "in grill mode",
    "stir the mixture in",
    "until smooth",
    "sift the mixture in",
    "whip the mixture in",
    "bring the mixture in",
    "to a boil",
];

/// Key phrases allowed between a numeric ingredient value and its name.
pub const MEASURES: &[&str] = &["grams of"];

/// Suffixes that turn an integer literal into an ordinal.
pub const ORDINAL_SUFFIXES: &[&str] = &["st", "nd", "rd", "th"];

/// Suffixes that turn an integer literal into a temperature.
pub const TEMPERATURE_SCALES: &[&str] = &["C", "F"];

/// Returns `true` when `phrase` is part of the key phrase vocabulary.
pub fn is_key_phrase(phrase: &str) -> bool {
    KEY_PHRASES.contains(&phrase)
}
