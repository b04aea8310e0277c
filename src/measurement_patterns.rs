//! # Measurement Patterns Module
//!
//! This module contains the regex patterns and vocabulary tables used to pull a
//! quantity and a unit off the front of an ingredient line.

use crate::measurement_types::Unit;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

/// One number: mixed number ("2 1/2"), fraction ("1/2"), decimal (".5", "1.5",
/// "1,5") or integer. Alternation order matters: the regex engine takes the
/// leftmost alternative that matches.
pub const NUMBER_PATTERN: &str = r"\d+\s+\d+/\d+|\d+/\d+|\d*\.\d+|\d+,\d+|\d+";

/// Separators accepted between the two ends of a range
pub const RANGE_SEPARATOR_PATTERN: &str = r"\s*(?:-|–|—|to|or)\s*";

/// Unicode vulgar fractions and their values
pub const UNICODE_FRACTIONS: &[(char, &str)] = &[
    ('½', "1/2"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('⅕', "1/5"),
    ('⅖', "2/5"),
    ('⅗', "3/5"),
    ('⅘', "4/5"),
    ('⅙', "1/6"),
    ('⅚', "5/6"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
];

/// Words standing in for a quantity of one ("a pinch of salt")
pub const ARTICLE_QUANTITIES: &[&str] = &["a", "an", "one", "un", "une"];

/// Connector words stripped from the front of an ingredient name (English and French)
pub const CONNECTOR_PREFIXES: &[&str] = &["of ", "de ", "d'", "du ", "des "];

/// Container and measure words that are not convertible but are clearly units.
///
/// A quantity followed by one of these keeps the word as an opaque
/// [`Unit::Other`] token instead of folding it into the ingredient name.
pub const MEASURE_WORDS: &[&str] = &[
    "bag", "bags", "bar", "bars", "bunch", "bunches", "cube", "cubes", "drop", "drops",
    "handful", "handfuls", "head", "heads", "jar", "jars", "packet", "packets", "sheet",
    "sheets", "sprig", "sprigs", "stalk", "stalks", "stick", "sticks", "sachet", "sachets",
    "tranche", "tranches", "brin", "brins", "feuille", "feuilles", "poignée", "poignées",
];

lazy_static! {
    /// Leading quantity, optionally a range, anchored at the start of the line
    pub static ref LEADING_QUANTITY_REGEX: Regex = Regex::new(&format!(
        r"(?i)^(?P<first>{num})(?:{sep}(?P<second>{num}))?",
        num = NUMBER_PATTERN,
        sep = RANGE_SEPARATOR_PATTERN,
    ))
    .expect("Leading quantity pattern should be valid");

    /// A complete quantity string (structured `amount` fields)
    pub static ref FULL_QUANTITY_REGEX: Regex = Regex::new(&format!(
        r"(?i)^\s*(?P<first>{num})(?:{sep}(?P<second>{num}))?\s*$",
        num = NUMBER_PATTERN,
        sep = RANGE_SEPARATOR_PATTERN,
    ))
    .expect("Full quantity pattern should be valid");

    /// A leading minus sign in front of a number
    pub static ref NEGATIVE_QUANTITY_REGEX: Regex =
        Regex::new(r"^[-−]\s*\d").expect("Negative quantity pattern should be valid");

    /// A digit directly followed by a unicode fraction ("1½")
    pub static ref ATTACHED_FRACTION_REGEX: Regex = Regex::new(r"(\d)([½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞])")
        .expect("Attached fraction pattern should be valid");

    /// Unit vocabulary: every accepted spelling mapped to its unit
    pub static ref UNIT_ALIASES: HashMap<&'static str, Unit> = {
        let mut map = HashMap::new();

        // Volume units
        for alias in ["tsp", "tsps", "teaspoon", "teaspoons", "cuillère à café", "cuillères à café", "cac"] {
            map.insert(alias, Unit::Teaspoon);
        }
        for alias in ["tbsp", "tbsps", "tbs", "tablespoon", "tablespoons", "cuillère à soupe", "cuillères à soupe", "cas"] {
            map.insert(alias, Unit::Tablespoon);
        }
        for alias in ["fl oz", "fl. oz", "fluid ounce", "fluid ounces"] {
            map.insert(alias, Unit::FluidOunce);
        }
        for alias in ["cup", "cups", "c", "tasse", "tasses"] {
            map.insert(alias, Unit::Cup);
        }
        for alias in ["pint", "pints", "pt"] {
            map.insert(alias, Unit::Pint);
        }
        for alias in ["quart", "quarts", "qt"] {
            map.insert(alias, Unit::Quart);
        }
        for alias in ["gallon", "gallons", "gal"] {
            map.insert(alias, Unit::Gallon);
        }
        for alias in ["ml", "milliliter", "milliliters", "millilitre", "millilitres"] {
            map.insert(alias, Unit::Milliliter);
        }
        for alias in ["l", "liter", "liters", "litre", "litres"] {
            map.insert(alias, Unit::Liter);
        }

        // Weight units
        for alias in ["g", "gr", "gram", "grams", "gramme", "grammes"] {
            map.insert(alias, Unit::Gram);
        }
        for alias in ["kg", "kilo", "kilos", "kilogram", "kilograms", "kilogramme", "kilogrammes"] {
            map.insert(alias, Unit::Kilogram);
        }
        for alias in ["oz", "ounce", "ounces"] {
            map.insert(alias, Unit::Ounce);
        }
        for alias in ["lb", "lbs", "pound", "pounds"] {
            map.insert(alias, Unit::Pound);
        }

        // Count units
        for alias in ["piece", "pieces", "pc", "pcs", "pièce", "pièces"] {
            map.insert(alias, Unit::Piece);
        }
        for alias in ["clove", "cloves", "gousse", "gousses"] {
            map.insert(alias, Unit::Clove);
        }
        for alias in ["slice", "slices"] {
            map.insert(alias, Unit::Slice);
        }
        for alias in ["can", "cans", "tin", "tins", "boîte", "boîtes"] {
            map.insert(alias, Unit::Can);
        }
        for alias in ["package", "packages", "pkg", "pkgs", "paquet", "paquets"] {
            map.insert(alias, Unit::Package);
        }
        for alias in ["bottle", "bottles", "bouteille", "bouteilles"] {
            map.insert(alias, Unit::Bottle);
        }

        // Vague units
        for alias in ["pinch", "pinches", "pincée", "pincées"] {
            map.insert(alias, Unit::Pinch);
        }
        for alias in ["dash", "dashes"] {
            map.insert(alias, Unit::Dash);
        }
        for alias in ["to taste", "au goût", "à goût"] {
            map.insert(alias, Unit::ToTaste);
        }

        map
    };
}

/// Longest alias in the vocabulary, in words ("cuillères à soupe")
pub const MAX_UNIT_WORDS: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_quantity_forms() {
        let cases = [
            ("2 cups flour", "2", None),
            ("2 1/2 cups flour", "2 1/2", None),
            ("1/2 tsp salt", "1/2", None),
            ("1.5 kg potatoes", "1.5", None),
            ("1,5 kg pommes", "1,5", None),
            ("500g butter", "500", None),
            ("1-2 tsp salt", "1", Some("2")),
            ("1 to 2 tbsp oil", "1", Some("2")),
            ("2 – 3 cloves garlic", "2", Some("3")),
        ];

        for (text, first, second) in cases {
            let captures = LEADING_QUANTITY_REGEX
                .captures(text)
                .unwrap_or_else(|| panic!("no quantity in '{}'", text));
            assert_eq!(&captures["first"], first, "first for '{}'", text);
            assert_eq!(
                captures.name("second").map(|m| m.as_str()),
                second,
                "second for '{}'",
                text
            );
        }
    }

    #[test]
    fn test_range_separator_does_not_eat_words() {
        let captures = LEADING_QUANTITY_REGEX.captures("2 tomatoes").unwrap();
        assert_eq!(&captures[0], "2");
        assert!(captures.name("second").is_none());
    }

    #[test]
    fn test_no_leading_quantity() {
        assert!(LEADING_QUANTITY_REGEX.captures("salt to taste").is_none());
        assert!(LEADING_QUANTITY_REGEX.captures("a pinch of salt").is_none());
    }

    #[test]
    fn test_full_quantity_regex() {
        assert!(FULL_QUANTITY_REGEX.is_match("1 1/2"));
        assert!(FULL_QUANTITY_REGEX.is_match(" 3 "));
        assert!(FULL_QUANTITY_REGEX.is_match("2-3"));
        assert!(!FULL_QUANTITY_REGEX.is_match("some"));
        assert!(!FULL_QUANTITY_REGEX.is_match("2 cups"));
    }

    #[test]
    fn test_negative_quantity_regex() {
        assert!(NEGATIVE_QUANTITY_REGEX.is_match("-2 cups sugar"));
        assert!(!NEGATIVE_QUANTITY_REGEX.is_match("2 cups sugar"));
    }

    #[test]
    fn test_alias_table_covers_vocabulary() {
        for alias in ["tsp", "tbsp", "cup", "ml", "l", "g", "kg", "oz", "lb", "piece", "clove", "slice", "can", "package", "pinch", "dash", "to taste"] {
            assert!(UNIT_ALIASES.contains_key(alias), "missing alias '{}'", alias);
        }
        assert!(UNIT_ALIASES
            .keys()
            .all(|alias| alias.split_whitespace().count() <= MAX_UNIT_WORDS));
    }
}
