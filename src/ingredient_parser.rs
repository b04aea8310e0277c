//! # Ingredient Parser
//!
//! This module turns one ingredient entry, free text or structured object, into a
//! [`ParsedIngredient`] carrying a numeric quantity, a unit and a name.
//!
//! ## Features
//!
//! - Integers, decimals (`1.5`, `1,5`), fractions (`1/2`), mixed numbers (`2 1/2`)
//!   and unicode fractions (`½`, `1½`)
//! - Ranges (`1-2`, `1 to 2`), resolved to their midpoint
//! - Article quantities in front of a unit (`a pinch of salt`)
//! - Multi-word and French unit spellings (`fl oz`, `cuillères à soupe`)
//! - Entries without a quantity (`salt to taste`) kept as unscalable
//!
//! ## Usage
//!
//! ```rust
//! use recipe_scaling::ingredient_parser::parse_ingredient;
//! use recipe_scaling::ingredient_model::IngredientInput;
//! use recipe_scaling::measurement_types::Unit;
//!
//! let parsed = parse_ingredient(&IngredientInput::from("2 1/2 cups flour"));
//! assert_eq!(parsed.quantity, 2.5);
//! assert_eq!(parsed.unit, Unit::Cup);
//! assert_eq!(parsed.name, "flour");
//! ```

use crate::ingredient_model::{Amount, IngredientInput, ParsedIngredient, StructuredIngredient};
use crate::measurement_patterns::{
    ARTICLE_QUANTITIES, ATTACHED_FRACTION_REGEX, CONNECTOR_PREFIXES, FULL_QUANTITY_REGEX,
    LEADING_QUANTITY_REGEX, MAX_UNIT_WORDS, MEASURE_WORDS, NEGATIVE_QUANTITY_REGEX,
    UNICODE_FRACTIONS,
};
use crate::measurement_types::Unit;
use crate::scaling_errors::ParseError;
use log::{debug, trace, warn};
use regex::Captures;

/// Parse an ingredient entry, never failing.
///
/// A failed parse yields the fallback entry (quantity 1, unit piece, the source
/// text as name) with `error` set, so every input produces exactly one result.
pub fn parse_ingredient(input: &IngredientInput) -> ParsedIngredient {
    match try_parse_ingredient(input) {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!("Could not parse ingredient '{}': {}", input.describe(), error);
            ParsedIngredient::fallback(input.clone(), error)
        }
    }
}

/// Parse an ingredient entry, reporting failures to the caller
pub fn try_parse_ingredient(input: &IngredientInput) -> Result<ParsedIngredient, ParseError> {
    let parsed = match input {
        IngredientInput::Text(text) => parse_ingredient_text(text)?,
        IngredientInput::Structured(structured) => parse_structured_ingredient(structured)?,
        IngredientInput::Invalid(value) => {
            return Err(ParseError::InvalidEntry(value.to_string()));
        }
    };

    debug!(
        "Parsed ingredient '{}' -> quantity={} unit={} name='{}' scalable={}",
        input.describe(),
        parsed.quantity,
        parsed.unit,
        parsed.name,
        parsed.scalable
    );
    Ok(parsed)
}

/// Parse a free-text ingredient line such as "2 1/2 cups flour"
pub fn parse_ingredient_text(text: &str) -> Result<ParsedIngredient, ParseError> {
    let original = IngredientInput::Text(text.to_string());
    let normalized = normalize_text(text);
    trace!("Normalized ingredient text: '{}' -> '{}'", text, normalized);

    if normalized.is_empty() {
        return Err(ParseError::Empty);
    }
    if !normalized.chars().any(char::is_alphabetic) {
        return Err(ParseError::NoIngredientName(normalized));
    }
    if NEGATIVE_QUANTITY_REGEX.is_match(&normalized) {
        let unsigned = normalized.trim_start_matches(['-', '−']).trim_start();
        let value = LEADING_QUANTITY_REGEX
            .captures(unsigned)
            .map(|caps| parse_number(&caps["first"]))
            .transpose()?
            .unwrap_or(0.0);
        return Err(ParseError::NonPositiveQuantity(-value));
    }

    if let Some(captures) = LEADING_QUANTITY_REGEX.captures(&normalized) {
        let (quantity, range) = resolve_range(&captures)?;
        if quantity <= 0.0 {
            return Err(ParseError::NonPositiveQuantity(quantity));
        }

        let matched_end = captures.get(0).map_or(0, |m| m.end());
        let (unit, rest) = split_unit(&normalized[matched_end..]);
        let unit = unit.unwrap_or(Unit::Piece);
        let name = extract_name(rest, &normalized)?;
        let scalable = unit.is_scalable();

        return Ok(ParsedIngredient {
            quantity,
            unit,
            name,
            original,
            range,
            scalable,
            error: None,
        });
    }

    // "a pinch of salt": an article only counts as a quantity in front of a unit
    if let Some((word, rest)) = normalized.split_once(' ') {
        if ARTICLE_QUANTITIES.contains(&word.to_lowercase().as_str()) {
            if let (Some(unit), rest) = split_unit(rest) {
                let name = extract_name(rest, &normalized)?;
                let scalable = unit.is_scalable();
                return Ok(ParsedIngredient {
                    quantity: 1.0,
                    unit,
                    name,
                    original,
                    range: None,
                    scalable,
                    error: None,
                });
            }
        }
    }

    debug!("No leading quantity in '{}', keeping it unscalable", normalized);
    Ok(ParsedIngredient {
        quantity: 1.0,
        unit: Unit::Piece,
        name: normalized,
        original,
        range: None,
        scalable: false,
        error: None,
    })
}

/// Map a structured `{name, unit, amount}` entry directly onto the parsed form.
///
/// The unit is taken as given (unknown tokens are kept verbatim); an amount that
/// does not read as a number defaults to 1.
pub fn parse_structured_ingredient(
    structured: &StructuredIngredient,
) -> Result<ParsedIngredient, ParseError> {
    let original = IngredientInput::Structured(structured.clone());
    let name = structured.name.split_whitespace().collect::<Vec<_>>().join(" ");
    if !name.chars().any(char::is_alphabetic) {
        return Err(ParseError::NoIngredientName(structured.to_string()));
    }

    let unit = structured
        .unit
        .as_deref()
        .map(Unit::from_token)
        .unwrap_or(Unit::Piece);

    let (quantity, range) = match &structured.amount {
        Some(Amount::Number(value)) if value.is_finite() => (*value, None),
        Some(Amount::Text(text)) if !text.trim().is_empty() => match parse_quantity(text) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(
                    "Amount '{}' for '{}' is not a number ({}), defaulting to 1",
                    text, name, error
                );
                (1.0, None)
            }
        },
        _ => (1.0, None),
    };

    if quantity <= 0.0 {
        return Err(ParseError::NonPositiveQuantity(quantity));
    }

    let scalable = unit.is_scalable();
    Ok(ParsedIngredient {
        quantity,
        unit,
        name,
        original,
        range,
        scalable,
        error: None,
    })
}

/// Parse a complete quantity string ("2 1/2", "½", "1-2").
///
/// Returns the value used for scaling and, for ranges, both ends.
///
/// # Examples
///
/// ```rust
/// use recipe_scaling::ingredient_parser::parse_quantity;
///
/// assert_eq!(parse_quantity("2 1/2").unwrap(), (2.5, None));
/// assert_eq!(parse_quantity("1-2").unwrap(), (1.5, Some((1.0, 2.0))));
/// assert!(parse_quantity("some").is_err());
/// ```
pub fn parse_quantity(text: &str) -> Result<(f64, Option<(f64, f64)>), ParseError> {
    let normalized = normalize_text(text);
    let captures = FULL_QUANTITY_REGEX
        .captures(&normalized)
        .ok_or_else(|| ParseError::InvalidNumber(normalized.clone()))?;

    resolve_range(&captures)
}

/// Ranges resolve to their midpoint; the ends are kept alongside.
///
/// "1-1/2" is the mixed number 1 1/2, not a range. Any other pair must rise,
/// so "3-2" is rejected rather than averaged.
fn resolve_range(captures: &Captures) -> Result<(f64, Option<(f64, f64)>), ParseError> {
    let first_token = &captures["first"];
    let first = parse_number(first_token)?;
    let Some(second_match) = captures.name("second") else {
        return Ok((first, None));
    };
    let second_token = second_match.as_str();
    let second = parse_number(second_token)?;

    let matched = captures.get(0).map_or("", |m| m.as_str());
    let offset = captures.get(0).map_or(0, |m| m.start());
    let first_end = captures.name("first").map_or(0, |m| m.end());
    let separator = matched
        .get(first_end - offset..second_match.start() - offset)
        .unwrap_or("");
    let hyphenated_fraction = separator == "-"
        && first_token.chars().all(|c| c.is_ascii_digit())
        && second_token.contains('/')
        && second < 1.0;
    if hyphenated_fraction {
        return Ok((first + second, None));
    }

    if second <= first {
        return Err(ParseError::InvalidNumber(matched.trim().to_string()));
    }
    Ok(((first + second) / 2.0, Some((first, second))))
}

/// Parse one number token matched by `NUMBER_PATTERN`
fn parse_number(token: &str) -> Result<f64, ParseError> {
    let token = token.trim();
    let invalid = || ParseError::InvalidNumber(token.to_string());

    if let Some((head, denominator)) = token.split_once('/') {
        let (whole, numerator) = match head.trim().split_once(' ') {
            Some((whole, numerator)) => (whole.trim(), numerator.trim()),
            None => ("0", head.trim()),
        };
        let whole: f64 = whole.parse().map_err(|_| invalid())?;
        let numerator: f64 = numerator.parse().map_err(|_| invalid())?;
        let denominator: f64 = denominator.trim().parse().map_err(|_| invalid())?;
        if denominator == 0.0 {
            return Err(ParseError::DivisionByZero);
        }
        return Ok(whole + numerator / denominator);
    }

    token.replace(',', ".").parse::<f64>().map_err(|_| invalid())
}

/// Unify fraction glyphs and collapse whitespace
fn normalize_text(text: &str) -> String {
    let text = text.replace('⁄', "/");
    let mut text = ATTACHED_FRACTION_REGEX.replace_all(&text, "$1 $2").into_owned();
    for (glyph, fraction) in UNICODE_FRACTIONS {
        if text.contains(*glyph) {
            text = text.replace(*glyph, &format!(" {fraction} "));
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Take the longest unit spelling off the front of `rest`.
///
/// Returns the unit (if any) and the remaining text.
fn split_unit(rest: &str) -> (Option<Unit>, &str) {
    let rest = rest.trim_start();
    let words: Vec<&str> = rest.split(' ').take(MAX_UNIT_WORDS).collect();

    for count in (1..=words.len()).rev() {
        let candidate_len = words[..count].iter().map(|w| w.len()).sum::<usize>() + count - 1;
        let candidate = &rest[..candidate_len];
        if let Some(unit) = Unit::lookup(candidate) {
            trace!("Matched unit '{}' as {}", candidate, unit);
            return (Some(unit), &rest[candidate_len..]);
        }
    }

    let first = words.first().copied().unwrap_or_default();
    let lowered = first.to_lowercase();
    if MEASURE_WORDS.contains(&lowered.trim_end_matches(['.', ','])) {
        trace!("Keeping measure word '{}' as an opaque unit", first);
        return (Some(Unit::Other(first.to_string())), &rest[first.len()..]);
    }

    (None, rest)
}

/// Name left after quantity and unit, minus one leading connector word
fn extract_name(rest: &str, normalized: &str) -> Result<String, ParseError> {
    let name = strip_connector(rest.trim()).trim();
    if !name.chars().any(char::is_alphabetic) {
        return Err(ParseError::NoIngredientName(normalized.to_string()));
    }
    Ok(name.to_string())
}

fn strip_connector(name: &str) -> &str {
    for prefix in CONNECTOR_PREFIXES {
        let matches = name
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        if matches && name.len() > prefix.len() {
            trace!("Removed connector '{}' from '{}'", prefix.trim(), name);
            return &name[prefix.len()..];
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedIngredient {
        parse_ingredient_text(text).unwrap()
    }

    #[test]
    fn test_parse_simple_ingredient() {
        let result = parse("2 cups flour");
        assert_eq!(result.quantity, 2.0);
        assert_eq!(result.unit, Unit::Cup);
        assert_eq!(result.name, "flour");
        assert!(result.scalable);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_parse_fraction_ingredient() {
        let result = parse("1/2 cup sugar");
        assert_eq!(result.quantity, 0.5);
        assert_eq!(result.name, "sugar");

        let result = parse("2 1/4 cups butter");
        assert_eq!(result.quantity, 2.25);
        assert_eq!(result.unit, Unit::Cup);
    }

    #[test]
    fn test_parse_unicode_fractions() {
        assert_eq!(parse("½ cup milk").quantity, 0.5);
        assert_eq!(parse("1½ cups milk").quantity, 1.5);
        assert_eq!(parse("1 ¼ tsp salt").quantity, 1.25);
        assert_eq!(parse("1⁄3 cup oil").unit, Unit::Cup);
    }

    #[test]
    fn test_parse_range_uses_midpoint() {
        let result = parse("1-2 tsp salt");
        assert_eq!(result.quantity, 1.5);
        assert_eq!(result.range, Some((1.0, 2.0)));
        assert_eq!(result.unit, Unit::Teaspoon);
        assert_eq!(result.name, "salt");

        let result = parse("2 to 3 tbsp olive oil");
        assert_eq!(result.quantity, 2.5);
        assert_eq!(result.name, "olive oil");
    }

    #[test]
    fn test_parse_decimal_and_attached_unit() {
        let result = parse("1.5 kg potatoes");
        assert_eq!(result.quantity, 1.5);
        assert_eq!(result.unit, Unit::Kilogram);

        let result = parse("500g butter");
        assert_eq!(result.quantity, 500.0);
        assert_eq!(result.unit, Unit::Gram);
        assert_eq!(result.name, "butter");

        assert_eq!(parse("1,5 l lait").quantity, 1.5);
    }

    #[test]
    fn test_parse_multi_word_units() {
        let result = parse("4 fl oz cream");
        assert_eq!(result.unit, Unit::FluidOunce);
        assert_eq!(result.name, "cream");

        let result = parse("2 cuillères à soupe de sucre");
        assert_eq!(result.unit, Unit::Tablespoon);
        assert_eq!(result.name, "sucre");
    }

    #[test]
    fn test_parse_spoon_abbreviations_are_case_sensitive() {
        assert_eq!(parse("1 T butter").unit, Unit::Tablespoon);
        assert_eq!(parse("1 t vanilla").unit, Unit::Teaspoon);
        assert_eq!(parse("2 tbsp. honey").unit, Unit::Tablespoon);
    }

    #[test]
    fn test_parse_without_unit() {
        let result = parse("3 eggs");
        assert_eq!(result.quantity, 3.0);
        assert_eq!(result.unit, Unit::Piece);
        assert_eq!(result.name, "eggs");

        let result = parse("2 tomatoes");
        assert_eq!(result.quantity, 2.0);
        assert_eq!(result.name, "tomatoes");
    }

    #[test]
    fn test_parse_measure_word_kept_verbatim() {
        let result = parse("2 sprigs thyme");
        assert_eq!(result.unit, Unit::Other("sprigs".to_string()));
        assert_eq!(result.name, "thyme");
    }

    #[test]
    fn test_parse_connector_removed() {
        assert_eq!(parse("2 cups of flour").name, "flour");
        assert_eq!(parse("250 g de farine").name, "farine");
        assert_eq!(parse("1 l d'eau").name, "eau");
    }

    #[test]
    fn test_parse_article_quantity() {
        let result = parse("a pinch of cinnamon");
        assert_eq!(result.quantity, 1.0);
        assert_eq!(result.unit, Unit::Pinch);
        assert_eq!(result.name, "cinnamon");
        assert!(result.scalable);

        // An article without a unit is just text
        let result = parse("an onion");
        assert!(!result.scalable);
        assert_eq!(result.name, "an onion");
    }

    #[test]
    fn test_parse_no_quantity_is_unscalable() {
        let result = parse("salt to taste");
        assert_eq!(result.quantity, 1.0);
        assert_eq!(result.unit, Unit::Piece);
        assert_eq!(result.name, "salt to taste");
        assert!(!result.scalable);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_parse_to_taste_unit_is_unscalable() {
        let result = parse("1 to taste pepper");
        assert_eq!(result.unit, Unit::ToTaste);
        assert!(!result.scalable);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_ingredient_text(""), Err(ParseError::Empty));
        assert_eq!(parse_ingredient_text("   "), Err(ParseError::Empty));
        assert!(matches!(
            parse_ingredient_text("2 1/2"),
            Err(ParseError::NoIngredientName(_))
        ));
        assert!(matches!(
            parse_ingredient_text("2 cups"),
            Err(ParseError::NoIngredientName(_))
        ));
        assert_eq!(
            parse_ingredient_text("1/0 cup sugar"),
            Err(ParseError::DivisionByZero)
        );
        assert_eq!(
            parse_ingredient_text("0 cups sugar"),
            Err(ParseError::NonPositiveQuantity(0.0))
        );
        assert_eq!(
            parse_ingredient_text("-2 cups sugar"),
            Err(ParseError::NonPositiveQuantity(-2.0))
        );
    }

    #[test]
    fn test_parse_ingredient_falls_back() {
        let input = IngredientInput::from("");
        let parsed = parse_ingredient(&input);
        assert_eq!(parsed.quantity, 1.0);
        assert_eq!(parsed.unit, Unit::Piece);
        assert_eq!(parsed.error, Some(ParseError::Empty));
        assert_eq!(parsed.original, input);
    }

    #[test]
    fn test_parse_structured() {
        let structured = StructuredIngredient::new("flour", Some("cups"), Some(Amount::Text("2 1/2".into())));
        let parsed = parse_ingredient(&IngredientInput::from(structured));
        assert_eq!(parsed.quantity, 2.5);
        assert_eq!(parsed.unit, Unit::Cup);
        assert_eq!(parsed.name, "flour");

        let structured = StructuredIngredient::new("thyme", Some("sprigs"), Some(Amount::Number(3.0)));
        let parsed = parse_ingredient(&IngredientInput::from(structured));
        assert_eq!(parsed.unit, Unit::Other("sprigs".to_string()));
        assert_eq!(parsed.quantity, 3.0);
    }

    #[test]
    fn test_parse_structured_defaults() {
        let structured = StructuredIngredient::new("eggs", None, Some(Amount::Text("a few".into())));
        let parsed = parse_structured_ingredient(&structured).unwrap();
        assert_eq!(parsed.quantity, 1.0);
        assert_eq!(parsed.unit, Unit::Piece);

        let structured = StructuredIngredient::new("", Some("cup"), Some(Amount::Number(1.0)));
        assert!(matches!(
            parse_structured_ingredient(&structured),
            Err(ParseError::NoIngredientName(_))
        ));

        let structured = StructuredIngredient::new("sugar", Some("cup"), Some(Amount::Number(-1.0)));
        assert_eq!(
            parse_structured_ingredient(&structured),
            Err(ParseError::NonPositiveQuantity(-1.0))
        );
    }

    #[test]
    fn test_quantity_parsing() {
        assert_eq!(parse_quantity("2.5").unwrap(), (2.5, None));
        assert_eq!(parse_quantity("1/2").unwrap(), (0.5, None));
        assert_eq!(parse_quantity("¾").unwrap(), (0.75, None));
        assert_eq!(parse_quantity("2-3").unwrap(), (2.5, Some((2.0, 3.0))));
        assert!(matches!(parse_quantity("to taste"), Err(ParseError::InvalidNumber(_))));
        assert_eq!(parse_quantity("3/0"), Err(ParseError::DivisionByZero));
    }

    #[test]
    fn test_hyphenated_mixed_number() {
        assert_eq!(parse_quantity("1-1/2").unwrap(), (1.5, None));
        assert_eq!(parse_quantity("2-3/4").unwrap(), (2.75, None));
        assert_eq!(parse_quantity("1/2-1").unwrap(), (0.75, Some((0.5, 1.0))));

        let result = parse("1-1/2 cups flour");
        assert_eq!((result.quantity, result.range), (1.5, None));
        assert_eq!(result.unit, Unit::Cup);
    }

    #[test]
    fn test_falling_range_is_rejected() {
        assert_eq!(parse_quantity("3-2"), Err(ParseError::InvalidNumber("3-2".to_string())));
        assert_eq!(parse_quantity("2 to 2"), Err(ParseError::InvalidNumber("2 to 2".to_string())));
        assert_eq!(parse_quantity("1 - 1/2"), Err(ParseError::InvalidNumber("1 - 1/2".to_string())));
    }

    #[test]
    fn test_strip_connector_respects_char_boundaries() {
        assert_eq!(strip_connector("œufs"), "œufs");
        assert_eq!(strip_connector("of"), "of");
        assert_eq!(strip_connector("Of butter"), "butter");
    }
}
