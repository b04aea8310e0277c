//! # Scaling Error Types Module
//!
//! This module defines the error types used throughout the scaling pipeline.
//! Parse and conversion errors are recovered per ingredient; scaling errors reject
//! the whole request before any ingredient is touched.

use serde::{Deserialize, Serialize};

/// An ingredient entry could not be decomposed into quantity, unit and name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ParseError {
    /// Blank entry
    Empty,
    /// Nothing alphabetic left to name the ingredient
    NoIngredientName(String),
    /// A quantity token that does not read as a number
    InvalidNumber(String),
    /// A fraction with a zero denominator
    DivisionByZero,
    /// A quantity of zero or less
    NonPositiveQuantity(f64),
    /// An entry that is neither a text line nor an ingredient object
    InvalidEntry(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => write!(f, "Ingredient entry is empty"),
            ParseError::NoIngredientName(text) => write!(f, "No ingredient name found in '{text}'"),
            ParseError::InvalidNumber(text) => write!(f, "Invalid number format: '{text}'"),
            ParseError::DivisionByZero => write!(f, "Division by zero in fraction"),
            ParseError::NonPositiveQuantity(value) => {
                write!(f, "Quantity must be greater than zero, got {value}")
            }
            ParseError::InvalidEntry(text) => write!(f, "Unreadable ingredient entry: {text}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A unit could not be re-expressed by the normalizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ConversionError {
    /// The unit token is not in the conversion table
    UnknownUnit(String),
    /// The quantity is not a finite positive number
    NotConvertible(String),
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::UnknownUnit(unit) => write!(f, "Unknown unit: {unit}"),
            ConversionError::NotConvertible(msg) => write!(f, "Cannot convert quantity: {msg}"),
        }
    }
}

impl std::error::Error for ConversionError {}

/// Top-level input rejected before scaling starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalingError {
    /// The recipe's own serving count is not positive
    InvalidOriginalServings { servings: u32 },
    /// The requested serving count is outside the accepted bound
    TargetOutOfRange { target: i64, min: u32, max: u32 },
    /// The computed factor is not a finite positive number
    InvalidScaleFactor { factor: f64 },
}

impl std::fmt::Display for ScalingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalingError::InvalidOriginalServings { servings } => {
                write!(f, "Recipe servings must be positive, got {servings}")
            }
            ScalingError::TargetOutOfRange { target, min, max } => {
                write!(f, "Target servings must be between {min} and {max}, got {target}")
            }
            ScalingError::InvalidScaleFactor { factor } => {
                write!(f, "Scale factor must be a finite positive number, got {factor}")
            }
        }
    }
}

impl std::error::Error for ScalingError {}
