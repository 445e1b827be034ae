//! URL-encoded form payloads and their coercion into typed fields.
//!
//! HTML forms submit every value as text. Text fields are stored as given;
//! `extinct` and `lifeExpectancy` are coerced explicitly and rejected when
//! they cannot be read as a boolean or a finite number. An empty `extinct`
//! or `lifeExpectancy` counts as absent.

use menagerie_core::AnimalFields;
use serde::Deserialize;
use thiserror::Error;

/// Coercion failures for submitted form values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("`{field}` must be a boolean, got `{value}`")]
    InvalidFlag { field: &'static str, value: String },

    #[error("`{field}` must be a finite number, got `{value}`")]
    InvalidNumber { field: &'static str, value: String },
}

/// Raw animal form as posted by the create and edit views.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimalForm {
    pub species: Option<String>,
    pub extinct: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "lifeExpectancy", alias = "life_expectancy")]
    pub life_expectancy: Option<String>,
}

impl AnimalForm {
    /// Converts the raw form into typed fields.
    pub fn into_fields(self) -> Result<AnimalFields, FormError> {
        Ok(AnimalFields {
            species: self.species,
            extinct: parse_flag("extinct", self.extinct.as_deref())?,
            location: self.location,
            life_expectancy: parse_number("lifeExpectancy", self.life_expectancy.as_deref())?,
        })
    }
}

fn parse_flag(field: &'static str, raw: Option<&str>) -> Result<Option<bool>, FormError> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(Some(true)),
        "false" | "off" | "no" | "0" => Ok(Some(false)),
        _ => Err(FormError::InvalidFlag {
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_number(field: &'static str, raw: Option<&str>) -> Result<Option<f64>, FormError> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(FormError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}
