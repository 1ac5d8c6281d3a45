//! JSON Schema validation for regions documents.
//!
//! The schema (`schemas/regions-document.json`, Draft 7) is embedded at
//! compile time. It requires a top-level object whose values are arrays of
//! settlement objects with exactly the nine string fields.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use regions::{is_valid_document, validate_document};
//!
//! let doc = json!({ "Mazowieckie": [] });
//! assert!(is_valid_document(&doc));
//!
//! let bad = json!({ "Mazowieckie": [{ "identifier": 101 }] });
//! assert!(validate_document(&bad).is_err());
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::{ConvertError, ConvertResult};
use crate::models::RegionsDocument;

static DOCUMENT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/regions-document.json"))
        .expect("Invalid embedded schema")
});

/// Validate a JSON value against a schema.
///
/// Returns every validation error message when invalid.
fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick true/false check against a schema.
fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate a JSON value against the regions document schema.
pub fn validate_document(data: &Value) -> Result<(), Vec<String>> {
    validate(&DOCUMENT_SCHEMA, data)
}

/// Quick check against the regions document schema.
pub fn is_valid_document(data: &Value) -> bool {
    is_valid(&DOCUMENT_SCHEMA, data)
}

/// Validate a typed document as it would be written.
pub fn check_document(document: &RegionsDocument) -> ConvertResult<()> {
    let value = serde_json::to_value(document)?;
    validate_document(&value).map_err(ConvertError::InvalidDocument)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::group_str;
    use serde_json::json;

    fn warszawa() -> Value {
        json!({
            "identifier": "0101",
            "name": "Warszawa",
            "powiat": "warszawski",
            "area_ha": "5177",
            "area_km": "51.77",
            "total_population": "1790658",
            "population_per_km": "345832",
            "ranking_in_area_in_ha": "1",
            "ranking_in_population": "1"
        })
    }

    #[test]
    fn test_valid_document() {
        let doc = json!({ "Mazowieckie": [warszawa()], "Lubelskie": [] });
        assert!(is_valid_document(&doc));
        assert!(validate_document(&doc).is_ok());
    }

    #[test]
    fn test_numeric_field_rejected() {
        let mut settlement = warszawa();
        settlement["area_km"] = json!(51.77);
        let doc = json!({ "Mazowieckie": [settlement] });
        assert!(!is_valid_document(&doc));
    }

    #[test]
    fn test_missing_and_extra_fields_rejected() {
        let mut settlement = warszawa();
        settlement.as_object_mut().unwrap().remove("powiat");
        settlement["gmina"] = json!("x");
        let errors = validate_document(&json!({ "Mazowieckie": [settlement] })).unwrap_err();
        assert!(errors.len() >= 2);
    }

    #[test]
    fn test_top_level_array_rejected() {
        assert!(!is_valid_document(&json!([warszawa()])));
    }

    #[test]
    fn test_grouped_output_validates() {
        let input = ",Mazowieckie (województwo)\n0101,Warszawa,warszawski,5177,51.77,1790658,345832,1,1\n,Lubelskie\n";
        let grouped = group_str(input, ',').unwrap();
        assert!(check_document(&grouped.document).is_ok());
    }
}
