//! Name-format checks for project and module names.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

static MINUS_NAME_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("static pattern is valid"));

const MINUS_NAME_ID_RULE: &str =
    "must consist of lowercase letters, digits and '-', and start and end with a letter or digit";

/// Check a dash-separated lowercase identifier such as `test-project1`.
pub fn validate_minus_name_id(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if MINUS_NAME_ID.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidName {
            field,
            value: value.to_string(),
            reason: MINUS_NAME_ID_RULE,
        })
    }
}
