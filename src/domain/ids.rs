use crate::error::{DocumentError, Result};
use rand::Rng;
use rand::distributions::Alphanumeric;
use regex::Regex;
use std::sync::LazyLock;

pub const ID_LENGTH: usize = 10;

static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^0-9]*)([0-9]+)$").expect("static regex is valid")
});

/// Opaque record id: random ASCII letters and digits.
pub fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LENGTH)
        .map(char::from)
        .collect()
}

/// Increments the trailing number of a document code, keeping its zero padding.
///
/// `"Q-009"` becomes `"Q-010"` and `"INV99"` becomes `"INV100"`.
pub fn increment_code(code: &str) -> Result<String> {
    let caps = CODE_REGEX
        .captures(code)
        .ok_or_else(|| DocumentError::InvalidCode(code.to_string()))?;
    let prefix = &caps[1];
    let digits = &caps[2];

    let next = digits
        .parse::<u128>()
        .ok()
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| DocumentError::InvalidCode(code.to_string()))?;

    Ok(format!("{prefix}{next:0>width$}", width = digits.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn test_increment_code() {
        assert_eq!(increment_code("Q-009").unwrap(), "Q-010");
        assert_eq!(increment_code("INV99").unwrap(), "INV100");
        assert_eq!(increment_code("0001").unwrap(), "0002");
        assert_eq!(increment_code("Q\u{0663}-1").unwrap(), "Q\u{0663}-2");
    }

    #[test]
    fn test_increment_code_requires_trailing_digits() {
        assert!(matches!(
            increment_code("Q-1A"),
            Err(DocumentError::InvalidCode(_))
        ));
        assert!(matches!(increment_code(""), Err(DocumentError::InvalidCode(_))));
    }
}
