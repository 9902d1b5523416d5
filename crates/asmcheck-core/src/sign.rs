//! Sign-class equivalence for comparison functions.
//!
//! Comparison functions are judged on the sign of their result, never its
//! magnitude: a candidate returning -1 where the reference returns -40 is
//! conformant.

use std::fmt;

/// Three-way class of a comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignClass {
    Negative,
    Zero,
    Positive,
}

impl SignClass {
    #[must_use]
    pub fn of(value: i32) -> Self {
        match value.cmp(&0) {
            std::cmp::Ordering::Less => SignClass::Negative,
            std::cmp::Ordering::Equal => SignClass::Zero,
            std::cmp::Ordering::Greater => SignClass::Positive,
        }
    }
}

impl fmt::Display for SignClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            SignClass::Negative => "negative",
            SignClass::Zero => "zero",
            SignClass::Positive => "positive",
        };
        f.write_str(word)
    }
}

/// True when two comparison results fall in the same sign class.
#[must_use]
pub fn sign_agreement(a: i32, b: i32) -> bool {
    SignClass::of(a) == SignClass::of(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_class_of() {
        assert_eq!(SignClass::of(-40), SignClass::Negative);
        assert_eq!(SignClass::of(0), SignClass::Zero);
        assert_eq!(SignClass::of(7), SignClass::Positive);
    }

    #[test]
    fn test_sign_agreement_ignores_magnitude() {
        assert!(sign_agreement(-1, -40));
        assert!(sign_agreement(19, 1));
        assert!(sign_agreement(0, 0));
    }

    #[test]
    fn test_sign_agreement_rejects_class_mismatch() {
        assert!(!sign_agreement(-1, 0));
        assert!(!sign_agreement(-1, 1));
        assert!(!sign_agreement(0, 5));
    }

    #[test]
    fn test_sign_class_display() {
        assert_eq!(SignClass::of(-3).to_string(), "negative");
        assert_eq!(SignClass::of(0).to_string(), "zero");
        assert_eq!(SignClass::of(3).to_string(), "positive");
    }
}
