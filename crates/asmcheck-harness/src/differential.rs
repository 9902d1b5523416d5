//! Equivalence rules for the differential executor.
//!
//! Each rule compares one candidate observation against the reference
//! observation for the same input and yields a [`CaseOutcome`] whose detail
//! names both values on mismatch.

use std::ffi::{CStr, c_char, c_int};

use asmcheck_core::sign::{SignClass, sign_agreement};

use crate::case::CaseOutcome;

/// Exact equality: lengths, counts, return codes, byte-for-byte content.
#[must_use]
pub fn expect_eq<T>(label: &str, reference: T, candidate: T) -> CaseOutcome
where
    T: PartialEq + std::fmt::Display,
{
    if candidate == reference {
        CaseOutcome::pass()
    } else {
        CaseOutcome::mismatch(format!("({label}: expected {reference}, got {candidate})"))
    }
}

/// Sign-class agreement for comparison functions: negative/zero/positive
/// class must match, magnitude may differ.
#[must_use]
pub fn expect_sign_class(label: &str, reference: c_int, candidate: c_int) -> CaseOutcome {
    if sign_agreement(reference, candidate) {
        CaseOutcome::pass()
    } else {
        CaseOutcome::mismatch(format!(
            "({label}: expected {}, got {} ({candidate}))",
            SignClass::of(reference),
            SignClass::of(candidate)
        ))
    }
}

/// Duplication rule: the copy must live at a different address and carry
/// identical bytes.
///
/// # Safety
///
/// Both pointers, when non-null, must be valid NUL-terminated strings.
#[must_use]
pub unsafe fn expect_distinct_copy(
    label: &str,
    original: *const c_char,
    duplicate: *const c_char,
) -> CaseOutcome {
    if duplicate.is_null() {
        return CaseOutcome::mismatch(format!("({label}: candidate returned NULL)"));
    }
    if std::ptr::eq(duplicate, original) {
        return CaseOutcome::mismatch(format!(
            "({label}: duplicate aliases the original allocation)"
        ));
    }
    let original_bytes = unsafe { CStr::from_ptr(original) }.to_bytes();
    let duplicate_bytes = unsafe { CStr::from_ptr(duplicate) }.to_bytes();
    if original_bytes == duplicate_bytes {
        CaseOutcome::pass()
    } else {
        CaseOutcome::mismatch(format!(
            "({label}: expected {:?}, got {:?})",
            String::from_utf8_lossy(original_bytes),
            String::from_utf8_lossy(duplicate_bytes)
        ))
    }
}

/// Joint errno-and-return rule for I/O error paths.
#[must_use]
pub fn expect_errno_return(
    label: &str,
    reference: (isize, c_int),
    candidate: (isize, c_int),
) -> CaseOutcome {
    if candidate == reference {
        CaseOutcome::pass()
    } else {
        CaseOutcome::mismatch(format!(
            "({label}: expected {} (errno {}), got {} (errno {}))",
            reference.0, reference.1, candidate.0, candidate.1
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::FailureKind;

    #[test]
    fn exact_rule_reports_both_values() {
        assert!(expect_eq("simple string", 5usize, 5).passed());
        let out = expect_eq("simple string", 5usize, 4);
        assert_eq!(out.failure(), Some(FailureKind::Mismatch));
        assert_eq!(
            out.detail.as_deref(),
            Some("(simple string: expected 5, got 4)")
        );
    }

    #[test]
    fn sign_rule_accepts_differing_magnitudes() {
        assert!(expect_sign_class("ordered pair", -40, -1).passed());
        assert!(expect_sign_class("equal pair", 0, 0).passed());
        let out = expect_sign_class("ordered pair", -40, 0);
        assert!(!out.passed());
        assert_eq!(
            out.detail.as_deref(),
            Some("(ordered pair: expected negative, got zero (0))")
        );
    }

    #[test]
    fn distinct_copy_rule_rejects_aliasing() {
        let s = c"dup";
        let out = unsafe { expect_distinct_copy("simple string", s.as_ptr(), s.as_ptr()) };
        assert!(!out.passed());

        let copy = unsafe { libc::strdup(s.as_ptr()) };
        let out = unsafe { expect_distinct_copy("simple string", s.as_ptr(), copy) };
        assert!(out.passed());
        unsafe { libc::free(copy.cast()) };
    }

    #[test]
    fn errno_rule_compares_jointly() {
        assert!(expect_errno_return("invalid fd", (-1, 9), (-1, 9)).passed());
        let out = expect_errno_return("invalid fd", (-1, 9), (5, 0));
        assert_eq!(
            out.detail.as_deref(),
            Some("(invalid fd: expected -1 (errno 9), got 5 (errno 0))")
        );
    }
}
