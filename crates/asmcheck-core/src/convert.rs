//! Base-conversion reference oracle.
//!
//! `atoi_base` here is the trusted implementation that candidate converters
//! are compared against. Its accept/reject rules for malformed bases are the
//! grading contract and must not be "improved": a base is an arbitrary digit
//! alphabet, and every rejection rule below is observable behavior.

/// Whitespace accepted before the number: space and `\t\n\v\f\r`.
fn is_conversion_space(b: u8) -> bool {
    b == b' ' || (9..=13).contains(&b)
}

/// Validates a digit alphabet and returns its radix.
///
/// Rejected alphabets yield `None`: fewer than two characters, any `+` or
/// `-`, any byte outside printable ASCII (control bytes, space, DEL, or
/// anything above 126), or a repeated character.
#[must_use]
pub fn base_radix(base: &[u8]) -> Option<usize> {
    for (i, &b) in base.iter().enumerate() {
        if b == b'+' || b == b'-' || b <= 32 || b >= 127 {
            return None;
        }
        if base[i + 1..].contains(&b) {
            return None;
        }
    }
    if base.len() < 2 { None } else { Some(base.len()) }
}

/// Position of `b` in the alphabet, i.e. its digit value.
fn digit_value(b: u8, base: &[u8]) -> Option<usize> {
    base.iter().position(|&d| d == b)
}

/// Converts `s` interpreted in the digit alphabet `base`.
///
/// Returns 0 for an invalid base. Leading conversion whitespace is skipped,
/// at most one sign is consumed (`-` negates), and a second consecutive sign
/// character invalidates the whole input. Digits accumulate with wrapping
/// i32 arithmetic until the first byte outside the alphabet.
#[must_use]
pub fn atoi_base(s: &[u8], base: &[u8]) -> i32 {
    let Some(radix) = base_radix(base) else {
        return 0;
    };

    let mut i = 0;
    while i < s.len() && is_conversion_space(s[i]) {
        i += 1;
    }

    let mut sign = 1i32;
    if i < s.len() && (s[i] == b'+' || s[i] == b'-') {
        if s[i] == b'-' {
            sign = -1;
        }
        i += 1;
        if i < s.len() && (s[i] == b'+' || s[i] == b'-') {
            return 0;
        }
    }

    let mut result = 0i32;
    while i < s.len() {
        let Some(digit) = digit_value(s[i], base) else {
            break;
        };
        result = result
            .wrapping_mul(radix as i32)
            .wrapping_add(digit as i32);
        i += 1;
    }
    result.wrapping_mul(sign)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
