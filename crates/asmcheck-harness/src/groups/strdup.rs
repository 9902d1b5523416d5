//! `ft_strdup` scenarios.
//!
//! A correct duplicate lives at a fresh address and matches the source
//! byte for byte. Every allocation handed back by the candidate is freed
//! through the host allocator, which also checks that the pointer is one
//! `free` accepts.

use std::ffi::CStr;
use std::os::raw::c_char;

use asmcheck_abi::host::host_strdup;
use asmcheck_abi::registry::{CandidateLib, sentinel_ptr};
use asmcheck_abi::signatures::StrdupFn;

use crate::case::{CaseOutcome, TestCase};
use crate::error::HarnessError;
use crate::oracle::{self, ParityRule};
use crate::runner::RunContext;

pub fn probe(ctx: &RunContext) -> Result<bool, HarnessError> {
    let Some(candidate) = ctx.lib.strdup else {
        return Ok(false);
    };
    let dup = unsafe { candidate(c"test".as_ptr()) };
    if dup == sentinel_ptr() {
        return Ok(false);
    }
    if !dup.is_null() {
        unsafe { libc::free(dup.cast()) };
    }
    Ok(true)
}

fn dup_case(
    name: &'static str,
    label: &'static str,
    input: &'static CStr,
    candidate: StrdupFn,
) -> TestCase {
    TestCase::new(name, move |_ctx| {
        let dup = unsafe { candidate(input.as_ptr()) };
        let outcome = unsafe { crate::differential::expect_distinct_copy(label, input.as_ptr(), dup) };
        if !dup.is_null() {
            unsafe { libc::free(dup.cast()) };
        }
        outcome
    })
}

pub fn cases(lib: &CandidateLib) -> Vec<TestCase> {
    let Some(candidate) = lib.strdup else {
        return Vec::new();
    };
    vec![
        dup_case("Simple string", "\"Hello\"", c"Hello", candidate),
        dup_case("Empty string", "empty string", c"", candidate),
        TestCase::new("Long string (1000 chars)", move |_ctx| {
            let mut buf = [b'A' as c_char; 1001];
            buf[1000] = 0;
            let dup = unsafe { candidate(buf.as_ptr()) };
            let outcome =
                unsafe { crate::differential::expect_distinct_copy("1000 chars", buf.as_ptr(), dup) };
            if !dup.is_null() {
                unsafe { libc::free(dup.cast()) };
            }
            outcome
        }),
        dup_case(
            "String with special characters",
            "special chars",
            c"Tab\tNewline\nReturn\rNull",
            candidate,
        ),
        dup_case(
            "String with numbers",
            "\"1234567890\"",
            c"1234567890",
            candidate,
        ),
        dup_case("Single character", "\"A\"", c"A", candidate),
        dup_case(
            "String with spaces",
            "\"Hello World\"",
            c"Hello World",
            candidate,
        ),
        dup_case("String with only spaces", "5 spaces", c"     ", candidate),
        dup_case(
            "String with UTF-8 characters",
            "UTF-8",
            c"H\u{e9}llo W\u{f6}rld",
            candidate,
        ),
        dup_case(
            "Allocated memory is different",
            "allocation distinct",
            c"Hello",
            candidate,
        ),
        TestCase::new("Can modify duplicated string", move |_ctx| {
            let mut original = *b"Hello\0";
            let orig_ptr = original.as_mut_ptr().cast::<c_char>();
            let dup = unsafe { candidate(orig_ptr) };
            if dup.is_null() {
                return CaseOutcome::mismatch("(modify duplicate: candidate returned NULL)");
            }
            if std::ptr::eq(dup, orig_ptr) {
                return CaseOutcome::mismatch(
                    "(modify duplicate: duplicate aliases the original allocation)",
                );
            }
            unsafe { dup.write(b'X' as c_char) };
            let outcome = if unsafe { dup.read() } != b'X' as c_char {
                CaseOutcome::mismatch("(modify duplicate: write did not stick)")
            } else if original[0] != b'H' {
                CaseOutcome::mismatch("(modify duplicate: original changed)")
            } else {
                CaseOutcome::pass()
            };
            unsafe { libc::free(dup.cast()) };
            outcome
        }),
        TestCase::new("NULL pointer (must segfault like libc)", move |ctx| {
            let timeout = ctx.config.probe_timeout;
            let pair = match oracle::run_pair(
                timeout,
                move || {
                    unsafe { candidate(std::ptr::null()) };
                },
                move || {
                    unsafe { host_strdup(std::ptr::null()) };
                },
            ) {
                Ok(pair) => pair,
                Err(outcome) => return outcome,
            };
            let outcome = if pair.agrees(ParityRule::SegvParity) {
                CaseOutcome::pass()
            } else {
                match oracle::segv_parity_detail("NULL input", &pair) {
                    Some(detail) => CaseOutcome::crash_parity(detail),
                    None => CaseOutcome::pass(),
                }
            };
            oracle::finish(&pair, timeout, outcome)
        }),
        TestCase::new("Memory leak stress test", move |_ctx| {
            let churn = c"Memory leak test";
            for _ in 0..1000 {
                let dup = unsafe { candidate(churn.as_ptr()) };
                if dup.is_null() {
                    return CaseOutcome::mismatch("(stress test: allocation failed)");
                }
                unsafe { libc::free(dup.cast()) };
            }
            let keep = c"Test";
            let mut held = Vec::with_capacity(100);
            for _ in 0..100 {
                let dup = unsafe { candidate(keep.as_ptr()) };
                if dup.is_null() {
                    break;
                }
                held.push(dup);
            }
            let mut outcome = if held.len() == 100 {
                CaseOutcome::pass_with_detail("(allocated and freed 1100 strings successfully)")
            } else {
                CaseOutcome::mismatch("(stress test: allocation failed)")
            };
            for dup in held {
                if outcome.passed() && unsafe { CStr::from_ptr(dup) }.to_bytes() != b"Test" {
                    outcome = CaseOutcome::mismatch("(stress test: corrupted copy)");
                }
                unsafe { libc::free(dup.cast()) };
            }
            outcome
        }),
    ]
}
