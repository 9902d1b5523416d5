//! `ft_strcpy` scenarios.
//!
//! Value cases copy the same source through candidate and libc into
//! separate buffers and require identical contents plus the return-dst
//! convention. NULL inputs must fault on both sides; the heap overrun only
//! has to terminate the way libc terminates.

use std::ffi::{CStr, c_char};

use asmcheck_abi::host::host_strcpy;
use asmcheck_abi::registry::{CandidateLib, sentinel_ptr};
use asmcheck_abi::signatures::StrcpyFn;

use crate::case::{CaseOutcome, TestCase};
use crate::differential::expect_eq;
use crate::error::HarnessError;
use crate::oracle::{self, ParityRule};
use crate::runner::RunContext;

pub fn probe(ctx: &RunContext) -> Result<bool, HarnessError> {
    let Some(candidate) = ctx.lib.strcpy else {
        return Ok(false);
    };
    let mut buf: [c_char; 16] = [0; 16];
    Ok(unsafe { candidate(buf.as_mut_ptr(), c"test".as_ptr()) } != sentinel_ptr())
}

/// Copies `src` through both sides and compares the resulting strings.
/// `prefill` seeds both destination buffers so a missing terminator shows.
fn run_copy(candidate: StrcpyFn, label: &str, src: *const c_char, prefill: c_char) -> CaseOutcome {
    let mut dst_ref: [c_char; 1056] = [prefill; 1056];
    let mut dst_cand: [c_char; 1056] = [prefill; 1056];
    dst_ref[1055] = 0;
    dst_cand[1055] = 0;

    unsafe { host_strcpy(dst_ref.as_mut_ptr(), src) };
    let ret = unsafe { candidate(dst_cand.as_mut_ptr(), src) };
    if ret != dst_cand.as_mut_ptr() {
        return CaseOutcome::mismatch(format!("({label}: returned pointer differs from dst)"));
    }

    let expected = unsafe { CStr::from_ptr(dst_ref.as_ptr()) };
    let got = unsafe { CStr::from_ptr(dst_cand.as_ptr()) };
    expect_eq(
        label,
        format!("\"{}\"", expected.to_string_lossy()),
        format!("\"{}\"", got.to_string_lossy()),
    )
}

fn copy_case(
    name: &'static str,
    label: &'static str,
    src: &'static CStr,
    candidate: StrcpyFn,
) -> TestCase {
    TestCase::new(name, move |_ctx| run_copy(candidate, label, src.as_ptr(), 0))
}

fn null_case(
    name: &'static str,
    subject: &'static str,
    candidate: StrcpyFn,
    dst_null: bool,
    src_null: bool,
) -> TestCase {
    TestCase::new(name, move |ctx| {
        let timeout = ctx.config.probe_timeout;
        let pair = match oracle::run_pair(
            timeout,
            move || {
                let mut dst: [c_char; 64] = [0; 64];
                let dst = if dst_null {
                    std::ptr::null_mut()
                } else {
                    dst.as_mut_ptr()
                };
                let src = if src_null {
                    std::ptr::null()
                } else {
                    c"Hello".as_ptr()
                };
                unsafe { candidate(dst, src) };
            },
            move || {
                let mut dst: [c_char; 64] = [0; 64];
                let dst = if dst_null {
                    std::ptr::null_mut()
                } else {
                    dst.as_mut_ptr()
                };
                let src = if src_null {
                    std::ptr::null()
                } else {
                    c"Hello".as_ptr()
                };
                unsafe { host_strcpy(dst, src) };
            },
        ) {
            Ok(pair) => pair,
            Err(outcome) => return outcome,
        };
        let outcome = if pair.agrees(ParityRule::BothMustSegv) {
            CaseOutcome::pass()
        } else {
            match oracle::segv_expectation_detail(subject, &pair) {
                Some(detail) => CaseOutcome::crash_parity(detail),
                None => CaseOutcome::pass(),
            }
        };
        oracle::finish(&pair, timeout, outcome)
    })
}

pub fn cases(lib: &CandidateLib) -> Vec<TestCase> {
    let Some(candidate) = lib.strcpy else {
        return Vec::new();
    };
    vec![
        copy_case("Simple copy", "\"Hello\"", c"Hello", candidate),
        copy_case("Empty string", "empty string", c"", candidate),
        copy_case(
            "Long string",
            "long string",
            c"This is a much longer string to test the copy function properly",
            candidate,
        ),
        copy_case(
            "String with special characters",
            "special chars",
            c"Hello\tWorld\n!@#$%^&*()",
            candidate,
        ),
        copy_case("Single character", "\"A\"", c"A", candidate),
        copy_case("Dst same size as src", "same size", c"Hello", candidate),
        TestCase::new("Dst bigger than src", move |_ctx| {
            let outcome = run_copy(candidate, "dst bigger", c"Hi".as_ptr(), b'X' as c_char);
            if !outcome.passed() {
                return outcome;
            }
            let mut dst: [c_char; 64] = [b'X' as c_char; 64];
            dst[63] = 0;
            unsafe { candidate(dst.as_mut_ptr(), c"Hi".as_ptr()) };
            let len = unsafe { CStr::from_ptr(dst.as_ptr()) }.to_bytes().len();
            expect_eq("dst bigger, terminator placement", 2, len)
        }),
        copy_case(
            "String with numbers",
            "\"1234567890\"",
            c"1234567890",
            candidate,
        ),
        TestCase::new("Very long string (1000 chars)", move |_ctx| {
            let mut src = [b'A'; 1001];
            src[1000] = 0;
            run_copy(candidate, "1000 chars", src.as_ptr().cast(), 0)
        }),
        copy_case("String with only spaces", "5 spaces", c"     ", candidate),
        null_case(
            "NULL src pointer (must segfault like libc)",
            "NULL src",
            candidate,
            false,
            true,
        ),
        null_case(
            "NULL dst pointer (must segfault like libc)",
            "NULL dst",
            candidate,
            true,
            false,
        ),
        null_case(
            "Both pointers NULL (must segfault like libc)",
            "both NULL",
            candidate,
            true,
            true,
        ),
        TestCase::new("Buffer overflow (behavior must match libc)", move |ctx| {
            let timeout = ctx.config.probe_timeout;
            let src = c"This is a very long string that will overflow";
            let pair = match oracle::run_pair(
                timeout,
                move || {
                    let dst = unsafe { libc::malloc(5) }.cast::<c_char>();
                    if !dst.is_null() {
                        unsafe {
                            candidate(dst, src.as_ptr());
                            libc::free(dst.cast());
                        }
                    }
                },
                move || {
                    let dst = unsafe { libc::malloc(5) }.cast::<c_char>();
                    if !dst.is_null() {
                        unsafe {
                            host_strcpy(dst, src.as_ptr());
                            libc::free(dst.cast());
                        }
                    }
                },
            ) {
                Ok(pair) => pair,
                Err(outcome) => return outcome,
            };
            let outcome = if pair.agrees(ParityRule::CrashParity) {
                CaseOutcome::pass()
            } else if pair.reference.crashed() {
                CaseOutcome::crash_parity("(candidate did not crash on overflow, but libc did)")
            } else {
                CaseOutcome::crash_parity("(candidate crashed but libc did not)")
            };
            oracle::finish(&pair, timeout, outcome)
        }),
    ]
}
