//! `ft_strcmp` scenarios: sign-class agreement with libc.
//!
//! Return magnitudes are implementation freedom; only the negative, zero,
//! or positive class has to match. NULL arguments must fault on both sides.

use std::ffi::CStr;

use asmcheck_abi::host::host_strcmp;
use asmcheck_abi::registry::{CandidateLib, SENTINEL_INT};
use asmcheck_abi::signatures::StrcmpFn;

use crate::case::{CaseOutcome, TestCase};
use crate::differential::expect_sign_class;
use crate::error::HarnessError;
use crate::oracle::{self, ParityRule};
use crate::runner::RunContext;

pub fn probe(ctx: &RunContext) -> Result<bool, HarnessError> {
    let Some(candidate) = ctx.lib.strcmp else {
        return Ok(false);
    };
    Ok(unsafe { candidate(c"test".as_ptr(), c"test".as_ptr()) } != SENTINEL_INT)
}

fn compare_case(
    name: &'static str,
    label: &'static str,
    s1: &'static CStr,
    s2: &'static CStr,
    candidate: StrcmpFn,
) -> TestCase {
    TestCase::new(name, move |_ctx| {
        let expected = unsafe { host_strcmp(s1.as_ptr(), s2.as_ptr()) };
        let got = unsafe { candidate(s1.as_ptr(), s2.as_ptr()) };
        expect_sign_class(label, expected, got)
    })
}

fn null_case(
    name: &'static str,
    subject: &'static str,
    candidate: StrcmpFn,
    s1_null: bool,
    s2_null: bool,
) -> TestCase {
    TestCase::new(name, move |ctx| {
        let timeout = ctx.config.probe_timeout;
        let arg = |null: bool| {
            if null {
                std::ptr::null()
            } else {
                c"Hello".as_ptr()
            }
        };
        let pair = match oracle::run_pair(
            timeout,
            move || {
                unsafe { candidate(arg(s1_null), arg(s2_null)) };
            },
            move || {
                unsafe { host_strcmp(arg(s1_null), arg(s2_null)) };
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
    let Some(candidate) = lib.strcmp else {
        return Vec::new();
    };
    vec![
        compare_case(
            "Identical strings",
            "\"Hello\" vs \"Hello\"",
            c"Hello",
            c"Hello",
            candidate,
        ),
        compare_case(
            "First string greater",
            "\"Hello\" vs \"Hella\"",
            c"Hello",
            c"Hella",
            candidate,
        ),
        compare_case(
            "Second string greater",
            "\"Hello\" vs \"World\"",
            c"Hello",
            c"World",
            candidate,
        ),
        compare_case("Both empty strings", "both empty", c"", c"", candidate),
        compare_case(
            "First string empty",
            "\"\" vs \"Hello\"",
            c"",
            c"Hello",
            candidate,
        ),
        compare_case(
            "Second string empty",
            "\"Hello\" vs \"\"",
            c"Hello",
            c"",
            candidate,
        ),
        compare_case(
            "First is prefix of second",
            "\"Hello\" vs \"Hello World\"",
            c"Hello",
            c"Hello World",
            candidate,
        ),
        compare_case(
            "Second is prefix of first",
            "\"Hello World\" vs \"Hello\"",
            c"Hello World",
            c"Hello",
            candidate,
        ),
        compare_case(
            "Case sensitivity (H vs h)",
            "\"Hello\" vs \"hello\"",
            c"Hello",
            c"hello",
            candidate,
        ),
        compare_case(
            "Special characters (\\t vs \\n)",
            "special chars",
            c"Hello\tWorld",
            c"Hello\nWorld",
            candidate,
        ),
        compare_case(
            "Numbers as strings",
            "\"123\" vs \"124\"",
            c"123",
            c"124",
            candidate,
        ),
        compare_case(
            "Long identical strings",
            "long strings",
            c"This is a very long string to test the comparison with identical content",
            c"This is a very long string to test the comparison with identical content",
            candidate,
        ),
        compare_case(
            "Difference at the end",
            "\"HelloWorld\" vs \"HelloWorle\"",
            c"HelloWorld",
            c"HelloWorle",
            candidate,
        ),
        compare_case(
            "Single character difference",
            "\"a\" vs \"b\"",
            c"a",
            c"b",
            candidate,
        ),
        compare_case(
            "Same single character",
            "\"x\" vs \"x\"",
            c"x",
            c"x",
            candidate,
        ),
        null_case(
            "NULL first string (must segfault like libc)",
            "NULL s1",
            candidate,
            true,
            false,
        ),
        null_case(
            "NULL second string (must segfault like libc)",
            "NULL s2",
            candidate,
            false,
            true,
        ),
        null_case(
            "Both strings NULL (must segfault like libc)",
            "both NULL",
            candidate,
            true,
            true,
        ),
    ]
}
