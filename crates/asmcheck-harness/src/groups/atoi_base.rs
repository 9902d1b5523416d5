//! `ft_atoi_base` scenarios.
//!
//! Value cases compare the candidate against an in-process reference
//! conversion, since no libc counterpart exists. Invalid bases (shorter
//! than two digits, duplicate digits, or digits colliding with `+`, `-`
//! or whitespace) must yield 0. The NULL probes demand crash parity with
//! the reference, which treats NULL as an invalid input and returns 0.

use std::ffi::CStr;

use asmcheck_abi::host::ref_atoi_base;
use asmcheck_abi::registry::{CandidateLib, SENTINEL_INT};
use asmcheck_abi::signatures::AtoiBaseFn;

use crate::case::{CaseOutcome, TestCase};
use crate::differential::expect_eq;
use crate::error::HarnessError;
use crate::oracle::{self, ParityRule};
use crate::runner::RunContext;

pub fn probe(ctx: &RunContext) -> Result<bool, HarnessError> {
    let Some(candidate) = ctx.lib.atoi_base else {
        return Ok(false);
    };
    let ret = unsafe { candidate(c"0".as_ptr(), c"01".as_ptr()) };
    Ok(ret != SENTINEL_INT)
}

fn convert_case(
    name: &'static str,
    label: &'static str,
    s: &'static CStr,
    base: &'static CStr,
    candidate: AtoiBaseFn,
) -> TestCase {
    TestCase::new(name, move |_ctx| {
        let expected = unsafe { ref_atoi_base(s.as_ptr(), base.as_ptr()) };
        let got = unsafe { candidate(s.as_ptr(), base.as_ptr()) };
        expect_eq(label, expected, got)
    })
}

fn null_case(
    name: &'static str,
    subject: &'static str,
    s: Option<&'static CStr>,
    base: Option<&'static CStr>,
    candidate: AtoiBaseFn,
) -> TestCase {
    TestCase::new(name, move |ctx| {
        let s_ptr = s.map_or(std::ptr::null(), CStr::as_ptr);
        let base_ptr = base.map_or(std::ptr::null(), CStr::as_ptr);
        let timeout = ctx.config.probe_timeout;
        let pair = match oracle::run_pair(
            timeout,
            move || {
                unsafe { candidate(s_ptr, base_ptr) };
            },
            move || {
                unsafe { ref_atoi_base(s_ptr, base_ptr) };
            },
        ) {
            Ok(pair) => pair,
            Err(outcome) => return outcome,
        };
        let detail = oracle::null_probe_detail(subject, &pair, "both return 0 safely");
        let outcome = if pair.agrees(ParityRule::CrashParity) {
            CaseOutcome::pass_with_detail(detail)
        } else {
            CaseOutcome::crash_parity(detail)
        };
        oracle::finish(&pair, timeout, outcome)
    })
}

pub fn cases(lib: &CandidateLib) -> Vec<TestCase> {
    let Some(candidate) = lib.atoi_base else {
        return Vec::new();
    };
    vec![
        convert_case(
            "Binary: 101 = 5",
            "\"101\" base \"01\"",
            c"101",
            c"01",
            candidate,
        ),
        convert_case(
            "Decimal: 42",
            "\"42\" base \"0123456789\"",
            c"42",
            c"0123456789",
            candidate,
        ),
        convert_case(
            "Hexadecimal: 2a = 42",
            "\"2a\" base \"0123456789abcdef\"",
            c"2a",
            c"0123456789abcdef",
            candidate,
        ),
        convert_case(
            "Hexadecimal: FF = 255",
            "\"FF\" base \"0123456789ABCDEF\"",
            c"FF",
            c"0123456789ABCDEF",
            candidate,
        ),
        convert_case(
            "Negative binary: -101 = -5",
            "\"-101\" base \"01\"",
            c"-101",
            c"01",
            candidate,
        ),
        convert_case(
            "Multiple signs: --42 = 0",
            "\"--42\" base \"0123456789\"",
            c"--42",
            c"0123456789",
            candidate,
        ),
        convert_case(
            "Leading whitespace",
            "\"   \\t\\n42\" base \"0123456789\"",
            c"   \t\n42",
            c"0123456789",
            candidate,
        ),
        convert_case(
            "Invalid base (single char)",
            "\"5\" base \"0\"",
            c"5",
            c"0",
            candidate,
        ),
        convert_case(
            "Invalid base (duplicates)",
            "\"5\" base \"0123456709\"",
            c"5",
            c"0123456709",
            candidate,
        ),
        convert_case(
            "Invalid base (contains +)",
            "\"5\" base \"01+3\"",
            c"5",
            c"01+3",
            candidate,
        ),
        convert_case(
            "Invalid base (contains -)",
            "\"5\" base \"01-3\"",
            c"5",
            c"01-3",
            candidate,
        ),
        convert_case(
            "Invalid base (contains space)",
            "\"5\" base \"01 3\"",
            c"5",
            c"01 3",
            candidate,
        ),
        convert_case(
            "Octal: 52 = 42",
            "\"52\" base \"01234567\"",
            c"52",
            c"01234567",
            candidate,
        ),
        convert_case(
            "Custom base: yep in poney",
            "\"yep\" base \"poney\"",
            c"yep",
            c"poney",
            candidate,
        ),
        convert_case(
            "Custom base: !@! in symbols (base-5)",
            "\"!@!\" base \"!@#$%\"",
            c"!@!",
            c"!@#$%",
            candidate,
        ),
        convert_case(
            "Custom base: hello in alphabet",
            "\"hello\" base \"abc...xyz\"",
            c"hello",
            c"abcdefghijklmnopqrstuvwxyz",
            candidate,
        ),
        convert_case(
            "Custom base: ouuio in aeiou",
            "\"ouuio\" base \"aeiou\"",
            c"ouuio",
            c"aeiou",
            candidate,
        ),
        null_case(
            "NULL string pointer (protected)",
            "NULL string",
            None,
            Some(c"0123456789"),
            candidate,
        ),
        null_case(
            "NULL base pointer (protected)",
            "NULL base",
            Some(c"42"),
            None,
            candidate,
        ),
        null_case(
            "Both NULL pointers (protected)",
            "both NULL",
            None,
            None,
            candidate,
        ),
        convert_case(
            "Zero",
            "\"0\" base \"0123456789\"",
            c"0",
            c"0123456789",
            candidate,
        ),
        convert_case(
            "Empty string",
            "\"\" base \"0123456789\"",
            c"",
            c"0123456789",
            candidate,
        ),
        convert_case(
            "Invalid char (stops at x)",
            "\"101x\" base \"01\"",
            c"101x",
            c"01",
            candidate,
        ),
        convert_case(
            "Only whitespace",
            "\"   \\t\\n\" base \"0123456789\"",
            c"   \t\n",
            c"0123456789",
            candidate,
        ),
        convert_case(
            "Large number: 7FFFFFFF",
            "\"7FFFFFFF\" base \"0123456789ABCDEF\"",
            c"7FFFFFFF",
            c"0123456789ABCDEF",
            candidate,
        ),
        convert_case(
            "Sign only",
            "\"-\" base \"0123456789\"",
            c"-",
            c"0123456789",
            candidate,
        ),
        convert_case(
            "Ternary: 120 = 15",
            "\"120\" base \"012\"",
            c"120",
            c"012",
            candidate,
        ),
        convert_case(
            "Base 36: ZZ = 1295",
            "\"ZZ\" base36",
            c"ZZ",
            c"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            candidate,
        ),
    ]
}
