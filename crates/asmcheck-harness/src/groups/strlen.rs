//! `ft_strlen` scenarios: exact length equality against host libc.

use std::ffi::CStr;

use asmcheck_abi::host::host_strlen;
use asmcheck_abi::registry::{CandidateLib, SENTINEL};
use asmcheck_abi::signatures::StrlenFn;

use crate::case::TestCase;
use crate::differential::expect_eq;
use crate::error::HarnessError;
use crate::runner::RunContext;

pub fn probe(ctx: &RunContext) -> Result<bool, HarnessError> {
    let Some(candidate) = ctx.lib.strlen else {
        return Ok(false);
    };
    Ok(unsafe { candidate(c"test".as_ptr()) } != SENTINEL)
}

fn length_case(
    name: &'static str,
    label: &'static str,
    input: &'static CStr,
    candidate: StrlenFn,
) -> TestCase {
    TestCase::new(name, move |_ctx| {
        let expected = unsafe { host_strlen(input.as_ptr()) };
        let got = unsafe { candidate(input.as_ptr()) };
        expect_eq(label, expected, got)
    })
}

pub fn cases(lib: &CandidateLib) -> Vec<TestCase> {
    let Some(candidate) = lib.strlen else {
        return Vec::new();
    };
    vec![
        length_case("Empty string", "empty string", c"", candidate),
        length_case("Simple string", "\"Hello\"", c"Hello", candidate),
        length_case(
            "String with spaces",
            "\"Hello World\"",
            c"Hello World",
            candidate,
        ),
        length_case(
            "Long string",
            "long string",
            c"This is a much longer string to test the length function",
            candidate,
        ),
        length_case(
            "String with special characters",
            "special chars",
            c"Hello\tWorld\n!@#$%^&*()",
            candidate,
        ),
        length_case(
            "String with numbers",
            "\"1234567890\"",
            c"1234567890",
            candidate,
        ),
        length_case("Single character", "\"A\"", c"A", candidate),
        TestCase::new("Very long string (1000 chars)", move |_ctx| {
            let mut buf = [b'A'; 1001];
            buf[1000] = 0;
            let ptr = buf.as_ptr().cast();
            let expected = unsafe { host_strlen(ptr) };
            let got = unsafe { candidate(ptr) };
            expect_eq("1000 chars", expected, got)
        }),
        length_case(
            "String with UTF-8 characters",
            "UTF-8",
            c"Hello 世界",
            candidate,
        ),
        length_case("String with only spaces", "5 spaces", c"     ", candidate),
    ]
}
