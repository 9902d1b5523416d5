//! `ft_write` scenarios.
//!
//! Happy paths compare return counts (and, for file cases, the bytes that
//! landed on disk). Error paths compare the return value and errno jointly.
//! Writes aimed at stdout and stderr go through an fd redirect so nothing
//! reaches the terminal.

use std::os::unix::io::AsRawFd;

use asmcheck_abi::host::{FdRedirect, host_write, with_errno};
use asmcheck_abi::registry::{CandidateLib, SENTINEL};
use asmcheck_abi::signatures::WriteFn;

use crate::case::{CaseOutcome, TestCase};
use crate::differential::{expect_eq, expect_errno_return};
use crate::error::HarnessError;
use crate::oracle::{self, ParityRule};
use crate::runner::RunContext;

const BINARY: [u8; 256] = {
    let mut bytes = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        bytes[i] = i as u8;
        i += 1;
    }
    bytes
};

const LONG: [u8; 1000] = [b'A'; 1000];

pub fn probe(ctx: &RunContext) -> Result<bool, HarnessError> {
    let Some(candidate) = ctx.lib.write else {
        return Ok(false);
    };
    let slot = ctx.scratch.file("write_probe.txt");
    let file = slot.open_write()?;
    let ret = unsafe { candidate(file.as_raw_fd(), b"test".as_ptr().cast(), 4) };
    Ok(ret != SENTINEL as isize)
}

/// Writes `payload` through one side with the standard descriptor pointed
/// at a scratch file for the duration, returning the count and the captured
/// bytes.
fn redirected_write(
    ctx: &RunContext,
    scratch_name: &str,
    target: libc::c_int,
    payload: &[u8],
    side: WriteFn,
) -> Result<(isize, Vec<u8>), CaseOutcome> {
    let slot = ctx.scratch.file(scratch_name);
    let ret = {
        let file = match slot.open_write() {
            Ok(f) => f,
            Err(e) => return Err(CaseOutcome::infra_io("create scratch file", &e)),
        };
        let guard = match FdRedirect::install(target, file.as_raw_fd()) {
            Ok(g) => g,
            Err(e) => return Err(CaseOutcome::infra_io("redirect descriptor", &e)),
        };
        let ret = unsafe { side(target, payload.as_ptr().cast(), payload.len()) };
        drop(guard);
        ret
    };
    let captured = match slot.read_back() {
        Ok(bytes) => bytes,
        Err(e) => return Err(CaseOutcome::infra_io("read scratch file back", &e)),
    };
    Ok((ret, captured))
}

fn redirect_case(
    name: &'static str,
    label: &'static str,
    scratch_name: &'static str,
    target: libc::c_int,
    payload: &'static [u8],
    candidate: WriteFn,
) -> TestCase {
    TestCase::new(name, move |ctx| {
        let (expected, expected_bytes) =
            match redirected_write(ctx, scratch_name, target, payload, host_write) {
                Ok(pair) => pair,
                Err(outcome) => return outcome,
            };
        let (got, got_bytes) = match redirected_write(ctx, scratch_name, target, payload, candidate)
        {
            Ok(pair) => pair,
            Err(outcome) => return outcome,
        };
        let outcome = expect_eq(label, expected, got);
        if !outcome.passed() {
            return outcome;
        }
        if got_bytes != expected_bytes {
            return CaseOutcome::mismatch(format!("({label}: captured output differs)"));
        }
        CaseOutcome::pass()
    })
}

/// Writes the first `count` bytes of `payload` into a fresh scratch file
/// through one side and returns the count plus what actually landed.
fn file_write(
    ctx: &RunContext,
    scratch_name: &str,
    payload: &[u8],
    count: usize,
    side: WriteFn,
) -> Result<(isize, Vec<u8>), CaseOutcome> {
    let slot = ctx.scratch.file(scratch_name);
    let ret = {
        let file = match slot.open_write() {
            Ok(f) => f,
            Err(e) => return Err(CaseOutcome::infra_io("create scratch file", &e)),
        };
        unsafe { side(file.as_raw_fd(), payload.as_ptr().cast(), count) }
    };
    let written = match slot.read_back() {
        Ok(bytes) => bytes,
        Err(e) => return Err(CaseOutcome::infra_io("read scratch file back", &e)),
    };
    Ok((ret, written))
}

fn file_case(
    name: &'static str,
    label: &'static str,
    scratch_name: &'static str,
    payload: &'static [u8],
    count: usize,
    candidate: WriteFn,
) -> TestCase {
    TestCase::new(name, move |ctx| {
        let (expected, expected_bytes) =
            match file_write(ctx, scratch_name, payload, count, host_write) {
                Ok(pair) => pair,
                Err(outcome) => return outcome,
            };
        let (got, got_bytes) = match file_write(ctx, scratch_name, payload, count, candidate) {
            Ok(pair) => pair,
            Err(outcome) => return outcome,
        };
        let outcome = expect_eq(label, expected, got);
        if !outcome.passed() {
            return outcome;
        }
        if got_bytes != expected_bytes {
            return CaseOutcome::mismatch(format!("({label}: file contents differ)"));
        }
        CaseOutcome::pass()
    })
}

pub fn cases(lib: &CandidateLib) -> Vec<TestCase> {
    let Some(candidate) = lib.write else {
        return Vec::new();
    };
    vec![
        redirect_case(
            "Write to stdout",
            "write to stdout",
            "write_stdout.txt",
            libc::STDOUT_FILENO,
            b"Test",
            candidate,
        ),
        redirect_case(
            "Write empty string",
            "write empty string",
            "write_empty.txt",
            libc::STDOUT_FILENO,
            b"",
            candidate,
        ),
        file_case(
            "Write to file",
            "write to file",
            "write_file.txt",
            b"Hello, World!",
            13,
            candidate,
        ),
        file_case(
            "Write long string (1000 chars)",
            "1000 chars",
            "write_long.txt",
            &LONG,
            1000,
            candidate,
        ),
        file_case(
            "Write partial string (5 bytes)",
            "partial write",
            "write_partial.txt",
            b"HelloWorld",
            5,
            candidate,
        ),
        TestCase::new("Invalid file descriptor (-1)", move |_ctx| {
            let payload = b"Hello";
            let expected =
                with_errno(|| unsafe { host_write(-1, payload.as_ptr().cast(), payload.len()) });
            let got =
                with_errno(|| unsafe { candidate(-1, payload.as_ptr().cast(), payload.len()) });
            expect_errno_return("invalid fd", expected, got)
        }),
        redirect_case(
            "Write to stderr",
            "write to stderr",
            "write_stderr.txt",
            libc::STDERR_FILENO,
            b"Error message",
            candidate,
        ),
        file_case(
            "Write with special characters",
            "special chars",
            "write_special.txt",
            b"Tab\tNewline\nReturn\rNull",
            23,
            candidate,
        ),
        file_case(
            "Write binary data (256 bytes)",
            "binary data",
            "write_binary.txt",
            &BINARY,
            256,
            candidate,
        ),
        TestCase::new("Write to closed file descriptor", move |ctx| {
            let slot = ctx.scratch.file("write_closed.txt");
            let fd = {
                let file = match slot.open_write() {
                    Ok(f) => f,
                    Err(e) => return CaseOutcome::infra_io("create scratch file", &e),
                };
                file.as_raw_fd()
            };
            let payload = b"Hello";
            let expected =
                with_errno(|| unsafe { host_write(fd, payload.as_ptr().cast(), payload.len()) });
            let got =
                with_errno(|| unsafe { candidate(fd, payload.as_ptr().cast(), payload.len()) });
            expect_errno_return("closed fd", expected, got)
        }),
        TestCase::new("NULL buffer (must segfault like libc)", move |ctx| {
            let timeout = ctx.config.probe_timeout;
            let pair = match oracle::run_pair(
                timeout,
                move || {
                    unsafe { candidate(libc::STDOUT_FILENO, std::ptr::null(), 10) };
                },
                move || {
                    unsafe { host_write(libc::STDOUT_FILENO, std::ptr::null(), 10) };
                },
            ) {
                Ok(pair) => pair,
                Err(outcome) => return outcome,
            };
            let outcome = if pair.agrees(ParityRule::SegvParity) {
                CaseOutcome::pass()
            } else {
                match oracle::segv_parity_detail("NULL buffer", &pair) {
                    Some(detail) => CaseOutcome::crash_parity(detail),
                    None => CaseOutcome::pass(),
                }
            };
            oracle::finish(&pair, timeout, outcome)
        }),
    ]
}
