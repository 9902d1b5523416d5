//! `ft_read` scenarios.
//!
//! Each happy-path case seeds a scratch file, reads it back through both
//! implementations and compares the return count plus the bytes received.
//! Error paths compare the return value and errno jointly.

use std::os::unix::io::AsRawFd;

use asmcheck_abi::host::{host_read, with_errno};
use asmcheck_abi::registry::{CandidateLib, SENTINEL};
use asmcheck_abi::signatures::ReadFn;

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
    let Some(candidate) = ctx.lib.read else {
        return Ok(false);
    };
    let slot = ctx.scratch.file("read_probe.txt");
    slot.write_bytes(b"test")?;
    let file = slot.open_read()?;
    let mut buf = [0u8; 16];
    let ret = unsafe { candidate(file.as_raw_fd(), buf.as_mut_ptr().cast(), 4) };
    Ok(ret != SENTINEL as isize)
}

/// Seeds a scratch file with `contents` and reads up to `count` bytes back
/// through one side. Returns the count plus the bytes received.
fn file_read(
    ctx: &RunContext,
    scratch_name: &str,
    contents: &[u8],
    count: usize,
    side: ReadFn,
) -> Result<(isize, Vec<u8>), CaseOutcome> {
    let slot = ctx.scratch.file(scratch_name);
    if let Err(e) = slot.write_bytes(contents) {
        return Err(CaseOutcome::infra_io("seed scratch file", &e));
    }
    let file = match slot.open_read() {
        Ok(f) => f,
        Err(e) => return Err(CaseOutcome::infra_io("open scratch file", &e)),
    };
    let mut buf = vec![0u8; count.max(1)];
    let ret = unsafe { side(file.as_raw_fd(), buf.as_mut_ptr().cast(), count) };
    if ret >= 0 {
        buf.truncate(ret as usize);
    } else {
        buf.clear();
    }
    Ok((ret, buf))
}

fn read_case(
    name: &'static str,
    label: &'static str,
    scratch_name: &'static str,
    contents: &'static [u8],
    count: usize,
    candidate: ReadFn,
) -> TestCase {
    TestCase::new(name, move |ctx| {
        let (expected, expected_bytes) =
            match file_read(ctx, scratch_name, contents, count, host_read) {
                Ok(pair) => pair,
                Err(outcome) => return outcome,
            };
        let (got, got_bytes) = match file_read(ctx, scratch_name, contents, count, candidate) {
            Ok(pair) => pair,
            Err(outcome) => return outcome,
        };
        let outcome = expect_eq(label, expected, got);
        if !outcome.passed() {
            return outcome;
        }
        if got_bytes != expected_bytes {
            return CaseOutcome::mismatch(format!("({label}: content differs)"));
        }
        CaseOutcome::pass()
    })
}

/// Opens the seeded file once and issues two sequential 5-byte reads,
/// checking that the second read picks up where the first stopped.
fn two_reads(
    ctx: &RunContext,
    scratch_name: &str,
    side: ReadFn,
) -> Result<[(isize, Vec<u8>); 2], CaseOutcome> {
    let slot = ctx.scratch.file(scratch_name);
    if let Err(e) = slot.write_bytes(b"HelloWorld") {
        return Err(CaseOutcome::infra_io("seed scratch file", &e));
    }
    let file = match slot.open_read() {
        Ok(f) => f,
        Err(e) => return Err(CaseOutcome::infra_io("open scratch file", &e)),
    };
    let mut chunks = [(0isize, Vec::new()), (0isize, Vec::new())];
    for chunk in &mut chunks {
        let mut buf = [0u8; 5];
        let ret = unsafe { side(file.as_raw_fd(), buf.as_mut_ptr().cast(), 5) };
        let taken = if ret >= 0 { ret as usize } else { 0 };
        *chunk = (ret, buf[..taken.min(5)].to_vec());
    }
    Ok(chunks)
}

pub fn cases(lib: &CandidateLib) -> Vec<TestCase> {
    let Some(candidate) = lib.read else {
        return Vec::new();
    };
    vec![
        read_case(
            "Read from file",
            "read from file",
            "read_file.txt",
            b"Hello, World!",
            13,
            candidate,
        ),
        read_case(
            "Read empty file",
            "empty file",
            "read_empty.txt",
            b"",
            10,
            candidate,
        ),
        read_case(
            "Read long content (1000 chars)",
            "1000 chars",
            "read_long.txt",
            &LONG,
            1000,
            candidate,
        ),
        read_case(
            "Read partial content (5 bytes)",
            "partial read",
            "read_partial.txt",
            b"HelloWorld",
            5,
            candidate,
        ),
        TestCase::new("Invalid file descriptor (-1)", move |_ctx| {
            let mut expected_buf = [0u8; 16];
            let expected =
                with_errno(|| unsafe { host_read(-1, expected_buf.as_mut_ptr().cast(), 10) });
            let mut got_buf = [0u8; 16];
            let got = with_errno(|| unsafe { candidate(-1, got_buf.as_mut_ptr().cast(), 10) });
            expect_errno_return("invalid fd", expected, got)
        }),
        read_case(
            "Read with count = 0",
            "count = 0",
            "read_zero.txt",
            b"Hello",
            0,
            candidate,
        ),
        read_case(
            "Read binary data (256 bytes)",
            "binary data",
            "read_binary.txt",
            &BINARY,
            256,
            candidate,
        ),
        TestCase::new("Multiple reads from same file", move |ctx| {
            let expected = match two_reads(ctx, "read_multi.txt", host_read) {
                Ok(chunks) => chunks,
                Err(outcome) => return outcome,
            };
            let got = match two_reads(ctx, "read_multi.txt", candidate) {
                Ok(chunks) => chunks,
                Err(outcome) => return outcome,
            };
            for (i, label) in ["first read", "second read"].into_iter().enumerate() {
                let outcome = expect_eq(label, expected[i].0, got[i].0);
                if !outcome.passed() {
                    return outcome;
                }
                if got[i].1 != expected[i].1 {
                    return CaseOutcome::mismatch(format!("({label}: content differs)"));
                }
            }
            CaseOutcome::pass()
        }),
        TestCase::new("Read from closed file descriptor", move |ctx| {
            let slot = ctx.scratch.file("read_closed.txt");
            if let Err(e) = slot.write_bytes(b"Hello") {
                return CaseOutcome::infra_io("seed scratch file", &e);
            }
            let fd = {
                let file = match slot.open_read() {
                    Ok(f) => f,
                    Err(e) => return CaseOutcome::infra_io("open scratch file", &e),
                };
                file.as_raw_fd()
            };
            let mut expected_buf = [0u8; 16];
            let expected =
                with_errno(|| unsafe { host_read(fd, expected_buf.as_mut_ptr().cast(), 10) });
            let mut got_buf = [0u8; 16];
            let got = with_errno(|| unsafe { candidate(fd, got_buf.as_mut_ptr().cast(), 10) });
            expect_errno_return("closed fd", expected, got)
        }),
        read_case(
            "Read with special characters",
            "special chars",
            "read_special.txt",
            b"Tab\tNewline\nReturn\rNull",
            23,
            candidate,
        ),
        TestCase::new("NULL buffer (must segfault like libc)", move |ctx| {
            let slot = ctx.scratch.file("read_null.txt");
            if let Err(e) = slot.write_bytes(b"Hello") {
                return CaseOutcome::infra_io("seed scratch file", &e);
            }
            let file = match slot.open_read() {
                Ok(f) => f,
                Err(e) => return CaseOutcome::infra_io("open scratch file", &e),
            };
            let fd = file.as_raw_fd();
            let timeout = ctx.config.probe_timeout;
            let pair = match oracle::run_pair(
                timeout,
                move || {
                    unsafe { candidate(fd, std::ptr::null_mut(), 10) };
                },
                move || {
                    unsafe { host_read(fd, std::ptr::null_mut(), 10) };
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
