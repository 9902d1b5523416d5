//! `ft_list_size` scenarios.
//!
//! Chains are built through the reference push and counted by both sides.
//! The NULL probe is coarse crash parity: when both sides survive, the
//! returned counts are compared in-process as well.

use std::os::raw::{c_int, c_void};

use asmcheck_abi::list::{
    ListNode, build_int_list, build_ptr_list, free_list, ref_list_size, tag_int,
};
use asmcheck_abi::registry::{CandidateLib, SENTINEL_INT};
use asmcheck_abi::signatures::ListSizeFn;

use crate::case::{CaseOutcome, TestCase};
use crate::error::HarnessError;
use crate::oracle::{self, ParityRule};
use crate::runner::RunContext;

pub fn probe(ctx: &RunContext) -> Result<bool, HarnessError> {
    let Some(candidate) = ctx.lib.list_size else {
        return Ok(false);
    };
    let head = build_int_list(&[1]);
    let ret = unsafe { candidate(head) };
    unsafe { free_list(head) };
    Ok(ret != SENTINEL_INT)
}

fn size_outcome(label: &str, expected: c_int, got: c_int) -> CaseOutcome {
    let detail = format!("list_size({label}) = {got} (expected {expected})");
    if got == expected {
        CaseOutcome::pass_with_detail(detail)
    } else {
        CaseOutcome::mismatch(detail)
    }
}

fn size_case(
    name: &'static str,
    label: &'static str,
    build: impl Fn() -> *mut ListNode + 'static,
    candidate: ListSizeFn,
) -> TestCase {
    TestCase::new(name, move |_ctx| {
        let head = build();
        let expected = unsafe { ref_list_size(head) };
        let got = unsafe { candidate(head) };
        unsafe { free_list(head) };
        size_outcome(label, expected, got)
    })
}

pub fn cases(lib: &CandidateLib) -> Vec<TestCase> {
    let Some(candidate) = lib.list_size else {
        return Vec::new();
    };
    vec![
        TestCase::new("NULL pointer parameter", move |ctx| {
            let timeout = ctx.config.probe_timeout;
            let pair = match oracle::run_pair(
                timeout,
                move || {
                    unsafe { candidate(std::ptr::null_mut()) };
                },
                move || {
                    unsafe { ref_list_size(std::ptr::null_mut()) };
                },
            ) {
                Ok(pair) => pair,
                Err(outcome) => return outcome,
            };
            let outcome = if !pair.agrees(ParityRule::CrashParity) {
                CaseOutcome::crash_parity("list_size(NULL): different behavior")
            } else if pair.candidate.crashed() {
                CaseOutcome::pass_with_detail("list_size(NULL): both crash on NULL")
            } else {
                let expected = unsafe { ref_list_size(std::ptr::null_mut()) };
                let got = unsafe { candidate(std::ptr::null_mut()) };
                size_outcome("NULL", expected, got)
            };
            oracle::finish(&pair, timeout, outcome)
        }),
        size_case(
            "Empty list (size 0)",
            "empty list",
            || std::ptr::null_mut(),
            candidate,
        ),
        size_case(
            "Single element",
            "1 element",
            || build_int_list(&[42]),
            candidate,
        ),
        size_case(
            "Two elements",
            "2 elements",
            || build_int_list(&[1, 2]),
            candidate,
        ),
        size_case(
            "Five elements",
            "5 elements",
            || build_int_list(&[1, 2, 3, 4, 5]),
            candidate,
        ),
        size_case(
            "Ten elements",
            "10 elements",
            || {
                let values: Vec<isize> = (1..=10).collect();
                build_int_list(&values)
            },
            candidate,
        ),
        size_case(
            "Large list (100 elements)",
            "100 elements",
            || {
                let values: Vec<isize> = (1..=100).collect();
                build_int_list(&values)
            },
            candidate,
        ),
        size_case(
            "Very large list (1000 elements)",
            "1000 elements",
            || {
                let values: Vec<isize> = (1..=1000).collect();
                build_int_list(&values)
            },
            candidate,
        ),
        size_case(
            "List with NULL data pointers",
            "3 nodes with NULL data",
            || build_ptr_list(&[std::ptr::null_mut(); 3]),
            candidate,
        ),
        size_case(
            "Mixed data types",
            "4 mixed types",
            || {
                let ptrs: [*mut c_void; 4] = [
                    tag_int(42),
                    c"mixed".as_ptr().cast_mut().cast(),
                    std::ptr::null_mut(),
                    tag_int(-7),
                ];
                build_ptr_list(&ptrs)
            },
            candidate,
        ),
    ]
}
