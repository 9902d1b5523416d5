//! `ft_list_push_front` scenarios.
//!
//! The candidate allocates nodes with the host `malloc`, so structural
//! checks walk the chain directly and every chain is released through
//! `free_list`. Cases that push through a possibly-missing allocation
//! path run in a forked child and report structure through the exit code.

use std::ffi::CStr;
use std::os::raw::{c_int, c_void};

use asmcheck_abi::list::{ListNode, collect_ptrs, free_list, ref_list_push_front, tag_int, untag_int};
use asmcheck_abi::registry::CandidateLib;
use asmcheck_isolate::ExecutionOutcome;

use crate::case::{CaseOutcome, TestCase};
use crate::error::HarnessError;
use crate::oracle::{self, ParityRule};
use crate::runner::RunContext;

pub fn probe(ctx: &RunContext) -> Result<bool, HarnessError> {
    let Some(candidate) = ctx.lib.list_push_front else {
        return Ok(false);
    };
    let mut head: *mut ListNode = std::ptr::null_mut();
    let data = c"test".as_ptr().cast_mut().cast::<c_void>();
    unsafe { candidate(&raw mut head, data) };
    if head.is_null() {
        return Ok(false);
    }
    unsafe { free_list(head) };
    Ok(true)
}

fn exited_clean(outcome: &ExecutionOutcome) -> bool {
    matches!(outcome, ExecutionOutcome::ExitedNormally { exit_code: 0 })
}

pub fn cases(lib: &CandidateLib) -> Vec<TestCase> {
    let Some(candidate) = lib.list_push_front else {
        return Vec::new();
    };
    vec![
        TestCase::new("NULL pointer parameter (protected)", move |ctx| {
            let data = c"data".as_ptr().cast_mut().cast::<c_void>();
            let timeout = ctx.config.probe_timeout;
            let pair = match oracle::run_pair(
                timeout,
                move || {
                    unsafe { candidate(std::ptr::null_mut(), data) };
                },
                move || {
                    unsafe { ref_list_push_front(std::ptr::null_mut(), data) };
                },
            ) {
                Ok(pair) => pair,
                Err(outcome) => return outcome,
            };
            let detail = oracle::null_probe_detail("NULL pointer", &pair, "both handle safely");
            let outcome = if pair.agrees(ParityRule::CrashParity) {
                CaseOutcome::pass_with_detail(detail)
            } else {
                CaseOutcome::crash_parity(detail)
            };
            oracle::finish(&pair, timeout, outcome)
        }),
        TestCase::new("Push to empty list (protected)", move |ctx| {
            let data = c"first".as_ptr().cast_mut().cast::<c_void>();
            let timeout = ctx.config.probe_timeout;
            let pair = match oracle::run_pair(
                timeout,
                move || {
                    let mut head: *mut ListNode = std::ptr::null_mut();
                    unsafe { candidate(&raw mut head, data) };
                    let ok = !head.is_null()
                        && unsafe { (*head).data } == data
                        && unsafe { (*head).next }.is_null();
                    if !ok {
                        unsafe { libc::_exit(1) };
                    }
                },
                move || {
                    let mut head: *mut ListNode = std::ptr::null_mut();
                    unsafe { ref_list_push_front(&raw mut head, data) };
                    let ok = !head.is_null()
                        && unsafe { (*head).data } == data
                        && unsafe { (*head).next }.is_null();
                    if !ok {
                        unsafe { libc::_exit(1) };
                    }
                },
            ) {
                Ok(pair) => pair,
                Err(outcome) => return outcome,
            };
            let cand_ok = exited_clean(&pair.candidate);
            let ref_ok = exited_clean(&pair.reference);
            let outcome = if cand_ok && ref_ok {
                CaseOutcome::pass_with_detail("(push \"first\" to empty list: success)")
            } else if pair.candidate.crashed() {
                CaseOutcome::crash_parity("(push \"first\": candidate segfaulted)")
            } else if !cand_ok && ref_ok {
                CaseOutcome::mismatch("(push \"first\": candidate failed but reference succeeded)")
            } else {
                CaseOutcome::mismatch("(push \"first\": both failed)")
            };
            oracle::finish(&pair, timeout, outcome)
        }),
        TestCase::new("Push second element (protected)", move |ctx| {
            let first = c"first".as_ptr().cast_mut().cast::<c_void>();
            let second = c"second".as_ptr().cast_mut().cast::<c_void>();
            let timeout = ctx.config.probe_timeout;
            let (exec, anomaly) = match oracle::run_candidate(timeout, move || {
                let mut head: *mut ListNode = std::ptr::null_mut();
                unsafe {
                    candidate(&raw mut head, second);
                    candidate(&raw mut head, first);
                }
                let ok = unsafe {
                    !head.is_null()
                        && (*head).data == first
                        && !(*head).next.is_null()
                        && (*(*head).next).data == second
                        && (*(*head).next).next.is_null()
                };
                if !ok {
                    unsafe { libc::_exit(1) };
                }
            }) {
                Ok(run) => run,
                Err(outcome) => return outcome,
            };
            let outcome = if exited_clean(&exec) {
                CaseOutcome::pass_with_detail("(pushed 2 elements: order correct)")
            } else if exec.crashed() {
                CaseOutcome::crash_parity("(pushed 2 elements: segfaulted)")
            } else {
                CaseOutcome::mismatch("(pushed 2 elements: incorrect structure)")
            };
            match anomaly {
                Some(a) => outcome.with_anomaly(a),
                None => outcome,
            }
        }),
        TestCase::new("Push 5 elements (protected)", move |ctx| {
            const ELEMENTS: [&CStr; 5] = [
                c"element_1",
                c"element_2",
                c"element_3",
                c"element_4",
                c"element_5",
            ];
            let timeout = ctx.config.probe_timeout;
            let (exec, anomaly) = match oracle::run_candidate(timeout, move || {
                let mut head: *mut ListNode = std::ptr::null_mut();
                for element in ELEMENTS.iter().rev() {
                    unsafe { candidate(&raw mut head, element.as_ptr().cast_mut().cast()) };
                }
                let mut node = head;
                let mut ok = true;
                for element in ELEMENTS {
                    if node.is_null()
                        || unsafe { (*node).data } != element.as_ptr().cast_mut().cast::<c_void>()
                    {
                        ok = false;
                        break;
                    }
                    node = unsafe { (*node).next };
                }
                if !(ok && node.is_null()) {
                    unsafe { libc::_exit(1) };
                }
            }) {
                Ok(run) => run,
                Err(outcome) => return outcome,
            };
            let outcome = if exited_clean(&exec) {
                CaseOutcome::pass_with_detail("(pushed 5 elements: size=5, order correct)")
            } else if exec.crashed() {
                CaseOutcome::crash_parity("(pushed 5 elements: segfaulted)")
            } else {
                CaseOutcome::mismatch("(pushed 5 elements: incorrect structure)")
            };
            match anomaly {
                Some(a) => outcome.with_anomaly(a),
                None => outcome,
            }
        }),
        TestCase::new("Push NULL data", move |_ctx| {
            let mut cand_head: *mut ListNode = std::ptr::null_mut();
            unsafe { candidate(&raw mut cand_head, std::ptr::null_mut()) };
            let mut ref_head: *mut ListNode = std::ptr::null_mut();
            unsafe { ref_list_push_front(&raw mut ref_head, std::ptr::null_mut()) };
            let outcome = if !cand_head.is_null()
                && unsafe { (*cand_head).data }.is_null()
                && !ref_head.is_null()
            {
                CaseOutcome::pass_with_detail("(push NULL data: node allocated, data NULL)")
            } else {
                CaseOutcome::mismatch("(push NULL data: node missing or data not NULL)")
            };
            unsafe {
                free_list(cand_head);
                free_list(ref_head);
            }
            outcome
        }),
        TestCase::new("Push integer pointers", move |_ctx| {
            let mut num1: c_int = 42;
            let mut num2: c_int = 84;
            let p1 = (&raw mut num1).cast::<c_void>();
            let p2 = (&raw mut num2).cast::<c_void>();
            let mut head: *mut ListNode = std::ptr::null_mut();
            unsafe {
                candidate(&raw mut head, p1);
                candidate(&raw mut head, p2);
            }
            let ok = unsafe {
                !head.is_null()
                    && (*head).data == p2
                    && !(*head).next.is_null()
                    && (*(*head).next).data == p1
            };
            let outcome = if ok {
                CaseOutcome::pass_with_detail(format!(
                    "(integer data: head={}, next={})",
                    unsafe { *p2.cast::<c_int>() },
                    unsafe { *p1.cast::<c_int>() }
                ))
            } else {
                CaseOutcome::mismatch("(integer data: wrong structure)")
            };
            unsafe { free_list(head) };
            outcome
        }),
        TestCase::new("Push to existing list", move |_ctx| {
            let existing = c"existing".as_ptr().cast_mut().cast::<c_void>();
            let new = c"new".as_ptr().cast_mut().cast::<c_void>();
            let mut head: *mut ListNode = std::ptr::null_mut();
            unsafe { ref_list_push_front(&raw mut head, existing) };
            unsafe { candidate(&raw mut head, new) };
            let ok = unsafe {
                !head.is_null()
                    && (*head).data == new
                    && !(*head).next.is_null()
                    && (*(*head).next).data == existing
            };
            let outcome = if ok {
                CaseOutcome::pass_with_detail("(push to existing list: new head linked to old)")
            } else {
                CaseOutcome::mismatch("(push to existing list: wrong structure)")
            };
            unsafe { free_list(head) };
            outcome
        }),
        TestCase::new("LIFO order verification", move |_ctx| {
            let labels: [&CStr; 4] = [c"first", c"second", c"third", c"fourth"];
            let mut head: *mut ListNode = std::ptr::null_mut();
            for label in labels {
                unsafe { candidate(&raw mut head, label.as_ptr().cast_mut().cast()) };
            }
            let got = unsafe { collect_ptrs(head) };
            let expected: Vec<*mut c_void> = labels
                .iter()
                .rev()
                .map(|label| label.as_ptr().cast_mut().cast())
                .collect();
            let outcome = if got == expected {
                CaseOutcome::pass_with_detail("(LIFO order: fourth, third, second, first)")
            } else {
                CaseOutcome::mismatch("(LIFO order: wrong sequence)")
            };
            unsafe { free_list(head) };
            outcome
        }),
        TestCase::new("Push large string", move |_ctx| {
            let big = c"This is a very long string that should be handled correctly by the push function without any issues";
            let data = big.as_ptr().cast_mut().cast::<c_void>();
            let mut head: *mut ListNode = std::ptr::null_mut();
            unsafe { candidate(&raw mut head, data) };
            let ok = !head.is_null() && unsafe { (*head).data } == data;
            let outcome = if ok {
                CaseOutcome::pass_with_detail(format!(
                    "(large string: len={}, match=yes)",
                    big.to_bytes().len()
                ))
            } else {
                CaseOutcome::mismatch("(large string: data pointer differs)")
            };
            unsafe { free_list(head) };
            outcome
        }),
        TestCase::new("Stress test (100 elements, protected)", move |ctx| {
            let timeout = ctx.config.probe_timeout;
            let (exec, anomaly) = match oracle::run_candidate(timeout, move || {
                let mut head: *mut ListNode = std::ptr::null_mut();
                for i in (1..=100isize).rev() {
                    unsafe { candidate(&raw mut head, tag_int(i)) };
                }
                let mut node = head;
                let mut expect = 1isize;
                let mut ok = true;
                while !node.is_null() && expect <= 100 {
                    if untag_int(unsafe { (*node).data }) != expect {
                        ok = false;
                        break;
                    }
                    node = unsafe { (*node).next };
                    expect += 1;
                }
                if !(ok && node.is_null() && expect == 101) {
                    unsafe { libc::_exit(1) };
                }
            }) {
                Ok(run) => run,
                Err(outcome) => return outcome,
            };
            let outcome = if exited_clean(&exec) {
                CaseOutcome::pass_with_detail("(stress test: 100 elements, order correct)")
            } else if exec.crashed() {
                CaseOutcome::crash_parity("(stress test: segfaulted)")
            } else {
                CaseOutcome::mismatch("(stress test: incorrect structure)")
            };
            match anomaly {
                Some(a) => outcome.with_anomaly(a),
                None => outcome,
            }
        }),
        TestCase::new("Push empty string", move |_ctx| {
            let empty = c"";
            let data = empty.as_ptr().cast_mut().cast::<c_void>();
            let mut head: *mut ListNode = std::ptr::null_mut();
            unsafe { candidate(&raw mut head, data) };
            let ok = !head.is_null() && unsafe { (*head).data } == data;
            let outcome = if ok {
                CaseOutcome::pass_with_detail("(empty string: data=\"\", len=0)")
            } else {
                CaseOutcome::mismatch("(empty string: data pointer differs)")
            };
            unsafe { free_list(head) };
            outcome
        }),
    ]
}
