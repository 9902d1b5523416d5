//! `ft_list_remove_if` scenarios.
//!
//! Matching nodes are unlinked and freed by the implementation under test,
//! so surviving chains are compared value by value against the reference.
//! Data pointers are tagged integers or static strings and take a no-op
//! free callback.

use std::ffi::CStr;

use asmcheck_abi::list::{
    ListNode, build_int_list, build_str_list, cmp_int_asc, cmp_str, collect_ints, collect_ptrs,
    free_list, free_noop, ref_list_push_front, ref_list_remove_if, tag_int,
};
use asmcheck_abi::registry::CandidateLib;
use asmcheck_abi::signatures::ListRemoveIfFn;

use crate::case::{CaseOutcome, TestCase};
use crate::error::HarnessError;
use crate::oracle;
use crate::runner::RunContext;

pub fn probe(ctx: &RunContext) -> Result<bool, HarnessError> {
    let Some(candidate) = ctx.lib.list_remove_if else {
        return Ok(false);
    };
    let mut head = build_int_list(&[1, 2, 3]);
    unsafe { candidate(&raw mut head, tag_int(2), Some(cmp_int_asc), Some(free_noop)) };
    let after = unsafe { collect_ints(head) };
    unsafe { free_list(head) };
    Ok(after != [1, 2, 3])
}

fn remove_ints_case(
    name: &'static str,
    pass_text: &'static str,
    values: &'static [isize],
    target: isize,
    candidate: ListRemoveIfFn,
) -> TestCase {
    TestCase::new(name, move |_ctx| {
        let mut cand_head = build_int_list(values);
        let mut ref_head = build_int_list(values);
        unsafe {
            candidate(
                &raw mut cand_head,
                tag_int(target),
                Some(cmp_int_asc),
                Some(free_noop),
            );
            ref_list_remove_if(
                &raw mut ref_head,
                tag_int(target),
                Some(cmp_int_asc),
                Some(free_noop),
            );
        }
        let got = unsafe { collect_ints(cand_head) };
        let expected = unsafe { collect_ints(ref_head) };
        unsafe {
            free_list(cand_head);
            free_list(ref_head);
        }
        if got == expected {
            CaseOutcome::pass_with_detail(pass_text)
        } else {
            CaseOutcome::mismatch(format!("(expected {expected:?}, got {got:?})"))
        }
    })
}

pub fn cases(lib: &CandidateLib) -> Vec<TestCase> {
    let Some(candidate) = lib.list_remove_if else {
        return Vec::new();
    };
    vec![
        TestCase::new("NULL begin_list parameter", move |ctx| {
            let timeout = ctx.config.probe_timeout;
            let (exec, anomaly) = match oracle::run_candidate(timeout, move || {
                unsafe {
                    candidate(
                        std::ptr::null_mut(),
                        tag_int(1),
                        Some(cmp_int_asc),
                        Some(free_noop),
                    );
                };
            }) {
                Ok(run) => run,
                Err(outcome) => return outcome,
            };
            unsafe {
                ref_list_remove_if(
                    std::ptr::null_mut(),
                    tag_int(1),
                    Some(cmp_int_asc),
                    Some(free_noop),
                );
            }
            let outcome = if exec.crashed() {
                CaseOutcome::crash_parity("candidate crashed on NULL begin_list")
            } else {
                CaseOutcome::pass_with_detail("Both handled NULL without crashing")
            };
            match anomaly {
                Some(a) => outcome.with_anomaly(a),
                None => outcome,
            }
        }),
        TestCase::new("NULL comparison function", move |ctx| {
            let timeout = ctx.config.probe_timeout;
            let (exec, anomaly) = match oracle::run_candidate(timeout, move || {
                let mut head: *mut ListNode = std::ptr::null_mut();
                unsafe {
                    ref_list_push_front(&raw mut head, tag_int(1));
                    candidate(&raw mut head, tag_int(1), None, Some(free_noop));
                }
            }) {
                Ok(run) => run,
                Err(outcome) => return outcome,
            };
            let mut head: *mut ListNode = std::ptr::null_mut();
            unsafe {
                ref_list_push_front(&raw mut head, tag_int(1));
                ref_list_remove_if(&raw mut head, tag_int(1), None, Some(free_noop));
                free_list(head);
            }
            let outcome = if exec.crashed() {
                CaseOutcome::crash_parity("candidate crashed on NULL cmp")
            } else {
                CaseOutcome::pass_with_detail("Both handled NULL cmp without crashing")
            };
            match anomaly {
                Some(a) => outcome.with_anomaly(a),
                None => outcome,
            }
        }),
        TestCase::new("Empty list", move |_ctx| {
            let mut cand_head: *mut ListNode = std::ptr::null_mut();
            let mut ref_head: *mut ListNode = std::ptr::null_mut();
            unsafe {
                candidate(
                    &raw mut cand_head,
                    tag_int(1),
                    Some(cmp_int_asc),
                    Some(free_noop),
                );
                ref_list_remove_if(
                    &raw mut ref_head,
                    tag_int(1),
                    Some(cmp_int_asc),
                    Some(free_noop),
                );
            }
            if cand_head.is_null() && ref_head.is_null() {
                CaseOutcome::pass_with_detail("Empty list remains NULL")
            } else {
                CaseOutcome::mismatch("(empty list: head no longer NULL)")
            }
        }),
        remove_ints_case(
            "Remove first element",
            "Removed first element, list: [2, 3]",
            &[1, 2, 3],
            1,
            candidate,
        ),
        remove_ints_case(
            "Remove middle element",
            "Removed middle element, list: [1, 3]",
            &[1, 2, 3],
            2,
            candidate,
        ),
        remove_ints_case(
            "Remove last element",
            "Removed last element, list: [1, 2]",
            &[1, 2, 3],
            3,
            candidate,
        ),
        remove_ints_case(
            "Remove all elements",
            "All elements removed, list is NULL",
            &[5, 5, 5],
            5,
            candidate,
        ),
        remove_ints_case(
            "Remove non-existent value",
            "No elements removed, list: [1, 2, 3]",
            &[1, 2, 3],
            99,
            candidate,
        ),
        remove_ints_case(
            "Remove multiple occurrences",
            "Removed all occurrences of 1, list: [2, 3]",
            &[1, 2, 1, 3, 1],
            1,
            candidate,
        ),
        TestCase::new("String comparison", move |_ctx| {
            let words: [&CStr; 3] = [c"apple", c"banana", c"cherry"];
            let data_ref = c"banana".as_ptr().cast_mut().cast();
            let mut cand_head = build_str_list(&words);
            let mut ref_head = build_str_list(&words);
            unsafe {
                candidate(&raw mut cand_head, data_ref, Some(cmp_str), Some(free_noop));
                ref_list_remove_if(&raw mut ref_head, data_ref, Some(cmp_str), Some(free_noop));
            }
            let as_strings = |head: *mut ListNode| -> Vec<String> {
                unsafe { collect_ptrs(head) }
                    .into_iter()
                    .map(|p| {
                        unsafe { CStr::from_ptr(p.cast()) }
                            .to_string_lossy()
                            .into_owned()
                    })
                    .collect()
            };
            let got = as_strings(cand_head);
            let expected = as_strings(ref_head);
            unsafe {
                free_list(cand_head);
                free_list(ref_head);
            }
            if got == expected {
                CaseOutcome::pass_with_detail("Removed 'banana', list: [apple, cherry]")
            } else {
                CaseOutcome::mismatch(format!("(expected {expected:?}, got {got:?})"))
            }
        }),
        remove_ints_case(
            "Remove from single-element list",
            "Single element removed, list is NULL",
            &[42],
            42,
            candidate,
        ),
        remove_ints_case(
            "Large list multiple removals",
            "Removed all 5s, list: [1, 2, 3, 4, 6]",
            &[1, 2, 5, 3, 5, 4, 5, 5, 6],
            5,
            candidate,
        ),
    ]
}
