//! `ft_list_sort` scenarios.
//!
//! Both sides sort chains built from the same values and the resulting
//! orders are compared. The reference tolerates NULL inputs, so the NULL
//! probes only fork the candidate side.

use std::ffi::CStr;

use asmcheck_abi::list::{
    ListNode, build_int_list, build_str_list, cmp_int_asc, cmp_int_desc, cmp_str, collect_ints,
    collect_ptrs, free_list, ref_list_push_front, ref_list_sort, tag_int,
};
use asmcheck_abi::registry::CandidateLib;
use asmcheck_abi::signatures::{ListComparator, ListSortFn};

use crate::case::{CaseOutcome, TestCase};
use crate::error::HarnessError;
use crate::oracle;
use crate::runner::RunContext;

pub fn probe(ctx: &RunContext) -> Result<bool, HarnessError> {
    let Some(candidate) = ctx.lib.list_sort else {
        return Ok(false);
    };
    let mut head = build_int_list(&[3, 1, 2]);
    unsafe { candidate(&raw mut head, Some(cmp_int_asc)) };
    let after = unsafe { collect_ints(head) };
    unsafe { free_list(head) };
    Ok(after != [3, 1, 2])
}

fn sorted_ints_case(
    name: &'static str,
    pass_text: &'static str,
    values: &'static [isize],
    cmp: ListComparator,
    candidate: ListSortFn,
) -> TestCase {
    TestCase::new(name, move |_ctx| {
        let mut cand_head = build_int_list(values);
        let mut ref_head = build_int_list(values);
        unsafe {
            candidate(&raw mut cand_head, Some(cmp));
            ref_list_sort(&raw mut ref_head, Some(cmp));
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
    let Some(candidate) = lib.list_sort else {
        return Vec::new();
    };
    vec![
        TestCase::new("NULL begin_list parameter", move |ctx| {
            let timeout = ctx.config.probe_timeout;
            let (exec, anomaly) = match oracle::run_candidate(timeout, move || {
                unsafe { candidate(std::ptr::null_mut(), Some(cmp_int_asc)) };
            }) {
                Ok(run) => run,
                Err(outcome) => return outcome,
            };
            unsafe { ref_list_sort(std::ptr::null_mut(), Some(cmp_int_asc)) };
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
                    candidate(&raw mut head, None);
                }
            }) {
                Ok(run) => run,
                Err(outcome) => return outcome,
            };
            let mut head: *mut ListNode = std::ptr::null_mut();
            unsafe {
                ref_list_push_front(&raw mut head, tag_int(1));
                ref_list_sort(&raw mut head, None);
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
                candidate(&raw mut cand_head, Some(cmp_int_asc));
                ref_list_sort(&raw mut ref_head, Some(cmp_int_asc));
            }
            if cand_head.is_null() && ref_head.is_null() {
                CaseOutcome::pass_with_detail("Empty list remains NULL")
            } else {
                CaseOutcome::mismatch("(empty list: head no longer NULL)")
            }
        }),
        sorted_ints_case(
            "Single element",
            "Single element list unchanged",
            &[42],
            cmp_int_asc,
            candidate,
        ),
        sorted_ints_case(
            "Two elements (ascending)",
            "Sorted: 3, 5",
            &[5, 3],
            cmp_int_asc,
            candidate,
        ),
        sorted_ints_case(
            "Two elements (descending)",
            "Sorted: 5, 3",
            &[3, 5],
            cmp_int_desc,
            candidate,
        ),
        sorted_ints_case(
            "Already sorted (ascending)",
            "Already sorted: 1, 2, 3, 4",
            &[1, 2, 3, 4],
            cmp_int_asc,
            candidate,
        ),
        sorted_ints_case(
            "Reverse sorted list",
            "Sorted: 1, 2, 3, 4",
            &[4, 3, 2, 1],
            cmp_int_asc,
            candidate,
        ),
        sorted_ints_case(
            "Random order (5 elements)",
            "Sorted: 1, 2, 3, 4, 5",
            &[3, 1, 4, 2, 5],
            cmp_int_asc,
            candidate,
        ),
        sorted_ints_case(
            "Duplicate values",
            "Sorted: 1, 1, 2, 3, 3",
            &[3, 1, 3, 2, 1],
            cmp_int_asc,
            candidate,
        ),
        TestCase::new("String comparison", move |_ctx| {
            let words: [&CStr; 4] = [c"zebra", c"apple", c"mango", c"banana"];
            let mut cand_head = build_str_list(&words);
            let mut ref_head = build_str_list(&words);
            unsafe {
                candidate(&raw mut cand_head, Some(cmp_str));
                ref_list_sort(&raw mut ref_head, Some(cmp_str));
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
                CaseOutcome::pass_with_detail("Sorted: apple, banana, mango, zebra")
            } else {
                CaseOutcome::mismatch(format!("(expected {expected:?}, got {got:?})"))
            }
        }),
        sorted_ints_case(
            "Large list (20 elements)",
            "20 elements correctly sorted",
            &[
                15, 8, 23, 4, 16, 42, 11, 7, 19, 3, 28, 13, 6, 31, 9, 21, 2, 17, 5, 12,
            ],
            cmp_int_asc,
            candidate,
        ),
    ]
}
