//! Built-in candidate libraries.
//!
//! Three fixed registries exercise the three interesting shapes of a
//! candidate: fully correct (every slot backed by the reference), fully
//! stubbed (every slot returns the availability sentinel), and deliberately
//! broken in ways each equivalence rule is meant to catch.

use std::ffi::{c_char, c_int, c_void};

use crate::host;
use crate::list::{self, ListNode};
use crate::registry::{CandidateLib, SENTINEL, SENTINEL_INT, sentinel_ptr};
use crate::signatures::{ElemFreeFn, ListComparator};

/// Candidate where every slot is the reference itself. The suite against it
/// must pass everything.
#[must_use]
pub fn well_behaved() -> CandidateLib {
    CandidateLib {
        strlen: Some(host::host_strlen),
        strcpy: Some(host::host_strcpy),
        strcmp: Some(host::host_strcmp),
        write: Some(host::host_write),
        read: Some(host::host_read),
        strdup: Some(host::host_strdup),
        atoi_base: Some(host::ref_atoi_base),
        list_push_front: Some(list::ref_list_push_front),
        list_size: Some(list::ref_list_size),
        list_sort: Some(list::ref_list_sort),
        list_remove_if: Some(list::ref_list_remove_if),
    }
}

/// Candidate where every slot is linked but stubbed with the availability
/// sentinel. Every group must be reported "not found" and left unscored.
#[must_use]
pub fn weak_stubbed() -> CandidateLib {
    CandidateLib {
        strlen: Some(stub_strlen),
        strcpy: Some(stub_strcpy),
        strcmp: Some(stub_strcmp),
        write: Some(stub_write),
        read: Some(stub_read),
        strdup: Some(stub_strdup),
        atoi_base: Some(stub_atoi_base),
        list_push_front: Some(stub_list_push_front),
        list_size: Some(stub_list_size),
        list_sort: Some(stub_list_sort),
        list_remove_if: Some(stub_list_remove_if),
    }
}

/// Candidate with one representative defect per equivalence rule:
///
/// - `strlen` undercounts by one (exact-equality mismatch),
/// - `strcpy` and `strcmp` survive NULL inputs the reference faults on
///   (crash-parity mismatch),
/// - `strcmp` also clamps magnitudes to -1/0/1, which the sign-class rule
///   must still accept on value cases,
/// - `write` swallows errors, claiming the full count with errno untouched
///   (errno-and-return mismatch),
/// - `strdup` returns a fresh but corrupted copy (content mismatch while
///   pointer identity still differs),
/// - `atoi_base` keeps consuming sign characters, so "--42" parses as 42
///   instead of stopping at 0,
/// - `list_sort` orders against the comparator (descending under an
///   ascending comparator).
///
/// Everything else is the reference, so the remaining groups pass.
#[must_use]
pub fn defective() -> CandidateLib {
    CandidateLib {
        strlen: Some(defective_strlen),
        strcpy: Some(defective_strcpy),
        strcmp: Some(defective_strcmp),
        write: Some(defective_write),
        read: Some(host::host_read),
        strdup: Some(defective_strdup),
        atoi_base: Some(defective_atoi_base),
        list_push_front: Some(list::ref_list_push_front),
        list_size: Some(list::ref_list_size),
        list_sort: Some(defective_list_sort),
        list_remove_if: Some(list::ref_list_remove_if),
    }
}

// ---------------------------------------------------------------------------
// Sentinel stubs
// ---------------------------------------------------------------------------

unsafe extern "C" fn stub_strlen(_s: *const c_char) -> usize {
    SENTINEL
}

unsafe extern "C" fn stub_strcpy(_dst: *mut c_char, _src: *const c_char) -> *mut c_char {
    sentinel_ptr()
}

unsafe extern "C" fn stub_strcmp(_a: *const c_char, _b: *const c_char) -> c_int {
    SENTINEL_INT
}

unsafe extern "C" fn stub_write(_fd: c_int, _buf: *const c_void, _count: usize) -> isize {
    SENTINEL as isize
}

unsafe extern "C" fn stub_read(_fd: c_int, _buf: *mut c_void, _count: usize) -> isize {
    SENTINEL as isize
}

unsafe extern "C" fn stub_strdup(_s: *const c_char) -> *mut c_char {
    sentinel_ptr()
}

unsafe extern "C" fn stub_atoi_base(_s: *const c_char, _base: *const c_char) -> c_int {
    SENTINEL_INT
}

unsafe extern "C" fn stub_list_push_front(_begin_list: *mut *mut ListNode, _data: *mut c_void) {}

unsafe extern "C" fn stub_list_size(_begin_list: *mut ListNode) -> c_int {
    SENTINEL_INT
}

unsafe extern "C" fn stub_list_sort(_begin_list: *mut *mut ListNode, _cmp: Option<ListComparator>) {}

unsafe extern "C" fn stub_list_remove_if(
    _begin_list: *mut *mut ListNode,
    _data_ref: *mut c_void,
    _cmp: Option<ListComparator>,
    _free_fct: Option<ElemFreeFn>,
) {
}

// ---------------------------------------------------------------------------
// Defective implementations
// ---------------------------------------------------------------------------

unsafe extern "C" fn defective_strlen(s: *const c_char) -> usize {
    unsafe { libc::strlen(s) }.saturating_sub(1)
}

unsafe extern "C" fn defective_strcpy(dst: *mut c_char, src: *const c_char) -> *mut c_char {
    if dst.is_null() || src.is_null() {
        return dst;
    }
    unsafe { libc::strcpy(dst, src) }
}

unsafe extern "C" fn defective_strcmp(a: *const c_char, b: *const c_char) -> c_int {
    if a.is_null() || b.is_null() {
        return 0;
    }
    unsafe { libc::strcmp(a, b) }.signum()
}

unsafe extern "C" fn defective_write(fd: c_int, buf: *const c_void, count: usize) -> isize {
    let written = unsafe { libc::write(fd, buf, count) };
    if written < 0 {
        host::clear_errno();
        return count as isize;
    }
    written
}

unsafe extern "C" fn defective_strdup(s: *const c_char) -> *mut c_char {
    let dup = unsafe { libc::strdup(s) };
    if !dup.is_null() && unsafe { *dup } != 0 {
        unsafe { *dup = (*dup).wrapping_add(1) };
    }
    dup
}

unsafe extern "C" fn defective_atoi_base(s: *const c_char, base: *const c_char) -> c_int {
    if s.is_null() || base.is_null() {
        return 0;
    }
    let s = unsafe { std::ffi::CStr::from_ptr(s) }.to_bytes();
    let base = unsafe { std::ffi::CStr::from_ptr(base) }.to_bytes();
    let Some(radix) = asmcheck_core::convert::base_radix(base) else {
        return 0;
    };
    let mut i = 0;
    while i < s.len() && (s[i] == b' ' || (9..=13).contains(&s[i])) {
        i += 1;
    }
    let mut sign = 1i32;
    // bug under test: every sign character is consumed instead of at most one
    while i < s.len() && (s[i] == b'+' || s[i] == b'-') {
        if s[i] == b'-' {
            sign = -sign;
        }
        i += 1;
    }
    let mut result = 0i32;
    while i < s.len() {
        let Some(digit) = base.iter().position(|&b| b == s[i]) else {
            break;
        };
        result = result.wrapping_mul(radix as i32).wrapping_add(digit as i32);
        i += 1;
    }
    result.wrapping_mul(sign)
}

unsafe extern "C" fn defective_list_sort(
    begin_list: *mut *mut ListNode,
    cmp: Option<ListComparator>,
) {
    if begin_list.is_null() {
        return;
    }
    let head = unsafe { *begin_list };
    let Some(cmp) = cmp else {
        return;
    };
    if head.is_null() {
        return;
    }
    let mut tail_done: *mut ListNode = std::ptr::null_mut();
    loop {
        let mut swapped = false;
        let mut node = unsafe { *begin_list };
        while unsafe { (*node).next } != tail_done {
            let next = unsafe { (*node).next };
            // bug under test: the comparison is inverted
            if unsafe { cmp((*node).data, (*next).data) } < 0 {
                unsafe {
                    let tmp = (*node).data;
                    (*node).data = (*next).data;
                    (*next).data = tmp;
                }
                swapped = true;
            }
            node = next;
        }
        tail_done = node;
        if !swapped {
            break;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::{build_int_list, cmp_int_asc, collect_ints, free_list};

    #[test]
    fn test_well_behaved_links_everything() {
        assert_eq!(well_behaved().linked_count(), 11);
    }

    #[test]
    fn test_stub_returns_are_sentinels() {
        assert_eq!(unsafe { stub_strlen(c"test".as_ptr()) }, SENTINEL);
        assert_eq!(unsafe { stub_strcmp(c"a".as_ptr(), c"a".as_ptr()) }, SENTINEL_INT);
        assert_eq!(
            unsafe { stub_strdup(c"x".as_ptr()) },
            sentinel_ptr::<c_char>()
        );
        assert_eq!(
            unsafe { stub_write(1, c"test".as_ptr().cast(), 4) },
            SENTINEL as isize
        );
    }

    #[test]
    fn test_defective_strlen_undercounts() {
        assert_eq!(unsafe { defective_strlen(c"Hello".as_ptr()) }, 4);
        assert_eq!(unsafe { defective_strlen(c"".as_ptr()) }, 0);
    }

    #[test]
    fn test_defective_strcmp_clamps_but_keeps_sign() {
        assert_eq!(unsafe { defective_strcmp(c"abc".as_ptr(), c"abd".as_ptr()) }, -1);
        assert_eq!(unsafe { defective_strcmp(c"b".as_ptr(), c"a".as_ptr()) }, 1);
        assert_eq!(unsafe { defective_strcmp(std::ptr::null(), c"a".as_ptr()) }, 0);
    }

    #[test]
    fn test_defective_strdup_corrupts_fresh_copy() {
        let original = c"Hello";
        let dup = unsafe { defective_strdup(original.as_ptr()) };
        assert!(!dup.is_null());
        assert_ne!(dup.cast_const(), original.as_ptr());
        assert_ne!(unsafe { *dup }, original.to_bytes()[0] as c_char);
        unsafe { libc::free(dup.cast()) };
    }

    #[test]
    fn test_defective_atoi_base_consumes_extra_signs() {
        assert_eq!(
            unsafe { defective_atoi_base(c"--42".as_ptr(), c"0123456789".as_ptr()) },
            42
        );
        assert_eq!(
            unsafe { defective_atoi_base(c"-42".as_ptr(), c"0123456789".as_ptr()) },
            -42
        );
        assert_eq!(
            unsafe { defective_atoi_base(c"101".as_ptr(), c"01".as_ptr()) },
            5
        );
    }

    #[test]
    fn test_defective_sort_orders_against_comparator() {
        let mut list = build_int_list(&[1, 3, 2]);
        unsafe { defective_list_sort(&mut list, Some(cmp_int_asc)) };
        assert_eq!(unsafe { collect_ints(list) }, vec![3, 2, 1]);
        unsafe { free_list(list) };
    }

    #[test]
    fn test_defective_write_claims_success_on_bad_fd() {
        let (ret, err) = host::with_errno(|| unsafe {
            defective_write(-1, c"Hello".as_ptr().cast(), 5)
        });
        assert_eq!(ret, 5);
        assert_eq!(err, 0);
    }
}
