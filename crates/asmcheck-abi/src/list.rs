//! Singly linked list boundary and reference operations.
//!
//! Nodes use libc's allocator on both sides of the differential: the
//! candidate's `list_remove_if` frees nodes the harness allocated, and the
//! reference frees nodes regardless of who pushed them.
//!
//! The reference operations are null-tolerant exactly as the grading
//! contract defines: a NULL head pointer or NULL comparator is a silent
//! no-op, never a fault.

use std::ffi::{CStr, c_int, c_void};

use crate::signatures::{ElemFreeFn, ListComparator};

/// Node layout shared with candidate code: `{ void *data; struct s_list *next; }`.
#[repr(C)]
pub struct ListNode {
    pub data: *mut c_void,
    pub next: *mut ListNode,
}

fn create_node(data: *mut c_void) -> *mut ListNode {
    let node = unsafe { libc::malloc(std::mem::size_of::<ListNode>()) }.cast::<ListNode>();
    if !node.is_null() {
        unsafe {
            (*node).data = data;
            (*node).next = std::ptr::null_mut();
        }
    }
    node
}

// ---------------------------------------------------------------------------
// Reference operations
// ---------------------------------------------------------------------------

/// Reference `list_push_front`: allocate a node carrying `data` in front.
///
/// # Safety
///
/// `begin_list`, when non-null, must point at a valid (possibly null) head.
pub unsafe extern "C" fn ref_list_push_front(begin_list: *mut *mut ListNode, data: *mut c_void) {
    if begin_list.is_null() {
        return;
    }
    let node = create_node(data);
    if node.is_null() {
        return;
    }
    unsafe {
        (*node).next = *begin_list;
        *begin_list = node;
    }
}

/// Reference `list_size`: number of nodes in the chain.
///
/// # Safety
///
/// `begin_list` must be null or the head of a valid chain.
pub unsafe extern "C" fn ref_list_size(begin_list: *mut ListNode) -> c_int {
    let mut count = 0;
    let mut node = begin_list;
    while !node.is_null() {
        count += 1;
        node = unsafe { (*node).next };
    }
    count
}

/// Reference `list_sort`: bubble sort swapping data pointers in place.
///
/// # Safety
///
/// `begin_list`, when non-null, must point at a valid chain head; `cmp`
/// must be callable on every data pointer in the chain.
pub unsafe extern "C" fn ref_list_sort(begin_list: *mut *mut ListNode, cmp: Option<ListComparator>) {
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
            if unsafe { cmp((*node).data, (*next).data) } > 0 {
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

/// Reference `list_remove_if`: unlink nodes whose data compares equal to
/// `data_ref`, applying `free_fct` to the data before freeing the node.
///
/// # Safety
///
/// `begin_list`, when non-null, must point at a valid chain head whose data
/// pointers are valid inputs to `cmp` and `free_fct`.
pub unsafe extern "C" fn ref_list_remove_if(
    begin_list: *mut *mut ListNode,
    data_ref: *mut c_void,
    cmp: Option<ListComparator>,
    free_fct: Option<ElemFreeFn>,
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

    let mut prev: *mut ListNode = std::ptr::null_mut();
    let mut current = head;
    while !current.is_null() {
        if unsafe { cmp((*current).data, data_ref) } == 0 {
            let to_remove = current;
            unsafe {
                if prev.is_null() {
                    *begin_list = (*current).next;
                } else {
                    (*prev).next = (*current).next;
                }
                current = (*current).next;
                if let Some(free_fct) = free_fct {
                    free_fct((*to_remove).data);
                }
                libc::free(to_remove.cast::<c_void>());
            }
        } else {
            prev = current;
            current = unsafe { (*current).next };
        }
    }
}

// ---------------------------------------------------------------------------
// Comparators and element hooks
// ---------------------------------------------------------------------------

/// Ascending comparator over pointer-tagged integers.
pub unsafe extern "C" fn cmp_int_asc(a: *mut c_void, b: *mut c_void) -> c_int {
    (a as isize).wrapping_sub(b as isize) as c_int
}

/// Descending comparator over pointer-tagged integers.
pub unsafe extern "C" fn cmp_int_desc(a: *mut c_void, b: *mut c_void) -> c_int {
    (b as isize).wrapping_sub(a as isize) as c_int
}

/// Comparator over NUL-terminated string data.
///
/// # Safety
///
/// Both data pointers must be valid C strings.
pub unsafe extern "C" fn cmp_str(a: *mut c_void, b: *mut c_void) -> c_int {
    unsafe { libc::strcmp(a.cast(), b.cast()) }
}

/// Element hook for non-owned data.
pub unsafe extern "C" fn free_noop(_data: *mut c_void) {}

// ---------------------------------------------------------------------------
// Harness helpers
// ---------------------------------------------------------------------------

/// Packs an integer into a data pointer.
#[must_use]
pub fn tag_int(value: isize) -> *mut c_void {
    value as *mut c_void
}

/// Unpacks a pointer-tagged integer.
#[must_use]
pub fn untag_int(data: *mut c_void) -> isize {
    data as isize
}

/// Builds a chain whose head carries `values[0]`.
#[must_use]
pub fn build_ptr_list(values: &[*mut c_void]) -> *mut ListNode {
    let mut head: *mut ListNode = std::ptr::null_mut();
    for &value in values.iter().rev() {
        unsafe { ref_list_push_front(&mut head, value) };
    }
    head
}

/// Builds a chain of pointer-tagged integers.
#[must_use]
pub fn build_int_list(values: &[isize]) -> *mut ListNode {
    let tagged: Vec<*mut c_void> = values.iter().map(|&v| tag_int(v)).collect();
    build_ptr_list(&tagged)
}

/// Builds a chain whose data pointers are the given C strings.
#[must_use]
pub fn build_str_list(values: &[&CStr]) -> *mut ListNode {
    let ptrs: Vec<*mut c_void> = values
        .iter()
        .map(|s| s.as_ptr().cast_mut().cast::<c_void>())
        .collect();
    build_ptr_list(&ptrs)
}

/// Collects the data pointers in chain order.
///
/// # Safety
///
/// `list` must be null or the head of a valid chain.
#[must_use]
pub unsafe fn collect_ptrs(list: *mut ListNode) -> Vec<*mut c_void> {
    let mut out = Vec::new();
    let mut node = list;
    while !node.is_null() {
        unsafe {
            out.push((*node).data);
            node = (*node).next;
        }
    }
    out
}

/// Collects pointer-tagged integers in chain order.
///
/// # Safety
///
/// `list` must be null or the head of a valid chain of tagged integers.
#[must_use]
pub unsafe fn collect_ints(list: *mut ListNode) -> Vec<isize> {
    unsafe { collect_ptrs(list) }.into_iter().map(untag_int).collect()
}

/// Number of nodes in the chain.
///
/// # Safety
///
/// `list` must be null or the head of a valid chain.
#[must_use]
pub unsafe fn node_count(list: *mut ListNode) -> usize {
    let mut count = 0;
    let mut node = list;
    while !node.is_null() {
        count += 1;
        node = unsafe { (*node).next };
    }
    count
}

/// True when both chains carry identical data pointers in the same order.
///
/// # Safety
///
/// Both arguments must be null or heads of valid chains.
#[must_use]
pub unsafe fn lists_equal(a: *mut ListNode, b: *mut ListNode) -> bool {
    let (mut a, mut b) = (a, b);
    while !a.is_null() && !b.is_null() {
        unsafe {
            if (*a).data != (*b).data {
                return false;
            }
            a = (*a).next;
            b = (*b).next;
        }
    }
    a.is_null() && b.is_null()
}

/// Frees every node in the chain (nodes only, never the data).
///
/// # Safety
///
/// `list` must be null or the head of a valid chain allocated with libc's
/// allocator; no node may be reachable elsewhere afterwards.
pub unsafe fn free_list(list: *mut ListNode) {
    let mut node = list;
    while !node.is_null() {
        unsafe {
            let next = (*node).next;
            libc::free(node.cast::<c_void>());
            node = next;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_collect_preserve_order() {
        let list = build_int_list(&[1, 2, 3]);
        assert_eq!(unsafe { collect_ints(list) }, vec![1, 2, 3]);
        assert_eq!(unsafe { node_count(list) }, 3);
        unsafe { free_list(list) };
    }

    #[test]
    fn test_push_front_is_lifo() {
        let mut head: *mut ListNode = std::ptr::null_mut();
        unsafe {
            ref_list_push_front(&mut head, tag_int(1));
            ref_list_push_front(&mut head, tag_int(2));
        }
        assert_eq!(unsafe { collect_ints(head) }, vec![2, 1]);
        unsafe { free_list(head) };
    }

    #[test]
    fn test_push_front_tolerates_null_head_pointer() {
        unsafe { ref_list_push_front(std::ptr::null_mut(), tag_int(1)) };
    }

    #[test]
    fn test_size_counts_and_handles_null() {
        assert_eq!(unsafe { ref_list_size(std::ptr::null_mut()) }, 0);
        let list = build_int_list(&[9, 8, 7, 6]);
        assert_eq!(unsafe { ref_list_size(list) }, 4);
        unsafe { free_list(list) };
    }

    #[test]
    fn test_sort_orders_integers() {
        let mut list = build_int_list(&[5, 1, 4, 2, 3]);
        unsafe { ref_list_sort(&mut list, Some(cmp_int_asc)) };
        assert_eq!(unsafe { collect_ints(list) }, vec![1, 2, 3, 4, 5]);
        unsafe { free_list(list) };
    }

    #[test]
    fn test_sort_keeps_duplicates() {
        let mut list = build_int_list(&[3, 1, 3, 2, 1]);
        unsafe { ref_list_sort(&mut list, Some(cmp_int_asc)) };
        assert_eq!(unsafe { collect_ints(list) }, vec![1, 1, 2, 3, 3]);
        unsafe { free_list(list) };
    }

    #[test]
    fn test_sort_tolerates_null_arguments() {
        unsafe { ref_list_sort(std::ptr::null_mut(), Some(cmp_int_asc)) };
        let mut list = build_int_list(&[2, 1]);
        unsafe { ref_list_sort(&mut list, None) };
        assert_eq!(unsafe { collect_ints(list) }, vec![2, 1]);
        unsafe { free_list(list) };
    }

    #[test]
    fn test_sort_orders_strings() {
        let zebra = c"zebra";
        let apple = c"apple";
        let mango = c"mango";
        let mut list = build_str_list(&[zebra, apple, mango]);
        unsafe { ref_list_sort(&mut list, Some(cmp_str)) };
        let order = unsafe { collect_ptrs(list) };
        assert_eq!(order[0], apple.as_ptr().cast_mut().cast());
        assert_eq!(order[1], mango.as_ptr().cast_mut().cast());
        assert_eq!(order[2], zebra.as_ptr().cast_mut().cast());
        unsafe { free_list(list) };
    }

    #[test]
    fn test_remove_if_unlinks_matches() {
        let mut list = build_int_list(&[1, 2, 5, 3, 5, 4, 5, 5, 6]);
        unsafe {
            ref_list_remove_if(&mut list, tag_int(5), Some(cmp_int_asc), Some(free_noop));
        }
        assert_eq!(unsafe { collect_ints(list) }, vec![1, 2, 3, 4, 6]);
        unsafe { free_list(list) };
    }

    #[test]
    fn test_remove_if_can_empty_the_list() {
        let mut list = build_int_list(&[7, 7, 7]);
        unsafe {
            ref_list_remove_if(&mut list, tag_int(7), Some(cmp_int_asc), Some(free_noop));
        }
        assert!(list.is_null());
    }

    #[test]
    fn test_remove_if_tolerates_null_arguments() {
        unsafe {
            ref_list_remove_if(
                std::ptr::null_mut(),
                tag_int(1),
                Some(cmp_int_asc),
                Some(free_noop),
            );
        }
        let mut list = build_int_list(&[1, 2]);
        unsafe { ref_list_remove_if(&mut list, tag_int(1), None, Some(free_noop)) };
        assert_eq!(unsafe { collect_ints(list) }, vec![1, 2]);
        unsafe { free_list(list) };
    }

    #[test]
    fn test_comparators_report_sign() {
        assert!(unsafe { cmp_int_asc(tag_int(3), tag_int(5)) } < 0);
        assert!(unsafe { cmp_int_asc(tag_int(5), tag_int(3)) } > 0);
        assert_eq!(unsafe { cmp_int_asc(tag_int(4), tag_int(4)) }, 0);
        assert!(unsafe { cmp_int_desc(tag_int(3), tag_int(5)) } > 0);
    }
}
