//! Typed extern "C" signatures for every function under test.
//!
//! Comparators are strongly typed two-argument functions. Parameters the
//! contract allows to be NULL (the sort/remove comparator and the element
//! free hook) are `Option` of a function pointer, which has the same ABI as
//! a nullable C function pointer.

use std::ffi::{c_char, c_int, c_void};

use crate::list::ListNode;

/// `size_t strlen(const char *s)`
pub type StrlenFn = unsafe extern "C" fn(*const c_char) -> usize;

/// `char *strcpy(char *dst, const char *src)`
pub type StrcpyFn = unsafe extern "C" fn(*mut c_char, *const c_char) -> *mut c_char;

/// `int strcmp(const char *s1, const char *s2)`
pub type StrcmpFn = unsafe extern "C" fn(*const c_char, *const c_char) -> c_int;

/// `ssize_t write(int fd, const void *buf, size_t count)`
pub type WriteFn = unsafe extern "C" fn(c_int, *const c_void, usize) -> isize;

/// `ssize_t read(int fd, void *buf, size_t count)`
pub type ReadFn = unsafe extern "C" fn(c_int, *mut c_void, usize) -> isize;

/// `char *strdup(const char *s)`
pub type StrdupFn = unsafe extern "C" fn(*const c_char) -> *mut c_char;

/// `int atoi_base(const char *str, const char *base)`
pub type AtoiBaseFn = unsafe extern "C" fn(*const c_char, *const c_char) -> c_int;

/// Two-argument element comparator: negative, zero, or positive.
pub type ListComparator = unsafe extern "C" fn(*mut c_void, *mut c_void) -> c_int;

/// Element destructor applied to node data before the node is freed.
pub type ElemFreeFn = unsafe extern "C" fn(*mut c_void);

/// `void list_push_front(t_list **begin_list, void *data)`
pub type ListPushFrontFn = unsafe extern "C" fn(*mut *mut ListNode, *mut c_void);

/// `int list_size(t_list *begin_list)`
pub type ListSizeFn = unsafe extern "C" fn(*mut ListNode) -> c_int;

/// `void list_sort(t_list **begin_list, int (*cmp)(void *, void *))`
pub type ListSortFn = unsafe extern "C" fn(*mut *mut ListNode, Option<ListComparator>);

/// `void list_remove_if(t_list **begin_list, void *data_ref, int (*cmp)(void *, void *), void (*free_fct)(void *))`
pub type ListRemoveIfFn =
    unsafe extern "C" fn(*mut *mut ListNode, *mut c_void, Option<ListComparator>, Option<ElemFreeFn>);
