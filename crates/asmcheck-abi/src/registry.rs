//! Capability registry for the candidate library.
//!
//! The build/link step that produces a candidate decides which functions
//! exist; the harness only ever sees this registry. A `None` slot means the
//! symbol was never linked. A `Some` slot may still be a stub that returns
//! the sentinel, which the per-group availability probes detect.

use std::ffi::c_int;
use std::fmt;

use crate::signatures::{
    AtoiBaseFn, ListPushFrontFn, ListRemoveIfFn, ListSizeFn, ListSortFn, ReadFn, StrcmpFn,
    StrcpyFn, StrdupFn, StrlenFn, WriteFn,
};

/// Reserved "not implemented" return value, as an address-sized integer.
pub const SENTINEL: usize = 0xDEAD_BEEF;

/// The sentinel reinterpreted as a C int (what `0xDEADBEEF` truncates to).
pub const SENTINEL_INT: c_int = -559_038_737;

/// The sentinel as a pointer, for functions returning `char *`.
#[must_use]
pub fn sentinel_ptr<T>() -> *mut T {
    SENTINEL as *mut T
}

// ---------------------------------------------------------------------------
// Function identity
// ---------------------------------------------------------------------------

/// Every function the suite knows how to test, in suite order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Strlen,
    Strcpy,
    Strcmp,
    Write,
    Read,
    Strdup,
    AtoiBase,
    ListPushFront,
    ListSize,
    ListSort,
    ListRemoveIf,
}

/// Scoring class of a function group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionClass {
    Mandatory,
    Bonus,
}

impl Function {
    /// Suite order: mandatory functions first, then bonus.
    pub const ALL: [Function; 11] = [
        Function::Strlen,
        Function::Strcpy,
        Function::Strcmp,
        Function::Write,
        Function::Read,
        Function::Strdup,
        Function::AtoiBase,
        Function::ListPushFront,
        Function::ListSize,
        Function::ListSort,
        Function::ListRemoveIf,
    ];

    #[must_use]
    pub fn class(self) -> FunctionClass {
        match self {
            Function::Strlen
            | Function::Strcpy
            | Function::Strcmp
            | Function::Write
            | Function::Read
            | Function::Strdup => FunctionClass::Mandatory,
            Function::AtoiBase
            | Function::ListPushFront
            | Function::ListSize
            | Function::ListSort
            | Function::ListRemoveIf => FunctionClass::Bonus,
        }
    }

    /// Symbol name the candidate exports.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Function::Strlen => "ft_strlen",
            Function::Strcpy => "ft_strcpy",
            Function::Strcmp => "ft_strcmp",
            Function::Write => "ft_write",
            Function::Read => "ft_read",
            Function::Strdup => "ft_strdup",
            Function::AtoiBase => "ft_atoi_base",
            Function::ListPushFront => "ft_list_push_front",
            Function::ListSize => "ft_list_size",
            Function::ListSort => "ft_list_sort",
            Function::ListRemoveIf => "ft_list_remove_if",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for FunctionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionClass::Mandatory => f.write_str("mandatory"),
            FunctionClass::Bonus => f.write_str("bonus"),
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Function-pointer slots for one candidate library.
#[derive(Clone, Copy, Default)]
pub struct CandidateLib {
    pub strlen: Option<StrlenFn>,
    pub strcpy: Option<StrcpyFn>,
    pub strcmp: Option<StrcmpFn>,
    pub write: Option<WriteFn>,
    pub read: Option<ReadFn>,
    pub strdup: Option<StrdupFn>,
    pub atoi_base: Option<AtoiBaseFn>,
    pub list_push_front: Option<ListPushFrontFn>,
    pub list_size: Option<ListSizeFn>,
    pub list_sort: Option<ListSortFn>,
    pub list_remove_if: Option<ListRemoveIfFn>,
}

impl CandidateLib {
    /// Whether the symbol was linked at all.
    #[must_use]
    pub fn linked(&self, function: Function) -> bool {
        match function {
            Function::Strlen => self.strlen.is_some(),
            Function::Strcpy => self.strcpy.is_some(),
            Function::Strcmp => self.strcmp.is_some(),
            Function::Write => self.write.is_some(),
            Function::Read => self.read.is_some(),
            Function::Strdup => self.strdup.is_some(),
            Function::AtoiBase => self.atoi_base.is_some(),
            Function::ListPushFront => self.list_push_front.is_some(),
            Function::ListSize => self.list_size.is_some(),
            Function::ListSort => self.list_sort.is_some(),
            Function::ListRemoveIf => self.list_remove_if.is_some(),
        }
    }

    /// Copy of the registry with one slot emptied.
    #[must_use]
    pub fn without(mut self, function: Function) -> Self {
        match function {
            Function::Strlen => self.strlen = None,
            Function::Strcpy => self.strcpy = None,
            Function::Strcmp => self.strcmp = None,
            Function::Write => self.write = None,
            Function::Read => self.read = None,
            Function::Strdup => self.strdup = None,
            Function::AtoiBase => self.atoi_base = None,
            Function::ListPushFront => self.list_push_front = None,
            Function::ListSize => self.list_size = None,
            Function::ListSort => self.list_sort = None,
            Function::ListRemoveIf => self.list_remove_if = None,
        }
        self
    }

    /// Number of linked slots.
    #[must_use]
    pub fn linked_count(&self) -> usize {
        Function::ALL.iter().filter(|f| self.linked(**f)).count()
    }
}

impl fmt::Debug for CandidateLib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let linked: Vec<&str> = Function::ALL
            .iter()
            .filter(|func| self.linked(**func))
            .map(|func| func.symbol())
            .collect();
        f.debug_struct("CandidateLib").field("linked", &linked).finish()
    }
}
