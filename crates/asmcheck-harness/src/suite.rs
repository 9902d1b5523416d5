//! The standard suite: one group per function, in suite order.

use asmcheck_abi::registry::{CandidateLib, Function};

use crate::case::TestCase;
use crate::error::HarnessError;
use crate::groups;
use crate::runner::RunContext;

/// One function group: an availability probe plus a case builder.
///
/// The probe answers "is this function really implemented", distinguishing a
/// live implementation from a weak stub that returns the sentinel. The builder
/// is only consulted when the probe says yes.
pub struct FunctionGroup {
    pub function: Function,
    pub probe: fn(&RunContext) -> Result<bool, HarnessError>,
    pub build: fn(&CandidateLib) -> Vec<TestCase>,
}

/// All eleven groups, mandatory first, then bonus.
#[must_use]
pub fn standard() -> Vec<FunctionGroup> {
    vec![
        FunctionGroup {
            function: Function::Strlen,
            probe: groups::strlen::probe,
            build: groups::strlen::cases,
        },
        FunctionGroup {
            function: Function::Strcpy,
            probe: groups::strcpy::probe,
            build: groups::strcpy::cases,
        },
        FunctionGroup {
            function: Function::Strcmp,
            probe: groups::strcmp::probe,
            build: groups::strcmp::cases,
        },
        FunctionGroup {
            function: Function::Write,
            probe: groups::write::probe,
            build: groups::write::cases,
        },
        FunctionGroup {
            function: Function::Read,
            probe: groups::read::probe,
            build: groups::read::cases,
        },
        FunctionGroup {
            function: Function::Strdup,
            probe: groups::strdup::probe,
            build: groups::strdup::cases,
        },
        FunctionGroup {
            function: Function::AtoiBase,
            probe: groups::atoi_base::probe,
            build: groups::atoi_base::cases,
        },
        FunctionGroup {
            function: Function::ListPushFront,
            probe: groups::list_push_front::probe,
            build: groups::list_push_front::cases,
        },
        FunctionGroup {
            function: Function::ListSize,
            probe: groups::list_size::probe,
            build: groups::list_size::cases,
        },
        FunctionGroup {
            function: Function::ListSort,
            probe: groups::list_sort::probe,
            build: groups::list_sort::cases,
        },
        FunctionGroup {
            function: Function::ListRemoveIf,
            probe: groups::list_remove_if::probe,
            build: groups::list_remove_if::cases,
        },
    ]
}
