//! # asmcheck-abi
//!
//! The candidate boundary: everything that touches the C ABI.
//!
//! A candidate library is a set of typed extern "C" function pointers
//! collected in a [`registry::CandidateLib`]. This crate defines those
//! signatures, the `repr(C)` list node the bonus functions operate on, the
//! null-tolerant reference list operations, host-libc reference bindings
//! with errno capture, and the built-in sample candidates used by the CLI
//! and the test suite.

pub mod host;
pub mod list;
pub mod registry;
pub mod sample;
pub mod signatures;
