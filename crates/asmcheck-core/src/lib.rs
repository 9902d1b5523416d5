//! # asmcheck-core
//!
//! Pure reference semantics for the asmcheck conformance harness.
//!
//! This crate holds the oracle logic that does not touch the C ABI: the
//! base-conversion reference used to judge candidate `atoi_base`
//! implementations, and the sign-class equivalence used for comparison
//! functions. No `unsafe` code is permitted at the crate level.

#![deny(unsafe_code)]

pub mod convert;
pub mod sign;
