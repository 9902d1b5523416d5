//! Per-function scenario tables.
//!
//! Each module exposes `probe`, which distinguishes a live implementation
//! from a weak sentinel stub, and `cases`, which builds the group's scenario
//! list against a linked candidate. An unlinked slot builds no cases.

pub mod atoi_base;
pub mod list_push_front;
pub mod list_remove_if;
pub mod list_size;
pub mod list_sort;
pub mod read;
pub mod strcmp;
pub mod strcpy;
pub mod strdup;
pub mod strlen;
pub mod write;
