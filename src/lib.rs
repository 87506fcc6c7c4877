//! Blockfit (workspace facade crate).
//!
//! The engine, shared types and persistence live in dedicated crates under
//! `crates/`; this package re-exports them as `blockfit::{core, store, types}` and
//! hosts the headless command-line front end.

pub mod cli;

pub use blockfit_core as core;
pub use blockfit_store as store;
pub use blockfit_types as types;
