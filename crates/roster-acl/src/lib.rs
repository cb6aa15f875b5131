//! Access control layer for Roster.
//!
//! Mutating operations are gated on the permissions stored on the target
//! record itself. See [`PermissionEvaluator`].

#![doc = include_str!("../README.md")]

pub mod evaluator;

pub use evaluator::{MISSING_PERMISSIONS, PermissionEvaluator, PermissionSource};
