//! core
//!
//! Core domain types, schemas, and rules for Cindy.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName
//! - [`label`] - Label vocabulary and transition table
//! - [`tag`] - Encoding of (label, branch) pairs as tag names
//! - [`store`] - Label storage: tag-backed and in-memory
//! - [`manifest`] - Branch change manifest
//! - [`safety`] - Schema safety validation
//! - [`review`] - Reviews and the review gate
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - The label set is closed; unknown labels are unrepresentable
//! - Rule checks are pure and total; only storage touches the repository

pub mod config;
pub mod label;
pub mod manifest;
pub mod review;
pub mod safety;
pub mod store;
pub mod tag;
pub mod types;
