//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the listing paginator, the tag-overlap similarity ranker, and the
//! form validator, plus the ports that infrastructure must implement.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod similarity;
pub mod validation;
