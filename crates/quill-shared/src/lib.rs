//! # Quill Shared
//!
//! Shared types between the API server and its clients: view DTOs and the
//! standard response envelopes.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
