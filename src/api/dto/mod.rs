//! Data Transfer Objects for REST request/response serialization.
//!
//! Request types keep required fields optional so that handlers, not the
//! JSON extractor, decide how a missing field is reported.

pub mod common_dto;
pub mod journal_dto;
pub mod task_dto;

pub use common_dto::*;
pub use journal_dto::*;
pub use task_dto::*;
