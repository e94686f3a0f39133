//! # taskjournal
//!
//! REST backend for tasks and journal entries behind a shared bearer
//! secret.
//!
//! Every resource request passes the authorization gate, is translated
//! into a single store operation, and is serialized back as JSON. Tasks
//! may link to a journal entry; deleting the entry leaves the link as-is.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── Authorization gate (api/auth)
//!     ├── REST Handlers (api/handlers)
//!     │
//!     ├── Validation (domain/)
//!     │
//!     └── SQLite Persistence (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
