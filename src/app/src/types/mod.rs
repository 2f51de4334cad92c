//! Domain-based type organization
//!
//! Types are organized by domain to match the structure in `update/`:
//! - scan: Simulated network scan sequence
//! - form: Credential form, validation and submission
//! - message: Status message region

pub mod form;
pub mod message;
pub mod scan;

pub use form::*;
pub use message::*;
pub use scan::*;
