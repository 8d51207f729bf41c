//! Network layer - relay submissions over HTTP
//!
//! The Network actor receives submit commands and sends back replies.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
