//! exptrack_core - pure types and functions shared by the exptrack client.
//!
//! Nothing in this crate performs I/O. Message types, tag validation, the
//! wire codec and the snapshot cache state machine all live here so they can
//! be tested without a server.

pub mod cache;
pub mod codec;
pub mod serde;
pub mod tracking;
