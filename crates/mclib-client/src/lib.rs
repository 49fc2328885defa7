//! The connecting-client façade (§3 "Client", §7 "Public surface", §11):
//! glues the protocol core, version adapters, and the world/inventory/entity
//! managers together behind one handle a caller drives with `step`/`run`.

pub mod auth;
pub mod client;
pub mod credentials;
pub mod error;

pub use client::{Client, ProtocolVersion, StepOutcome};
pub use credentials::Credentials;
pub use error::ClientError;
