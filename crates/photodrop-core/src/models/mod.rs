//! Data models for the application
//!
//! Both entities are transient: nothing here is persisted by the relay.

mod remote;
mod upload;

pub use remote::*;
pub use upload::*;
