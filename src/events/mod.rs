//! Event plumbing shared by the picker components.
//!
//! - [`bus`]: the generic publish/subscribe hub every stateful component owns

pub mod bus;

pub use bus::{EventBus, Listener, WILDCARD};
