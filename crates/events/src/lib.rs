//! Domain events and their distribution.
//!
//! Domain crates define typed events implementing [`Event`]; infrastructure
//! wraps them in [`EventEnvelope`]s and fans them out through an [`EventBus`].

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
