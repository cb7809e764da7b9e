//! Built-in consumers.

/// Consumer that calls a closure for every item.
pub mod callback_consumer;
/// Consumer that collects items into a `Vec`.
pub mod vec_consumer;

pub use callback_consumer::{CallbackConsumer, ItemCallback};
pub use vec_consumer::VecConsumer;
