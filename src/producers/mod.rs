//! Built-in producers.

/// Producer that yields the items of a `Vec`.
pub mod vec_producer;

pub use vec_producer::VecProducer;
