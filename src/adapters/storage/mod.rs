//! Storage adapters - Durable and in-memory serving snapshot slots.

mod file_serving_storage;
mod in_memory_serving_storage;

pub use file_serving_storage::FileServingStorage;
pub use in_memory_serving_storage::InMemoryServingStorage;
