//! Queue provider implementations.

pub mod aws;
pub mod memory;

pub use aws::SqsProvider;
pub use memory::InMemoryProvider;
