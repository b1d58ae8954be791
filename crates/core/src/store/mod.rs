//! Store module - the in-memory record store and demo seed data.

mod memory;
mod seed;

// Re-export the public interface
pub use memory::MemoryStore;
pub use seed::{sample_tax_lots, seed_demo_data};
