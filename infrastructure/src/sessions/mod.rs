//! In-memory expiring session store and its background sweeper.

mod memory_store;
mod sweeper;

pub use memory_store::InMemorySessionStore;
pub use sweeper::SessionSweeper;
