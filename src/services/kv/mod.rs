pub mod memory;
pub mod store;
pub mod valkey;

pub use memory::MemoryKv;
pub use store::{KvError, KvStore};
pub use valkey::ValkeyClient;
