//! Gold-word currency and the storage it persists through.

pub mod storage;
pub mod wallet;

pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use wallet::{word_value, Transaction, TransactionKind, Wallet, WalletStatistics, WordTier};
