//! Backend adapters implementing the `JournalBackend` outbound port.

pub mod ledger;
pub mod memory;

pub use ledger::LedgerBackend;
pub use memory::MemoryBackend;
