//! # Relay Ledger Crate
//!
//! Everything the relay needs to talk to the remote ledger: loading the
//! signing wallet from configuration, deriving program-owned entry
//! addresses, assembling and signing transactions, and the JSON-RPC client
//! wrapper over the node's HTTP endpoint.
//!
//! The on-chain journal program itself is an external collaborator; this
//! crate only produces the byte payloads and signed transactions it
//! consumes.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod error;
pub mod keypair;
pub mod pda;
pub mod rpc;
pub mod tx;

pub use error::LedgerError;
pub use keypair::WalletKeypair;
pub use pda::{find_entry_address, find_program_address, ENTRY_NAMESPACE};
pub use rpc::{ProgramAccount, RpcClient};
pub use tx::{AccountMeta, Instruction, Message, Transaction};
