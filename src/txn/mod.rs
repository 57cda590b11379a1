//! Transaction Module
//!
//! The unit of work every domain operation compiles into.
//!
//! ## Lifecycle
//! ```text
//!   Bucket / Kv / KvBatch
//!           │  write_txn / read_txn / delete_txn / validate_txn
//!           ▼
//!     ┌────────────┐   execute(&Tx)   ┌──────────────────────┐
//!     │ TxnCommand │ ───────────────► │ Tx (read or write)   │
//!     └────────────┘                  └──────────┬───────────┘
//!                                                │
//!                    Ok(TxnOutput) → commit      │
//!                    Err(BucketError) → rollback ▼
//! ```
//!
//! The client picks the transaction mode; the command decides what happens
//! inside it.

mod command;
mod handle;

pub use command::{TxnCommand, TxnOutput};
pub use handle::Tx;
