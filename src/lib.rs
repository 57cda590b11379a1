//! # bucketkv
//!
//! A thin command layer over an embedded, transactional, ordered key-value
//! store:
//! - Records grouped into named buckets
//! - Single-record and batch create/read/update/delete
//! - Every operation runs as one atomic transaction
//! - Single-writer/multi-reader concurrency with snapshot reads
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Bucket  /  Kv  /  KvBatch                       │
//! │        (Writer · Reader · Deleter · Validator)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ TxnCommand
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Client                                  │
//! │        write/delete → read-write transaction                 │
//! │   read/read_all/validate → read-only transaction             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Tx
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Embedded engine (redb)                       │
//! │        one table per bucket, byte keys and values            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use bucketkv::{Bucket, Client, Kv};
//!
//! # fn main() -> bucketkv::Result<()> {
//! let client = Client::new();
//! client.open_db("my.db")?;
//!
//! client.write(&Bucket::new("users"))?;
//!
//! let mut kv = Kv::new();
//! kv.set_bucket("users").set_key("alice").set_value("admin");
//! client.write(&kv)?;
//!
//! let mut lookup = Kv::new();
//! lookup.set_bucket("users").set_key("alice");
//! client.read(&mut lookup)?;
//! assert_eq!(lookup.value(), "admin");
//!
//! client.close()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod txn;
pub mod capability;
pub mod kv;
pub mod bucket;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BucketError, Result};
pub use config::Config;
pub use capability::{Deleter, Reader, Validator, Writer};
pub use kv::{Kv, KvBatch};
pub use bucket::Bucket;
pub use client::Client;
pub use txn::{Tx, TxnCommand, TxnOutput};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of bucketkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
