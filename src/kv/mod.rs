//! Record Module
//!
//! Records and record batches, the data-carrying command objects.
//!
//! ## Storage Mapping
//! ```text
//!   Kv { bucket: "users", key: "alice", value: "admin" }
//!                │              │               │
//!                ▼              ▼               ▼
//!        table "users"  ─►  key b"alice" ─► value b"admin"
//! ```
//!
//! A record has no identity beyond its three fields; only its key and value
//! bytes are persisted.

mod batch;
mod record;

pub use batch::KvBatch;
pub use record::Kv;
