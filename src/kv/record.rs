//! Single record
//!
//! A key/value pair scoped to one bucket.

use serde::{Deserialize, Serialize};

use crate::capability::{Deleter, Reader, Writer};
use crate::error::Result;
use crate::txn::{Tx, TxnCommand};

/// A key/value pair addressed by bucket name and key
///
/// Reading a `Kv` through the client overwrites its `value` in place with the
/// stored value, or with an empty string if the key is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kv {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    bucket: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    key: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    value: String,
}

impl Kv {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Record built from a scanned pair; the bucket is left empty
    pub(crate) fn from_pair(key: &[u8], value: &[u8]) -> Self {
        Self {
            bucket: String::new(),
            key: decode(key),
            value: decode(value),
        }
    }

    pub fn set_bucket(&mut self, bucket: impl Into<String>) -> &mut Self {
        self.bucket = bucket.into();
        self
    }

    pub fn set_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.key = key.into();
        self
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = value.into();
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    // =========================================================================
    // Transaction Bodies (shared with KvBatch)
    // =========================================================================

    pub(crate) fn store(&self, tx: &Tx) -> Result<()> {
        tx.put(&self.bucket, self.key.as_bytes(), self.value.as_bytes())
    }

    pub(crate) fn load(&mut self, tx: &Tx) -> Result<()> {
        let stored = tx.get(&self.bucket, self.key.as_bytes())?;
        self.value = stored.as_deref().map(decode).unwrap_or_default();
        Ok(())
    }

    pub(crate) fn remove(&self, tx: &Tx) -> Result<()> {
        tx.delete(&self.bucket, self.key.as_bytes())
    }
}

// Values are only ever written from Strings, so lossy decoding never triggers
// for data this crate stored itself.
fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

impl Writer for Kv {
    fn write_txn(&self) -> TxnCommand<'_> {
        TxnCommand::unit("kv.put", move |tx| self.store(tx))
    }
}

impl Reader for Kv {
    fn read_txn(&mut self) -> TxnCommand<'_> {
        TxnCommand::unit("kv.get", move |tx| self.load(tx))
    }
}

impl Deleter for Kv {
    fn delete_txn(&self) -> TxnCommand<'_> {
        TxnCommand::unit("kv.delete", move |tx| self.remove(tx))
    }
}
