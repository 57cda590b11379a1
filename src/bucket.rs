//! Buckets
//!
//! A bucket is a named, independent key space. Keys are unique only within
//! their bucket, and a bucket must exist before any record in it can be
//! written, read, or deleted.

use serde::{Deserialize, Serialize};

use crate::capability::{Deleter, Reader, Validator, Writer};
use crate::error::BucketError;
use crate::kv::{Kv, KvBatch};
use crate::txn::{TxnCommand, TxnOutput};

/// A named bucket
///
/// | Capability  | Behavior                                              |
/// |-------------|-------------------------------------------------------|
/// | `Writer`    | create if absent (idempotent)                         |
/// | `Validator` | `NamespaceNotFound` if absent, never mutates          |
/// | `Deleter`   | drop the bucket and all its records                   |
/// | `Reader`    | scan every pair in key order into a `KvBatch`         |
///
/// Scanned records carry key and value only; their bucket field is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    name: String,
}

impl Bucket {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Writer for Bucket {
    fn write_txn(&self) -> TxnCommand<'_> {
        TxnCommand::unit("bucket.create", move |tx| {
            tx.create_bucket_if_not_exists(&self.name)
        })
    }
}

impl Validator for Bucket {
    fn validate_txn(&self) -> TxnCommand<'_> {
        TxnCommand::unit("bucket.validate", move |tx| {
            if !tx.bucket_exists(&self.name)? {
                return Err(BucketError::NamespaceNotFound(self.name.clone()));
            }
            Ok(())
        })
    }
}

impl Deleter for Bucket {
    fn delete_txn(&self) -> TxnCommand<'_> {
        TxnCommand::unit("bucket.delete", move |tx| tx.delete_bucket(&self.name))
    }
}

impl Reader for Bucket {
    fn read_txn(&mut self) -> TxnCommand<'_> {
        let name = &self.name;

        TxnCommand::new("bucket.scan", move |tx| {
            let batch: KvBatch = tx
                .scan(name)?
                .iter()
                .map(|(key, value)| Kv::from_pair(key, value))
                .collect();
            Ok(TxnOutput::Batch(batch))
        })
    }
}
