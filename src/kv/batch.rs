//! Record batch
//!
//! An ordered group of records handled inside one transaction. The first
//! member that fails aborts the whole transaction.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::Kv;
use crate::capability::{Deleter, Reader, Writer};
use crate::txn::TxnCommand;

/// Ordered collection of records
///
/// Order is the iteration order inside the transaction, not storage order.
/// Members may name different buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KvBatch {
    records: Vec<Kv>,
}

impl KvBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record
    pub fn push(&mut self, kv: Kv) {
        self.records.push(kv);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Kv> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Kv> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Kv> {
        self.records.iter_mut()
    }

    /// Stamp every member with `bucket`
    ///
    /// Scanned batches come back with empty bucket fields; call this before
    /// writing them back anywhere.
    pub fn with_bucket(mut self, bucket: &str) -> Self {
        for kv in &mut self.records {
            kv.set_bucket(bucket);
        }
        self
    }

    pub fn into_inner(self) -> Vec<Kv> {
        self.records
    }
}

impl Writer for KvBatch {
    fn write_txn(&self) -> TxnCommand<'_> {
        TxnCommand::unit("batch.put", move |tx| {
            for kv in &self.records {
                kv.store(tx)?;
            }
            Ok(())
        })
    }
}

impl Reader for KvBatch {
    fn read_txn(&mut self) -> TxnCommand<'_> {
        TxnCommand::unit("batch.get", move |tx| {
            for kv in &mut self.records {
                kv.load(tx)?;
            }
            Ok(())
        })
    }
}

impl Deleter for KvBatch {
    fn delete_txn(&self) -> TxnCommand<'_> {
        TxnCommand::unit("batch.delete", move |tx| {
            for kv in &self.records {
                kv.remove(tx)?;
            }
            Ok(())
        })
    }
}

// =============================================================================
// Collection Conversions
// =============================================================================

impl From<Vec<Kv>> for KvBatch {
    fn from(records: Vec<Kv>) -> Self {
        Self { records }
    }
}

impl FromIterator<Kv> for KvBatch {
    fn from_iter<I: IntoIterator<Item = Kv>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl Extend<Kv> for KvBatch {
    fn extend<I: IntoIterator<Item = Kv>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl IntoIterator for KvBatch {
    type Item = Kv;
    type IntoIter = std::vec::IntoIter<Kv>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a KvBatch {
    type Item = &'a Kv;
    type IntoIter = std::slice::Iter<'a, Kv>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Index<usize> for KvBatch {
    type Output = Kv;

    fn index(&self, index: usize) -> &Kv {
        &self.records[index]
    }
}
