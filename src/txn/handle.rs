//! Transaction handle
//!
//! Wraps a live engine transaction and exposes the bucket/key operations a
//! command body may perform against it.

use redb::{
    ReadOnlyTable, ReadTransaction, ReadableTable, TableDefinition, TableError, TableHandle,
    WriteTransaction,
};

use crate::error::{BucketError, Result};

/// Raw byte table backing one bucket
type RawTable<'a> = TableDefinition<'a, &'static [u8], &'static [u8]>;

fn table_def(name: &str) -> RawTable<'_> {
    TableDefinition::new(name)
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BucketError::BucketNameRequired);
    }
    Ok(())
}

enum Inner {
    Read(ReadTransaction),
    Write(WriteTransaction),
}

/// A live engine transaction, either read-only or read-write
///
/// ## Semantics
/// - Every lookup fails with `NamespaceNotFound` when the bucket is absent,
///   including lookups under an empty name
/// - Only creation rejects an empty name, with `BucketNameRequired`
/// - Lookups on a read-write handle never create the bucket as a side effect
/// - Mutations on a read-only handle fail with `TxNotWritable`
pub struct Tx {
    inner: Inner,
}

impl Tx {
    pub(crate) fn read(txn: ReadTransaction) -> Self {
        Self {
            inner: Inner::Read(txn),
        }
    }

    pub(crate) fn write(txn: WriteTransaction) -> Self {
        Self {
            inner: Inner::Write(txn),
        }
    }

    /// Whether this handle may mutate storage
    pub fn is_writable(&self) -> bool {
        matches!(self.inner, Inner::Write(_))
    }

    /// Make the transaction's effects durable (no-op for read-only)
    pub(crate) fn commit(self) -> Result<()> {
        match self.inner {
            Inner::Write(txn) => txn.commit()?,
            Inner::Read(txn) => drop(txn),
        }
        Ok(())
    }

    /// Discard every effect of the transaction
    pub(crate) fn rollback(self) -> Result<()> {
        match self.inner {
            Inner::Write(txn) => txn.abort()?,
            Inner::Read(txn) => drop(txn),
        }
        Ok(())
    }

    fn writer(&self) -> Result<&WriteTransaction> {
        match &self.inner {
            Inner::Write(txn) => Ok(txn),
            Inner::Read(_) => Err(BucketError::TxNotWritable),
        }
    }

    // =========================================================================
    // Bucket Operations
    // =========================================================================

    /// Check whether a bucket exists, without creating it
    pub fn bucket_exists(&self, name: &str) -> Result<bool> {
        // No bucket can be created under an empty name
        if name.is_empty() {
            return Ok(false);
        }

        match &self.inner {
            Inner::Read(txn) => match txn.open_table(table_def(name)) {
                Ok(_) => Ok(true),
                Err(TableError::TableDoesNotExist(_)) => Ok(false),
                Err(e) => Err(e.into()),
            },
            // open_table would create the table here, so consult the catalog instead
            Inner::Write(txn) => Ok(txn.list_tables()?.any(|handle| handle.name() == name)),
        }
    }

    /// Create a bucket unless it already exists
    pub fn create_bucket_if_not_exists(&self, name: &str) -> Result<()> {
        check_name(name)?;
        let txn = self.writer()?;

        txn.open_table(table_def(name))?;
        Ok(())
    }

    /// Delete a bucket and every record in it
    pub fn delete_bucket(&self, name: &str) -> Result<()> {
        let txn = self.writer()?;

        if name.is_empty() || !txn.delete_table(table_def(name))? {
            return Err(BucketError::NamespaceNotFound(name.to_string()));
        }
        Ok(())
    }

    // =========================================================================
    // Key Operations
    // =========================================================================

    /// Set or overwrite the value at `key`
    pub fn put(&self, bucket: &str, key: &[u8], value: &[u8]) -> Result<()> {
        let txn = self.writer()?;
        self.require_bucket(bucket)?;

        let mut table = txn.open_table(table_def(bucket))?;
        table
            .insert(key, value)
            .map_err(|e| BucketError::Operation(format!("error creating kv pair: {}", e)))?;
        Ok(())
    }

    /// Get the value at `key`, `None` if the key is absent
    pub fn get(&self, bucket: &str, key: &[u8]) -> Result<Option<Vec<u8>>> {
        match &self.inner {
            Inner::Read(txn) => {
                let table = open_read_only(txn, bucket)?;
                lookup(&table, key)
            }
            Inner::Write(txn) => {
                self.require_bucket(bucket)?;
                let table = txn.open_table(table_def(bucket))?;
                lookup(&table, key)
            }
        }
    }

    /// Remove `key`; removing an absent key succeeds
    pub fn delete(&self, bucket: &str, key: &[u8]) -> Result<()> {
        let txn = self.writer()?;
        self.require_bucket(bucket)?;

        let mut table = txn.open_table(table_def(bucket))?;
        table
            .remove(key)
            .map_err(|e| BucketError::Operation(format!("error deleting kv: {}", e)))?;
        Ok(())
    }

    /// All pairs in the bucket, in ascending key byte order
    pub fn scan(&self, bucket: &str) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        match &self.inner {
            Inner::Read(txn) => {
                let table = open_read_only(txn, bucket)?;
                collect_pairs(&table)
            }
            Inner::Write(txn) => {
                self.require_bucket(bucket)?;
                let table = txn.open_table(table_def(bucket))?;
                collect_pairs(&table)
            }
        }
    }

    fn require_bucket(&self, name: &str) -> Result<()> {
        if !self.bucket_exists(name)? {
            return Err(BucketError::NamespaceNotFound(name.to_string()));
        }
        Ok(())
    }
}

fn open_read_only(
    txn: &ReadTransaction,
    bucket: &str,
) -> Result<ReadOnlyTable<&'static [u8], &'static [u8]>> {
    if bucket.is_empty() {
        return Err(BucketError::NamespaceNotFound(String::new()));
    }

    match txn.open_table(table_def(bucket)) {
        Ok(table) => Ok(table),
        Err(TableError::TableDoesNotExist(_)) => {
            Err(BucketError::NamespaceNotFound(bucket.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

fn lookup<T>(table: &T, key: &[u8]) -> Result<Option<Vec<u8>>>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
}

fn collect_pairs<T>(table: &T) -> Result<Vec<(Vec<u8>, Vec<u8>)>>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let mut pairs = Vec::new();
    for entry in table.iter()? {
        let (key, value) = entry?;
        pairs.push((key.value().to_vec(), value.value().to_vec()));
    }
    Ok(pairs)
}
