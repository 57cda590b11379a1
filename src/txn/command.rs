//! Transaction commands
//!
//! A `TxnCommand` is the compiled unit of work a domain object hands to the
//! client: a one-shot body run against a `Tx`, plus the typed output it
//! produces.

use std::fmt;

use super::Tx;
use crate::error::{BucketError, Result};
use crate::kv::KvBatch;

/// What a command body hands back after running successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxnOutput {
    /// The command only had side effects
    Unit,

    /// The command collected records (e.g. a bucket scan)
    Batch(KvBatch),
}

impl TxnOutput {
    /// Extract the record batch, failing if the command produced none
    pub fn into_batch(self) -> Result<KvBatch> {
        match self {
            TxnOutput::Batch(batch) => Ok(batch),
            TxnOutput::Unit => Err(BucketError::ResultTypeMismatch),
        }
    }
}

type TxnBody<'a> = Box<dyn FnOnce(&Tx) -> Result<TxnOutput> + 'a>;

/// A one-shot transaction body awaiting execution
///
/// The lifetime ties the command to the object that produced it, so a read
/// command may write results back into its source object.
pub struct TxnCommand<'a> {
    label: &'static str,
    body: TxnBody<'a>,
}

impl<'a> TxnCommand<'a> {
    /// Wrap a body that may produce a payload
    pub fn new<F>(label: &'static str, body: F) -> Self
    where
        F: FnOnce(&Tx) -> Result<TxnOutput> + 'a,
    {
        Self {
            label,
            body: Box::new(body),
        }
    }

    /// Wrap a body that only has side effects
    pub fn unit<F>(label: &'static str, body: F) -> Self
    where
        F: FnOnce(&Tx) -> Result<()> + 'a,
    {
        Self::new(label, move |tx| body(tx).map(|()| TxnOutput::Unit))
    }

    /// Short name used in logs
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Run the body against a live transaction, consuming the command
    pub fn execute(self, tx: &Tx) -> Result<TxnOutput> {
        (self.body)(tx)
    }
}

impl fmt::Debug for TxnCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxnCommand")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
