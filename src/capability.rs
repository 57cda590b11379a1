//! Command capabilities
//!
//! Small, independent traits the client dispatches on. Each domain type
//! implements the subset that makes sense for it:
//!
//! | Type      | Writer | Reader | Deleter | Validator |
//! |-----------|--------|--------|---------|-----------|
//! | `Bucket`  |   ✓    |   ✓    |    ✓    |     ✓     |
//! | `Kv`      |   ✓    |   ✓    |    ✓    |           |
//! | `KvBatch` |   ✓    |   ✓    |    ✓    |           |

use crate::txn::TxnCommand;

/// Produces a command that creates or updates data
pub trait Writer {
    fn write_txn(&self) -> TxnCommand<'_>;
}

/// Produces a command that reads data
///
/// Takes `&mut self` because record reads fill in the receiver's values.
pub trait Reader {
    fn read_txn(&mut self) -> TxnCommand<'_>;
}

/// Produces a command that deletes data
pub trait Deleter {
    fn delete_txn(&self) -> TxnCommand<'_>;
}

/// Produces a read-only command that fails if the target is absent
pub trait Validator {
    fn validate_txn(&self) -> TxnCommand<'_>;
}
