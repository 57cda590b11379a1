//! Tests for transaction commands
//!
//! These tests verify:
//! - TxnOutput extraction
//! - Custom capability implementations driven by the client
//! - Read-only handles reject mutation
//! - Write-mode lookups never create buckets implicitly
//! - A failing body rolls back everything it did

use bucketkv::{
    Bucket, BucketError, Client, Config, Kv, KvBatch, Reader, Tx, TxnCommand, TxnOutput, Writer,
};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_client() -> (TempDir, Client) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .path(temp_dir.path().join("txn.db"))
        .build();
    let client = Client::open(config).unwrap();
    (temp_dir, client)
}

/// Reader that tries to mutate inside a read-only transaction
struct SneakyReader;

impl Reader for SneakyReader {
    fn read_txn(&mut self) -> TxnCommand<'_> {
        TxnCommand::unit("test.sneaky", |tx: &Tx| {
            assert!(!tx.is_writable());
            tx.put("b", b"k", b"v")
        })
    }
}

/// Writer that looks up a missing bucket and records what it saw
struct MissingLookup {
    bucket: String,
}

impl Writer for MissingLookup {
    fn write_txn(&self) -> TxnCommand<'_> {
        TxnCommand::unit("test.missing_lookup", move |tx: &Tx| {
            assert!(tx.is_writable());
            assert!(!tx.bucket_exists(&self.bucket)?);
            match tx.get(&self.bucket, b"k") {
                Err(BucketError::NamespaceNotFound(_)) => Ok(()),
                other => panic!("expected NamespaceNotFound, got {:?}", other),
            }
        })
    }
}

/// Writer that creates a bucket, writes into it, then fails
struct FailAfterWork;

impl Writer for FailAfterWork {
    fn write_txn(&self) -> TxnCommand<'_> {
        TxnCommand::unit("test.fail_after_work", |tx: &Tx| {
            tx.create_bucket_if_not_exists("partial")?;
            tx.put("partial", b"k", b"v")?;
            assert_eq!(tx.get("partial", b"k")?, Some(b"v".to_vec()));
            Err(BucketError::Operation("forced failure".to_string()))
        })
    }
}

/// Reader that scans a bucket inside the transaction and keeps the count
struct Counter {
    bucket: String,
    seen: usize,
}

impl Reader for Counter {
    fn read_txn(&mut self) -> TxnCommand<'_> {
        TxnCommand::new("test.count", move |tx: &Tx| {
            let pairs = tx.scan(&self.bucket)?;
            self.seen = pairs.len();
            let batch: KvBatch = pairs
                .iter()
                .map(|(k, v)| {
                    let mut kv = Kv::new();
                    kv.set_key(String::from_utf8_lossy(k))
                        .set_value(String::from_utf8_lossy(v));
                    kv
                })
                .collect();
            Ok(TxnOutput::Batch(batch))
        })
    }
}

// =============================================================================
// TxnOutput Tests
// =============================================================================

#[test]
fn test_unit_output_is_not_a_batch() {
    let err = TxnOutput::Unit.into_batch().unwrap_err();

    assert!(matches!(err, BucketError::ResultTypeMismatch));
}

#[test]
fn test_batch_output_extracts() {
    let mut kv = Kv::new();
    kv.set_key("k");
    let batch: KvBatch = vec![kv].into();

    let extracted = TxnOutput::Batch(batch.clone()).into_batch().unwrap();

    assert_eq!(extracted, batch);
}

#[test]
fn test_command_label_and_debug() {
    let bucket = Bucket::new("b");
    let command = bucket.write_txn();

    assert_eq!(command.label(), "bucket.create");
    assert!(format!("{:?}", command).contains("bucket.create"));
}

// =============================================================================
// Custom Capability Tests
// =============================================================================

#[test]
fn test_read_only_handle_rejects_mutation() {
    let (_temp, client) = setup_temp_client();
    client.write(&Bucket::new("b")).unwrap();

    let err = client.read(&mut SneakyReader).unwrap_err();

    assert!(matches!(err, BucketError::TxNotWritable));
    assert!(client.read_all(&mut Bucket::new("b")).unwrap().is_empty());
}

#[test]
fn test_write_lookup_does_not_create_bucket() {
    let (_temp, client) = setup_temp_client();

    client
        .write(&MissingLookup {
            bucket: "ghost".to_string(),
        })
        .unwrap();

    let err = client.validate(&Bucket::new("ghost")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_failing_body_rolls_back() {
    let (_temp, client) = setup_temp_client();

    let err = client.write(&FailAfterWork).unwrap_err();

    assert!(matches!(err, BucketError::Operation(_)));
    assert!(client.validate(&Bucket::new("partial")).is_err());
}

#[test]
fn test_custom_reader_returns_batch() {
    let (_temp, client) = setup_temp_client();
    client.write(&Bucket::new("b")).unwrap();
    let mut a = Kv::new();
    a.set_bucket("b").set_key("a").set_value("1");
    let mut c = Kv::new();
    c.set_bucket("b").set_key("c").set_value("3");
    client.write(&KvBatch::from(vec![a, c])).unwrap();

    let mut counter = Counter {
        bucket: "b".to_string(),
        seen: 0,
    };
    let batch = client.read_all(&mut counter).unwrap();

    assert_eq!(counter.seen, 2);
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[1].value(), "3");
}
