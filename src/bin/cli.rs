//! bucketkv CLI
//!
//! Command-line interface for a local bucketkv database file.

use std::process;

use bucketkv::{Bucket, Client, Config, Kv};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// bucketkv CLI
#[derive(Parser, Debug)]
#[command(name = "bucketkv")]
#[command(about = "Bucketed key-value records in an embedded database file")]
#[command(version)]
struct Args {
    /// Database file (created if missing)
    #[arg(short, long, default_value = "bucketkv.db")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a bucket if it does not exist
    CreateBucket {
        /// The bucket name
        name: String,
    },

    /// Delete a bucket and all of its records
    DeleteBucket {
        /// The bucket name
        name: String,
    },

    /// Check that a bucket exists
    Validate {
        /// The bucket name
        name: String,
    },

    /// Set a key-value pair
    Put {
        /// The bucket to write into
        bucket: String,

        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Get a value by key
    Get {
        /// The bucket to read from
        bucket: String,

        /// The key to get
        key: String,
    },

    /// Delete a key
    Del {
        /// The bucket to delete from
        bucket: String,

        /// The key to delete
        key: String,
    },

    /// Print every key-value pair in a bucket
    Scan {
        /// The bucket to scan
        bucket: String,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bucketkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("bucketkv v{}", bucketkv::VERSION);

    let config = Config::builder().path(&args.db).build();
    let client = match Client::open(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to open database {}: {}", args.db, e);
            process::exit(1);
        }
    };

    let outcome = run(&client, args.command);

    if let Err(e) = client.close() {
        tracing::error!("Failed to close database: {}", e);
    }

    if let Err(e) = outcome {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(client: &Client, command: Commands) -> bucketkv::Result<()> {
    match command {
        Commands::CreateBucket { name } => client.write(&Bucket::new(name)),
        Commands::DeleteBucket { name } => client.delete(&Bucket::new(name)),
        Commands::Validate { name } => {
            client.validate(&Bucket::new(name.as_str()))?;
            println!("{}: ok", name);
            Ok(())
        }
        Commands::Put { bucket, key, value } => {
            let mut kv = Kv::new();
            kv.set_bucket(bucket).set_key(key).set_value(value);
            client.write(&kv)
        }
        Commands::Get { bucket, key } => {
            let mut kv = Kv::new();
            kv.set_bucket(bucket).set_key(key);
            client.read(&mut kv)?;
            println!("{}", kv.value());
            Ok(())
        }
        Commands::Del { bucket, key } => {
            let mut kv = Kv::new();
            kv.set_bucket(bucket).set_key(key);
            client.delete(&kv)
        }
        Commands::Scan { bucket } => {
            let records = client.read_all(&mut Bucket::new(bucket))?;
            for kv in &records {
                println!("{}\t{}", kv.key(), kv.value());
            }
            Ok(())
        }
    }
}
