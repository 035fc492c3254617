//! # Seed Document Writer
//!
//! Resets a LavanFlow document file to the default seed data.
//!
//! ## Usage
//! ```bash
//! # Reset the document in the platform data directory (or $LAVANFLOW_DB_PATH)
//! cargo run -p lavanflow-db --bin seed
//!
//! # Specify document path
//! cargo run -p lavanflow-db --bin seed -- --db ./data/lavanflow_db.json
//!
//! # Only seed when no document exists yet
//! cargo run -p lavanflow-db --bin seed -- --keep
//! ```
//!
//! ## Seeded Data
//! - Branches and the garment catalog
//! - A few regular customers
//! - The `u-admin-1` administrator
//! - Two voucher ranges (B01 1-100, B02 1-500) per branch

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lavanflow_db::{DocumentStore, MockApi, RandomIds, StoreConfig};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lavanflow_db=info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<PathBuf> = None;
    let mut keep_existing = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--keep" | "-k" => keep_existing = true,
            "--help" | "-h" => {
                println!("LavanFlow OS Seed Document Writer");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Document file path (default: $LAVANFLOW_DB_PATH or data dir)");
                println!("  -k, --keep         Leave an existing document untouched");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = match db_path {
        Some(path) => StoreConfig::new(path),
        None => StoreConfig::from_env()?,
    };

    println!("🌱 LavanFlow OS Seed Document Writer");
    println!("====================================");
    println!("Document: {:?}", config.location);
    println!();

    let store = DocumentStore::open(&config).await?;
    println!("✓ Document store opened");

    if keep_existing {
        println!("  --keep given, existing data left as is.");
    } else {
        store.reset().await?;
        println!("✓ Document reset to seed data");
    }

    // Summarize through the endpoint table, same path the app takes.
    let api = MockApi::new(store, Arc::new(RandomIds), Duration::ZERO);
    for endpoint in ["/branches", "/inventory", "/customers", "/staff", "/vouchers"] {
        let count = match api.get(endpoint).await? {
            Value::Array(items) => items.len(),
            _ => 0,
        };
        println!("  {:<12} {:>4}", endpoint, count);
    }

    println!();
    println!("✅ Seed complete");
    Ok(())
}
