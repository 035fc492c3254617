//! # Identifier & Randomness Source
//!
//! Every value the mock backend "makes up" (record ids, customer codes,
//! order codes, shelf slots, health/backup figures) comes from an
//! [`IdGenerator`] injected at construction, so tests can swap in
//! [`SequentialIds`] and get reproducible output.

use std::sync::atomic::{AtomicU64, Ordering};

use lavanflow_core::{ShelfLocation, SHELF_ROWS, SHELF_SLOTS};
use rand::distributions::Alphanumeric;
use rand::Rng;
use uuid::Uuid;

const ORDER_CODE_LEN: usize = 6;

/// Source of generated identifiers and simulated measurements.
pub trait IdGenerator: Send + Sync {
    /// Opaque identifier for a new record.
    fn record_id(&self) -> String;

    /// Customer display code, `CUST-` followed by four digits (1000-9999).
    fn customer_code(&self) -> String;

    /// Order display code, `ORD-` followed by six uppercase alphanumerics.
    fn order_code(&self) -> String;

    /// A shelf slot for a freshly completed order.
    fn shelf_location(&self) -> ShelfLocation;

    /// Latency figure reported by the health endpoint, in ms (10-59).
    fn health_latency_ms(&self) -> u64;

    /// Size reported for a triggered backup, in KB (1000-5999).
    fn backup_size_kb(&self) -> u64;
}

// =============================================================================
// Random (production)
// =============================================================================

/// UUID v4 ids and thread-local randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn record_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn customer_code(&self) -> String {
        format!("CUST-{}", rand::thread_rng().gen_range(1000..=9999))
    }

    fn order_code(&self) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(ORDER_CODE_LEN)
            .map(|b| (b as char).to_ascii_uppercase())
            .collect();
        format!("ORD-{}", suffix)
    }

    fn shelf_location(&self) -> ShelfLocation {
        let mut rng = rand::thread_rng();
        ShelfLocation {
            row: rng.gen_range(0..SHELF_ROWS),
            slot: rng.gen_range(1..=SHELF_SLOTS),
        }
    }

    fn health_latency_ms(&self) -> u64 {
        rand::thread_rng().gen_range(10..60)
    }

    fn backup_size_kb(&self) -> u64 {
        rand::thread_rng().gen_range(1000..6000)
    }
}

// =============================================================================
// Sequential (tests, demos)
// =============================================================================

/// Deterministic generator driven by a single counter.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        SequentialIds::default()
    }

    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl IdGenerator for SequentialIds {
    fn record_id(&self) -> String {
        format!("id-{}", self.next())
    }

    fn customer_code(&self) -> String {
        format!("CUST-{}", 1000 + self.next() % 9000)
    }

    fn order_code(&self) -> String {
        format!("ORD-{:06}", self.next())
    }

    fn shelf_location(&self) -> ShelfLocation {
        let n = self.next();
        ShelfLocation {
            row: (n % SHELF_ROWS as u64) as u8,
            slot: (n % SHELF_SLOTS as u64) as u8 + 1,
        }
    }

    fn health_latency_ms(&self) -> u64 {
        10
    }

    fn backup_size_kb(&self) -> u64 {
        1000
    }
}
