//! # Voucher Repository (NCF Sequencer)
//!
//! ## Burn Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  burn(type = "Final Consumer (B02)", branch = "br-1")                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  first range where type + branch match AND range is still Active       │
//! │       │                                                                 │
//! │       ├── none ──► ""   (caller checks for the empty string)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "B02" + current zero-padded to 8 ──► "B0200000042"                    │
//! │  current += 1 (range flips to Exhausted after its last number)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The burn runs inside a store write, so the cursor bump and the returned
//! number are committed together.

use chrono::Utc;
use lavanflow_core::validation::validate_new_voucher_range;
use lavanflow_core::{NewVoucherRange, TaxReceiptType, VoucherRange};
use tracing::{debug, info, warn};

use crate::document::Document;
use crate::error::DbResult;
use crate::ids::IdGenerator;

#[derive(Clone, Copy)]
pub struct VoucherRepository<'a> {
    ids: &'a dyn IdGenerator,
}

impl<'a> VoucherRepository<'a> {
    pub fn new(ids: &'a dyn IdGenerator) -> Self {
        VoucherRepository { ids }
    }

    pub fn list(&self, doc: &Document) -> Vec<VoucherRange> {
        doc.vouchers.clone()
    }

    /// Registers a fresh range starting at its first number.
    pub fn create(&self, doc: &mut Document, new_range: NewVoucherRange) -> DbResult<VoucherRange> {
        validate_new_voucher_range(&new_range)?;

        let range = new_range.into_range(self.ids.record_id(), Utc::now());
        info!(
            range_id = %range.id,
            branch_id = %range.branch_id,
            start = range.start,
            end = range.end,
            "Voucher range registered"
        );
        doc.vouchers.push(range.clone());
        Ok(range)
    }

    /// Issues the next NCF for `receipt_type` at `branch_id`.
    ///
    /// Returns an empty string when no active range serves the pair.
    pub fn burn(
        &self,
        doc: &mut Document,
        receipt_type: TaxReceiptType,
        branch_id: &str,
    ) -> DbResult<String> {
        let Some(range) = doc
            .vouchers
            .iter_mut()
            .find(|v| v.serves(receipt_type, branch_id) && v.is_available())
        else {
            warn!(receipt_type = %receipt_type, branch_id = %branch_id, "No active voucher range");
            return Ok(String::new());
        };

        let ncf = range.burn()?;
        debug!(range_id = %range.id, ncf = %ncf, remaining = range.remaining(), "NCF burned");
        Ok(ncf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::seed::default_document;
    use crate::error::DbError;
    use lavanflow_core::VoucherStatus;

    #[test]
    fn test_consecutive_burns_have_no_gaps() {
        let ids = SequentialIds::new();
        let repo = VoucherRepository::new(&ids);
        let mut doc = default_document(Utc::now());

        let burned: Vec<String> = (0..3)
            .map(|_| repo.burn(&mut doc, TaxReceiptType::TaxCredit, "br-1").unwrap())
            .collect();
        assert_eq!(burned, vec!["B0100000001", "B0100000002", "B0100000003"]);

        let other_branch = repo.burn(&mut doc, TaxReceiptType::TaxCredit, "br-2").unwrap();
        assert_eq!(other_branch, "B0100000001");
    }

    #[test]
    fn test_unknown_branch_returns_empty() {
        let ids = SequentialIds::new();
        let repo = VoucherRepository::new(&ids);
        let mut doc = default_document(Utc::now());
        let before = doc.clone();

        let ncf = repo.burn(&mut doc, TaxReceiptType::FinalConsumer, "br-404").unwrap();
        assert_eq!(ncf, "");
        assert_eq!(doc, before);
    }

    #[test]
    fn test_exhausted_range_falls_through_to_next() {
        let ids = SequentialIds::new();
        let repo = VoucherRepository::new(&ids);
        let mut doc = Document::default();

        repo.create(
            &mut doc,
            NewVoucherRange {
                receipt_type: TaxReceiptType::TaxCredit,
                prefix: "B01".to_string(),
                start: 1,
                end: 2,
                branch_id: "br-1".to_string(),
            },
        )
        .unwrap();

        assert_eq!(repo.burn(&mut doc, TaxReceiptType::TaxCredit, "br-1").unwrap(), "B0100000001");
        assert_eq!(repo.burn(&mut doc, TaxReceiptType::TaxCredit, "br-1").unwrap(), "B0100000002");
        assert_eq!(doc.vouchers[0].status, VoucherStatus::Exhausted);
        assert_eq!(repo.burn(&mut doc, TaxReceiptType::TaxCredit, "br-1").unwrap(), "");

        repo.create(
            &mut doc,
            NewVoucherRange {
                receipt_type: TaxReceiptType::TaxCredit,
                prefix: "B01".to_string(),
                start: 3,
                end: 100,
                branch_id: "br-1".to_string(),
            },
        )
        .unwrap();
        assert_eq!(repo.burn(&mut doc, TaxReceiptType::TaxCredit, "br-1").unwrap(), "B0100000003");
    }

    #[test]
    fn test_create_rejects_inverted_bounds() {
        let ids = SequentialIds::new();
        let repo = VoucherRepository::new(&ids);
        let mut doc = Document::default();

        let result = repo.create(
            &mut doc,
            NewVoucherRange {
                receipt_type: TaxReceiptType::FinalConsumer,
                prefix: "B02".to_string(),
                start: 10,
                end: 5,
                branch_id: "br-1".to_string(),
            },
        );
        assert!(result.is_err());
        assert!(doc.vouchers.is_empty());
    }

    #[test]
    fn test_create_rejects_ranges_past_eight_digits() {
        let ids = SequentialIds::new();
        let repo = VoucherRepository::new(&ids);
        let mut doc = Document::default();

        let result = repo.create(
            &mut doc,
            NewVoucherRange {
                receipt_type: TaxReceiptType::TaxCredit,
                prefix: "B01".to_string(),
                start: 99_999_999,
                end: 100_000_001,
                branch_id: "br-9".to_string(),
            },
        );
        assert!(matches!(result, Err(DbError::Validation(_))));
        assert!(doc.vouchers.is_empty());
    }

    #[test]
    fn test_stored_oversized_range_stops_at_last_eight_digit_number() {
        let ids = SequentialIds::new();
        let repo = VoucherRepository::new(&ids);
        let mut doc = Document::default();
        doc.vouchers.push(
            NewVoucherRange {
                receipt_type: TaxReceiptType::TaxCredit,
                prefix: "B01".to_string(),
                start: 99_999_999,
                end: u64::MAX,
                branch_id: "br-9".to_string(),
            }
            .into_range("v-legacy".to_string(), Utc::now()),
        );

        assert_eq!(repo.burn(&mut doc, TaxReceiptType::TaxCredit, "br-9").unwrap(), "B0199999999");
        assert_eq!(repo.burn(&mut doc, TaxReceiptType::TaxCredit, "br-9").unwrap(), "");
        assert_eq!(doc.vouchers[0].status, VoucherStatus::Exhausted);
    }
}
