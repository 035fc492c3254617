//! # NCF (Fiscal Receipt Number) Rules
//!
//! An NCF is the range prefix followed by the cursor value, zero-padded to
//! eight digits: prefix `B01`, cursor `42` → `B0100000042`.
//!
//! ## Burn Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  VoucherRange { prefix: B01, start: 1, end: 3, current: 1 }            │
//! │                                                                         │
//! │  burn() → "B0100000001"   current: 1 → 2                               │
//! │  burn() → "B0100000002"   current: 2 → 3                               │
//! │  burn() → "B0100000003"   current: 3 → 4, status → Exhausted           │
//! │  burn() → Err(VoucherRangeExhausted)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The returned number is always the pre-increment cursor, so consecutive
//! burns yield consecutive suffixes with no gaps.

use crate::error::{CoreError, CoreResult};
use crate::types::{TaxReceiptType, VoucherRange, VoucherStatus};
use crate::{NCF_DIGITS, NCF_MAX_CURSOR};

/// Formats an NCF from a prefix and a cursor value.
///
/// Cursors above [`NCF_MAX_CURSOR`] never reach this point; ranges stop
/// being available before their suffix would grow a ninth digit.
///
/// ```rust
/// use lavanflow_core::ncf::format_ncf;
///
/// assert_eq!(format_ncf("B02", 1), "B0200000001");
/// assert_eq!(format_ncf("B01", 12345678), "B0112345678");
/// ```
pub fn format_ncf(prefix: &str, cursor: u64) -> String {
    format!("{}{:0width$}", prefix, cursor, width = NCF_DIGITS)
}

impl VoucherRange {
    /// Whether this range can still issue numbers.
    pub fn is_available(&self) -> bool {
        self.status == VoucherStatus::Active
            && self.current <= self.end
            && self.current <= NCF_MAX_CURSOR
    }

    /// Numbers left before the range is exhausted.
    pub fn remaining(&self) -> u64 {
        if self.is_available() {
            self.end.min(NCF_MAX_CURSOR) - self.current + 1
        } else {
            0
        }
    }

    /// Whether this range serves `receipt_type` for `branch_id`.
    pub fn serves(&self, receipt_type: TaxReceiptType, branch_id: &str) -> bool {
        self.receipt_type == receipt_type && self.branch_id == branch_id
    }

    /// Issues the next NCF and advances the cursor by exactly one.
    ///
    /// Issuing the final number (`current == end`) flips the range to
    /// `Exhausted`; any later call fails without touching the cursor.
    pub fn burn(&mut self) -> CoreResult<String> {
        if !self.is_available() {
            return Err(CoreError::VoucherRangeExhausted {
                range_id: self.id.clone(),
                end: self.end,
            });
        }

        let ncf = format_ncf(&self.prefix, self.current);
        // is_available() caps current at NCF_MAX_CURSOR, so this cannot wrap.
        self.current += 1;
        if self.current > self.end || self.current > NCF_MAX_CURSOR {
            self.status = VoucherStatus::Exhausted;
        }
        Ok(ncf)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
