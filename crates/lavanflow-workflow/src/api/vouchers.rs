//! Voucher (NCF) endpoints.

use lavanflow_core::{BurnRequest, NewVoucherRange, TaxReceiptType, VoucherRange};
use lavanflow_db::MockApi;

use super::{decode, encode};
use crate::error::WorkflowResult;

/// `GET /vouchers`.
pub async fn list(api: &MockApi) -> WorkflowResult<Vec<VoucherRange>> {
    decode(api.get("/vouchers").await?)
}

/// `POST /vouchers`.
pub async fn create_range(api: &MockApi, range: &NewVoucherRange) -> WorkflowResult<VoucherRange> {
    decode(api.post("/vouchers", encode(range)?).await?)
}

/// `POST /vouchers/burn`. An empty string means no active range matched.
pub async fn burn(
    api: &MockApi,
    receipt_type: TaxReceiptType,
    branch_id: &str,
) -> WorkflowResult<String> {
    let request = BurnRequest {
        receipt_type,
        branch_id: branch_id.to_string(),
    };
    decode(api.post("/vouchers/burn", encode(&request)?).await?)
}
