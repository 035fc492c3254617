//! # Seed Data
//!
//! The document a fresh install starts from.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  branches   br-1 Santo Domingo Centro, br-2 Santiago Los Jardines      │
//! │  inventory  garment catalog with base prices                           │
//! │  customers  a handful of walk-in regulars                              │
//! │  staff      u-admin-1 (Admin, Mon-Sat 08:00-20:00, first branch)       │
//! │  vouchers   per branch: v-{b}-1 B01 1..100, v-{b}-2 B02 1..500         │
//! │  orders, auditLogs, backups: empty                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use lavanflow_core::{
    Branch, Customer, Garment, Money, Role, StaffMember, TaxReceiptType, VoucherRange,
    VoucherStatus, WorkSchedule,
};

use crate::document::Document;

/// Builds the default document, stamping voucher ranges with `now`.
pub fn default_document(now: DateTime<Utc>) -> Document {
    let branches = default_branches();
    let vouchers = branches
        .iter()
        .flat_map(|branch| default_voucher_ranges(&branch.id, now))
        .collect();
    let staff = vec![default_admin(&branches[0].id)];

    Document {
        inventory: default_inventory(),
        customers: default_customers(),
        staff,
        vouchers,
        branches,
        ..Document::default()
    }
}

fn default_branches() -> Vec<Branch> {
    vec![
        branch("br-1", "LavanFlow Centro", "Av. 27 de Febrero 214, Santo Domingo", "809-555-0101"),
        branch("br-2", "LavanFlow Los Jardines", "Calle 5 No. 12, Santiago", "809-555-0202"),
    ]
}

fn branch(id: &str, name: &str, address: &str, phone: &str) -> Branch {
    Branch {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        phone: phone.to_string(),
    }
}

fn default_inventory() -> Vec<Garment> {
    [
        ("g-1", "Shirt", "Washing", 150_00),
        ("g-2", "Trousers", "Washing", 175_00),
        ("g-3", "Suit (2 pieces)", "Dry Cleaning", 650_00),
        ("g-4", "Dress", "Dry Cleaning", 450_00),
        ("g-5", "Bed Sheet", "Washing", 200_00),
        ("g-6", "Comforter", "Washing", 550_00),
        ("g-7", "Shirt (Ironing Only)", "Ironing", 75_00),
        ("g-8", "Curtain Panel", "Dry Cleaning", 350_00),
    ]
    .into_iter()
    .map(|(id, name, category, cents)| Garment {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price: Money::from_cents(cents),
    })
    .collect()
}

fn default_customers() -> Vec<Customer> {
    [
        ("c-1", "CUST-1001", "María Rodríguez", "809-555-1234", Some("maria.r@example.com")),
        ("c-2", "CUST-1002", "José Pérez", "829-555-5678", None),
        ("c-3", "CUST-1003", "Ana Martínez", "849-555-9012", Some("ana.m@example.com")),
    ]
    .into_iter()
    .map(|(id, code, name, phone, email)| Customer {
        id: id.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.map(str::to_string),
        address: None,
    })
    .collect()
}

fn default_admin(branch_id: &str) -> StaffMember {
    StaffMember {
        id: "u-admin-1".to_string(),
        username: "Admin".to_string(),
        role: Role::Admin,
        branch_id: branch_id.to_string(),
        is_active: true,
        schedule: WorkSchedule {
            days: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            start_time: "08:00".to_string(),
            end_time: "20:00".to_string(),
        },
    }
}

fn default_voucher_ranges(branch_id: &str, now: DateTime<Utc>) -> [VoucherRange; 2] {
    let range = |suffix: u8, receipt_type: TaxReceiptType, end: u64| VoucherRange {
        id: format!("v-{}-{}", branch_id, suffix),
        receipt_type,
        prefix: receipt_type.prefix().to_string(),
        start: 1,
        end,
        current: 1,
        branch_id: branch_id.to_string(),
        status: VoucherStatus::Active,
        created_at: now,
    };

    [
        range(1, TaxReceiptType::TaxCredit, 100),
        range(2, TaxReceiptType::FinalConsumer, 500),
    ]
}
