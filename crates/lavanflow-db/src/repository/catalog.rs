//! Read-only reference data: branches and the garment catalog.

use lavanflow_core::{Branch, Garment};

use crate::document::Document;

pub fn branches(doc: &Document) -> Vec<Branch> {
    doc.branches.clone()
}

pub fn inventory(doc: &Document) -> Vec<Garment> {
    doc.inventory.clone()
}
