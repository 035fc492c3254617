//! # Customer Repository
//!
//! Search is a linear scan: case-insensitive on name and code, substring
//! on phone. Display codes (`CUST-1234`) are generated and kept unique.

use lavanflow_core::validation::{normalize_search, validate_new_customer};
use lavanflow_core::{Customer, NewCustomer};
use tracing::{debug, warn};

use crate::document::Document;
use crate::error::{DbError, DbResult};
use crate::ids::IdGenerator;

/// Attempts at drawing an unused customer code before giving up.
const MAX_CODE_ATTEMPTS: usize = 32;

#[derive(Clone, Copy)]
pub struct CustomerRepository<'a> {
    ids: &'a dyn IdGenerator,
}

impl<'a> CustomerRepository<'a> {
    pub fn new(ids: &'a dyn IdGenerator) -> Self {
        CustomerRepository { ids }
    }

    /// Customers matching `search`; an empty or missing term returns everyone.
    pub fn search(&self, doc: &Document, search: Option<&str>) -> DbResult<Vec<Customer>> {
        let needle = match search {
            Some(raw) => normalize_search(raw)?,
            None => None,
        };

        Ok(match needle {
            None => doc.customers.clone(),
            Some(needle) => doc
                .customers
                .iter()
                .filter(|c| c.matches_search(&needle))
                .cloned()
                .collect(),
        })
    }

    /// Appends a customer with a generated id and display code.
    pub fn create(&self, doc: &mut Document, new_customer: NewCustomer) -> DbResult<Customer> {
        validate_new_customer(&new_customer)?;

        let code = self.unused_code(doc)?;
        let customer = new_customer.into_customer(self.ids.record_id(), code);

        debug!(customer_id = %customer.id, code = %customer.code, "Customer registered");
        doc.customers.push(customer.clone());
        Ok(customer)
    }

    fn unused_code(&self, doc: &Document) -> DbResult<String> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = self.ids.customer_code();
            if !doc.customers.iter().any(|c| c.code == code) {
                return Ok(code);
            }
        }

        warn!(customers = doc.customers.len(), "Customer code space exhausted");
        Err(DbError::Conflict(
            "could not generate an unused customer code".to_string(),
        ))
    }
}
