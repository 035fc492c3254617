//! # Staff Repository

use lavanflow_core::validation::validate_new_staff;
use lavanflow_core::{NewStaffMember, StaffMember};
use tracing::debug;

use crate::document::Document;
use crate::error::DbResult;
use crate::ids::IdGenerator;

#[derive(Clone, Copy)]
pub struct StaffRepository<'a> {
    ids: &'a dyn IdGenerator,
}

impl<'a> StaffRepository<'a> {
    pub fn new(ids: &'a dyn IdGenerator) -> Self {
        StaffRepository { ids }
    }

    pub fn list(&self, doc: &Document) -> Vec<StaffMember> {
        doc.staff.clone()
    }

    /// Roster for the shift view, optionally limited to one branch.
    pub fn list_for_branch(&self, doc: &Document, branch_id: Option<&str>) -> Vec<StaffMember> {
        doc.staff
            .iter()
            .filter(|s| branch_id.map_or(true, |b| s.branch_id == b))
            .cloned()
            .collect()
    }

    /// Appends a staff member with a generated id.
    pub fn create(&self, doc: &mut Document, new_staff: NewStaffMember) -> DbResult<StaffMember> {
        validate_new_staff(&new_staff)?;

        let staff = new_staff.into_staff(self.ids.record_id());
        debug!(staff_id = %staff.id, username = %staff.username, "Staff member added");
        doc.staff.push(staff.clone());
        Ok(staff)
    }

    /// Removes staff member `id`. Removing an unknown id is not an error.
    pub fn delete(&self, doc: &mut Document, id: &str) {
        let before = doc.staff.len();
        doc.staff.retain(|s| s.id != id);
        debug!(staff_id = %id, removed = before - doc.staff.len(), "Staff delete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::seed::default_document;
    use chrono::Utc;
    use lavanflow_core::{Role, WorkSchedule};

    fn cashier(branch: &str) -> NewStaffMember {
        NewStaffMember {
            username: "Carla".to_string(),
            role: Role::Cashier,
            branch_id: branch.to_string(),
            is_active: true,
            schedule: WorkSchedule {
                days: vec!["Mon".to_string()],
                start_time: "09:00".to_string(),
                end_time: "17:00".to_string(),
            },
        }
    }

    #[test]
    fn test_create_appends() {
        let ids = SequentialIds::new();
        let repo = StaffRepository::new(&ids);
        let mut doc = default_document(Utc::now());

        let created = repo.create(&mut doc, cashier("br-2")).unwrap();
        assert_eq!(doc.staff.last().map(|s| s.id.as_str()), Some(created.id.as_str()));
        assert_eq!(doc.staff[0].id, "u-admin-1");
    }

    #[test]
    fn test_branch_filter() {
        let ids = SequentialIds::new();
        let repo = StaffRepository::new(&ids);
        let mut doc = default_document(Utc::now());
        repo.create(&mut doc, cashier("br-2")).unwrap();

        assert_eq!(repo.list_for_branch(&doc, None).len(), 2);
        let br2 = repo.list_for_branch(&doc, Some("br-2"));
        assert_eq!(br2.len(), 1);
        assert_eq!(br2[0].username, "Carla");
        assert!(repo.list_for_branch(&doc, Some("br-9")).is_empty());
    }

    #[test]
    fn test_delete() {
        let ids = SequentialIds::new();
        let repo = StaffRepository::new(&ids);
        let mut doc = default_document(Utc::now());
        let created = repo.create(&mut doc, cashier("br-1")).unwrap();

        repo.delete(&mut doc, &created.id);
        repo.delete(&mut doc, "nobody");
        assert_eq!(repo.list(&doc).len(), 1);
    }
}
