use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;
use crate::db::{same_email, EmployeeFilter, RecordStore, StoreError};
use crate::models::employee::{Employee, EmployeeDraft};

/// Process-local record store. Every operation runs under one lock, so the
/// email check and the write that follows it are atomic.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<Employee>>,
}

impl MemoryRecordStore {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<Employee>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Backend("record store lock poisoned".to_string()))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, draft: EmployeeDraft) -> Result<Employee, StoreError> {
        let mut records = self.lock()?;
        if records.iter().any(|r| same_email(&r.email, &draft.email)) {
            return Err(StoreError::DuplicateEmail);
        }

        let employee = Employee {
            id: Uuid::new_v4(),
            name: draft.name,
            email: draft.email,
            mobile_no: draft.mobile_no,
            designation: draft.designation,
            gender: draft.gender,
            course: draft.course,
            image_path: draft.image_path,
            created_at: Utc::now(),
        };
        records.push(employee.clone());
        Ok(employee)
    }

    async fn find_one(&self, filter: EmployeeFilter) -> Result<Option<Employee>, StoreError> {
        let records = self.lock()?;
        let found = match filter {
            EmployeeFilter::Id(id) => records.iter().find(|r| r.id == id),
            EmployeeFilter::Email(email) => records.iter().find(|r| same_email(&r.email, &email)),
        };
        Ok(found.cloned())
    }

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.lock()?.clone())
    }

    async fn update_by_id(&self, id: Uuid, patch: EmployeeDraft) -> Result<Option<Employee>, StoreError> {
        let mut records = self.lock()?;
        if records.iter().any(|r| r.id != id && same_email(&r.email, &patch.email)) {
            return Err(StoreError::DuplicateEmail);
        }

        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        record.name = patch.name;
        record.email = patch.email;
        record.mobile_no = patch.mobile_no;
        record.designation = patch.designation;
        record.gender = patch.gender;
        record.course = patch.course;
        if patch.image_path.is_some() {
            record.image_path = patch.image_path;
        }
        Ok(Some(record.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }
}
