use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;
use crate::db::{EmployeeFilter, RecordStore};
use crate::errors::{AppError, EMAIL_TAKEN};
use crate::models::employee::{Employee, EmployeeDraft, EmployeeForm, Gender};
use crate::utils::image_store::{ImageError, ImageKind, ImageStore};
use crate::utils::validation::field_errors;

const NOT_FOUND: &str = "Employee not found";

/// Raw bytes of an uploaded image, not yet inspected.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    /// The part went over the size limit while reading; `bytes` is incomplete.
    pub oversized: bool,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>) -> Self {
        ImageUpload { bytes, oversized: false }
    }

    pub fn oversized(bytes: Vec<u8>) -> Self {
        ImageUpload { bytes, oversized: true }
    }
}

pub struct EmployeeService {
    store: Arc<dyn RecordStore>,
    images: ImageStore,
}

// Unparseable ids cannot name a record.
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim()).map_err(|_| AppError::NotFound(NOT_FOUND.to_string()))
}

impl EmployeeService {
    pub fn new(store: Arc<dyn RecordStore>, images: ImageStore) -> Self {
        EmployeeService { store, images }
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    fn inspect_image(&self, upload: &ImageUpload) -> Result<ImageKind, ImageError> {
        if upload.oversized {
            return Err(ImageError::TooLarge(self.images.max_bytes()));
        }
        self.images.inspect(&upload.bytes)
    }

    /// Runs every field check plus the image check and reports all failures together.
    fn validate(
        &self,
        form: EmployeeForm,
        image: Option<&ImageUpload>,
    ) -> Result<(EmployeeDraft, Option<ImageKind>), AppError> {
        let form = form.normalized();
        let mut errors = match form.validate() {
            Ok(()) => Default::default(),
            Err(err) => field_errors(&err),
        };

        let kind = match image.map(|upload| self.inspect_image(upload)) {
            Some(Ok(kind)) => Some(kind),
            Some(Err(err)) => {
                errors.insert("image".to_string(), err.to_string());
                None
            }
            None => None,
        };

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let gender = Gender::parse(&form.gender)
            .ok_or_else(|| AppError::invalid_field("gender", "Gender must be either 'Male' or 'Female'"))?;

        let draft = EmployeeDraft {
            name: form.name,
            email: form.email,
            mobile_no: form.mobile_no,
            designation: form.designation,
            gender,
            course: form.course,
            image_path: None,
        };
        Ok((draft, kind))
    }

    async fn store_image(
        &self,
        image: Option<ImageUpload>,
        kind: Option<ImageKind>,
    ) -> Result<Option<String>, AppError> {
        match (image, kind) {
            (Some(upload), Some(kind)) => {
                let path = self
                    .images
                    .save(&upload.bytes, kind)
                    .await
                    .map_err(|err| AppError::Storage(format!("failed to write image: {}", err)))?;
                Ok(Some(path))
            }
            _ => Ok(None),
        }
    }

    /// Validates and stores a standalone image, returning its relative path.
    pub async fn save_image(&self, upload: ImageUpload) -> Result<String, AppError> {
        let kind = self
            .inspect_image(&upload)
            .map_err(|err| AppError::invalid_field("image", err.to_string()))?;

        self.store_image(Some(upload), Some(kind))
            .await?
            .ok_or_else(|| AppError::Storage("image was not written".to_string()))
    }

    pub async fn create(&self, form: EmployeeForm, image: Option<ImageUpload>) -> Result<Employee, AppError> {
        let (mut draft, kind) = self.validate(form, image.as_ref())?;

        // Fast path only; the store rejects duplicates on insert as well.
        if self.store.find_one(EmployeeFilter::Email(draft.email.clone())).await?.is_some() {
            return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
        }

        // Blob first: a failed insert leaves an orphaned file, never a half-made record.
        draft.image_path = self.store_image(image, kind).await?;

        let employee = self.store.insert(draft).await?;
        log::info!("Created employee {} <{}>", employee.id, employee.email);
        Ok(employee)
    }

    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Employee, AppError> {
        let id = parse_id(id)?;
        self.store
            .find_one(EmployeeFilter::Id(id))
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    /// Without a new image the stored `imagePath` is kept.
    pub async fn update(
        &self,
        id: &str,
        form: EmployeeForm,
        image: Option<ImageUpload>,
    ) -> Result<Employee, AppError> {
        let id = parse_id(id)?;
        let (mut draft, kind) = self.validate(form, image.as_ref())?;

        if self.store.find_one(EmployeeFilter::Id(id)).await?.is_none() {
            return Err(AppError::NotFound(NOT_FOUND.to_string()));
        }

        if let Some(other) = self.store.find_one(EmployeeFilter::Email(draft.email.clone())).await? {
            if other.id != id {
                return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
            }
        }

        draft.image_path = self.store_image(image, kind).await?;

        let employee = self
            .store
            .update_by_id(id, draft)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
        log::info!("Updated employee {}", employee.id);
        Ok(employee)
    }

    /// Hard delete. The image blob stays on disk.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id = parse_id(id)?;
        if !self.store.delete_by_id(id).await? {
            return Err(AppError::NotFound(NOT_FOUND.to_string()));
        }
        log::info!("Deleted employee {}", id);
        Ok(())
    }
}
