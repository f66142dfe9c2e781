use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use crate::db::{EmployeeFilter, RecordStore, StoreError};
use crate::models::employee::{Employee, EmployeeDraft, EmployeeRow};

const EMPLOYEE_COLUMNS: &str = "\
    employee_id, name, email, mobile_no, designation, \
    gender, course, image_path, created_at";

/// Name of the unique index backing email uniqueness.
const EMAIL_INDEX: &str = "employees_email_lower_key";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some(EMAIL_INDEX) {
                return StoreError::DuplicateEmail;
            }
        }
        StoreError::Backend(err.to_string())
    }
}

fn into_employee(row: EmployeeRow) -> Result<Employee, StoreError> {
    Employee::try_from(row).map_err(StoreError::Backend)
}

pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Connects and applies the embedded migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|err| StoreError::Backend(format!("migration failed: {}", err)))?;

        Ok(Self::from_pool(pool))
    }

    /// Wraps a pool whose schema is already migrated.
    pub fn from_pool(pool: PgPool) -> Self {
        PgRecordStore { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, draft: EmployeeDraft) -> Result<Employee, StoreError> {
        let query = format!(
            "INSERT INTO employees ({EMPLOYEE_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {EMPLOYEE_COLUMNS}"
        );

        // The unique index on LOWER(email) rejects duplicates here
        let row = sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(Uuid::new_v4())
            .bind(&draft.name)
            .bind(&draft.email)
            .bind(&draft.mobile_no)
            .bind(&draft.designation)
            .bind(draft.gender.as_str())
            .bind(&draft.course)
            .bind(&draft.image_path)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        into_employee(row)
    }

    async fn find_one(&self, filter: EmployeeFilter) -> Result<Option<Employee>, StoreError> {
        let row = match filter {
            EmployeeFilter::Id(id) => {
                let query = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE employee_id = $1");
                sqlx::query_as::<_, EmployeeRow>(&query)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            EmployeeFilter::Email(email) => {
                let query = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE LOWER(email) = LOWER($1)");
                sqlx::query_as::<_, EmployeeRow>(&query)
                    .bind(email)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };

        row.map(into_employee).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        let query = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY created_at, employee_id");
        let rows = sqlx::query_as::<_, EmployeeRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(into_employee).collect()
    }

    async fn update_by_id(&self, id: Uuid, patch: EmployeeDraft) -> Result<Option<Employee>, StoreError> {
        // NULL image_path leaves the stored one in place
        let query = format!(
            "UPDATE employees SET \
                name = $1, email = $2, mobile_no = $3, designation = $4, \
                gender = $5, course = $6, image_path = COALESCE($7, image_path) \
             WHERE employee_id = $8 \
             RETURNING {EMPLOYEE_COLUMNS}"
        );

        let row = sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(&patch.name)
            .bind(&patch.email)
            .bind(&patch.mobile_no)
            .bind(&patch.designation)
            .bind(patch.gender.as_str())
            .bind(&patch.course)
            .bind(&patch.image_path)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(into_employee).transpose()
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM employees WHERE employee_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
