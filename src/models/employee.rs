use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use validator::Validate;
use crate::utils::validation::{validate_email_shape, validate_gender, validate_mobile_no};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Accepts `male` / `Female` / ` MALE ` and so on.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile_no: String,
    pub designation: String,
    pub gender: Gender,
    pub course: Vec<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row shape of the `employees` table.
#[derive(sqlx::FromRow, Debug)]
pub struct EmployeeRow {
    pub employee_id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile_no: String,
    pub designation: String,
    pub gender: String,
    pub course: Vec<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = String;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let gender = Gender::parse(&row.gender).ok_or_else(|| {
            format!("employee {} has unknown gender '{}'", row.employee_id, row.gender)
        })?;

        Ok(Employee {
            id: row.employee_id,
            name: row.name,
            email: row.email,
            mobile_no: row.mobile_no,
            designation: row.designation,
            gender,
            course: row.course,
            image_path: row.image_path,
            created_at: row.created_at,
        })
    }
}

/// Validated field values handed to the record store.
///
/// On insert `image_path` is stored as given. On update `None` keeps the
/// path already on the record.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub mobile_no: String,
    pub designation: String,
    pub gender: Gender,
    pub course: Vec<String>,
    pub image_path: Option<String>,
}

/// Employee fields as submitted by the front end, before validation.
#[derive(Deserialize, Validate, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(custom = "validate_email_shape")]
    pub email: String,
    #[validate(custom = "validate_mobile_no")]
    pub mobile_no: String,
    #[validate(length(min = 1, message = "Designation is required"))]
    pub designation: String,
    #[validate(custom = "validate_gender")]
    pub gender: String,
    #[validate(length(min = 1, message = "At least one course should be selected"))]
    pub course: Vec<String>,
}

impl EmployeeForm {
    /// Trims every value and turns `course` into a set, keeping first-seen order.
    pub fn normalized(self) -> Self {
        let mut course: Vec<String> = Vec::with_capacity(self.course.len());
        for code in self.course.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
            if !course.iter().any(|seen| seen == code) {
                course.push(code.to_string());
            }
        }

        EmployeeForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            mobile_no: self.mobile_no.trim().to_string(),
            designation: self.designation.trim().to_string(),
            gender: self.gender.trim().to_string(),
            course,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parse_ignores_case_and_whitespace() {
        assert_eq!(Gender::parse("male"), Some(Gender::Male));
        assert_eq!(Gender::parse(" FEMALE "), Some(Gender::Female));
        assert_eq!(Gender::parse("other"), None);
        assert_eq!(Gender::Female.as_str(), "Female");
    }

    #[test]
    fn normalized_trims_and_dedupes_courses() {
        let form = EmployeeForm {
            name: "  Jane Doe ".into(),
            email: " jane@example.com".into(),
            mobile_no: "12345 ".into(),
            designation: "HR".into(),
            gender: "Female".into(),
            course: vec!["MCA".into(), " BSC".into(), "MCA".into(), "  ".into()],
        }
        .normalized();

        assert_eq!(form.name, "Jane Doe");
        assert_eq!(form.email, "jane@example.com");
        assert_eq!(form.mobile_no, "12345");
        assert_eq!(form.course, vec!["MCA".to_string(), "BSC".to_string()]);
    }

    #[test]
    fn record_serializes_missing_image_as_null() {
        let employee = Employee {
            id: Uuid::new_v4(),
            name: "Jane".into(),
            email: "jane@example.com".into(),
            mobile_no: "123".into(),
            designation: "HR".into(),
            gender: Gender::Female,
            course: vec!["MCA".into()],
            image_path: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&employee).unwrap();
        assert!(json.get("imagePath").unwrap().is_null());
        assert_eq!(json["mobileNo"], "123");
        assert_eq!(json["gender"], "Female");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn row_with_unknown_gender_is_rejected() {
        let row = EmployeeRow {
            employee_id: Uuid::new_v4(),
            name: "X".into(),
            email: "x@example.com".into(),
            mobile_no: "1".into(),
            designation: "HR".into(),
            gender: "unknown".into(),
            course: vec![],
            image_path: None,
            created_at: Utc::now(),
        };

        assert!(Employee::try_from(row).is_err());
    }
}
