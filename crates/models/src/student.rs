use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{FieldError, ModelError};

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_AGE: i64 = 10;
pub const MAX_AGE: i64 = 100;

/// Stored student record.
/// - `id` and `created_at` are assigned by the store and never change
/// - `email` keeps the caller's casing; uniqueness is checked case-insensitively
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub department: Option<String>,
    #[serde(rename = "CGPA")]
    pub cgpa: i64,
    pub created_at: DateTime<Utc>,
}

impl Student {
    /// Case-insensitive email comparison used for the uniqueness rule.
    pub fn has_email(&self, email: &str) -> bool {
        fold_email(&self.email) == fold_email(email)
    }

    /// Department label, with a missing department read as `""`.
    pub fn department_or_empty(&self) -> &str {
        self.department.as_deref().unwrap_or("")
    }
}

/// Create input: id/created_at are not accepted from callers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: i64,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(rename = "CGPA")]
    pub cgpa: i64,
}

impl NewStudent {
    /// Check every field and report all violations together.
    pub fn validate(&self) -> Result<(), ModelError> {
        collect(vec![
            validate_name(&self.name).err(),
            validate_email(&self.email).err(),
            validate_age(self.age).err(),
        ])
    }

    /// Build the stored record. Callers validate first.
    pub fn into_student(self) -> Student {
        Student {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            age: self.age,
            department: self.department,
            cgpa: self.cgpa,
            created_at: Utc::now(),
        }
    }
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StudentPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(rename = "CGPA", default)]
    pub cgpa: Option<i64>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.department.is_none()
            && self.cgpa.is_none()
    }

    /// Validate only the supplied fields, with the same rules as create.
    pub fn validate(&self) -> Result<(), ModelError> {
        collect(vec![
            self.name.as_deref().and_then(|n| validate_name(n).err()),
            self.email.as_deref().and_then(|e| validate_email(e).err()),
            self.age.and_then(|a| validate_age(a).err()),
        ])
    }

    /// Trimmed email if one was supplied.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim)
    }

    /// Copy supplied fields onto `student`. Callers validate first.
    pub fn apply_to(self, student: &mut Student) {
        if let Some(name) = self.name {
            student.name = name.trim().to_string();
        }
        if let Some(email) = self.email {
            student.email = email.trim().to_string();
        }
        if let Some(age) = self.age {
            student.age = age;
        }
        if let Some(department) = self.department {
            student.department = Some(department);
        }
        if let Some(cgpa) = self.cgpa {
            student.cgpa = cgpa;
        }
    }
}

pub fn validate_name(name: &str) -> Result<(), FieldError> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(FieldError::new("name", format!("name must be at least {MIN_NAME_LEN} characters")));
    }
    Ok(())
}

pub fn validate_age(age: i64) -> Result<(), FieldError> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(FieldError::new("age", format!("age must be between {MIN_AGE} and {MAX_AGE}")));
    }
    Ok(())
}

/// Structural email check: one `@`, non-empty local part, dotted domain
/// with no empty labels, no whitespace.
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    let invalid = || FieldError::new("email", "value is not a valid email address");
    let email = email.trim();
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

/// Canonical form used to compare emails.
pub fn fold_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn collect(results: Vec<Option<FieldError>>) -> Result<(), ModelError> {
    let errors: Vec<FieldError> = results.into_iter().flatten().collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ModelError::Validation(errors))
    }
}
