//! Form state captured before a submit.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::user::{Company, UserRecord};

/// Addressable form fields.
///
/// The display names double as the persistence keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum FormField {
    #[strum(to_string = "name")]
    Name,
    #[strum(to_string = "username")]
    Username,
    #[strum(to_string = "email", serialize = "e-mail")]
    Email,
    #[strum(to_string = "companyName", serialize = "company", serialize = "company_name")]
    CompanyName,
}

impl FormField {
    /// Human-readable label used in prompts and tables.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Username => "Username",
            FormField::Email => "E-mail",
            FormField::CompanyName => "Company Name",
        }
    }
}

/// The four user-editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub company_name: String,
}

impl UserForm {
    /// Copy a record's fields into a fresh form.
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            name: record.name.clone(),
            username: record.username.clone(),
            email: record.email.clone(),
            company_name: record.company.name.clone(),
        }
    }

    /// Read one field.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Username => &self.username,
            FormField::Email => &self.email,
            FormField::CompanyName => &self.company_name,
        }
    }

    /// Assign one field.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Username => self.username = value,
            FormField::Email => self.email = value,
            FormField::CompanyName => self.company_name = value,
        }
    }

    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build a record with the given id from the current field values.
    pub fn to_record(&self, id: i64) -> UserRecord {
        UserRecord {
            id,
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            company: Company {
                name: self.company_name.clone(),
            },
        }
    }
}
