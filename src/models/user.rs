use super::{Entity, ValidationError, require};
use crate::filter::{EntityFilter, Query, contains_ci};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An account on the pantry server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub age: u32,
    pub company: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Editor,
    Viewer,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Editor => "editor",
            UserRole::Viewer => "viewer",
        }
    }

    pub const VALID_NAMES: &'static str = "admin, editor, viewer";
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a role name the server does not know.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role '{0}'. Valid roles are: {valid}", valid = UserRole::VALID_NAMES)]
pub struct ParseRoleError(pub String);

impl FromStr for UserRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "editor" => Ok(UserRole::Editor),
            "viewer" => Ok(UserRole::Viewer),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

impl Entity for User {
    const COLLECTION: &'static str = "users";
    const KIND: &'static str = "user";

    type Filter = UserFilter;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        if self.age < 1 || self.age > 150 {
            return Err(ValidationError::Range {
                field: "age",
                min: 1,
                max: 150,
            });
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

/// Filtering criteria for users. Unset fields constrain nothing.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    name: Option<String>,
    age: Option<u32>,
    company: Option<String>,
    email: Option<String>,
    role: Option<UserRole>,
}

impl UserFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: Option<impl Into<String>>) -> Self {
        self.name = name.map(|v| v.into());
        self
    }

    pub fn with_age(mut self, age: Option<u32>) -> Self {
        self.age = age;
        self
    }

    pub fn with_company(mut self, company: Option<impl Into<String>>) -> Self {
        self.company = company.map(|v| v.into());
        self
    }

    pub fn with_email(mut self, email: Option<impl Into<String>>) -> Self {
        self.email = email.map(|v| v.into());
        self
    }

    pub fn with_role(mut self, role: Option<UserRole>) -> Self {
        self.role = role;
        self
    }
}

impl EntityFilter for UserFilter {
    type Entity = User;

    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.company.is_none()
            && self.email.is_none()
            && self.role.is_none()
    }

    fn matches(&self, user: &User) -> bool {
        let name_match = self
            .name
            .as_ref()
            .map(|filter| contains_ci(&user.name, filter))
            .unwrap_or(true);

        let age_match = self.age.map(|filter| user.age == filter).unwrap_or(true);

        let company_match = self
            .company
            .as_ref()
            .map(|filter| contains_ci(&user.company, filter))
            .unwrap_or(true);

        let email_match = self
            .email
            .as_ref()
            .map(|filter| contains_ci(&user.email, filter))
            .unwrap_or(true);

        let role_match = self.role.map(|filter| user.role == filter).unwrap_or(true);

        name_match && age_match && company_match && email_match && role_match
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        query.push("name", self.name.as_deref());
        query.push_display("age", self.age.as_ref());
        query.push("company", self.company.as_deref());
        query.push("email", self.email.as_deref());
        query.push_display("role", self.role.as_ref());
        query
    }
}
