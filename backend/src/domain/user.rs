//! Directory user model.
//!
//! A [`User`] is the single entity the directory manages. New records enter
//! through a validated [`UserDraft`]; edits arrive as a [`UserPatch`] where
//! every field is optional but none may be blank.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five user-supplied fields, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserField {
    /// Full name.
    Name,
    /// Contact email; unique across the directory.
    Email,
    /// Contact phone number.
    Phone,
    /// Postal address.
    Address,
    /// Free-text role label.
    Role,
}

impl UserField {
    /// Every field in presentation order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::Role,
    ];

    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Role => "role",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// One or more required fields were absent or blank.
    MissingFields(Vec<UserField>),
    /// Fields present in an update were blank.
    BlankFields(Vec<UserField>),
}

impl UserValidationError {
    /// Fields that failed validation.
    pub fn fields(&self) -> &[UserField] {
        match self {
            Self::MissingFields(fields) | Self::BlankFields(fields) => fields,
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fields, suffix) = match self {
            Self::MissingFields(fields) => (fields, "is required"),
            Self::BlankFields(fields) => (fields, "must not be blank"),
        };
        f.write_str("User validation failed: ")?;
        for (index, field) in fields.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field} {suffix}")?;
        }
        Ok(())
    }
}

impl std::error::Error for UserValidationError {}

/// Opaque user identifier assigned on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Borrow the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A stored directory record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Full name.
    pub name: String,
    /// Unique contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Free-text role label.
    pub role: String,
    /// Creation time; the default listing order is newest first.
    pub created_at: DateTime<Utc>,
    /// Time of the most recent update.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Materialise a draft as a new record stamped with `now`.
    pub fn create(draft: UserDraft, now: DateTime<Utc>) -> Self {
        let UserDraft {
            name,
            email,
            phone,
            address,
            role,
        } = draft;
        Self {
            id: UserId::random(),
            name,
            email,
            phone,
            address,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Read a field by name.
    pub fn field(&self, field: UserField) -> &str {
        match field {
            UserField::Name => &self.name,
            UserField::Email => &self.email,
            UserField::Phone => &self.phone,
            UserField::Address => &self.address,
            UserField::Role => &self.role,
        }
    }

    /// Apply a validated patch, refreshing `updated_at`.
    pub fn apply(&mut self, patch: &UserPatch, now: DateTime<Utc>) {
        for field in UserField::ALL {
            if let Some(value) = patch.value(field) {
                let slot = match field {
                    UserField::Name => &mut self.name,
                    UserField::Email => &mut self.email,
                    UserField::Phone => &mut self.phone,
                    UserField::Address => &mut self.address,
                    UserField::Role => &mut self.role,
                };
                value.clone_into(slot);
            }
        }
        self.updated_at = now;
    }
}

/// Raw, possibly incomplete user input as decoded from a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFields {
    /// Proposed name.
    pub name: Option<String>,
    /// Proposed email.
    pub email: Option<String>,
    /// Proposed phone number.
    pub phone: Option<String>,
    /// Proposed address.
    pub address: Option<String>,
    /// Proposed role.
    pub role: Option<String>,
}

impl UserFields {
    fn into_array(self) -> [Option<String>; 5] {
        [self.name, self.email, self.phone, self.address, self.role]
    }
}

/// Trim a value and treat whitespace-only input as absent.
fn normalise(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    })
}

/// Validated input for creating a user. All fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    name: String,
    email: String,
    phone: String,
    address: String,
    role: String,
}

impl UserDraft {
    /// Validate raw fields, reporting every missing one at once.
    ///
    /// # Examples
    /// ```
    /// use directory_backend::domain::{UserDraft, UserField, UserFields};
    ///
    /// let err = UserDraft::try_from_fields(UserFields {
    ///     name: Some("Ada".into()),
    ///     ..UserFields::default()
    /// })
    /// .expect_err("incomplete");
    /// assert_eq!(err.fields()[0], UserField::Email);
    /// ```
    pub fn try_from_fields(fields: UserFields) -> Result<Self, UserValidationError> {
        let values = fields.into_array().map(normalise);
        let missing: Vec<UserField> = UserField::ALL
            .iter()
            .zip(values.iter())
            .filter(|(_, value)| value.is_none())
            .map(|(field, _)| *field)
            .collect();
        match values {
            [
                Some(name),
                Some(email),
                Some(phone),
                Some(address),
                Some(role),
            ] => Ok(Self {
                name,
                email,
                phone,
                address,
                role,
            }),
            _ => Err(UserValidationError::MissingFields(missing)),
        }
    }
}

/// Validated partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    role: Option<String>,
}

impl UserPatch {
    /// Validate raw fields: any field that is present must not be blank.
    pub fn try_from_fields(fields: UserFields) -> Result<Self, UserValidationError> {
        let values = fields.into_array();
        let blank: Vec<UserField> = UserField::ALL
            .iter()
            .zip(values.iter())
            .filter(|(_, value)| value.as_deref().is_some_and(|v| v.trim().is_empty()))
            .map(|(field, _)| *field)
            .collect();
        if !blank.is_empty() {
            return Err(UserValidationError::BlankFields(blank));
        }
        let [name, email, phone, address, role] = values.map(normalise);
        Ok(Self {
            name,
            email,
            phone,
            address,
            role,
        })
    }

    /// New value for `field`, or `None` when the patch leaves it alone.
    pub fn value(&self, field: UserField) -> Option<&str> {
        match field {
            UserField::Name => self.name.as_deref(),
            UserField::Email => self.email.as_deref(),
            UserField::Phone => self.phone.as_deref(),
            UserField::Address => self.address.as_deref(),
            UserField::Role => self.role.as_deref(),
        }
    }
}
