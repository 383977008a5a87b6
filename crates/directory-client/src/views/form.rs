//! Create and edit form.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::info;

use crate::api::DirectoryApi;
use crate::model::UserInput;
use crate::notice::Notices;
use crate::routes::{Route, navbar};

const FETCH_FAILED: &str = "Failed to fetch user";
const SAVE_FAILED: &str = "Failed to save user";
const CREATED: &str = "User created successfully";
const UPDATED: &str = "User updated successfully";

#[expect(clippy::expect_used, reason = "literal pattern")]
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

#[expect(clippy::expect_used, reason = "literal pattern")]
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-\s()]+$").expect("valid phone pattern"));

/// Inputs on the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    /// Display name.
    Name,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// Role label.
    Role,
    /// Postal address.
    Address,
}

impl FormField {
    /// Every field in display order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Role,
        Self::Address,
    ];

    /// Label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Role => "Role",
            Self::Address => "Address",
        }
    }

    fn value(self, input: &UserInput) -> &str {
        match self {
            Self::Name => &input.name,
            Self::Email => &input.email,
            Self::Phone => &input.phone,
            Self::Role => &input.role,
            Self::Address => &input.address,
        }
    }

    const fn value_mut(self, input: &mut UserInput) -> &mut String {
        match self {
            Self::Name => &mut input.name,
            Self::Email => &mut input.email,
            Self::Phone => &mut input.phone,
            Self::Role => &mut input.role,
            Self::Address => &mut input.address,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-field validation messages.
pub type FieldErrors = BTreeMap<FormField, &'static str>;

fn field_error(field: FormField, value: &str) -> Option<&'static str> {
    let blank = value.trim().is_empty();
    match field {
        FormField::Name if blank => Some("Name is required"),
        FormField::Email if blank => Some("Email is required"),
        FormField::Email if !EMAIL_PATTERN.is_match(value) => Some("Invalid email format"),
        FormField::Phone if blank => Some("Phone is required"),
        FormField::Phone if !PHONE_PATTERN.is_match(value) => Some("Invalid phone format"),
        FormField::Address if blank => Some("Address is required"),
        FormField::Role if blank => Some("Role is required"),
        _ => None,
    }
}

/// Check `input` the way the form does before submitting.
///
/// # Examples
///
/// ```
/// use directory_client::model::UserInput;
/// use directory_client::views::form::{FormField, validate};
///
/// let errors = validate(&UserInput {
///     name: "Ada".into(),
///     email: "ada@example".into(),
///     phone: "+44 20 7946 0000".into(),
///     address: "London".into(),
///     role: "Admin".into(),
/// });
/// assert_eq!(errors.get(&FormField::Email), Some(&"Invalid email format"));
/// assert_eq!(errors.len(), 1);
/// ```
#[must_use]
pub fn validate(input: &UserInput) -> FieldErrors {
    FormField::ALL
        .into_iter()
        .filter_map(|field| field_error(field, field.value(input)).map(|message| (field, message)))
        .collect()
}

/// Whether the form creates a user or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// `/users/add`.
    Create,
    /// `/users/:id/edit`.
    Edit(String),
}

/// View model of the create/edit form.
pub struct FormView<A: ?Sized> {
    api: Arc<A>,
    mode: FormMode,
    input: UserInput,
    errors: FieldErrors,
    loading: bool,
    notices: Notices,
}

impl<A> FormView<A>
where
    A: DirectoryApi + ?Sized,
{
    /// An empty form in `mode`.
    #[must_use]
    pub fn new(api: Arc<A>, mode: FormMode) -> Self {
        Self {
            api,
            mode,
            input: UserInput::default(),
            errors: FieldErrors::new(),
            loading: false,
            notices: Notices::new(),
        }
    }

    /// Current inputs.
    #[must_use]
    pub const fn input(&self) -> &UserInput {
        &self.input
    }

    /// Current validation messages.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// A request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Notices raised by this view.
    pub const fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    /// Pre-fill the inputs when editing. Returns the route to leave for when
    /// the record cannot be fetched.
    pub async fn load(&mut self) -> Option<Route> {
        let FormMode::Edit(id) = &self.mode else {
            return None;
        };
        self.loading = true;
        let fetched = self.api.get_user(id).await;
        self.loading = false;
        match fetched {
            Ok(user) => {
                self.input = UserInput::from(&user);
                None
            }
            Err(err) => {
                self.notices.error(err.notice_text(FETCH_FAILED));
                Some(Route::List)
            }
        }
    }

    /// Change one input; its validation message is cleared.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *field.value_mut(&mut self.input) = value.into();
        self.errors.remove(&field);
    }

    /// Validate and save. Returns the route to navigate to on success; on
    /// failure the inputs are kept.
    pub async fn submit(&mut self) -> Option<Route> {
        self.errors = validate(&self.input);
        if !self.errors.is_empty() {
            return None;
        }

        self.loading = true;
        let saved = match &self.mode {
            FormMode::Create => self.api.create_user(&self.input).await,
            FormMode::Edit(id) => self.api.update_user(id, &self.input).await,
        };
        self.loading = false;

        match saved {
            Ok(user) => {
                let created = matches!(self.mode, FormMode::Create);
                info!(user_id = %user.id, created, "user saved");
                self.notices.success(if created { CREATED } else { UPDATED });
                Some(Route::List)
            }
            Err(err) => {
                self.notices.error(err.notice_text(SAVE_FAILED));
                None
            }
        }
    }

    /// Text rendering of the form.
    #[must_use]
    pub fn render(&self) -> String {
        let (title, current) = match &self.mode {
            FormMode::Create => ("Add New User", Route::Add),
            FormMode::Edit(id) => ("Edit User", Route::Edit(id.clone())),
        };
        let mut out = format!("{}\n\n{title}\n\n", navbar(&current));
        for field in FormField::ALL {
            out.push_str(&format!("{:<8} {}\n", field.label(), field.value(&self.input)));
            if let Some(message) = self.errors.get(&field) {
                out.push_str(&format!("         ! {message}\n"));
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
