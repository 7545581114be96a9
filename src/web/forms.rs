//! Form schemas for the HTML pages.
//!
//! Every create/update flow deserializes one of these structs, runs
//! `validate()` and turns failures into [`FormErrors`] for re-rendering.

use regex::Regex;
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use validator::{Validate, ValidationErrors};

use crate::domain::entities::ProfileFields;
use crate::utils::url_normalizer::normalize_page_url;

/// Letters, digits and `@ . + - _`, as accepted for usernames.
pub static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.@+-]+$").expect("valid username regex"));

/// Per-field and form-wide error messages.
#[derive(Debug, Clone, Default)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
    non_field: Vec<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    pub fn for_field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }

    /// Merges validator output, falling back to the error code when a rule
    /// has no message.
    pub fn extend_from(&mut self, errors: &ValidationErrors) {
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let message = err
                    .message
                    .clone()
                    .unwrap_or_else(|| Cow::Owned(format!("Invalid value ({}).", err.code)));
                self.add(&field, message);
            }
        }
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut form_errors = FormErrors::new();
        form_errors.extend_from(&errors);
        form_errors
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryForm {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 128,
        message = "Please enter a category name of at most 128 characters."
    ))]
    pub name: String,
}

impl CategoryForm {
    /// Trims the name, then validates.
    pub fn clean(mut self) -> Result<Self, FormErrors> {
        self.name = self.name.trim().to_string();
        self.validate()?;
        Ok(self)
    }
}

/// Optional website and avatar reference for a profile.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserProfileForm {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 200, message = "Ensure the website has at most 200 characters."))]
    pub website: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 255, message = "Ensure the picture has at most 255 characters."))]
    pub picture: Option<String>,
}

impl UserProfileForm {
    /// Builds a form pre-filled from stored values.
    pub fn from_fields(website: Option<String>, picture: Option<String>) -> Self {
        Self { website, picture }
    }

    /// Normalizes the website like any page URL and validates lengths.
    pub fn clean(self) -> Result<ProfileFields, FormErrors> {
        let mut errors = FormErrors::new();

        let website = match self.website.as_deref().map(str::trim).filter(|w| !w.is_empty()) {
            Some(raw) => match normalize_page_url(raw) {
                Ok(url) => Some(url),
                Err(_) => {
                    errors.add("website", "Enter a valid URL.");
                    None
                }
            },
            None => None,
        };
        let picture = self
            .picture
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let cleaned = UserProfileForm {
            website: website.clone(),
            picture: picture.clone(),
        };
        if let Err(e) = cleaned.validate() {
            errors.extend_from(&e);
        }

        if errors.is_empty() {
            Ok(ProfileFields { website, picture })
        } else {
            Err(errors)
        }
    }

    pub fn website_value(&self) -> &str {
        self.website.as_deref().unwrap_or_default()
    }

    pub fn picture_value(&self) -> &str {
        self.picture.as_deref().unwrap_or_default()
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 150, message = "Enter a username of at most 150 characters."),
        regex(
            path = *USERNAME_RE,
            message = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
        )
    )]
    pub username: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(
        min = 8,
        message = "This password is too short. It must contain at least 8 characters."
    ))]
    pub password1: String,

    #[serde(default)]
    pub password2: String,
}

impl RegisterForm {
    /// Validates fields and checks that both passwords match.
    pub fn clean(mut self) -> Result<Self, FormErrors> {
        self.username = self.username.trim().to_string();
        self.email = self
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        let mut errors = FormErrors::new();
        if let Err(e) = self.validate() {
            errors.extend_from(&e);
        }
        if self.password1 != self.password2 {
            errors.add("password2", "The two password fields didn't match.");
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

/// Search box on the category page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
}

/// Returns `next` if it is a local absolute path, otherwise `/`.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => "/",
    }
}
