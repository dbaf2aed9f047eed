// ABOUTME: Mock credential checks performed before the identity store is updated
// ABOUTME: Verifies demo account sign-in and validates new account registration forms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Mock authentication.
//!
//! The identity store accepts any identity it is handed. The checks a sign-in
//! or sign-up page performs first live here: matching an email and password
//! against the demo accounts, and validating a registration form.

use crate::constants::auth::{
    INVALID_CREDENTIALS_MESSAGE, MIN_PASSWORD_LENGTH, REGISTERED_USER_ID_PREFIX,
};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use crate::models::Identity;
use crate::seed::{self, DemoAccount};
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use subtle::ConstantTimeEq;

static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn looks_like_email(email: &str) -> bool {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

/// Sign-up form contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    /// Display name
    pub username: String,
    /// Sign-in email
    pub email: String,
    /// Chosen password
    pub password: String,
    /// Password typed a second time
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Form with matching password and confirmation
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            email: email.into(),
            confirm_password: password.clone(),
            password,
        }
    }

    /// Check the form the way the sign-up page does
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing field, a malformed email,
    /// mismatched passwords, or a password shorter than the minimum
    pub fn validate(&self) -> AppResult<()> {
        for (field, value) in [
            ("username", self.username.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
            ("confirmPassword", self.confirm_password.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::new(
                    ErrorCode::MissingRequiredField,
                    "Please fill in all fields",
                )
                .with_details(serde_json::json!({ "field": field })));
            }
        }

        if !looks_like_email(self.email.trim()) {
            return Err(AppError::new(
                ErrorCode::InvalidFormat,
                format!("'{}' is not a valid email address", self.email.trim()),
            ));
        }

        if self.password != self.confirm_password {
            return Err(AppError::invalid_input("Passwords do not match"));
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::out_of_range(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            ));
        }

        Ok(())
    }
}

/// Demo-account authenticator
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    accounts: Vec<DemoAccount>,
}

impl MockAuthenticator {
    /// Authenticator over the built-in demo accounts
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the embedded account list is invalid
    pub fn with_demo_accounts() -> AppResult<Self> {
        Ok(Self::new(seed::demo_accounts()?))
    }

    /// Authenticator over `accounts`
    #[must_use]
    pub const fn new(accounts: Vec<DemoAccount>) -> Self {
        Self { accounts }
    }

    /// Accounts accepted by [`MockAuthenticator::authenticate`]
    #[must_use]
    pub fn accounts(&self) -> &[DemoAccount] {
        &self.accounts
    }

    /// Match `email` and `password` against the known accounts
    ///
    /// Emails compare case-insensitively; passwords compare in constant time.
    ///
    /// # Errors
    ///
    /// Returns a validation error when either field is empty and
    /// `AuthInvalid` when no account matches
    pub fn authenticate(&self, email: &str, password: &str) -> AppResult<Identity> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::new(
                ErrorCode::MissingRequiredField,
                "Please fill in all fields",
            ));
        }

        let matched = self.accounts.iter().find(|account| {
            account.email.eq_ignore_ascii_case(email)
                && bool::from(account.password.as_bytes().ct_eq(password.as_bytes()))
        });

        match matched {
            Some(account) => {
                AppLogger::log_auth_event(&account.id, "credentials", true, None);
                Ok(account.identity())
            }
            None => {
                AppLogger::log_auth_event("unknown", "credentials", false, Some(email));
                Err(AppError::auth_invalid(INVALID_CREDENTIALS_MESSAGE))
            }
        }
    }

    /// Validate `form` and mint the identity of the new account
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`RegistrationForm::validate`]
    pub fn register(&self, form: &RegistrationForm) -> AppResult<Identity> {
        form.validate()?;
        let id = format!(
            "{REGISTERED_USER_ID_PREFIX}{}",
            Utc::now().timestamp_millis()
        );
        AppLogger::log_auth_event(&id, "registration_form", true, None);
        Ok(Identity::new(id, form.username.trim(), form.email.trim()))
    }
}
