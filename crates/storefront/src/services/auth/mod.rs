//! Authentication service.
//!
//! Mock sign-in and registration. Accounts live in an in-memory
//! [`AccountDirectory`] for the lifetime of the process; passwords are
//! stored as argon2 hashes. Both operations wait out a configurable delay
//! after validation to stand in for a network round trip.

mod error;

pub use error::AuthError;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use naturindo_core::{Email, UserId};

use crate::models::User;
use crate::services::validation::FieldErrors;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum display name length (after trimming).
const MIN_NAME_LENGTH: usize = 2;

/// A registered account.
#[derive(Debug, Clone)]
struct Account {
    user: User,
    password_hash: String,
}

/// Registered accounts, keyed by email.
#[derive(Debug)]
pub struct AccountDirectory {
    accounts: RwLock<HashMap<Email, Account>>,
    next_id: AtomicI32,
}

impl Default for AccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            next_id: AtomicI32::new(1),
        }
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, name: String, email: Email, password_hash: String) -> Result<User, AuthError> {
        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        match accounts.entry(email) {
            Entry::Occupied(_) => Err(AuthError::UserAlreadyExists),
            Entry::Vacant(slot) => {
                let user = User {
                    id: UserId::new(self.next_id.fetch_add(1, Ordering::Relaxed)),
                    name,
                    email: slot.key().clone(),
                    phone: None,
                    address: None,
                };
                slot.insert(Account {
                    user: user.clone(),
                    password_hash,
                });
                Ok(user)
            }
        }
    }

    fn find(&self, email: &Email) -> Option<Account> {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(email)
            .cloned()
    }
}

/// Registration form input.
#[derive(Debug)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub password_confirm: SecretString,
}

/// Authentication service.
///
/// Borrowed from [`AppState`](crate::state::AppState) per request.
pub struct AuthService<'a> {
    accounts: &'a AccountDirectory,
    latency: Duration,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(accounts: &'a AccountDirectory, latency: Duration) -> Self {
        Self { accounts, latency }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if the fields are malformed, before any
    /// delay. Returns `AuthError::InvalidCredentials` for an unknown email or
    /// wrong password.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<User, AuthError> {
        let email = validate_login(email, password)?;

        tokio::time::sleep(self.latency).await;

        let account = self
            .accounts
            .find(&email)
            .ok_or(AuthError::InvalidCredentials)?;
        verify_password(password.expose_secret(), &account.password_hash)?;

        tracing::info!(user_id = %account.user.id, "user signed in");
        Ok(account.user)
    }

    /// Register a new account and return its user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if any field fails its rule, before any
    /// delay. Returns `AuthError::UserAlreadyExists` if the email is taken.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<User, AuthError> {
        let (name, email) = validate_registration(registration)?;

        tokio::time::sleep(self.latency).await;

        let password_hash = hash_password(registration.password.expose_secret())?;
        let user = self.accounts.insert(name, email, password_hash)?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}

// =============================================================================
// Validation
// =============================================================================

fn check_email(errors: &mut FieldErrors, email: &str) -> Option<Email> {
    match Email::parse(email) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.add("email", "Email tidak valid");
            None
        }
    }
}

fn check_password(errors: &mut FieldErrors, password: &SecretString) {
    if password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        errors.add("password", "Password minimal 6 karakter");
    }
}

/// Validate sign-in fields.
///
/// # Errors
///
/// Returns the per-field messages when any rule fails.
pub fn validate_login(email: &str, password: &SecretString) -> Result<Email, FieldErrors> {
    let mut errors = FieldErrors::new();
    let email = check_email(&mut errors, email);
    check_password(&mut errors, password);
    match email {
        Some(email) if errors.is_empty() => Ok(email),
        _ => Err(errors),
    }
}

/// Validate registration fields, returning the trimmed name and parsed email.
///
/// # Errors
///
/// Returns the per-field messages when any rule fails.
pub fn validate_registration(registration: &Registration) -> Result<(String, Email), FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = registration.name.trim();
    if name.chars().count() < MIN_NAME_LENGTH {
        errors.add("name", "Nama minimal 2 karakter");
    }
    let email = check_email(&mut errors, &registration.email);
    check_password(&mut errors, &registration.password);
    if registration.password.expose_secret() != registration.password_confirm.expose_secret() {
        errors.add("password_confirm", "Password tidak cocok");
    }

    match email {
        Some(email) if errors.is_empty() => Ok((name.to_owned(), email)),
        _ => Err(errors),
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

fn verify_password(password: &str, password_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(password_hash).map_err(|_| AuthError::PasswordHash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    fn registration(name: &str, email: &str, password: &str, confirm: &str) -> Registration {
        Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: secret(password),
            password_confirm: secret(confirm),
        }
    }

    #[test]
    fn test_validate_login_rules() {
        let errors = validate_login("bukan-email", &secret("123")).unwrap_err();
        assert_eq!(errors.get("email"), Some("Email tidak valid"));
        assert_eq!(errors.get("password"), Some("Password minimal 6 karakter"));

        assert!(validate_login("sari@naturindo.id", &secret("123456")).is_ok());
    }

    #[test]
    fn test_validate_registration_rules() {
        let errors =
            validate_registration(&registration(" S ", "sari@", "12345", "54321")).unwrap_err();
        assert!(errors.has("name"));
        assert!(errors.has("email"));
        assert!(errors.has("password"));
        assert_eq!(errors.get("password_confirm"), Some("Password tidak cocok"));

        let (name, email) = validate_registration(&registration(
            "  Sari Dewi ",
            "sari@naturindo.id",
            "rahasia1",
            "rahasia1",
        ))
        .unwrap();
        assert_eq!(name, "Sari Dewi");
        assert_eq!(email.as_str(), "sari@naturindo.id");
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("rahasia1").unwrap();
        assert!(verify_password("rahasia1", &hash).is_ok());
        assert!(matches!(
            verify_password("salah123", &hash),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            verify_password("rahasia1", "not-a-hash"),
            Err(AuthError::PasswordHash)
        ));
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let accounts = AccountDirectory::new();
        let auth = AuthService::new(&accounts, Duration::ZERO);

        let user = auth
            .register(&registration("Sari", "sari@naturindo.id", "rahasia1", "rahasia1"))
            .await
            .unwrap();
        assert_eq!(user.name, "Sari");
        assert_eq!(accounts.len(), 1);

        let signed_in = auth
            .login("sari@naturindo.id", &secret("rahasia1"))
            .await
            .unwrap();
        assert_eq!(signed_in, user);
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let accounts = AccountDirectory::new();
        let auth = AuthService::new(&accounts, Duration::ZERO);
        let form = registration("Sari", "sari@naturindo.id", "rahasia1", "rahasia1");

        auth.register(&form).await.unwrap();
        assert!(matches!(
            auth.register(&form).await,
            Err(AuthError::UserAlreadyExists)
        ));
        assert_eq!(accounts.len(), 1);
    }

    #[tokio::test]
    async fn test_login_failures() {
        let accounts = AccountDirectory::new();
        let auth = AuthService::new(&accounts, Duration::ZERO);
        auth.register(&registration("Budi", "budi@naturindo.id", "rahasia1", "rahasia1"))
            .await
            .unwrap();

        assert!(matches!(
            auth.login("budi@naturindo.id", &secret("salah123")).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("orang@lain.id", &secret("rahasia1")).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("budi", &secret("rahasia1")).await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_user_ids_are_sequential() {
        let accounts = AccountDirectory::new();
        let auth = AuthService::new(&accounts, Duration::ZERO);
        let a = auth
            .register(&registration("Ani", "ani@naturindo.id", "rahasia1", "rahasia1"))
            .await
            .unwrap();
        let b = auth
            .register(&registration("Bayu", "bayu@naturindo.id", "rahasia1", "rahasia1"))
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
    }
}
