//! Authentication operations
//!
//! Registration and device-locked login against an injected account store.

use log::{debug, info};

use crate::auth::requests::{LoginRequest, RegisterRequest};
use crate::auth::results::UserSummary;
use crate::auth::validator::{normalize_email, required, validate_new_account};
use crate::error::{AuthError, StoreError, UniqueField};
use crate::storage::{AccountStore, NewAccount};

const REGISTER_FIELDS_REQUIRED: &str = "All fields including deviceId are required";
const LOGIN_FIELDS_REQUIRED: &str = "Email, password, and deviceId are required";
const USER_EXISTS: &str = "User already exists";
const DEVICE_TAKEN: &str = "Device already registered to another account";

/// Registers a new account bound to the supplied device.
///
/// The email pre-check is a fast path only; the store's uniqueness
/// constraints decide concurrent registrations.
pub fn process_register(
    store: &dyn AccountStore,
    request: RegisterRequest,
) -> Result<UserSummary, AuthError> {
    let (Some(username), Some(email), Some(password), Some(device_id)) = (
        required(request.username),
        required(request.email),
        required(request.password),
        required(request.device_id),
    ) else {
        return Err(AuthError::MissingFields(REGISTER_FIELDS_REQUIRED));
    };

    let account = NewAccount {
        username: username.trim().to_string(),
        email: normalize_email(&email),
        password,
        device_id,
    };

    debug!(
        "Register payload: username={}, email={}, deviceId={}",
        account.username, account.email, account.device_id
    );

    validate_new_account(&account).map_err(AuthError::Validation)?;

    if store
        .find_by_email(&account.email)
        .map_err(AuthError::Store)?
        .is_some()
    {
        return Err(AuthError::Conflict(USER_EXISTS));
    }

    let created = store.insert(account).map_err(|e| match e {
        StoreError::DuplicateKey(UniqueField::Email) => AuthError::Conflict(USER_EXISTS),
        StoreError::DuplicateKey(UniqueField::DeviceId) => AuthError::Conflict(DEVICE_TAKEN),
        other => AuthError::Store(other),
    })?;

    info!("Registered {} on device {}", created.email, created.device_id);
    Ok(created.into())
}

/// Authenticates an account and enforces its device lock.
///
/// Unknown email and wrong password are indistinguishable to the caller.
/// A device mismatch is only reported once the credentials are correct.
pub fn process_login(
    store: &dyn AccountStore,
    request: LoginRequest,
) -> Result<UserSummary, AuthError> {
    let (Some(email), Some(password), Some(device_id)) = (
        required(request.email),
        required(request.password),
        required(request.device_id),
    ) else {
        return Err(AuthError::MissingFields(LOGIN_FIELDS_REQUIRED));
    };

    let account = store
        .find_by_email(&normalize_email(&email))
        .map_err(AuthError::Store)?
        .filter(|account| account.password == password)
        .ok_or(AuthError::Unauthorized)?;

    if account.device_id != device_id {
        return Err(AuthError::Forbidden);
    }

    info!("Login for {} from its registered device", account.email);
    Ok(account.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteAccountStore;

    fn register_body(username: &str, email: &str, password: &str, device: &str) -> RegisterRequest {
        RegisterRequest {
            username: Some(username.into()),
            email: Some(email.into()),
            password: Some(password.into()),
            device_id: Some(device.into()),
        }
    }

    fn login_body(email: &str, password: &str, device: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.into()),
            password: Some(password.into()),
            device_id: Some(device.into()),
        }
    }

    fn store_with_alice() -> SqliteAccountStore {
        let store = SqliteAccountStore::open_in_memory().unwrap();
        process_register(&store, register_body("alice", "a@x.com", "secret1", "dev-A")).unwrap();
        store
    }

    #[test]
    fn register_returns_public_summary() {
        let store = SqliteAccountStore::open_in_memory().unwrap();
        let user =
            process_register(&store, register_body("  alice ", " A@X.com", "secret1", "dev-A"))
                .unwrap();
        assert_eq!(
            user,
            UserSummary {
                username: "alice".into(),
                email: "a@x.com".into(),
            }
        );
    }

    #[test]
    fn register_requires_every_field() {
        let store = SqliteAccountStore::open_in_memory().unwrap();
        let mut body = register_body("alice", "a@x.com", "secret1", "dev-A");
        body.device_id = Some(String::new());

        let err = process_register(&store, body).unwrap_err();
        assert!(matches!(err, AuthError::MissingFields(REGISTER_FIELDS_REQUIRED)));
    }

    #[test]
    fn register_validates_before_touching_the_store() {
        let store = SqliteAccountStore::open_in_memory().unwrap();
        let err = process_register(&store, register_body("al", "a@x.com", "secret1", "dev-A"))
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(ref errors) if errors.len() == 1));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn register_same_email_twice_conflicts() {
        let store = store_with_alice();
        let err = process_register(&store, register_body("alice2", "A@x.com", "secret2", "dev-B"))
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict(USER_EXISTS)));
    }

    #[test]
    fn register_same_device_twice_conflicts() {
        let store = store_with_alice();
        let err = process_register(&store, register_body("bob", "b@x.com", "secret2", "dev-A"))
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict(DEVICE_TAKEN)));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn login_succeeds_on_registered_device() {
        let store = store_with_alice();
        let user = process_login(&store, login_body("a@x.com", "secret1", "dev-A")).unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn login_normalizes_email() {
        let store = store_with_alice();
        assert!(process_login(&store, login_body(" A@X.COM ", "secret1", "dev-A")).is_ok());
    }

    #[test]
    fn login_on_other_device_is_forbidden() {
        let store = store_with_alice();
        let err = process_login(&store, login_body("a@x.com", "secret1", "dev-B")).unwrap_err();
        assert!(matches!(err, AuthError::Forbidden));
    }

    #[test]
    fn wrong_password_and_unknown_email_look_the_same() {
        let store = store_with_alice();
        let wrong_password =
            process_login(&store, login_body("a@x.com", "wrong!", "dev-A")).unwrap_err();
        let unknown_email =
            process_login(&store, login_body("z@x.com", "secret1", "dev-A")).unwrap_err();
        assert!(matches!(wrong_password, AuthError::Unauthorized));
        assert!(matches!(unknown_email, AuthError::Unauthorized));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[test]
    fn wrong_password_on_wrong_device_is_unauthorized_not_forbidden() {
        let store = store_with_alice();
        let err = process_login(&store, login_body("a@x.com", "wrong!", "dev-B")).unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[test]
    fn password_comparison_is_exact() {
        let store = store_with_alice();
        let err = process_login(&store, login_body("a@x.com", "secret1 ", "dev-A")).unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[test]
    fn login_requires_every_field() {
        let store = store_with_alice();
        let err = process_login(
            &store,
            LoginRequest {
                email: Some("a@x.com".into()),
                password: Some("secret1".into()),
                device_id: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, AuthError::MissingFields(LOGIN_FIELDS_REQUIRED)));
    }
}
