//! Local accounts and the "who is logged in" marker.
//!
//! The registry lives under [`StorageKey::Users`] and the active session under
//! [`StorageKey::CurrentUser`]. The rest of the crate only ever sees the
//! resulting [`UserId`].

pub mod users;

use anyhow::Result;
use tracing::info;

use crate::error::TodoError;
use crate::storage::records::{load_or_default, save_json};
use crate::storage::{Storage, StorageKey, UserId};

pub use users::{NewUser, User, UserRegistry, is_valid_email, is_valid_password};

pub fn load_registry<S: Storage + ?Sized>(store: &S) -> Result<UserRegistry> {
    let users: Vec<User> = load_or_default(store, &StorageKey::Users)?;
    Ok(UserRegistry::with_users(users))
}

pub fn save_registry<S: Storage + ?Sized>(store: &mut S, registry: &UserRegistry) -> Result<()> {
    save_json(store, &StorageKey::Users, &registry.users)
}

/// Register a new account and log it in.
pub fn signup<S: Storage + ?Sized>(store: &mut S, new_user: NewUser) -> Result<UserId> {
    let mut registry = load_registry(store)?;
    let id = registry.register(new_user)?.id();
    save_registry(store, &registry)?;
    store.save(&StorageKey::CurrentUser, id.as_str())?;
    info!(user = %id, "Signed up");
    Ok(id)
}

pub fn login<S: Storage + ?Sized>(store: &mut S, email: &str, password: &str) -> Result<UserId> {
    let registry = load_registry(store)?;
    let id = registry.authenticate(email, password)?.id();
    store.save(&StorageKey::CurrentUser, id.as_str())?;
    info!(user = %id, "Logged in");
    Ok(id)
}

pub fn logout<S: Storage + ?Sized>(store: &mut S) -> Result<()> {
    store.remove(&StorageKey::CurrentUser)?;
    info!("Logged out");
    Ok(())
}

pub fn current_user<S: Storage + ?Sized>(store: &S) -> Result<Option<UserId>> {
    Ok(store
        .load(&StorageKey::CurrentUser)?
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(UserId::new))
}

/// The logged-in user, or [`TodoError::NotLoggedIn`].
pub fn require_user<S: Storage + ?Sized>(store: &S) -> Result<UserId> {
    Ok(current_user(store)?.ok_or(TodoError::NotLoggedIn)?)
}

/// Profile of the logged-in user, if their record still exists.
pub fn current_profile<S: Storage + ?Sized>(store: &S) -> Result<Option<User>> {
    let Some(id) = current_user(store)? else {
        return Ok(None);
    };
    Ok(load_registry(store)?.find(id.as_str()).cloned())
}
