use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TodoError;
use crate::storage::UserId;

const PASSWORD_SYMBOLS: &str = "@$!%*#?&";
const MIN_PASSWORD_LEN: usize = 6;

/// A locally registered account. Credentials are stored as given; this is
/// a convenience login, not a security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nickname: String,
    /// Image data URL; empty when the user has none.
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn id(&self) -> UserId {
        UserId::new(self.email.clone())
    }

    pub fn thumbnail(&self) -> Option<&str> {
        Some(self.thumbnail.as_str()).filter(|t| !t.is_empty())
    }

    /// Nickname if set, otherwise the name, otherwise the email.
    pub fn display_name(&self) -> &str {
        [&self.nickname, &self.name]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or(&self.email)
    }
}

/// Signup form contents.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub nickname: String,
    pub thumbnail: Option<String>,
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// At least six characters drawn from letters, digits and `@$!%*#?&`, with
/// at least one of each kind.
pub fn is_valid_password(password: &str) -> bool {
    let is_symbol = |c: char| PASSWORD_SYMBOLS.contains(c);
    password.chars().count() >= MIN_PASSWORD_LEN
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || is_symbol(c))
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(is_symbol)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRegistry {
    pub users: Vec<User>,
}

impl UserRegistry {
    pub fn with_users(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn find(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn register(&mut self, new_user: NewUser) -> Result<&User, TodoError> {
        let email = new_user.email.trim().to_string();
        if !is_valid_email(&email) {
            return Err(TodoError::InvalidEmail(email));
        }
        if self.find(&email).is_some() {
            return Err(TodoError::EmailTaken(email));
        }
        if new_user.name.trim().is_empty() {
            return Err(TodoError::EmptyName);
        }
        if new_user.nickname.trim().is_empty() {
            return Err(TodoError::EmptyNickname);
        }
        if !is_valid_password(&new_user.password) {
            return Err(TodoError::WeakPassword);
        }

        self.users.push(User {
            email,
            password: new_user.password,
            name: new_user.name.trim().to_string(),
            nickname: new_user.nickname.trim().to_string(),
            thumbnail: new_user.thumbnail.unwrap_or_default(),
            created_at: Some(Utc::now()),
        });
        Ok(&self.users[self.users.len() - 1])
    }

    pub fn authenticate(&self, email: &str, password: &str) -> Result<&User, TodoError> {
        self.users
            .iter()
            .find(|u| u.email == email.trim() && u.password == password)
            .ok_or(TodoError::InvalidCredentials)
    }
}
