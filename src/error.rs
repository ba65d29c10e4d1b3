/// User-visible rejections. State is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoError {
    #[error("tag '{0}' already exists")]
    TagExists(String),

    #[error("tag name must not be empty")]
    EmptyTag,

    #[error("unknown color '{0}'")]
    UnknownColor(String),

    #[error("an account with email '{0}' already exists")]
    EmailTaken(String),

    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    #[error(
        "password must be at least 6 characters and contain a letter, a digit and one of @$!%*#?&"
    )]
    WeakPassword,

    #[error("name must not be empty")]
    EmptyName,

    #[error("nickname must not be empty")]
    EmptyNickname,

    #[error("email or password is incorrect")]
    InvalidCredentials,

    #[error("not logged in")]
    NotLoggedIn,
}
