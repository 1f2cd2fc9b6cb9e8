//! Username Value Object
//!
//! ユーザー名は画面表示用の**ハンドル**。ログインには使わない（認証は
//! メール＋パスワードでプロバイダ側が行う）。
//!
//! ## 不変条件
//! - NFKC正規化 + trim 後に空でないこと
//! - 1〜50文字（正規化後）
//! - 制御文字を含まないこと
//!
//! 未指定の場合はメールアドレスのローカル部から導出する。

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::domain::value_object::email::Email;

/// Maximum length for a username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 50;

/// Error returned when username validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// Username is empty after normalization
    Empty,

    /// Username is too long (maximum: USERNAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// Username contains control characters
    InvalidCharacter,
}

impl fmt::Display for UsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter => write!(f, "Username contains invalid characters"),
        }
    }
}

impl std::error::Error for UsernameError {}

/// Validated, normalized username
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new Username from raw input
    ///
    /// Applies normalization (NFKC, trim) and validates.
    pub fn new(input: impl AsRef<str>) -> Result<Self, UsernameError> {
        let normalized: String = input.as_ref().nfkc().collect::<String>().trim().to_string();

        if normalized.is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = normalized.chars().count();
        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                length,
                max: USERNAME_MAX_LENGTH,
            });
        }

        if normalized.chars().any(|c| c.is_control()) {
            return Err(UsernameError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Derive the default username from an email's local part.
    ///
    /// The local part is non-empty whenever the email validated, so this
    /// cannot fail; it is truncated to the maximum length.
    pub fn from_email(email: &Email) -> Self {
        let local: String = email.local_part().chars().take(USERNAME_MAX_LENGTH).collect();
        Self(local)
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Username").field(&self.0).finish()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.0
    }
}
