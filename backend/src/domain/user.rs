//! User aggregate, friendship edges, and the write-side draft.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Status of a directed friendship edge.
///
/// No current code path writes [`FriendshipStatus::Confirmed`]; edges stay
/// unconfirmed until reciprocal confirmation ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipStatus {
    #[default]
    Unconfirmed,
    Confirmed,
}

impl FriendshipStatus {
    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unconfirmed => "unconfirmed",
            Self::Confirmed => "confirmed",
        }
    }
}

impl std::fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown friendship status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFriendshipStatusError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseFriendshipStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown friendship status: {}", self.input)
    }
}

impl std::error::Error for ParseFriendshipStatusError {}

impl std::str::FromStr for FriendshipStatus {
    type Err = ParseFriendshipStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unconfirmed" => Ok(Self::Unconfirmed),
            "confirmed" => Ok(Self::Confirmed),
            _ => Err(ParseFriendshipStatusError { input: s.to_owned() }),
        }
    }
}

/// Directed friendship edge as seen from its owning user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friendship {
    pub friend_id: i64,
    pub status: FriendshipStatus,
}

/// Registered user with outgoing friendship edges merged in.
///
/// ## Invariants
/// - `email` contains an `@`.
/// - `login` is non-blank and whitespace-free.
/// - `friends` never contains the user's own id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
    pub friends: Vec<Friendship>,
}

/// Validation errors raised by [`UserDraft::normalised`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidEmail,
    BlankLogin,
    LoginContainsWhitespace,
    BirthdayInFuture,
}

impl std::fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must contain an @ character"),
            Self::BlankLogin => write!(f, "login must not be blank"),
            Self::LoginContainsWhitespace => write!(f, "login must not contain whitespace"),
            Self::BirthdayInFuture => write!(f, "birthday must not be in the future"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Write-side user payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub email: String,
    pub login: String,
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

/// Validated user payload with the name fallback applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUser {
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
}

impl UserDraft {
    /// Enforce the user invariants and substitute the login for an absent
    /// or blank name (silent normalisation, not an error).
    ///
    /// Validation is fail-fast: the first violated rule aborts.
    pub fn normalised(self) -> Result<ValidatedUser, UserValidationError> {
        if !self.email.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }
        if self.login.trim().is_empty() {
            return Err(UserValidationError::BlankLogin);
        }
        if self.login.chars().any(char::is_whitespace) {
            return Err(UserValidationError::LoginContainsWhitespace);
        }
        if self.birthday > Utc::now().date_naive() {
            return Err(UserValidationError::BirthdayInFuture);
        }

        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.login.clone(),
        };

        Ok(ValidatedUser {
            email: self.email,
            login: self.login,
            name,
            birthday: self.birthday,
        })
    }
}
