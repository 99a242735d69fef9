//! Film aggregate and its write-side draft.
//!
//! A [`Film`] is always assembled with its MPA rating, genre set, and like
//! set attached; the persistence adapter merges the association tables
//! before a film crosses back into the domain. Write operations go through
//! [`FilmDraft`], which carries the raw payload and normalises it during
//! validation.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// First public film screening; no release date may precede it.
pub const EARLIEST_RELEASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1895, 12, 28) {
    Some(date) => date,
    None => panic!("1895-12-28 is a valid calendar date"),
};

/// Maximum length of a film description, in characters.
pub const DESCRIPTION_MAX: usize = 200;

/// MPA content rating, reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MpaRating {
    pub id: i32,
    pub name: String,
}

/// Named category tag for a film, reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Catalogued film with its associations merged in.
///
/// ## Invariants
/// - `genres` is sorted by id and free of duplicates.
/// - `likes` holds at most one entry per user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa: MpaRating,
    pub genres: Vec<Genre>,
    pub likes: BTreeSet<i64>,
}

impl Film {
    /// Number of distinct users who liked this film.
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}

/// Validation errors raised by [`FilmDraft::validated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilmValidationError {
    BlankName,
    DescriptionTooLong { max: usize },
    NonPositiveDuration,
    ReleaseDateTooEarly { floor: NaiveDate },
}

impl std::fmt::Display for FilmValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "film name must not be blank"),
            Self::DescriptionTooLong { max } => {
                write!(f, "film description must be at most {max} characters")
            }
            Self::NonPositiveDuration => write!(f, "film duration must be positive"),
            Self::ReleaseDateTooEarly { floor } => {
                write!(f, "film release date must not be before {floor}")
            }
        }
    }
}

impl std::error::Error for FilmValidationError {}

/// Write-side film payload, prior to reference checks.
///
/// Genre existence and MPA existence are store lookups and therefore checked
/// by the film service, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmDraft {
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa_id: i32,
    pub genre_ids: Vec<i32>,
}

impl FilmDraft {
    /// Enforce the scalar invariants and normalise the genre set.
    ///
    /// The genre id list is deduplicated and sorted ascending, so the
    /// association rows written for this draft are unique and ordered.
    /// Validation is fail-fast: the first violated rule aborts.
    pub fn validated(mut self) -> Result<Self, FilmValidationError> {
        if self.name.trim().is_empty() {
            return Err(FilmValidationError::BlankName);
        }
        if let Some(description) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX {
                return Err(FilmValidationError::DescriptionTooLong {
                    max: DESCRIPTION_MAX,
                });
            }
        }
        if self.duration <= 0 {
            return Err(FilmValidationError::NonPositiveDuration);
        }
        if self.release_date < EARLIEST_RELEASE_DATE {
            return Err(FilmValidationError::ReleaseDateTooEarly {
                floor: EARLIEST_RELEASE_DATE,
            });
        }

        self.genre_ids.sort_unstable();
        self.genre_ids.dedup();
        Ok(self)
    }
}
