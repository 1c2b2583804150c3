use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::GenreId;

/// Longest genre name the list accepts, in characters.
pub const MAX_GENRE_NAME_CHARS: usize = 60;

/// An entry in the reader-managed genre list. Books store the genre as free
/// text, so removing an entry never touches them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGenre {
    pub name: String,
}

impl NewGenre {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.split_whitespace().collect::<Vec<_>>().join(" ");
        self
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("genre name is required");
        }
        if self.name.chars().count() > MAX_GENRE_NAME_CHARS {
            return Err("genre name is too long");
        }
        Ok(())
    }
}
