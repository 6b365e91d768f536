//! Catalogue payload types.

use serde::{Deserialize, Serialize};

/// Poster prefix used by [`Movie::poster_url`].
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w154";

/// One page of discover results.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Results {
    pub page: u32,
    pub total_results: u32,
    pub total_pages: u32,
    pub results: Vec<Movie>,
}

impl Results {
    /// Placeholder batch before the first page arrives.
    pub fn empty() -> Self {
        Self::default()
    }

    /// More pages exist after this one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub overview: String,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Local flag, never part of the payload.
    #[serde(skip)]
    pub is_favourite: bool,
}

impl Movie {
    pub fn poster_url(&self) -> Option<String> {
        self.poster_url_with(POSTER_BASE_URL)
    }

    pub fn poster_url_with(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{}{}", image_base_url.trim_end_matches('/'), path))
    }
}
