use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

impl SearchQuery {
    pub fn term(&self) -> AppResult<&str> {
        let term = self.q.trim();
        if term.is_empty() {
            return Err(AppError::Validation("Missing query parameter".into()));
        }
        Ok(term)
    }
}

/// Raw query strings so bad numbers surface as our own 400, not axum's.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl Pagination {
    pub fn page(&self) -> AppResult<usize> {
        match self.page.as_deref() {
            None | Some("") => Ok(1),
            Some(raw) => match raw.parse::<usize>() {
                Ok(p) if p >= 1 => Ok(p),
                _ => Err(AppError::Validation("Invalid page parameter".into())),
            },
        }
    }

    pub fn page_size(&self) -> AppResult<usize> {
        match self.page_size.as_deref() {
            None | Some("") => Ok(DEFAULT_PAGE_SIZE),
            Some(raw) => match raw.parse::<usize>() {
                Ok(s) if (1..=MAX_PAGE_SIZE).contains(&s) => Ok(s),
                _ => Err(AppError::Validation("Invalid pageSize parameter".into())),
            },
        }
    }
}
