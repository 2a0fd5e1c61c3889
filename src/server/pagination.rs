use serde::Deserialize;

use crate::db::queries::questions::Window;

use super::error::ApiError;

pub const QUESTIONS_PER_PAGE: i64 = 10;

/// `?page=N`, 1-based, defaults to the first page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(i64);

impl Page {
    pub fn new(number: i64) -> Result<Self, ApiError> {
        if number < 1 {
            return Err(ApiError::Unprocessable(format!(
                "page must be a positive integer, got {number}"
            )));
        }
        Ok(Page(number))
    }

    pub fn number(&self) -> i64 {
        self.0
    }

    /// Rows `[(page - 1) * 10, page * 10)` of the ordered listing.
    pub fn window(&self) -> Window {
        Window {
            limit: QUESTIONS_PER_PAGE,
            offset: (self.0 - 1).saturating_mul(QUESTIONS_PER_PAGE),
        }
    }
}

impl TryFrom<PageQuery> for Page {
    type Error = ApiError;

    fn try_from(query: PageQuery) -> Result<Self, Self::Error> {
        Page::new(query.page.unwrap_or(1))
    }
}
