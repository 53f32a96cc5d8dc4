//! HTTP route handlers.

pub mod accounts;
pub mod entities;
pub mod orders;
pub mod system;
pub mod versioned_entities;

use common::EntityId;
use serde::{Deserialize, Serialize};
use store::{Page, PageRequest};

use crate::config::Config;
use crate::error::ApiError;

/// `?page=&size=` query parameters for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl PageParams {
    pub fn to_request(&self, config: &Config) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(0), config.page_size(self.size))
    }
}

/// JSON shape of one page of results.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub last: bool,
}

impl<T> PageResponse<T> {
    pub fn from_page<E>(page: Page<E>, f: impl FnMut(E) -> T) -> Self {
        let total_pages = page.total_pages();
        let last = page.is_last();
        let page = page.map(f);
        Self {
            content: page.content,
            page: page.number,
            size: page.size,
            total_elements: page.total_elements,
            total_pages,
            last,
        }
    }
}

pub(crate) fn parse_entity_id(id: &str) -> Result<EntityId, ApiError> {
    id.parse::<i64>()
        .map(EntityId::new)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))
}
