// src/handlers/pages.rs

use axum::{Json, extract::Path, response::IntoResponse};
use serde::Serialize;

use crate::{
    catalog::{self, QuickCheck},
    error::AppError,
    models::{
        page::{Page, PageContent, PageSummary},
        quiz::PublicQuestion,
    },
};

#[derive(Debug, Serialize)]
pub struct PageResponse {
    #[serde(flatten)]
    pub content: &'static PageContent,
    pub quick_checks: Vec<PublicQuestion>,
}

/// Navigation menu, in lesson order.
pub async fn list_pages() -> impl IntoResponse {
    let pages: Vec<PageSummary> = Page::ALL
        .into_iter()
        .map(|page| PageSummary {
            id: page.id(),
            title: catalog::page_content(page).title,
        })
        .collect();

    Json(pages)
}

/// Static content of one page plus the quick checks embedded in it (answers hidden).
pub async fn get_page(Path(page_id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let page = Page::from_id(&page_id)
        .ok_or_else(|| AppError::NotFound(format!("Page '{}' not found", page_id)))?;

    let quick_checks = catalog::quick_checks_on(page)
        .map(|check: &QuickCheck| PublicQuestion::from(&check.question))
        .collect();

    Ok(Json(PageResponse {
        content: catalog::page_content(page),
        quick_checks,
    }))
}
