//! `GET /` variants.

use axum::http::StatusCode;
use axum::response::Response;

use crate::error::Result;
use crate::views::{render, HomeView};

pub const BANNER: &str = "Menagerie is up and running";

pub async fn template() -> Result<Response> {
    render(&HomeView, StatusCode::OK)
}

pub async fn banner() -> &'static str {
    BANNER
}
