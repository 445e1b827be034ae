//! HTTP surface for Menagerie: routes, views and request middleware on top
//! of `menagerie_core`.

pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod views;

pub use app::build_app;
pub use config::{HomePage, ServerConfig};
pub use error::{Result, ServerError};
pub use state::AppState;
