//! Route table.

pub mod animals;
pub mod home;

use axum::routing::get;
use axum::Router;

use crate::config::HomePage;
use crate::state::AppState;

/// Builds the route table.
///
/// Static segments (`seed`, `new`) win over `{id}`; writes to them redirect
/// the same way a write to an unknown id does.
pub fn router(home_page: HomePage) -> Router<AppState> {
    let home_route = match home_page {
        HomePage::Template => get(home::template),
        HomePage::Banner => get(home::banner),
    };

    Router::new()
        .route("/", home_route)
        .route("/animals", get(animals::index).post(animals::create))
        .route(
            "/animals/seed",
            get(animals::seed)
                .put(animals::reserved_segment)
                .patch(animals::reserved_segment)
                .delete(animals::reserved_segment),
        )
        .route(
            "/animals/new",
            get(animals::new_form)
                .put(animals::reserved_segment)
                .patch(animals::reserved_segment)
                .delete(animals::reserved_segment),
        )
        .route(
            "/animals/{id}",
            get(animals::show)
                .put(animals::update)
                .patch(animals::update)
                .delete(animals::destroy),
        )
        .route("/animals/{id}/edit", get(animals::edit))
}
