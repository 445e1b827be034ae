//! Animal routes.
//!
//! Each handler performs at most one service call and ends in exactly one
//! response: a rendered view, a redirect to the list, or the seed JSON.
//! Show and edit render their view even when the record is missing (404);
//! update and delete of a missing record redirect exactly like a success.

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{Redirect, Response};
use axum::{Form, Json};
use log::warn;
use menagerie_core::{Animal, AnimalId};
use uuid::Uuid;

use crate::error::Result;
use crate::form::AnimalForm;
use crate::state::AppState;
use crate::views::{
    render, AnimalListView, AnimalView, EditAnimalView, NewAnimalView, ShowAnimalView,
};

pub const ANIMALS_PATH: &str = "/animals";

/// `GET /animals/seed`
pub async fn seed(State(state): State<AppState>) -> Result<Json<Vec<Animal>>> {
    let created = state.run(|service| service.reseed()).await?;
    Ok(Json(created))
}

/// `GET /animals`
pub async fn index(State(state): State<AppState>) -> Result<Response> {
    let animals = state.run(|service| service.list_animals()).await?;
    let view = AnimalListView {
        animals: animals.iter().map(AnimalView::from).collect(),
    };
    render(&view, StatusCode::OK)
}

/// `GET /animals/new`
pub async fn new_form() -> Result<Response> {
    render(&NewAnimalView, StatusCode::OK)
}

/// `GET /animals/{id}`
pub async fn show(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<Response> {
    let animal = find(&state, &raw_id).await?;
    let view = ShowAnimalView {
        animal: animal.as_ref().map(AnimalView::from),
    };
    render(&view, found_status(animal.is_some()))
}

/// `GET /animals/{id}/edit`
pub async fn edit(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<Response> {
    let animal = find(&state, &raw_id).await?;
    let view = EditAnimalView {
        animal: animal.as_ref().map(AnimalView::from),
    };
    render(&view, found_status(animal.is_some()))
}

/// `POST /animals`
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<AnimalForm>,
) -> Result<Redirect> {
    let fields = form.into_fields()?;
    state.run(move |service| service.create_animal(&fields)).await?;
    Ok(Redirect::to(ANIMALS_PATH))
}

/// `PUT /animals/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<AnimalForm>,
) -> Result<Redirect> {
    let fields = form.into_fields()?;
    match parse_id(&raw_id) {
        Some(id) => {
            state.run(move |service| service.update_animal(id, &fields)).await?;
        }
        None => warn!("event=animal_update module=server status=not_found raw_id={raw_id}"),
    }
    Ok(Redirect::to(ANIMALS_PATH))
}

/// `DELETE /animals/{id}`
pub async fn destroy(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Redirect> {
    match parse_id(&raw_id) {
        Some(id) => {
            state.run(move |service| service.delete_animal(id)).await?;
        }
        None => warn!("event=animal_delete module=server status=not_found raw_id={raw_id}"),
    }
    Ok(Redirect::to(ANIMALS_PATH))
}

/// `PUT` / `PATCH` / `DELETE` on `/animals/seed` and `/animals/new`.
///
/// Those segments can never be a record id, so the write is a not-found and
/// answers like one.
pub async fn reserved_segment(method: Method, uri: Uri) -> Redirect {
    warn!(
        "event=animal_write module=server status=not_found method={method} path={}",
        uri.path()
    );
    Redirect::to(ANIMALS_PATH)
}

async fn find(state: &AppState, raw_id: &str) -> Result<Option<Animal>> {
    let Some(id) = parse_id(raw_id) else {
        return Ok(None);
    };
    state.run(move |service| service.get_animal(id)).await
}

/// Ids that are not UUIDs cannot name a record; they read as not-found.
fn parse_id(raw: &str) -> Option<AnimalId> {
    Uuid::parse_str(raw.trim()).ok().filter(|id| !id.is_nil())
}

fn found_status(found: bool) -> StatusCode {
    if found {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn parse_id_rejects_malformed_and_nil_ids() {
        assert!(parse_id("not-an-id").is_none());
        assert!(parse_id("00000000-0000-0000-0000-000000000000").is_none());
        assert!(parse_id("11111111-2222-4333-8444-555555555555").is_some());
    }
}
