//! Server-rendered views.
//!
//! Templates live in `templates/` and only see display-ready strings; all
//! formatting of optional record fields happens in [`AnimalView`].

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use menagerie_core::Animal;

use crate::error::Result;

/// Display projection of one animal record.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimalView {
    pub id: String,
    pub species: String,
    pub extinct: String,
    pub location: String,
    pub life_expectancy: String,
    /// Raw input values for the edit form.
    pub species_input: String,
    pub location_input: String,
    pub life_expectancy_input: String,
    pub extinct_yes: bool,
    pub extinct_no: bool,
}

impl From<&Animal> for AnimalView {
    fn from(animal: &Animal) -> Self {
        let life_expectancy_input = animal
            .life_expectancy
            .map(format_number)
            .unwrap_or_default();

        Self {
            id: animal.id.to_string(),
            species: animal
                .species
                .clone()
                .unwrap_or_else(|| "Unknown species".to_string()),
            extinct: match animal.extinct {
                Some(true) => "Yes",
                Some(false) => "No",
                None => "Unknown",
            }
            .to_string(),
            location: animal
                .location
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            life_expectancy: animal
                .life_expectancy
                .map(|years| format!("{} years", format_number(years)))
                .unwrap_or_else(|| "Unknown".to_string()),
            species_input: animal.species.clone().unwrap_or_default(),
            location_input: animal.location.clone().unwrap_or_default(),
            life_expectancy_input,
            extinct_yes: animal.extinct == Some(true),
            extinct_no: animal.extinct == Some(false),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomeView;

#[derive(Template)]
#[template(path = "animals/index.html")]
pub struct AnimalListView {
    pub animals: Vec<AnimalView>,
}

#[derive(Template)]
#[template(path = "animals/new.html")]
pub struct NewAnimalView;

#[derive(Template)]
#[template(path = "animals/show.html")]
pub struct ShowAnimalView {
    pub animal: Option<AnimalView>,
}

#[derive(Template)]
#[template(path = "animals/edit.html")]
pub struct EditAnimalView {
    pub animal: Option<AnimalView>,
}

/// Renders `view` as an HTML response with `status`.
pub fn render<T: Template>(view: &T, status: StatusCode) -> Result<Response> {
    let html = view.render()?;
    Ok((status, Html(html)).into_response())
}
