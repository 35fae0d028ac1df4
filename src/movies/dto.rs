use serde::Serialize;
use uuid::Uuid;

use crate::movies::repo::{Director, Genre, Movie};

/// Movie as returned to the client; mixed casing mirrors the legacy schema.
#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<Director>,
    pub actors: Vec<String>,
    #[serde(rename = "ImagePath", skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(rename = "Featured")]
    pub featured: bool,
}

impl From<Movie> for MovieResponse {
    fn from(m: Movie) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            genre: m.genre.map(|j| j.0),
            director: m.director.map(|j| j.0),
            actors: m.actors,
            image_path: m.image_path,
            featured: m.featured,
        }
    }
}
