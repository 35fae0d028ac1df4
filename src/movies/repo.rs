use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

/// Genre sub-document, stored as JSONB. Nested keys keep the legacy casing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

/// Director sub-document, stored as JSONB.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Director {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Bio")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre: Option<Json<Genre>>,
    pub director: Option<Json<Director>>,
    pub actors: Vec<String>,
    pub image_path: Option<String>,
    pub featured: bool,
}

/// All movie records; order is storage-defined, an empty table yields an
/// empty vec rather than an error.
pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Movie>> {
    let rows = sqlx::query_as::<_, Movie>(
        r#"
        SELECT id, title, description, genre, director, actors, image_path, featured
        FROM movies
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}
