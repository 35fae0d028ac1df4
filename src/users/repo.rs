use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// User record in the database. `password_hash` is the Argon2 digest, never
/// the submitted plaintext.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub birthday: Option<Date>,
    pub favorite_movies: Vec<Uuid>,
    pub created_at: OffsetDateTime,
}

impl User {
    /// First match by username; uniqueness is not enforced by the schema.
    pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, email, birthday, favorite_movies, created_at
            FROM users
            WHERE username = $1
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert a new user with an already-hashed password.
    pub async fn create(
        db: &PgPool,
        username: &str,
        password_hash: &str,
        email: &str,
        birthday: Option<Date>,
        favorite_movies: &[Uuid],
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, email, birthday, favorite_movies)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, password_hash, email, birthday, favorite_movies, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .bind(birthday)
        .bind(favorite_movies)
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}
