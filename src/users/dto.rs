use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::users::repo::User;

/// Request body for registration. PascalCase field names mirror the legacy
/// API; required fields are Options so presence checks happen in the handler
/// with field-level detail instead of a bare deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(rename = "Username")]
    pub username: Option<String>,
    #[serde(rename = "Password")]
    pub password: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "Birthday")]
    pub birthday: Option<Date>,
    #[serde(rename = "FavoriteMovies", default)]
    pub favorite_movies: Vec<Uuid>,
}

/// Stored user as returned to the client. `Password` carries the digest, per
/// the legacy contract.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<Date>,
    #[serde(rename = "FavoriteMovies")]
    pub favorite_movies: Vec<Uuid>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            password: u.password_hash,
            email: u.email,
            birthday: u.birthday,
            favorite_movies: u.favorite_movies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn response_uses_legacy_field_names() {
        let json = serde_json::to_value(UserResponse {
            id: Uuid::new_v4(),
            username: "ana".into(),
            password: "$argon2id$v=19$...".into(),
            email: "a@x.com".into(),
            birthday: Some(date!(1990 - 01 - 15)),
            favorite_movies: vec![],
        })
        .unwrap();

        assert_eq!(json["Username"], "ana");
        assert_eq!(json["Email"], "a@x.com");
        assert!(json["Password"].as_str().unwrap().starts_with("$argon2id$"));
        assert_eq!(json["Birthday"], "1990-01-15");
        assert!(json["FavoriteMovies"].as_array().unwrap().is_empty());
    }

    #[test]
    fn request_accepts_minimal_payload() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"Username":"ana","Password":"secret1","Email":"a@x.com"}"#,
        )
        .unwrap();
        assert_eq!(req.username.as_deref(), Some("ana"));
        assert!(req.birthday.is_none());
        assert!(req.favorite_movies.is_empty());
    }
}
