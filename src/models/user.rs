use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};

/// A user record (stored in MongoDB, `users` collection).
///
/// Keyed by `user_id`, the identity provider's opaque id (unique index).
/// `upvoted_on` holds the request ids this user already voted on: a
/// request id is present if and only if the vote was applied, and the
/// array never shrinks.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub user_id: String, // PRIMARY IDENTIFIER - matches the identity provider uid
    pub email: String,
    #[serde(default)]
    pub upvoted_on: Vec<String>,
    pub created_at: Option<BsonDateTime>,
}

/// Payload of the identity-created / identity-deleted platform hooks.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn upvoted_on_defaults_to_empty() {
        // Records inserted verbatim through the CRUD surface may lack the field.
        let raw = doc! { "user_id": "uid-1", "email": "a@b.com" };
        let user: User = mongodb::bson::from_document(raw).unwrap();
        assert!(user.upvoted_on.is_empty());
    }

    #[test]
    fn round_trips_through_bson() {
        let user = User {
            user_id: "uid-2".to_string(),
            email: "c@d.com".to_string(),
            upvoted_on: vec!["req-1".to_string(), "req-2".to_string()],
            created_at: Some(BsonDateTime::now()),
        };
        let raw = mongodb::bson::to_document(&user).unwrap();
        let back: User = mongodb::bson::from_document(raw).unwrap();
        assert_eq!(back.user_id, "uid-2");
        assert_eq!(back.upvoted_on, vec!["req-1", "req-2"]);
    }
}
