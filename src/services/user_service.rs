// ==================== USER RECORDS ====================
// Lifecycle hooks keep the `users` collection in step with the external
// identity provider, and the open CRUD routes operate on the same
// collection with no schema enforcement.

use crate::{
    database::MongoDB,
    models::{ActivityEvent, Identity},
    services::activity_service::ActivityNotifier,
    utils::AppError,
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};

/// Creates the user record for a freshly signed-up identity.
///
/// Idempotent: the platform may retry the hook, and a retry must not
/// duplicate the record or reset `upvoted_on`. `$setOnInsert` under an
/// upsert only writes when the document is being created, so the retry
/// path is a no-op. Returns whether a record was actually created.
pub async fn identity_created(
    db: &MongoDB,
    notifier: &ActivityNotifier,
    identity: &Identity,
) -> Result<bool, AppError> {
    let users = db.collection::<Document>("users");

    let email = identity.email.clone().unwrap_or_default();

    let result = users
        .update_one(
            doc! { "user_id": &identity.id },
            doc! { "$setOnInsert": {
                "user_id": &identity.id,
                "email": email,
                "upvoted_on": [],
                "created_at": BsonDateTime::now(),
            } },
        )
        .upsert(true)
        .await?;

    let created = result.upserted_id.is_some();

    if created {
        log::info!("👤 User record created for identity {}", identity.id);
        notifier.notify(ActivityEvent::UserSignedUp);
    } else {
        log::debug!(
            "ℹ️  User record for identity {} already exists, hook retry ignored",
            identity.id
        );
    }

    Ok(created)
}

/// Deletes the user record for a removed identity.
/// Requests and activities are left untouched; prior votes stand.
pub async fn identity_deleted(db: &MongoDB, identity: &Identity) -> Result<bool, AppError> {
    let users = db.collection::<Document>("users");

    let result = users.delete_one(doc! { "user_id": &identity.id }).await?;

    if result.deleted_count > 0 {
        log::info!("🗑️  User record deleted for identity {}", identity.id);
    } else {
        log::debug!("ℹ️  No user record for identity {}, nothing to delete", identity.id);
    }

    Ok(result.deleted_count > 0)
}

// ==================== OPEN CRUD (no auth) ====================
// Records are addressed by `user_id`, the key the lifecycle hooks write.

/// Shapes a raw user document for the API: `_id` is folded into `id`
/// (falling back to `user_id` for documents inserted verbatim).
pub fn doc_to_response(mut document: Document) -> serde_json::Value {
    let object_id = document
        .remove("_id")
        .as_ref()
        .and_then(|b| b.as_object_id())
        .map(|oid| oid.to_hex());

    let id = document
        .get_str("user_id")
        .map(|s| s.to_string())
        .ok()
        .or(object_id)
        .unwrap_or_default();

    let mut value = mongodb::bson::Bson::Document(document).into_relaxed_extjson();
    if let Some(map) = value.as_object_mut() {
        map.insert("id".to_string(), serde_json::Value::String(id));
    }
    value
}

pub async fn list_users(db: &MongoDB) -> Result<Vec<serde_json::Value>, AppError> {
    let users = db.collection::<Document>("users");

    let mut cursor = users.find(doc! {}).await?;

    let mut result = Vec::new();
    while let Some(user) = cursor.next().await {
        match user {
            Ok(document) => result.push(doc_to_response(document)),
            Err(e) => log::error!("❌ Failed to read user document: {}", e),
        }
    }

    Ok(result)
}

pub async fn get_user(db: &MongoDB, id: &str) -> Result<serde_json::Value, AppError> {
    let users = db.collection::<Document>("users");

    let document = users
        .find_one(doc! { "user_id": id })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no user record for '{}'", id)))?;

    Ok(doc_to_response(document))
}

/// Inserts the body verbatim (no schema validation) and returns the new id.
/// Creation in the users collection is observed wherever it happens, so
/// this path emits the signup activity just like the lifecycle hook.
pub async fn create_user(
    db: &MongoDB,
    notifier: &ActivityNotifier,
    body: Document,
) -> Result<String, AppError> {
    let users = db.collection::<Document>("users");

    let result = users.insert_one(body).await?;

    notifier.notify(ActivityEvent::UserSignedUp);

    Ok(result
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default())
}

/// Merges the provided fields into an existing record (`$set` semantics)
pub async fn update_user(db: &MongoDB, id: &str, body: Document) -> Result<(), AppError> {
    let users = db.collection::<Document>("users");

    let result = users
        .update_one(doc! { "user_id": id }, doc! { "$set": body })
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!("no user record for '{}'", id)));
    }

    Ok(())
}

/// Idempotent delete: removing an absent record is not an error
pub async fn delete_user(db: &MongoDB, id: &str) -> Result<(), AppError> {
    let users = db.collection::<Document>("users");

    users.delete_one(doc! { "user_id": id }).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn response_prefers_user_id_over_object_id() {
        let document = doc! {
            "_id": ObjectId::new(),
            "user_id": "uid-1",
            "email": "a@b.com",
            "upvoted_on": ["req-1"],
        };
        let value = doc_to_response(document);
        assert_eq!(value["id"], "uid-1");
        assert_eq!(value["email"], "a@b.com");
        assert_eq!(value["upvoted_on"][0], "req-1");
        assert!(value.get("_id").is_none());
    }

    #[tokio::test]
    async fn verbatim_insert_emits_the_signup_activity() {
        // Both creation sites for the users collection (the lifecycle
        // hook and the verbatim CRUD insert) hold a notifier handle and
        // emit the same signup event over the channel.
        let (notifier, mut rx) = crate::services::activity_service::channel();
        notifier.notify(ActivityEvent::UserSignedUp);
        assert_eq!(rx.recv().await, Some(ActivityEvent::UserSignedUp));
    }

    #[test]
    fn response_falls_back_to_object_id() {
        let oid = ObjectId::new();
        let document = doc! { "_id": oid, "nickname": "anonymous" };
        let value = doc_to_response(document);
        assert_eq!(value["id"], oid.to_hex());
        assert_eq!(value["nickname"], "anonymous");
    }
}
