use crate::{
    database::MongoDB,
    models::{ActivityEvent, FeatureRequest, FeatureRequestResponse},
    services::activity_service::ActivityNotifier,
    utils::AppError,
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, DateTime as BsonDateTime};

/// Maximum request text length, counted in Unicode scalar values
/// (`str::chars()`), not bytes, so multi-byte text is not penalized.
pub const MAX_TEXT_CHARS: usize = 30;

pub fn validate_text(text: &str) -> Result<(), AppError> {
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(AppError::InvalidArgument(
            "request must be no more than 30 characters long".to_string(),
        ));
    }
    Ok(())
}

/// Creates a new feature request with a zeroed counter and returns its id
pub async fn add_request(
    db: &MongoDB,
    notifier: &ActivityNotifier,
    text: &str,
) -> Result<String, AppError> {
    validate_text(text)?;

    let requests = db.collection::<FeatureRequest>("requests");

    let new_request = FeatureRequest {
        id: None,
        text: text.to_string(),
        upvotes: 0,
        created_at: Some(BsonDateTime::now()),
    };

    let result = requests.insert_one(new_request).await?;

    let id = result
        .inserted_id
        .as_object_id()
        .map(|id| id.to_hex())
        .unwrap_or_default();

    log::info!("📝 Request {} created", id);

    notifier.notify(ActivityEvent::RequestAdded);

    Ok(id)
}

/// Lists all requests, most voted first
pub async fn list_requests(db: &MongoDB) -> Result<Vec<FeatureRequestResponse>, AppError> {
    let requests = db.collection::<FeatureRequest>("requests");

    let mut cursor = requests.find(doc! {}).sort(doc! { "upvotes": -1 }).await?;

    let mut result = Vec::new();
    while let Some(request) = cursor.next().await {
        match request {
            Ok(request) => result.push(FeatureRequestResponse::from(request)),
            Err(e) => log::error!("❌ Failed to read request document: {}", e),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_text_at_the_limit() {
        let text = "a".repeat(30);
        assert!(validate_text(&text).is_ok());
    }

    #[test]
    fn rejects_text_over_the_limit() {
        let text = "a".repeat(31);
        match validate_text(&text) {
            Err(AppError::InvalidArgument(_)) => {}
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 30 scalar values, far more than 30 bytes
        let text = "é".repeat(30);
        assert!(text.len() > 30);
        assert!(validate_text(&text).is_ok());
    }

    #[test]
    fn empty_text_is_allowed() {
        assert!(validate_text("").is_ok());
    }
}
