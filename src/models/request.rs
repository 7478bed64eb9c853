use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// A feature request (stored in MongoDB, `requests` collection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Request text, at most 30 characters (validated at creation)
    pub text: String,

    /// Vote counter, starts at 0 and only ever goes up via `$inc`
    pub upvotes: i64,

    pub created_at: Option<BsonDateTime>,
}

/// Request body for creating a feature request
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AddRequestBody {
    pub text: String,
}

/// Feature request as returned by the API
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FeatureRequestResponse {
    pub id: String,
    pub text: String,
    pub upvotes: i64,
}

impl From<FeatureRequest> for FeatureRequestResponse {
    fn from(request: FeatureRequest) -> Self {
        FeatureRequestResponse {
            id: request.id.map(|id| id.to_hex()).unwrap_or_default(),
            text: request.text,
            upvotes: request.upvotes,
        }
    }
}
