use actix_web::{web, HttpResponse, ResponseError};
use crate::database::MongoDB;
use crate::middleware::auth::Claims;
use crate::models::{AddRequestBody, FeatureRequestResponse};
use crate::services::activity_service::ActivityNotifier;
use crate::services::{request_service, vote_service};
use crate::api::metrics;

#[utoipa::path(
    post,
    path = "/api/v1/requests",
    tag = "Requests",
    request_body = AddRequestBody,
    responses(
        (status = 201, description = "Request created"),
        (status = 400, description = "Text longer than 30 characters"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_request(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    notifier: web::Data<ActivityNotifier>,
    body: web::Json<AddRequestBody>,
) -> HttpResponse {
    log::info!("📝 POST /requests - user: {}", user.sub);

    match request_service::add_request(&db, &notifier, &body.text).await {
        Ok(id) => {
            metrics::increment_requests_created();
            HttpResponse::Created().json(serde_json::json!({
                "success": true,
                "id": id
            }))
        }
        Err(e) => {
            log::warn!("❌ addRequest failed for user {}: {}", user.sub, e);
            metrics::increment_error_count();
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/requests/{id}/upvote",
    tag = "Requests",
    params(
        ("id" = String, Path, description = "Request id (hex ObjectId)")
    ),
    responses(
        (status = 200, description = "Vote applied"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User record or request not found"),
        (status = 412, description = "Caller already voted on this request")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upvote(
    user: web::ReqData<Claims>,
    path: web::Path<String>,
    db: web::Data<MongoDB>,
) -> HttpResponse {
    let request_id = path.into_inner();
    log::info!("👍 POST /requests/{}/upvote - user: {}", request_id, user.sub);

    match vote_service::upvote(&db, &user.sub, &request_id).await {
        Ok(()) => {
            metrics::increment_upvotes();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true
            }))
        }
        Err(e) => {
            log::warn!("❌ upvote failed for user {}: {}", user.sub, e);
            metrics::increment_error_count();
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/requests",
    tag = "Requests",
    responses(
        (status = 200, description = "All requests, most voted first", body = [FeatureRequestResponse]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_requests(user: web::ReqData<Claims>, db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📋 GET /requests - user: {}", user.sub);

    match request_service::list_requests(&db).await {
        Ok(requests) => {
            let total = requests.len();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "requests": requests,
                "total": total
            }))
        }
        Err(e) => {
            log::error!("❌ Failed to list requests: {}", e);
            metrics::increment_error_count();
            e.error_response()
        }
    }
}
