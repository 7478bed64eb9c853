// Platform webhooks for identity lifecycle events. These are invoked by
// the hosting platform, not by end users; completion only signals
// "processing done". Conditions the platform cannot remediate (a retry
// of an already-applied hook) are success, not errors.

use actix_web::{web, HttpResponse, ResponseError};
use crate::api::metrics;
use crate::database::MongoDB;
use crate::models::Identity;
use crate::services::activity_service::ActivityNotifier;
use crate::services::user_service;

#[utoipa::path(
    post,
    path = "/api/v1/hooks/identity-created",
    tag = "Hooks",
    request_body = Identity,
    responses(
        (status = 200, description = "User record created (or already present)")
    )
)]
pub async fn identity_created(
    db: web::Data<MongoDB>,
    notifier: web::Data<ActivityNotifier>,
    body: web::Json<Identity>,
) -> HttpResponse {
    log::info!("🔔 POST /hooks/identity-created - identity: {}", body.id);

    match user_service::identity_created(&db, &notifier, &body).await {
        Ok(created) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "created": created
        })),
        Err(e) => {
            log::error!("❌ identity-created hook failed for {}: {}", body.id, e);
            metrics::increment_error_count();
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/hooks/identity-deleted",
    tag = "Hooks",
    request_body = Identity,
    responses(
        (status = 200, description = "User record deleted (or already absent)")
    )
)]
pub async fn identity_deleted(db: web::Data<MongoDB>, body: web::Json<Identity>) -> HttpResponse {
    log::info!("🔔 POST /hooks/identity-deleted - identity: {}", body.id);

    match user_service::identity_deleted(&db, &body).await {
        Ok(deleted) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "deleted": deleted
        })),
        Err(e) => {
            log::error!("❌ identity-deleted hook failed for {}: {}", body.id, e);
            metrics::increment_error_count();
            e.error_response()
        }
    }
}
