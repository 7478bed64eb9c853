// Open CRUD over the users collection. No auth on purpose: the original
// surface relied entirely on the deployment's network boundary, and the
// handlers perform no schema validation.

use actix_web::{web, HttpResponse, ResponseError};
use mongodb::bson::Document;
use crate::api::metrics;
use crate::database::MongoDB;
use crate::services::activity_service::ActivityNotifier;
use crate::services::user_service;

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "All user records")
    )
)]
pub async fn get_users(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📋 GET /users");

    match user_service::list_users(&db).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => {
            log::error!("❌ Failed to list users: {}", e);
            metrics::increment_error_count();
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User id (identity provider uid)")
    ),
    responses(
        (status = 200, description = "User record"),
        (status = 404, description = "No record for this id")
    )
)]
pub async fn get_user(path: web::Path<String>, db: web::Data<MongoDB>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🔍 GET /users/{}", id);

    match user_service::get_user(&db, &id).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => {
            log::warn!("❌ GET /users/{} failed: {}", id, e);
            metrics::increment_error_count();
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = Object,
    responses(
        (status = 201, description = "Record created verbatim from the body")
    )
)]
pub async fn create_user(
    db: web::Data<MongoDB>,
    notifier: web::Data<ActivityNotifier>,
    body: web::Json<Document>,
) -> HttpResponse {
    log::info!("📝 POST /users");

    match user_service::create_user(&db, &notifier, body.into_inner()).await {
        Ok(id) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "id": id
        })),
        Err(e) => {
            log::error!("❌ POST /users failed: {}", e);
            metrics::increment_error_count();
            e.error_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User id (identity provider uid)")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Fields merged into the record"),
        (status = 404, description = "No record for this id")
    )
)]
pub async fn update_user(
    path: web::Path<String>,
    db: web::Data<MongoDB>,
    body: web::Json<Document>,
) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🔧 PUT /users/{}", id);

    match user_service::update_user(&db, &id, body.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true
        })),
        Err(e) => {
            log::warn!("❌ PUT /users/{} failed: {}", id, e);
            metrics::increment_error_count();
            e.error_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User id (identity provider uid)")
    ),
    responses(
        (status = 200, description = "Record deleted (idempotent)")
    )
)]
pub async fn delete_user(path: web::Path<String>, db: web::Data<MongoDB>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /users/{}", id);

    match user_service::delete_user(&db, &id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true
        })),
        Err(e) => {
            log::error!("❌ DELETE /users/{} failed: {}", id, e);
            metrics::increment_error_count();
            e.error_response()
        }
    }
}
