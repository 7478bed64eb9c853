use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static REQUESTS_CREATED: AtomicU64 = AtomicU64::new(0);
static UPVOTES_APPLIED: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn increment_requests_created() {
    REQUESTS_CREATED.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_upvotes() {
    UPVOTES_APPLIED.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricsResponse {
    pub requests_created_total: u64,
    pub upvotes_applied_total: u64,
    pub errors_total: u64,
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Service counters", body = MetricsResponse)
    )
)]
pub async fn get_metrics() -> HttpResponse {
    HttpResponse::Ok().json(MetricsResponse {
        requests_created_total: REQUESTS_CREATED.load(Ordering::Relaxed),
        upvotes_applied_total: UPVOTES_APPLIED.load(Ordering::Relaxed),
        errors_total: ERROR_COUNT.load(Ordering::Relaxed),
    })
}
