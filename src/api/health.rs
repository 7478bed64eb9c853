use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::services::activity_service::ActivityNotifier;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// "running" while the background logger drains the channel
    pub activity_logger: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(notifier: web::Data<ActivityNotifier>) -> HttpResponse {
    let logger_running = notifier.is_running();

    // A dead logger degrades the service (activities stop being
    // recorded) but does not take the write paths down with it.
    let status = if logger_running { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        service: "request-board-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        activity_logger: if logger_running { "running" } else { "stopped" }.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::activity_service;

    #[tokio::test]
    async fn reports_degraded_when_the_logger_is_gone() {
        let (notifier, rx) = activity_service::channel();
        drop(rx);

        let res = health_check(web::Data::new(notifier)).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::OK);

        let body = actix_web::body::to_bytes(res.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "degraded");
        assert_eq!(value["activity_logger"], "stopped");
    }

    #[tokio::test]
    async fn reports_healthy_while_the_logger_runs() {
        let (notifier, _rx) = activity_service::channel();

        let res = health_check(web::Data::new(notifier)).await;
        let body = actix_web::body::to_bytes(res.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["service"], "request-board-service");
    }
}
