use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Request Board API",
        version = "1.0.0",
        description = "Backend for a feature-request voting application. \n\n**Authentication:** the `/api/v1/requests` operations require a JWT Bearer token issued by the identity provider.\n\n**Features:**\n- Submit short feature requests (max 30 characters)\n- Upvote a request, once per user\n- Identity lifecycle webhooks\n- Open user CRUD (deployment boundary enforces access)\n- Health and metrics endpoints",
    ),
    paths(
        // Requests
        crate::api::requests::add_request,
        crate::api::requests::upvote,
        crate::api::requests::get_requests,

        // Users
        crate::api::users::get_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,

        // Hooks
        crate::api::hooks::identity_created,
        crate::api::hooks::identity_deleted,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::AddRequestBody,
            crate::models::FeatureRequestResponse,
            crate::models::Identity,
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Requests", description = "Feature request submission and voting. All endpoints require a Bearer token."),
        (name = "Users", description = "Path-based CRUD over user records. No auth in the handlers; access control is the deployment's network boundary."),
        (name = "Hooks", description = "Identity lifecycle webhooks invoked by the hosting platform."),
        (name = "Health", description = "Health check and service counters."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
