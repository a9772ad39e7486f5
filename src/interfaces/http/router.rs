//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{ScheduleService, TimeOffService, UserService};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::{
    ScheduleRepository, TimeOffRepository, UserRepository,
};
use crate::interfaces::http::common::MessageResponse;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{auth, schedule, time_off};

/// Unified router state. Axum extracts each handler's own state via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub users: auth::SharedUserService,
    pub schedules: schedule::SharedScheduleService,
    pub time_off: time_off::SharedTimeOffService,
    pub health: HealthState,
    pub metrics: MetricsState,
}

impl AppState {
    /// Wires repositories and services over one connection pool.
    pub fn new(
        db: DatabaseConnection,
        jwt_config: JwtConfig,
        password_cost: u32,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        let users = Arc::new(UserRepository::new(db.clone()));
        let schedules = Arc::new(ScheduleRepository::new(db.clone()));
        let time_off = Arc::new(TimeOffRepository::new(db.clone()));

        Self {
            auth: AuthState {
                jwt_config: jwt_config.clone(),
            },
            users: Arc::new(UserService::new(
                users,
                schedules.clone(),
                jwt_config,
                password_cost,
            )),
            schedules: Arc::new(ScheduleService::new(schedules)),
            time_off: Arc::new(TimeOffService::new(time_off)),
            health: HealthState {
                db,
                started_at: Arc::new(Instant::now()),
            },
            metrics: MetricsState {
                handle: metrics_handle,
            },
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        s.auth.clone()
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthHandlerState {
            users: Arc::clone(&s.users),
        }
    }
}

impl FromRef<AppState> for schedule::ScheduleHandlerState {
    fn from_ref(s: &AppState) -> Self {
        schedule::ScheduleHandlerState {
            schedules: Arc::clone(&s.schedules),
        }
    }
}

impl FromRef<AppState> for time_off::TimeOffHandlerState {
    fn from_ref(s: &AppState) -> Self {
        time_off::TimeOffHandlerState {
            time_off: Arc::clone(&s.time_off),
        }
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        s.health.clone()
    }
}

impl FromRef<AppState> for MetricsState {
    fn from_ref(s: &AppState) -> Self {
        s.metrics.clone()
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by register or login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        schedule::get_schedule,
        schedule::update_schedule,
        time_off::list_time_off,
        time_off::create_time_off,
        time_off::update_time_off,
        time_off::delete_time_off,
    ),
    components(
        schemas(
            MessageResponse,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            auth::UserInfo,
            schedule::DaySlotDto,
            schedule::ScheduleDto,
            schedule::DaySlotRequest,
            schedule::UpdateScheduleRequest,
            schedule::ScheduleUpdatedResponse,
            time_off::TimeOffDto,
            time_off::TimeOffRequest,
            time_off::TimeOffResponse,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Authentication", description = "Registration and login (JWT)"),
        (name = "Schedule", description = "The caller's weekly working hours"),
        (name = "Time Off", description = "The caller's time-off requests"),
    ),
    info(
        title = "Work Scheduler API",
        version = "1.0.0",
        description = "Personal work-hours schedule and time-off requests"
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    // Protected routes: the caller is resolved from the bearer token
    let protected_routes = Router::new()
        .route(
            "/api/schedule",
            get(schedule::get_schedule).put(schedule::update_schedule),
        )
        .route(
            "/api/timeoff",
            get(time_off::list_time_off).post(time_off::create_time_off),
        )
        .route(
            "/api/timeoff/{id}",
            put(time_off::update_time_off).delete(time_off::delete_time_off),
        )
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    let public_routes = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/health", get(health::health_check))
        .route("/metrics", get(prometheus_metrics));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::Service;

    use super::*;
    use crate::infrastructure::database::test_support::test_db;

    async fn app() -> Router {
        let state = AppState::new(
            test_db().await,
            JwtConfig::new("router-test-secret", 24),
            4,
            PrometheusBuilder::new().build_recorder().handle(),
        );
        create_api_router(state)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };

        let mut svc = app.clone().into_service();
        let resp = svc.call(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn register(app: &Router, username: &str) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": "s3cret"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn register_then_fetch_default_schedule() {
        let app = app().await;
        let token = register(&app, "alice").await;

        let (status, body) = send(&app, "GET", "/api/schedule", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        for day in ["Monday", "Wednesday", "Sunday"] {
            assert_eq!(body[day]["startTime"], "09:00");
            assert_eq!(body[day]["endTime"], "17:30");
        }
    }

    #[tokio::test]
    async fn register_response_shape() {
        let app = app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"username": "bob", "email": "bob@example.com", "password": "pw"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User registered successfully");
        assert_eq!(body["user"]["username"], "bob");
        assert_eq!(body["user"]["email"], "bob@example.com");
        assert!(body["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn register_with_missing_field_is_rejected() {
        let app = app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"username": "bob", "password": "pw"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Please provide all required fields");
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let app = app().await;
        register(&app, "alice").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"username": "alice", "email": "new@example.com", "password": "pw"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Username already exists");
    }

    #[tokio::test]
    async fn login_failures_share_one_message() {
        let app = app().await;
        register(&app, "alice").await;

        let (ok_status, ok_body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "s3cret"})),
        )
        .await;
        let (_, wrong_password) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "nope"})),
        )
        .await;
        let (status, unknown_user) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "nobody", "password": "s3cret"})),
        )
        .await;

        assert_eq!(ok_status, StatusCode::OK);
        assert_eq!(ok_body["message"], "Login successful");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(wrong_password, unknown_user);
        assert_eq!(unknown_user["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn protected_routes_require_token() {
        let app = app().await;

        let (missing, missing_body) = send(&app, "GET", "/api/timeoff", None, None).await;
        let (invalid, invalid_body) =
            send(&app, "GET", "/api/schedule", Some("garbage"), None).await;

        assert_eq!(missing, StatusCode::UNAUTHORIZED);
        assert_eq!(invalid, StatusCode::UNAUTHORIZED);
        assert_eq!(missing_body, invalid_body);
        assert_eq!(missing_body["message"], "Not authorized");
    }

    #[tokio::test]
    async fn schedule_update_is_partial() {
        let app = app().await;
        let token = register(&app, "alice").await;

        let (status, body) = send(
            &app,
            "PUT",
            "/api/schedule",
            Some(&token),
            Some(json!({"Monday": {"startTime": "08:00"}})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Schedule updated successfully");
        assert_eq!(body["schedule"]["Monday"]["startTime"], "08:00");
        assert_eq!(body["schedule"]["Monday"]["endTime"], "17:30");
        assert_eq!(body["schedule"]["Tuesday"]["startTime"], "09:00");
    }

    #[tokio::test]
    async fn schedule_update_rejects_first_bad_day() {
        let app = app().await;
        let token = register(&app, "alice").await;

        let (status, body) = send(
            &app,
            "PUT",
            "/api/schedule",
            Some(&token),
            Some(json!({
                "Friday": {"startTime": "99:00"},
                "Tuesday": {"startTime": "08:00", "endTime": "25:00"}
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid end time for Tuesday");
    }

    #[tokio::test]
    async fn time_off_lifecycle() {
        let app = app().await;
        let token = register(&app, "alice").await;

        let (status, created) = send(
            &app,
            "POST",
            "/api/timeoff",
            Some(&token),
            Some(json!({"type": "dayOff", "startDate": "2024-05-01", "endDate": "2024-06-01"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["message"], "Time off request created successfully");
        assert_eq!(created["timeOff"]["endDate"], "2024-05-01");
        assert_eq!(created["timeOff"]["status"], "pending");
        let id = created["timeOff"]["id"].as_str().unwrap().to_string();

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/timeoff/{}", id),
            Some(&token),
            Some(json!({
                "type": "vacation",
                "startDate": "2024-05-01",
                "endDate": "2024-05-03",
                "description": "Trip"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["timeOff"]["type"], "vacation");
        assert_eq!(updated["timeOff"]["description"], "Trip");

        let (_, listed) = send(&app, "GET", "/api/timeoff", Some(&token), None).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, deleted) = send(
            &app,
            "DELETE",
            &format!("/api/timeoff/{}", id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["message"], "Time off request deleted successfully");
    }

    #[tokio::test]
    async fn time_off_validation_and_ownership() {
        let app = app().await;
        let alice = register(&app, "alice").await;
        let bob = register(&app, "bob").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/timeoff",
            Some(&alice),
            Some(json!({"type": "vacation", "startDate": "2024-05-10", "endDate": "2024-05-05"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "End date must be after start date");

        let (_, created) = send(
            &app,
            "POST",
            "/api/timeoff",
            Some(&alice),
            Some(json!({"type": "sickLeave", "startDate": "2024-05-10", "endDate": "2024-05-11"})),
        )
        .await;
        let uri = format!("/api/timeoff/{}", created["timeOff"]["id"].as_str().unwrap());

        let (status, body) = send(&app, "DELETE", &uri, Some(&bob), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Time off request not found");

        let (_, listed) = send(&app, "GET", "/api/timeoff", Some(&bob), None).await;
        assert!(listed.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = app().await;
        let (status, body) = send(&app, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"]["status"], "ok");
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let app = app().await;
        let req = Request::builder()
            .uri("/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();

        let mut svc = app.into_service();
        let resp = svc.call(req).await.unwrap();

        assert_eq!(resp.headers()["x-request-id"], "abc-123");
    }
}
