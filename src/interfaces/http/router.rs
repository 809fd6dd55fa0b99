//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{middleware, routing::get, routing::post, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{CategoryService, UserService};
use crate::interfaces::http::common::{ApiResponse, CreatedResponse};
use crate::interfaces::http::modules::{categories, health, metrics, request_id, users};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        users::login,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            CreatedResponse,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Categories
            categories::CategoryDto,
            categories::CategoryRequest,
            // Users
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            users::LoginRequest,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Categories", description = "Tourism spot categories"),
        (name = "Users", description = "User registration, profile maintenance and login"),
    ),
    info(
        title = "Turistae Catalog API",
        version = "1.0.0",
        description = "REST API for the Turistae tourism catalog",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Everything the router needs, built once at start-up.
#[derive(Clone)]
pub struct RouterDeps {
    pub category_service: Arc<CategoryService>,
    pub user_service: Arc<UserService>,
    /// Pinged by `/health`; `None` over the in-memory store.
    pub db: Option<DatabaseConnection>,
    /// `/metrics` is only mounted when a recorder is installed.
    pub metrics_handle: Option<PrometheusHandle>,
    pub started_at: Arc<Instant>,
}

/// Create the API router with all routes
pub fn create_api_router(deps: RouterDeps) -> Router {
    let category_routes = Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .with_state(categories::CategoryHandlerState {
            category_service: deps.category_service,
        });

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/login", post(users::login))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(users::UserHandlerState {
            user_service: deps.user_service,
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db: deps.db,
            started_at: deps.started_at,
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/api/categoria", category_routes)
        .nest("/api/usuario", user_routes);

    if let Some(handle) = deps.metrics_handle {
        router = router.route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics::MetricsState { handle }),
        );
    }

    // Layers run bottom-up: request id first so every later span carries it.
    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(request_id::request_id_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::infrastructure::{InMemoryStorage, Sha256Hasher};
    use crate::shared::{is_valid_stamp, FixedClock, SharedClock};

    fn app() -> Router {
        let storage = Arc::new(InMemoryStorage::new());
        let clock: SharedClock = Arc::new(
            FixedClock::at(
                NaiveDate::from_ymd_opt(2024, 5, 1)
                    .unwrap()
                    .and_hms_opt(8, 0, 0)
                    .unwrap(),
            )
            .unwrap(),
        );
        let hasher = Arc::new(Sha256Hasher::new("test-pepper"));

        create_api_router(RouterDeps {
            category_service: Arc::new(CategoryService::new(storage.clone(), clock.clone())),
            user_service: Arc::new(UserService::new(storage, hasher, clock)),
            db: None,
            metrics_handle: None,
            started_at: Arc::new(Instant::now()),
        })
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&v).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn alice() -> Value {
        json!({"username": "alice", "email": "alice@example.com", "password": "pw123456"})
    }

    #[tokio::test]
    async fn category_crud_flow() {
        let app = app();

        let (status, body) =
            call(&app, Method::POST, "/api/categoria", Some(json!({"name": "Beaches"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = call(&app, Method::GET, &format!("/api/categoria/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Beaches");
        let created = body["data"]["created_at"].as_str().unwrap();
        assert!(is_valid_stamp(created));
        assert_eq!(body["data"]["created_at"], body["data"]["edited_at"]);

        let (status, _) = call(
            &app,
            Method::PUT,
            &format!("/api/categoria/{id}"),
            Some(json!({"name": "Waterfalls"})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = call(&app, Method::GET, "/api/categoria", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["name"], "Waterfalls");

        let (status, _) = call(&app, Method::DELETE, &format!("/api/categoria/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = call(&app, Method::GET, &format!("/api/categoria/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_category_is_conflict() {
        let app = app();
        call(&app, Method::POST, "/api/categoria", Some(json!({"name": "Parks"}))).await;

        let (status, body) =
            call(&app, Method::POST, "/api/categoria", Some(json!({"name": "Parks"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Category unavailable");
    }

    #[tokio::test]
    async fn invalid_category_bodies_are_rejected() {
        let app = app();

        let (status, _) =
            call(&app, Method::POST, "/api/categoria", Some(json!({"name": ""}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/categoria")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\":"))
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let app = app();

        let (status, _) = call(
            &app,
            Method::PUT,
            "/api/categoria/42",
            Some(json!({"name": "Ghost"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, Method::DELETE, "/api/categoria/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, Method::DELETE, "/api/usuario/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn user_registration_never_exposes_hash() {
        let app = app();

        let (status, body) = call(&app, Method::POST, "/api/usuario", Some(alice())).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = call(&app, Method::GET, &format!("/api/usuario/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["username"], "alice");
        assert!(body["data"].get("password_hash").is_none());
        assert!(body["data"].get("password").is_none());
    }

    #[tokio::test]
    async fn duplicate_username_and_email_messages() {
        let app = app();
        call(&app, Method::POST, "/api/usuario", Some(alice())).await;

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/usuario",
            Some(json!({"username": "alice", "email": "other@example.com", "password": "pw123456"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Username unavailable");

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/usuario",
            Some(json!({"username": "bob", "email": "alice@example.com", "password": "pw123456"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Email already registered");
    }

    #[tokio::test]
    async fn login_by_username_or_email() {
        let app = app();
        call(&app, Method::POST, "/api/usuario", Some(alice())).await;

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/usuario/login",
            Some(json!({"username": "alice", "password": "pw123456"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "alice@example.com");
        assert!(body["data"].get("password_hash").is_none());

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/usuario/login",
            Some(json!({"username": "", "email": "alice@example.com", "password": "pw123456"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn failed_logins_are_unauthorized() {
        let app = app();
        call(&app, Method::POST, "/api/usuario", Some(alice())).await;

        for body in [
            json!({"username": "alice", "password": "pw123"}),
            json!({"username": "nobody", "password": "pw123456"}),
            json!({"password": "pw123456"}),
            json!({"username": "alice"}),
            // username wins over a matching email
            json!({"username": "bob", "email": "alice@example.com", "password": "pw123456"}),
        ] {
            let (status, resp) = call(&app, Method::POST, "/api/usuario/login", Some(body)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(resp["error"], "Invalid username or password");
        }
    }

    #[tokio::test]
    async fn malformed_login_body_gets_error_envelope() {
        let app = app();

        for (content_type, body) in [
            (Some("application/json"), "{\"username\":"),
            (None, "{\"username\": \"alice\", \"password\": \"pw123456\"}"),
        ] {
            let mut builder = Request::builder()
                .method(Method::POST)
                .uri("/api/usuario/login");
            if let Some(ct) = content_type {
                builder = builder.header("content-type", ct);
            }
            let resp = app
                .clone()
                .oneshot(builder.body(Body::from(body)).unwrap())
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
                .await
                .unwrap();
            let envelope: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(envelope["success"], false);
            assert!(envelope["error"].as_str().unwrap().starts_with("Invalid JSON"));
        }
    }

    #[tokio::test]
    async fn user_update_keeps_password_when_omitted() {
        let app = app();
        let (_, body) = call(&app, Method::POST, "/api/usuario", Some(alice())).await;
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, _) = call(
            &app,
            Method::PUT,
            &format!("/api/usuario/{id}"),
            Some(json!({"username": "alice2", "email": "alice@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/usuario/login",
            Some(json!({"username": "alice2", "password": "pw123456"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let app = app();
        let req = Request::builder()
            .uri("/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["x-request-id"], "abc-123");

        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert!(resp.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let (status, body) = call(&app(), Method::GET, "/api-doc/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/api/categoria").is_some());
        assert!(body["paths"].get("/api/usuario/login").is_some());
    }
}
