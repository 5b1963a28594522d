use axum::{routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::health as health_handlers;
use super::api::predict as predict_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health_handlers::health))
        .route(
            "/predict_collision",
            post(predict_handlers::predict_collision),
        )
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let state = AppState::from_config(&config).map_err(std::io::Error::other)?;

    log::info!(
        "Propagator cache holds up to {} element sets; search horizon {}",
        state.engine.cache().capacity(),
        state.engine.params().horizon
    );

    let app = build_router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn offline_app() -> Router {
        let config = Config::from_yaml(
            "elements:\n  base_url: http://127.0.0.1:9/gp.php\n  timeout: 500ms\n  retries: 1\n",
        )
        .unwrap();
        build_router(AppState::from_config(&config).unwrap())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn predict_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict_collision")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_probe() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, body) = send(offline_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok", "app": "OrbitGuard" }));
    }

    #[tokio::test]
    async fn predicts_from_offline_elements() {
        let request = predict_request(json!({
            "norad_id_1": "25544",
            "norad_id_2": "48274",
            "reference_time": "2023-10-13T13:00:30Z"
        }));
        let (status, body) = send(offline_app(), request).await;

        assert_eq!(status, StatusCode::OK, "{}", body);
        assert_eq!(body["path1"].as_array().unwrap().len(), 360);
        assert_eq!(body["path2"].as_array().unwrap().len(), 360);
        assert_eq!(body["closest_point"].as_array().unwrap().len(), 3);
        assert!(body["min_distance_km"].as_f64().unwrap() >= 0.0);
        assert!(["Low", "Medium", "High"].contains(&body["risk_level"].as_str().unwrap()));

        let tca: chrono::DateTime<chrono::Utc> =
            body["time_of_closest_approach"].as_str().unwrap().parse().unwrap();
        let start: chrono::DateTime<chrono::Utc> = "2023-10-13T13:00:00Z".parse().unwrap();
        assert!(tca >= start && tca <= start + chrono::Duration::hours(6));
    }

    #[tokio::test]
    async fn same_object_twice_is_high_risk() {
        let request = predict_request(json!({
            "norad_id_1": "25544",
            "norad_id_2": "25544",
            "reference_time": "2023-10-13T13:00:00Z"
        }));
        let (status, body) = send(offline_app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["risk_level"], "High");
        assert_eq!(body["min_distance_km"], 0.0);
        assert_eq!(body["collision_probability_score"], 100.0);
    }

    #[tokio::test]
    async fn unknown_identifier_is_client_error() {
        let request = predict_request(json!({
            "norad_id_1": "ISS",
            "norad_id_2": "25544"
        }));
        let (status, body) = send(offline_app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "element_set_unavailable");
        assert!(body["detail"].as_str().unwrap().contains("ISS"));
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let request = Request::builder()
            .uri("/api-doc/openapi.json")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(offline_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/predict_collision").is_some());
    }
}
