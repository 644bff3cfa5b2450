use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use tower_http::trace::TraceLayer;

use projecthub_graphql::{DispatchError, Dispatcher, ProjectHubSchema};

/// Shared handler state. Both fields wrap the same assembled schema.
#[derive(Clone)]
pub struct AppState {
    pub schema: ProjectHubSchema,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(schema: ProjectHubSchema) -> Self {
        Self {
            dispatcher: Dispatcher::new(schema.clone()),
            schema,
        }
    }
}

/// Build the application router.
pub fn router(schema: ProjectHubSchema, playground: bool) -> Router {
    let graphql = if playground {
        post(graphql_handler).get(graphql_playground)
    } else {
        post(graphql_handler)
    };

    Router::new()
        .route("/graphql", graphql)
        .route("/rpc/{operation}", post(rpc_handler))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(schema))
}

// ── Handlers ────────────────────────────────────────────────────

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

async fn rpc_handler(
    State(state): State<AppState>,
    Path(operation): Path<String>,
    Json(args): Json<Map<String, Value>>,
) -> Result<Json<Value>, RpcError> {
    let data = state.dispatcher.dispatch(&operation, args).await?;
    Ok(Json(json!({ "data": data })))
}

async fn health() -> &'static str {
    "ok"
}

// ── Errors ──────────────────────────────────────────────────────

/// A dispatch failure rendered as an HTTP response.
#[derive(Debug)]
pub struct RpcError(pub DispatchError);

impl From<DispatchError> for RpcError {
    fn from(err: DispatchError) -> Self {
        Self(err)
    }
}

impl RpcError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DispatchError::UnknownOperation(_) => StatusCode::NOT_FOUND,
            err if err.is_validation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Operation failed");
        } else {
            tracing::debug!(error = %self.0, "Operation rejected");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    use projecthub_graphql::build_schema;
    use projecthub_store::MemoryStore;

    use super::*;

    fn app(playground: bool) -> Router {
        router(build_schema(Arc::new(MemoryStore::new())), playground)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app(false)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn graphql_post_executes() {
        let app = app(false);
        let (status, body) = send(
            &app,
            post_json(
                "/graphql",
                json!({
                    "query": "mutation { addClient(name: \"Ada\", email: \"ada@x.io\", phone: \"555\") { name } }"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["addClient"]["name"], "Ada");

        let (_, body) = send(&app, post_json("/graphql", json!({"query": "{ clients { name } }"}))).await;
        assert_eq!(body["data"]["clients"], json!([{"name": "Ada"}]));
    }

    #[tokio::test]
    async fn playground_only_when_enabled() {
        let get = || Request::get("/graphql").body(Body::empty()).unwrap();

        let response = app(true).oneshot(get()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app(false).oneshot(get()).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn rpc_round_trip() {
        let app = app(false);
        let (status, added) = send(
            &app,
            post_json(
                "/rpc/add-client",
                json!({"name": "Ada", "email": "ada@x.io", "phone": "555-0100"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = added["data"]["id"].clone();

        let (status, fetched) = send(&app, post_json("/rpc/get-client", json!({"id": id}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["data"], added["data"]);
    }

    #[tokio::test]
    async fn rpc_status_codes() {
        let app = app(false);

        let (status, body) = send(&app, post_json("/rpc/drop-tables", json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().is_some());

        let (status, _) = send(&app, post_json("/rpc/get-client", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, post_json("/rpc/get-client", json!({"id": "nope"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn execution_failures_are_server_errors() {
        let err = RpcError(DispatchError::Execution {
            operation: "list-clients",
            messages: vec!["store offline".to_string()],
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
