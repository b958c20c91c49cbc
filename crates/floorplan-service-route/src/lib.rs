//! Floor-plan route planning HTTP service.
//!
//! # Endpoints
//!
//! - `POST /api/v1/route` - Compute a route between two nodes
//! - `GET /floorplan/path?start=..&end=..` - Line IDs of the shortest route
//! - `POST /floorplan/load?file=..` - Load a floor plan from the data directory
//! - `GET /api/v1/weights` - Accepted edges of the active floor plan
//! - `GET /api/v1/objects` - Searchable objects of the active floor plan
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tracing::{error, info, warn};

use floorplan_lib::{
    CancelFlag, Edge, Error as LibError, Heuristic, Node, RoutePlan, RouteRequest as LibRequest,
    plan_route,
};
use floorplan_service_shared::{
    AppState, AppStateError, LoadFloorPlanQuery, LoadSummary, MetricsConfig, MetricsLayer,
    PathQuery, ProblemDetails, RouteRequest, ServiceConfig, ServiceResponse, Validate, cors_layer,
    extract_or_generate_request_id, failure_reason, from_lib_error, health_live, health_ready,
    metrics_handler, record_route_calculated, record_route_failed, record_route_segments,
};

/// Route response returned by `POST /api/v1/route`.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Map segments to highlight, in travel order.
    pub line_ids: Vec<String>,
    /// Node identifiers visited, start and end included.
    pub nodes: Vec<String>,
    pub cost: f64,
    pub segments: usize,
    pub heuristic: Heuristic,
}

impl From<RoutePlan> for RouteResponse {
    fn from(plan: RoutePlan) -> Self {
        Self {
            segments: plan.segment_count(),
            line_ids: plan.line_ids,
            nodes: plan.nodes,
            cost: plan.cost,
            heuristic: plan.heuristic,
        }
    }
}

/// Body of `GET /floorplan/path`.
#[derive(Debug, Serialize)]
pub struct PathResponse {
    pub line_ids: Vec<String>,
}

/// Body of `GET /api/v1/weights`.
#[derive(Debug, Serialize)]
pub struct WeightsResponse {
    pub edges: Vec<Edge>,
}

/// Body of `GET /api/v1/objects`.
#[derive(Debug, Serialize)]
pub struct ObjectsResponse {
    /// Objects in declaration order with their `type`, `text` and position.
    pub objects: Vec<Node>,
}

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response<T> {
    Success(T),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

/// Build the service router.
pub fn app(state: AppState, config: &ServiceConfig, metrics: &MetricsConfig) -> Router {
    Router::new()
        .route("/api/v1/route", post(route_handler))
        .route("/api/v1/weights", get(weights_handler))
        .route("/api/v1/objects", get(objects_handler))
        .route("/floorplan/path", get(path_handler))
        .route("/floorplan/load", post(load_handler))
        .route(&metrics.path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(cors_layer(&config.cors_allow_origin))
        .layer(MetricsLayer)
        .with_state(state)
}

/// Cancels the search when the request future is dropped before it finishes.
struct CancelOnDrop(CancelFlag);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

/// Run a search on a snapshot of the active graph off the async runtime.
async fn search(
    state: &AppState,
    start: &str,
    end: &str,
    heuristic: Heuristic,
    request_id: &str,
    endpoint: &str,
) -> Result<RoutePlan, ProblemDetails> {
    let fail = |err: LibError| {
        record_route_failed(failure_reason(&err), endpoint);
        match &err {
            LibError::NodeNotFound { .. } | LibError::PathNotFound { .. } => {
                info!(request_id, error = %err, "no route")
            }
            _ => error!(request_id, error = %err, "route planning failed"),
        }
        from_lib_error(&err, request_id)
    };

    let graph = state.graph().map_err(&fail)?;

    let cancel = CancelFlag::new();
    let _guard = CancelOnDrop(cancel.clone());

    let mut request = LibRequest::new(start, end).with_heuristic(heuristic);
    request.cancel = Some(cancel);
    if let Some(timeout) = state.search_timeout() {
        request = request.with_timeout(timeout);
    }

    let plan = match tokio::task::spawn_blocking(move || plan_route(&graph, &request)).await {
        Ok(result) => result.map_err(&fail)?,
        Err(join_error) => {
            record_route_failed("internal", endpoint);
            error!(request_id, error = %join_error, "route search task failed");
            return Err(ProblemDetails::internal_error(
                "route search did not complete",
                request_id,
            ));
        }
    };

    let heuristic_label = plan.heuristic.to_string();
    record_route_calculated(&heuristic_label, endpoint);
    record_route_segments(plan.segment_count(), &heuristic_label);

    Ok(plan)
}

/// Handle `POST /api/v1/route`.
async fn route_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<RouteRequest>, JsonRejection>,
) -> Response<ServiceResponse<RouteResponse>> {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            record_route_failed("validation_error", "route");
            return Response::Error(ProblemDetails::bad_request(
                rejection.body_text(),
                &request_id,
            ));
        }
    };

    info!(
        request_id = %request_id,
        start = %request.start,
        end = %request.end,
        heuristic = %request.heuristic,
        "handling route request"
    );

    if let Err(problem) = request.validate(&request_id) {
        record_route_failed("validation_error", "route");
        return Response::Error(*problem);
    }

    match search(
        &state,
        &request.start,
        &request.end,
        request.heuristic,
        &request_id,
        "route",
    )
    .await
    {
        Ok(plan) => {
            info!(
                request_id = %request_id,
                segments = plan.segment_count(),
                cost = plan.cost,
                "route computed successfully"
            );
            Response::Success(ServiceResponse::new(plan.into()))
        }
        Err(problem) => Response::Error(problem),
    }
}

/// Handle `GET /floorplan/path?start=..&end=..`.
async fn path_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> Response<PathResponse> {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            record_route_failed("validation_error", "path");
            return Response::Error(ProblemDetails::bad_request(
                rejection.body_text(),
                &request_id,
            ));
        }
    };

    let (start, end) = match query.endpoints(&request_id) {
        Ok(endpoints) => endpoints,
        Err(problem) => {
            record_route_failed("validation_error", "path");
            return Response::Error(*problem);
        }
    };

    match search(&state, start, end, Heuristic::default(), &request_id, "path").await {
        Ok(plan) => Response::Success(PathResponse {
            line_ids: plan.line_ids,
        }),
        Err(problem) => Response::Error(problem),
    }
}

/// Handle `POST /floorplan/load?file=..`.
async fn load_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<LoadFloorPlanQuery>, QueryRejection>,
) -> Response<ServiceResponse<LoadSummary>> {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return Response::Error(ProblemDetails::bad_request(
                rejection.body_text(),
                &request_id,
            ));
        }
    };
    if let Err(problem) = query.validate(&request_id) {
        return Response::Error(*problem);
    }
    let file = query.file.unwrap_or_default();

    let loader = state.clone();
    let outcome = tokio::task::spawn_blocking(move || loader.load_named(&file)).await;

    match outcome {
        Ok(Ok(summary)) => Response::Success(ServiceResponse::new(summary)),
        Ok(Err(AppStateError::InvalidFloorPlanPath(path))) => {
            warn!(request_id = %request_id, path = %path, "rejected floor plan path");
            Response::Error(ProblemDetails::bad_request(
                format!("Floor plan '{}' must be a relative path inside the data directory", path),
                &request_id,
            ))
        }
        Ok(Err(AppStateError::FloorPlanLoad(err))) => {
            warn!(request_id = %request_id, error = %err, "floor plan load failed");
            Response::Error(from_lib_error(&err, &request_id))
        }
        Err(join_error) => {
            error!(request_id = %request_id, error = %join_error, "floor plan load task failed");
            Response::Error(ProblemDetails::internal_error(
                "floor plan load did not complete",
                &request_id,
            ))
        }
    }
}

/// Handle `GET /api/v1/weights`.
async fn weights_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response<ServiceResponse<WeightsResponse>> {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    match state.graph() {
        Ok(graph) => Response::Success(ServiceResponse::new(WeightsResponse {
            edges: graph.connections().to_vec(),
        })),
        Err(err) => Response::Error(from_lib_error(&err, &request_id)),
    }
}

/// Handle `GET /api/v1/objects`.
async fn objects_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response<ServiceResponse<ObjectsResponse>> {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    match state.graph() {
        Ok(graph) => Response::Success(ServiceResponse::new(ObjectsResponse {
            objects: graph.objects().cloned().collect(),
        })),
        Err(err) => Response::Error(from_lib_error(&err, &request_id)),
    }
}
