use crate::data::{ScheduleOutput, SolveRequest};
use crate::solver;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};

async fn solve_handler(
    Json(request): Json<SolveRequest>,
) -> Result<Json<ScheduleOutput>, (StatusCode, String)> {
    // the pipeline is a single blocking call, so keep it off the runtime
    let outcome = tokio::task::spawn_blocking(move || solver::solve_request(request))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    match outcome {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err((StatusCode::BAD_REQUEST, e.to_string())),
    }
}

pub fn router() -> Router {
    Router::new().route("/v1/roster/solve", post(solve_handler))
}

pub async fn run_server() {
    let app = router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .unwrap();

    println!("Server running at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
