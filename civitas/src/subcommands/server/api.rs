use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;

use crate::{
    db,
    indexer::{self, ResetCheckpoint, ScanOutcome},
    util::format_time,
};

use self::models::{JsonError, ReindexRequest, SourceStatus, StatusResponse};

use super::AppState;

mod models {
    use axum::{http::StatusCode, response::IntoResponse, Json};
    use civitas_core::{Address, SourceKind};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize)]
    pub struct JsonError {
        pub error: String,
        #[serde(skip)]
        pub status: StatusCode,
    }

    impl JsonError {
        pub fn message(err: &str) -> JsonError {
            JsonError {
                error: err.into(),
                status: StatusCode::BAD_REQUEST,
            }
        }
    }

    impl IntoResponse for JsonError {
        fn into_response(self) -> axum::response::Response {
            (self.status, Json(self)).into_response()
        }
    }

    impl<E> From<E> for JsonError
    where
        E: Into<anyhow::Error>,
    {
        fn from(value: E) -> Self {
            JsonError {
                error: value.into().to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    #[derive(Serialize)]
    pub struct StatusResponse {
        pub version: &'static str,
        pub commit: &'static str,
        pub build_date: &'static str,
        pub running: bool,
        pub poll_interval: u64,
        pub max_window: u64,
        pub last_scan: Option<String>,
        pub last_error: Option<String>,
        pub members: i64,
        pub projects: i64,
        pub total_donated: f64,
        pub archived_events: i64,
        pub sources: Vec<SourceStatus>,
    }

    #[derive(Serialize)]
    pub struct SourceStatus {
        pub kind: SourceKind,
        pub address: Address,
        pub starting_block: u64,
        pub checkpoint: Option<i64>,
        pub checkpoint_updated: Option<String>,
    }

    #[derive(Deserialize)]
    pub struct ReindexRequest {
        pub source: Option<Address>,
        pub block: Option<i64>,
    }
}

pub async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>, JsonError> {
    let conn = &state.pool;
    let checkpoints = db::checkpoint::all(conn).await?;

    let sources = state
        .config
        .sources()
        .into_iter()
        .map(|source| {
            let checkpoint = checkpoints.iter().find(|c| c.address == source.address);
            Ok(SourceStatus {
                kind: source.kind,
                address: source.address,
                starting_block: source.starting_block,
                checkpoint: checkpoint.map(|c| c.last_processed_block),
                checkpoint_updated: checkpoint
                    .map(|c| format_time(c.updated_at))
                    .transpose()?,
            })
        })
        .collect::<Result<Vec<_>, anyhow::Error>>()?;

    let last_scan = db::scan_log::last_scan_time(conn)
        .await?
        .map(format_time)
        .transpose()?;

    Ok(Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        commit: env!("VERGEN_GIT_DESCRIBE"),
        build_date: env!("VERGEN_BUILD_TIMESTAMP"),
        running: state.indexer.running(),
        poll_interval: state.config.indexer_delay(),
        max_window: state.config.max_window(),
        last_scan,
        last_error: state.indexer.last_error(),
        members: db::stats::members(conn).await?,
        projects: db::stats::projects(conn).await?,
        total_donated: db::stats::donation_total(conn).await?,
        archived_events: db::stats::archived_events(conn).await?,
        sources,
    }))
}

/// Trigger one scan pass immediately, serialized with the background loop.
pub async fn scan(State(state): State<AppState>) -> Result<Json<Vec<ScanOutcome>>, JsonError> {
    let outcomes = state.indexer.run_once().await?;
    Ok(Json(outcomes))
}

pub async fn reindex(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<ReindexRequest>, JsonError>,
) -> Result<Json<Vec<ResetCheckpoint>>, JsonError> {
    if let Some(source) = req.source {
        if !state.config.sources().iter().any(|s| s.address == source) {
            return Err(JsonError::message(&format!("unknown source {source}")));
        }
    }
    let reset = indexer::reindex(&state.config, &state.pool, req.source, req.block).await?;
    Ok(Json(reset))
}
