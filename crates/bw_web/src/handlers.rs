use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use bw_core::{Error, PublisherSummary};

use crate::session::SessionSnapshot;
use crate::AppState;

/// Maps pipeline errors onto user-visible HTTP responses.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::MissingCredential | Error::InvalidSampleSize(_) => StatusCode::BAD_REQUEST,
            Error::Session(_) => StatusCode::CONFLICT,
            Error::Classification(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
            Error::Dataset(_) | Error::Io(_) | Error::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[derive(Deserialize)]
pub struct CredentialRequest {
    pub api_key: String,
}

#[derive(Deserialize)]
pub struct SampleSizeRequest {
    pub sample_size: u32,
}

#[derive(Serialize)]
pub struct ScanResponse {
    pub summary: Vec<PublisherSummary>,
    pub lines: Vec<String>,
}

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.session.read().await.snapshot())
}

/// Idle -> Ready. Validates the key, then makes sure the dataset is loadable
/// before committing the credential; a broken dataset is fatal to the session.
pub async fn set_credential(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CredentialRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    if request.api_key.trim().is_empty() {
        return Err(Error::MissingCredential.into());
    }

    let groups = state.loader.load().await?;
    tracing::debug!(groups = groups.len(), "dataset ready for session");

    let mut session = state.session.write().await;
    session.set_credential(&request.api_key)?;
    Ok(Json(session.snapshot()))
}

pub async fn set_sample_size(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SampleSizeRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let mut session = state.session.write().await;
    session.set_sample_size(request.sample_size)?;
    Ok(Json(session.snapshot()))
}

/// Ready/Summary -> Scanning -> Summary. Walks the groups in stored order,
/// one blocking classification at a time. The session lock is only held while
/// bookkeeping, never across a network round trip, so snapshot polling keeps
/// working mid-scan.
///
/// The scan itself runs in a spawned task that the handler merely awaits: a
/// client dropping the request must not cancel the scan mid-flight, because
/// the session would then stay in Scanning with no event able to move it.
pub async fn start_scan(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ScanResponse>, ApiError> {
    let (api_key, bound) = state.session.write().await.begin_scan()?;

    let task = tokio::spawn({
        let state = Arc::clone(&state);
        async move {
            match run_scan(&state, &api_key, bound).await {
                Ok(()) => {
                    let mut session = state.session.write().await;
                    session.finish_scan();
                    let summary = session.summary();
                    let lines = summary.iter().map(|row| row.to_string()).collect();
                    tracing::info!(publishers = summary.len(), "scan finished");
                    Ok(ScanResponse { summary, lines })
                }
                Err(err) => {
                    state.session.write().await.abort_scan();
                    tracing::warn!(error = %err, "scan aborted");
                    Err(err)
                }
            }
        }
    });

    match task.await {
        Ok(result) => result.map(Json).map_err(ApiError::from),
        Err(join_err) => {
            // The scan task panicked; do not leave the session stranded.
            state.session.write().await.abort_scan();
            Err(Error::Session(format!("scan task failed: {join_err}")).into())
        }
    }
}

async fn run_scan(state: &AppState, api_key: &str, bound: u32) -> bw_core::Result<()> {
    let groups = state.loader.load().await?;
    let model = (state.models)(api_key)?;

    for group in groups.iter() {
        let Some(lead) = group.lead() else {
            continue;
        };

        // At the bound: skip the group without consulting the model, but keep
        // scanning for other publishers.
        let examined = state.session.read().await.publisher_total(&lead.provider);
        if examined >= bound {
            continue;
        }

        let result = model.classify_title(&lead.title).await?;
        tracing::info!(
            publisher = %lead.provider,
            title = %lead.title,
            is_clickbait = result.is_clickbait,
            "headline classified"
        );
        state
            .session
            .write()
            .await
            .record_item(&lead.provider, &lead.title, result);
    }

    Ok(())
}
