//! Session API endpoints
//!
//! Each session is one annotation widget instance. The host reports text
//! edits and selection events, commits or removes annotations, and fetches
//! the re-rendered overlay as segments or HTML.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::annotations::{Annotation, Selection};
use crate::error::{AppError, Result};
use crate::html::{render_annotation_list_html, render_overlay_html};
use crate::overlay::Segment;
use crate::session::{SelectionEvent, Session, SessionHandle, SessionSummary};
use crate::state::AppState;

/// Create the sessions router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route("/:id", get(get_session).delete(delete_session))
        .route("/:id/text", put(update_text))
        .route("/:id/selection", post(update_selection))
        .route("/:id/annotations", post(add_annotation))
        .route(
            "/:id/annotations/:annotation_id",
            axum::routing::delete(remove_annotation),
        )
        .route("/:id/segments", get(get_segments))
        .route("/:id/render", get(render_session))
}

/// Request body for creating a session
#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationSeed>,
}

/// Initial annotation supplied by the host
#[derive(Debug, Deserialize)]
pub struct AnnotationSeed {
    pub id: Option<String>,
    pub start: usize,
    pub end: usize,
    pub text: Option<String>,
    pub note: Option<String>,
}

impl AnnotationSeed {
    fn into_annotation(self) -> Annotation {
        Annotation {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            start: self.start,
            end: self.end,
            text: self.text.unwrap_or_default(),
            note: self.note.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTextRequest {
    pub text: String,
}

/// Request body for adding an annotation
///
/// Without `start`/`end` the current selection is committed.
#[derive(Debug, Default, Deserialize)]
pub struct AddAnnotationRequest {
    pub note: Option<String>,
    pub start: Option<usize>,
    pub end: Option<usize>,
}

/// Response types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: String,
    pub text: String,
    pub annotations: Vec<Annotation>,
    pub selection: Option<Selection>,
    pub commit_enabled: bool,
    pub revision: u64,
    pub segments: Vec<Segment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionView {
    fn from_session(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            text: session.text().to_string(),
            annotations: session.annotations().to_vec(),
            selection: session.selection(),
            commit_enabled: session.commit_enabled(),
            revision: session.revision(),
            segments: session.segments().to_vec(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionsListResponse {
    pub sessions: Vec<SessionSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    pub selection: Option<Selection>,
    pub commit_enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct AnnotationView {
    pub annotation: Annotation,
    pub revision: u64,
}

#[derive(Debug, Serialize)]
pub struct SegmentsView {
    pub segments: Vec<Segment>,
    pub revision: u64,
}

async fn find_session(state: &AppState, id: &str) -> Result<SessionHandle> {
    state
        .sessions()
        .get(id)
        .await
        .ok_or_else(|| AppError::session_not_found(id))
}

/// List all sessions
async fn list_sessions(State(state): State<AppState>) -> Json<SessionsListResponse> {
    let sessions = state.sessions().list().await;
    let total = sessions.len();
    Json(SessionsListResponse { sessions, total })
}

/// Create a new session, optionally seeded with annotations
async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>)> {
    let seeds = req
        .annotations
        .into_iter()
        .map(AnnotationSeed::into_annotation)
        .collect();
    let session = Session::new(&req.text).with_annotations(seeds)?;
    let view = SessionView::from_session(&session);

    state.sessions().insert(session).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Get a session with its rendered segments
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>> {
    let handle = find_session(&state, &id).await?;
    let view = SessionView::from_session(&handle.lock());
    Ok(Json(view))
}

/// Close a session
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if state.sessions().remove(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::session_not_found(&id))
    }
}

/// Replace the session text
async fn update_text(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTextRequest>,
) -> Result<Json<SessionView>> {
    let handle = find_session(&state, &id).await?;
    let view = {
        let mut session = handle.lock();
        session.set_text(&req.text);
        SessionView::from_session(&session)
    };
    Ok(Json(view))
}

/// Record a selection event from the host input
async fn update_selection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<SelectionEvent>,
) -> Result<Json<SelectionView>> {
    let handle = find_session(&state, &id).await?;
    let view = {
        let mut session = handle.lock();
        session.apply_selection_event(&event);
        SelectionView {
            selection: session.selection(),
            commit_enabled: session.commit_enabled(),
        }
    };
    tracing::trace!("Session {} selection {:?}", id, view.selection);
    Ok(Json(view))
}

/// Add an annotation from the current selection or an explicit range
async fn add_annotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AddAnnotationRequest>,
) -> Result<(StatusCode, Json<AnnotationView>)> {
    let handle = find_session(&state, &id).await?;
    let note = req
        .note
        .unwrap_or_else(|| state.config().session.default_note.clone());

    let view = {
        let mut session = handle.lock();
        let annotation = match (req.start, req.end) {
            (Some(start), Some(end)) => {
                let range = Selection {
                    start: start.min(end),
                    end: start.max(end),
                };
                session.add_annotation(Some(range), &note)?
            }
            (None, None) => session.commit(&note)?,
            _ => {
                return Err(AppError::BadRequest(
                    "start and end must be given together".to_string(),
                ))
            }
        };
        AnnotationView {
            annotation,
            revision: session.revision(),
        }
    };

    tracing::info!(
        "Session {} annotated {}..{} as {}",
        id,
        view.annotation.start,
        view.annotation.end,
        view.annotation.id
    );
    Ok((StatusCode::CREATED, Json(view)))
}

/// Remove an annotation
///
/// Succeeds for unknown annotation ids so repeated removals are harmless.
async fn remove_annotation(
    State(state): State<AppState>,
    Path((id, annotation_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    let handle = find_session(&state, &id).await?;
    let removed = handle.lock().remove_annotation(&annotation_id);
    if removed.is_none() {
        tracing::debug!("Session {} has no annotation {}", id, annotation_id);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Get the rendered segments
async fn get_segments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SegmentsView>> {
    let handle = find_session(&state, &id).await?;
    let view = {
        let session = handle.lock();
        SegmentsView {
            segments: session.segments().to_vec(),
            revision: session.revision(),
        }
    };
    Ok(Json(view))
}

/// Render the overlay and annotation list as an HTML fragment
async fn render_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let handle = find_session(&state, &id).await?;
    let config = &state.config().highlight;
    let html = {
        let session = handle.lock();
        format!(
            "{}{}",
            render_overlay_html(session.segments(), config),
            render_annotation_list_html(session.annotations(), config)
        )
    };
    Ok(Html(html))
}
