//! Stream session controller
//!
//! Owns the lifecycle of one streamed question: it issues the request, runs
//! the decode/parse/reduce pipeline on a tokio task, and hands the caller a
//! cancellation capability.

use super::observer::StreamObserver;
use super::pipeline::{Guarded, SessionOutcome, run_pipeline};
use crate::api::error_body::error_message;
use crate::config::ApiConfig;
use crate::error::{RaglineError, RaglineResult};
use crate::types::ChatMode;
use reqwest::Client;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

/// A question to stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRequest {
    pub question: String,
    pub provider: String,
    pub model: String,
    pub mode: ChatMode,
}

impl StreamRequest {
    pub fn new(
        question: impl Into<String>,
        provider: impl Into<String>,
        model: impl Into<String>,
        mode: ChatMode,
    ) -> Self {
        Self {
            question: question.into(),
            provider: provider.into(),
            model: model.into(),
            mode,
        }
    }
}

#[derive(Serialize)]
struct RequestBody<'a> {
    question: &'a str,
    provider: &'a str,
    model: &'a str,
}

/// Cancels a running session. Cloning shares the same session.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Abort the session. Idempotent; a no-op once the session has finished.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Handle to a session started by [`SessionController::start`]
#[derive(Debug)]
pub struct StreamSession {
    id: Uuid,
    cancel: CancelHandle,
    task: JoinHandle<SessionOutcome>,
}

impl StreamSession {
    /// Session id used in logs
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// A cancellation capability that can outlive this handle
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Abort the session
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the session to end
    pub async fn wait(self) -> SessionOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => SessionOutcome::Cancelled,
            Err(e) => {
                tracing::error!("Session task failed: {}", e);
                SessionOutcome::Failed {
                    error: e.to_string(),
                    message: crate::types::Message::assistant(format!("Error: {}", e)),
                }
            }
        }
    }
}

/// Starts streaming sessions against the backend
#[derive(Debug, Clone)]
pub struct SessionController {
    http: Client,
    config: ApiConfig,
}

impl SessionController {
    /// Create a controller with its own HTTP client.
    ///
    /// Only the connect timeout is applied; a streamed answer may take as long
    /// as the backend needs.
    pub fn new(config: ApiConfig) -> RaglineResult<Self> {
        config.validate()?;
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| RaglineError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http, config })
    }

    /// Create a controller around an existing HTTP client
    pub fn with_client(http: Client, config: ApiConfig) -> Self {
        Self { http, config }
    }

    /// Endpoint that serves `mode`
    pub fn endpoint(&self, mode: ChatMode) -> String {
        match mode {
            ChatMode::Chat => self.config.url(&self.config.chat_path),
            ChatMode::Agent => self.config.url(&self.config.agent_path),
        }
    }

    /// Start streaming `request`, reporting to `observer`.
    ///
    /// Issues exactly one request. The question is sent as given; rejecting
    /// empty input is up to the caller. Must be called within a tokio runtime.
    pub fn start<O>(&self, request: StreamRequest, observer: O) -> StreamSession
    where
        O: StreamObserver + 'static,
    {
        let id = Uuid::new_v4();
        let token = CancellationToken::new();
        let span = info_span!(
            "stream_session",
            session_id = %id,
            mode = %request.mode,
            provider = %request.provider,
            model = %request.model,
        );

        let task = tokio::spawn(
            run_session(
                self.http.clone(),
                self.endpoint(request.mode),
                request,
                observer,
                token.clone(),
            )
            .instrument(span),
        );

        StreamSession {
            id,
            cancel: CancelHandle { token },
            task,
        }
    }
}

fn failure_fallback(mode: ChatMode) -> &'static str {
    match mode {
        ChatMode::Chat => "Chat failed",
        ChatMode::Agent => "Agent failed",
    }
}

async fn run_session<O>(
    http: Client,
    url: String,
    request: StreamRequest,
    mut observer: O,
    token: CancellationToken,
) -> SessionOutcome
where
    O: StreamObserver,
{
    debug!("Opening stream to {}", url);
    let body = RequestBody {
        question: &request.question,
        provider: &request.provider,
        model: &request.model,
    };
    let send = http.post(&url).json(&body).send();

    let response = tokio::select! {
        biased;
        _ = token.cancelled() => {
            debug!("Session cancelled before the response arrived");
            return SessionOutcome::Cancelled;
        }
        response = send => response,
    };

    let mut guarded = Guarded::new(&mut observer, &token);

    let response = match response {
        Ok(response) => response,
        Err(e) => return guarded.fail(RaglineError::from(e).user_message()),
    };

    let status = response.status();
    if !status.is_success() {
        let error = tokio::select! {
            biased;
            _ = token.cancelled() => return SessionOutcome::Cancelled,
            error = error_message(response, failure_fallback(request.mode)) => error,
        };
        debug!("Backend rejected the request with status {}", status);
        return guarded.fail(error);
    }

    if response.content_length() == Some(0) {
        debug!("Response has no body, ending session");
        return SessionOutcome::NoBody;
    }

    drop(guarded);
    let outcome = run_pipeline(
        response.bytes_stream(),
        request.mode,
        &mut observer,
        &token,
    )
    .await;
    debug!("Session finished: {}", outcome_label(&outcome));
    outcome
}

fn outcome_label(outcome: &SessionOutcome) -> &'static str {
    match outcome {
        SessionOutcome::Completed(_) => "completed",
        SessionOutcome::Failed { .. } => "failed",
        SessionOutcome::Cancelled => "cancelled",
        SessionOutcome::NoBody => "no body",
    }
}
