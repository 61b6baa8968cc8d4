//! Cancellation from inside a running session

use parking_lot::Mutex;
use ragline_core::config::ApiConfig;
use ragline_core::{
    CancelHandle, ChatMode, Message, SessionController, SessionOutcome, StreamObserver,
    StreamRequest,
};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records callbacks and cancels the session on the first chunk
#[derive(Clone, Default)]
struct CancellingObserver {
    events: Arc<Mutex<Vec<String>>>,
    handle: Arc<Mutex<Option<CancelHandle>>>,
}

impl StreamObserver for CancellingObserver {
    fn on_chunk(&mut self, message: &Message) {
        self.events.lock().push(format!("chunk:{}", message.content));
        if let Some(handle) = self.handle.lock().as_ref() {
            handle.cancel();
        }
    }

    fn on_done(&mut self, message: Message) {
        self.events.lock().push(format!("done:{}", message.content));
    }

    fn on_error(&mut self, error: String, _message: Message) {
        self.events.lock().push(format!("error:{}", error));
    }
}

#[tokio::test]
async fn test_cancel_suppresses_buffered_frames() {
    let mock_server = MockServer::start().await;
    let body: String = (0..50)
        .map(|i| format!("data: {{\"type\":\"chunk\",\"content\":\"{} \"}}\n", i))
        .chain(std::iter::once("data: [DONE]\n".to_string()))
        .collect();
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&mock_server)
        .await;

    let http = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to create HTTP client");
    let controller = SessionController::with_client(http, ApiConfig::new(mock_server.uri()));
    let observer = CancellingObserver::default();
    let session = controller.start(
        StreamRequest::new("q", "openai", "gpt-4o-mini", ChatMode::Chat),
        observer.clone(),
    );
    *observer.handle.lock() = Some(session.cancel_handle());

    assert_eq!(session.wait().await, SessionOutcome::Cancelled);
    assert_eq!(*observer.events.lock(), vec!["chunk:0 ".to_string()]);
}
