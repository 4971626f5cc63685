//! Chat service driving a session against the answer backend.
//!
//! The session lives behind an async mutex that is never held across the
//! network await. Overlapping sends are independent: each appends its own
//! user entry up front and its own answer or error entry on completion.

use std::sync::Arc;

use ragdesk_types::error::{ClientError, ValidationError};
use ragdesk_types::message::Message;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::client::RemoteClient;

use super::session::{ChatSession, SessionSnapshot};
use super::transcript::TranscriptEvent;

/// User-facing text for a failed ask, appended as an agent message.
pub fn error_notice(err: &ClientError) -> String {
    match err {
        ClientError::Server { code } => {
            format!("Error: no answer received. (code: {code})")
        }
        ClientError::EmptyResponse => "Error: the server sent an empty answer.".to_string(),
        ClientError::Transport(_) => "Connection failed: cannot reach the server.".to_string(),
        other => format!("Error: {other}"),
    }
}

/// Orchestrates the send flow for one chat session.
///
/// Generic over `RemoteClient` so tests can run without a backend.
pub struct ChatService<R: RemoteClient> {
    client: Arc<R>,
    session: Mutex<ChatSession>,
}

impl<R: RemoteClient> ChatService<R> {
    /// Create a service with a session started in `initial_context`.
    pub fn new(client: Arc<R>, initial_context: Option<&str>) -> Self {
        Self {
            client,
            session: Mutex::new(ChatSession::start(initial_context)),
        }
    }

    /// Send a query and record the outcome in the transcript.
    ///
    /// Blank queries are rejected with `ValidationError::EmptyQuery` before
    /// anything is appended or sent. Otherwise the user message is appended,
    /// the backend is asked under the context active at submit time, and
    /// either the answer or an error notice is appended. The returned result
    /// is the backend outcome.
    pub async fn send(&self, query: &str) -> Result<Message, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::EmptyQuery.into());
        }

        let context = {
            let mut session = self.session.lock().await;
            session.append_user(query);
            session.active_context().map(ToString::to_string)
        };

        debug!(query_len = query.len(), context = ?context, "Sending query");
        let outcome = self.client.ask(query, context.as_deref()).await;

        let mut session = self.session.lock().await;
        match outcome {
            Ok(answer) => {
                info!(answer_len = answer.len(), context = ?context, "Answer received");
                Ok(session.append_agent(answer))
            }
            Err(err) => {
                warn!(error = %err, context = ?context, "Query failed");
                session.append_agent(error_notice(&err));
                Err(err)
            }
        }
    }

    /// Switch context, resetting the transcript. Returns the welcome message.
    pub async fn set_context(&self, name: Option<&str>) -> Message {
        let mut session = self.session.lock().await;
        let welcome = session.set_context(name);
        info!(context = ?session.active_context(), "Context switched");
        welcome
    }

    pub async fn active_context(&self) -> Option<String> {
        self.session
            .lock()
            .await
            .active_context()
            .map(ToString::to_string)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Receive transcript change notifications.
    pub async fn subscribe(&self) -> broadcast::Receiver<TranscriptEvent> {
        self.session.lock().await.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ragdesk_types::manual::{ManualFile, UploadConfirmation};
    use ragdesk_types::message::Origin;

    use crate::chat::session::welcome_text;

    struct MockClient {
        reply: Result<String, ClientError>,
        calls: AtomicUsize,
        seen: std::sync::Mutex<Vec<(String, Option<String>)>>,
    }

    impl MockClient {
        fn answering(answer: &str) -> Self {
            Self::with_reply(Ok(answer.to_string()))
        }

        fn with_reply(reply: Result<String, ClientError>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RemoteClient for MockClient {
        async fn ask(&self, query: &str, context: Option<&str>) -> Result<String, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen
                .lock()
                .unwrap()
                .push((query.to_string(), context.map(ToString::to_string)));
            self.reply.clone()
        }

        async fn register_manual(
            &self,
            _context_name: &str,
            _file: ManualFile,
        ) -> Result<UploadConfirmation, ClientError> {
            unreachable!("chat tests never upload")
        }
    }

    #[tokio::test]
    async fn send_appends_user_then_answer() {
        let client = Arc::new(MockClient::answering("Paris"));
        let service = ChatService::new(client.clone(), None);

        let answer = service.send("What is the capital of France?").await.unwrap();
        assert_eq!(answer.text(), "Paris");
        assert_eq!(answer.origin(), Origin::Agent);

        let snapshot = service.snapshot().await;
        let texts: Vec<&str> = snapshot.messages.iter().map(|m| m.text()).collect();
        assert_eq!(
            texts,
            vec![
                welcome_text(None).as_str(),
                "What is the capital of France?",
                "Paris"
            ]
        );
        assert_eq!(snapshot.messages[1].origin(), Origin::User);

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen[0], ("What is the capital of France?".to_string(), None));
    }

    #[tokio::test]
    async fn send_passes_active_context() {
        let client = Arc::new(MockClient::answering("ok"));
        let service = ChatService::new(client.clone(), Some("Acme"));

        service.send("x").await.unwrap();

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen[0].1.as_deref(), Some("Acme"));
    }

    #[tokio::test]
    async fn server_error_appends_notice_with_code() {
        let client = Arc::new(MockClient::with_reply(Err(ClientError::Server { code: 500 })));
        let service = ChatService::new(client, Some("Acme"));

        let err = service.send("x").await.unwrap_err();
        assert_eq!(err, ClientError::Server { code: 500 });

        let snapshot = service.snapshot().await;
        let last = snapshot.messages.last().unwrap();
        assert_eq!(last.origin(), Origin::Agent);
        assert!(last.text().contains("500"));
    }

    #[tokio::test]
    async fn transport_error_appends_connection_notice() {
        let client = Arc::new(MockClient::with_reply(Err(ClientError::Transport(
            "connection refused".to_string(),
        ))));
        let service = ChatService::new(client, None);

        assert!(service.send("x").await.is_err());

        let snapshot = service.snapshot().await;
        assert_eq!(
            snapshot.messages.last().unwrap().text(),
            error_notice(&ClientError::Transport(String::new()))
        );
    }

    #[tokio::test]
    async fn empty_query_is_rejected_without_network_call() {
        let client = Arc::new(MockClient::answering("unused"));
        let service = ChatService::new(client.clone(), Some("Acme"));

        let err = service.send("   ").await.unwrap_err();
        assert_eq!(err, ClientError::Validation(ValidationError::EmptyQuery));
        assert_eq!(client.call_count(), 0);
        assert_eq!(service.snapshot().await.messages.len(), 1);
    }

    #[tokio::test]
    async fn set_context_resets_transcript() {
        let client = Arc::new(MockClient::answering("a"));
        let service = ChatService::new(client, Some("Acme"));
        service.send("q1").await.unwrap();
        service.send("q2").await.unwrap();

        let welcome = service.set_context(Some("Globex")).await;

        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.messages, vec![welcome]);
        assert_eq!(service.active_context().await.as_deref(), Some("Globex"));
    }

    #[tokio::test]
    async fn overlapping_sends_each_append_their_pair() {
        let client = Arc::new(MockClient::answering("a"));
        let service = Arc::new(ChatService::new(client.clone(), None));

        let mut handles = Vec::new();
        for i in 0..8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.send(&format!("q{i}")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.messages.len(), 1 + 8 * 2);
        assert_eq!(client.call_count(), 8);
        let users = snapshot.messages.iter().filter(|m| m.is_user()).count();
        assert_eq!(users, 8);
    }

    #[tokio::test]
    async fn subscribers_see_send_insertions() {
        let client = Arc::new(MockClient::answering("a"));
        let service = ChatService::new(client, None);
        let mut rx = service.subscribe().await;

        service.send("q").await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), TranscriptEvent::Inserted { index: 1 });
        assert_eq!(rx.recv().await.unwrap(), TranscriptEvent::Inserted { index: 2 });
    }
}
