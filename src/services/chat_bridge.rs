use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use metrics::counter;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::metrics::record_upstream;

pub const NO_RESPONSE: &str = "No response";
pub const CONNECTION_ERROR: &str = "Connection Error (Check Server/SSL)";
/// Messages kept for display; the oldest are dropped first.
pub const TRANSCRIPT_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("a question is already in flight")]
    Busy,
}

#[derive(Debug, Error)]
enum AnswerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: ChatRole,
    pub text: String,
    pub error: bool,
}

#[derive(Serialize)]
struct QuestionBody<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct AnswerBody {
    #[serde(default)]
    answer: Option<String>,
}

/// Clears the in-flight flag however the request ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Forwards single questions to the remote answerer. Each question goes out
/// alone; the transcript is only kept for display and is never replayed.
/// One question may be outstanding at a time.
#[derive(Debug)]
pub struct ChatBridge {
    http: reqwest::Client,
    endpoint: String,
    transcript: Mutex<VecDeque<ChatMessage>>,
    in_flight: AtomicBool,
    next_id: AtomicU64,
}

impl ChatBridge {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            transcript: Mutex::new(VecDeque::with_capacity(TRANSCRIPT_LEN)),
            in_flight: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.lock().await.iter().cloned().collect()
    }

    /// Ask one question. Blank input is ignored (`Ok(None)`): no request, no
    /// transcript entry. Otherwise the user message and the reply are appended
    /// together once the request settles, and the reply is returned. A caller
    /// that gives up mid-request leaves the transcript untouched.
    pub async fn ask(&self, question: &str) -> Result<Option<ChatMessage>, ChatError> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ChatError::Busy);
        }
        let _in_flight = InFlight(&self.in_flight);

        counter!("chat_questions_total").increment(1);
        let asked = self.message(ChatRole::User, question.to_string(), false);

        let started = Instant::now();
        let result = self.request_answer(question).await;
        record_upstream("chat", started, result.is_ok());

        let reply = match result {
            Ok(Some(answer)) if !answer.is_empty() => self.message(ChatRole::Bot, answer, false),
            Ok(_) => self.message(ChatRole::Bot, NO_RESPONSE.into(), false),
            Err(e) => {
                tracing::warn!(error = %e, endpoint = %self.endpoint, "Chat request failed");
                self.message(ChatRole::Bot, CONNECTION_ERROR.into(), true)
            }
        };
        self.append([asked, reply.clone()]).await;
        Ok(Some(reply))
    }

    async fn request_answer(&self, question: &str) -> Result<Option<String>, AnswerError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&QuestionBody { question })
            .send()
            .await?
            .error_for_status()?;

        let body: AnswerBody = resp.json().await?;
        Ok(body.answer)
    }

    fn message(&self, role: ChatRole, text: String, error: bool) -> ChatMessage {
        ChatMessage {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            role,
            text,
            error,
        }
    }

    async fn append(&self, messages: impl IntoIterator<Item = ChatMessage>) {
        let mut transcript = self.transcript.lock().await;
        for message in messages {
            if transcript.len() == TRANSCRIPT_LEN {
                transcript.pop_front();
            }
            transcript.push_back(message);
        }
    }
}
