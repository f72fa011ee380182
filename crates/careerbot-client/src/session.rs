//! Per-student chat session.
//!
//! A [`Session`] is created once registration (or resume) succeeds and is
//! consumed by [`Session::sign_out`]. It owns the transcript and the chat
//! widget state:
//!
//! ```text
//! Closed -> Empty -> Greeted -> Conversing
//! ```
//!
//! Closing the widget keeps the transcript, so reopening returns to the
//! state it was in.

use std::sync::Arc;

use tracing::warn;

use careerbot_core::models::chat::{ChatRole, ChatTurn};
use careerbot_core::models::student::{Student, StudentContext};

use crate::api::CareerApi;
use crate::persist::SaveQueue;
use crate::prompts::Prompt;

/// Assistant turn appended when the chat call fails.
pub const ERROR_TURN: &str = "Sorry, I'm having trouble connecting. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    /// Open with nothing in the transcript.
    Empty,
    /// Open, holding only assistant turns.
    Greeted,
    /// Open with at least one user turn.
    Conversing,
}

pub fn prompt_greeting(student: &Student) -> String {
    format!(
        "Hello {}! 👋 I'm your career guidance assistant. I see you're interested in {}. Let's get started!",
        student.name, student.interests
    )
}

pub fn toggle_greeting(student: &Student) -> String {
    format!(
        "Hello {}! 👋 I'm your career guidance assistant. How can I help you today?",
        student.name
    )
}

pub struct Session {
    student: Student,
    context: StudentContext,
    transcript: Vec<ChatTurn>,
    open: bool,
    /// Question sent but not yet answered.
    pending: Option<String>,
    rendered: usize,
    api: Arc<dyn CareerApi>,
    saves: SaveQueue,
}

impl Session {
    pub fn new(student: Student, api: Arc<dyn CareerApi>, saves: SaveQueue) -> Self {
        Self {
            context: StudentContext::from(&student),
            student,
            transcript: Vec::new(),
            open: false,
            pending: None,
            rendered: 0,
            api,
            saves,
        }
    }

    pub fn student(&self) -> &Student {
        &self.student
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True between [`begin_send`](Self::begin_send) and
    /// [`complete_send`](Self::complete_send).
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn state(&self) -> SessionState {
        if !self.open {
            SessionState::Closed
        } else if self.transcript.is_empty() {
            SessionState::Empty
        } else if self.transcript.iter().any(|t| t.role == ChatRole::User) {
            SessionState::Conversing
        } else {
            SessionState::Greeted
        }
    }

    /// Open or close the widget. Opening onto an empty transcript adds the
    /// plain greeting. Returns whether the widget is now open.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        if self.open && self.transcript.is_empty() {
            let greeting = toggle_greeting(&self.student);
            self.transcript.push(ChatTurn::assistant(greeting));
        }
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Open the widget and post a predefined question. The interests
    /// greeting is added first if the transcript is empty. Finish with
    /// [`complete_send`](Self::complete_send).
    pub fn begin_prompt(&mut self, prompt: &Prompt) -> bool {
        self.open = true;
        if self.transcript.is_empty() {
            let greeting = prompt_greeting(&self.student);
            self.transcript.push(ChatTurn::assistant(greeting));
        }
        self.begin_send(prompt.prompt)
    }

    /// [`begin_prompt`](Self::begin_prompt) followed by the reply.
    pub async fn open_with_prompt(&mut self, prompt: &Prompt) -> bool {
        if !self.begin_prompt(prompt) {
            return false;
        }
        self.complete_send().await;
        true
    }

    /// Post a user turn and mark the session as loading.
    ///
    /// Blank input is ignored and returns `false`, as does a second message
    /// while one is still unanswered.
    pub fn begin_send(&mut self, text: &str) -> bool {
        if text.trim().is_empty() || self.pending.is_some() {
            return false;
        }

        self.transcript.push(ChatTurn::user(text));
        self.pending = Some(text.to_string());
        true
    }

    /// Ask the pending question and append the reply, or [`ERROR_TURN`] if
    /// the call fails. Loading is cleared and the whole transcript is queued
    /// for saving. Does nothing when no question is pending.
    pub async fn complete_send(&mut self) {
        let Some(question) = self.pending.as_deref() else {
            return;
        };

        let reply = match self.api.chat(question, &self.context).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "chat request failed");
                ERROR_TURN.to_string()
            }
        };
        self.transcript.push(ChatTurn::assistant(reply));
        self.pending = None;

        if !self.saves.enqueue(self.student.id, self.transcript.clone()) {
            warn!(student_id = %self.student.id, "save queue closed; transcript not saved");
        }
    }

    /// Send one message and wait for the reply. Returns `false` if the input
    /// was ignored.
    pub async fn send(&mut self, text: &str) -> bool {
        if !self.begin_send(text) {
            return false;
        }
        self.complete_send().await;
        true
    }

    /// Transcript entries added since the last call.
    pub fn unseen(&mut self) -> &[ChatTurn] {
        let start = self.rendered;
        self.rendered = self.transcript.len();
        &self.transcript[start..]
    }

    /// End the session, returning the transcript. Drops this session's
    /// handle on the save queue.
    pub fn sign_out(self) -> Vec<ChatTurn> {
        self.transcript
    }
}
