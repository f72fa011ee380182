use std::sync::Arc;

use tracing::{info, warn};

use careerbot_core::models::student::StudentContext;

use crate::client::ChatCompletion;
use crate::error::GatewayError;
use crate::prompt;
use crate::sanitize;

/// Returned when the model answers without any content.
pub const EMPTY_REPLY: &str = "Sorry, I couldn't generate a response.";

/// Turns a student's question into counselor reply text.
pub struct Gateway {
    transport: Arc<dyn ChatCompletion>,
    model: String,
}

impl Gateway {
    pub fn new(transport: Arc<dyn ChatCompletion>, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask one question on behalf of a student.
    ///
    /// Transport failures propagate; a response with no content yields
    /// [`EMPTY_REPLY`]. The reply is sanitized before it is returned.
    pub async fn ask(
        &self,
        context: &StudentContext,
        question: &str,
    ) -> Result<String, GatewayError> {
        let request = prompt::build_request(&self.model, context, question);
        let response = self.transport.complete(&request).await?;

        let raw = match response.first_content() {
            Some(content) => content,
            None => {
                warn!(model = %self.model, "completion had no content");
                EMPTY_REPLY
            }
        };

        let reply = sanitize::clean_reply(raw);
        info!(model = %self.model, reply_len = reply.len(), "completion received");
        Ok(reply)
    }
}
