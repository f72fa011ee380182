//! Background transcript saves.
//!
//! The session hands each transcript snapshot to a [`SaveQueue`] and moves
//! on. A single worker task sends them to the API in enqueue order and
//! reports every result on the [`SaveWorker`] outcome channel.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use careerbot_core::models::chat::ChatTurn;

use crate::api::CareerApi;

struct SaveJob {
    student_id: Uuid,
    messages: Vec<ChatTurn>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { message_count: usize },
    Failed { message_count: usize, error: String },
}

#[derive(Clone)]
pub struct SaveQueue {
    jobs: mpsc::UnboundedSender<SaveJob>,
}

impl SaveQueue {
    /// Queue a snapshot. Returns `false` if the worker has stopped.
    pub fn enqueue(&self, student_id: Uuid, messages: Vec<ChatTurn>) -> bool {
        self.jobs
            .send(SaveJob {
                student_id,
                messages,
            })
            .is_ok()
    }
}

pub struct SaveWorker {
    outcomes: mpsc::UnboundedReceiver<SaveOutcome>,
    handle: JoinHandle<()>,
}

impl SaveWorker {
    /// Wait for the next finished save.
    pub async fn next_outcome(&mut self) -> Option<SaveOutcome> {
        self.outcomes.recv().await
    }

    /// Wait for every queued save to finish and return the outcomes not yet
    /// taken with [`next_outcome`](Self::next_outcome).
    ///
    /// The worker only stops once every [`SaveQueue`] clone is dropped.
    pub async fn finish(mut self) -> Vec<SaveOutcome> {
        if let Err(e) = (&mut self.handle).await {
            warn!(error = %e, "save worker did not shut down cleanly");
        }

        let mut rest = Vec::new();
        while let Ok(outcome) = self.outcomes.try_recv() {
            rest.push(outcome);
        }
        rest
    }
}

/// Start the save worker on the current runtime.
pub fn spawn(api: Arc<dyn CareerApi>) -> (SaveQueue, SaveWorker) {
    let (jobs_tx, mut jobs_rx) = mpsc::unbounded_channel::<SaveJob>();
    let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        while let Some(job) = jobs_rx.recv().await {
            let message_count = job.messages.len();
            let outcome = match api.save_chat(job.student_id, &job.messages).await {
                Ok(()) => {
                    debug!(student_id = %job.student_id, message_count, "transcript saved");
                    SaveOutcome::Saved { message_count }
                }
                Err(e) => {
                    warn!(student_id = %job.student_id, message_count, error = %e, "transcript save failed");
                    SaveOutcome::Failed {
                        message_count,
                        error: e.to_string(),
                    }
                }
            };
            // Nobody listening is fine.
            let _ = outcomes_tx.send(outcome);
        }
    });

    (
        SaveQueue { jobs: jobs_tx },
        SaveWorker {
            outcomes: outcomes_rx,
            handle,
        },
    )
}
