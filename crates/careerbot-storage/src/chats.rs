use tracing::info;
use uuid::Uuid;

use careerbot_core::keys;
use careerbot_core::models::chat::{Chat, ChatMessage};

use crate::documents::{load_json, save_json};
use crate::error::StorageError;
use crate::store::DocumentStore;

/// Store a full transcript as a new snapshot.
///
/// The student id is not checked against the student collection, and earlier
/// snapshots are never touched.
pub async fn insert(
    store: &dyn DocumentStore,
    student_id: Uuid,
    messages: Vec<ChatMessage>,
) -> Result<Chat, StorageError> {
    let chat = Chat {
        id: Uuid::new_v4(),
        student_id,
        messages,
        created_at: jiff::Timestamp::now(),
    };
    save_json(store, &keys::chat(student_id, chat.id), &chat).await?;

    info!(
        student_id = %student_id,
        chat_id = %chat.id,
        message_count = chat.messages.len(),
        "chat snapshot saved"
    );
    Ok(chat)
}

/// All snapshots saved for a student, oldest first.
pub async fn list_for_student(
    store: &dyn DocumentStore,
    student_id: Uuid,
) -> Result<Vec<Chat>, StorageError> {
    let keys = store.list(&keys::student_chats_prefix(student_id)).await?;

    let mut chats = Vec::with_capacity(keys.len());
    for key in &keys {
        let chat: Chat = load_json(store, key).await?;
        chats.push(chat);
    }
    chats.sort_by_key(|c| c.created_at);

    Ok(chats)
}
