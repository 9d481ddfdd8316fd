// services/message_service.rs

use tracing::{debug, info};

use crate::{
    error::{AppError, AppResult},
    models::message::{Message, MessageDetail, ReadReceipt},
    repositories::MessageStore,
};

/// True when `caller` sent or received `message`.
pub fn is_participant(caller: &str, message: &MessageDetail) -> bool {
    caller == message.from_username() || caller == message.to_username()
}

/// Fetches a message for one of its participants.
///
/// A missing message surfaces as the store's `NotFound`. Anyone else is
/// refused with `NotParticipant` and never sees the body.
pub async fn get_message(store: &dyn MessageStore, caller: &str, id: i32) -> AppResult<MessageDetail> {
    let message = store.get(id).await?;

    if !is_participant(caller, &message) {
        info!("User {} denied access to message {}", caller, id);
        return Err(AppError::NotParticipant);
    }

    Ok(message)
}

/// Sends `body` from the caller to `to_username`, returning once the message is persisted.
pub async fn send_message(
    store: &dyn MessageStore,
    caller: &str,
    to_username: &str,
    body: &str,
) -> AppResult<Message> {
    let message = store.create(caller, to_username, body).await?;
    debug!("Message {} sent from {} to {}", message.id, caller, to_username);
    Ok(message)
}

/// Marks a message read on behalf of its recipient.
///
/// Non-recipients get `NotRecipient`, which renders as a 404. A second call
/// keeps the first `read_at`.
pub async fn mark_read(store: &dyn MessageStore, caller: &str, id: i32) -> AppResult<ReadReceipt> {
    let message = store.get(id).await?;

    if caller != message.to_username() {
        info!("User {} may not mark message {} as read", caller, id);
        return Err(AppError::NotRecipient(id));
    }

    store.mark_read(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory_repository::MemoryStore;

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_user("alice")
            .with_user("bob")
            .with_user("carol")
    }

    #[tokio::test]
    async fn participants_may_fetch() {
        let store = store();
        let sent = send_message(&store, "alice", "bob", "hi").await.unwrap();

        for caller in ["alice", "bob"] {
            let message = get_message(&store, caller, sent.id).await.unwrap();
            assert_eq!(message.body, "hi");
            assert_eq!(message.from_user.username, "alice");
            assert_eq!(message.to_user.username, "bob");
        }
    }

    #[tokio::test]
    async fn outsiders_are_refused() {
        let store = store();
        let sent = send_message(&store, "alice", "bob", "hi").await.unwrap();

        let err = get_message(&store, "carol", sent.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotParticipant));
    }

    #[tokio::test]
    async fn missing_message_is_not_found_rather_than_unauthorized() {
        let err = get_message(&store(), "carol", 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn message_to_self_is_visible_to_its_author() {
        let store = store();
        let sent = send_message(&store, "alice", "alice", "note").await.unwrap();
        assert!(get_message(&store, "alice", sent.id).await.is_ok());
        assert!(get_message(&store, "bob", sent.id).await.is_err());
    }

    #[tokio::test]
    async fn send_records_sender_recipient_and_time() {
        let message = send_message(&store(), "alice", "bob", "hi").await.unwrap();
        assert_eq!(message.from_username, "alice");
        assert_eq!(message.to_username, "bob");
        assert_eq!(message.body, "hi");
        assert!(message.sent_at <= chrono::Utc::now());
    }

    #[tokio::test]
    async fn send_to_unknown_user_fails() {
        let err = send_message(&store(), "alice", "mallory", "hi").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn send_from_deleted_user_names_the_sender() {
        let err = send_message(&store(), "ghost", "bob", "hi").await.unwrap_err();
        match err {
            AppError::NotFound(message) => assert_eq!(message, "No such user: ghost"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn only_recipient_marks_read() {
        let store = store();
        let sent = send_message(&store, "alice", "bob", "hi").await.unwrap();

        for caller in ["alice", "carol"] {
            let err = mark_read(&store, caller, sent.id).await.unwrap_err();
            assert!(matches!(err, AppError::NotRecipient(_)));
            assert_eq!(store.read_at(sent.id), None);
        }

        let receipt = mark_read(&store, "bob", sent.id).await.unwrap();
        assert_eq!(receipt.id, sent.id);
        assert_eq!(store.read_at(sent.id), Some(receipt.read_at));
    }

    #[tokio::test]
    async fn marking_read_twice_keeps_first_timestamp() {
        let store = store();
        let sent = send_message(&store, "alice", "bob", "hi").await.unwrap();

        let first = mark_read(&store, "bob", sent.id).await.unwrap();
        let second = mark_read(&store, "bob", sent.id).await.unwrap();
        assert_eq!(first.read_at, second.read_at);
    }

    #[tokio::test]
    async fn mark_read_of_missing_message_is_not_found() {
        let err = mark_read(&store(), "bob", 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
