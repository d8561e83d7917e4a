//! Two-party messaging threads.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::{Role, User};

/// A private conversation between exactly two participants.
/// Threads are ordered by last activity, most recent first.
#[derive(Debug, Clone, Serialize)]
pub struct Thread {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A message inside a thread. Messages are ordered by creation time.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// The other side of a conversation, without contact details — those stay
/// behind the paywall.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Participant {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub role: Role,
}

impl From<User> for Participant {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name(),
            role: user.role,
        }
    }
}

/// API payload for a message
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(msg: Message) -> Self {
        Self {
            id: msg.id,
            sender_id: msg.sender_id,
            content: msg.content,
            is_read: msg.is_read,
            created_at: msg.created_at,
        }
    }
}

/// Inbox row: thread + the other participant + preview
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ThreadSummary {
    pub id: Uuid,
    pub other: Participant,
    pub last_message: Option<MessageResponse>,
    pub unread_count: u64,
    pub updated_at: DateTime<Utc>,
}

/// Full thread payload returned when a participant opens it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ThreadDetail {
    pub id: Uuid,
    pub other: Participant,
    pub messages: Vec<MessageResponse>,
}
