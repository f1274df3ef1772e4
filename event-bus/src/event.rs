//! Domain event envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of domain event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A user registered
    UserCreated,
    /// A question was asked
    QuestionPosted,
    /// An answer was posted to an open question
    AnswerPosted,
    /// A vote was recorded against a question or answer
    VoteCast,
    /// A question's author designated an accepted answer
    AnswerAccepted,
}

impl EventKind {
    /// Stable event name delivered to subscribers
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::UserCreated => "user_created",
            EventKind::QuestionPosted => "question_posted",
            EventKind::AnswerPosted => "answer_posted",
            EventKind::VoteCast => "vote_cast",
            EventKind::AnswerAccepted => "answer_accepted",
        }
    }
}

/// Domain event envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Event ID (UUIDv7 for ordering)
    pub id: Uuid,

    /// Event kind
    pub kind: EventKind,

    /// Payload of identifiers and names relevant to the event
    pub payload: serde_json::Value,

    /// When the event occurred
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent {
    /// Create new event
    pub fn new(kind: EventKind, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::now_v7(),
            kind,
            payload,
            occurred_at: Utc::now(),
        }
    }

    /// Event name delivered to subscribers
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_names() {
        assert_eq!(EventKind::UserCreated.name(), "user_created");
        assert_eq!(EventKind::QuestionPosted.name(), "question_posted");
        assert_eq!(EventKind::AnswerPosted.name(), "answer_posted");
        assert_eq!(EventKind::VoteCast.name(), "vote_cast");
        assert_eq!(EventKind::AnswerAccepted.name(), "answer_accepted");
    }

    #[test]
    fn test_event_creation() {
        let event = DomainEvent::new(EventKind::VoteCast, json!({"target_id": "A1", "value": 1}));

        assert_eq!(event.kind, EventKind::VoteCast);
        assert_eq!(event.name(), "vote_cast");
        assert_eq!(event.payload["target_id"], "A1");
        assert_eq!(event.payload["value"], 1);
    }
}
