//! Core entity types for the forum
//!
//! Identifiers are per-kind ordinal strings (`"U1"`, `"Q1"`, `"A1"`, `"V1"`),
//! assigned monotonically by the entity store. All entities are plain data;
//! every mutation goes through the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// User identifier (`"U" + ordinal`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create from an existing identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for the given ordinal
    pub fn from_ordinal(ordinal: u64) -> Self {
        Self(format!("U{}", ordinal))
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Question identifier (`"Q" + ordinal`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(String);

impl QuestionId {
    /// Create from an existing identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for the given ordinal
    pub fn from_ordinal(ordinal: u64) -> Self {
        Self(format!("Q{}", ordinal))
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Answer identifier (`"A" + ordinal`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerId(String);

impl AnswerId {
    /// Create from an existing identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for the given ordinal
    pub fn from_ordinal(ordinal: u64) -> Self {
        Self(format!("A{}", ordinal))
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vote identifier (`"V" + ordinal`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteId(String);

impl VoteId {
    /// Create from an existing identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for the given ordinal
    pub fn from_ordinal(ordinal: u64) -> Self {
        Self(format!("V{}", ordinal))
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered forum member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Accumulated reputation score (may go negative)
    pub reputation: i64,

    /// Questions asked by this user, in creation order
    pub question_ids: Vec<QuestionId>,

    /// Answers posted by this user, in creation order
    pub answer_ids: Vec<AnswerId>,

    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

/// Question lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionStatus {
    /// Accepting answers
    Open,
    /// No longer accepting answers
    Closed,
}

/// A question asked by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique question ID
    pub id: QuestionId,

    /// Author
    pub author_id: UserId,

    /// Title
    pub title: String,

    /// Body text
    pub body: String,

    /// Normalized classification tags (lowercased, duplicates collapsed)
    pub tags: BTreeSet<String>,

    /// Answers in insertion order
    pub answer_ids: Vec<AnswerId>,

    /// Sum of applied vote values
    pub vote_tally: i64,

    /// The single answer the author designated as the solution
    pub accepted_answer_id: Option<AnswerId>,

    /// Lifecycle status
    pub status: QuestionStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Whether the question accepts new answers
    pub fn is_open(&self) -> bool {
        self.status == QuestionStatus::Open
    }

    /// Case-insensitive substring match against title or body
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.body.to_lowercase().contains(&needle)
    }
}

/// Normalize raw tags into set form: lowercased, trimmed, empties dropped
pub fn normalize_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// An answer posted to a question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Unique answer ID
    pub id: AnswerId,

    /// Owning question
    pub question_id: QuestionId,

    /// Author
    pub author_id: UserId,

    /// Body text
    pub body: String,

    /// Sum of applied vote values
    pub vote_tally: i64,

    /// Mirrors the owning question's accepted-answer reference
    pub accepted: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// The content a vote applies to, by kind and id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteTarget {
    /// Vote on a question
    Question(QuestionId),
    /// Vote on an answer
    Answer(AnswerId),
}

impl VoteTarget {
    /// Target kind label for logs and event payloads
    pub fn kind_str(&self) -> &'static str {
        match self {
            VoteTarget::Question(_) => "question",
            VoteTarget::Answer(_) => "answer",
        }
    }

    /// Target identifier as a string
    pub fn id_str(&self) -> &str {
        match self {
            VoteTarget::Question(id) => id.as_str(),
            VoteTarget::Answer(id) => id.as_str(),
        }
    }
}

/// Immutable record of a cast vote
///
/// Votes are never mutated or retracted; repeat votes by the same user on
/// the same target each produce a fresh record with cumulative effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    /// Unique vote ID
    pub id: VoteId,

    /// User who cast the vote
    pub voter_id: UserId,

    /// Target content
    pub target: VoteTarget,

    /// +1 for an upvote, -1 for a downvote
    pub value: i64,

    /// When the vote was cast
    pub cast_at: DateTime<Utc>,
}
