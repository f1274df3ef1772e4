//! Type definitions for reputation scoring

use serde::{Deserialize, Serialize};

/// Kind of content a vote applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// A question
    Question,
    /// An answer
    Answer,
}

/// Facts about a recorded vote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteFacts {
    /// User who cast the vote
    pub voter: String,

    /// Author of the voted content
    pub author: String,

    /// Kind of content voted on
    pub target: TargetKind,

    /// Signed vote value (+1 or -1)
    pub value: i64,
}

/// Facts about an accepted answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptFacts {
    /// Author of the question doing the accepting
    pub question_author: String,

    /// Author of the accepted answer
    pub answer_author: String,
}

/// Why a reputation change was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeReason {
    /// Upvote received on an owned question
    QuestionUpvoted,
    /// Upvote received on an owned answer
    AnswerUpvoted,
    /// Downvote received on owned content
    DownvoteReceived,
    /// Downvote cast on someone else's content
    DownvoteCast,
    /// Owned answer accepted by the question's author
    AnswerAccepted,
}

impl ChangeReason {
    /// Stable label for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeReason::QuestionUpvoted => "question_upvoted",
            ChangeReason::AnswerUpvoted => "answer_upvoted",
            ChangeReason::DownvoteReceived => "downvote_received",
            ChangeReason::DownvoteCast => "downvote_cast",
            ChangeReason::AnswerAccepted => "answer_accepted",
        }
    }
}

/// A single reputation adjustment for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationChange {
    /// User whose reputation changes
    pub user: String,

    /// Signed delta to apply
    pub delta: i64,

    /// Why the change was made
    pub reason: ChangeReason,
}
