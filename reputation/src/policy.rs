//! Reputation scoring policies

use crate::types::{AcceptFacts, ChangeReason, ReputationChange, TargetKind, VoteFacts};
use serde::{Deserialize, Serialize};

/// Scoring weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationConfig {
    /// Awarded to a question's author per upvote received
    pub question_upvote: i64,

    /// Awarded to an answer's author per upvote received
    pub answer_upvote: i64,

    /// Applied to the author per downvote received, either content kind (negative)
    pub downvote_author_penalty: i64,

    /// Applied to the voter per downvote they cast (negative)
    pub downvote_voter_cost: i64,

    /// Awarded to an answer's author when the answer is accepted
    pub accept_bonus: i64,
}

impl Default for ReputationConfig {
    fn default() -> Self {
        Self {
            question_upvote: 10,
            answer_upvote: 15,
            downvote_author_penalty: -2,
            downvote_voter_cost: -1,
            accept_bonus: 30,
        }
    }
}

/// Strategy mapping domain facts to reputation changes
///
/// Implementations are pure: they decide every delta but apply none of them.
/// The caller owns application, which keeps a single component responsible
/// for all entity mutation.
pub trait ReputationPolicy: Send + Sync {
    /// Changes for a recorded vote
    fn assess_vote(&self, vote: &VoteFacts) -> Vec<ReputationChange>;

    /// Changes for an accepted answer
    fn assess_accept(&self, accept: &AcceptFacts) -> Vec<ReputationChange>;
}

/// Default scoring policy
pub struct StandardPolicy {
    config: ReputationConfig,
}

impl StandardPolicy {
    /// Create policy with the given weights
    pub fn new(config: ReputationConfig) -> Self {
        Self { config }
    }

    /// Current weights
    pub fn config(&self) -> &ReputationConfig {
        &self.config
    }
}

impl Default for StandardPolicy {
    fn default() -> Self {
        Self::new(ReputationConfig::default())
    }
}

impl ReputationPolicy for StandardPolicy {
    fn assess_vote(&self, vote: &VoteFacts) -> Vec<ReputationChange> {
        if vote.value > 0 {
            let (delta, reason) = match vote.target {
                TargetKind::Question => (self.config.question_upvote, ChangeReason::QuestionUpvoted),
                TargetKind::Answer => (self.config.answer_upvote, ChangeReason::AnswerUpvoted),
            };
            vec![ReputationChange {
                user: vote.author.clone(),
                delta,
                reason,
            }]
        } else {
            // Downvotes tax the voter as well as the author, discouraging
            // casual downvoting.
            vec![
                ReputationChange {
                    user: vote.author.clone(),
                    delta: self.config.downvote_author_penalty,
                    reason: ChangeReason::DownvoteReceived,
                },
                ReputationChange {
                    user: vote.voter.clone(),
                    delta: self.config.downvote_voter_cost,
                    reason: ChangeReason::DownvoteCast,
                },
            ]
        }
    }

    fn assess_accept(&self, accept: &AcceptFacts) -> Vec<ReputationChange> {
        vec![ReputationChange {
            user: accept.answer_author.clone(),
            delta: self.config.accept_bonus,
            reason: ChangeReason::AnswerAccepted,
        }]
    }
}
