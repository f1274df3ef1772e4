//! Controller for the Q&A engine
//!
//! The engine is the only component that mutates the entity store or invokes
//! the reputation policy. Every operation validates all of its preconditions
//! before the first mutation, applies the policy's reputation changes, and
//! publishes a domain event last, so failed operations leave no partial
//! state and fire no events.

use crate::{
    store::EntityStore,
    types::{normalize_tags, Answer, AnswerId, Question, QuestionId, User, UserId, Vote, VoteTarget},
    Error, Result,
};
use chrono::Utc;
use event_bus::{DomainEvent, EventBus, EventKind};
use reputation::{AcceptFacts, ReputationChange, ReputationPolicy, TargetKind, VoteFacts};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Q&A engine
///
/// Single-threaded and synchronous; for concurrent callers, wrap it in the
/// actor from [`crate::actor`], which serializes whole operations.
pub struct Engine {
    store: EntityStore,
    policy: Arc<dyn ReputationPolicy>,
    events: EventBus,
}

impl Engine {
    /// Create an engine with the given policy and event bus
    pub fn new(policy: Arc<dyn ReputationPolicy>, events: EventBus) -> Self {
        Self {
            store: EntityStore::new(),
            policy,
            events,
        }
    }

    /// Register a new user
    pub fn create_user(&mut self, name: &str) -> User {
        let user = self.store.create_user(name, Utc::now());
        info!(user_id = %user.id, "user created");

        self.events.publish(&DomainEvent::new(
            EventKind::UserCreated,
            json!({
                "user_id": user.id.as_str(),
                "name": user.name,
            }),
        ));

        user
    }

    /// Ask a new question
    ///
    /// Fails with [`Error::UserNotFound`] if the author is unknown.
    pub fn ask_question(
        &mut self,
        user_id: &UserId,
        title: &str,
        body: &str,
        tags: &[String],
    ) -> Result<Question> {
        if self.store.user(user_id).is_none() {
            return Err(Error::UserNotFound(user_id.to_string()));
        }

        let question =
            self.store
                .create_question(user_id, title, body, normalize_tags(tags), Utc::now());

        if let Some(author) = self.store.user_mut(user_id) {
            author.question_ids.push(question.id.clone());
        }

        info!(question_id = %question.id, author_id = %user_id, "question posted");

        self.events.publish(&DomainEvent::new(
            EventKind::QuestionPosted,
            json!({
                "question_id": question.id.as_str(),
                "author_id": user_id.as_str(),
                "title": question.title,
                "tags": question.tags,
            }),
        ));

        Ok(question)
    }

    /// Post an answer to an open question
    ///
    /// Fails with [`Error::UserNotFound`] / [`Error::QuestionNotFound`] for
    /// unknown ids, and [`Error::InvalidState`] if the question is closed.
    pub fn answer_question(
        &mut self,
        user_id: &UserId,
        question_id: &QuestionId,
        body: &str,
    ) -> Result<Answer> {
        if self.store.user(user_id).is_none() {
            return Err(Error::UserNotFound(user_id.to_string()));
        }
        let question = self
            .store
            .question(question_id)
            .ok_or_else(|| Error::QuestionNotFound(question_id.to_string()))?;
        if !question.is_open() {
            return Err(Error::InvalidState(format!(
                "question {} is not open for answers",
                question_id
            )));
        }

        let answer = self
            .store
            .create_answer(question_id, user_id, body, Utc::now());

        if let Some(question) = self.store.question_mut(question_id) {
            question.answer_ids.push(answer.id.clone());
        }
        if let Some(author) = self.store.user_mut(user_id) {
            author.answer_ids.push(answer.id.clone());
        }

        info!(answer_id = %answer.id, question_id = %question_id, author_id = %user_id, "answer posted");

        self.events.publish(&DomainEvent::new(
            EventKind::AnswerPosted,
            json!({
                "answer_id": answer.id.as_str(),
                "question_id": question_id.as_str(),
                "author_id": user_id.as_str(),
            }),
        ));

        Ok(answer)
    }

    /// Cast a vote on a question or answer
    ///
    /// Fails with a NotFound error if the voter or the target (of the claimed
    /// kind) is unknown; in that case no vote is recorded and no reputation
    /// changes. Repeat votes by the same user on the same target are allowed
    /// and cumulative, and users may vote on their own content.
    pub fn vote(&mut self, user_id: &UserId, target: VoteTarget, up: bool) -> Result<Vote> {
        if self.store.user(user_id).is_none() {
            return Err(Error::UserNotFound(user_id.to_string()));
        }

        let (author_id, kind) = match &target {
            VoteTarget::Question(question_id) => {
                let question = self
                    .store
                    .question(question_id)
                    .ok_or_else(|| Error::QuestionNotFound(question_id.to_string()))?;
                (question.author_id.clone(), TargetKind::Question)
            }
            VoteTarget::Answer(answer_id) => {
                let answer = self
                    .store
                    .answer(answer_id)
                    .ok_or_else(|| Error::AnswerNotFound(answer_id.to_string()))?;
                (answer.author_id.clone(), TargetKind::Answer)
            }
        };

        let value: i64 = if up { 1 } else { -1 };
        let vote = self
            .store
            .create_vote(user_id, target.clone(), value, Utc::now());

        match &target {
            VoteTarget::Question(question_id) => {
                if let Some(question) = self.store.question_mut(question_id) {
                    question.vote_tally += value;
                }
            }
            VoteTarget::Answer(answer_id) => {
                if let Some(answer) = self.store.answer_mut(answer_id) {
                    answer.vote_tally += value;
                }
            }
        }

        let changes = self.policy.assess_vote(&VoteFacts {
            voter: user_id.to_string(),
            author: author_id.to_string(),
            target: kind,
            value,
        });
        self.apply_changes(&changes);

        info!(vote_id = %vote.id, voter_id = %user_id, target = %vote.target.id_str(), value, "vote cast");

        self.events.publish(&DomainEvent::new(
            EventKind::VoteCast,
            json!({
                "vote_id": vote.id.as_str(),
                "voter_id": user_id.as_str(),
                "target_kind": vote.target.kind_str(),
                "target_id": vote.target.id_str(),
                "value": value,
            }),
        ));

        Ok(vote)
    }

    /// Designate a question's accepted answer
    ///
    /// Returns `Ok(true)` and applies the acceptance bonus only when the
    /// answer belongs to the question, the caller authored the question, and
    /// no answer is accepted yet. Guard failures return `Ok(false)` with no
    /// mutation and no event; unknown ids are NotFound errors. The transition
    /// is irreversible and fires at most once per question.
    pub fn accept_answer(
        &mut self,
        user_id: &UserId,
        question_id: &QuestionId,
        answer_id: &AnswerId,
    ) -> Result<bool> {
        if self.store.user(user_id).is_none() {
            return Err(Error::UserNotFound(user_id.to_string()));
        }
        let question = self
            .store
            .question(question_id)
            .ok_or_else(|| Error::QuestionNotFound(question_id.to_string()))?;
        let answer = self
            .store
            .answer(answer_id)
            .ok_or_else(|| Error::AnswerNotFound(answer_id.to_string()))?;

        if answer.question_id != *question_id
            || question.author_id != *user_id
            || question.accepted_answer_id.is_some()
        {
            debug!(question_id = %question_id, answer_id = %answer_id, caller = %user_id, "acceptance rejected");
            return Ok(false);
        }

        let answer_author = answer.author_id.clone();

        if let Some(question) = self.store.question_mut(question_id) {
            question.accepted_answer_id = Some(answer_id.clone());
        }
        if let Some(answer) = self.store.answer_mut(answer_id) {
            answer.accepted = true;
        }

        let changes = self.policy.assess_accept(&AcceptFacts {
            question_author: user_id.to_string(),
            answer_author: answer_author.to_string(),
        });
        self.apply_changes(&changes);

        info!(question_id = %question_id, answer_id = %answer_id, "answer accepted");

        self.events.publish(&DomainEvent::new(
            EventKind::AnswerAccepted,
            json!({
                "question_id": question_id.as_str(),
                "answer_id": answer_id.as_str(),
                "question_author_id": user_id.as_str(),
                "answer_author_id": answer_author.as_str(),
            }),
        ));

        Ok(true)
    }

    /// Case-insensitive substring search over question titles and bodies
    ///
    /// Full scan; matches come back in question creation order.
    pub fn search(&self, keyword: &str) -> Vec<Question> {
        self.store
            .questions_in_order()
            .filter(|q| q.matches_keyword(keyword))
            .cloned()
            .collect()
    }

    /// Get user by id
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.store.user(id)
    }

    /// Get question by id
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.store.question(id)
    }

    /// Get answer by id
    pub fn answer(&self, id: &AnswerId) -> Option<&Answer> {
        self.store.answer(id)
    }

    /// Read access to the underlying store
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Apply policy output to the store
    ///
    /// Each change is applied exactly once; changes naming unknown users are
    /// dropped with a warning rather than failing the operation.
    fn apply_changes(&mut self, changes: &[ReputationChange]) {
        for change in changes {
            let user_id = UserId::new(change.user.clone());
            if self.store.apply_reputation(&user_id, change.delta) {
                debug!(
                    user_id = %change.user,
                    delta = change.delta,
                    reason = change.reason.as_str(),
                    "reputation applied"
                );
            } else {
                warn!(user_id = %change.user, "reputation change for unknown user dropped");
            }
        }
    }
}
