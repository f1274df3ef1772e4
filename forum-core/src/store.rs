//! In-memory entity store
//!
//! Holds all users, questions, answers, and votes keyed by per-kind ordinal
//! identifiers, plus an insertion-order index over questions. Create and get
//! only; nothing is ever deleted within the process lifetime.
//!
//! The store carries no interior locking: it is owned exclusively by the
//! engine, which in turn lives inside a single actor task (see [`crate::actor`]),
//! so identifier generation stays race-free.

use crate::types::{
    Answer, AnswerId, Question, QuestionId, QuestionStatus, User, UserId, Vote, VoteId, VoteTarget,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};

/// Entity store for all forum state
#[derive(Debug, Default)]
pub struct EntityStore {
    users: HashMap<UserId, User>,
    questions: HashMap<QuestionId, Question>,
    answers: HashMap<AnswerId, Answer>,
    votes: HashMap<VoteId, Vote>,

    /// Question ids in creation order, for ordered listing and search
    question_order: Vec<QuestionId>,

    next_user: u64,
    next_question: u64,
    next_answer: u64,
    next_vote: u64,
}

impl EntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user with a fresh id
    pub fn create_user(&mut self, name: impl Into<String>, at: DateTime<Utc>) -> User {
        self.next_user += 1;
        let user = User {
            id: UserId::from_ordinal(self.next_user),
            name: name.into(),
            reputation: 0,
            question_ids: Vec::new(),
            answer_ids: Vec::new(),
            created_at: at,
        };
        self.users.insert(user.id.clone(), user.clone());
        user
    }

    /// Create a question with a fresh id
    ///
    /// The caller is responsible for having validated the author and for
    /// appending the question to the author's owned list.
    pub fn create_question(
        &mut self,
        author_id: &UserId,
        title: impl Into<String>,
        body: impl Into<String>,
        tags: BTreeSet<String>,
        at: DateTime<Utc>,
    ) -> Question {
        self.next_question += 1;
        let question = Question {
            id: QuestionId::from_ordinal(self.next_question),
            author_id: author_id.clone(),
            title: title.into(),
            body: body.into(),
            tags,
            answer_ids: Vec::new(),
            vote_tally: 0,
            accepted_answer_id: None,
            status: QuestionStatus::Open,
            created_at: at,
        };
        self.question_order.push(question.id.clone());
        self.questions.insert(question.id.clone(), question.clone());
        question
    }

    /// Create an answer with a fresh id
    ///
    /// The caller is responsible for having validated the author and question
    /// and for appending the answer to both owned lists.
    pub fn create_answer(
        &mut self,
        question_id: &QuestionId,
        author_id: &UserId,
        body: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Answer {
        self.next_answer += 1;
        let answer = Answer {
            id: AnswerId::from_ordinal(self.next_answer),
            question_id: question_id.clone(),
            author_id: author_id.clone(),
            body: body.into(),
            vote_tally: 0,
            accepted: false,
            created_at: at,
        };
        self.answers.insert(answer.id.clone(), answer.clone());
        answer
    }

    /// Record a vote with a fresh id
    ///
    /// The caller is responsible for having validated the voter and target.
    pub fn create_vote(
        &mut self,
        voter_id: &UserId,
        target: VoteTarget,
        value: i64,
        at: DateTime<Utc>,
    ) -> Vote {
        self.next_vote += 1;
        let vote = Vote {
            id: VoteId::from_ordinal(self.next_vote),
            voter_id: voter_id.clone(),
            target,
            value,
            cast_at: at,
        };
        self.votes.insert(vote.id.clone(), vote.clone());
        vote
    }

    /// Get user by id
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Get user by id, mutable
    pub fn user_mut(&mut self, id: &UserId) -> Option<&mut User> {
        self.users.get_mut(id)
    }

    /// Get question by id
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.get(id)
    }

    /// Get question by id, mutable
    pub fn question_mut(&mut self, id: &QuestionId) -> Option<&mut Question> {
        self.questions.get_mut(id)
    }

    /// Get answer by id
    pub fn answer(&self, id: &AnswerId) -> Option<&Answer> {
        self.answers.get(id)
    }

    /// Get answer by id, mutable
    pub fn answer_mut(&mut self, id: &AnswerId) -> Option<&mut Answer> {
        self.answers.get_mut(id)
    }

    /// Get vote by id
    pub fn vote(&self, id: &VoteId) -> Option<&Vote> {
        self.votes.get(id)
    }

    /// Questions in creation order
    pub fn questions_in_order(&self) -> impl Iterator<Item = &Question> {
        self.question_order
            .iter()
            .filter_map(|id| self.questions.get(id))
    }

    /// Apply a reputation delta to a user
    ///
    /// Returns false if the user is unknown, in which case nothing changes.
    pub fn apply_reputation(&mut self, user_id: &UserId, delta: i64) -> bool {
        match self.users.get_mut(user_id) {
            Some(user) => {
                user.reputation += delta;
                true
            }
            None => false,
        }
    }

    /// Number of users
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of questions
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Number of answers
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    /// Number of recorded votes
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }
}
