//! Main forum orchestration layer
//!
//! Ties the configuration, reputation policy, event bus, and engine actor
//! into a high-level API. The forum is an explicitly constructed handle:
//! there is no global instance, and independent forums can coexist in one
//! process.
//!
//! # Example
//!
//! ```no_run
//! use forum_core::{Config, Forum};
//!
//! #[tokio::main]
//! async fn main() -> forum_core::Result<()> {
//!     let forum = Forum::open(Config::default()).await?;
//!
//!     let alice = forum.create_user("alice").await?;
//!     let question = forum
//!         .ask_question(alice.id.clone(), "Reverse a list?", "How?", vec![])
//!         .await?;
//!
//!     forum.shutdown().await
//! }
//! ```

use crate::{
    actor::{spawn_engine_actor, EngineHandle},
    engine::Engine,
    types::{Answer, AnswerId, Question, QuestionId, User, UserId, Vote, VoteTarget},
    Config, Result,
};
use event_bus::{EventBus, Subscriber};
use reputation::{ReputationPolicy, StandardPolicy};
use std::sync::Arc;
use tracing::info;

/// Main forum interface
pub struct Forum {
    /// Actor handle for engine operations
    handle: EngineHandle,

    /// Shared event bus (observer registration happens here)
    events: EventBus,

    /// Configuration
    config: Config,
}

impl Forum {
    /// Open a forum with the standard reputation policy
    pub async fn open(config: Config) -> Result<Self> {
        let policy = Arc::new(StandardPolicy::new(config.reputation.clone()));
        Self::open_with_policy(config, policy).await
    }

    /// Open a forum with a custom reputation policy
    pub async fn open_with_policy(
        config: Config,
        policy: Arc<dyn ReputationPolicy>,
    ) -> Result<Self> {
        config.validate()?;

        let events = EventBus::new();
        let engine = Engine::new(policy, events.clone());
        let handle = spawn_engine_actor(engine, config.mailbox_capacity);

        info!(service = %config.service_name, "forum opened");

        Ok(Self {
            handle,
            events,
            config,
        })
    }

    /// Register an event listener
    ///
    /// Listeners receive every subsequent domain event, in registration
    /// order, and cannot block or reject the operations that produce them.
    pub fn add_observer(&self, subscriber: Arc<dyn Subscriber>) {
        self.events.subscribe(subscriber);
    }

    /// Register a new user
    pub async fn create_user(&self, name: &str) -> Result<User> {
        self.handle.create_user(name).await
    }

    /// Ask a new question
    pub async fn ask_question(
        &self,
        user_id: UserId,
        title: &str,
        body: &str,
        tags: Vec<String>,
    ) -> Result<Question> {
        self.handle.ask_question(user_id, title, body, tags).await
    }

    /// Post an answer to an open question
    pub async fn answer_question(
        &self,
        user_id: UserId,
        question_id: QuestionId,
        body: &str,
    ) -> Result<Answer> {
        self.handle.answer_question(user_id, question_id, body).await
    }

    /// Cast a vote on a question or answer
    pub async fn vote(&self, user_id: UserId, target: VoteTarget, up: bool) -> Result<Vote> {
        self.handle.vote(user_id, target, up).await
    }

    /// Designate a question's accepted answer
    ///
    /// Returns false, with no side effects, unless the caller authored the
    /// question, the answer belongs to it, and nothing is accepted yet.
    pub async fn accept_answer(
        &self,
        user_id: UserId,
        question_id: QuestionId,
        answer_id: AnswerId,
    ) -> Result<bool> {
        self.handle
            .accept_answer(user_id, question_id, answer_id)
            .await
    }

    /// Case-insensitive substring search over question titles and bodies
    pub async fn search(&self, keyword: &str) -> Result<Vec<Question>> {
        self.handle.search(keyword).await
    }

    /// Get user by id
    pub async fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
        self.handle.get_user(user_id).await
    }

    /// Get question by id
    pub async fn get_question(&self, question_id: QuestionId) -> Result<Option<Question>> {
        self.handle.get_question(question_id).await
    }

    /// Get answer by id
    pub async fn get_answer(&self, answer_id: AnswerId) -> Result<Option<Answer>> {
        self.handle.get_answer(answer_id).await
    }

    /// Configuration this forum was opened with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shutdown the forum
    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown().await
    }
}
