//! Actor-based serialization for the engine
//!
//! This module implements the single-writer pattern using a Tokio actor:
//! one task owns the engine, and a cloneable handle sends one message per
//! *whole* logical operation over a bounded mailbox. Precondition checks,
//! entity mutation, reputation application, and event fan-out all run
//! inside a single actor turn, so no interleaving between concurrent
//! callers can observe or create partial state.

use crate::{
    engine::Engine,
    metrics::{OPERATION_DURATION, OPERATION_TOTAL},
    types::{Answer, AnswerId, Question, QuestionId, User, UserId, Vote, VoteTarget},
    Error, Result,
};
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};

/// Message sent to the engine actor
pub enum EngineMessage {
    /// Register a new user
    CreateUser {
        /// Display name
        name: String,
        /// Response channel
        response: oneshot::Sender<User>,
    },

    /// Ask a new question
    AskQuestion {
        /// Author
        user_id: UserId,
        /// Title
        title: String,
        /// Body text
        body: String,
        /// Raw tags (normalized by the engine)
        tags: Vec<String>,
        /// Response channel
        response: oneshot::Sender<Result<Question>>,
    },

    /// Post an answer
    AnswerQuestion {
        /// Author
        user_id: UserId,
        /// Question being answered
        question_id: QuestionId,
        /// Body text
        body: String,
        /// Response channel
        response: oneshot::Sender<Result<Answer>>,
    },

    /// Cast a vote
    Vote {
        /// Voter
        user_id: UserId,
        /// Target content
        target: VoteTarget,
        /// Upvote (true) or downvote (false)
        up: bool,
        /// Response channel
        response: oneshot::Sender<Result<Vote>>,
    },

    /// Designate an accepted answer
    AcceptAnswer {
        /// Caller (must be the question's author)
        user_id: UserId,
        /// Question
        question_id: QuestionId,
        /// Answer to accept
        answer_id: AnswerId,
        /// Response channel
        response: oneshot::Sender<Result<bool>>,
    },

    /// Search questions by keyword
    Search {
        /// Keyword (case-insensitive substring)
        keyword: String,
        /// Response channel
        response: oneshot::Sender<Vec<Question>>,
    },

    /// Get user by id
    GetUser {
        /// User id
        user_id: UserId,
        /// Response channel
        response: oneshot::Sender<Option<User>>,
    },

    /// Get question by id
    GetQuestion {
        /// Question id
        question_id: QuestionId,
        /// Response channel
        response: oneshot::Sender<Option<Question>>,
    },

    /// Get answer by id
    GetAnswer {
        /// Answer id
        answer_id: AnswerId,
        /// Response channel
        response: oneshot::Sender<Option<Answer>>,
    },

    /// Shutdown actor
    Shutdown,
}

/// Actor that owns the engine and processes messages one at a time
pub struct EngineActor {
    engine: Engine,
    mailbox: mpsc::Receiver<EngineMessage>,
}

impl EngineActor {
    /// Create new actor
    pub fn new(engine: Engine, mailbox: mpsc::Receiver<EngineMessage>) -> Self {
        Self { engine, mailbox }
    }

    /// Run the actor loop until shutdown or all handles are dropped
    pub async fn run(mut self) {
        while let Some(msg) = self.mailbox.recv().await {
            if matches!(msg, EngineMessage::Shutdown) {
                break;
            }
            self.handle_message(msg);
        }
    }

    /// Handle a single message; the engine itself is synchronous
    fn handle_message(&mut self, msg: EngineMessage) {
        match msg {
            EngineMessage::CreateUser { name, response } => {
                let started = Instant::now();
                let user = self.engine.create_user(&name);
                record("create_user", "ok", started);
                let _ = response.send(user);
            }

            EngineMessage::AskQuestion {
                user_id,
                title,
                body,
                tags,
                response,
            } => {
                let started = Instant::now();
                let result = self.engine.ask_question(&user_id, &title, &body, &tags);
                record("ask_question", status_of(&result), started);
                let _ = response.send(result);
            }

            EngineMessage::AnswerQuestion {
                user_id,
                question_id,
                body,
                response,
            } => {
                let started = Instant::now();
                let result = self.engine.answer_question(&user_id, &question_id, &body);
                record("answer_question", status_of(&result), started);
                let _ = response.send(result);
            }

            EngineMessage::Vote {
                user_id,
                target,
                up,
                response,
            } => {
                let started = Instant::now();
                let result = self.engine.vote(&user_id, target, up);
                record("vote", status_of(&result), started);
                let _ = response.send(result);
            }

            EngineMessage::AcceptAnswer {
                user_id,
                question_id,
                answer_id,
                response,
            } => {
                let started = Instant::now();
                let result = self.engine.accept_answer(&user_id, &question_id, &answer_id);
                record("accept_answer", status_of(&result), started);
                let _ = response.send(result);
            }

            EngineMessage::Search { keyword, response } => {
                let started = Instant::now();
                let results = self.engine.search(&keyword);
                record("search", "ok", started);
                let _ = response.send(results);
            }

            EngineMessage::GetUser { user_id, response } => {
                let _ = response.send(self.engine.user(&user_id).cloned());
            }

            EngineMessage::GetQuestion {
                question_id,
                response,
            } => {
                let _ = response.send(self.engine.question(&question_id).cloned());
            }

            EngineMessage::GetAnswer {
                answer_id,
                response,
            } => {
                let _ = response.send(self.engine.answer(&answer_id).cloned());
            }

            EngineMessage::Shutdown => {
                // Handled in main loop
            }
        }
    }
}

fn status_of<T>(result: &Result<T>) -> &'static str {
    if result.is_ok() {
        "ok"
    } else {
        "error"
    }
}

fn record(operation: &str, status: &str, started: Instant) {
    OPERATION_TOTAL
        .with_label_values(&[operation, status])
        .inc();
    OPERATION_DURATION
        .with_label_values(&[operation])
        .observe(started.elapsed().as_secs_f64());
}

/// Handle for sending messages to the actor
#[derive(Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<EngineMessage>,
}

impl EngineHandle {
    /// Create new handle
    pub fn new(sender: mpsc::Sender<EngineMessage>) -> Self {
        Self { sender }
    }

    /// Register a new user
    pub async fn create_user(&self, name: &str) -> Result<User> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(EngineMessage::CreateUser {
                name: name.to_string(),
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Ask a new question
    pub async fn ask_question(
        &self,
        user_id: UserId,
        title: &str,
        body: &str,
        tags: Vec<String>,
    ) -> Result<Question> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(EngineMessage::AskQuestion {
                user_id,
                title: title.to_string(),
                body: body.to_string(),
                tags,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?
    }

    /// Post an answer
    pub async fn answer_question(
        &self,
        user_id: UserId,
        question_id: QuestionId,
        body: &str,
    ) -> Result<Answer> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(EngineMessage::AnswerQuestion {
                user_id,
                question_id,
                body: body.to_string(),
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?
    }

    /// Cast a vote
    pub async fn vote(&self, user_id: UserId, target: VoteTarget, up: bool) -> Result<Vote> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(EngineMessage::Vote {
                user_id,
                target,
                up,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?
    }

    /// Designate an accepted answer
    pub async fn accept_answer(
        &self,
        user_id: UserId,
        question_id: QuestionId,
        answer_id: AnswerId,
    ) -> Result<bool> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(EngineMessage::AcceptAnswer {
                user_id,
                question_id,
                answer_id,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?
    }

    /// Search questions by keyword
    pub async fn search(&self, keyword: &str) -> Result<Vec<Question>> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(EngineMessage::Search {
                keyword: keyword.to_string(),
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Get user by id
    pub async fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(EngineMessage::GetUser {
                user_id,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Get question by id
    pub async fn get_question(&self, question_id: QuestionId) -> Result<Option<Question>> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(EngineMessage::GetQuestion {
                question_id,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Get answer by id
    pub async fn get_answer(&self, answer_id: AnswerId) -> Result<Option<Answer>> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(EngineMessage::GetAnswer {
                answer_id,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Shutdown actor
    pub async fn shutdown(&self) -> Result<()> {
        self.sender
            .send(EngineMessage::Shutdown)
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;
        Ok(())
    }
}

/// Spawn the engine actor
pub fn spawn_engine_actor(engine: Engine, mailbox_capacity: usize) -> EngineHandle {
    let (tx, rx) = mpsc::channel(mailbox_capacity);
    let actor = EngineActor::new(engine, rx);

    tokio::spawn(async move {
        actor.run().await;
    });

    EngineHandle::new(tx)
}
