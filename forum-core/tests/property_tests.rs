//! Property-based tests for forum invariants
//!
//! These tests use proptest to verify the engine's core guarantees:
//! - Reputation arithmetic: a user's score is exactly the sum of the
//!   per-vote and per-acceptance awards they earned
//! - Single acceptance: at most one answer per question is ever accepted,
//!   and it always matches the question's accepted-answer reference
//! - Search: results are exactly the insertion-ordered linear scan

use event_bus::EventBus;
use forum_core::{AnswerId, Config, Engine, Forum, QuestionId, UserId, VoteTarget};
use proptest::prelude::*;
use reputation::StandardPolicy;
use std::sync::Arc;

fn test_engine() -> Engine {
    Engine::new(Arc::new(StandardPolicy::default()), EventBus::new())
}

/// Fixture: three users, two questions, one answer on each question
///
/// Authorship: alice asks Q1, bob asks Q2, bob answers Q1, carol answers Q2.
struct Fixture {
    engine: Engine,
    users: Vec<UserId>,
    questions: Vec<QuestionId>,
    answers: Vec<AnswerId>,
}

/// Author index (into `users`) per question and per answer
const QUESTION_AUTHOR: [usize; 2] = [0, 1];
const ANSWER_AUTHOR: [usize; 2] = [1, 2];

fn fixture() -> Fixture {
    let mut engine = test_engine();

    let users: Vec<UserId> = ["alice", "bob", "carol"]
        .iter()
        .map(|name| engine.create_user(name).id)
        .collect();

    let q1 = engine
        .ask_question(&users[0], "Reverse a list", "How do I reverse?", &[])
        .unwrap()
        .id;
    let q2 = engine
        .ask_question(&users[1], "Sort a map", "By value?", &[])
        .unwrap()
        .id;

    let a1 = engine.answer_question(&users[1], &q1, "Use slicing").unwrap().id;
    let a2 = engine.answer_question(&users[2], &q2, "Collect pairs").unwrap().id;

    Fixture {
        engine,
        users,
        questions: vec![q1, q2],
        answers: vec![a1, a2],
    }
}

#[derive(Debug, Clone)]
enum VoteOp {
    OnQuestion { voter: usize, question: usize, up: bool },
    OnAnswer { voter: usize, answer: usize, up: bool },
}

fn vote_op_strategy() -> impl Strategy<Value = VoteOp> {
    prop_oneof![
        (0usize..3, 0usize..2, any::<bool>()).prop_map(|(voter, question, up)| {
            VoteOp::OnQuestion { voter, question, up }
        }),
        (0usize..3, 0usize..2, any::<bool>()).prop_map(|(voter, answer, up)| {
            VoteOp::OnAnswer { voter, answer, up }
        }),
    ]
}

/// An `accept_answer` attempt by an arbitrary caller
#[derive(Debug, Clone)]
struct AcceptOp {
    caller: usize,
    question: usize,
    answer: usize,
}

fn accept_op_strategy() -> impl Strategy<Value = AcceptOp> {
    (0usize..3, 0usize..2, 0usize..2).prop_map(|(caller, question, answer)| AcceptOp {
        caller,
        question,
        answer,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: final reputation equals the sum of earned awards, for any
    /// vote sequence
    #[test]
    fn prop_vote_reputation_arithmetic(ops in prop::collection::vec(vote_op_strategy(), 0..40)) {
        let mut fx = fixture();
        let mut expected = vec![0i64; 3];

        for op in &ops {
            match *op {
                VoteOp::OnQuestion { voter, question, up } => {
                    fx.engine
                        .vote(
                            &fx.users[voter],
                            VoteTarget::Question(fx.questions[question].clone()),
                            up,
                        )
                        .unwrap();
                    let author = QUESTION_AUTHOR[question];
                    if up {
                        expected[author] += 10;
                    } else {
                        expected[author] -= 2;
                        expected[voter] -= 1;
                    }
                }
                VoteOp::OnAnswer { voter, answer, up } => {
                    fx.engine
                        .vote(
                            &fx.users[voter],
                            VoteTarget::Answer(fx.answers[answer].clone()),
                            up,
                        )
                        .unwrap();
                    let author = ANSWER_AUTHOR[answer];
                    if up {
                        expected[author] += 15;
                    } else {
                        expected[author] -= 2;
                        expected[voter] -= 1;
                    }
                }
            }
        }

        for (user_id, want) in fx.users.iter().zip(&expected) {
            let got = fx.engine.user(user_id).unwrap().reputation;
            prop_assert_eq!(got, *want);
        }

        prop_assert_eq!(fx.engine.store().vote_count(), ops.len());
    }

    /// Property: vote tallies equal the sum of applied vote values
    #[test]
    fn prop_vote_tallies(ops in prop::collection::vec(vote_op_strategy(), 0..40)) {
        let mut fx = fixture();
        let mut question_tallies = vec![0i64; 2];
        let mut answer_tallies = vec![0i64; 2];

        for op in &ops {
            match *op {
                VoteOp::OnQuestion { voter, question, up } => {
                    fx.engine
                        .vote(
                            &fx.users[voter],
                            VoteTarget::Question(fx.questions[question].clone()),
                            up,
                        )
                        .unwrap();
                    question_tallies[question] += if up { 1 } else { -1 };
                }
                VoteOp::OnAnswer { voter, answer, up } => {
                    fx.engine
                        .vote(
                            &fx.users[voter],
                            VoteTarget::Answer(fx.answers[answer].clone()),
                            up,
                        )
                        .unwrap();
                    answer_tallies[answer] += if up { 1 } else { -1 };
                }
            }
        }

        for (question_id, want) in fx.questions.iter().zip(&question_tallies) {
            prop_assert_eq!(fx.engine.question(question_id).unwrap().vote_tally, *want);
        }
        for (answer_id, want) in fx.answers.iter().zip(&answer_tallies) {
            prop_assert_eq!(fx.engine.answer(answer_id).unwrap().vote_tally, *want);
        }
    }

    /// Property: for any sequence of acceptance attempts, each question ends
    /// with at most one accepted answer, consistent on both sides of the
    /// reference, and the bonus is paid exactly once per acceptance
    #[test]
    fn prop_single_acceptance(ops in prop::collection::vec(accept_op_strategy(), 0..12)) {
        let mut fx = fixture();
        let mut expected_accept: Vec<Option<usize>> = vec![None; 2];
        let mut expected_bonus = vec![0i64; 3];

        for op in &ops {
            let accepted = fx
                .engine
                .accept_answer(
                    &fx.users[op.caller],
                    &fx.questions[op.question],
                    &fx.answers[op.answer],
                )
                .unwrap();

            // The answer belongs to the question only when indexes line up;
            // acceptance additionally needs the right caller and a free slot.
            let valid = op.answer == op.question
                && op.caller == QUESTION_AUTHOR[op.question]
                && expected_accept[op.question].is_none();
            prop_assert_eq!(accepted, valid);

            if valid {
                expected_accept[op.question] = Some(op.answer);
                expected_bonus[ANSWER_AUTHOR[op.answer]] += 30;
            }
        }

        for (question_idx, question_id) in fx.questions.iter().enumerate() {
            let question = fx.engine.question(question_id).unwrap();
            let want = expected_accept[question_idx].map(|a| fx.answers[a].clone());
            prop_assert_eq!(question.accepted_answer_id.clone(), want);
        }

        for (answer_idx, answer_id) in fx.answers.iter().enumerate() {
            let answer = fx.engine.answer(answer_id).unwrap();
            let want = expected_accept[answer_idx] == Some(answer_idx);
            prop_assert_eq!(answer.accepted, want);
            if answer.accepted {
                prop_assert_eq!(
                    fx.engine.question(&answer.question_id).unwrap().accepted_answer_id.clone(),
                    Some(answer_id.clone())
                );
            }
        }

        for (user_id, want) in fx.users.iter().zip(&expected_bonus) {
            prop_assert_eq!(fx.engine.user(user_id).unwrap().reputation, *want);
        }
    }

    /// Property: search equals the insertion-ordered linear scan
    #[test]
    fn prop_search_matches_scan(
        texts in prop::collection::vec(("[a-zA-Z ]{0,12}", "[a-zA-Z ]{0,12}"), 0..10),
        keyword in prop_oneof![Just("rev"), Just("List"), Just("a"), Just("Z")],
    ) {
        let mut engine = test_engine();
        let author = engine.create_user("alice").id;

        let mut ids = Vec::new();
        for (title, body) in &texts {
            ids.push(engine.ask_question(&author, title, body, &[]).unwrap().id);
        }

        let needle = keyword.to_lowercase();
        let expected: Vec<&QuestionId> = texts
            .iter()
            .zip(&ids)
            .filter(|((title, body), _)| {
                title.to_lowercase().contains(&needle) || body.to_lowercase().contains(&needle)
            })
            .map(|(_, id)| id)
            .collect();

        let results = engine.search(keyword);
        let got: Vec<&QuestionId> = results.iter().map(|q| &q.id).collect();
        prop_assert_eq!(got, expected);
    }

    /// Property: repeated upvotes on one answer accumulate linearly
    #[test]
    fn prop_repeat_upvotes_accumulate(count in 1usize..30) {
        let mut fx = fixture();

        for _ in 0..count {
            fx.engine
                .vote(&fx.users[0], VoteTarget::Answer(fx.answers[0].clone()), true)
                .unwrap();
        }

        let author = &fx.users[ANSWER_AUTHOR[0]];
        prop_assert_eq!(fx.engine.user(author).unwrap().reputation, 15 * count as i64);
        prop_assert_eq!(
            fx.engine.answer(&fx.answers[0]).unwrap().vote_tally,
            count as i64
        );
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use event_bus::{DomainEvent, Subscriber};
    use std::sync::Mutex;

    struct CountingSubscriber {
        counts: Mutex<Vec<String>>,
    }

    impl Subscriber for CountingSubscriber {
        fn name(&self) -> &str {
            "counting"
        }

        fn update(&self, event: &DomainEvent) -> event_bus::Result<()> {
            self.counts.lock().unwrap().push(event.name().to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_full_qa_lifecycle() {
        let forum = Forum::open(Config::default()).await.unwrap();
        let subscriber = Arc::new(CountingSubscriber {
            counts: Mutex::new(Vec::new()),
        });
        forum.add_observer(subscriber.clone());

        // Alice asks, Bob answers, Alice upvotes and accepts.
        let alice = forum.create_user("alice").await.unwrap();
        let bob = forum.create_user("bob").await.unwrap();

        let question = forum
            .ask_question(
                alice.id.clone(),
                "Reverse a list?",
                "What is the idiomatic way to reverse a list?",
                vec!["python".to_string(), "lists".to_string()],
            )
            .await
            .unwrap();

        let answer = forum
            .answer_question(bob.id.clone(), question.id.clone(), "Use slicing: lst[::-1]")
            .await
            .unwrap();

        forum
            .vote(alice.id.clone(), VoteTarget::Answer(answer.id.clone()), true)
            .await
            .unwrap();

        let accepted = forum
            .accept_answer(alice.id.clone(), question.id.clone(), answer.id.clone())
            .await
            .unwrap();
        assert!(accepted);

        // Final state matches the reference walkthrough.
        let question = forum
            .get_question(question.id.clone())
            .await
            .unwrap()
            .unwrap();
        let answer = forum.get_answer(answer.id.clone()).await.unwrap().unwrap();
        assert_eq!(question.accepted_answer_id, Some(answer.id.clone()));
        assert!(answer.accepted);

        let bob = forum.get_user(bob.id).await.unwrap().unwrap();
        let alice = forum.get_user(alice.id).await.unwrap().unwrap();
        assert_eq!(bob.reputation, 45);
        assert_eq!(alice.reputation, 0);

        let results = forum.search("reverse").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, question.id);

        forum.shutdown().await.unwrap();

        assert_eq!(
            subscriber.counts.lock().unwrap().clone(),
            vec![
                "user_created",
                "user_created",
                "question_posted",
                "answer_posted",
                "vote_cast",
                "answer_accepted",
            ]
        );
    }

    #[tokio::test]
    async fn test_acceptance_is_irreversible_and_exclusive() {
        let forum = Forum::open(Config::default()).await.unwrap();

        let alice = forum.create_user("alice").await.unwrap();
        let bob = forum.create_user("bob").await.unwrap();
        let question = forum
            .ask_question(alice.id.clone(), "t", "b", vec![])
            .await
            .unwrap();
        let first = forum
            .answer_question(bob.id.clone(), question.id.clone(), "first")
            .await
            .unwrap();
        let second = forum
            .answer_question(bob.id.clone(), question.id.clone(), "second")
            .await
            .unwrap();

        assert!(forum
            .accept_answer(alice.id.clone(), question.id.clone(), first.id.clone())
            .await
            .unwrap());
        assert!(!forum
            .accept_answer(alice.id.clone(), question.id.clone(), second.id.clone())
            .await
            .unwrap());

        let bob = forum.get_user(bob.id).await.unwrap().unwrap();
        assert_eq!(bob.reputation, 30);

        forum.shutdown().await.unwrap();
    }
}
