use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::clients::gateway::{DiagnosticQuestion, GatewayError};
use crate::search::keywords::query_tokens;

/// Monotonic tag for an in-flight question fetch. A completion carrying a
/// stale token (the session was reset or re-fetched meanwhile) is discarded
/// instead of being applied to state it no longer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    AwaitingAnswers,
    Resolved,
}

/// What a completed fetch turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Questions available, session now awaits answers.
    QuestionsReady,
    /// Gateway produced no questions; normal outcome, search proceeds
    /// without clarification and no notification is warranted.
    NoQuestions,
    /// Gateway failed; search still proceeds, but the failure is worth a
    /// user-visible notice.
    Failed(String),
    /// Stale token, response discarded.
    Superseded,
}

/// Lifecycle of one clarifying-question dialog:
/// `Idle -> Loading -> AwaitingAnswers -> Resolved`, with
/// `Loading -> Idle` when the fetch returns nothing or fails. All state is
/// per user search session; nothing here is persisted.
#[derive(Debug, Clone)]
pub struct QuestionSession {
    state: SessionState,
    pending_query: String,
    questions: Vec<DiagnosticQuestion>,
    answers: HashMap<String, String>,
    fetch_counter: u64,
    opened_at: Instant,
}

impl Default for QuestionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            pending_query: String::new(),
            questions: Vec::new(),
            answers: HashMap::new(),
            fetch_counter: 0,
            opened_at: Instant::now(),
        }
    }

    /// A session past its time budget. An abandoned dialog never resolves
    /// on its own, so holders of a session collection use this to evict
    /// entries nobody will come back for.
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.opened_at.elapsed() >= ttl
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn pending_query(&self) -> &str {
        &self.pending_query
    }

    #[must_use]
    pub fn questions(&self) -> &[DiagnosticQuestion] {
        &self.questions
    }

    /// Start a fetch for `query`. Clears any previous answers and returns
    /// the token the eventual completion must present.
    pub fn begin_fetch(&mut self, query: &str) -> FetchToken {
        self.state = SessionState::Loading;
        self.pending_query = query.to_string();
        self.questions.clear();
        self.answers.clear();
        self.fetch_counter += 1;
        FetchToken(self.fetch_counter)
    }

    /// Apply the result of the fetch tagged `token`.
    pub fn complete_fetch(
        &mut self,
        token: FetchToken,
        result: Result<Vec<DiagnosticQuestion>, GatewayError>,
    ) -> FetchOutcome {
        if token.0 != self.fetch_counter || self.state != SessionState::Loading {
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(questions) if !questions.is_empty() => {
                self.questions = questions;
                self.state = SessionState::AwaitingAnswers;
                FetchOutcome::QuestionsReady
            }
            Ok(_) => {
                self.state = SessionState::Idle;
                FetchOutcome::NoQuestions
            }
            Err(err) => {
                self.state = SessionState::Idle;
                FetchOutcome::Failed(err.to_string())
            }
        }
    }

    /// Record one answer. Overwrites any prior answer for the same question;
    /// ignored outside `AwaitingAnswers`.
    pub fn set_answer(&mut self, question_id: &str, value: &str) {
        if self.state == SessionState::AwaitingAnswers {
            self.answers
                .insert(question_id.to_string(), value.to_string());
        }
    }

    /// Resolve the session using whatever answers exist. Base tokens of the
    /// pending query come first; each answered question contributes the
    /// tokens of its selected option label, skipping duplicates, in
    /// question order.
    pub fn proceed_with_search(&mut self) -> Vec<String> {
        let mut keywords = query_tokens(&self.pending_query);

        for question in &self.questions {
            let Some(value) = self.answers.get(&question.id) else {
                continue;
            };
            let Some(option) = question.options.iter().find(|opt| opt.value == *value) else {
                continue;
            };
            for word in query_tokens(&option.label) {
                if !keywords.contains(&word) {
                    keywords.push(word);
                }
            }
        }

        self.state = SessionState::Resolved;
        keywords
    }

    /// Resolve without using any answers; keywords come from the original
    /// query alone.
    pub fn skip_questions(&mut self) -> Vec<String> {
        self.state = SessionState::Resolved;
        query_tokens(&self.pending_query)
    }

    /// Back to `Idle`, dropping questions and answers. Bumps the fetch
    /// counter so an in-flight completion lands as `Superseded`.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.pending_query.clear();
        self.questions.clear();
        self.answers.clear();
        self.fetch_counter += 1;
    }
}
