//! Screen flow controller
//!
//! Owns which screen is visible and turns user intents (login, register,
//! pick a category, answer) into store calls and session transitions.
//! Store failures never escape: they are logged and shown as a notice.

use std::collections::{HashMap, VecDeque};

use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, error, info, warn};

use crate::app::state::{Notice, Screen};
use crate::auth::validate_credentials;
use crate::config::persistence::ResultsStorage;
use crate::config::QuizConfig;
use crate::error::{is_store_failure, user_friendly_message};
use crate::models::QuizResult;
use crate::quiz::{Countdown, Outcome, QuizSession, SessionState};
use crate::store::{QuestionStore, UserStore};
use crate::{QuizError, DEFAULT_QUESTION_SECONDS};

/// Number of past results shown on the history screen
pub const HISTORY_LENGTH: usize = 20;

/// Quiz behaviour knobs taken from the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSettings {
    pub question_seconds: u32,
    pub shuffle_questions: bool,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            question_seconds: DEFAULT_QUESTION_SECONDS,
            shuffle_questions: false,
        }
    }
}

impl From<&QuizConfig> for FlowSettings {
    fn from(config: &QuizConfig) -> Self {
        Self {
            question_seconds: config.question_seconds,
            shuffle_questions: config.shuffle_questions,
        }
    }
}

/// Screen flow controller over an injected store
pub struct FlowController<S> {
    store: S,
    results: Option<ResultsStorage>,
    settings: FlowSettings,
    screen: Screen,
    categories: Vec<String>,
    best_scores: HashMap<String, QuizResult>,
    history: Vec<QuizResult>,
    notices: VecDeque<Notice>,
    countdown: Countdown,
    should_quit: bool,
}

impl<S: UserStore + QuestionStore> FlowController<S> {
    /// Create a controller showing the login screen
    pub fn new(store: S, settings: FlowSettings) -> Self {
        Self {
            store,
            results: None,
            settings,
            screen: Screen::Login,
            categories: Vec::new(),
            best_scores: HashMap::new(),
            history: Vec::new(),
            notices: VecDeque::new(),
            countdown: Countdown::default(),
            should_quit: false,
        }
    }

    /// Record completed quizzes into this results file
    pub fn with_results(mut self, results: ResultsStorage) -> Self {
        self.results = Some(results);
        self
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Active session, if the quiz screen is shown
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.screen {
            Screen::Quiz(session) => Some(session),
            _ => None,
        }
    }

    /// Categories offered on the selection screen
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Best recorded result of the current user in a category
    pub fn best_score(&self, category: &str) -> Option<&QuizResult> {
        self.best_scores.get(category)
    }

    /// Results listed on the history screen, newest first
    pub fn history(&self) -> &[QuizResult] {
        &self.history
    }

    /// Notice currently displayed as a modal dialog
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    #[cfg(test)]
    pub fn pending_notices(&self) -> usize {
        self.notices.len()
    }

    /// Close the displayed notice
    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        info!(screen = self.screen.name(), "quit requested");
        self.countdown.stop();
        self.should_quit = true;
    }

    /// Authenticate and move to category selection on success
    pub fn login(&mut self, username: &str, password: &str) {
        if self.screen != Screen::Login {
            warn!(screen = self.screen.name(), "login ignored outside login screen");
            return;
        }

        match self.store.authenticate(username, password) {
            Ok(true) => {
                info!(username, "login succeeded");
                self.notices
                    .push_back(Notice::success("Login", "Login Successful!"));
                self.enter_category_selection(username.to_string());
            }
            Ok(false) => {
                info!(username, "login rejected");
                self.notices
                    .push_back(Notice::error("Login", "Invalid credentials."));
            }
            Err(e) => self.report_store_failure("Login", "authenticate", &e),
        }
    }

    /// Create an account; the user stays on the login screen either way
    pub fn register(&mut self, username: &str, password: &str) {
        if self.screen != Screen::Login {
            warn!(screen = self.screen.name(), "register ignored outside login screen");
            return;
        }

        let result = validate_credentials(username, password)
            .and_then(|_| self.store.register(username, password));

        match result {
            Ok(()) => {
                info!(username, "user registered");
                self.notices.push_back(Notice::success(
                    "Register",
                    "Registration Successful! Please login.",
                ));
            }
            Err(e) => {
                if is_store_failure(&e) {
                    error!(username, error = %e, "registration failed");
                } else {
                    info!(username, error = %e, "registration rejected");
                }
                self.notices
                    .push_back(Notice::error("Register", "Registration Failed."));
            }
        }
    }

    /// Start a quiz over the questions of `category`
    pub fn select_category(&mut self, category: &str) {
        let username = match &self.screen {
            Screen::CategorySelection { username } => username.clone(),
            other => {
                warn!(screen = other.name(), "category selection ignored");
                return;
            }
        };

        let mut questions = match self.store.questions_for(category) {
            Ok(questions) => questions,
            Err(e) => {
                self.report_store_failure("Quiz", "questions_for", &e);
                return;
            }
        };

        if self.settings.shuffle_questions {
            questions.shuffle(&mut SmallRng::from_entropy());
        }

        info!(username, category, questions = questions.len(), "quiz started");
        let session = QuizSession::with_time_limit(
            category,
            username,
            questions,
            self.settings.question_seconds,
        );

        if session.is_completed() {
            self.finish(session);
        } else {
            self.screen = Screen::Quiz(session);
            self.countdown.start();
        }
    }

    /// Answer the current question with a zero-based option index
    pub fn answer(&mut self, option: usize) {
        if !self.notices.is_empty() {
            debug!("answer ignored while a notice is open");
            return;
        }

        let outcome = match &mut self.screen {
            Screen::Quiz(session) => {
                let Some(count) = session.current_question().map(|q| q.option_count()) else {
                    return;
                };
                if option >= count {
                    debug!(option, count, "ignoring out-of-range option");
                    return;
                }
                self.countdown.stop();
                session.advance(Some(option))
            }
            _ => return,
        };

        self.apply(outcome);
    }

    /// One second elapsed on the current question
    pub fn tick(&mut self) {
        if !self.notices.is_empty() {
            return;
        }

        let outcome = match &mut self.screen {
            Screen::Quiz(session) => match session.tick() {
                Ok(Some(outcome)) => Ok(outcome),
                Ok(None) => return,
                Err(e) => Err(e),
            },
            _ => return,
        };

        self.countdown.stop();
        self.apply(outcome);
    }

    /// Feed elapsed wall-clock seconds into the session.
    ///
    /// The countdown only runs while a question is on screen with no
    /// dialog open; it restarts with a full second once the dialog closes.
    pub fn poll_timer(&mut self) {
        let presenting = matches!(
            &self.screen,
            Screen::Quiz(session) if !session.is_completed()
        );

        if !presenting || !self.notices.is_empty() {
            self.countdown.stop();
            return;
        }

        if !self.countdown.is_running() {
            self.countdown.start();
            return;
        }

        for _ in 0..self.countdown.due_ticks() {
            self.tick();
            if !self.countdown.is_running() {
                break;
            }
        }
    }

    /// Return to the login screen
    pub fn logout(&mut self) {
        match &self.screen {
            Screen::CategorySelection { username } | Screen::History { username } => {
                info!(username = username.as_str(), "logged out");
                self.screen = Screen::Login;
                self.categories.clear();
                self.best_scores.clear();
                self.history.clear();
            }
            other => debug!(screen = other.name(), "logout ignored"),
        }
    }

    /// Open the history screen for the logged-in user
    pub fn show_history(&mut self) {
        let Screen::CategorySelection { username } = &self.screen else {
            return;
        };
        let username = username.clone();

        self.history = match &self.results {
            Some(results) => match results.recent_for_user(&username, HISTORY_LENGTH) {
                Ok(history) => history,
                Err(e) => {
                    error!(error = %e, "failed to load results history");
                    self.notices
                        .push_back(Notice::error("History", user_friendly_message(&e)));
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        self.screen = Screen::History { username };
    }

    /// Step back one screen: history -> categories -> login
    pub fn back(&mut self) {
        match &self.screen {
            Screen::History { username } => {
                let username = username.clone();
                self.enter_category_selection(username);
            }
            Screen::CategorySelection { .. } => self.logout(),
            _ => {}
        }
    }

    fn apply(&mut self, outcome: crate::Result<Outcome>) {
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "session refused transition");
                return;
            }
        };

        debug!(
            question = outcome.question_index,
            selected = ?outcome.selected,
            correct = outcome.correct,
            "question closed"
        );

        let notice = if outcome.correct {
            Notice::success("Answer", outcome.feedback())
        } else {
            Notice::error("Answer", outcome.feedback())
        };
        self.notices.push_back(notice);

        if outcome.next == SessionState::Completed {
            let screen = std::mem::replace(&mut self.screen, Screen::Login);
            match screen {
                Screen::Quiz(session) => self.finish(session),
                other => self.screen = other,
            }
        }
    }

    fn finish(&mut self, session: QuizSession) {
        self.countdown.stop();
        let result = QuizResult::new(
            session.username(),
            session.category(),
            session.score(),
            session.total(),
        );
        info!(
            username = result.username.as_str(),
            category = result.category.as_str(),
            score = result.score,
            total = result.total,
            "quiz completed"
        );

        self.notices.push_back(Notice::info(
            "Quiz Completed!",
            format!("Score: {}/{}", result.score, result.total),
        ));

        if let Some(results) = &self.results {
            if let Err(e) = results.append_result(result.clone()) {
                error!(error = %e, "failed to record quiz result");
                self.notices
                    .push_back(Notice::error("Results", user_friendly_message(&e)));
            }
        }

        self.enter_category_selection(result.username);
    }

    fn enter_category_selection(&mut self, username: String) {
        let categories = match self.store.categories() {
            Ok(categories) => categories,
            Err(e) => {
                self.report_store_failure("Categories", "categories", &e);
                Vec::new()
            }
        };
        self.categories = categories;

        self.best_scores.clear();
        if let Some(results) = &self.results {
            for category in &self.categories {
                match results.best_for(&username, category) {
                    Ok(Some(best)) => {
                        self.best_scores.insert(category.clone(), best);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(error = %e, "failed to read best scores");
                        break;
                    }
                }
            }
        }

        self.screen = Screen::CategorySelection { username };
    }

    fn report_store_failure(&mut self, title: &str, operation: &str, err: &QuizError) {
        error!(operation, error = %err, "store call failed");
        self.notices
            .push_back(Notice::error(title, user_friendly_message(err)));
    }
}
