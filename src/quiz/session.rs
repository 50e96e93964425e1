//! Quiz session state machine
//!
//! One user's run through the questions of a category. Answer selection
//! and timeout both go through [`QuizSession::advance`]; the countdown only
//! decides *when* a timeout advance happens.

use crate::models::Question;
use crate::{QuizError, Result, DEFAULT_QUESTION_SECONDS};

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Showing the question at this index and accepting one answer
    Presenting(usize),
    /// All questions answered or timed out
    Completed,
}

/// Result of advancing past one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Index of the question that was just closed
    pub question_index: usize,
    /// Option chosen by the user, `None` on timeout
    pub selected: Option<usize>,
    /// Whether the chosen option was the right one
    pub correct: bool,
    /// Text of the right answer, for feedback
    pub correct_answer: String,
    /// State the session moved into
    pub next: SessionState,
}

impl Outcome {
    pub fn timed_out(&self) -> bool {
        self.selected.is_none()
    }

    /// Feedback line shown after the question closes
    pub fn feedback(&self) -> String {
        if self.correct {
            "Correct!".to_string()
        } else if self.timed_out() {
            format!("Time's up! The correct answer is: {}", self.correct_answer)
        } else {
            format!("Incorrect! The correct answer is: {}", self.correct_answer)
        }
    }
}

/// Active quiz session
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    category: String,
    username: String,
    questions: Vec<Question>,
    state: SessionState,
    score: usize,
    time_limit: u32,
    time_left: u32,
    answers: Vec<Option<usize>>,
}

impl QuizSession {
    /// Start a session with the default 15 second limit per question
    pub fn new(category: impl Into<String>, username: impl Into<String>, questions: Vec<Question>) -> Self {
        Self::with_time_limit(category, username, questions, DEFAULT_QUESTION_SECONDS)
    }

    /// Start a session; an empty question list is completed immediately
    pub fn with_time_limit(
        category: impl Into<String>,
        username: impl Into<String>,
        questions: Vec<Question>,
        time_limit: u32,
    ) -> Self {
        let time_limit = time_limit.max(1);
        let (state, time_left) = if questions.is_empty() {
            (SessionState::Completed, 0)
        } else {
            (SessionState::Presenting(0), time_limit)
        };

        Self {
            category: category.into(),
            username: username.into(),
            answers: Vec::with_capacity(questions.len()),
            questions,
            state,
            score: 0,
            time_limit,
            time_left,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Number of questions in the session
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    /// Presentation hint: the countdown is at or below `threshold`
    pub fn is_warning(&self, threshold: u32) -> bool {
        !self.is_completed() && self.time_left <= threshold
    }

    /// Index of the question being presented
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::Presenting(i) => Some(i),
            SessionState::Completed => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|i| self.questions.get(i))
    }

    /// Selections so far, one entry per closed question (`None` = timeout)
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    /// Close the current question with an optional selection.
    ///
    /// A selection that is not an option of the current question is
    /// rejected without touching the session.
    pub fn advance(&mut self, selected: Option<usize>) -> Result<Outcome> {
        let index = self.current_index().ok_or(QuizError::SessionCompleted)?;
        let question = &self.questions[index];

        if let Some(choice) = selected {
            if choice >= question.option_count() {
                return Err(QuizError::InvalidOption {
                    index: choice,
                    count: question.option_count(),
                });
            }
        }

        let correct = selected.map_or(false, |choice| question.is_correct(choice));
        let correct_answer = question.correct_option_text().to_string();
        if correct {
            self.score += 1;
        }
        self.answers.push(selected);

        let next_index = index + 1;
        if next_index == self.questions.len() {
            self.state = SessionState::Completed;
            self.time_left = 0;
        } else {
            self.state = SessionState::Presenting(next_index);
            self.time_left = self.time_limit;
        }

        Ok(Outcome {
            question_index: index,
            selected,
            correct,
            correct_answer,
            next: self.state,
        })
    }

    /// One second elapsed on the current question.
    ///
    /// Returns the timeout outcome when the countdown reaches zero.
    pub fn tick(&mut self) -> Result<Option<Outcome>> {
        if self.is_completed() {
            return Err(QuizError::SessionCompleted);
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            return self.advance(None).map(Some);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize) -> Question {
        Question::new(
            format!("q{}", correct),
            vec!["a".into(), "b".into(), "c".into()],
            correct,
        )
        .unwrap()
    }

    fn maths_session() -> QuizSession {
        QuizSession::new("Maths", "alice", vec![question(1), question(0), question(2)])
    }

    #[test]
    fn test_initial_state() {
        let session = maths_session();
        assert_eq!(session.state(), SessionState::Presenting(0));
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_left(), 15);
        assert_eq!(session.total(), 3);
        assert_eq!(session.category(), "Maths");
        assert_eq!(session.username(), "alice");
    }

    #[test]
    fn test_all_correct() {
        let mut session = maths_session();
        for choice in [1, 0, 2] {
            assert!(session.advance(Some(choice)).unwrap().correct);
        }
        assert!(session.is_completed());
        assert_eq!(session.score(), 3);
    }

    #[test]
    fn test_partial_score() {
        let mut session = maths_session();
        for choice in [0, 0, 0] {
            session.advance(Some(choice)).unwrap();
        }
        assert_eq!(session.score(), 1);
        assert_eq!(session.answers(), &[Some(0), Some(0), Some(0)]);
    }

    #[test]
    fn test_indices_visited_once_in_order() {
        let mut session = maths_session();
        let mut visited = Vec::new();
        while let Some(i) = session.current_index() {
            visited.push(i);
            let outcome = session.advance(None).unwrap();
            assert_eq!(outcome.question_index, i);
        }
        assert_eq!(visited, vec![0, 1, 2]);
    }

    #[test]
    fn test_timeout_after_fifteen_ticks() {
        let mut session = maths_session();
        for _ in 0..14 {
            assert!(session.tick().unwrap().is_none());
        }
        assert_eq!(session.time_left(), 1);
        let outcome = session.tick().unwrap().expect("timeout expected");
        assert!(outcome.timed_out());
        assert!(!outcome.correct);
        assert_eq!(outcome.next, SessionState::Presenting(1));
        assert_eq!(session.time_left(), 15);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_countdown_resets_after_answer() {
        let mut session = maths_session();
        session.tick().unwrap();
        session.tick().unwrap();
        assert_eq!(session.time_left(), 13);
        session.advance(Some(1)).unwrap();
        assert_eq!(session.time_left(), 15);
    }

    #[test]
    fn test_warning_threshold() {
        let mut session = maths_session();
        assert!(!session.is_warning(5));
        for _ in 0..10 {
            session.tick().unwrap();
        }
        assert_eq!(session.time_left(), 5);
        assert!(session.is_warning(5));
    }

    #[test]
    fn test_invalid_option_rejected_without_mutation() {
        let mut session = maths_session();
        let err = session.advance(Some(3)).unwrap_err();
        assert!(matches!(err, QuizError::InvalidOption { index: 3, count: 3 }));
        assert_eq!(session.state(), SessionState::Presenting(0));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_completed_is_terminal() {
        let mut session = QuizSession::new("Maths", "alice", vec![question(0)]);
        session.advance(Some(0)).unwrap();
        assert!(matches!(session.advance(Some(0)), Err(QuizError::SessionCompleted)));
        assert!(matches!(session.tick(), Err(QuizError::SessionCompleted)));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_empty_session_completes_immediately() {
        let session = QuizSession::new("Empty", "alice", Vec::new());
        assert!(session.is_completed());
        assert_eq!(session.score(), 0);
        assert_eq!(session.total(), 0);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_feedback_messages() {
        let mut session = maths_session();
        assert_eq!(session.advance(Some(1)).unwrap().feedback(), "Correct!");
        assert_eq!(
            session.advance(Some(2)).unwrap().feedback(),
            "Incorrect! The correct answer is: a"
        );
        assert_eq!(
            session.advance(None).unwrap().feedback(),
            "Time's up! The correct answer is: c"
        );
    }

    #[test]
    fn test_custom_time_limit() {
        let mut session = QuizSession::with_time_limit("Maths", "alice", vec![question(0)], 2);
        assert_eq!(session.time_left(), 2);
        assert!(session.tick().unwrap().is_none());
        assert!(session.tick().unwrap().is_some());
        assert!(session.is_completed());
    }
}
