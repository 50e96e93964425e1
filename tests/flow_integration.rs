//! Integration tests for the screen flow over the SQLite store

use quizterm::app::{FlowController, FlowSettings, Notice, Screen};
use quizterm::config::persistence::ResultsStorage;
use quizterm::store::{QuestionStore, SqliteStore, UserStore};
use tempfile::TempDir;

fn seeded_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store.seed_defaults().unwrap();
    store
}

fn drain<S: UserStore + QuestionStore>(flow: &mut FlowController<S>) -> Vec<Notice> {
    let mut seen = Vec::new();
    while let Some(notice) = flow.notice().cloned() {
        seen.push(notice);
        flow.dismiss_notice();
    }
    seen
}

#[test]
fn test_register_then_login() {
    let mut flow = FlowController::new(seeded_store(), FlowSettings::default());

    flow.register("alice", "pw");
    flow.register("alice", "other");
    let messages: Vec<String> = drain(&mut flow).into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        vec![
            "Registration Successful! Please login.".to_string(),
            "Registration Failed.".to_string()
        ]
    );

    flow.login("alice", "wrong");
    assert_eq!(flow.notice().unwrap().message, "Invalid credentials.");
    flow.dismiss_notice();
    assert_eq!(flow.screen(), &Screen::Login);

    flow.login("alice", "pw");
    assert_eq!(flow.screen().username(), Some("alice"));
    assert_eq!(flow.categories(), &["Maths", "Java", "Python"]);
}

#[test]
fn test_quiz_round_trip_records_result() {
    let temp_dir = TempDir::new().unwrap();
    let results = ResultsStorage::at(temp_dir.path().join("results.json"));
    let store = seeded_store();
    store.register("bob", "pw").unwrap();
    let total = store.questions_for("Java").unwrap().len();

    let mut flow = FlowController::new(store, FlowSettings::default()).with_results(results.clone());
    flow.login("bob", "pw");
    drain(&mut flow);
    flow.select_category("Java");

    let mut notices = Vec::new();
    while flow.session().is_some() {
        flow.answer(0);
        notices.extend(drain(&mut flow));
    }

    let summary = notices.last().unwrap();
    assert_eq!(summary.title, "Quiz Completed!");
    assert!(summary.message.ends_with(&format!("/{}", total)));
    assert!(matches!(flow.screen(), Screen::CategorySelection { .. }));

    let stored = results.recent_for_user("bob", 5).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].category, "Java");
    assert_eq!(stored[0].total, total);

    flow.show_history();
    assert_eq!(flow.history().len(), 1);
}

#[test]
fn test_logout_returns_to_login() {
    let store = seeded_store();
    store.register("carol", "pw").unwrap();
    let mut flow = FlowController::new(store, FlowSettings::default());

    flow.login("carol", "pw");
    flow.logout();
    assert_eq!(flow.screen(), &Screen::Login);

    // quiz input does nothing outside a quiz
    flow.answer(0);
    flow.tick();
    assert!(flow.session().is_none());
}
