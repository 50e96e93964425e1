//! Main application controller
//!
//! Wires the terminal, the screen components and the flow controller
//! together and runs the draw/input loop.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::info;

use crate::{
    app::{
        flow::FlowController,
        screens::{render_notice, CategoryScreen, HistoryScreen, LoginAction, LoginScreen, QuizScreen},
        state::{NavigationAction, Screen},
        tui::Tui,
    },
    store::{QuestionStore, UserStore},
    Result,
};

/// TUI application controller
pub struct App<S> {
    /// Terminal UI handler
    tui: Tui,
    /// Screen flow and quiz state
    flow: FlowController<S>,
    /// Countdown value at which the timer turns red
    warning_threshold: u32,
    /// Screen components
    login_screen: LoginScreen,
    category_screen: CategoryScreen,
    quiz_screen: QuizScreen,
    history_screen: HistoryScreen,
}

impl<S: UserStore + QuestionStore> App<S> {
    /// Create a new application instance
    pub fn new(flow: FlowController<S>, warning_threshold: u32) -> Result<Self> {
        Ok(Self {
            tui: Tui::new()?,
            flow,
            warning_threshold,
            login_screen: LoginScreen::new(),
            category_screen: CategoryScreen::new(),
            quiz_screen: QuizScreen::new(),
            history_screen: HistoryScreen::default(),
        })
    }

    /// Initialize the application and TUI
    pub fn init(&mut self) -> Result<()> {
        self.tui.init()
    }

    /// Put the terminal back the way it was found
    pub fn restore(&mut self) -> Result<()> {
        self.tui.restore()
    }

    /// Set up the terminal, run the loop and always restore the terminal
    pub async fn start(&mut self) -> Result<()> {
        let outcome = match self.init() {
            Ok(()) => self.run().await,
            Err(e) => Err(e),
        };
        first_error(outcome, self.restore())
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        info!("event loop started");
        while !self.flow.should_quit() {
            self.flow.poll_timer();
            self.draw()?;
            self.handle_events().await?;
        }
        info!("event loop finished");
        Ok(())
    }

    /// Draw the current screen with any open notice on top
    fn draw(&mut self) -> Result<()> {
        let flow = &self.flow;
        let login_screen = &self.login_screen;
        let category_screen = &mut self.category_screen;
        let quiz_screen = &mut self.quiz_screen;
        let history_screen = &mut self.history_screen;
        let warning_threshold = self.warning_threshold;

        self.tui.draw(|f| {
            match flow.screen() {
                Screen::Login => login_screen.render(f),
                Screen::CategorySelection { username } => {
                    let categories = flow.categories();
                    let best: Vec<_> = categories.iter().map(|c| flow.best_score(c)).collect();
                    category_screen.render(f, username, categories, &best);
                }
                Screen::Quiz(session) => quiz_screen.render(f, session, warning_threshold),
                Screen::History { username } => history_screen.render(f, username),
            }

            if let Some(notice) = flow.notice() {
                let area = f.size();
                render_notice(f, area, notice);
            }
        })
    }

    /// Handle keyboard events and update state
    async fn handle_events(&mut self) -> Result<()> {
        let Some(key) = self.tui.next_key()? else {
            return Ok(());
        };

        if NavigationAction::is_force_quit(&key) {
            self.flow.quit();
            return Ok(());
        }

        if self.flow.notice().is_some() {
            self.handle_notice_events(key);
            return Ok(());
        }

        let before = self.flow.screen().name();
        match self.flow.screen() {
            Screen::Login => self.handle_login_events(key),
            _ => {
                let action = NavigationAction::from_key(key);
                if action == NavigationAction::Quit {
                    self.flow.quit();
                    return Ok(());
                }
                match self.flow.screen() {
                    Screen::CategorySelection { .. } => self.handle_category_events(action),
                    Screen::Quiz(_) => self.handle_quiz_events(action),
                    Screen::History { .. } => self.handle_history_events(action),
                    Screen::Login => {}
                }
            }
        }
        self.on_screen_change(before);
        Ok(())
    }

    fn handle_notice_events(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => self.flow.dismiss_notice(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.flow.quit(),
            _ => {}
        }
    }

    fn handle_login_events(&mut self, key: KeyEvent) {
        match self.login_screen.handle_key_event(key) {
            Some(LoginAction::Login { username, password }) => {
                self.flow.login(&username, &password)
            }
            Some(LoginAction::Register { username, password }) => {
                self.flow.register(&username, &password)
            }
            Some(LoginAction::Quit) => self.flow.quit(),
            None => {}
        }
    }

    fn handle_category_events(&mut self, action: NavigationAction) {
        let count = self.flow.categories().len();
        match action {
            NavigationAction::Up => self.category_screen.select_previous(count),
            NavigationAction::Down => self.category_screen.select_next(count),
            NavigationAction::Select => {
                if let Some(category) = self
                    .category_screen
                    .selected(self.flow.categories())
                    .cloned()
                {
                    self.flow.select_category(&category);
                }
            }
            NavigationAction::History => self.flow.show_history(),
            NavigationAction::Back => self.flow.back(),
            _ => {}
        }
    }

    fn handle_quiz_events(&mut self, action: NavigationAction) {
        let option_count = self
            .flow
            .session()
            .and_then(|s| s.current_question())
            .map_or(0, |q| q.option_count());

        match action {
            NavigationAction::Up => self.quiz_screen.select_previous(option_count),
            NavigationAction::Down => self.quiz_screen.select_next(option_count),
            NavigationAction::Select => self.flow.answer(self.quiz_screen.selected_option()),
            NavigationAction::Choose(option) => self.flow.answer(option),
            _ => {}
        }
    }

    fn handle_history_events(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Up => self.history_screen.scroll_up(),
            NavigationAction::Down => self.history_screen.scroll_down(),
            NavigationAction::Back | NavigationAction::Select => self.flow.back(),
            _ => {}
        }
    }

    /// Refresh screen-local state after a transition
    fn on_screen_change(&mut self, before: &'static str) {
        let now = self.flow.screen().name();
        if now == before {
            return;
        }

        if before == "login" {
            self.login_screen.reset();
        }
        match self.flow.screen() {
            Screen::CategorySelection { .. } if before == "login" => {
                self.category_screen = CategoryScreen::new();
            }
            Screen::History { .. } => {
                self.history_screen.set_results(self.flow.history().to_vec());
            }
            Screen::Quiz(_) => self.quiz_screen.reset(),
            _ => {}
        }
    }
}

/// The loop's error wins over a failed terminal restore
fn first_error(outcome: Result<()>, restored: Result<()>) -> Result<()> {
    outcome.and(restored)
}
