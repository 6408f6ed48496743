use ratatui::Frame;

use crate::{app::App, app::AppState, ui};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        ui::render_menu(app, f);
    }
}

/// Single-line prompts: category, difficulty, player name
pub struct PromptScreen;

impl Screen for PromptScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        ui::render_prompt(app, f);
    }
}

pub struct RoundScreen;

impl Screen for RoundScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        ui::render_round(app, f);
    }
}

pub struct ResultScreen;

impl Screen for ResultScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        ui::render_result(app, f);
    }
}

/// Leaderboard table, also hosts the export prompt
pub struct LeaderboardScreen;

impl Screen for LeaderboardScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        ui::scores::render_leaderboard(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Menu => Box::new(MenuScreen),
        AppState::ChooseCategory | AppState::ChooseDifficulty | AppState::EnterName => {
            Box::new(PromptScreen)
        }
        AppState::Playing => Box::new(RoundScreen),
        AppState::RoundOver => Box::new(ResultScreen),
        AppState::Leaderboard | AppState::Export => Box::new(LeaderboardScreen),
    }
}
