use crate::leaderboard::{self, LeaderboardStore, ScoreRecord};
use crate::round::{GameMode, GuessOutcome, Round, RoundStatus};
use crate::word_bank::{Category, Difficulty, WordBank};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    ChooseCategory,
    ChooseDifficulty,
    Playing,
    RoundOver,
    EnterName,
    Leaderboard,
    Export,
}

pub const MENU_ITEMS: [&str; 4] = ["Regular", "Timed", "Leaderboard", "Quit"];

/// Upper bound on typed input; export paths can be long
const MAX_INPUT: usize = 256;

#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub menu_index: usize,
    pub mode: GameMode,
    pub category: Option<Category>,
    pub round: Option<Round>,
    /// Line being typed at the current prompt
    pub input: String,
    pub message: Option<String>,
    pub player_name: Option<String>,
    /// Ranked top entries, refreshed when the leaderboard opens
    pub scores: Vec<ScoreRecord>,
    pub should_quit: bool,
    words: WordBank,
    store: LeaderboardStore,
    rng: StdRng,
}

impl App {
    pub fn new(words: WordBank, store: LeaderboardStore, rng: StdRng) -> Self {
        Self {
            state: AppState::Menu,
            menu_index: 0,
            mode: GameMode::Regular,
            category: None,
            round: None,
            input: String::new(),
            message: None,
            player_name: None,
            scores: Vec::new(),
            should_quit: false,
            words,
            store,
            rng,
        }
    }

    pub fn with_player_name(mut self, name: Option<String>) -> Self {
        self.player_name = name;
        self
    }

    pub fn store(&self) -> &LeaderboardStore {
        &self.store
    }

    pub fn on_tick(&mut self) {
        if self.state != AppState::Playing {
            return;
        }
        if let Some(round) = self.round.as_mut() {
            if round.tick() == RoundStatus::TimedOut {
                self.message = Some("Time's up!".to_string());
                self.finish_round();
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Menu => self.on_menu_key(key),
            AppState::ChooseCategory => match key.code {
                KeyCode::Esc => self.back_to_menu(),
                KeyCode::Enter => self.submit_category(),
                _ => self.edit_input(key),
            },
            AppState::ChooseDifficulty => match key.code {
                KeyCode::Esc => self.back_to_menu(),
                KeyCode::Enter => self.submit_difficulty(),
                _ => self.edit_input(key),
            },
            AppState::Playing => match key.code {
                KeyCode::Esc => {
                    tracing::info!("round abandoned");
                    self.round = None;
                    self.back_to_menu();
                    self.message = Some("Round abandoned.".to_string());
                }
                KeyCode::Enter => self.submit_guess(),
                _ => self.edit_input(key),
            },
            AppState::RoundOver => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.input = self.player_name.clone().unwrap_or_default();
                    self.state = AppState::EnterName;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Enter => {
                    self.round = None;
                    self.back_to_menu();
                }
                _ => {}
            },
            AppState::EnterName => match key.code {
                KeyCode::Esc => {
                    self.round = None;
                    self.back_to_menu();
                }
                KeyCode::Enter => self.submit_name(),
                _ => self.edit_input(key),
            },
            AppState::Leaderboard => match key.code {
                KeyCode::Char('e') | KeyCode::Char('E') => {
                    self.input.clear();
                    self.message = None;
                    self.state = AppState::Export;
                }
                KeyCode::Char('r') => self.open_leaderboard(),
                KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => self.back_to_menu(),
                _ => {}
            },
            AppState::Export => match key.code {
                KeyCode::Esc => {
                    self.input.clear();
                    self.state = AppState::Leaderboard;
                }
                KeyCode::Enter => self.submit_export(),
                _ => self.edit_input(key),
            },
        }
    }

    fn on_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c @ '1'..='4') => self.select_menu(c as usize - '1' as usize),
            KeyCode::Up => self.menu_index = self.menu_index.saturating_sub(1),
            KeyCode::Down => self.menu_index = (self.menu_index + 1).min(MENU_ITEMS.len() - 1),
            KeyCode::Enter => self.select_menu(self.menu_index),
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => self.message = Some("Pick 1-4.".to_string()),
        }
    }

    fn select_menu(&mut self, index: usize) {
        self.menu_index = index;
        self.message = None;
        self.input.clear();
        match index {
            0 | 1 => {
                self.mode = if index == 0 {
                    GameMode::Regular
                } else {
                    GameMode::Timed
                };
                self.category = None;
                self.state = AppState::ChooseCategory;
            }
            2 => self.open_leaderboard(),
            _ => self.should_quit = true,
        }
    }

    fn edit_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !c.is_control()
                    && self.input.chars().count() < MAX_INPUT =>
            {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn back_to_menu(&mut self) {
        self.input.clear();
        self.message = None;
        self.state = AppState::Menu;
    }

    fn submit_category(&mut self) {
        let line = std::mem::take(&mut self.input);
        match line.parse::<Category>() {
            Ok(category) => {
                self.category = Some(category);
                self.message = None;
                self.state = AppState::ChooseDifficulty;
            }
            Err(_) => self.message = Some("Invalid category. Try again.".to_string()),
        }
    }

    fn submit_difficulty(&mut self) {
        let line = std::mem::take(&mut self.input);
        match line.parse::<Difficulty>() {
            Ok(difficulty) => self.start_round(difficulty),
            Err(_) => self.message = Some("Invalid difficulty. Try again.".to_string()),
        }
    }

    fn start_round(&mut self, difficulty: Difficulty) {
        let Some(category) = self.category else {
            self.back_to_menu();
            return;
        };

        let Some(entry) = self.words.choose(category, difficulty, &mut self.rng) else {
            tracing::info!(%category, %difficulty, "no words for selection");
            self.back_to_menu();
            self.message = Some("No words found for that category and difficulty.".to_string());
            return;
        };

        let round = Round::new(&entry.word, entry.difficulty, self.mode);
        self.message = None;
        self.state = AppState::Playing;
        let solved_on_arrival = round.is_over();
        self.round = Some(round);
        if solved_on_arrival {
            self.finish_round();
        }
    }

    fn submit_guess(&mut self) {
        let Some(round) = self.round.as_mut() else {
            self.back_to_menu();
            return;
        };
        if self.input.trim().is_empty() {
            return;
        }

        let line = std::mem::take(&mut self.input);
        let outcome = round.submit(&line);
        self.message = Some(describe(&outcome));
        if round.is_over() {
            self.finish_round();
        }
    }

    fn finish_round(&mut self) {
        self.input.clear();
        self.state = AppState::RoundOver;
    }

    fn submit_name(&mut self) {
        let name = self.input.trim().to_string();
        if name.is_empty() {
            self.message = Some("Name cannot be empty.".to_string());
            return;
        }

        let Some(round) = self.round.take() else {
            self.back_to_menu();
            return;
        };

        let record = ScoreRecord::new(name.clone(), round.score().unwrap_or(0), round.mode());
        let message = match self.store.append(&record) {
            Ok(()) => format!("Saved {} points for {name}.", record.score),
            Err(e) => {
                tracing::error!(error = %e, "failed to save score");
                format!("Could not save score: {e}")
            }
        };

        self.player_name = Some(name);
        self.back_to_menu();
        self.message = Some(message);
    }

    fn open_leaderboard(&mut self) {
        self.scores = leaderboard::top(&self.store.read_all());
        self.state = AppState::Leaderboard;
    }

    fn submit_export(&mut self) {
        let dest = self.input.trim().to_string();
        if dest.is_empty() {
            self.message = Some("Enter a file name.".to_string());
            return;
        }

        let records = self.store.read_all();
        self.message = Some(match LeaderboardStore::export(&records, &dest) {
            Ok(()) => format!("Leaderboard exported to {dest}."),
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                format!("Export failed: {e}")
            }
        });
        self.input.clear();
        self.state = AppState::Leaderboard;
    }
}

/// Status line text for a guess
pub fn describe(outcome: &GuessOutcome) -> String {
    match outcome {
        GuessOutcome::Hit { letter, revealed: 1 } => format!("Yes! There is one '{letter}'."),
        GuessOutcome::Hit { letter, revealed } => format!("Yes! There are {revealed} '{letter}'s."),
        GuessOutcome::Miss(letter) => format!("The letter '{letter}' is not in the word."),
        GuessOutcome::AlreadyGuessed(letter) => format!("You already guessed '{letter}'."),
        GuessOutcome::Invalid => "Guess a letter or the whole word.".to_string(),
        GuessOutcome::WordCorrect => "That's the word!".to_string(),
        GuessOutcome::WordWrong => "That's not the word.".to_string(),
        GuessOutcome::Finished(RoundStatus::TimedOut) => "Time's up!".to_string(),
        GuessOutcome::Finished(_) => "The round is over.".to_string(),
    }
}
