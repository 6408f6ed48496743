use crate::scoring;
use crate::word_bank::Difficulty;
use std::collections::BTreeSet;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Wall-clock budget for a timed round
pub const TIME_LIMIT: Duration = Duration::from_secs(60);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum GameMode {
    Regular,
    Timed,
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(GameMode::Regular),
            "timed" => Ok(GameMode::Timed),
            other => Err(format!("unknown game mode '{other}'")),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
    TimedOut,
}

impl RoundStatus {
    pub fn is_over(self) -> bool {
        self != RoundStatus::InProgress
    }
}

/// What a single guess did to the round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Hit { letter: char, revealed: usize },
    Miss(char),
    AlreadyGuessed(char),
    Invalid,
    WordCorrect,
    WordWrong,
    /// The round had already ended (possibly just now, by the clock)
    Finished(RoundStatus),
}

/// One playthrough against a single word
#[derive(Debug, Clone)]
pub struct Round {
    word: String,
    chars: Vec<char>,
    difficulty: Difficulty,
    mode: GameMode,
    revealed: Vec<bool>,
    used_letters: BTreeSet<char>,
    mistakes: u32,
    max_mistakes: u32,
    remaining: usize,
    status: RoundStatus,
    score: Option<u32>,
    started_at: Instant,
    time_left_at_finish: Option<u64>,
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Display form of a word: revealed characters as-is, hidden ones as `_`
pub fn render_mask(chars: &[char], revealed: &[bool]) -> String {
    chars
        .iter()
        .zip(revealed)
        .map(|(&c, &shown)| if shown { c } else { '_' })
        .collect()
}

impl Round {
    pub fn new(word: &str, difficulty: Difficulty, mode: GameMode) -> Self {
        let chars: Vec<char> = word.chars().collect();
        let revealed: Vec<bool> = chars.iter().map(|c| !c.is_alphabetic()).collect();
        let remaining = revealed.iter().filter(|shown| !**shown).count();
        let max_mistakes = scoring::max_mistakes(difficulty);

        let mut round = Self {
            word: word.to_string(),
            chars,
            difficulty,
            mode,
            revealed,
            used_letters: BTreeSet::new(),
            mistakes: 0,
            max_mistakes,
            remaining,
            status: RoundStatus::InProgress,
            score: None,
            started_at: Instant::now(),
            time_left_at_finish: None,
        };
        tracing::debug!(%difficulty, %mode, len = round.chars.len(), "round started");

        // A word with nothing to guess is solved on arrival
        round.settle(Instant::now());
        round
    }

    /// Rewind the round's clock, e.g. when resuming or in tests
    pub fn with_started_at(mut self, started_at: Instant) -> Self {
        self.started_at = started_at;
        self
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn max_mistakes(&self) -> u32 {
        self.max_mistakes
    }

    pub fn remaining_letters(&self) -> usize {
        self.remaining
    }

    pub fn revealed(&self) -> &[bool] {
        &self.revealed
    }

    pub fn used_letters(&self) -> &BTreeSet<char> {
        &self.used_letters
    }

    /// Set once the round reaches a terminal state
    pub fn score(&self) -> Option<u32> {
        self.score
    }

    pub fn mask(&self) -> String {
        render_mask(&self.chars, &self.revealed)
    }

    /// Whole seconds left on the clock, `None` outside timed mode
    pub fn seconds_remaining(&self) -> Option<u64> {
        self.seconds_remaining_at(Instant::now())
    }

    pub fn seconds_remaining_at(&self, now: Instant) -> Option<u64> {
        if self.mode != GameMode::Timed {
            return None;
        }
        if let Some(left) = self.time_left_at_finish {
            return Some(left);
        }
        let elapsed = now.saturating_duration_since(self.started_at).as_secs();
        Some(TIME_LIMIT.as_secs().saturating_sub(elapsed))
    }

    /// Poll the clock; times the round out once the budget is spent
    pub fn tick(&mut self) -> RoundStatus {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> RoundStatus {
        if self.status == RoundStatus::InProgress && self.mode == GameMode::Timed {
            let elapsed = now.saturating_duration_since(self.started_at).as_secs();
            if elapsed >= TIME_LIMIT.as_secs() {
                self.finish(RoundStatus::TimedOut, now);
            }
        }
        self.status
    }

    /// Single character guesses a letter, anything longer guesses the word
    pub fn submit(&mut self, line: &str) -> GuessOutcome {
        let trimmed = line.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.guess_letter(c),
            _ => self.guess_word(trimmed),
        }
    }

    pub fn guess_letter(&mut self, c: char) -> GuessOutcome {
        let now = Instant::now();
        if self.tick_at(now).is_over() {
            return GuessOutcome::Finished(self.status);
        }
        if !c.is_alphabetic() {
            return GuessOutcome::Invalid;
        }

        let letter = fold(c);
        if !self.used_letters.insert(letter) {
            return GuessOutcome::AlreadyGuessed(letter);
        }

        let mut newly_revealed = 0;
        for (ch, shown) in self.chars.iter().zip(self.revealed.iter_mut()) {
            if !*shown && fold(*ch) == letter {
                *shown = true;
                newly_revealed += 1;
            }
        }

        let outcome = if newly_revealed == 0 {
            self.mistakes += 1;
            GuessOutcome::Miss(letter)
        } else {
            self.remaining -= newly_revealed;
            GuessOutcome::Hit {
                letter,
                revealed: newly_revealed,
            }
        };

        self.settle(now);
        outcome
    }

    pub fn guess_word(&mut self, guess: &str) -> GuessOutcome {
        let now = Instant::now();
        if self.tick_at(now).is_over() {
            return GuessOutcome::Finished(self.status);
        }

        let guess = guess.trim();
        if guess.is_empty() {
            return GuessOutcome::Invalid;
        }

        let outcome = if guess.to_lowercase() == self.word.to_lowercase() {
            self.revealed.iter_mut().for_each(|shown| *shown = true);
            self.remaining = 0;
            GuessOutcome::WordCorrect
        } else {
            self.mistakes += 1;
            GuessOutcome::WordWrong
        };

        self.settle(now);
        outcome
    }

    fn settle(&mut self, now: Instant) {
        if self.status != RoundStatus::InProgress {
            return;
        }
        if self.remaining == 0 {
            self.finish(RoundStatus::Won, now);
        } else if self.mistakes >= self.max_mistakes {
            self.finish(RoundStatus::Lost, now);
        }
    }

    fn finish(&mut self, status: RoundStatus, now: Instant) {
        self.time_left_at_finish = self.seconds_remaining_at(now);
        let score = match status {
            RoundStatus::Won => scoring::win_score(
                self.difficulty,
                self.mistakes,
                self.max_mistakes,
                self.time_left_at_finish,
            ),
            _ => scoring::loss_score(self.difficulty, self.mistakes),
        };

        self.status = status;
        self.score = Some(score);
        tracing::info!(
            ?status,
            score,
            mistakes = self.mistakes,
            mode = %self.mode,
            "round finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn regular(word: &str, difficulty: Difficulty) -> Round {
        Round::new(word, difficulty, GameMode::Regular)
    }

    #[test]
    fn test_new_round_setup() {
        let round = regular("New York", Difficulty::Easy);

        assert_eq!(round.max_mistakes(), 7);
        assert_eq!(round.remaining_letters(), 7);
        assert_eq!(round.mask(), "___ ____");
        assert_eq!(round.status(), RoundStatus::InProgress);
        assert_eq!(round.score(), None);
        assert_eq!(round.seconds_remaining(), None);
    }

    #[test]
    fn test_non_alphabetic_positions_start_revealed() {
        let round = regular("Tim's 2", Difficulty::Medium);

        assert_eq!(round.mask(), "___'_ 2");
        assert_eq!(round.remaining_letters(), 4);
        assert_eq!(round.max_mistakes(), 6);
    }

    #[test]
    fn test_hit_reveals_every_match_case_insensitively() {
        let mut round = regular("Banana", Difficulty::Hard);

        assert_eq!(
            round.guess_letter('A'),
            GuessOutcome::Hit {
                letter: 'a',
                revealed: 3
            }
        );
        assert_eq!(round.mask(), "_a_a_a");
        assert_eq!(round.remaining_letters(), 3);

        assert_matches!(round.guess_letter('b'), GuessOutcome::Hit { revealed: 1, .. });
        assert_eq!(round.mask(), "Ba_a_a");
        assert_eq!(round.mistakes(), 0);
    }

    #[test]
    fn test_miss_counts_a_mistake() {
        let mut round = regular("cat", Difficulty::Easy);

        assert_eq!(round.guess_letter('z'), GuessOutcome::Miss('z'));
        assert_eq!(round.mistakes(), 1);
        assert!(round.used_letters().contains(&'z'));
    }

    #[test]
    fn test_repeated_letter_changes_nothing() {
        let mut round = regular("cat", Difficulty::Easy);
        round.guess_letter('z');
        round.guess_letter('c');

        let mask = round.mask();
        let mistakes = round.mistakes();
        let used = round.used_letters().clone();

        assert_eq!(round.guess_letter('Z'), GuessOutcome::AlreadyGuessed('z'));
        assert_eq!(round.guess_letter('c'), GuessOutcome::AlreadyGuessed('c'));
        assert_eq!(round.mask(), mask);
        assert_eq!(round.mistakes(), mistakes);
        assert_eq!(round.used_letters(), &used);
    }

    #[test]
    fn test_invalid_input_costs_nothing() {
        let mut round = regular("cat", Difficulty::Easy);

        assert_eq!(round.guess_letter('3'), GuessOutcome::Invalid);
        assert_eq!(round.guess_letter(' '), GuessOutcome::Invalid);
        assert_eq!(round.mistakes(), 0);
        assert!(round.used_letters().is_empty());
        assert_eq!(round.submit("   "), GuessOutcome::Invalid);
    }

    #[test]
    fn test_flawless_easy_win_scores_120() {
        let mut round = regular("dog", Difficulty::Easy);
        for c in ['d', 'o', 'g'] {
            round.guess_letter(c);
        }

        assert_eq!(round.status(), RoundStatus::Won);
        assert_eq!(round.remaining_letters(), 0);
        assert_eq!(round.score(), Some(120));
    }

    #[test]
    fn test_loss_when_budget_spent() {
        let mut round = regular("dog", Difficulty::Hard);
        for c in ['a', 'b', 'c', 'e', 'f'] {
            assert_eq!(round.status(), RoundStatus::InProgress);
            round.guess_letter(c);
        }

        assert_eq!(round.status(), RoundStatus::Lost);
        assert_eq!(round.mistakes(), round.max_mistakes());
        // 120 / 4 - 5 * 5
        assert_eq!(round.score(), Some(5));
        assert_eq!(round.guess_letter('d'), GuessOutcome::Finished(RoundStatus::Lost));
        assert_eq!(round.mistakes(), 5);
    }

    #[test]
    fn test_hard_loss_after_three_mistakes_scores_15() {
        let mut round = regular("dog", Difficulty::Hard);
        round.guess_letter('x');
        round.guess_letter('y');
        round.guess_letter('z');
        assert_eq!(round.mistakes(), 3);

        // Two wrong words use up the rest of the budget, each costing one
        round.guess_word("cat");
        assert_eq!(round.mistakes(), 4);
        round.guess_word("cow");
        assert_eq!(round.status(), RoundStatus::Lost);
        assert_eq!(round.score(), Some(scoring::loss_score(Difficulty::Hard, 5)));
        assert_eq!(scoring::loss_score(Difficulty::Hard, 3), 15);
    }

    #[test]
    fn test_full_word_guess_wins_immediately() {
        let mut round = regular("Olive Garden", Difficulty::Medium);
        round.guess_letter('q');

        assert_eq!(round.submit("  olive GARDEN "), GuessOutcome::WordCorrect);
        assert_eq!(round.status(), RoundStatus::Won);
        assert_eq!(round.mask(), "Olive Garden");
        // 80 base + 5 unused mistakes
        assert_eq!(round.score(), Some(130));
    }

    #[test]
    fn test_wrong_word_costs_one_mistake() {
        let mut round = regular("Paris", Difficulty::Medium);

        assert_eq!(round.submit("london"), GuessOutcome::WordWrong);
        assert_eq!(round.mistakes(), 1);
        assert_eq!(round.mask(), "_____");
    }

    #[test]
    fn test_submit_single_char_is_letter_guess() {
        let mut round = regular("Paris", Difficulty::Medium);
        assert_matches!(round.submit(" p "), GuessOutcome::Hit { letter: 'p', .. });
    }

    #[test]
    fn test_win_and_loss_are_exclusive() {
        let mut round = regular("ab", Difficulty::Hard);
        for c in ['x', 'y', 'z', 'w'] {
            round.guess_letter(c);
        }
        round.guess_letter('a');
        round.guess_letter('b');

        assert_eq!(round.status(), RoundStatus::Won);
        assert_eq!(round.mistakes(), 4);
        assert_eq!(round.guess_letter('q'), GuessOutcome::Finished(RoundStatus::Won));
    }

    #[test]
    fn test_word_without_letters_is_already_won() {
        let round = regular("42", Difficulty::Easy);
        assert_eq!(round.status(), RoundStatus::Won);
        assert_eq!(round.score(), Some(120));
    }

    #[test]
    fn test_regular_round_never_times_out() {
        let mut round = regular("cat", Difficulty::Easy);
        let later = Instant::now() + Duration::from_secs(600);
        assert_eq!(round.tick_at(later), RoundStatus::InProgress);
    }

    #[test]
    fn test_timed_round_times_out_at_sixty_seconds() {
        let start = Instant::now();
        let mut round =
            Round::new("cat", Difficulty::Medium, GameMode::Timed).with_started_at(start);
        round.guess_letter('x');

        assert_eq!(
            round.tick_at(start + Duration::from_secs(59)),
            RoundStatus::InProgress
        );
        assert_eq!(round.seconds_remaining_at(start + Duration::from_secs(59)), Some(1));
        assert_eq!(
            round.tick_at(start + Duration::from_secs(60)),
            RoundStatus::TimedOut
        );
        assert_eq!(round.score(), Some(15));
        assert_eq!(round.seconds_remaining(), Some(0));
    }

    #[test]
    fn test_timeout_checked_before_guess_is_accepted() {
        let past = Instant::now()
            .checked_sub(Duration::from_secs(61))
            .expect("clock far enough from boot");
        let mut round = Round::new("cat", Difficulty::Easy, GameMode::Timed).with_started_at(past);

        assert_eq!(
            round.guess_letter('c'),
            GuessOutcome::Finished(RoundStatus::TimedOut)
        );
        assert!(round.used_letters().is_empty());
        assert_eq!(round.mask(), "___");
    }

    #[test]
    fn test_timed_win_adds_remaining_seconds() {
        let past = Instant::now()
            .checked_sub(Duration::from_secs(20))
            .expect("clock far enough from boot");
        let mut round = Round::new("cat", Difficulty::Easy, GameMode::Timed).with_started_at(past);

        assert_eq!(round.submit("cat"), GuessOutcome::WordCorrect);
        // 50 base + 7 unused mistakes * 10 + 40 seconds * 2
        assert_eq!(round.score(), Some(200));
        assert_eq!(round.seconds_remaining(), Some(40));
    }

    #[test]
    fn test_render_mask_is_pure() {
        let chars: Vec<char> = "a-b".chars().collect();
        assert_eq!(render_mask(&chars, &[false, true, true]), "_-b");
    }

    #[test]
    fn test_game_mode_parse_and_display() {
        assert_eq!("Timed".parse::<GameMode>(), Ok(GameMode::Timed));
        assert_eq!(GameMode::Regular.to_string(), "Regular");
        assert!("blitz".parse::<GameMode>().is_err());
    }
}
