use crate::word_bank::Difficulty;

/// Points awarded per unused mistake on a win
const MISTAKE_BONUS: u32 = 10;
/// Points awarded per second left on the clock in timed mode
const TIME_BONUS: u32 = 2;
/// Points deducted per mistake from a consolation score
const MISTAKE_PENALTY: u32 = 5;

pub fn base_points(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 50,
        Difficulty::Hard | Difficulty::Expert => 120,
        Difficulty::Medium => 80,
    }
}

pub fn max_mistakes(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 7,
        Difficulty::Hard | Difficulty::Expert => 5,
        Difficulty::Medium => 6,
    }
}

/// Score for a solved word. `remaining_secs` is only set in timed mode.
pub fn win_score(
    difficulty: Difficulty,
    mistakes: u32,
    max_mistakes: u32,
    remaining_secs: Option<u64>,
) -> u32 {
    let unused = max_mistakes.saturating_sub(mistakes);
    let time_bonus = remaining_secs.map_or(0, |s| s as u32 * TIME_BONUS);
    base_points(difficulty) + unused * MISTAKE_BONUS + time_bonus
}

/// Consolation score for a lost or timed out round, never negative
pub fn loss_score(difficulty: Difficulty, mistakes: u32) -> u32 {
    (base_points(difficulty) / 4).saturating_sub(mistakes * MISTAKE_PENALTY)
}
