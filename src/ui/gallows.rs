/// Lines in every gallows frame
pub const HEIGHT: u16 = 7;
/// Number of body parts; frame `STAGES` is a full figure
pub const STAGES: usize = 6;

/// How much of the figure to draw for a mistake count, rounding up so the
/// first mistake always shows
pub fn stage_for(mistakes: u32, max_mistakes: u32) -> usize {
    if max_mistakes == 0 {
        return STAGES;
    }
    let stage = (mistakes as usize * STAGES).div_ceil(max_mistakes as usize);
    stage.min(STAGES)
}

pub fn frame(stage: usize) -> Vec<String> {
    let part = |n: usize, c: char| if stage >= n { c } else { ' ' };

    vec![
        "  +---+ ".to_string(),
        "  |   | ".to_string(),
        format!("  {}   | ", part(1, 'O')),
        format!(" {}{}{}  | ", part(3, '/'), part(2, '|'), part(4, '\\')),
        format!(" {} {}  | ", part(5, '/'), part(6, '\\')),
        "      | ".to_string(),
        "=========".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_rounds_up() {
        assert_eq!(stage_for(0, 7), 0);
        assert_eq!(stage_for(1, 7), 1);
        assert_eq!(stage_for(7, 7), STAGES);
        assert_eq!(stage_for(1, 5), 2);
        assert_eq!(stage_for(5, 5), STAGES);
    }

    #[test]
    fn test_frames() {
        assert_eq!(frame(0).len(), HEIGHT as usize);
        assert!(!frame(0).concat().contains('O'));
        assert_eq!(frame(STAGES)[3], " /|\\  | ");
        assert_eq!(frame(STAGES)[4], " / \\  | ");
    }
}
