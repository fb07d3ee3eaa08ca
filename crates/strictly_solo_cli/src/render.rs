//! Text for each screen.

use strictly_solo::{Board, Mark, Outcome, Position, Score};

/// Title and prompt of the player selection screen.
pub fn pick_player() -> String {
    "WELCOME\nPICK YOUR PLAYER: [x] or [o]  (q to quit)".to_string()
}

/// Shown while waiting for an opponent.
pub fn matchmaking(human: Mark) -> String {
    format!("Waiting to find your opponent...  X vs O  (you are {})", human)
}

/// The board plus a hint on how to move.
pub fn board(board: &Board) -> String {
    format!("\n{}\n", board)
}

/// One-line help for the play screen.
pub fn play_help() -> String {
    "Enter a square 1-9 or `row col` (0-2). s = score, r = reset, q = quit".to_string()
}

/// Announces a move.
pub fn move_line(who: &str, mark: Mark, position: Position) -> String {
    format!("{} ({}) played {}", who, mark, position)
}

/// Score from the human's side of the table.
pub fn score(score: &Score, human: Mark) -> String {
    format!(
        "You ({}) {} - Opponent ({}) {}  |  draws {}",
        human,
        score.wins(human),
        human.opponent(),
        score.wins(human.opponent()),
        score.draws
    )
}

/// Headline of the result screen.
pub fn outcome(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::HumanWins => "yay! You win!",
        Outcome::OpponentWins => "The opponent wins this one.",
        Outcome::Draw => "It's a draw.",
        Outcome::InProgress => "Game in progress.",
    }
}

/// Choices on the result screen.
pub fn record_prompt() -> String {
    "[p]lay again, [n]ew match, [q]uit".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_solo::ScoreTracker;

    #[test]
    fn test_score_is_from_human_side() {
        let mut tracker = ScoreTracker::new();
        tracker.record_win(Mark::O);
        tracker.record_win(Mark::O);
        tracker.record_win(Mark::X);
        let text = score(&tracker.snapshot(), Mark::O);
        assert_eq!(text, "You (O) 2 - Opponent (X) 1  |  draws 0");
    }

    #[test]
    fn test_win_headline() {
        assert!(outcome(Outcome::HumanWins).contains("yay"));
        assert_ne!(outcome(Outcome::Draw), outcome(Outcome::OpponentWins));
    }

    #[test]
    fn test_move_line() {
        let pos = Position::new(1, 1).unwrap();
        assert_eq!(move_line("You", Mark::X, pos), "You (X) played Center (1, 1)");
    }
}
