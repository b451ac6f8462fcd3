use board::input::InputEvent;
use board::standard::StandardRules;

use super::*;

fn sq(name: &str) -> board::coords::Square {
    name.parse().unwrap()
}

#[test]
fn start_position_board_text() {
    let core = EngineCore::new(StandardRules::new());
    let text = board_text(&core.view);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "     a  b  c  d  e  f  g  h");
    assert_eq!(lines[1], " 8   r  n  b  q  k  b  n  r   8");
    assert_eq!(lines[4], " 5   .  .  .  .  .  .  .  .   5");
    assert_eq!(lines[8], " 1   R  N  B  Q  K  B  N  R   1");
}

#[test]
fn selection_and_targets_are_bracketed() {
    let mut core = EngineCore::new(StandardRules::new());
    core.handle(InputEvent::Click(sq("e2")));
    let text = board_text(&core.view);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[7], " 2   P  P  P  P [P] P  P  P   2");
    assert_eq!(lines[5], " 4   .  .  .  . (.) .  .  .   4");
}

#[test]
fn history_and_captures_after_exchange() {
    let mut core = EngineCore::new(StandardRules::new());
    for (from, to) in [("e2", "e4"), ("d7", "d5"), ("e4", "d5")] {
        core.handle(InputEvent::Click(sq(from)));
        core.handle(InputEvent::Click(sq(to)));
    }
    assert_eq!(history_text(&core.history), "  1. e4      d5\n  2. exd5");
    assert_eq!(captures_text(&core.captures), "captured white: -\ncaptured black: p");
}

#[test]
fn frame_includes_objective_and_status() {
    let core = EngineCore::new(StandardRules::new());
    let text = frame(&core, Some("Puzzle rating 1500"));
    assert!(text.starts_with("Puzzle rating 1500\n\n"));
    assert!(text.contains("White to move"));
    assert!(!text.contains(" 1. "));
}

#[test]
fn piece_letters_follow_color() {
    assert_eq!(piece_letter(Piece::new(Color::White, PieceKind::Knight)), 'N');
    assert_eq!(piece_letter(Piece::new(Color::Black, PieceKind::King)), 'k');
}
