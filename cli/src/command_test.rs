use super::*;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn gesture_commands_parse() {
    assert_eq!(parse_command("click e2"), Ok(Command::Click(sq("e2"))));
    assert_eq!(parse_command("drag g1"), Ok(Command::Drag(sq("g1"))));
    assert_eq!(parse_command("over f3"), Ok(Command::Over(sq("f3"))));
    assert_eq!(parse_command("leave f3"), Ok(Command::Leave(sq("f3"))));
    assert_eq!(parse_command("drop f3"), Ok(Command::Drop(sq("f3"))));
}

#[test]
fn verbs_and_squares_are_case_insensitive() {
    assert_eq!(parse_command("  CLICK E2 "), Ok(Command::Click(sq("e2"))));
}

#[test]
fn move_accepts_split_and_joined_forms() {
    let expected = Ok(Command::Move(sq("e2"), sq("e4")));
    assert_eq!(parse_command("move e2 e4"), expected);
    assert_eq!(parse_command("move e2e4"), expected);
    assert_eq!(parse_command("m e2e4"), expected);
}

#[test]
fn bare_verbs_parse() {
    assert_eq!(parse_command("next"), Ok(Command::Next));
    assert_eq!(parse_command("board"), Ok(Command::Board));
    assert_eq!(parse_command("?"), Ok(Command::Help));
    assert_eq!(parse_command("exit"), Ok(Command::Quit));
}

#[test]
fn errors_are_specific() {
    assert_eq!(parse_command("   "), Err(CommandError::Empty));
    assert_eq!(parse_command("jump e2"), Err(CommandError::Unknown("jump".into())));
    assert_eq!(parse_command("click"), Err(CommandError::MissingSquare("click")));
    assert_eq!(parse_command("move e2"), Err(CommandError::MissingSquare("move")));
    assert!(matches!(parse_command("click z9"), Err(CommandError::Square(_))));
}

#[test]
fn missing_square_message_shows_usage() {
    assert_eq!(CommandError::MissingSquare("drop").to_string(), "`drop` needs a square, e.g. `drop e4`");
}
