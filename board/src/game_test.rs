use super::*;
use crate::coords::Square;
use crate::rules::MoveAttempt;
use crate::standard::StandardRules;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn play(rules: &mut StandardRules, from: &str, to: &str) -> MoveResult {
    rules.play(MoveAttempt::new(sq(from), sq(to)).unwrap()).unwrap()
}

// =============================================================
// HistoryTable
// =============================================================

#[test]
fn new_table_has_numbered_empty_rows() {
    let table = HistoryTable::new();
    assert_eq!(table.rows().len(), HISTORY_ROWS);
    assert_eq!(table.ply_capacity(), 120);
    assert_eq!(table.row(0).unwrap().number, 1);
    assert_eq!(table.row(59).unwrap().number, 60);
    assert!(table.rows().iter().all(|r| r.white.is_empty() && r.black.is_empty()));
    assert_eq!(table.filled_rows().count(), 0);
}

#[test]
fn sync_pairs_plies_into_rows() {
    let mut table = HistoryTable::new();
    let history: Vec<String> = ["e4", "e5", "Nf3"].iter().map(|s| (*s).to_owned()).collect();
    table.sync(&history);
    assert_eq!(table.row(0).unwrap().white, "e4");
    assert_eq!(table.row(0).unwrap().black, "e5");
    assert_eq!(table.row(1).unwrap().white, "Nf3");
    assert_eq!(table.row(1).unwrap().black, "");
    assert_eq!(table.row(2).unwrap(), &HistoryRow { number: 3, ..HistoryRow::default() });
    assert_eq!(table.filled_rows().count(), 2);
}

#[test]
fn row_k_over_two_holds_ply_k() {
    let mut rules = StandardRules::new();
    let mut table = HistoryTable::new();
    let shuffle = [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];
    for k in 0..12 {
        let (from, to) = shuffle[k % shuffle.len()];
        let result = play(&mut rules, from, to);
        table.sync(rules.history());
        let row = table.row(k / 2).unwrap();
        let cell = if k % 2 == 0 { &row.white } else { &row.black };
        assert_eq!(cell, &result.san, "ply {k}");
    }
}

#[test]
fn sync_shorter_history_clears_later_rows() {
    let mut table = HistoryTable::new();
    let long: Vec<String> = ["e4", "e5", "Nf3", "Nc6"].iter().map(|s| (*s).to_owned()).collect();
    table.sync(&long);
    table.sync(&long[..1]);
    assert_eq!(table.row(0).unwrap().black, "");
    assert_eq!(table.row(1).unwrap().white, "");
}

#[test]
fn plies_beyond_capacity_are_dropped() {
    let mut table = HistoryTable::new();
    let history: Vec<String> = (0..130).map(|i| format!("m{i}")).collect();
    table.sync(&history);
    assert_eq!(table.row(59).unwrap().black, "m119");
    assert_eq!(table.rows().len(), HISTORY_ROWS);
}

#[test]
fn clear_empties_rows() {
    let mut table = HistoryTable::new();
    table.sync(&["e4".to_owned()]);
    table.clear();
    assert_eq!(table, HistoryTable::new());
}

// =============================================================
// CaptureLog
// =============================================================

#[test]
fn quiet_move_records_nothing() {
    let mut rules = StandardRules::new();
    let mut log = CaptureLog::new();
    let result = play(&mut rules, "e2", "e4");
    assert_eq!(log.record(&result), None);
    assert!(log.tray(Color::White).is_empty());
    assert!(log.tray(Color::Black).is_empty());
}

#[test]
fn captures_are_keyed_by_captured_color_in_order() {
    let mut rules = StandardRules::new();
    let mut log = CaptureLog::new();
    let moves = [
        ("e2", "e4"),
        ("d7", "d5"),
        ("e4", "d5"),
        ("d8", "d5"),
        ("b1", "c3"),
        ("d5", "a2"),
        ("a1", "a2"),
    ];
    for (from, to) in moves {
        let result = play(&mut rules, from, to);
        log.record(&result);
    }
    assert_eq!(log.tray(Color::Black), &[PieceKind::Pawn, PieceKind::Queen]);
    assert_eq!(log.tray(Color::White), &[PieceKind::Pawn, PieceKind::Pawn]);
    assert_eq!(log.icons(Color::Black), vec!["/pieces/b_pawn.svg", "/pieces/b_queen.svg"]);
}

#[test]
fn capture_log_clear_empties_both_trays() {
    let mut log = CaptureLog::new();
    let mut rules = StandardRules::new();
    for (from, to) in [("e2", "e4"), ("d7", "d5")] {
        play(&mut rules, from, to);
    }
    log.record(&play(&mut rules, "e4", "d5"));
    log.clear();
    assert_eq!(log, CaptureLog::new());
}

// =============================================================
// Status
// =============================================================

#[test]
fn status_announces_turn() {
    let mut rules = StandardRules::new();
    assert_eq!(Status::from_rules(&rules), Status::Turn { side: Color::White });
    play(&mut rules, "e2", "e4");
    let status = Status::from_rules(&rules);
    assert_eq!(status, Status::Turn { side: Color::Black });
    assert_eq!(status.to_string(), "Black to move");
}

#[test]
fn status_reports_check() {
    let rules = StandardRules::from_fen("4k3/8/8/8/8/8/8/4KR2 b - - 0 1").unwrap();
    assert_eq!(Status::from_rules(&rules), Status::Turn { side: Color::Black });
    let rules = StandardRules::from_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").unwrap();
    let status = Status::from_rules(&rules);
    assert_eq!(status, Status::Check { side: Color::Black });
    assert_eq!(status.to_string(), "Black is in check");
}

#[test]
fn checkmate_outranks_check() {
    let mut rules = StandardRules::new();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        play(&mut rules, from, to);
    }
    let status = Status::from_rules(&rules);
    assert_eq!(status, Status::Checkmate { winner: Color::Black });
    assert_eq!(status.to_string(), "Checkmate: Black wins");
}

#[test]
fn stalemate_reads_draw() {
    let rules = StandardRules::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(Status::from_rules(&rules), Status::Draw);
    assert_eq!(Status::Draw.to_string(), "Draw");
}
