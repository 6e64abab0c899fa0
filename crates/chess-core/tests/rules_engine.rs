// crates/chess-core/tests/rules_engine.rs
use chess_core::{
    DrawReason, GameStatus, IllegalMoveReason, MoveRequest, PromotionPiece, RulesEngine,
    RulesError, Seat, Square, StandardRules, STARTING_FEN,
};

fn mv(s: &str) -> MoveRequest {
    MoveRequest::from_coordinate(s).expect("valid test move")
}

fn play(rules: &mut StandardRules, moves: &[&str]) {
    for m in moves {
        rules.apply(&mv(m)).unwrap_or_else(|e| panic!("{} rejected: {}", m, e));
    }
}

#[test]
fn starts_at_standard_position() {
    let rules = StandardRules::new();
    assert_eq!(rules.fen(), STARTING_FEN);
    assert_eq!(rules.turn(), Seat::White);
    assert_eq!(rules.status(), GameStatus::Ongoing);
}

#[test]
fn move_counters_follow_fen_rules() {
    let mut rules = StandardRules::new();

    play(&mut rules, &["e2e4"]);
    assert!(rules.fen().starts_with("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq "));
    assert!(rules.fen().ends_with(" 0 1"));

    play(&mut rules, &["e7e5"]);
    assert!(rules.fen().ends_with(" 0 2"));

    play(&mut rules, &["g1f3", "b8c6"]);
    assert_eq!((rules.halfmove_clock(), rules.fullmove_number()), (2, 3));

    // Capture resets the clock.
    play(&mut rules, &["f3e5"]);
    assert_eq!((rules.halfmove_clock(), rules.fullmove_number()), (0, 3));
}

#[test]
fn rejection_reasons() {
    let mut rules = StandardRules::new();

    assert_eq!(
        rules.apply(&mv("e3e4")),
        Err(RulesError::Rejected(IllegalMoveReason::EmptySource("e3".to_string())))
    );
    assert_eq!(
        rules.apply(&mv("e7e5")),
        Err(RulesError::Rejected(IllegalMoveReason::WrongColor("e7".to_string())))
    );
    assert_eq!(
        rules.apply(&mv("e2e5")),
        Err(RulesError::Rejected(IllegalMoveReason::NotLegal("e2e5".to_string())))
    );
    // Promotion letter on a non-promoting move.
    assert!(rules.apply(&mv("e2e4q")).is_err());

    assert_eq!(rules.fen(), STARTING_FEN);
}

#[test]
fn castling_rights_are_tracked() {
    let mut rules = StandardRules::new();
    play(&mut rules, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"]);

    let fen = rules.fen();
    assert!(fen.starts_with("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq "), "{}", fen);
}

#[test]
fn checkmate_names_the_side_that_moved() {
    let mut rules = StandardRules::new();
    play(&mut rules, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    let status = rules.status();
    assert_eq!(status, GameStatus::Checkmate { winner: Seat::Black });
    assert_eq!(status.game_over_message().as_deref(), Some("Checkmate! Black wins!"));

    rules.reset();
    assert_eq!(rules.fen(), STARTING_FEN);
}

#[test]
fn stalemate_is_a_draw() {
    let mut rules = StandardRules::from_fen("7k/4Q3/6K1/8/8/8/8/8 w - - 0 1").expect("fen");
    play(&mut rules, &["e7f7"]);

    let status = rules.status();
    assert_eq!(status, GameStatus::Draw(DrawReason::Stalemate));
    assert_eq!(status.game_over_message().as_deref(), Some("Game drawn!"));
}

#[test]
fn bare_kings_are_a_draw() {
    let mut rules = StandardRules::from_fen("k7/8/8/8/8/8/1r6/K7 w - - 0 1").expect("fen");
    assert_eq!(rules.status(), GameStatus::Ongoing);

    play(&mut rules, &["a1b2"]);
    assert_eq!(rules.status(), GameStatus::Draw(DrawReason::InsufficientMaterial));
}

#[test]
fn bishops_on_one_colour_are_insufficient() {
    let same = StandardRules::from_fen("k7/8/8/8/8/8/8/KB1b4 w - - 0 1").expect("fen");
    assert_eq!(same.status(), GameStatus::Draw(DrawReason::InsufficientMaterial));

    let opposite = StandardRules::from_fen("k7/8/8/8/8/8/8/KB2b3 w - - 0 1").expect("fen");
    assert_eq!(opposite.status(), GameStatus::Ongoing);
}

#[test]
fn fifty_move_rule() {
    let mut rules = StandardRules::from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 99 80").expect("fen");
    assert_eq!(rules.status(), GameStatus::Ongoing);

    play(&mut rules, &["a1a2"]);
    assert_eq!(rules.halfmove_clock(), 100);
    assert_eq!(rules.status(), GameStatus::Draw(DrawReason::FiftyMoveRule));
}

#[test]
fn threefold_repetition() {
    let mut rules = StandardRules::new();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    play(&mut rules, &shuffle);
    assert_eq!(rules.status(), GameStatus::Ongoing);

    play(&mut rules, &shuffle);
    assert_eq!(rules.status(), GameStatus::Draw(DrawReason::ThreefoldRepetition));
}

#[test]
fn promotion_defaults_to_queen() {
    let mut rules = StandardRules::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").expect("fen");
    play(&mut rules, &["a7a8"]);
    assert!(rules.fen().starts_with("Q7/7k/"), "{}", rules.fen());

    let mut rules = StandardRules::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").expect("fen");
    let under = MoveRequest::new(
        "a7".parse::<Square>().expect("square"),
        "a8".parse::<Square>().expect("square"),
        Some(PromotionPiece::Knight),
    );
    rules.apply(&under).expect("underpromotion");
    assert!(rules.fen().starts_with("N7/7k/"), "{}", rules.fen());
}

#[test]
fn from_fen_rejects_garbage() {
    assert!(matches!(
        StandardRules::from_fen("not a position"),
        Err(RulesError::InvalidFen(_))
    ));
}
