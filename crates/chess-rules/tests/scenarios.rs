//! Scenario tests for chess-rules: whole games and special moves played
//! through the public API.

use chess_core::{Color, PieceKind, PromotionPiece, Square};
use chess_rules::{
    legal_moves_at, perform_move, Board, Commit, FixedChoice, Game, GameError, GameStatus,
    MoveEvent, SideEffect,
};

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn play(game: &mut Game, moves: &[&str]) {
    for uci in moves {
        game.make_move_uci(uci)
            .unwrap_or_else(|e| panic!("{uci} failed: {e}"));
    }
}

#[test]
fn scholars_mate() {
    let mut game = Game::new();
    play(
        &mut game,
        &["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7"],
    );
    assert_eq!(
        game.status(),
        GameStatus::Checkmate {
            winner: Color::White
        }
    );
    assert_eq!(game.history().len(), 7);
}

#[test]
fn back_rank_mate_in_one() {
    let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    play(&mut game, &["a1a8"]);
    assert!(game.is_in_check(Color::Black));
    assert!(!game.has_any_legal_move(Color::Black));
    assert!(game.status().is_over());
}

#[test]
fn stalemate_after_quiet_move() {
    let mut game = Game::from_fen("7k/8/5QK1/8/8/8/8/8 w - - 0 1").unwrap();
    play(&mut game, &["f6f7"]);
    assert!(!game.is_in_check(Color::Black));
    assert_eq!(game.status(), GameStatus::Stalemate);
}

#[test]
fn castling_through_a_game() {
    let mut game = Game::new();
    play(
        &mut game,
        &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"],
    );
    let king_moves = game.legal_moves_from(Square::E1).unwrap();
    assert!(king_moves.contains(Square::G1));

    let event = game.make_move_uci("e1g1").unwrap();
    let MoveEvent::Completed(outcome) = event else {
        panic!("castling does not promote");
    };
    assert!(matches!(
        outcome.effect,
        Some(SideEffect::Castle {
            from: Square::H1,
            to: Square::F1,
            ..
        })
    ));
    assert_eq!(
        game.board().piece_on(Square::F1).map(|p| p.kind()),
        Some(PieceKind::Rook)
    );
    // History keeps the king's move even though the rook moved last.
    assert_eq!(game.history().last().map(|r| r.to), Some(Square::G1));
    assert_eq!(game.board().last_move().map(|r| r.to), Some(Square::F1));
}

#[test]
fn rook_round_trip_loses_castling() {
    let mut game = Game::from_fen("4k3/p7/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    play(&mut game, &["h1h2", "a7a6", "h2h1", "a6a5"]);
    let king_moves = game.legal_moves_from(Square::E1).unwrap();
    assert!(!king_moves.contains(Square::G1));
    assert!(king_moves.contains(Square::C1));
}

#[test]
fn king_round_trip_loses_castling() {
    let mut game = Game::from_fen("4k3/p7/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    play(&mut game, &["e1f1", "a7a6", "f1e1", "a6a5"]);
    let king_moves = game.legal_moves_from(Square::E1).unwrap();
    assert!(!king_moves.contains(Square::G1));
    assert!(!king_moves.contains(Square::C1));
}

#[test]
fn en_passant_lasts_one_ply() {
    let mut game = Game::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
    play(&mut game, &["d7d5"]);
    assert!(game.legal_moves_from(sq("e5")).unwrap().contains(sq("d6")));

    // White declines; after Black's reply the chance is gone.
    play(&mut game, &["e1d2", "e8e7"]);
    let moves = game.legal_moves_from(sq("e5")).unwrap();
    assert!(!moves.contains(sq("d6")));
}

#[test]
fn en_passant_capture_in_game() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    let MoveEvent::Completed(outcome) = game.make_move_uci("e5d6").unwrap() else {
        panic!("en passant does not promote");
    };
    assert!(matches!(outcome.effect, Some(SideEffect::EnPassant { .. })));
    assert!(game.board().piece_on(sq("d5")).is_none());
    assert_eq!(
        game.board().placement_fen(),
        "rnbqkbnr/1pp1pppp/p2P4/8/8/8/PPPP1PPP/RNBQKBNR"
    );
}

#[test]
fn promotion_choices() {
    for (choice, kind) in [
        (PromotionPiece::Queen, PieceKind::Queen),
        (PromotionPiece::Rook, PieceKind::Rook),
        (PromotionPiece::Bishop, PieceKind::Bishop),
        (PromotionPiece::Knight, PieceKind::Knight),
    ] {
        let mut game = Game::from_fen("8/4P1k1/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        game.make_move_with(sq("e7"), sq("e8"), &mut FixedChoice(Some(choice)))
            .unwrap();
        let piece = game.board().piece_on(sq("e8")).unwrap();
        assert_eq!(piece.kind(), kind);
        assert_eq!(piece.color(), Color::White);
    }
}

#[test]
fn promotion_by_capture() {
    let mut game = Game::from_fen("3rk3/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let event = game.make_move(sq("e7"), sq("d8")).unwrap();
    assert!(matches!(event, MoveEvent::PromotionRequired { .. }));
    let outcome = game.resolve_promotion(Some(PromotionPiece::Queen)).unwrap();
    assert!(outcome.record.piece_captured.is_some());
    assert!(game.is_in_check(Color::Black));
}

#[test]
fn pending_promotion_blocks_everything() {
    let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    game.make_move(sq("a7"), sq("a8")).unwrap();
    assert_eq!(
        game.make_move_uci("e1e2"),
        Err(GameError::PromotionPending(sq("a8")))
    );
    assert_eq!(game.pending_promotion(), Some(sq("a8")));
    game.resolve_promotion(None).unwrap();
    assert_eq!(game.pending_promotion(), None);
    assert_eq!(game.side_to_move(), Color::Black);
}

#[test]
#[should_panic(expected = "awaits promotion")]
fn generating_during_promotion_panics() {
    let mut board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let Commit::Promotion(_pending) = perform_move(&mut board, sq("a7"), sq("a8")) else {
        panic!("expected a promotion");
    };
    let _ = legal_moves_at(&mut board, Square::E1);
}

#[test]
fn checked_side_must_answer_the_check() {
    let mut game = Game::from_fen("4k3/8/8/8/8/4N3/3PPP2/r3K3 w - - 0 1").unwrap();
    assert!(game.is_in_check(Color::White));
    assert_eq!(game.status(), GameStatus::Ongoing);
    // Only the knight can interpose; the king has nowhere to go.
    assert_eq!(game.legal_moves_from(sq("e3")).unwrap().as_slice(), &[Square::D1]);
    assert!(game.legal_moves_from(Square::E1).unwrap().is_empty());
    assert!(game.legal_moves_from(sq("d2")).unwrap().is_empty());
}

#[test]
fn mate_detected_at_setup() {
    let game = Game::from_fen("4k3/8/8/8/8/8/3PPP2/r3K3 w - - 0 1").unwrap();
    assert_eq!(
        game.status(),
        GameStatus::Checkmate {
            winner: Color::Black
        }
    );
}
