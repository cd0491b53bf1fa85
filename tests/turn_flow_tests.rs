//! Turn flow through the session: stage routing, allowances, penalties
//! and rotation, driven by scripted dice.

use qwixx_engine::core::{PenaltyReason, PlayerId};
use qwixx_engine::{
    Color, DiceRoller, GameConfig, GameError, GameEvent, GameSession, PlayerSetup, RuleViolation, Stage, TurnState,
};

/// Faces are `[white1, white2, red, yellow, green, blue]`.
fn two_humans(rolls: &[[u8; 6]]) -> GameSession {
    GameSession::with_dice(GameConfig::two_players(), DiceRoller::scripted(rolls.iter().copied()).unwrap()).unwrap()
}

/// Pass for everyone until the turn is over.
fn pass_remaining(game: &mut GameSession) {
    while game.state().open_stage().is_some() {
        for player in PlayerId::all(game.player_count()) {
            game.player_done(player).unwrap();
        }
    }
}

fn penalties(game: &GameSession, player: PlayerId) -> u8 {
    game.player(player).unwrap().sheet.penalties()
}

/// Rolling player makes no mark in either stage: one penalty, then rotate.
#[test]
fn test_zero_marks_penalized_and_rotated() {
    let mut game = two_humans(&[[3, 4, 1, 2, 5, 6]]);
    game.roll().unwrap();
    // seat 1 marks, seat 0 does not
    game.mark(PlayerId(1), Color::Red, 7).unwrap();
    game.player_done(PlayerId(0)).unwrap();
    assert_eq!(game.state(), TurnState::Stage2Moves);
    game.player_done(PlayerId(0)).unwrap();

    assert_eq!(penalties(&game, PlayerId(0)), 1);
    assert_eq!(penalties(&game, PlayerId(1)), 0);
    assert_eq!(game.rolling_player(), PlayerId(1));
    assert_eq!(game.state(), TurnState::AwaitingRoll);
    assert!(game.player(PlayerId(1)).unwrap().active);
    assert!(!game.player(PlayerId(0)).unwrap().active);

    let penalty = game.events().iter().find_map(|r| match &r.event {
        GameEvent::PenaltyApplied { player, reason, total } => Some((*player, *reason, *total)),
        _ => None,
    });
    assert_eq!(penalty, Some((PlayerId(0), PenaltyReason::NoMarks, 1)));
}

/// Passive players never take penalties.
#[test]
fn test_passive_player_not_penalized() {
    let mut game = two_humans(&[[3, 4, 1, 2, 5, 6]]);
    game.roll().unwrap();
    game.mark(PlayerId(0), Color::Yellow, 7).unwrap();
    pass_remaining(&mut game);

    assert_eq!(penalties(&game, PlayerId(0)), 0);
    assert_eq!(penalties(&game, PlayerId(1)), 0);
}

/// Nobody can use the roll at all: penalty for the roller, next turn.
#[test]
fn test_no_legal_moves_penalty() {
    let mut game = two_humans(&[[5, 6, 1, 1, 1, 6], [5, 6, 1, 1, 1, 6], [6, 6, 6, 6, 6, 6]]);

    // turn 1: both take green 11, seat 0 adds blue 11 in stage 2
    game.roll().unwrap();
    game.mark(PlayerId(0), Color::Green, 11).unwrap();
    game.mark(PlayerId(1), Color::Green, 11).unwrap();
    game.mark(PlayerId(0), Color::Blue, 11).unwrap();
    assert_eq!(game.rolling_player(), PlayerId(1));

    // turn 2: seat 1 takes blue 11
    game.roll().unwrap();
    game.mark(PlayerId(1), Color::Blue, 11).unwrap();
    pass_remaining(&mut game);
    assert_eq!(game.rolling_player(), PlayerId(0));

    // turn 3: twelves everywhere, none of them playable
    let dice = game.roll().unwrap();
    assert_eq!(dice.white_sum(), 12);
    assert_eq!(game.state(), TurnState::AwaitingRoll);
    assert_eq!(game.rolling_player(), PlayerId(1));
    assert_eq!(penalties(&game, PlayerId(0)), 1);
    assert!(game.events().iter().any(|r| matches!(
        r.event,
        GameEvent::PenaltyApplied {
            reason: PenaltyReason::NoLegalMoves,
            ..
        }
    )));
    assert!(game.message().contains("No legal moves"));
}

/// Stage 2 allows only the rolling player, and only once.
#[test]
fn test_stage2_allowances() {
    let mut game = two_humans(&[[3, 4, 1, 2, 5, 6]]);
    game.roll().unwrap();
    game.mark(PlayerId(0), Color::Red, 7).unwrap();
    game.player_done(PlayerId(1)).unwrap();
    assert_eq!(game.state(), TurnState::Stage2Moves);

    assert_eq!(
        game.mark(PlayerId(1), Color::Yellow, 5),
        Err(GameError::Rule(RuleViolation::NotRollingPlayer(PlayerId(1))))
    );
    // white sum is not a colored combination here
    assert!(matches!(
        game.mark(PlayerId(0), Color::Yellow, 7),
        Err(GameError::Rule(RuleViolation::NotOffered { .. }))
    ));

    let outcome = game.mark(PlayerId(0), Color::Yellow, 6).unwrap();
    assert_eq!(outcome.stage, Stage::ColoredCombination);
    // one colored move ends the turn
    assert_eq!(game.state(), TurnState::AwaitingRoll);
    assert_eq!(game.player(PlayerId(0)).unwrap().sheet.total_marks(), 2);
}

/// Without a stage-1 move for anyone, the roll goes straight to stage 2.
#[test]
fn test_straight_to_stage2() {
    // white sum 12: only green/blue could take it, both already past it
    let mut game = two_humans(&[[5, 6, 1, 1, 1, 6], [5, 6, 1, 1, 1, 6], [6, 6, 1, 1, 6, 6]]);
    game.roll().unwrap();
    game.mark(PlayerId(0), Color::Green, 11).unwrap();
    game.mark(PlayerId(1), Color::Green, 11).unwrap();
    game.mark(PlayerId(0), Color::Blue, 11).unwrap();
    game.roll().unwrap();
    game.mark(PlayerId(1), Color::Blue, 11).unwrap();
    pass_remaining(&mut game);

    game.roll().unwrap();
    assert_eq!(game.state(), TurnState::Stage2Moves);
    assert!(game.legal_moves(PlayerId(1)).unwrap().is_empty());
    assert_eq!(game.legal_moves(PlayerId(0)).unwrap().len(), 2);
    game.mark(PlayerId(0), Color::Red, 7).unwrap();
    assert_eq!(penalties(&game, PlayerId(0)), 0);
}

/// Counters reset at every turn.
#[test]
fn test_counters_reset_each_turn() {
    let mut game = two_humans(&[[1, 2, 1, 1, 1, 1], [2, 2, 1, 1, 1, 1]]);
    game.roll().unwrap();
    game.mark(PlayerId(1), Color::Red, 3).unwrap();
    pass_remaining(&mut game);

    game.roll().unwrap();
    assert!(game.is_pending(PlayerId(1)));
    assert_eq!(game.player(PlayerId(1)).unwrap().counters.marks(), 0);
    game.mark(PlayerId(1), Color::Red, 4).unwrap();
}

/// The event log numbers turns and keeps order within a turn.
#[test]
fn test_event_log_turns() {
    let mut game = two_humans(&[[3, 4, 1, 2, 5, 6]]);
    game.roll().unwrap();
    game.mark(PlayerId(0), Color::Red, 7).unwrap();
    pass_remaining(&mut game);

    let turn1: Vec<_> = game.events().for_turn(1).map(|r| r.sequence).collect();
    assert_eq!(turn1, (0..turn1.len() as u32).collect::<Vec<_>>());
    assert!(game.events().for_turn(1).any(|r| matches!(r.event, GameEvent::TurnChanged { .. })));
    assert_eq!(game.turn(), 2);
}

/// Larger tables rotate through every seat.
#[test]
fn test_rotation_five_players() {
    let players = (1..=5).map(|i| PlayerSetup::human(format!("P{i}"))).collect();
    let config = GameConfig::new(players);
    let mut game = GameSession::with_dice(config, DiceRoller::scripted([[3, 4, 1, 2, 5, 6]]).unwrap()).unwrap();

    let mut order = Vec::new();
    for _ in 0..6 {
        order.push(game.rolling_player());
        game.roll().unwrap();
        let rolling = game.rolling_player();
        game.mark(rolling, Color::Red, 7).ok();
        pass_remaining(&mut game);
    }
    let seats: Vec<u8> = order.iter().map(|p| p.0).collect();
    assert_eq!(seats, vec![0, 1, 2, 3, 4, 0]);
}
