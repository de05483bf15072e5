//! Integration tests for the Hexbloom engine.
//!
//! These tests drive complete games from the first deal to game over.

use hexbloom_core::*;
use pretty_assertions::assert_eq;

/// Play until game over or `max_moves`, checking invariants after every move
fn play_out(mut game: GameState, bot: &mut Bot, seed: u64, max_moves: usize) -> GameState {
    let mut rng = EntropyRng::seeded(seed);
    let mut moves = 0;

    while !game.game_over && moves < max_moves {
        let action = match bot.choose_action(&game) {
            Some(action) => action,
            None => break,
        };
        let before = game.score;
        let (next, events) = game
            .apply_action(action, &mut rng)
            .expect("bot picked an invalid action");

        assert!(next.score >= before);
        assert_eq!(next.moves, game.moves + 1);
        assert!(matches!(events.first(), Some(GameEvent::PiecePlaced { .. })));
        assert!(find_clears(topology(), &next.board).is_empty());
        assert!(next.board.matches_topology(topology()));
        if !next.game_over {
            assert!(!next.hand.is_empty());
        }

        game = next;
        moves += 1;
    }

    game
}

#[test]
fn test_endless_game_with_greedy_bot() {
    let mut rng = EntropyRng::seeded(100);
    let game = create_initial_game_state(&mut rng);
    let mut bot = Bot::with_seed(BotDifficulty::Greedy, 100);

    let game = play_out(game, &mut bot, 101, 300);
    assert!(game.moves > 0);
    assert!(game.score > 0 || game.game_over);
}

#[test]
fn test_endless_game_with_easy_bot_ends() {
    let mut rng = EntropyRng::seeded(200);
    let game = create_initial_game_state(&mut rng);
    let mut bot = Bot::with_seed(BotDifficulty::Easy, 200);

    let game = play_out(game, &mut bot, 201, 5_000);
    // Random play fills the board long before five thousand moves
    assert!(game.game_over);
    assert!(game.valid_actions().is_empty());
}

#[test]
fn test_daily_game_with_greedy_bot() {
    let game = create_daily_game_state_for(DailyDate::new(2026, 10, 16));
    let total = game.daily_total_hits;
    let mut bot = Bot::with_seed(BotDifficulty::Greedy, 300);

    let game = play_out(game, &mut bot, 301, 300);
    assert_eq!(game.daily_total_hits, total);
    assert_eq!(
        game.daily_remaining_hits,
        game.daily_hits.values().sum::<u32>()
    );
    assert_eq!(game.daily_completed, game.daily_remaining_hits == 0);
    assert!(game.golden_cell_id.is_none());
}

#[test]
fn test_daily_games_replay_identically() {
    let date: DailyDate = "2026-04-01".parse().unwrap();
    let play = || {
        let game = create_daily_game_state_for(date);
        let shapes: Vec<_> = game
            .hand
            .iter()
            .map(|p| (p.shape.id.clone(), p.rotation))
            .collect();
        (game.daily_hits.clone(), shapes, game.daily_rng)
    };
    assert_eq!(play(), play());
}

#[test]
fn test_state_survives_json_mid_game() {
    let mut rng = EntropyRng::seeded(400);
    let game = create_initial_game_state(&mut rng);
    let mut bot = Bot::with_seed(BotDifficulty::Greedy, 400);
    let game = play_out(game, &mut bot, 401, 10);

    let json = game.to_json().unwrap();
    let restored = GameState::from_json(&json).unwrap();
    assert_eq!(restored, game);
    assert!(GameState::from_json("{\"mode\":\"endless\"}").is_err());
}

#[test]
fn test_three_clears_on_streak_two() {
    let mut game = GameState::blank(GameMode::Endless);
    let center = HexCoord::new(0, 0);
    for n in center.neighbors() {
        game.board.fill(&n.id());
    }
    for k in [-3, -2, -1, 1, 2, 3] {
        game.board.fill(&HexCoord::new(k, 0).id());
        game.board.fill(&HexCoord::new(0, k).id());
    }
    game.board.fill(&HexCoord::new(3, -2).id());
    game.streak = 2;
    let piece = ActivePiece::new(&all_piece_shapes()[0], 0);
    game.hand = vec![piece.clone()];
    game.hand_slots = [Some(piece.id), None, None];

    let mut rng = EntropyRng::seeded(500);
    let (next, events) = game
        .apply_action(GameAction::place(piece.id, center.id()), &mut rng)
        .unwrap();

    assert_eq!(next.score, 72);
    assert_eq!(next.streak, 3);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::PointsScored { points: 72, total: 72, .. }
    )));
}

#[test]
fn test_regenerated_daily_state_is_identical() {
    let date = DailyDate::new(2026, 10, 16);
    let a = create_daily_game_state_for(date);
    let b = create_daily_game_state_for(date);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    assert_eq!(a, b);
}
