//! Property tests over randomly bowled legal games.

use proptest::prelude::*;
use strictly_bowling::{
    FRAMES_PER_GAME, Game, LAST_FRAME, Player, calculate_game_score, can_display_score,
    create_new_game, is_game_complete, remaining_pins, validate_game_state, validate_roll,
};

const NAMES: [&str; 6] = ["Alice", "Bob", "Carol", "Dave", "Erin", "Frank"];

fn roster(count: usize) -> Vec<Player> {
    NAMES
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, name)| Player::new(format!("p{}", i), name))
        .collect()
}

/// Bowls until the choices run out or the game ends, mapping each raw
/// choice onto the legal pin range. Returns every snapshot along the way.
fn bowl(players: usize, choices: &[u8]) -> Vec<Game> {
    let mut game = create_new_game(roster(players)).expect("valid roster");
    let mut snapshots = vec![game.clone()];
    for &choice in choices {
        let Some(max) = remaining_pins(&game) else {
            break;
        };
        let pins = choice % (max + 1);
        game = game.roll(pins).expect("legal roll");
        snapshots.push(game.clone());
    }
    snapshots
}

fn tenth_frame_done(game: &Game) -> bool {
    game.frames().iter().all(|frames| {
        let tenth = &frames[LAST_FRAME];
        let owed = if tenth.is_strike() || tenth.is_spare() { 3 } else { 2 };
        tenth.rolls().len() == owed
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn every_snapshot_passes_validation(
        players in 1usize..=4,
        choices in proptest::collection::vec(any::<u8>(), 0..100),
    ) {
        for game in bowl(players, &choices) {
            let result = validate_game_state(&game);
            prop_assert!(result.valid, "{:?}", result.errors);
        }
    }

    #[test]
    fn flags_follow_rolls(choices in proptest::collection::vec(any::<u8>(), 0..30)) {
        let game = bowl(1, &choices).pop().expect("at least one snapshot");
        for frame in &game.frames()[0] {
            if let Some(first) = frame.pins_at(0) {
                prop_assert_eq!(frame.is_strike(), first == 10);
            }
            if let (Some(a), Some(b)) = (frame.pins_at(0), frame.pins_at(1)) {
                prop_assert_eq!(frame.is_spare(), !frame.is_strike() && a + b == 10);
            }
        }
    }

    #[test]
    fn regular_frames_never_exceed_ten_pins(
        choices in proptest::collection::vec(any::<u8>(), 0..30),
    ) {
        let game = bowl(1, &choices).pop().expect("at least one snapshot");
        for frame in &game.frames()[0][..LAST_FRAME] {
            prop_assert!(frame.pin_total() <= 10);
        }
    }

    #[test]
    fn score_calculation_is_idempotent(choices in proptest::collection::vec(any::<u8>(), 0..30)) {
        let game = bowl(1, &choices).pop().expect("at least one snapshot");
        let frames = &game.frames()[0];
        let once = calculate_game_score(frames);
        let twice = calculate_game_score(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(&once, frames);
    }

    #[test]
    fn resolved_cumulative_scores_never_decrease(
        choices in proptest::collection::vec(any::<u8>(), 0..30),
    ) {
        let game = bowl(1, &choices).pop().expect("at least one snapshot");
        let frames = &game.frames()[0];
        for i in 0..FRAMES_PER_GAME {
            if !can_display_score(frames, i) {
                continue;
            }
            let previous = if i == 0 { 0 } else { frames[i - 1].cumulative_score() };
            prop_assert!(frames[i].cumulative_score() >= previous);
            prop_assert_eq!(frames[i].cumulative_score(), previous + frames[i].score());
        }
    }

    #[test]
    fn completion_is_exact(
        players in 1usize..=3,
        choices in proptest::collection::vec(any::<u8>(), 0..80),
    ) {
        for game in bowl(players, &choices) {
            prop_assert_eq!(is_game_complete(&game), tenth_frame_done(&game));
            prop_assert_eq!(game.scores().is_empty(), !game.is_complete());
        }
    }

    #[test]
    fn enough_rolls_always_finish(
        players in 1usize..=6,
        choices in proptest::collection::vec(any::<u8>(), 130..140),
    ) {
        let game = bowl(players, &choices).pop().expect("at least one snapshot");
        prop_assert!(game.is_complete());
        prop_assert_eq!(game.scores().len(), players);
        for score in game.scores() {
            prop_assert!(*score <= 300);
        }
    }

    #[test]
    fn validator_and_remaining_pins_agree(
        choices in proptest::collection::vec(any::<u8>(), 0..30),
        pins in 0u8..=15,
    ) {
        let game = bowl(2, &choices).pop().expect("at least one snapshot");
        let accepted = validate_roll(&game, pins).is_ok();
        let expected = remaining_pins(&game).is_some_and(|max| pins <= max);
        prop_assert_eq!(accepted, expected);
    }

    #[test]
    fn json_round_trip_is_lossless(choices in proptest::collection::vec(any::<u8>(), 0..40)) {
        let game = bowl(2, &choices).pop().expect("at least one snapshot");
        let json = serde_json::to_string(&game).expect("serializable");
        let back: Game = serde_json::from_str(&json).expect("deserializable");
        prop_assert_eq!(back, game);
    }
}
