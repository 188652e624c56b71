//! The game aggregate and its roll-by-roll state machine.
//!
//! A [`Game`] owns ten frames per player plus the turn pointers. Every
//! transition returns a new value; the previous snapshot is never
//! touched.

use crate::config::BowlingConfig;
use crate::contracts::{Contract, RollContract};
use crate::error::BowlingError;
use crate::frame::{Frame, LAST_FRAME, Roll, empty_frames};
use crate::player::{Player, validate_players};
use crate::scoring::{calculate_game_score, running_total};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, instrument};

static GAME_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_game_id(date: &DateTime<Utc>) -> String {
    let n = GAME_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("game-{}-{}", date.timestamp_millis(), n)
}

/// A bowling game for one to six players.
///
/// Serializes to plain JSON with camelCase field names and round-trips
/// losslessly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub(crate) id: String,
    pub(crate) date: DateTime<Utc>,
    pub(crate) players: Vec<Player>,
    pub(crate) frames: Vec<Vec<Frame>>,
    pub(crate) current_player: usize,
    pub(crate) current_frame: usize,
    pub(crate) is_complete: bool,
    pub(crate) scores: Vec<u16>,
}

impl Game {
    /// Returns the game id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns when the game was created.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Returns the roster in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns every player's frames, indexed by player then frame.
    pub fn frames(&self) -> &[Vec<Frame>] {
        &self.frames
    }

    /// Returns one player's frames.
    pub fn player_frames(&self, player: usize) -> Option<&[Frame]> {
        self.frames.get(player).map(Vec::as_slice)
    }

    /// Index of the player due to roll.
    pub fn current_player(&self) -> usize {
        self.current_player
    }

    /// Index (0-9) of the frame being bowled.
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Returns true once every player has finished the tenth frame.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Final scores per player, populated only once the game is complete.
    pub fn scores(&self) -> &[u16] {
        &self.scores
    }

    /// Returns the frame the next ball goes into.
    pub fn active_frame(&self) -> Option<&Frame> {
        self.frames
            .get(self.current_player)
            .and_then(|frames| frames.get(self.current_frame))
    }

    /// Returns the player due to roll.
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    /// Highest resolved cumulative score for a player so far.
    pub fn running_score(&self, player: usize) -> u16 {
        self.player_frames(player).map(running_total).unwrap_or(0)
    }

    /// Indices of the players holding the top final score.
    ///
    /// Empty until the game is complete.
    pub fn winners(&self) -> Vec<usize> {
        let Some(best) = self.scores.iter().max() else {
            return Vec::new();
        };
        self.scores
            .iter()
            .enumerate()
            .filter(|(_, s)| *s == best)
            .map(|(i, _)| i)
            .collect()
    }

    /// Validates and applies one roll, returning the next snapshot.
    ///
    /// The roll validator is the single source of truth for legality; the
    /// transition's invariants are re-checked in debug builds.
    ///
    /// # Errors
    ///
    /// Returns [`BowlingError::RollRejected`] if the roll breaks the rules,
    /// leaving `self` unchanged, or [`BowlingError::StateCorruption`] if a
    /// postcondition fails.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn roll(&self, pins: u8) -> Result<Game, BowlingError> {
        RollContract::pre(self, &pins)?;

        let next = apply_roll(self, pins);

        #[cfg(debug_assertions)]
        RollContract::post(self, &next)?;

        Ok(next)
    }

    /// Builds a game from a roster and replays a pin sequence through [`Game::roll`].
    ///
    /// # Errors
    ///
    /// Fails on an invalid roster or on the first illegal roll.
    #[instrument(skip(players, pins), fields(rolls = pins.len()))]
    pub fn replay(players: Vec<Player>, pins: &[u8]) -> Result<Game, BowlingError> {
        let mut game = create_new_game(players)?;
        for &p in pins {
            game = game.roll(p)?;
        }
        Ok(game)
    }
}

/// Creates a game with the default roster limits.
///
/// # Errors
///
/// Returns [`BowlingError::Setup`] for an empty or oversized roster, or
/// for duplicate or malformed names.
pub fn create_new_game(players: Vec<Player>) -> Result<Game, BowlingError> {
    create_new_game_with(players, &BowlingConfig::default())
}

/// Creates a game with custom roster limits.
///
/// # Errors
///
/// Returns [`BowlingError::Setup`] if the roster fails validation.
#[instrument(skip(players, config), fields(players = players.len()))]
pub fn create_new_game_with(
    players: Vec<Player>,
    config: &BowlingConfig,
) -> Result<Game, BowlingError> {
    validate_players(&players, config)?;

    let date = Utc::now();
    let frames = players.iter().map(|_| empty_frames()).collect();
    let game = Game {
        id: next_game_id(&date),
        date,
        players,
        frames,
        current_player: 0,
        current_frame: 0,
        is_complete: false,
        scores: Vec::new(),
    };

    info!(game_id = %game.id, players = game.players.len(), "Game created");
    Ok(game)
}

/// Returns true if every player's tenth frame has all the balls it is owed.
pub fn all_finished(frames: &[Vec<Frame>]) -> bool {
    !frames.is_empty()
        && frames.iter().all(|player_frames| {
            player_frames
                .get(LAST_FRAME)
                .is_some_and(|f| f.is_finished(LAST_FRAME))
        })
}

/// Returns true once the game has ended.
pub fn is_game_complete(game: &Game) -> bool {
    game.is_complete
}

/// Applies an already-validated roll and returns the next snapshot.
///
/// Appends the ball to the active frame, refreshes that frame's flags,
/// rescores the rolling player's frames, advances the turn pointers and
/// settles completion. Callers must run [`crate::validate_roll`] first;
/// [`Game::roll`] does both.
#[instrument(
    skip(game),
    fields(game_id = %game.id, player = game.current_player, frame = game.current_frame)
)]
pub fn apply_roll(game: &Game, pins: u8) -> Game {
    let mut next = game.clone();
    let player = next.current_player;
    let index = next.current_frame;

    let Some(player_frames) = next.frames.get_mut(player) else {
        return next;
    };
    let Some(frame) = player_frames.get_mut(index) else {
        return next;
    };
    frame.push_roll(Roll::new(pins));
    let finished = frame.is_finished(index);

    *player_frames = calculate_game_score(player_frames);

    if finished {
        advance_turn(&mut next);
    }

    if all_finished(&next.frames) {
        next.scores = next
            .frames
            .iter()
            .map(|f| f.get(LAST_FRAME).map_or(0, Frame::cumulative_score))
            .collect();
        next.is_complete = true;
        info!(game_id = %next.id, scores = ?next.scores, "Game complete");
    }

    next
}

/// Moves the pointers past a finished frame.
///
/// Players bowl each frame in turn; after the last player the next frame
/// starts. The tenth frame rotates players without moving the frame
/// pointer.
fn advance_turn(game: &mut Game) {
    let count = game.players.len().max(1);
    let next_player = (game.current_player + 1) % count;

    if game.current_frame < LAST_FRAME {
        if next_player == 0 {
            game.current_frame += 1;
        }
        game.current_player = next_player;
    } else if !all_finished(&game.frames) {
        game.current_player = next_player;
    }

    debug!(
        player = game.current_player,
        frame = game.current_frame,
        "Turn advanced"
    );
}
