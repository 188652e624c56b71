//! Players and roster validation.

use crate::config::BowlingConfig;
use crate::error::BowlingError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{instrument, warn};

/// A bowler in a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    id: String,
    name: String,
}

impl Player {
    /// Creates a player. The name is trimmed.
    pub fn new(id: impl Into<String>, name: impl AsRef<str>) -> Self {
        Self {
            id: id.into(),
            name: name.as_ref().trim().to_string(),
        }
    }

    /// Returns the player's unique id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Problems with a single name, empty when the name is acceptable.
#[instrument(skip(config))]
pub fn name_problems(name: &str, config: &BowlingConfig) -> Vec<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return vec!["Player name cannot be empty".to_string()];
    }

    let mut problems = Vec::new();
    let len = trimmed.chars().count();
    if len < *config.name_min_len() {
        problems.push(format!(
            "Player name '{}' must be at least {} characters",
            trimmed,
            config.name_min_len()
        ));
    }
    if len > *config.name_max_len() {
        problems.push(format!(
            "Player name '{}' must be at most {} characters",
            trimmed,
            config.name_max_len()
        ));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
        problems.push(format!(
            "Player name '{}' may only contain letters, numbers and spaces",
            trimmed
        ));
    }
    problems
}

/// Validates a roster for a new game.
///
/// Every problem found is reported in the details of a single
/// [`BowlingError::Setup`], in roster order.
#[instrument(skip(players, config), fields(count = players.len()))]
pub fn validate_players(players: &[Player], config: &BowlingConfig) -> Result<(), BowlingError> {
    let mut details = Vec::new();

    if players.is_empty() {
        details.push("At least one player is required".to_string());
    }
    if players.len() > *config.max_players() {
        details.push(format!(
            "A game allows at most {} players (got {})",
            config.max_players(),
            players.len()
        ));
    }

    let mut seen_names = HashSet::new();
    let mut seen_ids = HashSet::new();
    for player in players {
        details.extend(name_problems(player.name(), config));

        let key = player.name().trim().to_lowercase();
        if !key.is_empty() && !seen_names.insert(key) {
            details.push(format!("Duplicate player name '{}'", player.name()));
        }
        if !seen_ids.insert(player.id()) {
            details.push(format!("Duplicate player id '{}'", player.id()));
        }
    }

    if details.is_empty() {
        Ok(())
    } else {
        warn!(problems = details.len(), "Roster rejected");
        Err(BowlingError::setup("Invalid player roster", details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn roster(names: &[&str]) -> Vec<Player> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Player::new(format!("p{}", i), n))
            .collect()
    }

    #[test]
    fn test_valid_roster() {
        let config = BowlingConfig::default();
        assert!(validate_players(&roster(&["Alice", "Bob"]), &config).is_ok());
    }

    #[test]
    fn test_empty_roster_rejected() {
        let err = validate_players(&[], &BowlingConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Setup);
        assert_eq!(err.details(), ["At least one player is required"]);
    }

    #[test]
    fn test_too_many_players() {
        let players = roster(&["Aa", "Bb", "Cc", "Dd", "Ee", "Ff", "Gg"]);
        let err = validate_players(&players, &BowlingConfig::default()).unwrap_err();
        assert!(err.details()[0].contains("at most 6"));
    }

    #[test]
    fn test_configured_player_limit() {
        let config = BowlingConfig::default().with_max_players(2);
        let err = validate_players(&roster(&["Aa", "Bb", "Cc"]), &config).unwrap_err();
        assert_eq!(err.details(), ["A game allows at most 2 players (got 3)"]);
        assert!(validate_players(&roster(&["Aa", "Bb"]), &config).is_ok());
    }

    #[test]
    fn test_duplicate_names_case_insensitive() {
        let err = validate_players(&roster(&["Alice", "ALICE"]), &BowlingConfig::default())
            .unwrap_err();
        assert_eq!(err.details(), ["Duplicate player name 'ALICE'"]);
    }

    #[test]
    fn test_malformed_names_reported_together() {
        let err = validate_players(&roster(&["A", "Bob!", "   "]), &BowlingConfig::default())
            .unwrap_err();
        assert_eq!(err.details().len(), 3);
        assert!(err.details()[0].contains("at least 2"));
        assert!(err.details()[1].contains("letters, numbers and spaces"));
        assert_eq!(err.details()[2], "Player name cannot be empty");
    }

    #[test]
    fn test_long_name_rejected() {
        let problems = name_problems("abcdefghijklmnopqrstu", &BowlingConfig::default());
        assert_eq!(problems.len(), 1);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let players = vec![Player::new("x", "Alice"), Player::new("x", "Bob")];
        let err = validate_players(&players, &BowlingConfig::default()).unwrap_err();
        assert_eq!(err.details(), ["Duplicate player id 'x'"]);
    }

    #[test]
    fn test_name_is_trimmed() {
        assert_eq!(Player::new("1", "  Joe Smith ").name(), "Joe Smith");
    }
}
