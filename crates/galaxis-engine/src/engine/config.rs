use serde::{Deserialize, Serialize};

use super::piece_generator::PieceSeed;

/// What happens to the four-line-clear counter when a new game starts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum TetrisCounterPolicy {
    /// Reset to zero on every new game unless the five-tetris achievement is
    /// already unlocked.
    #[default]
    ResetPerGame,
    /// Keep counting across games, like the other lifetime statistics.
    Persistent,
}

/// Knobs for a [`GameSession`](super::GameSession).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Seed for the piece generator; random when `None`.
    pub seed: Option<PieceSeed>,
    pub tetris_counter: TetrisCounterPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.seed, None);
        assert!(config.tetris_counter.is_reset_per_game());
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"tetrisCounter":"persistent"}"#).unwrap();
        assert_eq!(config.tetris_counter, TetrisCounterPolicy::Persistent);
        assert_eq!(config.seed, None);

        let config: SessionConfig =
            serde_json::from_str(r#"{"seed":"000000000000000000000000000000ff"}"#).unwrap();
        assert_eq!(
            config.seed.unwrap().to_string(),
            "000000000000000000000000000000ff"
        );
        assert!(config.tetris_counter.is_reset_per_game());
    }
}
