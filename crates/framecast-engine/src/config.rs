//! Engine configuration.

use std::time::Duration;

use framecast_game::GameKind;
use serde::{Deserialize, Serialize};

/// Timing and sizing knobs for one engine instance.
///
/// One instance hosts exactly one [`GameKind`]. Every interval is a
/// wall-clock period; the defaults are the production values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Which game is played.
    pub game: GameKind,

    /// How often every stored frame is resent.
    pub broadcast_interval: Duration,

    /// Turn clock granularity. Each tick removes one second of turn time.
    pub clock_interval: Duration,

    /// How often the inactivity reaper runs.
    pub reaper_interval: Duration,

    /// A stream idle for longer than this is evicted.
    pub inactivity_timeout: Duration,

    /// Delay between conclusion and teardown (or puzzle reset).
    pub grace_period: Duration,

    /// How long an invalid-move message stays on a viewer's frame.
    pub message_clear_delay: Duration,

    /// Starting value of each session's turn clock, in clock ticks.
    /// 0 disables the clock.
    pub turn_seconds: u32,

    /// Restart the clock after every accepted move instead of counting
    /// down over the whole game.
    pub reset_clock_on_move: bool,

    /// Lower bound of the AI's thinking delay.
    pub ai_delay_min: Duration,

    /// Upper bound of the AI's thinking delay.
    pub ai_delay_max: Duration,

    /// Capacity of the engine's command channel.
    pub command_buffer: usize,

    /// Outbound items each stream may buffer before it counts as
    /// congested.
    pub stream_buffer: usize,

    /// Secret words for the word game. Empty means the built-in list.
    pub words: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            game: GameKind::default(),
            broadcast_interval: Duration::from_millis(100),
            clock_interval: Duration::from_secs(1),
            reaper_interval: Duration::from_secs(5),
            inactivity_timeout: Duration::from_secs(15),
            grace_period: Duration::from_secs(10),
            message_clear_delay: Duration::from_secs(2),
            turn_seconds: 90,
            reset_clock_on_move: false,
            ai_delay_min: Duration::from_millis(500),
            ai_delay_max: Duration::from_millis(2000),
            command_buffer: 64,
            stream_buffer: 8,
            words: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// A default configuration for `game`.
    pub fn for_game(game: GameKind) -> Self {
        Self {
            game,
            ..Self::default()
        }
    }

    /// The clock's starting value, or `None` when the clock is off.
    pub fn initial_clock(&self) -> Option<u32> {
        (self.turn_seconds > 0).then_some(self.turn_seconds)
    }

    /// The thinking delay range with its bounds in order.
    pub fn ai_delay_range(&self) -> (Duration, Duration) {
        if self.ai_delay_min <= self.ai_delay_max {
            (self.ai_delay_min, self.ai_delay_max)
        } else {
            (self.ai_delay_max, self.ai_delay_min)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_production_timings() {
        let config = EngineConfig::default();
        assert_eq!(config.broadcast_interval, Duration::from_millis(100));
        assert_eq!(config.reaper_interval, Duration::from_secs(5));
        assert_eq!(config.inactivity_timeout, Duration::from_secs(15));
        assert_eq!(config.grace_period, Duration::from_secs(10));
        assert_eq!(config.message_clear_delay, Duration::from_secs(2));
        assert_eq!(config.game, GameKind::ConnectFour);
    }

    #[test]
    fn test_initial_clock_zero_disables() {
        let config = EngineConfig {
            turn_seconds: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.initial_clock(), None);
        assert_eq!(EngineConfig::default().initial_clock(), Some(90));
    }

    #[test]
    fn test_ai_delay_range_swapped_bounds_reordered() {
        let config = EngineConfig {
            ai_delay_min: Duration::from_secs(3),
            ai_delay_max: Duration::from_secs(1),
            ..EngineConfig::default()
        };
        assert_eq!(
            config.ai_delay_range(),
            (Duration::from_secs(1), Duration::from_secs(3))
        );
    }

    #[test]
    fn test_deserialize_partial_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"game":"tic-tac-toe","turn_seconds":30}"#).unwrap();
        assert_eq!(config.game, GameKind::TicTacToe);
        assert_eq!(config.turn_seconds, 30);
        assert_eq!(config.stream_buffer, 8);
    }
}
