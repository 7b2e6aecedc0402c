//! Rules configuration.
//!
//! Every tunable number the rules consult lives in `RulesConfig`. The
//! moderator's setup screen fills it in; the engine never hardcodes these
//! values outside `Default`.

use serde::{Deserialize, Serialize};

/// Numeric rule settings.
///
/// ## Example
///
/// ```
/// use mafia_engine::core::RulesConfig;
///
/// let config = RulesConfig::default()
///     .with_bullets(3, 1)
///     .with_killer_frequency(1);
///
/// assert_eq!(config.blank_bullets, 3);
/// assert_eq!(config.killer_frequency, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulesConfig {
    /// Minimum number of participants.
    pub min_players: usize,

    /// Blank bullets available to the gunner.
    #[serde(alias = "maxBlankBullets")]
    pub blank_bullets: u32,

    /// Live bullets available to the gunner.
    #[serde(alias = "maxLiveBullets")]
    pub live_bullets: u32,

    /// Alliance capacity, leader excluded.
    #[serde(alias = "framasonMaxMembers")]
    pub alliance_max_size: usize,

    /// Negotiation is available while living mafia count is at most this.
    pub negotiation_threshold: usize,

    /// Total sniper shots per game.
    pub sniper_max_shots: u32,

    /// Killer acts on nights 1, 1+f, 1+2f, ...
    pub killer_frequency: u32,

    /// Times the doctor may heal themself.
    pub doctor_self_heal_max: u32,

    /// Times the mafia doctor may heal themself.
    pub mafia_doctor_self_heal_max: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            min_players: 8,
            blank_bullets: 2,
            live_bullets: 1,
            alliance_max_size: 2,
            negotiation_threshold: 2,
            sniper_max_shots: 2,
            killer_frequency: 2,
            doctor_self_heal_max: 1,
            mafia_doctor_self_heal_max: 1,
        }
    }
}

impl RulesConfig {
    /// Set the minimum player count.
    #[must_use]
    pub fn with_min_players(mut self, min: usize) -> Self {
        self.min_players = min;
        self
    }

    /// Set the ammunition maxima.
    #[must_use]
    pub fn with_bullets(mut self, blank: u32, live: u32) -> Self {
        self.blank_bullets = blank;
        self.live_bullets = live;
        self
    }

    /// Set the alliance capacity.
    #[must_use]
    pub fn with_alliance_max_size(mut self, size: usize) -> Self {
        self.alliance_max_size = size;
        self
    }

    /// Set the negotiation threshold.
    #[must_use]
    pub fn with_negotiation_threshold(mut self, threshold: usize) -> Self {
        self.negotiation_threshold = threshold;
        self
    }

    /// Set the sniper's shot cap.
    #[must_use]
    pub fn with_sniper_shots(mut self, shots: u32) -> Self {
        self.sniper_max_shots = shots;
        self
    }

    /// Set how often the killer acts. Zero is treated as every night.
    #[must_use]
    pub fn with_killer_frequency(mut self, every: u32) -> Self {
        self.killer_frequency = every;
        self
    }

    /// Set both self-heal caps.
    #[must_use]
    pub fn with_self_heals(mut self, doctor: u32, mafia_doctor: u32) -> Self {
        self.doctor_self_heal_max = doctor;
        self.mafia_doctor_self_heal_max = mafia_doctor;
        self
    }

    /// Whether the periodic killer acts on night `round`.
    #[must_use]
    pub fn killer_acts_on(&self, round: u32) -> bool {
        let every = self.killer_frequency.max(1);
        round >= 1 && (round - 1) % every == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_killer_schedule() {
        let config = RulesConfig::default();
        let nights: Vec<_> = (0..=6).filter(|r| config.killer_acts_on(*r)).collect();
        assert_eq!(nights, vec![1, 3, 5]);

        let every = RulesConfig::default().with_killer_frequency(0);
        assert!(every.killer_acts_on(1));
        assert!(every.killer_acts_on(2));
        assert!(!every.killer_acts_on(0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RulesConfig = serde_json::from_str(r#"{"maxLiveBullets":3}"#).unwrap();
        assert_eq!(config.live_bullets, 3);
        assert_eq!(config.blank_bullets, 2);
        assert_eq!(config.min_players, 8);
    }
}
