//! Simulation timing and selection policy
//!
//! All delays, the per-message read probability and the campaign read-rate
//! range are collected here so tests can pin them. The defaults reproduce
//! the documented demo behavior.

use std::time::Duration;

/// How the campaign simulator picks which messages end up `read`.
///
/// `Prefix` marks the first `read_target` messages in send order. This is
/// the historical behavior and biases against later-sent messages; it is
/// kept as the default for compatibility. `RandomSample` draws a uniform
/// sample of size `read_target` without replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadSelection {
    #[default]
    Prefix,
    RandomSample,
}

/// Timing and probability knobs for the delivery simulators.
///
/// Delay fields are `(min, max)` ranges sampled uniformly per step.
#[derive(Debug, Clone)]
pub struct SimulationPolicy {
    /// Delay before a single simulated message is marked delivered.
    pub message_deliver_delay: (f64, f64),
    /// Further delay before it is marked read (if the coin flip passes).
    pub message_read_delay: (f64, f64),
    /// Probability that a single simulated message gets read at all.
    pub read_probability: f64,
    /// Fixed delay before delivery in the deterministic chat-send variant.
    pub chat_deliver_delay: f64,
    /// Fixed delay before read in the deterministic chat-send variant.
    pub chat_read_delay: f64,
    /// Per-message delay during a campaign's delivery phase.
    pub campaign_deliver_delay: (f64, f64),
    /// Pause between the delivery and read phases of a campaign.
    pub read_phase_pause: f64,
    /// Per-message delay during a campaign's read phase.
    pub campaign_read_delay: (f64, f64),
    /// Range the campaign read rate `r` is drawn from, once per run.
    pub read_rate: (f64, f64),
    /// Which messages the read phase selects.
    pub read_selection: ReadSelection,
}

impl Default for SimulationPolicy {
    fn default() -> Self {
        Self {
            message_deliver_delay: (10.0, 15.0),
            message_read_delay: (15.0, 20.0),
            read_probability: 0.7,
            chat_deliver_delay: 12.0,
            chat_read_delay: 17.0,
            campaign_deliver_delay: (0.5, 2.0),
            read_phase_pause: 5.0,
            campaign_read_delay: (1.0, 3.0),
            read_rate: (0.6, 0.7),
            read_selection: ReadSelection::Prefix,
        }
    }
}

impl SimulationPolicy {
    /// Compute how many of `total` messages the read phase should mark read,
    /// given a read rate `r` already drawn from `self.read_rate`.
    pub fn read_target(total: usize, r: f64) -> usize {
        (total as f64 * r).floor() as usize
    }

    pub(crate) fn duration(secs: f64) -> Duration {
        Duration::from_secs_f64(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_demo_timings() {
        let policy = SimulationPolicy::default();
        assert_eq!(policy.message_deliver_delay, (10.0, 15.0));
        assert_eq!(policy.message_read_delay, (15.0, 20.0));
        assert_eq!(policy.read_probability, 0.7);
        assert_eq!(policy.chat_deliver_delay, 12.0);
        assert_eq!(policy.chat_read_delay, 17.0);
        assert_eq!(policy.read_rate, (0.6, 0.7));
        assert_eq!(policy.read_selection, ReadSelection::Prefix);
    }

    #[test]
    fn read_target_floors() {
        assert_eq!(SimulationPolicy::read_target(10, 0.65), 6);
        assert_eq!(SimulationPolicy::read_target(10, 0.69), 6);
        assert_eq!(SimulationPolicy::read_target(3, 0.6), 1);
        assert_eq!(SimulationPolicy::read_target(0, 0.7), 0);
    }
}
