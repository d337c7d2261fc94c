use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Spends the cosmetic delays between conversation steps.
///
/// Delays exist only so a conversation feels paced to the person reading it;
/// no state depends on them. The interpreter calls the pacer synchronously
/// and continues once `pause` returns.
pub trait Pacer: Send {
    fn pause(&mut self, delay: Duration);
}

/// Skips every delay. The default, and what tests use.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Pacer for Immediate {
    fn pause(&mut self, _delay: Duration) {}
}

/// Sleeps the calling thread for each delay. Suitable for terminal hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sleep;

impl Pacer for Sleep {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// The available pacing strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PacingChoice {
    /// Run continuations back to back.
    #[default]
    Immediate,
    /// Block for the configured delays.
    Sleep,
}

impl PacingChoice {
    pub fn into_pacer(self) -> Box<dyn Pacer> {
        match self {
            PacingChoice::Immediate => Box::new(Immediate),
            PacingChoice::Sleep => Box::new(Sleep),
        }
    }
}

/// Delay lengths, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pacing {
    /// After a message node, before following its edge.
    pub message_delay_ms: u64,
    /// After announcing a redirect, before opening the URL.
    pub redirect_delay_ms: u64,
    /// After accepting a reply, before entering the next node.
    pub reply_delay_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            message_delay_ms: 1000,
            redirect_delay_ms: 2000,
            reply_delay_ms: 300,
        }
    }
}

impl Pacing {
    pub fn message_delay(&self) -> Duration {
        Duration::from_millis(self.message_delay_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}
