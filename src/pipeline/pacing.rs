use std::time::Duration;
use rand::Rng;
use crate::config::PacingConfig;

/// Delays that make the simulated pipeline look like real command output.
pub trait Pacing: Send + Sync {
    /// Pause after each delivered log line.
    fn line_delay(&self) -> Duration;

    /// Pause after a step completes, before the next one starts.
    fn step_pause(&self) -> Duration;
}

/// Uniformly random line delay in `[min, max]` and a fixed step pause.
#[derive(Debug, Clone)]
pub struct RandomPacing {
    line_delay_min_ms: u64,
    line_delay_max_ms: u64,
    step_pause_ms: u64,
}

impl RandomPacing {
    pub fn new(line_delay_min_ms: u64, line_delay_max_ms: u64, step_pause_ms: u64) -> Self {
        Self {
            line_delay_min_ms: line_delay_min_ms.min(line_delay_max_ms),
            line_delay_max_ms: line_delay_max_ms.max(line_delay_min_ms),
            step_pause_ms,
        }
    }

    pub fn from_config(config: &PacingConfig) -> Self {
        Self::new(
            config.line_delay_min_ms,
            config.line_delay_max_ms,
            config.step_pause_ms,
        )
    }
}

impl Default for RandomPacing {
    fn default() -> Self {
        Self::from_config(&PacingConfig::default())
    }
}

impl Pacing for RandomPacing {
    fn line_delay(&self) -> Duration {
        let ms = rand::thread_rng().gen_range(self.line_delay_min_ms..=self.line_delay_max_ms);
        Duration::from_millis(ms)
    }

    fn step_pause(&self) -> Duration {
        Duration::from_millis(self.step_pause_ms)
    }
}

/// No delays at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPacing;

impl Pacing for InstantPacing {
    fn line_delay(&self) -> Duration {
        Duration::ZERO
    }

    fn step_pause(&self) -> Duration {
        Duration::ZERO
    }
}
