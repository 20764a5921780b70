use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Timing of an auto-scratch run.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoScratchConfig {
    /// Delay before the first zone opens.
    pub initial_interval: Duration,
    /// Factor applied to the delay after every zone.
    pub acceleration: f32,
    /// Floor the delay never shrinks below.
    pub min_interval: Duration,
}

impl Default for AutoScratchConfig {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            acceleration: 0.9,
            min_interval: Duration::from_millis(50),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoScratchState {
    #[default]
    Idle,
    Running,
}

/// What a single auto-scratch step asks the card to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AutoStep {
    /// Not running.
    Idle,
    /// Still waiting for the current interval to elapse.
    Waiting,
    /// Open the zone at this index; more zones follow.
    Reveal(usize),
    /// The run is over, after opening the zone at this index if there is one.
    Finished(Option<usize>),
}

/// Opens zones one by one in detection order, speeding up as it goes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutoScratch {
    config: AutoScratchConfig,
    state: AutoScratchState,
    cursor: usize,
    elapsed: Duration,
    interval: Duration,
}

impl AutoScratch {
    pub fn new(config: AutoScratchConfig) -> Self {
        Self {
            config,
            state: AutoScratchState::Idle,
            cursor: 0,
            elapsed: Duration::ZERO,
            interval: config.initial_interval,
        }
    }

    pub fn config(&self) -> &AutoScratchConfig {
        &self.config
    }

    pub fn state(&self) -> AutoScratchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AutoScratchState::Running)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_interval(&self) -> Duration {
        self.interval
    }

    /// Starts a run from the first zone. Does nothing while a run is in progress.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = AutoScratchState::Running;
        self.cursor = 0;
        self.elapsed = Duration::ZERO;
        self.interval = self.config.initial_interval;
        true
    }

    pub fn stop(&mut self) {
        self.state = AutoScratchState::Idle;
    }

    /// Advances the timer by `dt` for a card with `zone_count` zones.
    pub fn step(&mut self, dt: Duration, zone_count: usize) -> AutoStep {
        if !self.is_running() {
            return AutoStep::Idle;
        }

        if self.cursor >= zone_count {
            self.stop();
            return AutoStep::Finished(None);
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed < self.interval {
            return AutoStep::Waiting;
        }

        self.elapsed = Duration::ZERO;
        let index = self.cursor;
        self.cursor += 1;
        self.interval = self
            .interval
            .mul_f32(self.config.acceleration)
            .max(self.config.min_interval);

        if self.cursor >= zone_count {
            self.stop();
            AutoStep::Finished(Some(index))
        } else {
            AutoStep::Reveal(index)
        }
    }
}

impl Default for AutoScratch {
    fn default() -> Self {
        Self::new(AutoScratchConfig::default())
    }
}
