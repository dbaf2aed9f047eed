// ABOUTME: Cooking countdown timer driven by explicit ticks
// ABOUTME: Tracks running, paused, and completed states with MM:SS display and dial angle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::time::Duration;

const SECONDS_PER_MINUTE: u64 = 60;
const FULL_TURN_DEGREES: f64 = 360.0;

/// Countdown for a recipe's cooking time
///
/// The timer does not read a clock. Callers advance it with
/// [`CookingTimer::tick`], typically once per second while it is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookingTimer {
    total_seconds: u64,
    remaining_seconds: u64,
    is_active: bool,
    is_completed: bool,
}

impl CookingTimer {
    /// Paused timer set to `minutes`
    #[must_use]
    pub fn new(minutes: u32) -> Self {
        let total_seconds = u64::from(minutes) * SECONDS_PER_MINUTE;
        Self {
            total_seconds,
            remaining_seconds: total_seconds,
            is_active: false,
            is_completed: false,
        }
    }

    /// Whether the countdown is running
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Whether the countdown reached zero while running
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Time left
    #[must_use]
    pub const fn remaining(&self) -> Duration {
        Duration::from_secs(self.remaining_seconds)
    }

    /// Start when paused, pause when running
    ///
    /// Starting a timer that already reached zero completes it immediately.
    pub fn toggle(&mut self) {
        self.is_active = !self.is_active;
        self.settle();
    }

    /// Advance a running timer by `seconds`; a paused timer ignores ticks
    pub fn tick(&mut self, seconds: u64) {
        if !self.is_active {
            return;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(seconds);
        self.settle();
    }

    /// Stop and rewind to the full cooking time
    pub fn reset(&mut self) {
        self.is_active = false;
        self.is_completed = false;
        self.remaining_seconds = self.total_seconds;
    }

    fn settle(&mut self) {
        if self.is_active && self.remaining_seconds == 0 {
            self.is_active = false;
            self.is_completed = true;
        }
    }

    /// Remaining time as zero-padded `MM:SS`
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / SECONDS_PER_MINUTE,
            self.remaining_seconds % SECONDS_PER_MINUTE
        )
    }

    /// Minute-hand rotation: 0 at the start, 360 when time is up
    #[must_use]
    pub fn progress_degrees(&self) -> f64 {
        if self.total_seconds == 0 {
            return FULL_TURN_DEGREES;
        }
        let elapsed = self.total_seconds - self.remaining_seconds;
        elapsed as f64 / self.total_seconds as f64 * FULL_TURN_DEGREES
    }
}
