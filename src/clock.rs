use std::time::{Duration, Instant};

/// In-session match clock. Purely presentational: nothing here is ever sent
/// to the backend, and the state dies with the screen.
///
/// The clock is either idle (elapsed frozen) or running (elapsed re-derived
/// from a reference instant on every tick). Pausing keeps the accumulated
/// time; resuming rebases the reference to `now - elapsed` so the display
/// continues where it stopped.
#[derive(Debug, Clone)]
pub struct MatchClock {
    current_half: u8,
    halves: u8,
    half_minutes: u16,
    running: bool,
    reference: Option<Instant>,
    elapsed: Duration,
}

impl MatchClock {
    pub fn new(half_minutes: u16, halves: u8) -> Self {
        Self {
            current_half: 1,
            halves: halves.max(1),
            half_minutes: half_minutes.max(1),
            running: false,
            reference: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Re-apply league settings once they arrive. The current half is
    /// clamped into the new range; the elapsed time is left alone.
    pub fn configure(&mut self, half_minutes: u16, halves: u8) {
        self.half_minutes = half_minutes.max(1);
        self.halves = halves.max(1);
        self.current_half = self.current_half.clamp(1, self.halves);
    }

    pub fn current_half(&self) -> u8 {
        self.current_half
    }

    pub fn halves(&self) -> u8 {
        self.halves
    }

    pub fn half_minutes(&self) -> u16 {
        self.half_minutes
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start_pause(&mut self, now: Instant) {
        if self.running {
            if let Some(reference) = self.reference.take() {
                self.elapsed = now.duration_since(reference);
            }
            self.running = false;
        } else {
            self.reference = Some(now - self.elapsed);
            self.running = true;
        }
    }

    /// Recompute elapsed from the reference instant. No-op while idle, so
    /// the caller can drive this from its ordinary draw loop without
    /// managing a separate timer.
    pub fn tick(&mut self, now: Instant) {
        if !self.running {
            return;
        }
        if let Some(reference) = self.reference {
            self.elapsed = now.duration_since(reference);
        }
    }

    /// Stop and zero the clock without leaving the current half.
    pub fn finish_half(&mut self) {
        self.running = false;
        self.reference = None;
        self.elapsed = Duration::ZERO;
    }

    pub fn next_half(&mut self) {
        self.finish_half();
        if self.current_half < self.halves {
            self.current_half += 1;
        }
    }

    pub fn prev_half(&mut self) {
        self.finish_half();
        if self.current_half > 1 {
            self.current_half -= 1;
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }

    /// 1-based minute within the current half, capped at the configured
    /// half length so stoppage time reads as the final minute.
    pub fn default_minute(&self) -> u16 {
        let minute = (self.elapsed.as_secs() / 60).min(u16::MAX as u64) as u16;
        minute.saturating_add(1).min(self.half_minutes)
    }

    pub fn display(&self) -> String {
        let total = self.elapsed.as_secs();
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}
