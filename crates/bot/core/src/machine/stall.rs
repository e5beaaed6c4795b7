/// Tracks progress toward the current target.
///
/// Progress is measured against the best distance seen so far, not against
/// the previous tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StallWatchdog {
    best_distance: Option<f32>,
    idle_ticks: u32,
}

impl StallWatchdog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records this tick's distance to target and returns how many
    /// consecutive ticks went by without closing at least `epsilon`.
    pub fn observe(&mut self, distance: f32, epsilon: f32) -> u32 {
        match self.best_distance {
            Some(best) if best - distance < epsilon => {
                self.idle_ticks = self.idle_ticks.saturating_add(1);
            }
            _ => {
                self.best_distance = Some(distance);
                self.idle_ticks = 0;
            }
        }
        self.idle_ticks
    }

    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
