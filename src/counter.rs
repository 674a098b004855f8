use crate::utils::RingBuffer;

/// Sliding window based acceptance counter
#[derive(Debug, Clone)]
pub struct AcceptanceCounter {
    window: RingBuffer<bool>,
    accepted_count: usize,
}

impl Default for AcceptanceCounter {
    fn default() -> Self {
        Self::new(100)
    }
}

impl AcceptanceCounter {
    /// Constructor of AcceptanceCounter
    /// - `window_size` : number of most recent results the ratio is computed over
    pub fn new(window_size: usize) -> Self {
        Self {
            window: RingBuffer::new(window_size),
            accepted_count: 0,
        }
    }

    /// Update the counter with a new result
    pub fn enqueue(&mut self, accepted: bool) {
        if accepted {
            self.accepted_count += 1;
        }
        if let Some(true) = self.window.append(accepted) {
            self.accepted_count -= 1;
        }
    }

    /// Get the acceptance ratio
    pub fn acceptance_ratio(&self) -> f64 {
        if self.window.is_empty() {
            0.0
        } else {
            self.accepted_count as f64 / self.window.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::AcceptanceCounter;

    #[test]
    fn test_sliding_window() {
        let mut counter = AcceptanceCounter::new(4);
        assert_abs_diff_eq!(counter.acceptance_ratio(), 0.0);
        for accepted in [true, true, false, false] {
            counter.enqueue(accepted);
        }
        assert_abs_diff_eq!(counter.acceptance_ratio(), 0.5);
        // pushes out the two leading acceptances
        counter.enqueue(false);
        counter.enqueue(false);
        assert_abs_diff_eq!(counter.acceptance_ratio(), 0.0);
        counter.enqueue(true);
        assert_abs_diff_eq!(counter.acceptance_ratio(), 0.25);
    }
}
