//! Smooth scrolling with exponential ease-out.
//!
//! Each tick covers a fixed fraction of the remaining distance, so motion
//! starts fast and decelerates into the target.

/// Ease-out scroll animator.
#[derive(Debug, Clone, Copy)]
pub struct SmoothScroll {
    /// Fraction of the remaining distance covered per tick.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Next position on the way from `current` to `target`.  Snaps onto the
    /// target once less than a pixel remains.
    pub fn step(&self, current: f64, target: f64) -> f64 {
        let remaining = target - current;
        if remaining.abs() < 1.0 {
            return target;
        }
        current + remaining * self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decelerates_and_lands_on_target() {
        let scroll = SmoothScroll::new(0.35);
        let mut y = 0.0;
        let mut steps = Vec::new();
        while y != 1000.0 {
            let next = scroll.step(y, 1000.0);
            steps.push(next - y);
            y = next;
            assert!(steps.len() < 100, "never settled");
        }
        // The final snap may be longer than the step before it.
        let easing = &steps[..steps.len() - 1];
        assert!(easing.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn speed_is_clamped() {
        let y = SmoothScroll::new(5.0).step(0.0, 100.0);
        assert!((y - 95.0).abs() < 1e-9);
    }
}
