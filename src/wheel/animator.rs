/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use crate::dice::{pick, RandomSource};
use crate::units::{Degrees, Millis, EXTRA_TURNS, MAX_SPIN_DURATION, MIN_SPIN_DURATION, MIN_TURNS};
use crate::wheel::geometry::target_angle;

/// Cubic ease-out: fast start, gentle stop
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Everything decided up front for one spin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub from: Degrees,
    pub to: Degrees,
    pub duration: Millis,
    pub whole_turns: u32,
}

impl SpinPlan {
    /// Draw pacing for a spin that ends on wedge `final_index` of `count`.
    ///
    /// Whole turns come from `floor(5 + U * 3)` and the partial turn onto the wedge adds
    /// less than one more, so the wheel turns between five and eight times from `from`.
    pub fn draw(
        source: &mut dyn RandomSource,
        from: Degrees,
        final_index: usize,
        count: usize,
    ) -> Self {
        let duration = Millis(pick(source, *MIN_SPIN_DURATION, *MAX_SPIN_DURATION));
        let whole_turns = pick(source, MIN_TURNS, MIN_TURNS + EXTRA_TURNS).floor() as u32;
        Self {
            from,
            to: target_angle(from, final_index, count, whole_turns),
            duration,
            whole_turns,
        }
    }
}

/// Drives the rotation from `from` to `to` over the planned duration.
///
/// The host calls `advance` once per frame; after the final frame it goes quiet.
#[derive(Debug, Clone)]
pub struct SpinAnimator {
    plan: SpinPlan,
    start: Millis,
    completed: bool,
}

impl SpinAnimator {
    pub fn new(plan: SpinPlan, start: Millis) -> Self {
        Self {
            plan,
            start,
            completed: false,
        }
    }

    pub fn plan(&self) -> &SpinPlan {
        &self.plan
    }

    pub fn target(&self) -> Degrees {
        self.plan.to
    }

    /// Normalized progress in [0, 1]
    pub fn progress(&self, now: Millis) -> f64 {
        if *self.plan.duration <= 0.0 {
            return 1.0;
        }
        let elapsed = (now - self.start).0.max(0.0);
        (elapsed / *self.plan.duration).min(1.0)
    }

    /// Angle after `elapsed` time, independent of any clock
    pub fn angle_at(&self, elapsed: Millis) -> Degrees {
        let t = if *self.plan.duration <= 0.0 {
            1.0
        } else {
            (elapsed.0.max(0.0) / *self.plan.duration).min(1.0)
        };
        let SpinPlan { from, to, .. } = self.plan;
        from + (to - from) * ease_out_cubic(t)
    }

    /// Report the angle for this frame; on the last frame also call `on_complete`.
    ///
    /// Returns true while more frames are wanted.
    pub fn advance(
        &mut self,
        now: Millis,
        mut on_frame: impl FnMut(Degrees),
        on_complete: impl FnOnce(),
    ) -> bool {
        if self.completed {
            return false;
        }
        let t = self.progress(now);
        on_frame(self.angle_at(now - self.start));
        if t < 1.0 {
            return true;
        }
        self.completed = true;
        on_complete();
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Dice;
    use crate::wheel::geometry::landed_index;

    fn plan(from: f64, to: f64, duration: f64) -> SpinPlan {
        SpinPlan {
            from: Degrees(from),
            to: Degrees(to),
            duration: Millis(duration),
            whole_turns: 5,
        }
    }

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_angle_at_is_pure() {
        let animator = SpinAnimator::new(plan(10.0, 1810.0, 1000.0), Millis(500.0));
        assert_eq!(animator.angle_at(Millis(0.0)), Degrees(10.0));
        assert_eq!(animator.angle_at(Millis(500.0)), Degrees(10.0 + 1800.0 * 0.875));
        assert_eq!(animator.angle_at(Millis(1000.0)), Degrees(1810.0));
        assert_eq!(animator.angle_at(Millis(5000.0)), Degrees(1810.0));
    }

    #[test]
    fn test_completes_exactly_once() {
        let mut animator = SpinAnimator::new(plan(0.0, 720.0, 100.0), Millis(0.0));
        let mut frames = Vec::new();
        let mut completions = 0;
        let mut now = 0.0;
        while animator.advance(Millis(now), |angle| frames.push(angle), || completions += 1) {
            now += 16.0;
        }
        assert!(!animator.advance(Millis(now + 16.0), |angle| frames.push(angle), || completions += 1));
        assert_eq!(completions, 1);
        assert_eq!(frames.last(), Some(&Degrees(720.0)));
        assert!(frames.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_drawn_plan_ranges() {
        let mut dice = Dice::seeded(11);
        for _ in 0..500 {
            let plan = SpinPlan::draw(&mut dice, Degrees(123.0), 2, 5);
            assert!((2600.0..3300.0).contains(&*plan.duration));
            assert!((5..=7).contains(&plan.whole_turns));
        }
    }

    #[test]
    fn test_sweep_counts_from_the_resting_angle() {
        let mut dice = Dice::seeded(99);
        for from in [0.0, 10.0, 123.0, 270.0, 350.0, 359.5] {
            for _ in 0..500 {
                let plan = SpinPlan::draw(&mut dice, Degrees(from), 9, 10);
                let turns = *(plan.to - plan.from) / 360.0;
                assert!((5.0..8.0).contains(&turns), "rotation {turns:.3} turns from {from}");
                assert_eq!(landed_index(plan.to.normalized(), 10), 9);
            }
        }
    }
}
