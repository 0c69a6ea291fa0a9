use std::cell::Cell;
use std::rc::Rc;

use instant::Instant;

use crate::units::Millis;

/// Monotonic time source driving the spin animation
pub trait Clock {
    fn now(&self) -> Millis;
}

pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        Millis::from_secs(self.origin.elapsed().as_secs_f64())
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn set(&self, now: Millis) {
        self.now.set(now.0);
    }

    pub fn advance(&self, by: Millis) {
        self.now.set(self.now.get() + by.0);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        Millis(self.now.get())
    }
}
