/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Angle and time units for the wheel
//!
//! Type-safe wrappers so that rotation and timing values cannot be mixed up
//! while planning and animating a spin.

use std::fmt::{Display, Formatter};
use std::ops::{Add, Deref, Mul, Sub};

/// Rotation in degrees, clockwise
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Degrees(pub f64);

/// Time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Millis(pub f64);

impl Deref for Degrees {
    type Target = f64;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for Millis {
    type Target = f64;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub const FULL_TURN: Degrees = Degrees(360.0);

// Spin pacing

pub const MIN_SPIN_DURATION: Millis = Millis(2600.0);
pub const MAX_SPIN_DURATION: Millis = Millis(3300.0);
pub const MIN_TURNS: f64 = 5.0;
pub const EXTRA_TURNS: f64 = 3.0;

/// Tick sounds are never closer together than this
pub const TICK_INTERVAL: Millis = Millis(50.0);

impl Degrees {
    /// Fold into `[0, 360)`
    pub fn normalized(self) -> Self {
        let folded = self.0.rem_euclid(FULL_TURN.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if folded >= FULL_TURN.0 {
            Degrees(0.0)
        } else {
            Degrees(folded)
        }
    }
}

impl Add for Degrees {
    type Output = Degrees;
    fn add(self, rhs: Self) -> Self::Output {
        Degrees(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Degrees;
    fn sub(self, rhs: Self) -> Self::Output {
        Degrees(self.0 - rhs.0)
    }
}

impl Mul<f64> for Degrees {
    type Output = Degrees;
    fn mul(self, rhs: f64) -> Self::Output {
        Degrees(self.0 * rhs)
    }
}

impl Display for Degrees {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

impl Millis {
    pub fn from_secs(secs: f64) -> Self {
        Self(secs * 1000.0)
    }

    pub fn secs(self) -> f64 {
        self.0 / 1000.0
    }
}

impl Sub for Millis {
    type Output = Millis;
    fn sub(self, rhs: Self) -> Self::Output {
        Millis(self.0 - rhs.0)
    }
}

impl Add for Millis {
    type Output = Millis;
    fn add(self, rhs: Self) -> Self::Output {
        Millis(self.0 + rhs.0)
    }
}

impl Display for Millis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}ms", self.0)
    }
}
