/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Mapping between wedges and rotation.
//!
//! Wedge 0 starts at the top of the face and wedges proceed clockwise.
//! The face rotates clockwise by the wheel angle and the pointer is fixed at the top,
//! so the pointer reads the face at `360 - angle`.

use crate::units::{Degrees, FULL_TURN};

pub fn wedge_degrees(count: usize) -> Degrees {
    if count == 0 {
        return Degrees(0.0);
    }
    Degrees(FULL_TURN.0 / count as f64)
}

/// Resting angle in `[0, 360)` that puts the middle of wedge `index` under the pointer.
pub fn resting_angle_for(index: usize, count: usize) -> Degrees {
    let wedge = wedge_degrees(count);
    (FULL_TURN - wedge * (index as f64 + 0.5)).normalized()
}

/// Rotation reached from `from` by `whole_turns` full turns plus the partial turn onto wedge `index`.
///
/// The sweep `target - from` lies in `[whole_turns, whole_turns + 1)` turns.
pub fn target_angle(from: Degrees, index: usize, count: usize, whole_turns: u32) -> Degrees {
    let partial = (resting_angle_for(index, count) - from).normalized();
    from + FULL_TURN * whole_turns as f64 + partial
}

/// The wedge under the pointer for a wheel at rest. Inverse of `target_angle`.
pub fn landed_index(resting: Degrees, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let under_pointer = (FULL_TURN - resting.normalized()).normalized();
    let index = (under_pointer.0 / wedge_degrees(count).0).floor() as usize;
    index % count
}
