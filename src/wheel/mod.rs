/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use std::collections::BTreeMap;
use std::rc::Rc;

use strum::{Display, EnumIter, EnumString};

use crate::dice::{choose, RandomSource};
use crate::units::{Degrees, Millis, TICK_INTERVAL};
use crate::wheel::animator::{SpinAnimator, SpinPlan};
use crate::wheel::clock::Clock;
use crate::wheel::geometry::{landed_index, resting_angle_for};
use crate::wheel::sound::{SoundError, SoundPort};

pub mod animator;
pub mod clock;
pub mod geometry;
pub mod sound;
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum WheelKind {
    Person,
    Capability,
    Platform,
}

/// Per-option switch. Options missing from the map are enabled.
pub type EnabledMap = BTreeMap<String, bool>;

/// The options that may currently be chosen, in wheel order
pub fn eligible(options: &[String], enabled: Option<&EnabledMap>) -> Vec<String> {
    options
        .iter()
        .filter(|option| enabled.map_or(true, |map| map.get(*option) != Some(&false)))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelState {
    Idle,
    Spinning,
    Settled,
}

/// What became of a spin request
#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    /// Animation running towards `target`; the result follows from `frame`
    Started { target: Degrees },
    /// Reduced motion: settled on the spot
    Settled(String),
    /// A spin is already in flight, request dropped
    Busy,
    /// Every option is disabled, nothing to spin
    NoEligibleOptions,
    /// Re-spin asked of a wheel that has not settled or does not allow it
    RespinUnavailable,
}

pub type SpinEnd = Box<dyn FnMut(&str)>;

/// Collaborators a wheel needs from its host
pub struct WheelPorts {
    pub sound: Rc<dyn SoundPort>,
    pub random: Box<dyn RandomSource>,
    pub clock: Rc<dyn Clock>,
}

struct InFlight {
    snapshot: Vec<String>,
    final_index: usize,
    animator: SpinAnimator,
    last_tick: Option<Millis>,
}

/// One selection-and-animation unit: person, capability or platform.
pub struct WheelWidget {
    kind: WheelKind,
    options: Vec<String>,
    enabled: Option<EnabledMap>,
    allow_respins: bool,
    reduced_motion: bool,
    state: WheelState,
    selected: Option<String>,
    angle: Degrees,
    resting: Degrees,
    in_flight: Option<InFlight>,
    sound: Rc<dyn SoundPort>,
    random: Box<dyn RandomSource>,
    clock: Rc<dyn Clock>,
    on_spin_end: SpinEnd,
}

impl WheelWidget {
    pub fn new(
        kind: WheelKind,
        options: Vec<String>,
        WheelPorts {
            sound,
            random,
            clock,
        }: WheelPorts,
        on_spin_end: SpinEnd,
    ) -> Self {
        Self {
            kind,
            options,
            enabled: None,
            allow_respins: false,
            reduced_motion: false,
            state: WheelState::Idle,
            selected: None,
            angle: Degrees(0.0),
            resting: Degrees(0.0),
            in_flight: None,
            sound,
            random,
            clock,
            on_spin_end,
        }
    }

    pub fn with_enabled_map(mut self, enabled: EnabledMap) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_respins(mut self) -> Self {
        self.allow_respins = true;
        self
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    /// Request a new selection. Both the SPIN button and external callers come through here.
    pub fn spin(&mut self) -> SpinOutcome {
        // Reduced motion switched on mid-spin does not bypass this: the flight in progress still owns the result.
        if self.in_flight.is_some() {
            log::debug!("{} wheel busy, spin dropped", self.kind);
            return SpinOutcome::Busy;
        }
        let snapshot = self.eligible();
        if snapshot.is_empty() {
            log::info!("{} wheel has no eligible options", self.kind);
            return SpinOutcome::NoEligibleOptions;
        }
        let count = snapshot.len();
        let final_index = choose(self.random.as_mut(), count);
        if self.reduced_motion {
            let value = snapshot[final_index].clone();
            self.resting = resting_angle_for(final_index, count);
            self.angle = self.resting;
            self.settle_on(value.clone());
            return SpinOutcome::Settled(value);
        }
        let plan = SpinPlan::draw(self.random.as_mut(), self.resting, final_index, count);
        log::debug!(
            "{} wheel spinning to {} over {} ({} turns)",
            self.kind,
            plan.to,
            plan.duration,
            plan.whole_turns
        );
        quietly(self.sound.whoosh());
        self.in_flight = Some(InFlight {
            snapshot,
            final_index,
            animator: SpinAnimator::new(plan, self.clock.now()),
            last_tick: None,
        });
        self.state = WheelState::Spinning;
        SpinOutcome::Started { target: plan.to }
    }

    /// Roll a settled wheel again, when this wheel allows it
    pub fn respin(&mut self) -> SpinOutcome {
        if !self.allow_respins || self.state != WheelState::Settled {
            return SpinOutcome::RespinUnavailable;
        }
        self.spin()
    }

    /// Advance the animation to the clock's current time.
    ///
    /// Returns the angle to draw, or `None` when nothing is animating.
    pub fn frame(&mut self) -> Option<Degrees> {
        let now = self.clock.now();
        let flight = self.in_flight.as_mut()?;
        let mut angle = self.angle;
        let more = flight.animator.advance(now, |current| angle = current, || {});
        self.angle = angle;
        if more {
            if flight.last_tick.map_or(true, |last| now - last > TICK_INTERVAL) {
                quietly(self.sound.tick());
                flight.last_tick = Some(now);
            }
            return Some(angle);
        }
        let flight = self.in_flight.take()?;
        let resting = flight.animator.target().normalized();
        let landed = landed_index(resting, flight.snapshot.len());
        debug_assert_eq!(landed, flight.final_index);
        self.resting = resting;
        self.angle = resting;
        quietly(self.sound.settle());
        self.settle_on(flight.snapshot[landed].clone());
        Some(resting)
    }

    fn settle_on(&mut self, value: String) {
        log::info!("{} wheel landed on {}", self.kind, value);
        self.state = WheelState::Settled;
        (self.on_spin_end)(&value);
        self.selected = Some(value);
    }

    pub fn eligible(&self) -> Vec<String> {
        eligible(&self.options, self.enabled.as_ref())
    }

    pub fn has_eligible_options(&self) -> bool {
        !self.eligible().is_empty()
    }

    /// Takes effect from the next spin; an animation in flight keeps its snapshot.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
    }

    pub fn set_enabled_map(&mut self, enabled: Option<EnabledMap>) {
        self.enabled = enabled;
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
    }

    pub fn set_allow_respins(&mut self, allow_respins: bool) {
        self.allow_respins = allow_respins;
    }

    pub fn kind(&self) -> WheelKind {
        self.kind
    }

    pub fn state(&self) -> WheelState {
        self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state == WheelState::Spinning
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn angle(&self) -> Degrees {
        self.angle
    }

    pub fn resting_angle(&self) -> Degrees {
        self.resting
    }

    /// Where the spin in flight will stop
    pub fn target(&self) -> Option<Degrees> {
        self.in_flight
            .as_ref()
            .map(|flight| flight.animator.target())
    }

    /// The labels drawn on the face: the in-flight snapshot while spinning
    pub fn face(&self) -> Vec<String> {
        match &self.in_flight {
            Some(flight) => flight.snapshot.clone(),
            None => self.eligible(),
        }
    }
}

fn quietly(result: Result<(), SoundError>) {
    if let Err(error) = result {
        log::debug!("{error}");
    }
}
