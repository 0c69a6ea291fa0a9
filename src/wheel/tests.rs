#![cfg(test)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use crate::dice::{Dice, RandomSource};
use crate::units::Millis;
use crate::wheel::clock::ManualClock;
use crate::wheel::geometry::landed_index;
use crate::wheel::sound::{SoundError, SoundPort};
use crate::wheel::{EnabledMap, SpinOutcome, WheelKind, WheelPorts, WheelState, WheelWidget};

/// Replays a fixed list of unit values, round and round
struct Scripted {
    values: Vec<f64>,
    next: usize,
}

impl Scripted {
    fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            next: 0,
        }
    }
}

impl RandomSource for Scripted {
    fn unit(&mut self) -> f64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

#[derive(Default)]
struct CountingSound {
    whooshes: Cell<usize>,
    ticks: Cell<usize>,
    settles: Cell<usize>,
    broken: bool,
}

impl CountingSound {
    fn outcome(&self) -> Result<(), SoundError> {
        if self.broken {
            Err(SoundError("no audio device".into()))
        } else {
            Ok(())
        }
    }
}

impl SoundPort for CountingSound {
    fn whoosh(&self) -> Result<(), SoundError> {
        self.whooshes.set(self.whooshes.get() + 1);
        self.outcome()
    }

    fn tick(&self) -> Result<(), SoundError> {
        self.ticks.set(self.ticks.get() + 1);
        self.outcome()
    }

    fn settle(&self) -> Result<(), SoundError> {
        self.settles.set(self.settles.get() + 1);
        self.outcome()
    }
}

struct Rig {
    wheel: WheelWidget,
    clock: ManualClock,
    sound: Rc<CountingSound>,
    landed: Rc<RefCell<Vec<String>>>,
}

impl Rig {
    fn new(options: &[&str], random: Box<dyn RandomSource>) -> Self {
        Self::with_sound(options, random, CountingSound::default())
    }

    fn with_sound(options: &[&str], random: Box<dyn RandomSource>, sound: CountingSound) -> Self {
        let clock = ManualClock::default();
        let sound = Rc::new(sound);
        let landed = Rc::new(RefCell::new(Vec::new()));
        let sink = landed.clone();
        let wheel = WheelWidget::new(
            WheelKind::Capability,
            options.iter().map(|o| o.to_string()).collect(),
            WheelPorts {
                sound: sound.clone(),
                random,
                clock: Rc::new(clock.clone()),
            },
            Box::new(move |value| sink.borrow_mut().push(value.to_string())),
        );
        Self {
            wheel,
            clock,
            sound,
            landed,
        }
    }

    /// Frames at 60Hz until the wheel rests
    fn run_to_rest(&mut self) -> usize {
        let mut frames = 0;
        while self.wheel.is_spinning() {
            self.clock.advance(Millis(16.0));
            self.wheel.frame();
            frames += 1;
            assert!(frames < 1000, "spin never settled");
        }
        frames
    }

    fn landed(&self) -> Vec<String> {
        self.landed.borrow().clone()
    }
}

// ============ Scenario Tests ============

#[test]
fn test_red_blue_scenario() {
    let mut rig = Rig::new(&["Red", "Blue"], Box::new(Scripted::new(&[0.75])));
    let SpinOutcome::Started { target } = rig.wheel.spin() else {
        panic!("spin should animate");
    };
    assert_eq!(landed_index(target.normalized(), 2), 1);
    assert!(rig.landed().is_empty(), "nothing emitted before the wheel rests");
    rig.run_to_rest();
    assert_eq!(rig.wheel.selected(), Some("Blue"));
    assert_eq!(rig.landed(), vec!["Blue".to_string()]);
    assert_eq!(rig.wheel.state(), WheelState::Settled);
    assert_eq!(rig.wheel.angle(), rig.wheel.resting_angle());
}

#[test]
fn test_respin_scenario() {
    let mut rig = Rig::new(&["A", "B", "C"], Box::new(Dice::seeded(5)));
    rig.wheel.set_allow_respins(true);
    assert_eq!(rig.wheel.respin(), SpinOutcome::RespinUnavailable);
    assert!(matches!(rig.wheel.spin(), SpinOutcome::Started { .. }));
    rig.run_to_rest();
    let first = rig.wheel.selected().map(str::to_string);
    for _ in 0..4 {
        assert!(matches!(rig.wheel.respin(), SpinOutcome::Started { .. }));
        rig.run_to_rest();
    }
    let landed = rig.landed();
    assert_eq!(landed.len(), 5);
    assert_eq!(landed.first().cloned(), first);
    assert_eq!(rig.wheel.selected(), landed.last().map(String::as_str));
    assert_eq!(rig.sound.settles.get(), 5);
}

#[test]
fn test_respin_refused_without_permission() {
    let mut rig = Rig::new(&["A", "B"], Box::new(Dice::seeded(2)));
    rig.wheel.spin();
    rig.run_to_rest();
    assert_eq!(rig.wheel.respin(), SpinOutcome::RespinUnavailable);
    assert_eq!(rig.landed().len(), 1);
}

// ============ Guard Tests ============

#[test]
fn test_spin_while_spinning_is_dropped() {
    let mut rig = Rig::new(&["A", "B", "C", "D"], Box::new(Dice::seeded(9)));
    let SpinOutcome::Started { target } = rig.wheel.spin() else {
        panic!("spin should animate");
    };
    rig.clock.advance(Millis(500.0));
    rig.wheel.frame();
    for _ in 0..3 {
        assert_eq!(rig.wheel.spin(), SpinOutcome::Busy);
    }
    assert_eq!(rig.wheel.target(), Some(target));
    assert_eq!(rig.wheel.selected(), None);
    rig.run_to_rest();
    assert_eq!(rig.landed().len(), 1);
    assert_eq!(rig.wheel.resting_angle(), target.normalized());
}

#[test]
fn test_empty_option_set() {
    let mut rig = Rig::new(&["A", "B"], Box::new(Dice::seeded(1)));
    let disabled: EnabledMap = [("A".to_string(), false), ("B".to_string(), false)].into();
    rig.wheel.set_enabled_map(Some(disabled));
    assert!(!rig.wheel.has_eligible_options());
    assert_eq!(rig.wheel.spin(), SpinOutcome::NoEligibleOptions);
    assert_eq!(rig.wheel.state(), WheelState::Idle);
    assert_eq!(rig.wheel.frame(), None);
    assert!(rig.landed().is_empty());

    rig.wheel.set_reduced_motion(true);
    assert_eq!(rig.wheel.spin(), SpinOutcome::NoEligibleOptions);
    assert!(rig.landed().is_empty());

    let mut nothing = Rig::new(&[], Box::new(Dice::seeded(1)));
    assert_eq!(nothing.wheel.spin(), SpinOutcome::NoEligibleOptions);
}

#[test]
fn test_frame_without_spin() {
    let mut rig = Rig::new(&["A"], Box::new(Dice::seeded(1)));
    assert_eq!(rig.wheel.frame(), None);
    assert_eq!(rig.wheel.state(), WheelState::Idle);
}

// ============ Filtering Tests ============

#[test]
fn test_disabled_options_never_selected() {
    let mut rig = Rig::new(&["A", "B", "C", "D"], Box::new(Dice::seeded(21)));
    let enabled: EnabledMap = [("B".to_string(), false), ("D".to_string(), false)].into();
    rig.wheel.set_enabled_map(Some(enabled));
    assert_eq!(rig.wheel.eligible(), vec!["A".to_string(), "C".to_string()]);
    for _ in 0..20 {
        rig.wheel.spin();
        rig.run_to_rest();
    }
    let seen: HashSet<String> = rig.landed().into_iter().collect();
    assert!(seen.is_subset(&["A".to_string(), "C".to_string()].into()));
}

#[test]
fn test_snapshot_isolation() {
    // Index 2 of five options is "C"
    let mut rig = Rig::new(&["A", "B", "C", "D", "E"], Box::new(Scripted::new(&[0.5])));
    rig.wheel.spin();
    rig.clock.advance(Millis(100.0));
    rig.wheel.frame();
    let only_e: EnabledMap = ["A", "B", "C", "D"]
        .iter()
        .map(|o| (o.to_string(), false))
        .collect();
    rig.wheel.set_enabled_map(Some(only_e));
    assert_eq!(rig.wheel.face().len(), 5);
    rig.run_to_rest();
    assert_eq!(rig.landed(), vec!["C".to_string()]);

    rig.wheel.spin();
    rig.run_to_rest();
    assert_eq!(rig.landed(), vec!["C".to_string(), "E".to_string()]);
}

// ============ Reduced Motion Tests ============

#[test]
fn test_reduced_motion_mid_spin_keeps_the_flight() {
    let mut rig = Rig::new(&["A", "B", "C"], Box::new(Scripted::new(&[0.1, 0.5, 0.5])));
    let SpinOutcome::Started { target } = rig.wheel.spin() else {
        panic!("spin should animate");
    };
    rig.clock.advance(Millis(200.0));
    rig.wheel.frame();
    rig.wheel.set_reduced_motion(true);
    assert_eq!(rig.wheel.spin(), SpinOutcome::Busy);
    assert!(rig.landed().is_empty());
    assert_eq!(rig.wheel.target(), Some(target));
    rig.run_to_rest();
    assert_eq!(rig.landed(), vec!["A".to_string()]);
    assert!(matches!(rig.wheel.spin(), SpinOutcome::Settled(_)));
    assert_eq!(rig.landed().len(), 2);
}

#[test]
fn test_reduced_motion_settles_synchronously() {
    let mut rig = Rig::new(&["A", "B", "C"], Box::new(Dice::seeded(13)));
    rig.wheel.set_reduced_motion(true);
    for count in 1..=10 {
        let SpinOutcome::Settled(value) = rig.wheel.spin() else {
            panic!("reduced motion spins settle at once");
        };
        assert!(["A", "B", "C"].contains(&value.as_str()));
        assert_eq!(rig.landed().len(), count);
        assert_eq!(rig.wheel.state(), WheelState::Settled);
        assert_eq!(rig.wheel.frame(), None);
        let face = rig.wheel.face();
        let under_pointer = landed_index(rig.wheel.resting_angle(), face.len());
        assert_eq!(face[under_pointer], value);
    }
    assert_eq!(rig.sound.whooshes.get(), 0);
    assert_eq!(rig.sound.ticks.get(), 0);
}

// ============ Animation Tests ============

#[test]
fn test_resting_angle_always_normalized() {
    let mut rig = Rig::new(&["A", "B", "C", "D", "E", "F", "G"], Box::new(Dice::seeded(77)));
    for _ in 0..25 {
        rig.wheel.spin();
        rig.run_to_rest();
        let resting = *rig.wheel.resting_angle();
        assert!((0.0..360.0).contains(&resting), "resting at {}", resting);
    }
}

#[test]
fn test_next_spin_starts_from_resting_angle() {
    let mut rig = Rig::new(&["A", "B", "C"], Box::new(Dice::seeded(4)));
    rig.wheel.spin();
    rig.run_to_rest();
    let resting = rig.wheel.resting_angle();
    rig.wheel.spin();
    rig.clock.advance(Millis(0.0));
    assert_eq!(rig.wheel.frame(), Some(resting));
}

#[test]
fn test_ticks_are_throttled() {
    let mut rig = Rig::new(&["A", "B"], Box::new(Dice::seeded(8)));
    rig.wheel.spin();
    let frames = rig.run_to_rest();
    let ticks = rig.sound.ticks.get();
    let elapsed = frames as f64 * 16.0;
    assert!(ticks > 0);
    assert!((ticks as f64) <= elapsed / 50.0 + 1.0, "{} ticks in {}ms", ticks, elapsed);
    assert_eq!(rig.sound.whooshes.get(), 1);
    assert_eq!(rig.sound.settles.get(), 1);
}

#[test]
fn test_broken_sound_is_ignored() {
    let sound = CountingSound {
        broken: true,
        ..Default::default()
    };
    let mut rig = Rig::with_sound(&["A", "B", "C"], Box::new(Dice::seeded(3)), sound);
    rig.wheel.spin();
    rig.run_to_rest();
    assert_eq!(rig.landed().len(), 1);
    assert_eq!(rig.sound.settles.get(), 1);
}

#[test]
fn test_duration_bounds_frames() {
    let mut rig = Rig::new(&["A", "B", "C"], Box::new(Dice::seeded(31)));
    rig.wheel.spin();
    let frames = rig.run_to_rest();
    let elapsed = frames as f64 * 16.0;
    assert!(elapsed >= 2600.0 && elapsed < 3300.0 + 16.0, "settled after {}ms", elapsed);
    assert!(*rig.wheel.angle() < 360.0);
}
