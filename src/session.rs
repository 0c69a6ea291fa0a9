/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use std::rc::Rc;
use std::sync::mpsc::{channel, Receiver, Sender};

use chrono::Utc;
use strum::IntoEnumIterator;

use crate::assignment::{card_text, AssignmentAssembler};
use crate::dice::{Dice, RandomSource};
use crate::error::WheelError;
use crate::history::{Assignment, SpinRecord};
use crate::roster::{
    eligible_persons, find_by_id, find_by_name, mark_demoed, parse_roster, set_ooo, Person,
    CAPABILITIES, PLATFORMS,
};
use crate::settings::Settings;
use crate::storage::{toggle_slot, Storage, Store};
use crate::wheel::clock::Clock;
use crate::wheel::sound::SoundKit;
use crate::wheel::{SpinOutcome, WheelKind, WheelPorts, WheelWidget};
use crate::webhook::SlackWebhook;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Landed { kind: WheelKind, value: String },
}

/// Run-time overrides on top of the stored settings
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub seed: Option<u64>,
    pub reduced_motion: Option<bool>,
    pub muted: bool,
}

/// The three wheels and everything around them for one page session
pub struct Session<S: Storage> {
    store: Store<S>,
    persons: Vec<Person>,
    settings: Settings,
    sound: Rc<SoundKit>,
    person_wheel: WheelWidget,
    capability_wheel: WheelWidget,
    platform_wheel: WheelWidget,
    events: Receiver<SessionEvent>,
    assembler: AssignmentAssembler,
    assignment: Option<Assignment>,
    override_all: bool,
    notices: Vec<String>,
}

impl<S: Storage> Session<S> {
    pub fn open(storage: S, clock: Rc<dyn Clock>, options: SessionOptions) -> Result<Self, WheelError> {
        let mut store = Store::new(storage);
        let persons = store.load_persons()?;
        let mut settings = store.load_settings();
        if let Some(reduced_motion) = options.reduced_motion {
            settings.reduced_motion = reduced_motion;
        }
        if options.muted {
            settings.sounds_enabled = false;
        }
        let sound = Rc::new(SoundKit::new(settings.sounds_enabled, settings.reduced_motion));
        let (sender, events) = channel();
        let build = |kind: WheelKind| {
            let random: Box<dyn RandomSource> = match options.seed {
                Some(seed) => Box::new(Dice::seeded(seed.wrapping_add(kind as u64))),
                None => Box::new(Dice::from_entropy()),
            };
            let ports = WheelPorts {
                sound: sound.clone(),
                random,
                clock: clock.clone(),
            };
            let universe: &[&str] = match kind {
                WheelKind::Person => &[],
                WheelKind::Capability => &CAPABILITIES,
                WheelKind::Platform => &PLATFORMS,
            };
            let names = universe.iter().map(|option| option.to_string()).collect();
            WheelWidget::new(kind, names, ports, landed_sender(kind, sender.clone()))
                .with_reduced_motion(settings.reduced_motion)
        };
        let person_wheel = build(WheelKind::Person);
        let capability_wheel = build(WheelKind::Capability)
            .with_enabled_map(store.load_toggles(WheelKind::Capability))
            .with_respins();
        let platform_wheel = build(WheelKind::Platform)
            .with_enabled_map(store.load_toggles(WheelKind::Platform))
            .with_respins();
        let mut session = Self {
            store,
            persons,
            settings,
            sound,
            person_wheel,
            capability_wheel,
            platform_wheel,
            events,
            assembler: AssignmentAssembler::default(),
            assignment: None,
            override_all: false,
            notices: Vec::new(),
        };
        session.refresh_person_options();
        Ok(session)
    }

    pub fn wheel(&self, kind: WheelKind) -> &WheelWidget {
        match kind {
            WheelKind::Person => &self.person_wheel,
            WheelKind::Capability => &self.capability_wheel,
            WheelKind::Platform => &self.platform_wheel,
        }
    }

    fn wheel_mut(&mut self, kind: WheelKind) -> &mut WheelWidget {
        match kind {
            WheelKind::Person => &mut self.person_wheel,
            WheelKind::Capability => &mut self.capability_wheel,
            WheelKind::Platform => &mut self.platform_wheel,
        }
    }

    /// The SPIN button of one wheel
    pub fn spin(&mut self, kind: WheelKind) -> SpinOutcome {
        let outcome = self.wheel_mut(kind).spin();
        self.process_events();
        outcome
    }

    pub fn respin(&mut self, kind: WheelKind) -> SpinOutcome {
        let outcome = self.wheel_mut(kind).respin();
        self.process_events();
        outcome
    }

    /// Advance every wheel by one animation frame. True while any wheel still turns.
    pub fn frame(&mut self) -> bool {
        for kind in WheelKind::iter() {
            self.wheel_mut(kind).frame();
        }
        self.process_events();
        self.is_spinning()
    }

    pub fn is_spinning(&self) -> bool {
        WheelKind::iter().any(|kind| self.wheel(kind).is_spinning())
    }

    /// The selected person is absent: forget them and spin the person wheel again
    pub fn not_here(&mut self) -> SpinOutcome {
        self.assembler.clear_person();
        self.assignment = None;
        self.spin(WheelKind::Person)
    }

    /// Start over with all three wheels unset
    pub fn new_round(&mut self) {
        self.assembler.reset();
        self.assignment = None;
    }

    /// Nobody is eligible and the override is off
    pub fn no_eligible_people(&self) -> bool {
        !self.override_all && self.eligible_people().is_empty()
    }

    /// Put everyone on the person wheel, cooldown and OOO notwithstanding
    pub fn override_all(&mut self) {
        self.override_all = true;
        self.refresh_person_options();
    }

    pub fn eligible_people(&self) -> Vec<Person> {
        eligible_persons(&self.persons, self.settings.cooldown_weeks, Utc::now())
    }

    fn refresh_person_options(&mut self) {
        let people = if self.override_all {
            self.persons.clone()
        } else {
            self.eligible_people()
        };
        let names = people.into_iter().map(|person| person.name).collect();
        self.person_wheel.set_options(names);
    }

    fn process_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                SessionEvent::Landed { kind, value } => self.landed(kind, &value),
            }
        }
    }

    fn landed(&mut self, kind: WheelKind, value: &str) {
        let recorded = match kind {
            WheelKind::Person => match find_by_name(&self.persons, value) {
                Some(person) => person.id.clone(),
                None => {
                    let notice = format!("{value} left the roster during the spin, result not recorded");
                    log::warn!("{notice}");
                    self.notices.push(notice);
                    return;
                }
            },
            _ => value.to_string(),
        };
        self.assembler.set(kind, &recorded);
        let saved = self
            .store
            .push_spin(SpinRecord::landed(kind, &recorded, Utc::now()));
        self.report(saved);
        let now = Utc::now();
        let Some(assignment) = self.assembler.assemble(now) else {
            return;
        };
        log::info!(
            "Assignment: {} / {} / {}",
            find_by_id(&self.persons, &assignment.person_id).map_or("?", |person| person.name.as_str()),
            assignment.capability,
            assignment.platform
        );
        let saved = self.store.push_assignment(assignment.clone());
        self.report(saved);
        mark_demoed(&mut self.persons, &assignment.person_id, now);
        let saved = self.store.save_persons(&self.persons);
        self.report(saved);
        self.assignment = Some(assignment);
        self.refresh_person_options();
    }

    /// Persistence trouble is shown to the user but never undoes anything
    fn report(&mut self, result: Result<(), WheelError>) {
        if let Err(error) = result {
            log::error!("{error}");
            self.notices.push(error.to_string());
        }
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    pub fn assembler(&self) -> &AssignmentAssembler {
        &self.assembler
    }

    pub fn selected_person(&self) -> Option<&Person> {
        find_by_id(&self.persons, self.assembler.person_id()?)
    }

    pub fn card_text(&self) -> Option<String> {
        self.assignment
            .as_ref()
            .map(|assignment| card_text(assignment, &self.persons))
    }

    /// Send the current card to the configured Slack webhook
    pub fn post_assignment(&self) -> Result<(), WheelError> {
        let url = self.settings.webhook().ok_or(WheelError::NoWebhookConfigured)?;
        let Some(text) = self.card_text() else {
            return Ok(());
        };
        SlackWebhook::new(url)?.post(&text)
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    /// Replace the roster from text, one name per line
    pub fn replace_roster(&mut self, text: &str) -> Result<(), WheelError> {
        self.persons = parse_roster(text, &self.persons);
        self.store.save_persons(&self.persons)?;
        self.refresh_person_options();
        Ok(())
    }

    pub fn set_ooo(&mut self, name: &str, ooo: bool) -> Result<(), WheelError> {
        if !set_ooo(&mut self.persons, name, ooo) {
            return Err(WheelError::UnknownOption(name.to_string()));
        }
        self.store.save_persons(&self.persons)?;
        self.refresh_person_options();
        Ok(())
    }

    pub fn update_settings(&mut self, settings: Settings) -> Result<(), WheelError> {
        self.settings = settings;
        self.store.save_settings(&self.settings)?;
        self.sound
            .update(self.settings.sounds_enabled, self.settings.reduced_motion);
        let reduced_motion = self.settings.reduced_motion;
        for kind in WheelKind::iter() {
            self.wheel_mut(kind).set_reduced_motion(reduced_motion);
        }
        self.refresh_person_options();
        Ok(())
    }

    /// Switch one capability or platform on or off for future spins
    pub fn update_toggles(&mut self, kind: WheelKind, option: &str, enabled: bool) -> Result<(), WheelError> {
        let unknown = || WheelError::UnknownOption(option.to_string());
        let (_, universe) = toggle_slot(kind).ok_or_else(unknown)?;
        if !universe.iter().any(|known| *known == option) {
            return Err(unknown());
        }
        let mut toggles = self.store.load_toggles(kind);
        toggles.insert(option.to_string(), enabled);
        self.store.save_toggles(kind, &toggles)?;
        self.wheel_mut(kind).set_enabled_map(Some(toggles));
        Ok(())
    }

    /// Wipe everything stored and start from the defaults
    pub fn reset_all(&mut self) -> Result<(), WheelError> {
        self.store.reset_all()?;
        self.persons = self.store.load_persons()?;
        self.settings = self.store.load_settings();
        for kind in [WheelKind::Capability, WheelKind::Platform] {
            let toggles = self.store.load_toggles(kind);
            self.wheel_mut(kind).set_enabled_map(Some(toggles));
        }
        self.override_all = false;
        self.new_round();
        self.refresh_person_options();
        Ok(())
    }
}

fn landed_sender(kind: WheelKind, sender: Sender<SessionEvent>) -> Box<dyn FnMut(&str)> {
    Box::new(move |value| {
        let event = SessionEvent::Landed {
            kind,
            value: value.to_string(),
        };
        if sender.send(event).is_err() {
            log::debug!("session gone, {kind} result dropped");
        }
    })
}
