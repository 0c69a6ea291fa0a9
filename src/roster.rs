/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROSTER: [&str; 8] = [
    "Avery Quinn",
    "Blake Moreno",
    "Casey Lindqvist",
    "Devon Achebe",
    "Emery Tanaka",
    "Finley Okafor",
    "Harper Novak",
    "Jordan Castillo",
];

pub const CAPABILITIES: [&str; 5] = [
    "ChatGPT Agent",
    "Deep Research + Connectors",
    "Canvas app",
    "GPT",
    "Choose-Your-Own",
];

pub const PLATFORMS: [&str; 4] = [
    "Cursor / Vercel app",
    "ChatKit implementation",
    "Google Apps Script",
    "Choose-Your-Own",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "lastDemoISO", skip_serializing_if = "Option::is_none")]
    pub last_demo: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ooo: bool,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            last_demo: None,
            ooo: false,
        }
    }

    /// Out of office people and people inside the cooldown sit this one out
    pub fn is_eligible(&self, cooldown_weeks: u32, now: DateTime<Utc>) -> bool {
        !self.ooo && weeks_between(self.last_demo, now) >= cooldown_weeks as f64
    }
}

/// Roster seeded from the default names, ids counting from one
pub fn default_roster() -> Vec<Person> {
    DEFAULT_ROSTER
        .iter()
        .enumerate()
        .map(|(index, name)| Person::new((index + 1).to_string(), *name))
        .collect()
}

/// Fractional weeks since `then`; never demoed counts as forever ago
pub fn weeks_between(then: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match then {
        None => f64::INFINITY,
        Some(then) => (now - then).num_milliseconds() as f64 / Duration::weeks(1).num_milliseconds() as f64,
    }
}

pub fn eligible_persons(persons: &[Person], cooldown_weeks: u32, now: DateTime<Utc>) -> Vec<Person> {
    persons
        .iter()
        .filter(|person| person.is_eligible(cooldown_weeks, now))
        .cloned()
        .collect()
}

/// One name per line. People already on the roster keep their id and flags;
/// newcomers get ids after the highest numeric id in use.
pub fn parse_roster(text: &str, existing: &[Person]) -> Vec<Person> {
    let by_name: HashMap<&str, &Person> = existing
        .iter()
        .map(|person| (person.name.as_str(), person))
        .collect();
    let mut last_id = existing
        .iter()
        .filter_map(|person| person.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    text.lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| match by_name.get(name) {
            Some(person) => (*person).clone(),
            None => {
                last_id += 1;
                Person::new(last_id.to_string(), name)
            }
        })
        .collect()
}

pub fn find_by_name<'a>(persons: &'a [Person], name: &str) -> Option<&'a Person> {
    persons.iter().find(|person| person.name == name)
}

pub fn find_by_id<'a>(persons: &'a [Person], id: &str) -> Option<&'a Person> {
    persons.iter().find(|person| person.id == id)
}

/// Returns false when nobody by that name is on the roster
pub fn set_ooo(persons: &mut [Person], name: &str, ooo: bool) -> bool {
    match persons.iter_mut().find(|person| person.name == name) {
        Some(person) => {
            person.ooo = ooo;
            true
        }
        None => false,
    }
}

pub fn mark_demoed(persons: &mut [Person], id: &str, when: DateTime<Utc>) {
    if let Some(person) = persons.iter_mut().find(|person| person.id == id) {
        person.last_demo = Some(when);
    }
}
