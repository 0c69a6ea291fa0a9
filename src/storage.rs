/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Best-effort local persistence of JSON blobs under fixed keys.
//!
//! Last write wins. A blob that fails to parse is treated as absent.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::WheelError;
use crate::history::{push_front, Assignment, SpinRecord};
use crate::roster::{default_roster, Person, CAPABILITIES, PLATFORMS};
use crate::settings::Settings;
use crate::wheel::{EnabledMap, WheelKind};

pub const PERSONS_KEY: &str = "rsw_persons";
pub const SETTINGS_KEY: &str = "rsw_settings";
pub const SPINS_KEY: &str = "rsw_spins";
pub const ASSIGNMENTS_KEY: &str = "rsw_assignments";
pub const CAPABILITY_TOGGLES_KEY: &str = "rsw_capability_toggles";
pub const PLATFORM_TOGGLES_KEY: &str = "rsw_platform_toggles";

const ALL_KEYS: [&str; 6] = [
    PERSONS_KEY,
    SETTINGS_KEY,
    SPINS_KEY,
    ASSIGNMENTS_KEY,
    CAPABILITY_TOGGLES_KEY,
    PLATFORM_TOGGLES_KEY,
];

/// Key-value storage of JSON strings
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), WheelError>;
    fn remove(&mut self, key: &str) -> Result<(), WheelError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), WheelError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), WheelError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path(key)) {
            Ok(contents) => Some(contents),
            Err(error) if error.kind() == io::ErrorKind::NotFound => None,
            Err(error) => {
                log::warn!("Could not read {key}: {error}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), WheelError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), WheelError> {
        match fs::remove_file(self.path(key)) {
            Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error.into()),
            _ => Ok(()),
        }
    }
}

/// The browser's `localStorage`
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
fn js_err(error: wasm_bindgen::JsValue) -> WheelError {
    WheelError::Io(io::Error::new(io::ErrorKind::Other, format!("{error:?}")))
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), WheelError> {
        self.storage.set_item(key, value).map_err(js_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), WheelError> {
        self.storage.remove_item(key).map_err(js_err)
    }
}

/// Typed access to everything the wheel app keeps between sessions
pub struct Store<S: Storage> {
    storage: S,
}

impl<S: Storage> Store<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = self.storage.get(key)?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(error) => {
                log::warn!("Ignoring malformed {key}: {error}");
                None
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), WheelError> {
        let json = serde_json::to_string(value)?;
        self.storage.set(key, &json)
    }

    /// The stored roster, seeded from the default names the first time
    pub fn load_persons(&mut self) -> Result<Vec<Person>, WheelError> {
        match self.load::<Vec<Person>>(PERSONS_KEY) {
            Some(persons) if !persons.is_empty() => Ok(persons),
            _ => {
                let seeded = default_roster();
                self.save_persons(&seeded)?;
                Ok(seeded)
            }
        }
    }

    pub fn save_persons(&mut self, persons: &[Person]) -> Result<(), WheelError> {
        self.save(PERSONS_KEY, persons)
    }

    pub fn load_settings(&self) -> Settings {
        self.load(SETTINGS_KEY).unwrap_or_default()
    }

    pub fn save_settings(&mut self, settings: &Settings) -> Result<(), WheelError> {
        self.save(SETTINGS_KEY, settings)
    }

    pub fn load_spins(&self) -> Vec<SpinRecord> {
        self.load(SPINS_KEY).unwrap_or_default()
    }

    pub fn push_spin(&mut self, record: SpinRecord) -> Result<(), WheelError> {
        let mut spins = self.load_spins();
        push_front(&mut spins, record);
        self.save(SPINS_KEY, &spins)
    }

    pub fn load_assignments(&self) -> Vec<Assignment> {
        self.load(ASSIGNMENTS_KEY).unwrap_or_default()
    }

    pub fn push_assignment(&mut self, assignment: Assignment) -> Result<(), WheelError> {
        let mut assignments = self.load_assignments();
        push_front(&mut assignments, assignment);
        self.save(ASSIGNMENTS_KEY, &assignments)
    }

    /// Every option enabled, overridden by whatever was saved
    pub fn load_toggles(&self, kind: WheelKind) -> EnabledMap {
        let Some((key, options)) = toggle_slot(kind) else {
            return EnabledMap::new();
        };
        let mut toggles: EnabledMap = options
            .iter()
            .map(|option| (option.to_string(), true))
            .collect();
        toggles.extend(self.load::<EnabledMap>(key).unwrap_or_default());
        toggles
    }

    pub fn save_toggles(&mut self, kind: WheelKind, toggles: &EnabledMap) -> Result<(), WheelError> {
        match toggle_slot(kind) {
            Some((key, _)) => self.save(key, toggles),
            None => Ok(()),
        }
    }

    pub fn reset_all(&mut self) -> Result<(), WheelError> {
        for key in ALL_KEYS {
            self.storage.remove(key)?;
        }
        Ok(())
    }
}

/// Wheel options that the admin can switch off, and where their switches live
pub fn toggle_slot(kind: WheelKind) -> Option<(&'static str, &'static [&'static str])> {
    match kind {
        WheelKind::Person => None,
        WheelKind::Capability => Some((CAPABILITY_TOGGLES_KEY, &CAPABILITIES[..])),
        WheelKind::Platform => Some((PLATFORM_TOGGLES_KEY, &PLATFORMS[..])),
    }
}
