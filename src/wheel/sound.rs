use std::cell::Cell;
use std::fmt;
use std::io::{self, Write};

/// Audio could not be produced. Never fatal.
#[derive(Debug, Clone)]
pub struct SoundError(pub String);

impl fmt::Display for SoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sound unavailable: {}", self.0)
    }
}

impl std::error::Error for SoundError {}

impl From<io::Error> for SoundError {
    fn from(error: io::Error) -> Self {
        SoundError(error.to_string())
    }
}

/// Presentational cues while a wheel turns. Failures are ignored by the wheel.
pub trait SoundPort {
    /// Kick-off of a spin
    fn whoosh(&self) -> Result<(), SoundError> {
        Ok(())
    }

    /// A wedge boundary passing the pointer, throttled by the wheel
    fn tick(&self) -> Result<(), SoundError>;

    /// The wheel came to rest
    fn settle(&self) -> Result<(), SoundError>;
}

/// Terminal sound kit: a bell for the fanfare, nothing audible for ticks.
///
/// Muted entirely when sounds are off or reduced motion is requested.
pub struct SoundKit {
    enabled: Cell<bool>,
    reduced: Cell<bool>,
}

impl SoundKit {
    pub fn new(enabled: bool, reduced: bool) -> Self {
        Self {
            enabled: Cell::new(enabled),
            reduced: Cell::new(reduced),
        }
    }

    pub fn update(&self, enabled: bool, reduced: bool) {
        self.enabled.set(enabled);
        self.reduced.set(reduced);
    }

    fn audible(&self) -> bool {
        self.enabled.get() && !self.reduced.get()
    }
}

impl SoundPort for SoundKit {
    fn whoosh(&self) -> Result<(), SoundError> {
        if self.audible() {
            log::trace!("whoosh");
        }
        Ok(())
    }

    fn tick(&self) -> Result<(), SoundError> {
        if self.audible() {
            log::trace!("tick");
        }
        Ok(())
    }

    fn settle(&self) -> Result<(), SoundError> {
        if !self.audible() {
            return Ok(());
        }
        let mut stderr = io::stderr();
        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        Ok(())
    }
}
