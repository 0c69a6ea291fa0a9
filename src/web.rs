//! The browser-facing surface: wheels addressed by name, outcomes as JSON.

use serde::Serialize;

use crate::error::WheelError;
use crate::session::Session;
use crate::storage::Storage;
use crate::wheel::{SpinOutcome, WheelKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum OutcomeReport {
    Started { target: f64 },
    Settled { value: String },
    Busy,
    NoEligibleOptions,
    RespinUnavailable,
}

impl From<SpinOutcome> for OutcomeReport {
    fn from(outcome: SpinOutcome) -> Self {
        match outcome {
            SpinOutcome::Started { target } => OutcomeReport::Started { target: *target },
            SpinOutcome::Settled(value) => OutcomeReport::Settled { value },
            SpinOutcome::Busy => OutcomeReport::Busy,
            SpinOutcome::NoEligibleOptions => OutcomeReport::NoEligibleOptions,
            SpinOutcome::RespinUnavailable => OutcomeReport::RespinUnavailable,
        }
    }
}

fn kind(name: &str) -> Result<WheelKind, WheelError> {
    name.parse::<WheelKind>()
        .map_err(|_| WheelError::UnknownOption(name.to_string()))
}

/// A session driven by a page: wheel names in, JSON out
pub struct WheelBoard<S: Storage> {
    session: Session<S>,
}

impl<S: Storage> WheelBoard<S> {
    pub fn new(session: Session<S>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn spin(&mut self, wheel: &str) -> Result<String, WheelError> {
        let outcome = self.session.spin(kind(wheel)?);
        Ok(serde_json::to_string(&OutcomeReport::from(outcome))?)
    }

    pub fn respin(&mut self, wheel: &str) -> Result<String, WheelError> {
        let outcome = self.session.respin(kind(wheel)?);
        Ok(serde_json::to_string(&OutcomeReport::from(outcome))?)
    }

    pub fn not_here(&mut self) -> Result<String, WheelError> {
        let outcome = self.session.not_here();
        Ok(serde_json::to_string(&OutcomeReport::from(outcome))?)
    }

    /// One animation frame for all wheels; true while any still turns
    pub fn frame(&mut self) -> bool {
        self.session.frame()
    }

    pub fn angle(&self, wheel: &str) -> Result<f64, WheelError> {
        Ok(*self.session.wheel(kind(wheel)?).angle())
    }

    pub fn face(&self, wheel: &str) -> Result<Vec<String>, WheelError> {
        Ok(self.session.wheel(kind(wheel)?).face())
    }

    pub fn no_eligible_people(&self) -> bool {
        self.session.no_eligible_people()
    }

    pub fn override_all(&mut self) {
        self.session.override_all();
    }

    pub fn new_round(&mut self) {
        self.session.new_round();
    }

    pub fn card_text(&self) -> Option<String> {
        self.session.card_text()
    }

    pub fn post_assignment(&self) -> Result<(), WheelError> {
        self.session.post_assignment()
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        self.session.take_notices()
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::browser::WebWheels;

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use super::WheelBoard;
    use crate::error::WheelError;
    use crate::session::{Session, SessionOptions};
    use crate::storage::LocalStorage;
    use crate::wheel::clock::SystemClock;

    fn js(error: WheelError) -> JsValue {
        JsValue::from_str(&error.to_string())
    }

    /// The three wheels over `localStorage`, for the page's buttons and animation frames
    #[wasm_bindgen]
    pub struct WebWheels {
        board: WheelBoard<LocalStorage>,
    }

    #[wasm_bindgen]
    impl WebWheels {
        #[wasm_bindgen(constructor)]
        pub fn new() -> Result<WebWheels, JsValue> {
            let storage = LocalStorage::open().ok_or_else(|| JsValue::from_str("no localStorage"))?;
            let session = Session::open(storage, Rc::new(SystemClock::default()), SessionOptions::default())
                .map_err(js)?;
            Ok(Self {
                board: WheelBoard::new(session),
            })
        }

        pub fn spin(&mut self, wheel: &str) -> Result<String, JsValue> {
            self.board.spin(wheel).map_err(js)
        }

        pub fn respin(&mut self, wheel: &str) -> Result<String, JsValue> {
            self.board.respin(wheel).map_err(js)
        }

        pub fn not_here(&mut self) -> Result<String, JsValue> {
            self.board.not_here().map_err(js)
        }

        pub fn frame(&mut self) -> bool {
            self.board.frame()
        }

        pub fn angle(&self, wheel: &str) -> Result<f64, JsValue> {
            self.board.angle(wheel).map_err(js)
        }

        pub fn face(&self, wheel: &str) -> Result<Vec<String>, JsValue> {
            self.board.face(wheel).map_err(js)
        }

        pub fn no_eligible_people(&self) -> bool {
            self.board.no_eligible_people()
        }

        pub fn override_all(&mut self) {
            self.board.override_all();
        }

        pub fn new_round(&mut self) {
            self.board.new_round();
        }

        pub fn card_text(&self) -> Option<String> {
            self.board.card_text()
        }

        pub fn post_assignment(&self) -> Result<(), JsValue> {
            self.board.post_assignment().map_err(js)
        }

        pub fn take_notices(&mut self) -> Vec<String> {
            self.board.take_notices()
        }
    }
}
