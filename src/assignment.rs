use chrono::{DateTime, Duration, Utc};

use crate::history::Assignment;
use crate::roster::{find_by_id, Person};
use crate::wheel::WheelKind;

pub const BRIEF: &str = "Quick, scrappy demo that boosts your productivity or advances Readiness goals. Share one ‘Try this’ tip.";

/// Collects the three wheel results into one assignment
#[derive(Debug, Clone, Default)]
pub struct AssignmentAssembler {
    person_id: Option<String>,
    capability: Option<String>,
    platform: Option<String>,
}

impl AssignmentAssembler {
    pub fn set(&mut self, kind: WheelKind, value: &str) {
        let value = Some(value.to_string());
        match kind {
            WheelKind::Person => self.person_id = value,
            WheelKind::Capability => self.capability = value,
            WheelKind::Platform => self.platform = value,
        }
    }

    pub fn person_id(&self) -> Option<&str> {
        self.person_id.as_deref()
    }

    pub fn capability(&self) -> Option<&str> {
        self.capability.as_deref()
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    pub fn clear_person(&mut self) {
        self.person_id = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_complete(&self) -> bool {
        self.person_id.is_some() && self.capability.is_some() && self.platform.is_some()
    }

    /// The assignment, once all three wheels have landed
    pub fn assemble(&self, now: DateTime<Utc>) -> Option<Assignment> {
        Some(Assignment {
            person_id: self.person_id.clone()?,
            capability: self.capability.clone()?,
            platform: self.platform.clone()?,
            next_sync: next_sync_date(now),
        })
    }
}

/// Demos happen at next week's sync
pub fn next_sync_date(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(7)
}

pub fn format_date_short(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// The assignment card as posted to Slack and printed on the terminal
pub fn card_text(assignment: &Assignment, persons: &[Person]) -> String {
    let person = find_by_id(persons, &assignment.person_id)
        .map(|person| person.name.as_str())
        .unwrap_or_default();
    format!(
        "🎡 *Next week’s Readiness demo*\n\
         • Person: {person}\n\
         • Capability: {}\n\
         • Platform: {}\n\
         • Brief: {BRIEF}\n\
         • Date: {}",
        assignment.capability,
        assignment.platform,
        format_date_short(assignment.next_sync)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_assembles_only_when_complete() {
        let mut assembler = AssignmentAssembler::default();
        assembler.set(WheelKind::Capability, "GPT");
        assert!(assembler.assemble(now()).is_none());
        assembler.set(WheelKind::Person, "2");
        assembler.set(WheelKind::Platform, "Google Apps Script");
        let assignment = assembler.assemble(now()).unwrap();
        assert_eq!(assignment.person_id, "2");
        assert_eq!(assignment.next_sync, Utc.with_ymd_and_hms(2025, 6, 9, 9, 0, 0).unwrap());
        assembler.clear_person();
        assert!(!assembler.is_complete());
    }

    #[test]
    fn test_card_text() {
        let persons = [Person::new("2", "Grace")];
        let assignment = Assignment {
            person_id: "2".into(),
            capability: "GPT".into(),
            platform: "Google Apps Script".into(),
            next_sync: next_sync_date(now()),
        };
        let text = card_text(&assignment, &persons);
        assert!(text.starts_with("🎡 *Next week’s Readiness demo*\n• Person: Grace\n"));
        assert!(text.contains("• Capability: GPT\n• Platform: Google Apps Script\n"));
        assert!(text.ends_with("• Date: Jun 9, 2025"));
    }
}
