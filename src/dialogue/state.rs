//! Dialogue state machine — tracks which birth detail is being collected.

use serde::{Deserialize, Serialize};

/// The steps of the registration dialogue.
///
/// Progresses linearly: Idle → CollectingName → CollectingDob →
/// CollectingTime → CollectingPlace → Complete. Stored sessions are always
/// in one of the four collecting steps; Idle and Complete exist only as
/// endpoints of the progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueStep {
    Idle,
    CollectingName,
    CollectingDob,
    CollectingTime,
    CollectingPlace,
    Complete,
}

impl DialogueStep {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: DialogueStep) -> bool {
        use DialogueStep::*;
        matches!(
            (self, target),
            (Idle, CollectingName)
                | (CollectingName, CollectingDob)
                | (CollectingDob, CollectingTime)
                | (CollectingTime, CollectingPlace)
                | (CollectingPlace, Complete)
        )
    }

    /// Whether this step is terminal (registration is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<DialogueStep> {
        use DialogueStep::*;
        match self {
            Idle => Some(CollectingName),
            CollectingName => Some(CollectingDob),
            CollectingDob => Some(CollectingTime),
            CollectingTime => Some(CollectingPlace),
            CollectingPlace => Some(Complete),
            Complete => None,
        }
    }
}

impl Default for DialogueStep {
    fn default() -> Self {
        Self::Idle
    }
}

impl std::fmt::Display for DialogueStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::CollectingName => "collecting_name",
            Self::CollectingDob => "collecting_dob",
            Self::CollectingTime => "collecting_time",
            Self::CollectingPlace => "collecting_place",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

/// Partially collected birth details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BirthDraft {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub time_of_birth: Option<String>,
    pub place_of_birth: Option<String>,
}

/// One chat's active dialogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub chat_id: i64,
    pub step: DialogueStep,
    pub draft: BirthDraft,
}

impl Session {
    /// Start a fresh dialogue at the name step with an empty draft.
    pub fn start(chat_id: i64) -> Self {
        Self {
            chat_id,
            step: DialogueStep::CollectingName,
            draft: BirthDraft::default(),
        }
    }

    /// Advance to the next step. Returns an error at the terminal step.
    pub fn advance(&mut self) -> Result<DialogueStep, String> {
        let next = self
            .step
            .next()
            .ok_or_else(|| "Already at terminal step".to_string())?;
        if !self.step.can_transition_to(next) {
            return Err(format!("Cannot transition from {} to {}", self.step, next));
        }
        self.step = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use DialogueStep::*;
        let transitions = [
            (Idle, CollectingName),
            (CollectingName, CollectingDob),
            (CollectingDob, CollectingTime),
            (CollectingTime, CollectingPlace),
            (CollectingPlace, Complete),
        ];
        for (from, to) in transitions {
            assert!(from.can_transition_to(to), "{from} should transition to {to}");
        }
    }

    #[test]
    fn invalid_transitions() {
        use DialogueStep::*;
        // Skip steps
        assert!(!Idle.can_transition_to(CollectingTime));
        assert!(!CollectingName.can_transition_to(CollectingPlace));
        // Go backward
        assert!(!CollectingTime.can_transition_to(CollectingDob));
        // Terminal
        assert!(!Complete.can_transition_to(Idle));
        // Self-transition
        assert!(!CollectingDob.can_transition_to(CollectingDob));
    }

    #[test]
    fn is_terminal() {
        use DialogueStep::*;
        assert!(Complete.is_terminal());
        assert!(!Idle.is_terminal());
        assert!(!CollectingName.is_terminal());
        assert!(!CollectingPlace.is_terminal());
    }

    #[test]
    fn next_walks_all_steps() {
        use DialogueStep::*;
        let expected = [
            CollectingName,
            CollectingDob,
            CollectingTime,
            CollectingPlace,
            Complete,
        ];
        let mut current = Idle;
        for expected_next in expected {
            let next = current.next().unwrap();
            assert_eq!(next, expected_next);
            current = next;
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn display_matches_serde() {
        use DialogueStep::*;
        for step in [
            Idle,
            CollectingName,
            CollectingDob,
            CollectingTime,
            CollectingPlace,
            Complete,
        ] {
            let display = format!("{step}");
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(
                format!("\"{display}\""),
                json,
                "Display and serde should match for {step:?}"
            );
        }
    }

    #[test]
    fn session_advances_through_all_steps() {
        let mut session = Session::start(42);
        assert_eq!(session.step, DialogueStep::CollectingName);

        let expected = [
            DialogueStep::CollectingDob,
            DialogueStep::CollectingTime,
            DialogueStep::CollectingPlace,
            DialogueStep::Complete,
        ];
        for step in expected {
            assert_eq!(session.advance().unwrap(), step);
        }
        assert!(session.advance().is_err());
    }

    #[test]
    fn fresh_session_has_empty_draft() {
        let session = Session::start(7);
        assert_eq!(session.chat_id, 7);
        assert!(session.draft.name.is_none());
        assert!(session.draft.dob.is_none());
        assert!(session.draft.time_of_birth.is_none());
        assert!(session.draft.place_of_birth.is_none());
    }
}
