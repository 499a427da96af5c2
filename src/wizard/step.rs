//! Wizard step state machine — tracks which step the client is on.

use serde::{Deserialize, Serialize};

/// The steps of the intake wizard.
///
/// Navigation walks Contact → Vision → Scope → Timeline → Plan → Review
/// and back. Confirm is only entered by a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Contact,
    Vision,
    Scope,
    Timeline,
    Plan,
    Review,
    Confirm,
}

impl WizardStep {
    pub const ALL: [WizardStep; 7] = [
        Self::Contact,
        Self::Vision,
        Self::Scope,
        Self::Timeline,
        Self::Plan,
        Self::Review,
        Self::Confirm,
    ];

    /// Number of steps, including Confirm.
    pub const COUNT: usize = Self::ALL.len();

    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: WizardStep) -> bool {
        use WizardStep::*;
        matches!(
            (self, target),
            (Contact, Vision)
                | (Vision, Scope)
                | (Scope, Timeline)
                | (Timeline, Plan)
                | (Plan, Review)
                | (Vision, Contact)
                | (Scope, Vision)
                | (Timeline, Scope)
                | (Plan, Timeline)
                | (Review, Plan)
        ) || (target == Confirm && *self != Confirm)
    }

    /// Whether this step is terminal (the brief has been sent).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirm)
    }

    /// Whether the client edits fields on this step.
    pub fn collects_input(&self) -> bool {
        !matches!(self, Self::Review | Self::Confirm)
    }

    /// The step forward navigation leads to, if any.
    pub fn next(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            Contact => Some(Vision),
            Vision => Some(Scope),
            Scope => Some(Timeline),
            Timeline => Some(Plan),
            Plan => Some(Review),
            Review | Confirm => None,
        }
    }

    /// The step backward navigation leads to, if any.
    pub fn previous(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            Contact | Confirm => None,
            Vision => Some(Contact),
            Scope => Some(Vision),
            Timeline => Some(Scope),
            Plan => Some(Timeline),
            Review => Some(Plan),
        }
    }

    /// Zero-based position, for progress indicators.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Contact => "Contact",
            Self::Vision => "Vision",
            Self::Scope => "Scope",
            Self::Timeline => "Timeline",
            Self::Plan => "Plan",
            Self::Review => "Review",
            Self::Confirm => "Confirmed",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Contact => "contact",
            Self::Vision => "vision",
            Self::Scope => "scope",
            Self::Timeline => "timeline",
            Self::Plan => "plan",
            Self::Review => "review",
            Self::Confirm => "confirm",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use WizardStep::*;
        let forward = [
            (Contact, Vision),
            (Vision, Scope),
            (Scope, Timeline),
            (Timeline, Plan),
            (Plan, Review),
        ];
        for (from, to) in forward {
            assert!(from.can_transition_to(to), "{from} should go to {to}");
            assert!(to.can_transition_to(from), "{to} should go back to {from}");
        }
    }

    #[test]
    fn confirm_reachable_from_any_open_step() {
        for step in WizardStep::ALL {
            assert_eq!(
                step.can_transition_to(WizardStep::Confirm),
                !step.is_terminal(),
                "{step}"
            );
        }
    }

    #[test]
    fn invalid_transitions() {
        use WizardStep::*;
        // Skip steps
        assert!(!Contact.can_transition_to(Scope));
        assert!(!Vision.can_transition_to(Review));
        // Leave confirm
        assert!(!Confirm.can_transition_to(Review));
        assert!(!Confirm.can_transition_to(Contact));
        // Self-transition
        assert!(!Plan.can_transition_to(Plan));
    }

    #[test]
    fn next_and_previous_follow_the_table() {
        for step in WizardStep::ALL {
            if let Some(next) = step.next() {
                assert!(step.can_transition_to(next));
            }
            if let Some(prev) = step.previous() {
                assert!(step.can_transition_to(prev));
            }
        }
    }

    #[test]
    fn next_never_reaches_confirm() {
        let mut current = WizardStep::Contact;
        let mut visited = vec![current];
        while let Some(next) = current.next() {
            current = next;
            visited.push(current);
        }
        assert_eq!(current, WizardStep::Review);
        assert!(!visited.contains(&WizardStep::Confirm));
        assert_eq!(visited.len(), WizardStep::COUNT - 1);
    }

    #[test]
    fn index_matches_order() {
        for (i, step) in WizardStep::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
        }
        assert_eq!(WizardStep::COUNT, 7);
    }

    #[test]
    fn display_matches_serde() {
        for step in WizardStep::ALL {
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{step}\""), json, "Display and serde should match for {step:?}");
        }
    }
}
