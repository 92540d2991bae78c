/// Wizard step definitions
///
/// Steps are plain 1-based numbers; navigation never bounds-checks them.
/// `WizardStep` names the numbers the views know how to render.

/// The only step that takes security code input
pub const CODE_ENTRY_STEP: i32 = 4;

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    /// Welcome screen with the feature slider
    Welcome,

    /// Terms the user agrees to before linking
    Agreement,

    /// Instructions for getting a code from the mobile app or web site
    GetCode,

    /// Six-digit security code entry
    SecurityCode,

    /// Name the linked printer
    PrinterName,

    /// Finish setup
    Complete,
}

impl WizardStep {
    /// Map a step number to a known step
    pub fn from_number(step: i32) -> Option<WizardStep> {
        match step {
            1 => Some(WizardStep::Welcome),
            2 => Some(WizardStep::Agreement),
            3 => Some(WizardStep::GetCode),
            CODE_ENTRY_STEP => Some(WizardStep::SecurityCode),
            5 => Some(WizardStep::PrinterName),
            6 => Some(WizardStep::Complete),
            _ => None,
        }
    }

    /// Get step number (1-indexed)
    pub fn number(&self) -> i32 {
        match self {
            WizardStep::Welcome => 1,
            WizardStep::Agreement => 2,
            WizardStep::GetCode => 3,
            WizardStep::SecurityCode => CODE_ENTRY_STEP,
            WizardStep::PrinterName => 5,
            WizardStep::Complete => 6,
        }
    }

    /// Get step title
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Welcome => "Welcome",
            WizardStep::Agreement => "Before You Start",
            WizardStep::GetCode => "Get a Security Code",
            WizardStep::SecurityCode => "Enter the 6-Digit Code",
            WizardStep::PrinterName => "Name Your Printer",
            WizardStep::Complete => "All Set",
        }
    }

    /// Get total number of steps
    pub fn total_steps() -> usize {
        6
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_numbers_round_trip() {
        for n in 1..=WizardStep::total_steps() as i32 {
            let step = WizardStep::from_number(n).unwrap();
            assert_eq!(step.number(), n);
        }
    }

    #[test]
    fn test_code_entry_step() {
        assert_eq!(
            WizardStep::from_number(CODE_ENTRY_STEP),
            Some(WizardStep::SecurityCode)
        );
    }

    #[test]
    fn test_unknown_numbers() {
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(7), None);
        assert_eq!(WizardStep::from_number(-1), None);
    }
}
