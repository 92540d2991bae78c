/// Wizard state
///
/// Everything the step views bind to that is not owned by a pairing
/// controller.

/// Wizard state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    /// Current step number, starting at 1
    pub current_step: i32,

    /// Agreement checkbox on the agreement step
    pub user_agreement_checked: bool,

    /// Whether the user gets the code from the mobile app (vs. the web site)
    pub mobile_flow: bool,

    /// Visible slide of the welcome-step feature slider, starting at 1
    pub current_feature_slide: u32,
}

impl WizardState {
    /// Create a new wizard state (fresh start)
    pub fn new() -> Self {
        Self {
            current_step: 1,
            user_agreement_checked: true,
            mobile_flow: true,
            current_feature_slide: 1,
        }
    }

    /// Reset wizard to beginning
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
