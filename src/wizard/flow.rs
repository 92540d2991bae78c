/// Wizard flow management
///
/// Manages navigation through wizard steps. Moves are unconditional: the
/// views decide which buttons exist on which step.

use super::state::WizardState;
use super::steps::CODE_ENTRY_STEP;

/// A step transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepChange {
    pub from: i32,
    pub to: i32,
}

/// Wizard flow manager
#[derive(Debug, Default)]
pub struct WizardFlow {
    state: WizardState,
}

impl WizardFlow {
    /// Create a new wizard flow
    pub fn new() -> Self {
        Self {
            state: WizardState::new(),
        }
    }

    /// Get current step
    pub fn current_step(&self) -> i32 {
        self.state.current_step
    }

    /// Get wizard state
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Whether key and paste input should reach the code buffer
    pub fn accepts_code_input(&self) -> bool {
        self.state.current_step == CODE_ENTRY_STEP
    }

    /// Navigate to next step
    pub fn next(&mut self) -> StepChange {
        self.go_to(self.state.current_step + 1)
    }

    /// Navigate to previous step
    pub fn prev(&mut self) -> StepChange {
        self.go_to(self.state.current_step - 1)
    }

    /// Jump to a specific step
    pub fn go_to(&mut self, step: i32) -> StepChange {
        let from = self.state.current_step;
        self.state.current_step = step;
        tracing::debug!(target: "pairing_wizard::flow", "Step {} -> {}", from, step);
        StepChange { from, to: step }
    }

    /// Reset wizard to beginning
    pub fn reset(&mut self) -> StepChange {
        let from = self.state.current_step;
        self.state.reset();
        StepChange {
            from,
            to: self.state.current_step,
        }
    }

    /// Flip the agreement checkbox, returning the new value
    pub fn toggle_agreement(&mut self) -> bool {
        self.state.user_agreement_checked = !self.state.user_agreement_checked;
        self.state.user_agreement_checked
    }

    pub fn set_mobile_flow(&mut self, mobile: bool) {
        self.state.mobile_flow = mobile;
    }

    /// Advance the feature slider, wrapping from the last slide to the first
    pub fn next_feature(&mut self, slide_count: u32) -> u32 {
        let current = self.state.current_feature_slide;
        let next = if current >= slide_count { 1 } else { current + 1 };
        self.state.current_feature_slide = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_flow() {
        let flow = WizardFlow::new();
        assert_eq!(flow.current_step(), 1);
        assert!(!flow.accepts_code_input());
    }

    #[test]
    fn test_next_and_prev() {
        let mut flow = WizardFlow::new();

        assert_eq!(flow.next(), StepChange { from: 1, to: 2 });
        assert_eq!(flow.next(), StepChange { from: 2, to: 3 });
        assert_eq!(flow.prev(), StepChange { from: 3, to: 2 });
        assert_eq!(flow.current_step(), 2);
    }

    #[test]
    fn test_moves_are_not_bounds_checked() {
        let mut flow = WizardFlow::new();
        flow.prev();
        assert_eq!(flow.current_step(), 0);

        flow.go_to(42);
        flow.next();
        assert_eq!(flow.current_step(), 43);
    }

    #[test]
    fn test_only_code_step_accepts_input() {
        let mut flow = WizardFlow::new();
        for step in [1, 2, 3, 5, 6] {
            flow.go_to(step);
            assert!(!flow.accepts_code_input(), "step {}", step);
        }
        flow.go_to(CODE_ENTRY_STEP);
        assert!(flow.accepts_code_input());
    }

    #[test]
    fn test_reset() {
        let mut flow = WizardFlow::new();
        flow.go_to(5);
        flow.toggle_agreement();
        flow.set_mobile_flow(false);

        assert_eq!(flow.reset(), StepChange { from: 5, to: 1 });
        assert_eq!(flow.state(), &WizardState::new());
    }

    #[test]
    fn test_toggle_agreement() {
        let mut flow = WizardFlow::new();
        assert!(!flow.toggle_agreement());
        assert!(flow.toggle_agreement());
    }

    #[test]
    fn test_feature_slider_wraps() {
        let mut flow = WizardFlow::new();
        let slides: Vec<u32> = (0..4).map(|_| flow.next_feature(3)).collect();
        assert_eq!(slides, vec![2, 3, 1, 2]);
    }
}
