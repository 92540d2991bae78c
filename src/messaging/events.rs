/// Event types for the wizard
///
/// Events represent things that have happened (past tense).
/// They are broadcast to all subscribers; the rendering layer binds to them.
use crate::pairing::{NameSaveState, Slot, VerificationOutcome, VerificationStatus, CODE_LENGTH};

/// Wizard events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// The wizard moved to another step
    StepChanged { from: i32, to: i32 },

    /// Code cells changed
    CodeChanged {
        code: String,
        slots: [Slot; CODE_LENGTH],
    },

    /// A verification request started or finished
    VerifyingChanged { verifying: bool },

    /// Status on the code cells changed
    VerificationStatusChanged { status: VerificationStatus },

    /// A verification request finished with this outcome
    VerificationFinished { outcome: VerificationOutcome },

    /// Printer name field changed
    PrinterNameChanged { name: String },

    /// Printer name save indicator changed
    NameSaveStateChanged { state: NameSaveState },

    /// Agreement checkbox toggled
    AgreementChanged { checked: bool },

    /// Mobile/web code source changed
    MobileFlowChanged { mobile: bool },

    /// Feature slider moved
    FeatureSlideChanged { slide: u32 },

    /// The wizard loop is shutting down
    Shutdown,
}

impl WizardEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            WizardEvent::StepChanged { from, to } => format!("Step {} -> {}", from, to),
            WizardEvent::CodeChanged { code, .. } => {
                format!("Code: {} of {} digits", code.len(), CODE_LENGTH)
            }
            WizardEvent::VerifyingChanged { verifying } => {
                if *verifying {
                    "Verifying code...".to_string()
                } else {
                    "Verification finished".to_string()
                }
            }
            WizardEvent::VerificationStatusChanged { status } => {
                format!("Code status: {:?}", status)
            }
            WizardEvent::VerificationFinished { outcome } => match outcome {
                VerificationOutcome::Success { printer_name } => {
                    format!("Linked printer {}", printer_name)
                }
                VerificationOutcome::Failure => "Code rejected".to_string(),
                VerificationOutcome::Indeterminate(cause) => {
                    format!("Verification inconclusive: {:?}", cause)
                }
            },
            WizardEvent::PrinterNameChanged { name } => format!("Printer name: {}", name),
            WizardEvent::NameSaveStateChanged { state } => format!("Name save: {:?}", state),
            WizardEvent::AgreementChanged { checked } => format!("Agreement checked: {}", checked),
            WizardEvent::MobileFlowChanged { mobile } => format!("Mobile flow: {}", mobile),
            WizardEvent::FeatureSlideChanged { slide } => format!("Feature slide {}", slide),
            WizardEvent::Shutdown => "Shutting down".to_string(),
        }
    }
}
