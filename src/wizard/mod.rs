/// Pairing wizard module
///
/// Walks the user from the welcome screen to a linked, named printer.
///
/// ## Architecture
///
/// ```text
/// WizardController
///   ├── WizardFlow (current step, agreement, mobile flow, feature slide)
///   ├── InputRouter ──> CodeBuffer ──> VerificationController
///   ├── DeviceNamingController
///   └── TimerQueue (name debounce, save indicator, feature slider)
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// let mut wizard = WizardController::new(&config, settings, clipboard, bus);
/// wizard.mount(Instant::now());
///
/// wizard.go_to(CODE_ENTRY_STEP);
/// wizard.handle_input(InputEvent::Paste("445566".into()));
///
/// for dispatch in wizard.drain_outbox() {
///     executor.execute(dispatch);
/// }
/// ```
///
/// ## Steps
///
/// 1. **Welcome** - Feature slider
/// 2. **Agreement** - Terms checkbox
/// 3. **GetCode** - Where to find the code (mobile app or web)
/// 4. **SecurityCode** - Six-digit code entry and verification
/// 5. **PrinterName** - Name the linked printer
/// 6. **Complete** - Done

pub mod controller;
pub mod flow;
pub mod state;
pub mod steps;

// Re-export commonly used types
pub use controller::WizardController;
pub use flow::{StepChange, WizardFlow};
pub use state::WizardState;
pub use steps::{WizardStep, CODE_ENTRY_STEP};
