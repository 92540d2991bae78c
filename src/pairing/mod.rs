/// Printer pairing
///
/// ## Architecture
///
/// ```text
/// key / paste ──> CodeBuffer ──(6 digits)──> VerificationController ──> verify_code
///                                                    │
///                                        Success(name)│
///                                                    ▼
/// name edits ──> DeviceNamingController ──(debounce)──> update_printer
/// ```

pub mod code;
pub mod naming;
pub mod verification;

// Re-export commonly used types
pub use code::{CodeBuffer, CodeChange, Slot, CODE_LENGTH};
pub use naming::{DeviceNamingController, NameSaveState};
pub use verification::{
    IndeterminateCause, VerificationController, VerificationOutcome, VerificationStatus,
};
