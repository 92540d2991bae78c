/// Security code verification
///
/// Tracks the single in-flight `verify_code` request and maps its reply to
/// the status the code cells display.
use crate::error::ApiError;
use crate::messaging::commands::{RequestId, VerifyCodeReply};

use super::code::CODE_LENGTH;

/// Status shown on the code cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationStatus {
    #[default]
    None,
    Success,
    Error,
    /// Neither confirmed nor rejected
    Unknown,
}

/// Why a verification ended without a verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndeterminateCause {
    /// The server replied with a null or missing `succeeded`
    NoVerdict,
    /// `succeeded: true` without the linked printer
    MissingPrinter,
    /// The request could not complete
    RequestFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Success { printer_name: String },
    Failure,
    Indeterminate(IndeterminateCause),
}

impl VerificationOutcome {
    fn from_result(result: Result<VerifyCodeReply, ApiError>) -> Self {
        match result {
            Ok(VerifyCodeReply {
                succeeded: Some(true),
                printer: Some(printer),
            }) => VerificationOutcome::Success {
                printer_name: printer.name,
            },
            Ok(VerifyCodeReply {
                succeeded: Some(true),
                printer: None,
            }) => VerificationOutcome::Indeterminate(IndeterminateCause::MissingPrinter),
            Ok(VerifyCodeReply {
                succeeded: Some(false),
                ..
            }) => VerificationOutcome::Failure,
            Ok(VerifyCodeReply {
                succeeded: None, ..
            }) => VerificationOutcome::Indeterminate(IndeterminateCause::NoVerdict),
            Err(e) => VerificationOutcome::Indeterminate(IndeterminateCause::RequestFailed(
                e.to_string(),
            )),
        }
    }

    pub fn status(&self) -> VerificationStatus {
        match self {
            VerificationOutcome::Success { .. } => VerificationStatus::Success,
            VerificationOutcome::Failure => VerificationStatus::Error,
            VerificationOutcome::Indeterminate(_) => VerificationStatus::Unknown,
        }
    }
}

#[derive(Debug, Default)]
pub struct VerificationController {
    in_flight: Option<RequestId>,
    status: VerificationStatus,
    last_outcome: Option<VerificationOutcome>,
}

impl VerificationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_verifying(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn status(&self) -> VerificationStatus {
        self.status
    }

    pub fn last_outcome(&self) -> Option<&VerificationOutcome> {
        self.last_outcome.as_ref()
    }

    /// Claim the verifying slot for request `id`.
    ///
    /// Returns false, leaving the current request alone, when a request is
    /// already outstanding.
    pub fn begin(&mut self, id: RequestId) -> bool {
        if let Some(current) = self.in_flight {
            tracing::warn!(
                target: "pairing_wizard::verification",
                "Verification {:?} still in flight, rejecting {:?}",
                current,
                id
            );
            return false;
        }
        self.in_flight = Some(id);
        true
    }

    /// Apply the reply for request `id`.
    ///
    /// `code_len` is the buffer length at arrival: if the user has started
    /// editing the code in the meantime, the status stays cleared.
    /// Returns None for replies to a request that is no longer outstanding.
    pub fn apply_reply(
        &mut self,
        id: RequestId,
        result: Result<VerifyCodeReply, ApiError>,
        code_len: usize,
    ) -> Option<VerificationOutcome> {
        if self.in_flight != Some(id) {
            tracing::warn!(
                target: "pairing_wizard::verification",
                "Dropping stale verification reply {:?}",
                id
            );
            return None;
        }
        self.in_flight = None;

        let outcome = VerificationOutcome::from_result(result);
        match &outcome {
            VerificationOutcome::Success { printer_name } => {
                tracing::info!(target: "pairing_wizard::verification", "Code verified, linked printer {:?}", printer_name);
            }
            VerificationOutcome::Failure => {
                tracing::info!(target: "pairing_wizard::verification", "Code rejected by server");
            }
            VerificationOutcome::Indeterminate(IndeterminateCause::RequestFailed(reason)) => {
                tracing::error!(target: "pairing_wizard::verification", "Verification request failed: {}", reason);
            }
            VerificationOutcome::Indeterminate(cause) => {
                tracing::warn!(target: "pairing_wizard::verification", "Verification inconclusive: {:?}", cause);
            }
        }

        self.status = if code_len < CODE_LENGTH {
            VerificationStatus::None
        } else {
            outcome.status()
        };
        self.last_outcome = Some(outcome.clone());
        Some(outcome)
    }

    /// Remove the error, success and unknown status together
    pub fn clear_status(&mut self) {
        self.status = VerificationStatus::None;
    }

    pub fn reset(&mut self) {
        self.in_flight = None;
        self.status = VerificationStatus::None;
        self.last_outcome = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::commands::PrinterInfo;

    fn reply(succeeded: Option<bool>, name: Option<&str>) -> Result<VerifyCodeReply, ApiError> {
        Ok(VerifyCodeReply {
            succeeded,
            printer: name.map(|n| PrinterInfo {
                name: n.to_string(),
            }),
        })
    }

    #[test]
    fn test_begin_rejects_concurrent_request() {
        let mut controller = VerificationController::new();
        assert!(controller.begin(RequestId(1)));
        assert!(controller.is_verifying());
        assert!(!controller.begin(RequestId(2)));
        assert_eq!(controller.in_flight(), Some(RequestId(1)));
    }

    #[test]
    fn test_success() {
        let mut controller = VerificationController::new();
        controller.begin(RequestId(1));

        let outcome = controller.apply_reply(RequestId(1), reply(Some(true), Some("MyPrinter")), 6);
        assert_eq!(
            outcome,
            Some(VerificationOutcome::Success {
                printer_name: "MyPrinter".to_string()
            })
        );
        assert_eq!(controller.status(), VerificationStatus::Success);
        assert!(!controller.is_verifying());
    }

    #[test]
    fn test_explicit_failure() {
        let mut controller = VerificationController::new();
        controller.begin(RequestId(1));

        let outcome = controller.apply_reply(RequestId(1), reply(Some(false), None), 6);
        assert_eq!(outcome, Some(VerificationOutcome::Failure));
        assert_eq!(controller.status(), VerificationStatus::Error);
    }

    #[test]
    fn test_null_verdict_is_unknown() {
        let mut controller = VerificationController::new();
        controller.begin(RequestId(1));

        let outcome = controller.apply_reply(RequestId(1), reply(None, None), 6);
        assert_eq!(
            outcome,
            Some(VerificationOutcome::Indeterminate(IndeterminateCause::NoVerdict))
        );
        assert_eq!(controller.status(), VerificationStatus::Unknown);
    }

    #[test]
    fn test_transport_failure_is_unknown_but_distinct() {
        let mut controller = VerificationController::new();
        controller.begin(RequestId(1));

        let outcome = controller
            .apply_reply(RequestId(1), Err(ApiError::HttpStatus { status: 500 }), 6)
            .unwrap();
        assert_eq!(controller.status(), VerificationStatus::Unknown);
        assert!(matches!(
            outcome,
            VerificationOutcome::Indeterminate(IndeterminateCause::RequestFailed(_))
        ));
        assert!(!controller.is_verifying());
    }

    #[test]
    fn test_success_without_printer() {
        let mut controller = VerificationController::new();
        controller.begin(RequestId(1));

        let outcome = controller.apply_reply(RequestId(1), reply(Some(true), None), 6);
        assert_eq!(
            outcome,
            Some(VerificationOutcome::Indeterminate(
                IndeterminateCause::MissingPrinter
            ))
        );
    }

    #[test]
    fn test_incomplete_code_keeps_status_cleared() {
        for result in [reply(Some(true), Some("P")), reply(Some(false), None), reply(None, None)] {
            let mut controller = VerificationController::new();
            controller.begin(RequestId(3));
            controller.apply_reply(RequestId(3), result, 4);
            assert_eq!(controller.status(), VerificationStatus::None);
        }
    }

    #[test]
    fn test_stale_reply_dropped() {
        let mut controller = VerificationController::new();
        controller.begin(RequestId(1));
        controller.reset();

        assert!(controller
            .apply_reply(RequestId(1), reply(Some(true), Some("P")), 6)
            .is_none());
        assert_eq!(controller.status(), VerificationStatus::None);
        assert!(controller.last_outcome().is_none());
    }
}
