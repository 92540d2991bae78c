/// Command types for the plugin API
///
/// Commands represent requests to perform remote actions (imperative).
/// They are serialized as the JSON body of a single POST to the plugin's
/// command endpoint and executed by the command executor.
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Identifies one dispatched command so its reply can be matched up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// Remote commands, tagged by the `command` field on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ApiCommand {
    /// Exchange a six-digit security code for a printer link
    VerifyCode {
        code: String,
        endpoint_prefix: String,
    },

    /// Rename the linked printer
    UpdatePrinter { name: String },
}

impl ApiCommand {
    /// Get a human-readable description of the command
    pub fn description(&self) -> String {
        match self {
            // The code is a credential, keep it out of logs
            ApiCommand::VerifyCode {
                endpoint_prefix, ..
            } => format!("Verify security code against {}", endpoint_prefix),
            ApiCommand::UpdatePrinter { name } => format!("Update printer name: {}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrinterInfo {
    pub name: String,
}

/// Reply to `verify_code`. `succeeded` is tri-state: a null or missing
/// verdict means the server could not tell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct VerifyCodeReply {
    #[serde(default)]
    pub succeeded: Option<bool>,
    #[serde(default)]
    pub printer: Option<PrinterInfo>,
}

/// Reply to `update_printer`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UpdatePrinterReply {
    #[serde(default)]
    pub succeeded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiReply {
    VerifyCode(VerifyCodeReply),
    UpdatePrinter(UpdatePrinterReply),
}

/// A command queued for the executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub id: RequestId,
    pub command: ApiCommand,
}

/// Result of executing a dispatched command, delivered back to the event loop
#[derive(Debug)]
pub struct Completion {
    pub id: RequestId,
    pub result: Result<ApiReply, ApiError>,
}
