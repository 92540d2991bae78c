/// Command executor
///
/// Runs plugin API commands on a background thread so the wizard loop never
/// blocks on the network, and sends each result back as a `Completion`.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use super::commands::{Completion, Dispatch};
use crate::api::PairingApi;

/// Command executor that performs dispatched commands and reports completions
pub struct CommandExecutor {
    dispatch_tx: Sender<Dispatch>,
    dispatch_rx: Receiver<Dispatch>,
    api: Arc<dyn PairingApi>,
    completion_tx: Sender<Completion>,
}

impl CommandExecutor {
    /// Create a new executor reporting to `completion_tx`
    pub fn new(api: Arc<dyn PairingApi>, completion_tx: Sender<Completion>) -> Self {
        let (tx, rx) = unbounded();

        Self {
            dispatch_tx: tx,
            dispatch_rx: rx,
            api,
            completion_tx,
        }
    }

    /// Execute a command immediately (blocking)
    pub fn execute_sync(&self, dispatch: Dispatch) -> Completion {
        perform(self.api.as_ref(), dispatch)
    }

    /// Queue a command for the background thread
    pub fn execute(&self, dispatch: Dispatch) {
        let _ = self.dispatch_tx.send(dispatch);
    }

    /// Start the command processing loop in a background thread.
    ///
    /// Commands run one after another. The thread exits once every
    /// dispatch sender, including the executor's own, is dropped.
    pub fn start_processing(&self) -> thread::JoinHandle<()> {
        let rx = self.dispatch_rx.clone();
        let api = Arc::clone(&self.api);
        let completion_tx = self.completion_tx.clone();

        thread::spawn(move || {
            tracing::info!(target: "pairing_wizard::executor", "Command executor thread started");

            while let Ok(dispatch) = rx.recv() {
                let completion = perform(api.as_ref(), dispatch);
                if completion_tx.send(completion).is_err() {
                    tracing::info!(target: "pairing_wizard::executor", "Wizard loop gone, stopping executor");
                    break;
                }
            }

            tracing::info!(target: "pairing_wizard::executor", "Command executor thread stopped");
        })
    }
}

fn perform(api: &dyn PairingApi, dispatch: Dispatch) -> Completion {
    tracing::info!(
        target: "pairing_wizard::executor",
        "Executing {:?}: {}",
        dispatch.id,
        dispatch.command.description()
    );

    Completion {
        id: dispatch.id,
        result: api.execute(&dispatch.command),
    }
}
