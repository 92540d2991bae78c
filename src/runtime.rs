/// The wizard event loop
///
/// One thread owns the [`WizardController`] and applies, in arrival order,
/// host commands, API completions and timer expiries. Network calls run on
/// the executor thread and come back as completions, so nothing here blocks
/// on I/O.
use crossbeam_channel::{at, never, select, unbounded, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::api::PairingApi;
use crate::clipboard::ClipboardSource;
use crate::config::Config;
use crate::input::InputEvent;
use crate::messaging::{CommandExecutor, Completion, EventBus, SubscriberId, WizardEvent};
use crate::settings::SettingsStore;
use crate::wizard::WizardController;

const LOG_TARGET: &str = "pairing_wizard::runtime";

/// Requests from the host view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Input(InputEvent),
    Next,
    Prev,
    GoTo(i32),
    Reset,
    EditName(String),
    ToggleAgreement,
    SetMobileFlow(bool),
    SetEndpointPrefix(String),
    ResetEndpointPrefix,
    Shutdown,
}

/// Host-side handle: send commands in, subscribe to events out
#[derive(Clone)]
pub struct WizardHandle {
    tx: Sender<HostCommand>,
    bus: EventBus,
}

impl WizardHandle {
    /// Returns false once the loop has stopped
    pub fn send(&self, command: HostCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn subscribe(&self) -> (Receiver<WizardEvent>, SubscriberId) {
        self.bus.subscribe()
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        self.bus.unsubscribe(id);
    }
}

pub struct WizardRuntime {
    controller: WizardController,
    executor: CommandExecutor,
    inbox: Receiver<HostCommand>,
    completions: Receiver<Completion>,
}

impl WizardRuntime {
    pub fn new(
        config: &Config,
        api: Arc<dyn PairingApi>,
        settings: SettingsStore,
        clipboard: Box<dyn ClipboardSource>,
    ) -> (Self, WizardHandle) {
        let bus = EventBus::new();
        let (host_tx, host_rx) = unbounded();
        let (completion_tx, completion_rx) = unbounded();

        let runtime = Self {
            controller: WizardController::new(config, settings, clipboard, bus.clone()),
            executor: CommandExecutor::new(api, completion_tx),
            inbox: host_rx,
            completions: completion_rx,
        };
        let handle = WizardHandle { tx: host_tx, bus };

        (runtime, handle)
    }

    /// Run the loop on its own thread
    pub fn spawn(self) -> thread::JoinHandle<()> {
        thread::spawn(move || self.run())
    }

    /// Run until `HostCommand::Shutdown` or every handle is dropped
    pub fn run(mut self) {
        let inbox = self.inbox.clone();
        let completions = self.completions.clone();
        let _worker = self.executor.start_processing();

        self.controller.mount(Instant::now());
        tracing::info!(target: LOG_TARGET, "Wizard loop started");

        loop {
            self.flush_outbox();

            let wake = match self.controller.next_deadline() {
                Some(deadline) => at(deadline),
                None => never(),
            };

            select! {
                recv(inbox) -> msg => match msg {
                    Ok(HostCommand::Shutdown) | Err(_) => break,
                    Ok(command) => self.apply(command),
                },
                recv(completions) -> msg => {
                    if let Ok(completion) = msg {
                        self.controller.handle_completion(completion, Instant::now());
                    }
                },
                recv(wake) -> _ => {},
            }

            self.controller.fire_due_timers(Instant::now());
        }

        self.controller.bus().publish(WizardEvent::Shutdown);
        tracing::info!(target: LOG_TARGET, "Wizard loop stopped");
    }

    fn apply(&mut self, command: HostCommand) {
        tracing::debug!(target: LOG_TARGET, "Host command: {:?}", command);

        match command {
            HostCommand::Input(event) => self.controller.handle_input(event),
            HostCommand::Next => self.controller.next(),
            HostCommand::Prev => self.controller.prev(),
            HostCommand::GoTo(step) => self.controller.go_to(step),
            HostCommand::Reset => self.controller.reset(),
            HostCommand::EditName(name) => self.controller.edit_name(name, Instant::now()),
            HostCommand::ToggleAgreement => self.controller.toggle_agreement(),
            HostCommand::SetMobileFlow(mobile) => self.controller.set_mobile_flow(mobile),
            HostCommand::SetEndpointPrefix(prefix) => {
                self.controller.settings().set_endpoint_prefix(prefix)
            }
            HostCommand::ResetEndpointPrefix => self.controller.reset_endpoint_prefix(),
            HostCommand::Shutdown => {}
        }
    }

    fn flush_outbox(&mut self) {
        for dispatch in self.controller.drain_outbox() {
            self.executor.execute(dispatch);
        }
    }
}
