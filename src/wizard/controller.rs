use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::clipboard::ClipboardSource;
use crate::config::Config;
use crate::error::ApiError;
use crate::input::{CodeInput, InputEvent, InputRouter};
use crate::messaging::{
    ApiCommand, ApiReply, Completion, Dispatch, EventBus, RequestId, UpdatePrinterReply,
    VerifyCodeReply, WizardEvent,
};
use crate::pairing::{
    CodeBuffer, CodeChange, DeviceNamingController, NameSaveState, VerificationController,
    VerificationOutcome, VerificationStatus, CODE_LENGTH,
};
use crate::settings::SettingsStore;
use crate::timer::{TimerHandle, TimerKind, TimerQueue};

use super::flow::{StepChange, WizardFlow};
use super::state::WizardState;

const LOG_TARGET: &str = "pairing_wizard::controller";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Verification,
    NameSave,
}

/// Composition root of the wizard.
///
/// Owns the step flow and the pairing controllers and mediates between
/// them. It never touches the network or the clock: callers pass `now`,
/// collect outgoing commands with [`drain_outbox`](Self::drain_outbox) and
/// feed results back through [`handle_completion`](Self::handle_completion).
/// Every state change is published on the event bus.
pub struct WizardController {
    flow: WizardFlow,
    router: InputRouter,
    code: CodeBuffer,
    verification: VerificationController,
    naming: DeviceNamingController,
    timers: TimerQueue,
    settings: SettingsStore,
    clipboard: Box<dyn ClipboardSource>,
    bus: EventBus,
    outbox: Vec<Dispatch>,
    requests: HashMap<RequestId, RequestKind>,
    next_request: u64,
    slider: Option<TimerHandle>,
    slide_count: u32,
    slide_interval: Duration,
}

impl WizardController {
    pub fn new(
        config: &Config,
        settings: SettingsStore,
        clipboard: Box<dyn ClipboardSource>,
        bus: EventBus,
    ) -> Self {
        Self {
            flow: WizardFlow::new(),
            router: InputRouter::new(),
            code: CodeBuffer::new(),
            verification: VerificationController::new(),
            naming: DeviceNamingController::new(
                config.name_debounce(),
                config.save_status_display(),
            ),
            timers: TimerQueue::new(),
            settings,
            clipboard,
            bus,
            outbox: Vec::new(),
            requests: HashMap::new(),
            next_request: 0,
            slider: None,
            slide_count: config.feature_slide_count,
            slide_interval: config.feature_slide_interval(),
        }
    }

    /// Start the feature slider. Called once the views are bound.
    pub fn mount(&mut self, now: Instant) {
        if let Some(handle) = self.slider.take() {
            self.timers.cancel(handle);
        }
        self.slider = Some(
            self.timers
                .schedule(now, self.slide_interval, TimerKind::NextFeature),
        );
        tracing::info!(target: LOG_TARGET, "Wizard mounted on step {}", self.flow.current_step());
    }

    // ---- read side -------------------------------------------------------

    pub fn state(&self) -> &WizardState {
        self.flow.state()
    }

    pub fn current_step(&self) -> i32 {
        self.flow.current_step()
    }

    pub fn code(&self) -> &CodeBuffer {
        &self.code
    }

    pub fn is_verifying(&self) -> bool {
        self.verification.is_verifying()
    }

    pub fn verification_status(&self) -> VerificationStatus {
        self.verification.status()
    }

    pub fn last_outcome(&self) -> Option<&VerificationOutcome> {
        self.verification.last_outcome()
    }

    pub fn printer_name(&self) -> &str {
        self.naming.name()
    }

    pub fn name_save_state(&self) -> NameSaveState {
        self.naming.save_state()
    }

    pub fn name_error_visible(&self) -> bool {
        self.naming.error_visible()
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// When the event loop next has timer work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Commands queued since the last drain
    pub fn drain_outbox(&mut self) -> Vec<Dispatch> {
        std::mem::take(&mut self.outbox)
    }

    // ---- navigation ------------------------------------------------------

    pub fn next(&mut self) {
        let change = self.flow.next();
        self.publish_step(change);
    }

    pub fn prev(&mut self) {
        let change = self.flow.prev();
        self.publish_step(change);
    }

    pub fn go_to(&mut self, step: i32) {
        let change = self.flow.go_to(step);
        self.publish_step(change);
    }

    /// Back to step 1 with an empty code and no verification in flight
    pub fn reset(&mut self) {
        let was_verifying = self.verification.is_verifying();
        let old_status = self.verification.status();

        let change = self.flow.reset();
        self.verification.reset();
        self.code.reset();
        tracing::info!(target: LOG_TARGET, "Wizard reset");

        self.publish_step(change);
        self.publish_code();
        if was_verifying {
            self.bus
                .publish(WizardEvent::VerifyingChanged { verifying: false });
        }
        if old_status != VerificationStatus::None {
            self.publish_status();
        }
    }

    pub fn toggle_agreement(&mut self) {
        let checked = self.flow.toggle_agreement();
        self.bus.publish(WizardEvent::AgreementChanged { checked });
    }

    pub fn set_mobile_flow(&mut self, mobile: bool) {
        self.flow.set_mobile_flow(mobile);
        self.bus.publish(WizardEvent::MobileFlowChanged { mobile });
    }

    pub fn reset_endpoint_prefix(&mut self) {
        self.settings.reset_endpoint_prefix();
    }

    // ---- input -----------------------------------------------------------

    pub fn handle_input(&mut self, event: InputEvent) {
        let accepts = self.flow.accepts_code_input();
        let Some(input) = self.router.route(event, accepts) else {
            return;
        };

        match input {
            CodeInput::Digit(d) => {
                let change = self.code.push_digit(d);
                self.after_keystroke(change);
            }
            CodeInput::Backspace => {
                let change = self.code.backspace();
                self.after_keystroke(change);
            }
            CodeInput::Paste(text) => self.paste(&text),
            CodeInput::PasteShortcut => match self.clipboard.read_text() {
                Some(text) => self.paste(&text),
                None => tracing::debug!(target: LOG_TARGET, "Paste shortcut with empty clipboard"),
            },
        }
    }

    fn after_keystroke(&mut self, change: CodeChange) {
        self.publish_code();
        if self.code.len() < CODE_LENGTH {
            self.clear_status();
        }
        if change.completed {
            self.start_verification();
        }
    }

    fn paste(&mut self, text: &str) {
        let Some(change) = self.code.apply_paste(text) else {
            tracing::debug!(target: LOG_TARGET, "Pasted text holds no 6-digit code");
            return;
        };

        self.clear_status();
        self.publish_code();
        if change.completed {
            self.start_verification();
        }
    }

    fn start_verification(&mut self) {
        let id = self.allocate_request();
        if !self.verification.begin(id) {
            return;
        }

        self.queue(
            id,
            RequestKind::Verification,
            ApiCommand::VerifyCode {
                code: self.code.code(),
                endpoint_prefix: self.settings.endpoint_prefix(),
            },
        );
        self.bus
            .publish(WizardEvent::VerifyingChanged { verifying: true });
    }

    // ---- printer name ----------------------------------------------------

    /// The user typed in the printer name field
    pub fn edit_name(&mut self, name: impl Into<String>, now: Instant) {
        self.naming.on_name_edited(name, now, &mut self.timers);
        self.bus.publish(WizardEvent::PrinterNameChanged {
            name: self.naming.name().to_string(),
        });
    }

    // ---- async results ---------------------------------------------------

    pub fn handle_completion(&mut self, completion: Completion, now: Instant) {
        let Completion { id, result } = completion;

        match self.requests.remove(&id) {
            Some(RequestKind::Verification) => {
                let result = result.and_then(|reply| match reply {
                    ApiReply::VerifyCode(reply) => Ok(reply),
                    ApiReply::UpdatePrinter(_) => Err(ApiError::UnexpectedReply),
                });
                self.finish_verification(id, result, now);
            }
            Some(RequestKind::NameSave) => {
                let result = result.and_then(|reply| match reply {
                    ApiReply::UpdatePrinter(reply) => Ok(reply),
                    ApiReply::VerifyCode(_) => Err(ApiError::UnexpectedReply),
                });
                self.finish_name_save(id, result, now);
            }
            None => {
                tracing::warn!(target: LOG_TARGET, "Completion for unknown request {:?}", id);
            }
        }
    }

    fn finish_verification(
        &mut self,
        id: RequestId,
        result: Result<VerifyCodeReply, ApiError>,
        now: Instant,
    ) {
        let Some(outcome) = self.verification.apply_reply(id, result, self.code.len()) else {
            return;
        };

        self.bus
            .publish(WizardEvent::VerifyingChanged { verifying: false });
        self.publish_status();
        self.bus.publish(WizardEvent::VerificationFinished {
            outcome: outcome.clone(),
        });

        if let VerificationOutcome::Success { printer_name } = outcome {
            self.naming
                .set_name_from_pairing(printer_name, now, &mut self.timers);
            self.bus.publish(WizardEvent::PrinterNameChanged {
                name: self.naming.name().to_string(),
            });
            self.next();
        }
    }

    fn finish_name_save(
        &mut self,
        id: RequestId,
        result: Result<UpdatePrinterReply, ApiError>,
        now: Instant,
    ) {
        if let Some(state) = self
            .naming
            .apply_reply(id, result, now, &mut self.timers)
        {
            self.bus.publish(WizardEvent::NameSaveStateChanged { state });
        }
    }

    /// Run every timer due at `now`
    pub fn fire_due_timers(&mut self, now: Instant) {
        for (handle, kind) in self.timers.take_due(now) {
            match kind {
                TimerKind::SaveName => {
                    let id = self.allocate_request();
                    if let Some(command) = self.naming.on_debounce_fired(id, &mut self.timers) {
                        self.queue(id, RequestKind::NameSave, command);
                        self.bus.publish(WizardEvent::NameSaveStateChanged {
                            state: self.naming.save_state(),
                        });
                    }
                }
                TimerKind::ClearNameStatus => {
                    if self.naming.on_status_expired(&handle) {
                        self.bus.publish(WizardEvent::NameSaveStateChanged {
                            state: self.naming.save_state(),
                        });
                    }
                }
                TimerKind::NextFeature => {
                    if self.slider.as_ref() == Some(&handle) {
                        let slide = self.flow.next_feature(self.slide_count);
                        self.bus.publish(WizardEvent::FeatureSlideChanged { slide });
                        self.slider = Some(self.timers.schedule(
                            now,
                            self.slide_interval,
                            TimerKind::NextFeature,
                        ));
                    }
                }
            }
        }
    }

    // ---- helpers ---------------------------------------------------------

    fn allocate_request(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    fn queue(&mut self, id: RequestId, kind: RequestKind, command: ApiCommand) {
        self.requests.insert(id, kind);
        self.outbox.push(Dispatch { id, command });
    }

    fn clear_status(&mut self) {
        if self.verification.status() != VerificationStatus::None {
            self.verification.clear_status();
            self.publish_status();
        }
    }

    fn publish_status(&self) {
        self.bus.publish(WizardEvent::VerificationStatusChanged {
            status: self.verification.status(),
        });
    }

    fn publish_code(&self) {
        self.bus.publish(WizardEvent::CodeChanged {
            code: self.code.code(),
            slots: *self.code.slots(),
        });
    }

    fn publish_step(&self, change: StepChange) {
        self.bus.publish(WizardEvent::StepChanged {
            from: change.from,
            to: change.to,
        });
    }
}
