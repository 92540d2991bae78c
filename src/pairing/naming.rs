/// Printer naming
///
/// Edits to the printer name are debounced and saved with `update_printer`.
/// The save indicator reverts to idle on its own after a fixed display time.
use std::time::{Duration, Instant};

use crate::error::ApiError;
use crate::messaging::commands::{ApiCommand, RequestId, UpdatePrinterReply};
use crate::timer::{TimerHandle, TimerKind, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameSaveState {
    #[default]
    Idle,
    Saving,
    Saved,
    Error,
}

#[derive(Debug)]
pub struct DeviceNamingController {
    name: String,
    save_state: NameSaveState,
    debounce: Duration,
    status_display: Duration,
    pending_save: Option<TimerHandle>,
    status_timer: Option<TimerHandle>,
    in_flight: Option<RequestId>,
}

impl DeviceNamingController {
    pub fn new(debounce: Duration, status_display: Duration) -> Self {
        Self {
            name: String::new(),
            save_state: NameSaveState::Idle,
            debounce,
            status_display,
            pending_save: None,
            status_timer: None,
            in_flight: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn save_state(&self) -> NameSaveState {
        self.save_state
    }

    /// The error message stays up until the indicator reverts
    pub fn error_visible(&self) -> bool {
        self.save_state == NameSaveState::Error
    }

    pub fn has_pending_save(&self) -> bool {
        self.pending_save.is_some()
    }

    /// User edit: restart the debounce timer
    pub fn on_name_edited(&mut self, name: impl Into<String>, now: Instant, timers: &mut TimerQueue) {
        self.name = name.into();
        self.cancel_pending_save(timers);
        self.pending_save = Some(timers.schedule(now, self.debounce, TimerKind::SaveName));
    }

    /// Name handed back by a successful pairing. Replaces whatever is typed
    /// and goes through the same debounced save as an edit.
    pub fn set_name_from_pairing(
        &mut self,
        name: impl Into<String>,
        now: Instant,
        timers: &mut TimerQueue,
    ) {
        self.on_name_edited(name, now, timers);
    }

    /// Debounce elapsed. Returns the save command to dispatch as `id`, or
    /// None if the trimmed name is empty.
    pub fn on_debounce_fired(&mut self, id: RequestId, timers: &mut TimerQueue) -> Option<ApiCommand> {
        self.pending_save = None;

        let name = self.name.trim();
        if name.is_empty() {
            tracing::debug!(target: "pairing_wizard::naming", "Blank printer name, not saving");
            return None;
        }

        if let Some(handle) = self.status_timer.take() {
            timers.cancel(handle);
        }
        self.save_state = NameSaveState::Saving;
        self.in_flight = Some(id);

        Some(ApiCommand::UpdatePrinter {
            name: name.to_string(),
        })
    }

    /// Apply the reply to save `id`. Returns the new save state, or None for
    /// a reply superseded by a later save.
    pub fn apply_reply(
        &mut self,
        id: RequestId,
        result: Result<UpdatePrinterReply, ApiError>,
        now: Instant,
        timers: &mut TimerQueue,
    ) -> Option<NameSaveState> {
        if self.in_flight != Some(id) {
            tracing::warn!(target: "pairing_wizard::naming", "Dropping superseded name save reply {:?}", id);
            return None;
        }
        self.in_flight = None;

        self.save_state = match result {
            Ok(UpdatePrinterReply { succeeded: true }) => {
                tracing::info!(target: "pairing_wizard::naming", "Printer name saved");
                NameSaveState::Saved
            }
            Ok(UpdatePrinterReply { succeeded: false }) => {
                tracing::warn!(target: "pairing_wizard::naming", "Server refused printer name");
                NameSaveState::Error
            }
            Err(e) => {
                tracing::error!(target: "pairing_wizard::naming", "Saving printer name failed: {}", e);
                NameSaveState::Error
            }
        };
        self.status_timer = Some(timers.schedule(now, self.status_display, TimerKind::ClearNameStatus));

        Some(self.save_state)
    }

    /// Display time elapsed for `handle`. Returns false, changing nothing,
    /// if a newer save replaced that timer.
    pub fn on_status_expired(&mut self, handle: &TimerHandle) -> bool {
        if self.status_timer.as_ref() != Some(handle) {
            return false;
        }
        self.status_timer = None;
        self.save_state = NameSaveState::Idle;
        true
    }

    fn cancel_pending_save(&mut self, timers: &mut TimerQueue) {
        if let Some(handle) = self.pending_save.take() {
            timers.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(1000);
    const DISPLAY: Duration = Duration::from_millis(2000);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn fire_saves(
        controller: &mut DeviceNamingController,
        timers: &mut TimerQueue,
        now: Instant,
        next_id: &mut u64,
    ) -> Vec<ApiCommand> {
        let mut sent = Vec::new();
        for (_, kind) in timers.take_due(now) {
            if kind == TimerKind::SaveName {
                *next_id += 1;
                sent.extend(controller.on_debounce_fired(RequestId(*next_id), timers));
            }
        }
        sent
    }

    #[test]
    fn test_rapid_edits_collapse_into_one_save() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let mut controller = DeviceNamingController::new(DEBOUNCE, DISPLAY);
        let mut next_id = 0;

        controller.on_name_edited("P", start, &mut timers);
        controller.on_name_edited("Pr", start + ms(300), &mut timers);
        controller.on_name_edited("Prusa ", start + ms(900), &mut timers);
        assert_eq!(timers.len(), 1);

        assert!(fire_saves(&mut controller, &mut timers, start + ms(1899), &mut next_id).is_empty());
        let sent = fire_saves(&mut controller, &mut timers, start + ms(1900), &mut next_id);
        assert_eq!(
            sent,
            vec![ApiCommand::UpdatePrinter {
                name: "Prusa".to_string()
            }]
        );
        assert_eq!(controller.save_state(), NameSaveState::Saving);
    }

    #[test]
    fn test_blank_name_not_saved() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let mut controller = DeviceNamingController::new(DEBOUNCE, DISPLAY);
        let mut next_id = 0;

        controller.on_name_edited("   ", start, &mut timers);
        let sent = fire_saves(&mut controller, &mut timers, start + DEBOUNCE, &mut next_id);

        assert!(sent.is_empty());
        assert_eq!(controller.save_state(), NameSaveState::Idle);
    }

    #[test]
    fn test_saved_then_reverts() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let mut controller = DeviceNamingController::new(DEBOUNCE, DISPLAY);

        controller.on_name_edited("Prusa", start, &mut timers);
        timers.take_due(start + DEBOUNCE);
        controller.on_debounce_fired(RequestId(1), &mut timers);

        let reply_at = start + ms(1200);
        let state = controller.apply_reply(
            RequestId(1),
            Ok(UpdatePrinterReply { succeeded: true }),
            reply_at,
            &mut timers,
        );
        assert_eq!(state, Some(NameSaveState::Saved));

        let due = timers.take_due(reply_at + DISPLAY);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].1, TimerKind::ClearNameStatus);
        assert!(controller.on_status_expired(&due[0].0));
        assert_eq!(controller.save_state(), NameSaveState::Idle);
    }

    #[test]
    fn test_refused_and_failed_show_error() {
        let results: Vec<Result<UpdatePrinterReply, ApiError>> = vec![
            Ok(UpdatePrinterReply { succeeded: false }),
            Err(ApiError::HttpStatus { status: 503 }),
        ];
        for result in results {
            let start = Instant::now();
            let mut timers = TimerQueue::new();
            let mut controller = DeviceNamingController::new(DEBOUNCE, DISPLAY);

            controller.on_name_edited("Prusa", start, &mut timers);
            timers.take_due(start + DEBOUNCE);
            controller.on_debounce_fired(RequestId(1), &mut timers);
            controller.apply_reply(RequestId(1), result, start + DEBOUNCE, &mut timers);

            assert_eq!(controller.save_state(), NameSaveState::Error);
            assert!(controller.error_visible());

            let due = timers.take_due(start + DEBOUNCE + DISPLAY);
            assert!(controller.on_status_expired(&due[0].0));
            assert!(!controller.error_visible());
        }
    }

    #[test]
    fn test_superseded_reply_dropped() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let mut controller = DeviceNamingController::new(DEBOUNCE, DISPLAY);

        controller.on_name_edited("A", start, &mut timers);
        controller.on_debounce_fired(RequestId(1), &mut timers);
        controller.on_name_edited("AB", start, &mut timers);
        controller.on_debounce_fired(RequestId(2), &mut timers);

        let stale = controller.apply_reply(
            RequestId(1),
            Ok(UpdatePrinterReply { succeeded: false }),
            start,
            &mut timers,
        );
        assert_eq!(stale, None);
        assert_eq!(controller.save_state(), NameSaveState::Saving);
    }

    #[test]
    fn test_new_save_cancels_old_revert() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let mut controller = DeviceNamingController::new(DEBOUNCE, DISPLAY);

        controller.on_name_edited("A", start, &mut timers);
        timers.take_due(start + DEBOUNCE);
        controller.on_debounce_fired(RequestId(1), &mut timers);
        controller.apply_reply(
            RequestId(1),
            Ok(UpdatePrinterReply { succeeded: true }),
            start + DEBOUNCE,
            &mut timers,
        );
        assert_eq!(timers.len(), 1);

        controller.on_name_edited("AB", start + DEBOUNCE, &mut timers);
        timers.take_due(start + DEBOUNCE * 2);
        controller.on_debounce_fired(RequestId(2), &mut timers);

        // The first save's revert timer is gone
        assert!(timers.is_empty());
        assert_eq!(controller.save_state(), NameSaveState::Saving);
    }

    #[test]
    fn test_stale_revert_in_same_batch_keeps_saving() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let mut controller = DeviceNamingController::new(DEBOUNCE, DISPLAY);
        let mut next_id = 0;

        // "A" saved at 1000ms, its revert falls due at 3000ms
        controller.on_name_edited("A", start, &mut timers);
        fire_saves(&mut controller, &mut timers, start + DEBOUNCE, &mut next_id);
        controller.apply_reply(
            RequestId(next_id),
            Ok(UpdatePrinterReply { succeeded: true }),
            start + DEBOUNCE,
            &mut timers,
        );

        // The next save falls due at 2500ms, ahead of it in the same batch
        controller.on_name_edited("AB", start + ms(1500), &mut timers);

        let mut sent = Vec::new();
        for (handle, kind) in timers.take_due(start + ms(3000)) {
            match kind {
                TimerKind::SaveName => {
                    next_id += 1;
                    sent.extend(controller.on_debounce_fired(RequestId(next_id), &mut timers));
                }
                TimerKind::ClearNameStatus => {
                    assert!(!controller.on_status_expired(&handle));
                }
                TimerKind::NextFeature => {}
            }
        }

        assert_eq!(sent.len(), 1);
        assert_eq!(controller.save_state(), NameSaveState::Saving);
    }

    #[test]
    fn test_pairing_name_is_saved_after_debounce() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let mut controller = DeviceNamingController::new(DEBOUNCE, DISPLAY);
        let mut next_id = 0;

        controller.on_name_edited("typed", start, &mut timers);
        controller.set_name_from_pairing("MyPrinter", start + ms(500), &mut timers);

        assert_eq!(controller.name(), "MyPrinter");
        assert!(controller.has_pending_save());
        assert_eq!(timers.len(), 1);

        assert!(fire_saves(&mut controller, &mut timers, start + ms(1499), &mut next_id).is_empty());
        assert_eq!(
            fire_saves(&mut controller, &mut timers, start + ms(1500), &mut next_id),
            vec![ApiCommand::UpdatePrinter {
                name: "MyPrinter".to_string()
            }]
        );
    }
}
