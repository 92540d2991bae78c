/// Messaging module for Event/Command architecture
///
/// This module implements the Event/Command segregation pattern:
/// - **Events**: Notifications of things that happened (past tense, broadcast)
/// - **Commands**: Plugin API requests (imperative, targeted)
///
/// ## Architecture
///
/// ```text
/// ┌────────────┐   Dispatch    ┌──────────┐   Completion   ┌────────────┐
/// │   Wizard   │ ────────────> │ Executor │ ─────────────> │ Event loop │
/// │ controller │               │ (thread) │                │            │
/// └────────────┘               └──────────┘                └────────────┘
///       │
///       │ WizardEvent
///       ▼
/// ┌───────────┐
/// │ Event Bus │ ──> views
/// └───────────┘
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// let bus = EventBus::new();
/// let (rx, _id) = bus.subscribe();
///
/// let (completion_tx, completion_rx) = crossbeam_channel::unbounded();
/// let executor = CommandExecutor::new(api, completion_tx);
/// executor.start_processing();
///
/// executor.execute(Dispatch { id, command: ApiCommand::UpdatePrinter { name } });
///
/// while let Ok(event) = rx.recv() {
///     match event {
///         WizardEvent::StepChanged { to, .. } => { /* render step */ },
///         _ => {}
///     }
/// }
/// ```

pub mod bus;
pub mod commands;
pub mod events;
pub mod executor;

// Re-export commonly used types
pub use bus::{EventBus, SubscriberId};
pub use commands::{
    ApiCommand, ApiReply, Completion, Dispatch, PrinterInfo, RequestId, UpdatePrinterReply,
    VerifyCodeReply,
};
pub use events::WizardEvent;
pub use executor::CommandExecutor;
