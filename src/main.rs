use anyhow::Context;
use std::io::BufRead;
use std::sync::Arc;
use std::thread;
use sysinfo::System;

use pairing_wizard::clipboard::SystemClipboard;
use pairing_wizard::error::AppResult;
use pairing_wizard::messaging::WizardEvent;
use pairing_wizard::{host, Config, HostCommand, HttpApiClient, SettingsStore, WizardRuntime};

const LOG_TARGET_STARTUP: &str = "pairing_wizard::startup";

fn initialize_tracing() {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Get log directory in user config folder
    let log_dir = Config::app_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    // Create file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "pairing-wizard.log");

    // Configure filter (info level by default)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // In debug builds, also log to stderr so the prompt stays readable
    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();
    }

    tracing::info!("Log directory: {}", log_dir.display());
}

fn log_runtime_environment() {
    let version = env!("CARGO_PKG_VERSION");
    let os_name = System::long_os_version()
        .or_else(System::name)
        .unwrap_or_else(|| "Unknown OS".to_string());
    let kernel = System::kernel_version().unwrap_or_else(|| "Unknown Kernel".to_string());
    let architecture = std::env::consts::ARCH;

    tracing::info!(target: LOG_TARGET_STARTUP, "Starting pairing wizard v{} on ({})", version, architecture);
    tracing::info!(target: LOG_TARGET_STARTUP, "Operating System: {} (kernel {})", os_name, kernel);
}

fn print_event(event: &WizardEvent) {
    match event {
        WizardEvent::StepChanged { to, .. } => {
            let title = pairing_wizard::wizard::WizardStep::from_number(*to)
                .map(|s| s.title())
                .unwrap_or("(no such step)");
            println!("→ step {}: {}", to, title);
        }
        other => println!("  {}", other.description()),
    }
}

fn main() -> AppResult<()> {
    initialize_tracing();
    log_runtime_environment();

    let config = Config::load()
        .with_context(|| format!("Failed to load config from {}", Config::config_path_display()))?;

    println!("===========================================");
    println!("  Printer Pairing Wizard");
    println!("===========================================");
    println!("  Plugin endpoint: {}", config.command_url());
    println!("  Config: {}\n", Config::config_path_display());

    let api = Arc::new(HttpApiClient::from_config(&config));
    let settings = SettingsStore::new(config.endpoint_prefix.clone());
    let (runtime, handle) =
        WizardRuntime::new(&config, api, settings, Box::new(SystemClipboard::new()));

    let (events, _subscriber) = handle.subscribe();
    let printer = thread::spawn(move || {
        for event in events.iter() {
            print_event(&event);
            if event == WizardEvent::Shutdown {
                break;
            }
        }
    });

    let wizard = runtime.spawn();

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        match host::parse_line(&line) {
            Ok(commands) => {
                let quit = commands.contains(&HostCommand::Shutdown);
                for command in commands {
                    if !handle.send(command) {
                        break;
                    }
                }
                if quit {
                    break;
                }
            }
            Err(e) => eprintln!("✗ {}", e),
        }
    }

    handle.send(HostCommand::Shutdown);
    drop(handle);

    if wizard.join().is_err() {
        tracing::error!("Wizard loop panicked");
    }
    let _ = printer.join();

    tracing::info!("Pairing wizard stopped");
    Ok(())
}
