//! Person Registry - Main entry point
//!
//! Interactive shell over the person registry. Commands are read from stdin
//! one per line; registry events are printed to stdout as they arrive and
//! diagnostics go to stderr.

use anyhow::Result;
use futures::future::join_all;
use person_registry::error::ServiceError;
use person_registry::events::RegistryEvent;
use person_registry::services::{FileTask, RegistryService, RegistryServiceImpl};
use person_registry::shell::{parse_command, Command, USAGE};
use person_registry::{Config, EventSink};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Path typed by the user, falling back to the configured registry file.
fn resolve_path(typed: Option<String>, default: Option<&Path>) -> String {
    typed
        .or_else(|| default.map(|path| path.display().to_string()))
        .unwrap_or_default()
}

/// Cancel every file task still running and wait for each to stop.
async fn cancel_running(tasks: &mut Vec<FileTask>) -> usize {
    let mut cancelled = 0;
    for task in tasks.drain(..) {
        if !task.is_finished() {
            task.cancel();
            cancelled += 1;
        }
        let kind = task.kind();
        let outcome = task.join().await;
        info!(%kind, ?outcome, "File task stopped");
    }
    cancelled
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL can seed the filter
    let config = Config::from_env();
    let log_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let (events, mut rx) = EventSink::channel();
    let service = RegistryServiceImpl::with_separators(config.separators()?, events);

    // Print events in arrival order
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                RegistryEvent::Output(_) => print!("{}", event),
                _ => println!("{}", event),
            }
        }
    });

    info!(header = %config.header, "Person registry ready");
    println!("{}", USAGE);

    let default_path = config.registry_file.as_deref();
    let mut tasks: Vec<FileTask> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        tasks.retain(|task| !task.is_finished());

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}\n{}", e, USAGE);
                continue;
            }
        };

        match command {
            Command::Load(path) => {
                if let Some(task) = service.process_file(&resolve_path(path, default_path)) {
                    tasks.push(task);
                }
            }
            Command::Save(path) => {
                if let Some(task) = service.save_file(&resolve_path(path, default_path)) {
                    tasks.push(task);
                }
            }
            Command::Cancel => {
                if cancel_running(&mut tasks).await == 0 {
                    println!("No load or save is running");
                }
            }
            Command::Add { name, phone, email } => {
                service.upsert_person(&name, &phone, &email);
            }
            Command::Delete(name) => {
                service.delete_person(&name);
            }
            Command::Show(name) => {
                if name.trim().is_empty() {
                    println!("{}", ServiceError::MissingName("show anyone from registry"));
                } else {
                    match service.person(&name) {
                        Some(person) => print!("{}", person),
                        None => {
                            let name = name.trim().to_string();
                            println!("{}", ServiceError::UnknownPerson(name));
                        }
                    }
                }
            }
            Command::List => {
                let people = service.people();
                if people.is_empty() {
                    println!("Registry is empty");
                }
                for person in people {
                    print!("{}", person);
                }
            }
            Command::Dump => match serde_json::to_string_pretty(&service.people()) {
                Ok(json) => println!("{}", json),
                Err(e) => error!("Failed to serialize registry: {}", e),
            },
            Command::Help => println!("{}", USAGE),
            Command::Quit => break,
        }
    }

    // Let pending saves finish before exiting
    let outcomes = join_all(tasks.into_iter().map(FileTask::join)).await;
    for outcome in outcomes {
        info!(?outcome, "File task finished");
    }

    drop(service);
    printer.await?;

    info!("Person registry shutdown complete");
    Ok(())
}
