//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::consts::cli_consts::NATIVE_SYMBOL;
use crate::events::{Event, EventType};
use crate::listing::{ListingView, Listings};
use crate::loader::spawn_load;
use crate::print_cmd_error;
use std::error::Error;
use std::fmt::Write;
use tokio::sync::mpsc;

/// Output format for a headless load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn write_section(out: &mut String, title: &str, listings: &[ListingView]) {
    let _ = writeln!(out, "{}", title);
    for listing in listings {
        let _ = writeln!(out, "  #{} {}", listing.token_id(), listing.name());
        let _ = writeln!(out, "    {}", listing.description());
        let _ = writeln!(out, "    Price - {} {}", listing.price(), NATIVE_SYMBOL);
        let _ = writeln!(out, "    {}", listing.image());
    }
}

/// Plain-text rendering of a completed load.
pub fn render_text(listings: &Listings) -> String {
    if listings.is_empty() {
        return "No assets owned\n".to_string();
    }
    let mut out = String::new();
    write_section(&mut out, "Items Created", listings.all());
    if !listings.sold().is_empty() {
        out.push('\n');
        write_section(&mut out, "Items Sold", listings.sold());
    }
    out
}

/// Progress lines echoed to stderr. The load's own failure event is left out
/// because the failure is reported once on exit.
fn should_echo(event: &Event) -> bool {
    event.should_display() && event.event_type != EventType::Error
}

/// Runs a single load without a terminal UI and prints the result.
///
/// Progress events go to stderr, the listings to stdout. A failed load is
/// reported once and the process exits with status 1.
pub async fn run_headless_mode(
    mut session: SessionData,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.info.rpc_url);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();
    let (outcome_sender, mut outcome_receiver) = mpsc::channel(1);
    let handle = spawn_load(
        session.loader.clone(),
        1,
        outcome_sender,
        session.shutdown_sender.subscribe(),
    );

    let outcome = loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if should_echo(&event) {
                    eprintln!("{}", event);
                }
            }
            outcome = outcome_receiver.recv() => break outcome,
            _ = shutdown_receiver.recv() => break None,
        }
    };

    // Events emitted right before the outcome may still be queued
    while let Ok(event) = session.event_receiver.try_recv() {
        if should_echo(&event) {
            eprintln!("{}", event);
        }
    }
    let _ = handle.await;

    let Some(outcome) = outcome else {
        print_session_shutdown();
        return Ok(());
    };

    match outcome.result {
        Ok(listings) => {
            match format {
                OutputFormat::Text => print!("{}", render_text(&listings)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listings)?),
            }
            print_session_exit_success();
            Ok(())
        }
        Err(e) => {
            print_cmd_error!("Load failed", e.to_string().as_str());
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Source;
    use crate::listing::fixtures::listing;
    use crate::logging::LogLevel;

    #[test]
    fn failure_events_are_not_echoed() {
        let failure = Event::new(
            Source::Loader,
            "Wallet connection failed: declined".to_string(),
            EventType::Error,
            LogLevel::Error,
        );
        let progress = Event::new(
            Source::Wallet,
            "Connecting to wallet provider".to_string(),
            EventType::Waiting,
            LogLevel::Info,
        );
        assert!(!should_echo(&failure));
        assert!(should_echo(&progress));
    }

    #[test]
    fn empty_load_prints_only_notice() {
        assert_eq!(render_text(&Listings::new(Vec::new())), "No assets owned\n");
    }

    #[test]
    fn prints_sold_section_only_when_needed() {
        let unsold = render_text(&Listings::new(vec![listing(2, "500000000000000000", false)]));
        assert!(unsold.starts_with("Items Created\n"));
        assert!(unsold.contains("Price - 0.5 ETH"));
        assert!(!unsold.contains("Items Sold"));

        let mixed = render_text(&Listings::new(vec![
            listing(1, "2000000000000000000", true),
            listing(2, "500000000000000000", false),
        ]));
        let sold_section = mixed.split("Items Sold\n").nth(1).unwrap();
        assert!(sold_section.contains("#1 Token #1"));
        assert!(!sold_section.contains("#2 Token #2"));
    }
}
