use anyhow::Result;
use eventdesk_core::EventDeskError;
use eventdesk_core::listing::{EventFilter, EventListing};
use eventdesk_core::store::EventStore;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::tui;

pub async fn run<S: EventStore>(store: &S, filter: &EventFilter, json: bool) -> Result<()> {
    let spinner = tui::create_spinner("Fetching events");
    let (listing, errors) = EventListing::load(store).await;
    spinner.finish_and_clear();

    let (warnings, fatal) = split_failures(listing.events.is_empty(), errors);
    for e in &warnings {
        eprintln!("{}", e.to_string().red());
    }
    if let Some(e) = fatal {
        return Err(e.into());
    }

    let events = listing.filtered(filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    println!("{}", heading(&listing, filter).bold());
    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in events {
        println!();
        println!("{}", event.render());
    }

    Ok(())
}

/// With no events to show, the first failure ends the command and the rest
/// are printed. Otherwise every failure is printed and the listing goes on.
fn split_failures(
    nothing_to_show: bool,
    errors: Vec<EventDeskError>,
) -> (Vec<EventDeskError>, Option<EventDeskError>) {
    let mut errors = errors.into_iter();
    let fatal = if nothing_to_show { errors.next() } else { None };
    (errors.collect(), fatal)
}

fn heading(listing: &EventListing, filter: &EventFilter) -> String {
    let mut heading = "Events".to_string();
    if !filter.search_term.is_empty() {
        heading.push_str(&format!(" matching \"{}\"", filter.search_term));
    }
    if let Some(category) = &filter.category {
        let name = listing
            .category_name(category)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{category}"));
        heading.push_str(&format!(" in {name}"));
    }
    heading
}
