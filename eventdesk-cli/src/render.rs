//! TUI rendering traits for eventdesk types.
//!
//! Extension traits that add colored terminal rendering to eventdesk-core
//! types using owo_colors.

use eventdesk_core::detail::Detail;
use eventdesk_core::event::NO_IMAGE;
use eventdesk_core::{Category, Event};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    /// Listing card: id, title, description and image.
    fn render(&self) -> String {
        let mut lines = vec![format!("{} {}", id_tag(self).dimmed(), self.title.bold())];
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("   {description}"));
        }
        lines.push(format!("   {}", image_label(self.image_url()).dimmed()));
        lines.join("\n")
    }
}

impl Render for Detail {
    fn render(&self) -> String {
        let event = &self.event;
        let mut lines = vec![format!("{} {}", id_tag(event).dimmed(), event.title.bold())];

        if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(description.to_string());
        }
        lines.push(format!("{} {}", "Image:".dimmed(), image_label(event.image_url())));
        lines.push(format!("{} {}", "Start Time:".dimmed(), time_label(&event.start_time)));
        lines.push(format!("{} {}", "End Time:".dimmed(), time_label(&event.end_time)));
        lines.push(format!("{} {}", "Categories:".dimmed(), self.category_names()));

        lines.push(String::new());
        lines.push("Created by:".bold().to_string());
        lines.push(format!("  {}", self.creator_label()));
        let creator_image = self.creator.as_ref().and_then(|c| c.image_url());
        lines.push(format!("  {}", image_label(creator_image).dimmed()));

        lines.join("\n")
    }
}

impl Render for Category {
    fn render(&self) -> String {
        format!("{}  {}", format!("{:>4}", self.id).dimmed(), self.name)
    }
}

fn id_tag(event: &Event) -> String {
    match &event.id {
        Some(id) => format!("#{id}"),
        None => "#new".to_string(),
    }
}

fn image_label(url: Option<&str>) -> &str {
    url.unwrap_or(NO_IMAGE)
}

fn time_label(time: &Option<String>) -> &str {
    time.as_deref().filter(|t| !t.is_empty()).unwrap_or("-")
}
