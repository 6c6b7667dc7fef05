//! Interactive event field prompts shared by `add` and `edit`.

use anyhow::Result;
use dialoguer::{Confirm, Input, MultiSelect};
use eventdesk_core::{Category, DraftField, Event, Id};
use owo_colors::OwoColorize;

use crate::utils::datetime;

fn label(field: DraftField) -> &'static str {
    match field {
        DraftField::Title => "  Title",
        DraftField::Description => "  Description",
        DraftField::Image => "  Image URL",
        DraftField::StartTime => "  Start time",
        DraftField::EndTime => "  End time",
    }
}

/// Prompt for every text field, starting from `current`.
pub fn fields(current: &Event) -> Result<Vec<(DraftField, String)>> {
    DraftField::ALL
        .into_iter()
        .map(|field| -> Result<(DraftField, String)> {
            Ok((field, field_value(field, current.field(field))?))
        })
        .collect()
}

/// Prompt for one field. Times are retried until they parse.
pub fn field_value(field: DraftField, initial: &str) -> Result<String> {
    loop {
        let input: String = Input::new()
            .with_prompt(label(field))
            .with_initial_text(initial)
            .allow_empty(field != DraftField::Title)
            .interact_text()?;

        if !matches!(field, DraftField::StartTime | DraftField::EndTime) {
            return Ok(input);
        }
        match datetime::normalize(&input) {
            Ok(value) => return Ok(value),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Category checklist. Returns the desired membership of every option.
pub fn categories(options: &[Category], current: &Event) -> Result<Vec<(Id, bool)>> {
    if options.is_empty() {
        return Ok(Vec::new());
    }

    let names: Vec<&str> = options.iter().map(|c| c.name.as_str()).collect();
    let checked: Vec<bool> = options.iter().map(|c| current.has_category(&c.id)).collect();

    let selected = MultiSelect::new()
        .with_prompt("  Categories")
        .items(&names)
        .defaults(&checked)
        .interact()?;

    Ok(options
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.clone(), selected.contains(&i)))
        .collect())
}

pub fn retry(message: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(format!("  {message} Try again?"))
        .default(true)
        .interact()?)
}
