//! Event Store documents.
//!
//! These mirror the JSON the backend serves. Times stay as the ISO-8601 text
//! the backend stores (`2024-03-20T15:00`); nothing here reinterprets them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::EventDeskError;
use crate::id::Id;

/// Label shown when an event has no creator to show.
pub const UNKNOWN_CREATOR: &str = "Unknown creator";

/// Label shown in place of a missing image.
pub const NO_IMAGE: &str = "(no image)";

/// An event as stored by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Server-assigned. `None` only for events that have not been created yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Set semantics, kept in insertion order.
    #[serde(default)]
    pub category_ids: Vec<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Id>,

    /// Fields this client does not model (e.g. `location`).
    /// Preserved so that a PUT writes back the full event.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Editable text fields of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    Image,
    StartTime,
    EndTime,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::Title,
        DraftField::Description,
        DraftField::Image,
        DraftField::StartTime,
        DraftField::EndTime,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Image => "image",
            DraftField::StartTime => "startTime",
            DraftField::EndTime => "endTime",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DraftField {
    type Err = EventDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| EventDeskError::Validation(format!("Unknown event field: {s}")))
    }
}

impl Event {
    /// An empty event, as presented by the add-event form.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Return a copy with one field replaced.
    pub fn with_field(mut self, field: DraftField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            DraftField::Title => self.title = value,
            DraftField::Description => self.description = Some(value),
            DraftField::Image => self.image = Some(value),
            DraftField::StartTime => self.start_time = Some(value),
            DraftField::EndTime => self.end_time = Some(value),
        }
        self
    }

    /// Read a text field; missing optional fields read as "".
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Description => self.description.as_deref().unwrap_or(""),
            DraftField::Image => self.image.as_deref().unwrap_or(""),
            DraftField::StartTime => self.start_time.as_deref().unwrap_or(""),
            DraftField::EndTime => self.end_time.as_deref().unwrap_or(""),
        }
    }

    /// Return a copy with `category` added to or removed from `category_ids`.
    pub fn with_category(mut self, category: &Id, member: bool) -> Self {
        let present = self.has_category(category);
        if member && !present {
            self.category_ids.push(category.clone());
        } else if !member && present {
            self.category_ids.retain(|id| id != category);
        }
        self
    }

    pub fn has_category(&self, category: &Id) -> bool {
        self.category_ids.contains(category)
    }

    /// Title check shared by save and create.
    pub fn validate(&self) -> Result<(), EventDeskError> {
        if self.title.trim().is_empty() {
            return Err(EventDeskError::Validation("Title is required".into()));
        }
        Ok(())
    }

    /// Image URL, treating an empty string as absent.
    pub fn image_url(&self) -> Option<&str> {
        non_empty(self.image.as_deref())
    }
}

/// The user an event was created by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Creator {
    pub fn display_name(&self) -> &str {
        non_empty(Some(&self.name)).unwrap_or(UNKNOWN_CREATOR)
    }

    pub fn image_url(&self) -> Option<&str> {
        non_empty(self.image.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
