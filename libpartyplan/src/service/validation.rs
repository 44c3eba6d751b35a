//! Form validation
//!
//! Mirrors the checks the create/edit screens run before calling a data
//! access function. Validation is synchronous and collects every failing
//! field at once; a form that fails never reaches the data source.
//!
//! Field keys use the form's wire names (`maxAttendees`, `recipientName`) so
//! the messages can be shown next to the matching input.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{PartyPlanError, Result};
use crate::types::{EventId, NewEvent, NewReminder, ReminderPatch, ReminderType};

/// Field name to message, ordered by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: FieldErrors,
}

impl From<FieldErrors> for ValidationResponse {
    fn from(errors: FieldErrors) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Raw input of the create-event form
///
/// `price` and `max_attendees` are kept as typed text; parsing them is part of
/// validation.
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub organizer: String,
    pub price: String,
    pub category: String,
    pub max_attendees: String,
    pub is_virtual: bool,
    pub is_private: bool,
}

/// Raw input of the create/edit reminder forms
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderForm {
    pub title: String,
    pub date: DateTime<Utc>,
    pub kind: Option<ReminderType>,
    pub description: String,
    pub recipient_name: String,
    pub relationship: String,
    pub notify_before: Vec<u32>,
    /// Comma-separated
    pub gift_ideas: String,
    pub planned_surprise: bool,
    pub planned_event_id: Option<EventId>,
}

fn parse_max_attendees(raw: &str) -> std::result::Result<u32, &'static str> {
    if raw.is_empty() {
        return Err("Maximum attendees is required");
    }
    let invalid = "Maximum attendees must be a positive number";
    let value: f64 = raw.trim().parse().map_err(|_| invalid)?;
    if !value.is_finite() || value <= 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(invalid);
    }
    Ok(value as u32)
}

fn parse_price(raw: &str) -> std::result::Result<f64, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Price is required");
    }
    let invalid = "Price must be a non-negative number";
    let value: f64 = raw.parse().map_err(|_| invalid)?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid);
    }
    Ok(value)
}

/// Split comma-separated gift ideas, trimming each and dropping blanks
pub fn parse_gift_ideas(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|idea| !idea.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

impl EventForm {
    pub fn validate(&self, now: DateTime<Utc>) -> FieldErrors {
        let mut errors = FieldErrors::default();

        require(&mut errors, "title", &self.title, "Title is required");
        require(&mut errors, "description", &self.description, "Description is required");
        require(&mut errors, "location", &self.location, "Location is required");
        require(&mut errors, "organizer", &self.organizer, "Organizer is required");
        require(&mut errors, "category", &self.category, "Category is required");

        if let Err(message) = parse_max_attendees(&self.max_attendees) {
            errors.insert("maxAttendees", message);
        }
        if let Err(message) = parse_price(&self.price) {
            errors.insert("price", message);
        }
        if self.date < now {
            errors.insert("date", "Event date cannot be in the past");
        }

        errors
    }

    /// Validate and convert into a creation payload with no attendees yet
    pub fn into_new_event(self, now: DateTime<Utc>) -> Result<NewEvent> {
        let errors = self.validate(now);
        if !errors.is_empty() {
            return Err(PartyPlanError::Validation(errors));
        }

        let max_attendees = parse_max_attendees(&self.max_attendees)
            .map_err(|m| PartyPlanError::InvalidInput(m.to_string()))?;
        let price =
            parse_price(&self.price).map_err(|m| PartyPlanError::InvalidInput(m.to_string()))?;

        Ok(NewEvent {
            title: self.title,
            description: self.description,
            date: self.date,
            location: self.location,
            image_url: String::new(),
            organizer: self.organizer,
            price,
            category: self.category,
            attendees: 0,
            max_attendees,
            is_virtual: self.is_virtual,
            is_private: self.is_private.then_some(true),
            reminder_id: None,
            vendors: None,
            packages: None,
            timeline: None,
            guest_list: None,
        })
    }
}

impl ReminderForm {
    pub fn validate(&self, now: DateTime<Utc>) -> FieldErrors {
        let mut errors = FieldErrors::default();

        require(&mut errors, "title", &self.title, "Title is required");

        if self.kind.is_none() {
            errors.insert("type", "Type is required");
        }
        if self.date < now {
            errors.insert("date", "Date cannot be in the past");
        }
        let needs_recipient = self.kind.is_some_and(|k| k.expects_recipient());
        if needs_recipient && self.recipient_name.trim().is_empty() {
            errors.insert("recipientName", "Recipient name is required");
        }

        errors
    }

    fn checked(&self, now: DateTime<Utc>) -> Result<ReminderType> {
        let errors = self.validate(now);
        if !errors.is_empty() {
            return Err(PartyPlanError::Validation(errors));
        }
        self.kind
            .ok_or_else(|| PartyPlanError::InvalidInput("Type is required".to_string()))
    }

    /// Validate and convert into a creation payload
    pub fn into_new_reminder(self, now: DateTime<Utc>) -> Result<NewReminder> {
        let kind = self.checked(now)?;
        let gift_ideas = parse_gift_ideas(&self.gift_ideas);

        Ok(NewReminder {
            title: self.title,
            date: self.date,
            kind,
            description: self.description,
            recipient_name: non_blank(&self.recipient_name),
            relationship: non_blank(&self.relationship),
            notify_before: self.notify_before,
            gift_ideas: (!gift_ideas.is_empty()).then_some(gift_ideas),
            planned_surprise: Some(self.planned_surprise),
            planned_event_id: self.planned_event_id,
        })
    }

    /// Validate and convert into a patch replacing every editable field.
    ///
    /// `planned_event_id` is not part of the edit form and stays untouched.
    pub fn into_patch(self, now: DateTime<Utc>) -> Result<ReminderPatch> {
        let kind = self.checked(now)?;

        Ok(ReminderPatch {
            title: Some(self.title),
            date: Some(self.date),
            kind: Some(kind),
            description: Some(self.description),
            recipient_name: Some(non_blank(&self.recipient_name)),
            relationship: Some(non_blank(&self.relationship)),
            notify_before: Some(self.notify_before),
            gift_ideas: Some(Some(parse_gift_ideas(&self.gift_ideas))),
            planned_surprise: Some(Some(self.planned_surprise)),
            planned_event_id: None,
        })
    }
}

/// Validation entry point handed out by the service facade
#[derive(Debug, Clone, Default)]
pub struct ValidationService;

impl ValidationService {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_event(&self, form: &EventForm, now: DateTime<Utc>) -> ValidationResponse {
        form.validate(now).into()
    }

    pub fn validate_reminder(&self, form: &ReminderForm, now: DateTime<Utc>) -> ValidationResponse {
        form.validate(now).into()
    }

    pub fn check_event(&self, form: EventForm, now: DateTime<Utc>) -> Result<NewEvent> {
        form.into_new_event(now)
    }

    pub fn check_reminder(&self, form: ReminderForm, now: DateTime<Utc>) -> Result<NewReminder> {
        form.into_new_reminder(now)
    }

    pub fn check_reminder_edit(
        &self,
        form: ReminderForm,
        now: DateTime<Utc>,
    ) -> Result<ReminderPatch> {
        form.into_patch(now)
    }
}
