//! Core types for Party Planner
//!
//! Entities serialize with camelCase keys so that they keep the JSON shape the
//! mobile screens already consume (`maxAttendees`, `notifyBefore`, ...).

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

pub type EventId = u32;
pub type ReminderId = u32;
pub type VendorId = u32;

/// Vendor categories offered by the vendor directory
pub const VENDOR_CATEGORIES: [&str; 6] = [
    "Food",
    "Venue",
    "Equipment",
    "Entertainment",
    "Decoration",
    "Photography",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    #[serde(default)]
    pub image_url: String,
    pub organizer: String,
    pub price: f64,
    pub category: String,
    pub attendees: u32,
    pub max_attendees: u32,
    pub is_virtual: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_id: Option<ReminderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendors: Option<Vec<Vendor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<EventTimelineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_list: Option<Vec<GuestListItem>>,
}

impl Event {
    /// Build a stored event from a creation payload and its assigned id
    pub fn from_new(id: EventId, new: NewEvent) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            date: new.date,
            location: new.location,
            image_url: new.image_url,
            organizer: new.organizer,
            price: new.price,
            category: new.category,
            attendees: new.attendees,
            max_attendees: new.max_attendees,
            is_virtual: new.is_virtual,
            is_private: new.is_private,
            reminder_id: new.reminder_id,
            vendors: new.vendors,
            packages: new.packages,
            timeline: new.timeline,
            guest_list: new.guest_list,
        }
    }

    /// Whether the attendee cap has been reached
    pub fn is_full(&self) -> bool {
        self.attendees >= self.max_attendees
    }

    /// Seats left before the attendee cap
    pub fn spots_left(&self) -> u32 {
        self.max_attendees.saturating_sub(self.attendees)
    }

    pub fn is_private(&self) -> bool {
        self.is_private.unwrap_or(false)
    }
}

/// Payload for creating an event; the store assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    #[serde(default)]
    pub image_url: String,
    pub organizer: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub attendees: u32,
    pub max_attendees: u32,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_private: Option<bool>,
    #[serde(default)]
    pub reminder_id: Option<ReminderId>,
    #[serde(default)]
    pub vendors: Option<Vec<Vendor>>,
    #[serde(default)]
    pub packages: Option<Vec<String>>,
    #[serde(default)]
    pub timeline: Option<Vec<EventTimelineItem>>,
    #[serde(default)]
    pub guest_list: Option<Vec<GuestListItem>>,
}

/// Patch for an event, allowing partial updates.
///
/// Only fields that are `Some` replace the stored value. Fields that are
/// optional on [`Event`] take `Some(None)` to clear them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub organizer: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub attendees: Option<u32>,
    pub max_attendees: Option<u32>,
    pub is_virtual: Option<bool>,
    pub is_private: Option<Option<bool>>,
    pub reminder_id: Option<Option<ReminderId>>,
    pub vendors: Option<Option<Vec<Vendor>>>,
    pub packages: Option<Option<Vec<String>>>,
    pub timeline: Option<Option<Vec<EventTimelineItem>>>,
    pub guest_list: Option<Option<Vec<GuestListItem>>>,
}

impl EventPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch to a stored event, modifying it in place.
    pub fn apply_to<'a>(&self, e: &'a mut Event) -> &'a mut Event {
        if let Some(title) = &self.title {
            e.title = title.clone();
        }
        if let Some(description) = &self.description {
            e.description = description.clone();
        }
        if let Some(date) = self.date {
            e.date = date;
        }
        if let Some(location) = &self.location {
            e.location = location.clone();
        }
        if let Some(image_url) = &self.image_url {
            e.image_url = image_url.clone();
        }
        if let Some(organizer) = &self.organizer {
            e.organizer = organizer.clone();
        }
        if let Some(price) = self.price {
            e.price = price;
        }
        if let Some(category) = &self.category {
            e.category = category.clone();
        }
        if let Some(attendees) = self.attendees {
            e.attendees = attendees;
        }
        if let Some(max_attendees) = self.max_attendees {
            e.max_attendees = max_attendees;
        }
        if let Some(is_virtual) = self.is_virtual {
            e.is_virtual = is_virtual;
        }
        if let Some(is_private) = self.is_private {
            e.is_private = is_private;
        }
        if let Some(reminder_id) = self.reminder_id {
            e.reminder_id = reminder_id;
        }
        if let Some(vendors) = &self.vendors {
            e.vendors = vendors.clone();
        }
        if let Some(packages) = &self.packages {
            e.packages = packages.clone();
        }
        if let Some(timeline) = &self.timeline {
            e.timeline = timeline.clone();
        }
        if let Some(guest_list) = &self.guest_list {
            e.guest_list = guest_list.clone();
        }
        e
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTimelineItem {
    pub id: u32,
    pub time: String,
    pub description: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestListItem {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub is_attending: bool,
    pub plus_one: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub category: String,
    pub rating: f32,
    pub price_range: String,
    pub contact: String,
    pub is_booked: bool,
}

/// Kind of date a reminder tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Birthday,
    Anniversary,
    Meeting,
    Other,
}

impl ReminderType {
    pub const ALL: [ReminderType; 4] = [
        ReminderType::Birthday,
        ReminderType::Anniversary,
        ReminderType::Meeting,
        ReminderType::Other,
    ];

    /// Birthdays and anniversaries are about someone, so the forms ask for a
    /// recipient name.
    pub fn expects_recipient(&self) -> bool {
        matches!(self, ReminderType::Birthday | ReminderType::Anniversary)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderType::Birthday => "birthday",
            ReminderType::Anniversary => "anniversary",
            ReminderType::Meeting => "meeting",
            ReminderType::Other => "other",
        }
    }
}

impl std::str::FromStr for ReminderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "birthday" => Ok(ReminderType::Birthday),
            "anniversary" => Ok(ReminderType::Anniversary),
            "meeting" => Ok(ReminderType::Meeting),
            "other" => Ok(ReminderType::Other),
            _ => Err(format!(
                "Invalid reminder type: '{}'. Valid options: birthday, anniversary, meeting, other",
                s
            )),
        }
    }
}

impl std::fmt::Display for ReminderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ReminderType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    /// Days before the date to notify; duplicates are kept as given
    #[serde(default)]
    pub notify_before: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gift_ideas: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_surprise: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_event_id: Option<EventId>,
}

impl Reminder {
    /// Build a stored reminder from a creation payload and its assigned id
    pub fn from_new(id: ReminderId, new: NewReminder) -> Self {
        Self {
            id,
            title: new.title,
            date: new.date,
            kind: new.kind,
            description: new.description,
            recipient_name: new.recipient_name,
            relationship: new.relationship,
            notify_before: new.notify_before,
            gift_ideas: new.gift_ideas,
            planned_surprise: new.planned_surprise,
            planned_event_id: new.planned_event_id,
        }
    }
}

/// Payload for creating a reminder; the store assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ReminderType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub notify_before: Vec<u32>,
    #[serde(default)]
    pub gift_ideas: Option<Vec<String>>,
    #[serde(default)]
    pub planned_surprise: Option<bool>,
    #[serde(default)]
    pub planned_event_id: Option<EventId>,
}

/// Patch for a reminder, allowing partial updates.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReminderPatch {
    pub title: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub kind: Option<ReminderType>,
    pub description: Option<String>,
    pub recipient_name: Option<Option<String>>,
    pub relationship: Option<Option<String>>,
    pub notify_before: Option<Vec<u32>>,
    pub gift_ideas: Option<Option<Vec<String>>>,
    pub planned_surprise: Option<Option<bool>>,
    pub planned_event_id: Option<Option<EventId>>,
}

impl ReminderPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch to a stored reminder, modifying it in place.
    pub fn apply_to<'a>(&self, r: &'a mut Reminder) -> &'a mut Reminder {
        if let Some(title) = &self.title {
            r.title = title.clone();
        }
        if let Some(date) = self.date {
            r.date = date;
        }
        if let Some(kind) = self.kind {
            r.kind = kind;
        }
        if let Some(description) = &self.description {
            r.description = description.clone();
        }
        if let Some(recipient_name) = &self.recipient_name {
            r.recipient_name = recipient_name.clone();
        }
        if let Some(relationship) = &self.relationship {
            r.relationship = relationship.clone();
        }
        if let Some(notify_before) = &self.notify_before {
            r.notify_before = notify_before.clone();
        }
        if let Some(gift_ideas) = &self.gift_ideas {
            r.gift_ideas = gift_ideas.clone();
        }
        if let Some(planned_surprise) = self.planned_surprise {
            r.planned_surprise = planned_surprise;
        }
        if let Some(planned_event_id) = self.planned_event_id {
            r.planned_event_id = planned_event_id;
        }
        r
    }
}

/// Characters `encodeURIComponent` leaves untouched
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const PLACEHOLDER_IMAGE_ENDPOINT: &str = "https://api.a0.dev/assets/image";

/// URL of the generated placeholder artwork for a card titled `text`
pub fn placeholder_image_url(text: &str, seed: u32) -> String {
    format!(
        "{}?text={}&aspect=1:1&seed={}",
        PLACEHOLDER_IMAGE_ENDPOINT,
        utf8_percent_encode(text, URI_COMPONENT),
        seed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_event() -> Event {
        Event::from_new(
            7,
            NewEvent {
                title: "Garden Party".to_string(),
                description: "Drinks on the lawn".to_string(),
                date: Utc.with_ymd_and_hms(2030, 6, 1, 18, 0, 0).unwrap(),
                location: "Backyard".to_string(),
                image_url: String::new(),
                organizer: "Alex".to_string(),
                price: 0.0,
                category: "Social".to_string(),
                attendees: 3,
                max_attendees: 10,
                is_virtual: false,
                is_private: Some(true),
                reminder_id: None,
                vendors: None,
                packages: None,
                timeline: None,
                guest_list: None,
            },
        )
    }

    #[test]
    fn test_event_serializes_camel_case_and_skips_absent_fields() {
        let json = serde_json::to_value(sample_event()).unwrap();

        assert_eq!(json["maxAttendees"], 10);
        assert_eq!(json["isVirtual"], false);
        assert_eq!(json["isPrivate"], true);
        assert_eq!(json["imageUrl"], "");
        assert!(json.get("reminderId").is_none());
        assert!(json.get("vendors").is_none());
    }

    #[test]
    fn test_event_capacity_helpers() {
        let mut event = sample_event();
        assert!(!event.is_full());
        assert_eq!(event.spots_left(), 7);

        event.attendees = 10;
        assert!(event.is_full());
        assert_eq!(event.spots_left(), 0);
    }

    #[test]
    fn test_event_patch_is_shallow() {
        let mut event = sample_event();
        let patch = EventPatch {
            title: Some("Lawn Party".to_string()),
            is_private: Some(None),
            ..Default::default()
        };

        patch.apply_to(&mut event);

        assert_eq!(event.title, "Lawn Party");
        assert_eq!(event.is_private, None);
        assert_eq!(event.description, "Drinks on the lawn");
        assert_eq!(event.max_attendees, 10);
    }

    #[test]
    fn test_empty_patches() {
        assert!(EventPatch::default().is_empty());
        assert!(ReminderPatch::default().is_empty());
        assert!(!EventPatch {
            price: Some(5.0),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_reminder_type_round_trip_names() {
        for kind in ReminderType::ALL {
            assert_eq!(kind.as_str().parse::<ReminderType>().unwrap(), kind);
        }
        assert_eq!("Birthday".parse::<ReminderType>().unwrap(), ReminderType::Birthday);

        let err = "party".parse::<ReminderType>().unwrap_err();
        assert!(err.contains("Invalid reminder type: 'party'"));
    }

    #[test]
    fn test_reminder_type_expects_recipient() {
        assert!(ReminderType::Birthday.expects_recipient());
        assert!(ReminderType::Anniversary.expects_recipient());
        assert!(!ReminderType::Meeting.expects_recipient());
        assert!(!ReminderType::Other.expects_recipient());
    }

    #[test]
    fn test_reminder_kind_serializes_under_type_key() {
        let reminder = Reminder::from_new(
            1,
            NewReminder {
                title: "Mom's Birthday".to_string(),
                date: Utc.with_ymd_and_hms(2030, 3, 2, 9, 0, 0).unwrap(),
                kind: ReminderType::Birthday,
                description: String::new(),
                recipient_name: Some("Elizabeth".to_string()),
                relationship: None,
                notify_before: vec![1, 7, 7],
                gift_ideas: None,
                planned_surprise: None,
                planned_event_id: None,
            },
        );

        let json = serde_json::to_value(&reminder).unwrap();
        assert_eq!(json["type"], "birthday");
        assert_eq!(json["recipientName"], "Elizabeth");
        assert_eq!(json["notifyBefore"], serde_json::json!([1, 7, 7]));
        assert!(json.get("plannedEventId").is_none());
    }

    #[test]
    fn test_placeholder_image_url_encodes_title() {
        let url = placeholder_image_url("Sarah's 30th & more", 3);
        assert_eq!(
            url,
            "https://api.a0.dev/assets/image?text=Sarah's%2030th%20%26%20more&aspect=1:1&seed=3"
        );
    }
}
