//! Sample records the store starts from
//!
//! Dates are offsets from `now` so the sample data is always upcoming.

use chrono::{DateTime, Duration, Utc};

use crate::types::{Event, Reminder, ReminderType, Vendor, VendorId};

fn vendor(
    id: VendorId,
    name: &str,
    category: &str,
    rating: f32,
    price_range: &str,
    contact: &str,
) -> Vendor {
    Vendor {
        id,
        name: name.to_string(),
        category: category.to_string(),
        rating,
        price_range: price_range.to_string(),
        contact: contact.to_string(),
        is_booked: false,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The eight vendors of the vendor directory, none booked
pub fn sample_vendors() -> Vec<Vendor> {
    vec![
        vendor(1, "Sound Master Audio", "Equipment", 4.8, "$$$", "contact@soundmaster.com"),
        vendor(2, "Urban Eats Catering", "Food", 4.5, "$$", "orders@urbaneats.com"),
        vendor(3, "Floral Elegance", "Decoration", 4.9, "$$$", "info@floralelegance.com"),
        vendor(4, "SnapBooth Photos", "Photography", 4.7, "$$", "book@snapbooth.com"),
        vendor(5, "Premier Venues", "Venue", 4.6, "$$$$", "reservations@premiervenues.com"),
        vendor(6, "DJ Spectacular", "Entertainment", 4.8, "$$$", "bookings@djspectacular.com"),
        vendor(7, "Budget Decor", "Decoration", 4.2, "$", "sales@budgetdecor.com"),
        vendor(8, "Sweet Treats Bakery", "Food", 4.9, "$$", "orders@sweettreats.com"),
    ]
}

/// The six sample events
pub fn sample_events(now: DateTime<Utc>) -> Vec<Event> {
    // The festival was set up with its sound and catering already booked.
    // These snapshots are independent of the vendor directory entries.
    let festival_vendors: Vec<Vendor> = sample_vendors()
        .into_iter()
        .take(2)
        .map(|mut v| {
            v.is_booked = true;
            v
        })
        .collect();

    vec![
        Event {
            id: 1,
            title: "Summer Music Festival".to_string(),
            description: "Join us for three days of amazing music performances from top artists around the world.".to_string(),
            date: now + Duration::days(7),
            location: "Central Park, New York".to_string(),
            image_url: String::new(),
            organizer: "EventHub Productions".to_string(),
            price: 89.99,
            category: "Music".to_string(),
            attendees: 256,
            max_attendees: 1000,
            is_virtual: false,
            is_private: Some(false),
            reminder_id: None,
            vendors: Some(festival_vendors),
            packages: None,
            timeline: None,
            guest_list: None,
        },
        Event {
            id: 2,
            title: "Tech Conference 2025".to_string(),
            description: "The biggest tech conference of the year featuring the latest innovations in AI, blockchain, and more.".to_string(),
            date: now + Duration::days(14),
            location: "Convention Center, San Francisco".to_string(),
            image_url: String::new(),
            organizer: "TechCon Inc.".to_string(),
            price: 299.99,
            category: "Business".to_string(),
            attendees: 789,
            max_attendees: 2000,
            is_virtual: false,
            is_private: Some(false),
            reminder_id: None,
            vendors: None,
            packages: None,
            timeline: None,
            guest_list: None,
        },
        Event {
            id: 3,
            title: "Sarah's Surprise Birthday Party".to_string(),
            description: "A secret birthday celebration for Sarah's 30th with friends and family. Keep it a surprise!".to_string(),
            date: now + Duration::days(3),
            location: "Riverside Restaurant, Austin".to_string(),
            image_url: String::new(),
            organizer: "John Smith".to_string(),
            price: 0.0,
            category: "Birthday".to_string(),
            attendees: 28,
            max_attendees: 40,
            is_virtual: false,
            is_private: Some(true),
            reminder_id: Some(1),
            vendors: None,
            packages: None,
            timeline: None,
            guest_list: None,
        },
        Event {
            id: 4,
            title: "Virtual Meditation Retreat".to_string(),
            description: "A weekend of relaxation and mindfulness with top yoga instructors from around the world.".to_string(),
            date: now + Duration::days(10),
            location: "Online".to_string(),
            image_url: String::new(),
            organizer: "Mindful Living Co.".to_string(),
            price: 49.99,
            category: "Health".to_string(),
            attendees: 85,
            max_attendees: 500,
            is_virtual: true,
            is_private: Some(false),
            reminder_id: None,
            vendors: None,
            packages: None,
            timeline: None,
            guest_list: None,
        },
        Event {
            id: 5,
            title: "Rodriguez 25th Anniversary".to_string(),
            description: "Celebrating 25 years of marriage for Maria and Carlos Rodriguez with family and close friends.".to_string(),
            date: now + Duration::days(40),
            location: "Golden Gate Hotel, San Francisco".to_string(),
            image_url: String::new(),
            organizer: "Party Planner Pro".to_string(),
            price: 0.0,
            category: "Anniversary".to_string(),
            attendees: 65,
            max_attendees: 100,
            is_virtual: false,
            is_private: Some(true),
            reminder_id: Some(2),
            vendors: None,
            packages: None,
            timeline: None,
            guest_list: None,
        },
        Event {
            id: 6,
            title: "Annual Charity Gala 2025".to_string(),
            description: "Our biggest fundraising event of the year with dinner, silent auction, and live entertainment.".to_string(),
            date: now + Duration::days(60),
            location: "Grand Ballroom, Plaza Hotel".to_string(),
            image_url: String::new(),
            organizer: "Community Foundation".to_string(),
            price: 150.0,
            category: "Charity".to_string(),
            attendees: 210,
            max_attendees: 500,
            is_virtual: false,
            is_private: Some(false),
            reminder_id: None,
            vendors: None,
            packages: None,
            timeline: None,
            guest_list: None,
        },
    ]
}

/// The three sample reminders
pub fn sample_reminders(now: DateTime<Utc>) -> Vec<Reminder> {
    vec![
        Reminder {
            id: 1,
            title: "Sarah's 30th Birthday".to_string(),
            date: now + Duration::days(3),
            kind: ReminderType::Birthday,
            description: "Sarah is turning 30!".to_string(),
            recipient_name: Some("Sarah Johnson".to_string()),
            relationship: Some("Friend".to_string()),
            notify_before: vec![1, 7, 30],
            gift_ideas: Some(strings(&["Spa gift card", "Wine subscription", "Jewelry"])),
            planned_surprise: Some(true),
            planned_event_id: Some(3),
        },
        Reminder {
            id: 2,
            title: "Rodriguez 25th Anniversary".to_string(),
            date: now + Duration::days(40),
            kind: ReminderType::Anniversary,
            description: "Maria and Carlos celebrating 25 years of marriage".to_string(),
            recipient_name: Some("Maria & Carlos Rodriguez".to_string()),
            relationship: Some("Clients".to_string()),
            notify_before: vec![7, 14, 30],
            gift_ideas: Some(strings(&["Photo album", "Weekend getaway", "Engraved gift"])),
            planned_surprise: Some(true),
            planned_event_id: Some(5),
        },
        Reminder {
            id: 3,
            title: "Mom's Birthday".to_string(),
            date: now + Duration::days(25),
            kind: ReminderType::Birthday,
            description: "Don't forget to call Mom and send a gift".to_string(),
            recipient_name: Some("Elizabeth Smith".to_string()),
            relationship: Some("Mother".to_string()),
            notify_before: vec![1, 7, 14],
            gift_ideas: Some(strings(&["Gardening tools", "Cooking class", "Kindle"])),
            planned_surprise: Some(false),
            planned_event_id: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_ids_are_unique() {
        let now = Utc::now();

        let event_ids: HashSet<_> = sample_events(now).iter().map(|e| e.id).collect();
        let reminder_ids: HashSet<_> = sample_reminders(now).iter().map(|r| r.id).collect();
        let vendor_ids: HashSet<_> = sample_vendors().iter().map(|v| v.id).collect();

        assert_eq!(event_ids.len(), 6);
        assert_eq!(reminder_ids.len(), 3);
        assert_eq!(vendor_ids.len(), 8);
    }

    #[test]
    fn test_sample_events_are_upcoming_and_within_capacity() {
        let now = Utc::now();
        for event in sample_events(now) {
            assert!(event.date > now, "{} should be upcoming", event.title);
            assert!(event.attendees <= event.max_attendees);
        }
    }

    #[test]
    fn test_cross_references_resolve() {
        let now = Utc::now();
        let events = sample_events(now);
        let reminders = sample_reminders(now);

        for event in &events {
            if let Some(reminder_id) = event.reminder_id {
                let reminder = reminders.iter().find(|r| r.id == reminder_id).unwrap();
                assert_eq!(reminder.planned_event_id, Some(event.id));
            }
        }
    }

    #[test]
    fn test_birthdays_and_anniversaries_have_recipients() {
        for reminder in sample_reminders(Utc::now()) {
            if reminder.kind.expects_recipient() {
                assert!(reminder.recipient_name.is_some());
            }
        }
    }

    #[test]
    fn test_directory_vendors_start_unbooked() {
        assert!(sample_vendors().iter().all(|v| !v.is_booked));

        let festival = &sample_events(Utc::now())[0];
        let booked = festival.vendors.as_ref().unwrap();
        assert_eq!(booked.len(), 2);
        assert!(booked.iter().all(|v| v.is_booked));
    }
}
