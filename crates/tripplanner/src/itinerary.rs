//! Day-by-day itinerary.
//!
//! The itinerary is session scratch space: it is rebuilt from the trip
//! duration on submission, can be extended by hand, and is never stored.

use serde::Serialize;

/// Fixed time slots every generated day starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimeSlot {
    /// Before noon.
    Morning,
    /// Noon to early evening.
    Afternoon,
    /// Evening and night.
    Evening,
}

impl TimeSlot {
    /// Slots in day order.
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    /// Icon glyph name.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Morning => "sunrise",
            Self::Afternoon => "sun",
            Self::Evening => "moon-stars",
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Morning => write!(f, "Morning"),
            Self::Afternoon => write!(f, "Afternoon"),
            Self::Evening => write!(f, "Evening"),
        }
    }
}

/// One activity row. Extra rows appended by hand carry no slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    /// Slot of a generated row.
    pub slot: Option<TimeSlot>,
    /// Free text.
    pub text: String,
}

/// One day of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryDay {
    /// 1-based day number.
    pub day_number: u32,
    /// Activities in display order.
    pub activities: Vec<Activity>,
}

impl ItineraryDay {
    /// A day with an empty Morning, Afternoon and Evening activity.
    #[must_use]
    pub fn new(day_number: u32) -> Self {
        Self {
            day_number,
            activities: TimeSlot::ALL
                .into_iter()
                .map(|slot| Activity {
                    slot: Some(slot),
                    text: String::new(),
                })
                .collect(),
        }
    }

    /// Append an untyped activity row and return its index.
    pub fn add_activity(&mut self) -> usize {
        self.activities.push(Activity {
            slot: None,
            text: String::new(),
        });
        self.activities.len() - 1
    }
}

/// The whole itinerary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    days: Vec<ItineraryDay>,
}

impl Itinerary {
    /// Replace every day with `duration_days` fresh ones.
    pub fn generate(&mut self, duration_days: u32) {
        self.days = (1..=duration_days).map(ItineraryDay::new).collect();
    }

    /// Append one day after the last and return its number.
    ///
    /// The trip dates are not consulted, so the day count can drift from the
    /// recorded duration.
    pub fn add_day(&mut self) -> u32 {
        let day_number = u32::try_from(self.days.len()).map_or(u32::MAX, |n| n.saturating_add(1));
        self.days.push(ItineraryDay::new(day_number));
        day_number
    }

    /// Days in order.
    #[must_use]
    pub fn days(&self) -> &[ItineraryDay] {
        &self.days
    }

    /// Day by 1-based number.
    pub fn day_mut(&mut self, day_number: u32) -> Option<&mut ItineraryDay> {
        self.days.iter_mut().find(|day| day.day_number == day_number)
    }

    /// Number of days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether there are no days.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
