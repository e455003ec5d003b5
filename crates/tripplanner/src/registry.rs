//! Card registry.
//!
//! Every card variant is described once, statically: its icon and title, the
//! ordered field template, the section it renders into and the placeholder
//! shown while its collection is empty. The field order here *is* the
//! positional storage order, so reordering or inserting fields changes how
//! previously saved records load.

use serde::{Deserialize, Serialize};

/// The closed set of card variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// A flight leg.
    Flight,
    /// A hotel or other accommodation.
    Hotel,
    /// Any other reservation (car rental, tour, restaurant...).
    Booking,
}

impl CardKind {
    /// All kinds, in restore order.
    pub const ALL: [CardKind; 3] = [CardKind::Flight, CardKind::Hotel, CardKind::Booking];

    /// The registry entry for this kind.
    #[must_use]
    pub fn spec(self) -> &'static CardSpec {
        match self {
            Self::Flight => &FLIGHT,
            Self::Hotel => &HOTEL,
            Self::Booking => &BOOKING,
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flight => write!(f, "flight"),
            Self::Hotel => write!(f, "hotel"),
            Self::Booking => write!(f, "booking"),
        }
    }
}

/// The kind of input control backing a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Single line text.
    Text,
    /// Telephone number.
    Tel,
    /// Numeric amount.
    Number,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    /// Time of day, `HH:MM`.
    Time,
    /// Local date and time, `YYYY-MM-DDTHH:MM`.
    DateTime,
    /// Multi-line text.
    TextArea,
    /// One of a fixed list of options.
    Select,
}

/// One option of a select field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    /// Stored value.
    pub value: &'static str,
    /// Displayed text.
    pub label: &'static str,
}

/// One editable field of a card template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Stable name used for in-memory access.
    pub name: &'static str,
    /// On-screen label.
    pub label: &'static str,
    /// Input control.
    pub input: InputKind,
    /// Placeholder hint, empty when the control has none.
    pub placeholder: &'static str,
    /// Options, only for [`InputKind::Select`].
    pub options: &'static [SelectOption],
}

impl FieldSpec {
    const fn new(
        name: &'static str,
        label: &'static str,
        input: InputKind,
        placeholder: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            input,
            placeholder,
            options: &[],
        }
    }

    /// The label of the option stored as `value`, if any.
    #[must_use]
    pub fn option_label(&self, value: &str) -> Option<&'static str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label)
    }

    /// Whether `value` may be stored in this field.
    ///
    /// Select fields take only one of their option values; every other input
    /// takes any text.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        self.input != InputKind::Select || self.option_label(value).is_some()
    }
}

/// Registry entry for one card kind.
#[derive(Debug, PartialEq, Eq)]
pub struct CardSpec {
    /// Kind described by this entry.
    pub kind: CardKind,
    /// Icon glyph name.
    pub icon: &'static str,
    /// Card title.
    pub title: &'static str,
    /// Ordered field template.
    pub fields: &'static [FieldSpec],
    /// Text shown while the collection is empty.
    pub empty_state: &'static str,
    /// Storage key used unless configuration overrides it.
    pub default_key: &'static str,
}

impl CardSpec {
    /// Number of fields in the template.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Position of the field named `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }
}

const BOOKING_TYPES: &[SelectOption] = &[
    SelectOption {
        value: "",
        label: "Select type",
    },
    SelectOption {
        value: "car",
        label: "Car Rental",
    },
    SelectOption {
        value: "tour",
        label: "Tour/Activity",
    },
    SelectOption {
        value: "restaurant",
        label: "Restaurant",
    },
    SelectOption {
        value: "transportation",
        label: "Transportation",
    },
    SelectOption {
        value: "other",
        label: "Other",
    },
];

static FLIGHT: CardSpec = CardSpec {
    kind: CardKind::Flight,
    icon: "airplane-fill",
    title: "Flight Details",
    fields: &[
        FieldSpec::new("airline", "Airline", InputKind::Text, "e.g., Delta, United"),
        FieldSpec::new("flight_number", "Flight Number", InputKind::Text, "e.g., DL123"),
        FieldSpec::new("departure_airport", "Departure Airport", InputKind::Text, "e.g., JFK"),
        FieldSpec::new("arrival_airport", "Arrival Airport", InputKind::Text, "e.g., LAX"),
        FieldSpec::new("departure_time", "Departure Date & Time", InputKind::DateTime, ""),
        FieldSpec::new("arrival_time", "Arrival Date & Time", InputKind::DateTime, ""),
        FieldSpec::new("confirmation", "Confirmation Number", InputKind::Text, "Booking reference"),
        FieldSpec::new("seat", "Seat", InputKind::Text, "e.g., 12A"),
        FieldSpec::new(
            "notes",
            "Notes",
            InputKind::TextArea,
            "Gate info, baggage details, etc.",
        ),
    ],
    empty_state: "Click \"Add Flight\" to track your flights",
    default_key: "tripPlannerFlights",
};

static HOTEL: CardSpec = CardSpec {
    kind: CardKind::Hotel,
    icon: "building-fill",
    title: "Accommodation Details",
    fields: &[
        FieldSpec::new("name", "Hotel/Property Name", InputKind::Text, "e.g., Hilton Downtown"),
        FieldSpec::new("address", "Address", InputKind::Text, "Full address"),
        FieldSpec::new("check_in", "Check-in Date", InputKind::Date, ""),
        FieldSpec::new("check_out", "Check-out Date", InputKind::Date, ""),
        FieldSpec::new("confirmation", "Confirmation Number", InputKind::Text, "Booking reference"),
        FieldSpec::new("room_type", "Room Type", InputKind::Text, "e.g., Deluxe King"),
        FieldSpec::new("phone", "Phone Number", InputKind::Tel, "Hotel contact"),
        FieldSpec::new("total_cost", "Total Cost", InputKind::Number, "0.00"),
        FieldSpec::new(
            "notes",
            "Notes",
            InputKind::TextArea,
            "Amenities, parking info, special requests, etc.",
        ),
    ],
    empty_state: "Click \"Add Hotel\" to track your accommodations",
    default_key: "tripPlannerHotels",
};

static BOOKING: CardSpec = CardSpec {
    kind: CardKind::Booking,
    icon: "calendar-check-fill",
    title: "Booking Details",
    fields: &[
        FieldSpec {
            name: "booking_type",
            label: "Booking Type",
            input: InputKind::Select,
            placeholder: "",
            options: BOOKING_TYPES,
        },
        FieldSpec::new("provider", "Provider/Vendor", InputKind::Text, "e.g., Enterprise, Viator"),
        FieldSpec::new(
            "description",
            "Description",
            InputKind::Text,
            "e.g., Full-day city tour, Dinner reservation",
        ),
        FieldSpec::new("date", "Date", InputKind::Date, ""),
        FieldSpec::new("time", "Time", InputKind::Time, ""),
        FieldSpec::new("confirmation", "Confirmation Number", InputKind::Text, "Booking reference"),
        FieldSpec::new("cost", "Cost", InputKind::Number, "0.00"),
        FieldSpec::new(
            "notes",
            "Notes",
            InputKind::TextArea,
            "Additional details, contact info, etc.",
        ),
    ],
    empty_state: "Track car rentals, tours, restaurants, and other reservations",
    default_key: "tripPlannerBookings",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_counts_match_storage_shapes() {
        assert_eq!(CardKind::Flight.spec().field_count(), 9);
        assert_eq!(CardKind::Hotel.spec().field_count(), 9);
        assert_eq!(CardKind::Booking.spec().field_count(), 8);
    }

    #[test]
    fn test_spec_kind_matches() {
        for kind in CardKind::ALL {
            assert_eq!(kind.spec().kind, kind);
        }
    }

    #[test]
    fn test_field_names_unique_per_kind() {
        for kind in CardKind::ALL {
            let fields = kind.spec().fields;
            for (i, field) in fields.iter().enumerate() {
                assert_eq!(kind.spec().index_of(field.name), Some(i), "{kind}: {}", field.name);
            }
        }
    }

    #[test]
    fn test_booking_select_comes_first() {
        let spec = CardKind::Booking.spec();
        assert_eq!(spec.fields[0].input, InputKind::Select);
        assert_eq!(spec.fields[0].option_label("tour"), Some("Tour/Activity"));
        assert_eq!(spec.fields[0].option_label("boat"), None);
        assert!(spec.fields[0].accepts(""));
        assert!(spec.fields[0].accepts("car"));
        assert!(!spec.fields[0].accepts("boat"));
        assert!(spec.fields[1].accepts("anything"));
    }

    #[test]
    fn test_default_keys_distinct() {
        assert_ne!(FLIGHT.default_key, HOTEL.default_key);
        assert_ne!(HOTEL.default_key, BOOKING.default_key);
        assert_ne!(FLIGHT.default_key, BOOKING.default_key);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(CardKind::Flight.to_string(), "flight");
        assert_eq!(CardKind::Hotel.to_string(), "hotel");
        assert_eq!(CardKind::Booking.to_string(), "booking");
    }

    #[test]
    fn test_index_of_unknown() {
        assert_eq!(CardKind::Flight.spec().index_of("gate"), None);
    }
}
