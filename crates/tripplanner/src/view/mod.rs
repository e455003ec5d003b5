//! Rendering surface.
//!
//! The planner owns all state and pushes it to a [`Surface`] after each
//! mutation. A surface may lack some sections entirely; features whose
//! section is missing are skipped as a whole.

mod page;

pub use page::TextPage;

use crate::checklist::Checklist;
use crate::collection::CardCollection;
use crate::dashboard::DashboardSummary;
use crate::itinerary::Itinerary;
use crate::registry::CardKind;

/// A region of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    /// The overview dashboard.
    Overview,
    /// Destination, dates and travelers form.
    TripDetails,
    /// Budget rows and their total.
    Budget,
    /// Day-by-day plan.
    Itinerary,
    /// Flight cards.
    Flights,
    /// Hotel cards.
    Hotels,
    /// Other booking cards.
    Bookings,
    /// Packing list.
    Checklist,
}

impl Section {
    /// Every section, in page order.
    pub const ALL: [Section; 8] = [
        Section::Overview,
        Section::TripDetails,
        Section::Budget,
        Section::Itinerary,
        Section::Flights,
        Section::Hotels,
        Section::Bookings,
        Section::Checklist,
    ];

    /// Section holding the cards of `kind`.
    #[must_use]
    pub fn for_kind(kind: CardKind) -> Self {
        match kind {
            CardKind::Flight => Self::Flights,
            CardKind::Hotel => Self::Hotels,
            CardKind::Booking => Self::Bookings,
        }
    }
}

/// Where the planner renders to.
pub trait Surface {
    /// Whether the page has this section.
    fn has_section(&self, section: Section) -> bool;

    /// Redraw a card collection, or its placeholder when empty.
    fn render_collection(&mut self, collection: &CardCollection);

    /// Redraw the detailed budget total.
    fn render_budget_total(&mut self, total: &str);

    /// Redraw the overview.
    fn render_summary(&mut self, summary: &DashboardSummary);

    /// Redraw the itinerary.
    fn render_itinerary(&mut self, itinerary: &Itinerary);

    /// Redraw the packing list.
    fn render_checklist(&mut self, checklist: &Checklist);

    /// Show a blocking message to the user.
    fn alert(&mut self, message: &str);
}
