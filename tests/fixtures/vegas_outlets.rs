//! Real Las Vegas / Henderson locations used as outlets.
//!
//! Coordinates sourced from OpenStreetMap via Overpass API.
//! These are routable locations that work with OSRM Nevada data.

use beat_planner::model::Outlet;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

pub const STRIP_BEAT: &[Location] = &[
    Location::new("Hard Rock Cafe", 36.1041592, -115.1722166),
    Location::new("SW Steakhouse", 36.1262145, -115.1669146),
    Location::new("Public House", 36.1219193, -115.1689317),
    Location::new("The Crack Shack", 36.1050709, -115.1735287),
    Location::new("Brooklyn Bowl", 36.1175388, -115.1695094),
    Location::new("Gordon Ramsay BurGR", 36.1107195, -115.1720818),
    Location::new("Earl of Sandwich Planet Hollywood", 36.1093912, -115.1720087),
    Location::new("Spago by Wolfgang Puck", 36.1139368, -115.1741462),
    Location::new("Hash House A Go Go", 36.1181377, -115.1710989),
    Location::new("Otto Pizzeria", 36.1231219, -115.1684514),
    Location::new("Grand Lux Cafe", 36.1216416, -115.1685024),
    Location::new("Bacchanal Buffet", 36.1159581, -115.1762929),
    Location::new("Il Fornaio", 36.1024474, -115.1740110),
    Location::new("Charlie Palmer Steak", 36.0910624, -115.1743364),
];

pub const HENDERSON_BEAT: &[Location] = &[
    Location::new("I Love Sushi Henderson", 35.9916660, -115.1028343),
    Location::new("Islander's Grill", 36.0335058, -114.9856162),
    Location::new("Naga", 36.0137634, -114.9928676),
    Location::new("RibCage", 35.9949754, -115.0999810),
    Location::new("Buffalo Wild Wings Henderson", 36.0090449, -114.9917034),
    Location::new("Green Valley Ranch Area", 36.0308, -115.0825),
];

pub const NORTH_BEAT: &[Location] = &[
    Location::new("Rivas Mexican Grill North", 36.1450055, -115.0482587),
    Location::new("Monarca Mexican Restaurant", 36.1440711, -115.0634197),
    Location::new("La Costa del Sol", 36.1470458, -115.0644345),
    Location::new("Beers and Bets", 36.1428945, -115.1573836),
];

/// Outlets for a beat, ids prefixed with the beat's initial letter.
pub fn beat_outlets(beat: &str, locations: &[Location], frequency: &str) -> Vec<Outlet> {
    let prefix = beat.chars().next().unwrap_or('X');
    locations
        .iter()
        .enumerate()
        .map(|(i, location)| {
            Outlet::new(format!("{}{:02}", prefix, i + 1), location.name, beat)
                .with_location(location.lat, location.lng)
                .with_frequency(frequency)
        })
        .collect()
}

/// All three beats, every outlet visited weekly.
pub fn weekly_territory() -> Vec<Outlet> {
    let mut outlets = beat_outlets("Strip", STRIP_BEAT, "4");
    outlets.extend(beat_outlets("Henderson", HENDERSON_BEAT, "4"));
    outlets.extend(beat_outlets("North", NORTH_BEAT, "4"));
    outlets
}
