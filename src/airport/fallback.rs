use super::record::Airport;
use std::sync::LazyLock;

/// Built-in diversion catalog used whenever the persistent store is
/// unconfigured, unreachable or empty.
///
/// Compiled in and independent of the seed data shipped for the file
/// store; the two are separate data sets and no code may assume they
/// agree.
pub static FALLBACK_AIRPORTS: LazyLock<Vec<Airport>> = LazyLock::new(|| {
    vec![
        Airport::new("Indira Gandhi Intl", "DEL", 28.5562, 77.1000, 12192),
        Airport::new("Chhatrapati Shivaji Intl", "BOM", 19.0896, 72.8656, 12467),
        Airport::new("Kempegowda Intl", "BLR", 13.1979, 77.7066, 13000),
        Airport::new("Rajiv Gandhi Intl", "HYD", 17.2403, 78.4294, 12800),
        Airport::new("Chennai Intl", "MAA", 12.9941, 80.1709, 12329),
        Airport::new("Sardar Vallabhbhai Patel Intl", "AMD", 23.0770, 72.6347, 9843),
        Airport::new("Jaipur Intl", "JAI", 26.8242, 75.8122, 9100),
        Airport::new("Lucknow", "LKO", 26.7611, 80.8890, 9100),
        Airport::new("Pune Intl", "PNQ", 18.5820, 73.9197, 9750),
        Airport::new("Goa Intl", "GOI", 15.3800, 73.8316, 9990),
    ]
});
