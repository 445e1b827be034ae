//! Fixed starter dataset.

use super::animal::AnimalFields;

/// Number of records in the starter dataset.
pub const STARTER_ANIMAL_COUNT: usize = 4;

/// Returns the starter records in creation order.
pub fn starter_animals() -> Vec<AnimalFields> {
    vec![
        AnimalFields::new("Black Rhino", false, "Africa", 40.0),
        AnimalFields::new("Steller's Sea Cow", true, "Bering Sea", 30.0),
        AnimalFields::new("Arctic Wolf", false, "Arctic", 7.0),
        AnimalFields::new("Baiji White Dolphin", true, "Yangtze River", 24.0),
    ]
}
