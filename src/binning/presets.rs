//! Stock column tables for the bundled datasets.
//!
//! Each function builds a fresh, immutable [`Classifier`] (or quantile setting). Callers construct
//! what they need once and pass it into the enrichment functions explicitly.

use super::format::RangeStyle;
use super::manual::{Classifier, Predicate};

use Predicate::{Le, Lt, Missing};

/// Quantile setting for a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantilePreset {
    pub source: &'static str,
    pub target: &'static str,
    pub bins: usize,
    pub style: RangeStyle,
}

/// Country tables.
pub mod countries {
    use super::*;

    /// Quantile-binned country columns.
    pub const QUANTILE_COLUMNS: &[QuantilePreset] = &[
        QuantilePreset { source: "population", target: "population_cat", bins: 7, style: RangeStyle::Compact },
        QuantilePreset { source: "area", target: "area_cat", bins: 7, style: RangeStyle::Area },
        QuantilePreset { source: "GDP", target: "GDP_cat", bins: 7, style: RangeStyle::Currency },
        QuantilePreset { source: "gdp_per_capita", target: "gdp_per_capita_cat", bins: 6, style: RangeStyle::Currency },
        QuantilePreset { source: "pop_density", target: "pop_density_cat", bins: 7, style: RangeStyle::Density },
    ];

    /// Armed forces head-count: many zeros and unknowns.
    pub fn armed_forces() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, "Unknown"),
                (Predicate::Eq(-1.0), "Unknown"),
                (Predicate::Eq(0.0), "None"),
                (Le(10_000.0), "1-10K"),
                (Le(50_000.0), "10K-50K"),
                (Le(150_000.0), "50K-150K"),
                (Le(500_000.0), "150K-500K"),
            ],
            "500K+",
        )
    }

    /// Number of timezones; nearly every country has exactly one.
    pub fn timezone_count() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, "Unknown"),
                (Predicate::Eq(-1.0), "Unknown"),
                (Predicate::Eq(1.0), "1"),
                (Predicate::Eq(2.0), "2"),
                (Le(5.0), "3-5"),
            ],
            "6+",
        )
    }

    /// UNESCO World Heritage site count (right-skewed).
    pub fn unesco_sites() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, "Unknown"),
                (Predicate::Eq(-1.0), "Unknown"),
                (Predicate::Eq(0.0), "0"),
                (Le(2.0), "1-2"),
                (Le(5.0), "3-5"),
                (Le(10.0), "6-10"),
                (Le(25.0), "11-25"),
            ],
            "26+",
        )
    }

    pub fn latitude() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, "Unknown"),
                (Predicate::Eq(-1.0), "Unknown"),
                (Lt(-30.0), "Deep South (< -30°)"),
                (Lt(-10.0), "Southern (-30° to -10°)"),
                (Lt(10.0), "Equatorial (-10° to 10°)"),
                (Lt(25.0), "Tropical (10° to 25°)"),
                (Lt(40.0), "Subtropical (25° to 40°)"),
                (Lt(55.0), "Temperate (40° to 55°)"),
            ],
            "Northern (55°+)",
        )
    }

    pub fn longitude() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, "Unknown"),
                (Lt(-100.0), "Far West (< -100°)"),
                (Lt(-50.0), "Americas (-100° to -50°)"),
                (Lt(0.0), "Atlantic (-50° to 0°)"),
                (Lt(30.0), "Europe/Africa (0° to 30°)"),
                (Lt(60.0), "Middle East (30° to 60°)"),
                (Lt(100.0), "Central Asia (60° to 100°)"),
                (Lt(140.0), "East Asia (100° to 140°)"),
            ],
            "Pacific (140°+)",
        )
    }

    /// `(source column, target column, classifier)` for every manually binned country column.
    pub fn manual_columns() -> Vec<(&'static str, &'static str, Classifier)> {
        vec![
            ("Armed Forces size", "armed_forces_cat", armed_forces()),
            ("timezone_count", "timezone_cat", timezone_count()),
            ("unesco_sites", "unesco_cat", unesco_sites()),
            ("Latitude", "latitude_cat", latitude()),
            ("Longitude", "longitude_cat", longitude()),
        ]
    }

    /// Columns whose hit range is an absolute ±1.
    pub const SMALL_MAGNITUDE_COLUMNS: &[&str] = &["timezone_count", "unesco_sites"];

    /// Columns that get `<col>_min_hit` / `<col>_max_hit` companions.
    pub const HIT_RANGE_COLUMNS: &[&str] = &[
        "population",
        "area",
        "GDP",
        "gdp_per_capita",
        "timezone_count",
        "unesco_sites",
    ];
}

/// Chemical element tables.
pub mod chemicals {
    use super::*;

    pub fn atomic_mass() -> Classifier {
        Classifier::with_default(
            &[
                (Le(10.0), "Very Light (<10)"),
                (Le(40.0), "Light (10-40)"),
                (Le(100.0), "Medium (40-100)"),
                (Le(200.0), "Heavy (100-200)"),
            ],
            "Very Heavy (>200)",
        )
    }

    /// Density in g/cm³; zero or negative means unknown or a gas.
    pub fn density() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, "Unknown/Gas"),
                (Le(0.0), "Unknown/Gas"),
                (Lt(1.0), "Ultra Light (<1)"),
                (Lt(5.0), "Light (1-5)"),
                (Lt(10.0), "Medium (5-10)"),
                (Lt(15.0), "Dense (10-15)"),
                (Lt(20.0), "Very Dense (15-20)"),
            ],
            "Super Dense (>20)",
        )
    }

    /// Melting point in Kelvin.
    pub fn melting_point() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, "Unknown"),
                (Le(0.0), "Unknown"),
                (Lt(100.0), "Cryogenic (<100K)"),
                (Lt(500.0), "Very Low (100-500K)"),
                (Lt(1_000.0), "Low (500-1000K)"),
                (Lt(1_500.0), "Moderate (1000-1500K)"),
                (Lt(2_500.0), "High (1500-2500K)"),
            ],
            "Extreme (>2500K)",
        )
    }

    /// Boiling point in Kelvin.
    pub fn boiling_point() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, "Unknown"),
                (Le(0.0), "Unknown"),
                (Lt(100.0), "Cryogenic (<100K)"),
                (Lt(500.0), "Very Low (100-500K)"),
                (Lt(1_500.0), "Low (500-1500K)"),
                (Lt(3_000.0), "Moderate (1500-3000K)"),
                (Lt(5_000.0), "High (3000-5000K)"),
            ],
            "Extreme (>5000K)",
        )
    }

    /// Discovery year; `0` marks elements known since antiquity.
    pub fn year_discovered() -> Classifier {
        Classifier::with_default(
            &[
                (Predicate::Eq(0.0), "Ancient"),
                (Lt(1_700.0), "Pre-1700"),
                (Lt(1_800.0), "1700s"),
                (Lt(1_850.0), "Early 1800s"),
                (Lt(1_900.0), "Late 1800s"),
                (Lt(1_950.0), "Early 1900s"),
            ],
            "Modern (1950+)",
        )
    }

    pub fn manual_columns() -> Vec<(&'static str, &'static str, Classifier)> {
        vec![
            ("AtomicMass", "atomic_mass_range", atomic_mass()),
            ("Density", "density_range", density()),
            ("MeltingPoint", "melting_point_range", melting_point()),
            ("BoilingPoint", "boiling_point_range", boiling_point()),
            ("YearDiscovered", "year_discovered_range", year_discovered()),
        ]
    }
}

/// Animal tables. Missing measurements produce an empty label.
pub mod animals {
    use super::*;

    pub fn weight_kg() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, ""),
                (Lt(0.1), "Feather"),
                (Lt(1.0), "Light"),
                (Lt(10.0), "Below Average"),
                (Lt(50.0), "Average"),
                (Lt(200.0), "Above Average"),
                (Lt(1_000.0), "Heavy"),
                (Lt(10_000.0), "Massive"),
            ],
            "Colossal",
        )
    }

    pub fn height_cm() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, ""),
                (Lt(5.0), "Minuscule"),
                (Lt(20.0), "Very Short"),
                (Lt(50.0), "Short"),
                (Lt(100.0), "Below Average"),
                (Lt(200.0), "Average"),
                (Lt(500.0), "Tall"),
                (Lt(1_000.0), "Very Tall"),
            ],
            "Towering",
        )
    }

    pub fn speed_kmh() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, ""),
                (Lt(1.0), "Sessile"),
                (Lt(10.0), "Very Slow"),
                (Lt(25.0), "Slow"),
                (Lt(45.0), "Moderate"),
                (Lt(65.0), "Fast"),
                (Lt(90.0), "Very Fast"),
            ],
            "Blazing",
        )
    }

    pub fn lifespan_years() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, ""),
                (Lt(1.0), "Ephemeral"),
                (Lt(5.0), "Very Short"),
                (Lt(12.0), "Short"),
                (Lt(25.0), "Average"),
                (Lt(50.0), "Long"),
                (Lt(100.0), "Very Long"),
            ],
            "Ancient",
        )
    }

    /// Daily sleep hours; negative values are treated as missing.
    pub fn sleep_hours() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, ""),
                (Lt(0.0), ""),
                (Lt(4.0), "Minimal"),
                (Lt(8.0), "Light"),
                (Lt(12.0), "Moderate"),
                (Lt(16.0), "Heavy"),
                (Lt(20.0), "Very Heavy"),
            ],
            "Extreme",
        )
    }

    /// Bite force in PSI; negative values are treated as missing.
    pub fn bite_force_psi() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, ""),
                (Lt(0.0), ""),
                (Lt(100.0), "Weak"),
                (Lt(500.0), "Moderate"),
                (Lt(1_000.0), "Strong"),
                (Lt(2_000.0), "Very Strong"),
            ],
            "Devastating",
        )
    }

    /// Coarse body size from weight in kg.
    pub fn body_size() -> Classifier {
        Classifier::with_default(
            &[
                (Missing, ""),
                (Lt(0.1), "Tiny"),
                (Lt(5.0), "Small"),
                (Lt(100.0), "Medium"),
                (Lt(500.0), "Big"),
                (Lt(5_000.0), "Large"),
            ],
            "Gigantic",
        )
    }

    pub fn manual_columns() -> Vec<(&'static str, &'static str, Classifier)> {
        vec![
            ("weight_kg", "weight_category", weight_kg()),
            ("height_cm", "height_category", height_cm()),
            ("speed_kmh", "speed_category", speed_kmh()),
            ("lifespan_years", "lifespan_category", lifespan_years()),
            ("daily_sleep_hours", "sleep_category", sleep_hours()),
            ("bite_force_psi", "bite_force_category", bite_force_psi()),
            ("weight_kg", "body_size", body_size()),
        ]
    }
}

/// Film tables: fixed word labels over equal-count buckets.
pub mod films {
    pub const BOX_OFFICE_LABELS: &[&str] = &["Indie", "Modest", "Moderate", "Hit", "Blockbuster", "Mega-Hit"];

    pub const YEAR_LABELS: &[&str] = &[
        "Silent/Pre-War",
        "Golden Age",
        "New Hollywood",
        "Blockbuster Era",
        "Modern Classic",
        "21st Century",
        "Contemporary",
    ];

    pub const RUNTIME_LABELS: &[&str] = &["Short", "Standard", "Long", "Extended", "Epic"];

    pub const RATING_LABELS: &[&str] = &["Good", "Very Good", "Great", "Excellent", "Masterpiece"];

    /// `(source column, labels)`; the target column is `<source>_category`.
    pub const RANKED_COLUMNS: &[(&str, &[&str])] = &[
        ("box_office", BOX_OFFICE_LABELS),
        ("Year", YEAR_LABELS),
        ("duration_mins", RUNTIME_LABELS),
        ("imdbRating", RATING_LABELS),
    ];
}
