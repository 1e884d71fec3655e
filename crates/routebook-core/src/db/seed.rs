//! Built-in starter taxonomy written on first database creation

use crate::models::Region;

const DEFAULT_REGIONS: &[(&str, &str, &[&str])] = &[
    (
        "1",
        "دهوك",
        &["ملا عيدان", "مالطا", "نوهدرا سنتر", "السياحية", "حي العسكري"],
    ),
    ("2", "دوميز", &["مجمع دوميز 1", "مجمع دوميز 2", "الحي الصناعي"]),
    ("3", "سيميل", &["سيميل سنتر", "كيستي", "شاريا"]),
    ("4", "شيلادزي", &["سنتر", "افرخى", "بازيفى"]),
];

/// Starter regions with their fixed ids
pub fn default_regions() -> Vec<Region> {
    DEFAULT_REGIONS
        .iter()
        .map(|(id, name, subregions)| Region {
            id: id.parse().unwrap_or_default(),
            name: (*name).to_string(),
            subregions: subregions.iter().map(|s| (*s).to_string()).collect(),
        })
        .collect()
}
