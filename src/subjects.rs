//! Subject records and the built-in threshold table.

use std::collections::BTreeMap;

/// The fixed audiometric frequency axis, in Hz, low to high.
pub const FREQUENCIES_HZ: [u32; 6] = [250, 500, 1000, 2000, 4000, 8000];

/// One ear's hearing thresholds in dB HL, ordered like [`FREQUENCIES_HZ`].
///
/// The array length makes a series/axis mismatch unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdSeries([f32; 6]);

impl ThresholdSeries {
    pub const LEN: usize = 6;

    pub fn new(values: [f32; Self::LEN]) -> Self {
        Self(values)
    }

    #[inline]
    pub fn values(&self) -> &[f32; Self::LEN] {
        &self.0
    }
}

/// One render request: an identifier plus both ears. Ephemeral, built per
/// request from the table or from operator entry, never persisted.
#[derive(Clone, Debug)]
pub struct SubjectRecord {
    pub id: String,
    pub right: ThresholdSeries,
    pub left: ThresholdSeries,
}

/// Immutable id-to-thresholds mapping, constructed once at startup.
pub struct SubjectTable {
    entries: BTreeMap<String, (ThresholdSeries, ThresholdSeries)>,
}

impl SubjectTable {
    /// The case-series subjects this tool ships with.
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        let mut add = |id: &str, right: [f32; 6], left: [f32; 6]| {
            entries.insert(
                id.to_string(),
                (ThresholdSeries::new(right), ThresholdSeries::new(left)),
            );
        };
        add(
            "II-1",
            [40.0, 45.0, 50.0, 55.0, 55.0, 40.0],
            [40.0, 50.0, 50.0, 55.0, 60.0, 45.0],
        );
        add(
            "II-2",
            [40.0, 50.0, 55.0, 60.0, 60.0, 65.0],
            [45.0, 50.0, 55.0, 55.0, 60.0, 65.0],
        );
        add(
            "II-3",
            [25.0, 30.0, 45.0, 50.0, 50.0, 50.0],
            [35.0, 40.0, 55.0, 55.0, 55.0, 55.0],
        );
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<SubjectRecord> {
        self.entries.get(id).map(|(right, left)| SubjectRecord {
            id: id.to_string(),
            right: *right,
            left: *left,
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
