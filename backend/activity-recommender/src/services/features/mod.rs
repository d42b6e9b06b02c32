//! Activity Feature Module
//!
//! Builds the per-activity feature matrix used by similarity ranking.
//!
//! Layout: [owner_encoded, is_public, age_days]
//!
//! Each column is standardized over the whole catalogue with the population
//! standard deviation. Constant columns standardize to all zeros.

use super::{RecommendError, Result};
use crate::models::Activity;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use std::collections::HashMap;
use tracing::debug;

/// Number of feature columns
pub const FEATURE_DIM: usize = 3;

pub const COL_OWNER: usize = 0;
pub const COL_PUBLIC: usize = 1;
pub const COL_AGE: usize = 2;

/// Columns with a standard deviation below this are treated as constant
const STD_EPSILON: f64 = 1e-12;

/// Features for every activity in a catalogue snapshot, row-aligned with the
/// input slice.
#[derive(Debug, Clone)]
pub struct ActivityFeatures {
    pub created_at: Vec<DateTime<Utc>>,
    pub age_days: Vec<i64>,
    pub owner_encoded: Vec<usize>,
    pub normalized: Array2<f64>,
    /// activity id -> first row carrying that id
    row_index: HashMap<String, usize>,
}

impl ActivityFeatures {
    pub fn len(&self) -> usize {
        self.age_days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.age_days.is_empty()
    }

    pub fn row_of(&self, activity_id: &str) -> Option<usize> {
        self.row_index.get(activity_id).copied()
    }

    pub fn normalized_row(&self, row: usize) -> ArrayView1<'_, f64> {
        self.normalized.row(row)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureBuilder;

impl FeatureBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, activities: &[Activity]) -> Result<ActivityFeatures> {
        if activities.is_empty() {
            return Err(RecommendError::EmptyCatalogue);
        }

        let created_at = activities
            .iter()
            .map(|activity| {
                parse_timestamp(&activity.created_at).ok_or_else(|| {
                    RecommendError::InvalidTimestamp {
                        activity_id: activity.id.clone(),
                        value: activity.created_at.clone(),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // Non-empty, checked above
        let latest = created_at.iter().max().copied().unwrap_or_else(Utc::now);
        let age_days: Vec<i64> = created_at
            .iter()
            .map(|ts| (latest - *ts).num_days())
            .collect();

        let owner_encoded = encode_owners(activities);

        let mut row_index = HashMap::with_capacity(activities.len());
        for (row, activity) in activities.iter().enumerate() {
            row_index.entry(activity.id.clone()).or_insert(row);
        }

        let raw = Array2::from_shape_fn((activities.len(), FEATURE_DIM), |(row, col)| match col {
            COL_OWNER => owner_encoded[row] as f64,
            COL_PUBLIC => {
                if activities[row].is_public {
                    1.0
                } else {
                    0.0
                }
            }
            _ => age_days[row] as f64,
        });
        let normalized = standardize(&raw);

        debug!(
            activity_count = activities.len(),
            distinct_owners = owner_encoded.iter().max().map_or(0, |max| max + 1),
            latest = %latest,
            "Built activity feature matrix"
        );

        Ok(ActivityFeatures {
            created_at,
            age_days,
            owner_encoded,
            normalized,
            row_index,
        })
    }
}

/// Integer code per distinct owner, assigned in order of first appearance.
fn encode_owners(activities: &[Activity]) -> Vec<usize> {
    let mut codes: HashMap<&str, usize> = HashMap::new();
    activities
        .iter()
        .map(|activity| {
            let next = codes.len();
            *codes.entry(activity.owner_id.as_str()).or_insert(next)
        })
        .collect()
}

/// Column-wise zero mean / unit variance (population std).
pub fn standardize(raw: &Array2<f64>) -> Array2<f64> {
    let mean: Array1<f64> = raw
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(raw.ncols()));
    let std = raw.std_axis(Axis(0), 0.0);

    let mut normalized = raw - &mean;
    for (col, mut column) in normalized.axis_iter_mut(Axis(1)).enumerate() {
        if std[col] < STD_EPSILON {
            column.fill(0.0);
        } else {
            column /= std[col];
        }
    }

    normalized
}

/// Parses the timestamp forms the backend emits (RFC 3339, naive ISO
/// date-times and bare dates). Naive values are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    if let Ok(ts) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
