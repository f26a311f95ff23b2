//! The activity-rate formula shared by every team, expertise and daily rate.

use serde::{Deserialize, Serialize};

use crate::sheet::StatusKind;

/// Which allocations count as activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePolicy {
    /// Forecast ("Prévision") half-days are not activity.
    Real,
    /// Forecast half-days count as activity.
    Estimated,
}

/// Absence, interne, unassigned and forecast counters.
///
/// Units are chosen by the caller: days for monthly metrics, headcount for a
/// single half-day slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub absences: f64,
    pub interne: f64,
    pub non_affected: f64,
    pub prevision: f64,
}

impl StatusCounts {
    pub fn add(&mut self, kind: StatusKind, amount: f64) {
        match kind {
            StatusKind::Absence => self.absences += amount,
            StatusKind::Interne => self.interne += amount,
            StatusKind::NonAffected => self.non_affected += amount,
            StatusKind::Prevision => self.prevision += amount,
        }
    }

    /// Field-wise sum.
    pub fn plus(&self, other: &StatusCounts) -> StatusCounts {
        StatusCounts {
            absences: self.absences + other.absences,
            interne: self.interne + other.interne,
            non_affected: self.non_affected + other.non_affected,
            prevision: self.prevision + other.prevision,
        }
    }

    /// Field-wise scaling.
    pub fn scaled(&self, factor: f64) -> StatusCounts {
        StatusCounts {
            absences: self.absences * factor,
            interne: self.interne * factor,
            non_affected: self.non_affected * factor,
            prevision: self.prevision * factor,
        }
    }

    /// Rate inputs against the given capacity.
    pub fn against(&self, capacity: f64) -> RateInputs {
        RateInputs {
            capacity,
            absences: self.absences,
            non_affected: self.non_affected,
            prevision: self.prevision,
        }
    }
}

/// The tuple every rate is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RateInputs {
    pub capacity: f64,
    pub absences: f64,
    pub non_affected: f64,
    pub prevision: f64,
}

impl RateInputs {
    /// Capacity left once absences are removed.
    pub fn real_capacity(&self) -> f64 {
        self.capacity - self.absences
    }

    /// Rate under `policy`, in percent.
    pub fn rate(&self, policy: RatePolicy) -> f64 {
        activity_rate(self, policy)
    }
}

/// `(capacity − absences − non_affected [− prevision]) / (capacity − absences) × 100`,
/// rounded to two decimals.
///
/// Zero when `capacity − absences ≤ 0`. Never NaN or infinite.
pub fn activity_rate(inputs: &RateInputs, policy: RatePolicy) -> f64 {
    let real_capacity = inputs.real_capacity();
    if real_capacity.is_nan() || real_capacity <= 0.0 {
        return 0.0;
    }

    let mut active = real_capacity - inputs.non_affected;
    if policy == RatePolicy::Real {
        active -= inputs.prevision;
    }

    let rate = round2(active / real_capacity * 100.0);
    if rate.is_finite() { rate } else { 0.0 }
}

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean, zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
