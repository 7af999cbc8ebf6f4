//! Common error type, collaborator traits and validation helpers for the
//! collision-integral transport core.
//!
//! The two traits are the seams to the outside world: `ThermoState` is the
//! read-only thermodynamic-state collaborator (species set, molar masses,
//! current temperatures) and `PairEvaluator` is the opaque per-pair
//! correlation keyed by an integral kind string. Both are consumed, never
//! produced, by this crate.

use thiserror::Error;

use super::collision_pairs::SpeciesPair;

/// Common error type for the collision database
#[derive(Debug, Error)]
pub enum TransportDbError {
    /// Unrecognized group-name suffix. Recoverable: the caller decides how
    /// to fail, the process is never terminated.
    #[error(
        "Bad collision integral group type: '{suffix}' in group name: '{name}'. \
         Allowed group types are 'ee', 'ei', 'ii' and 'ij'"
    )]
    BadGroupName { name: String, suffix: String },
    #[error("Invalid tabulation settings: {0}")]
    InvalidSettings(String),
    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("Collision integral '{kind}' failed for pair ({i}, {j}) at T = {temp} K: {msg}")]
    EvaluationFailed {
        kind: String,
        i: usize,
        j: usize,
        temp: f64,
        msg: String,
    },
    #[error("Invalid temperature: {0}")]
    InvalidTemperature(f64),
    #[error("Invalid molar mass: {0}")]
    InvalidMolarMass(f64),
    #[error("Missing required data: {0}")]
    MissingData(&'static str),
    #[error("Settings file error: {0}")]
    FileError(String),
}

/// Read-only view of the gas mixture consumed by the collision database.
/// Electrons, when present, occupy species index 0.
#[allow(non_snake_case)]
pub trait ThermoState {
    fn n_species(&self) -> usize;
    fn has_electrons(&self) -> bool;
    fn n_heavy(&self) -> usize {
        self.n_species() - if self.has_electrons() { 1 } else { 0 }
    }
    /// molar mass of species `i`, kg/mol
    fn M(&self, i: usize) -> f64;
    /// heavy-particle temperature, K
    fn T(&self) -> f64;
    /// free-electron temperature, K
    fn Te(&self) -> f64;
}

/// Opaque collision-integral correlation for one species pair. The kind
/// string (e.g. "Q11", "Q22") selects which integral of the pair is meant;
/// its interpretation belongs entirely to the implementor.
pub trait PairEvaluator {
    fn evaluate(&self, pair: &SpeciesPair, kind: &str, t: f64) -> Result<f64, String>;
}

// Any closure of the right shape is an evaluator; keeps test wiring terse.
impl<F> PairEvaluator for F
where
    F: Fn(&SpeciesPair, &str, f64) -> f64,
{
    fn evaluate(&self, pair: &SpeciesPair, kind: &str, t: f64) -> Result<f64, String> {
        Ok(self(pair, kind, t))
    }
}

// Helper functions for validation
pub fn validate_temperature(t: f64) -> Result<(), TransportDbError> {
    if t <= 0.0 {
        Err(TransportDbError::InvalidTemperature(t))
    } else {
        Ok(())
    }
}

pub fn validate_molar_mass(m: f64) -> Result<(), TransportDbError> {
    if m <= 0.0 {
        Err(TransportDbError::InvalidMolarMass(m))
    } else {
        Ok(())
    }
}
