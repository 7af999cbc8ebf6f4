//! Minimal owned implementation of the thermodynamic-state collaborator:
//! species molar masses (electron slot 0 when present) plus the current
//! heavy and electron temperatures. Real simulations plug their own state
//! object in through the `ThermoState` trait; this one covers tests and
//! simple callers.

use super::transport_api::{ThermoState, TransportDbError, validate_molar_mass,
    validate_temperature};

/// Electron molar mass, kg/mol
pub const ELECTRON_MOLAR_MASS: f64 = 5.48579909e-7;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureState {
    molar_masses: Vec<f64>,
    has_electrons: bool,
    T: f64,
    Te: f64,
}

impl MixtureState {
    /// `molar_masses` in kg/mol; when `has_electrons` is set, index 0 must
    /// be the electron. Temperatures start at 300 K in thermal equilibrium.
    pub fn new(molar_masses: Vec<f64>, has_electrons: bool) -> Result<Self, TransportDbError> {
        if molar_masses.is_empty() {
            return Err(TransportDbError::MissingData("species molar masses"));
        }
        for &m in &molar_masses {
            validate_molar_mass(m)?;
        }
        Ok(MixtureState {
            molar_masses,
            has_electrons,
            T: 300.0,
            Te: 300.0,
        })
    }

    /// Ionized mixture: prepends the electron to the heavy species.
    pub fn with_electrons(heavy_masses: Vec<f64>) -> Result<Self, TransportDbError> {
        let mut molar_masses = vec![ELECTRON_MOLAR_MASS];
        molar_masses.extend(heavy_masses);
        MixtureState::new(molar_masses, true)
    }

    /// Sets both temperatures (thermal equilibrium).
    pub fn set_temperature(&mut self, t: f64) -> Result<(), TransportDbError> {
        validate_temperature(t)?;
        self.T = t;
        self.Te = t;
        Ok(())
    }

    /// Overrides the electron temperature (two-temperature model).
    pub fn set_electron_temperature(&mut self, te: f64) -> Result<(), TransportDbError> {
        validate_temperature(te)?;
        self.Te = te;
        Ok(())
    }
}

impl ThermoState for MixtureState {
    fn n_species(&self) -> usize {
        self.molar_masses.len()
    }

    fn has_electrons(&self) -> bool {
        self.has_electrons
    }

    fn M(&self, i: usize) -> f64 {
        self.molar_masses[i]
    }

    fn T(&self) -> f64 {
        self.T
    }

    fn Te(&self) -> f64 {
        self.Te
    }
}
