//! # Species-Pair Index Module
//!
//! ## Aim
//! Builds the ordered set of all unique species pairs of a gas mixture and
//! precomputes the mass/constant factors that turn raw collision integrals
//! into physically-normalized transport quantities (kinetic theory of gases,
//! Chapman-Enskog formulation; see Hirschfelder, "The Molecular Theory of
//! Gases and Liquids").
//!
//! ## Main Data Structures and Logic
//! - `SpeciesPair`: an unordered pair stored as `(i, j)` with `i <= j`
//! - `PairIndex`: immutable arena of all `n*(n+1)/2` pairs in triangular
//!   enumeration order (outer `i` ascending, inner `j` from `i` ascending);
//!   electrons, when present, occupy species index 0
//! - `PairSelection`: a view into the arena, either a contiguous range or an
//!   explicitly listed index subset (needed for the heavy diagonal, which is
//!   not contiguous in triangular order)
//! - `eta_factors`, `dei_factors`, `dij_factors`: pure functions of the molar
//!   masses and the universal gas constant

use nalgebra::DVector;
use std::f64::consts::PI;

use super::transport_api::ThermoState;

/// Universal gas constant, J/(mol*K)
pub const RU: f64 = 8.314462618;

/// Unique species pair `(i, j)`, `i <= j`, indices into the full species set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesPair {
    pub i: usize,
    pub j: usize,
}

/// All unique species pairs of a mixture in fixed triangular order. Built
/// once at database construction and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PairIndex {
    pairs: Vec<SpeciesPair>,
    n_species: usize,
}

impl PairIndex {
    pub fn build(thermo: &dyn ThermoState) -> Self {
        let ns = thermo.n_species();
        let mut pairs = Vec::with_capacity(ns * (ns + 1) / 2);
        for i in 0..ns {
            for j in i..ns {
                pairs.push(SpeciesPair { i, j });
            }
        }
        PairIndex {
            pairs,
            n_species: ns,
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn n_species(&self) -> usize {
        self.n_species
    }

    pub fn get(&self, k: usize) -> &SpeciesPair {
        &self.pairs[k]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpeciesPair> {
        self.pairs.iter()
    }
}

/// Subset of a `PairIndex`, either a contiguous slice of the triangular
/// order or an explicit list of arena indices. The listed form serves the
/// heavy-diagonal case without copying pairs out of the arena.
#[derive(Debug, Clone)]
pub enum PairSelection {
    Range(std::ops::Range<usize>),
    Listed(Vec<usize>),
}

impl PairSelection {
    pub fn len(&self) -> usize {
        match self {
            PairSelection::Range(r) => r.len(),
            PairSelection::Listed(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Arena indices of the members, in member order.
    pub fn indices(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        match self {
            PairSelection::Range(r) => Box::new(r.clone()),
            PairSelection::Listed(v) => Box::new(v.iter().copied()),
        }
    }
}

/// Viscosity normalization per heavy species: `(5/16)*sqrt(pi*RU*M_i)`.
pub fn eta_factors(thermo: &dyn ThermoState) -> DVector<f64> {
    let ns = thermo.n_species();
    let e = if thermo.has_electrons() { 1 } else { 0 };
    let mut fac = DVector::zeros(ns - e);
    for i in e..ns {
        fac[i - e] = 5.0 / 16.0 * (PI * RU * thermo.M(i)).sqrt();
    }
    fac
}

/// Electron-species diffusion normalization, one entry per species:
/// `(3/16)*sqrt(2*pi*RU/M_e)`, the electron self entry scaled by `2/sqrt(2)`.
/// Empty when the mixture carries no electrons.
pub fn dei_factors(thermo: &dyn ThermoState) -> DVector<f64> {
    if !thermo.has_electrons() {
        return DVector::zeros(0);
    }
    let ns = thermo.n_species();
    let me = thermo.M(0);
    let mut fac = DVector::from_element(ns, 3.0 / 16.0 * (2.0 * PI * RU / me).sqrt());
    fac[0] *= 2.0 / 2.0_f64.sqrt();
    fac
}

/// Heavy-pair diffusion normalization, one entry per heavy pair in
/// triangular order: `(3/16)*sqrt(2*pi*RU*(M_i+M_j)/(M_i*M_j))`.
pub fn dij_factors(thermo: &dyn ThermoState) -> DVector<f64> {
    let ns = thermo.n_species();
    let e = if thermo.has_electrons() { 1 } else { 0 };
    let nh = ns - e;
    let mut fac = DVector::zeros(nh * (nh + 1) / 2);
    let mut index = 0;
    for i in e..ns {
        for j in i..ns {
            let mi = thermo.M(i);
            let mj = thermo.M(j);
            fac[index] = 3.0 / 16.0 * (2.0 * PI * RU * (mi + mj) / (mi * mj)).sqrt();
            index += 1;
        }
    }
    fac
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transport::mixture_state::MixtureState;
    use crate::Transport::transport_api::ThermoState;
    use approx::assert_relative_eq;

    #[test]
    fn test_triangular_enumeration() {
        let state = MixtureState::new(vec![0.028, 0.032, 0.040, 0.004], false).unwrap();
        let index = PairIndex::build(&state);
        assert_eq!(index.len(), 10);
        // non-decreasing (i, j) with i <= j throughout
        let mut prev = (0, 0);
        for pair in index.iter() {
            assert!(pair.i <= pair.j);
            assert!((pair.i, pair.j) >= prev);
            prev = (pair.i, pair.j);
        }
        assert_eq!(*index.get(0), SpeciesPair { i: 0, j: 0 });
        assert_eq!(*index.get(4), SpeciesPair { i: 1, j: 1 });
        assert_eq!(*index.get(9), SpeciesPair { i: 3, j: 3 });
    }

    #[test]
    fn test_pair_count_with_electrons() {
        let state = MixtureState::with_electrons(vec![0.028, 0.032]).unwrap();
        let index = PairIndex::build(&state);
        assert_eq!(index.n_species(), 3);
        assert_eq!(index.len(), 6);
        // electron pairs lead the enumeration
        assert_eq!(*index.get(0), SpeciesPair { i: 0, j: 0 });
        assert_eq!(*index.get(1), SpeciesPair { i: 0, j: 1 });
        assert_eq!(*index.get(2), SpeciesPair { i: 0, j: 2 });
    }

    #[test]
    fn test_selection_views() {
        let range = PairSelection::Range(2..5);
        assert_eq!(range.len(), 3);
        assert_eq!(range.indices().collect::<Vec<_>>(), vec![2, 3, 4]);

        let listed = PairSelection::Listed(vec![3, 5]);
        assert_eq!(listed.len(), 2);
        assert!(!listed.is_empty());
        assert_eq!(listed.indices().collect::<Vec<_>>(), vec![3, 5]);

        assert!(PairSelection::Range(4..4).is_empty());
    }

    #[test]
    fn test_eta_factors() {
        let state = MixtureState::with_electrons(vec![0.028, 0.032]).unwrap();
        let fac = eta_factors(&state);
        assert_eq!(fac.len(), 2);
        assert_relative_eq!(
            fac[0],
            5.0 / 16.0 * (PI * RU * 0.028).sqrt(),
            epsilon = 1e-14
        );
        assert_relative_eq!(
            fac[1],
            5.0 / 16.0 * (PI * RU * 0.032).sqrt(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_dei_factors() {
        let state = MixtureState::with_electrons(vec![0.028, 0.032]).unwrap();
        let me = state.M(0);
        let fac = dei_factors(&state);
        assert_eq!(fac.len(), 3);
        let base = 3.0 / 16.0 * (2.0 * PI * RU / me).sqrt();
        assert_relative_eq!(fac[0], base * 2.0 / 2.0_f64.sqrt(), epsilon = 1e-14);
        assert_relative_eq!(fac[1], base, epsilon = 1e-14);
        assert_relative_eq!(fac[2], base, epsilon = 1e-14);

        let neutral = MixtureState::new(vec![0.028, 0.032], false).unwrap();
        assert_eq!(dei_factors(&neutral).len(), 0);
    }

    #[test]
    fn test_dij_factors() {
        let state = MixtureState::with_electrons(vec![0.028, 0.032]).unwrap();
        let fac = dij_factors(&state);
        // 2 heavy species -> 3 heavy pairs
        assert_eq!(fac.len(), 3);
        let f = |mi: f64, mj: f64| 3.0 / 16.0 * (2.0 * PI * RU * (mi + mj) / (mi * mj)).sqrt();
        assert_relative_eq!(fac[0], f(0.028, 0.028), epsilon = 1e-14);
        assert_relative_eq!(fac[1], f(0.028, 0.032), epsilon = 1e-14);
        assert_relative_eq!(fac[2], f(0.032, 0.032), epsilon = 1e-14);
    }
}
