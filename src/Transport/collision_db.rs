//! # Collision Database Module
//!
//! ## Aim
//! Top-level manager of binary collision-integral data for a multi-species,
//! possibly ionized gas mixture. Builds the species-pair index once, hands
//! out lazily created, cached `CollisionGroup`s addressed by name
//! (`<kind><suffix>`, e.g. "Q11ei"), and combines group values with
//! precomputed mass factors into transport-property numerators for an outer
//! simulation loop.
//!
//! ## Main Data Structures and Logic
//! - `GroupKind`: physical category parsed from the 2-character group-name
//!   suffix: electron-electron (`ee`), electron-ion/neutral (`ei`), heavy
//!   self-pairs (`ii`), heavy cross-pairs (`ij`)
//! - `CollisionDatabase`: owns the pair index, the tabulation settings, the
//!   name-keyed group cache and the factor arrays; temperatures are read
//!   from the `ThermoState` collaborator on every access (electron
//!   temperature for `ee`/`ei` groups, heavy temperature otherwise)
//!
//! ## Usage
//! ```rust, ignore
//! let state = MixtureState::with_electrons(vec![0.028, 0.032])?;
//! let mut db = CollisionDatabase::new(
//!     TransportDbSettings::new(), &state,
//!     Box::new(|pair: &SpeciesPair, kind: &str, t: f64| correlation(pair, kind, t)))?;
//! let eta = db.etai(&state)?;
//! ```

use log::info;
use nalgebra::DVector;
use prettytable::{Cell, Row, Table};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::collision_group::CollisionGroup;
use super::collision_pairs::{self, PairIndex, PairSelection};
use super::transport_api::{PairEvaluator, ThermoState, TransportDbError};
use super::transport_settings::TransportDbSettings;

/// Physical category of a named integral group, classified from the last
/// two characters of the group name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    EE,
    EI,
    II,
    IJ,
}

impl GroupKind {
    pub fn classify(name: &str) -> Option<GroupKind> {
        let bytes = name.as_bytes();
        if bytes.len() < 2 {
            return None;
        }
        match &bytes[bytes.len() - 2..] {
            b"ee" => Some(GroupKind::EE),
            b"ei" => Some(GroupKind::EI),
            b"ii" => Some(GroupKind::II),
            b"ij" => Some(GroupKind::IJ),
            _ => None,
        }
    }

    /// groups evaluated at the electron temperature rather than the heavy one
    pub fn is_electron(&self) -> bool {
        matches!(self, GroupKind::EE | GroupKind::EI)
    }
}

/// Splits a group name into the integral kind prefix and its category.
fn split_group_name(name: &str) -> Result<(&str, GroupKind), TransportDbError> {
    match GroupKind::classify(name) {
        // suffix matched, so the last two bytes are ASCII and the cut is safe
        Some(kind) => Ok((&name[..name.len() - 2], kind)),
        None => {
            let cut = name
                .char_indices()
                .rev()
                .nth(1)
                .map(|(k, _)| k)
                .unwrap_or(0);
            Err(TransportDbError::BadGroupName {
                name: name.to_string(),
                suffix: name[cut..].to_string(),
            })
        }
    }
}

/// Member subset of the pair index for one category. The heavy diagonal is
/// not contiguous in triangular order, so `II` materializes an index list.
fn selection_for(kind: GroupKind, ns: usize, e: usize) -> PairSelection {
    let k = e * ns;
    match kind {
        GroupKind::EE => PairSelection::Range(0..e),
        GroupKind::EI => PairSelection::Range(0..k),
        GroupKind::IJ => PairSelection::Range(k..ns * (ns + 1) / 2),
        GroupKind::II => {
            let nh = ns - e;
            let mut diag = Vec::with_capacity(nh);
            let mut index = k;
            for i in 0..nh {
                diag.push(index);
                index += nh - i;
            }
            PairSelection::Listed(diag)
        }
    }
}

pub struct CollisionDatabase {
    settings: TransportDbSettings,
    pairs: PairIndex,
    groups: HashMap<String, CollisionGroup>,
    evaluator: Box<dyn PairEvaluator>,
    etafac: DVector<f64>,
    deifac: DVector<f64>,
    dijfac: DVector<f64>,
    n_species: usize,
    e: usize,
}

impl CollisionDatabase {
    /// Builds the pair index and factor arrays for the mixture described by
    /// `thermo`. Settings violations abort construction.
    pub fn new(
        settings: TransportDbSettings,
        thermo: &dyn ThermoState,
        evaluator: Box<dyn PairEvaluator>,
    ) -> Result<Self, TransportDbError> {
        settings.validate()?;

        let pairs = PairIndex::build(thermo);
        let etafac = collision_pairs::eta_factors(thermo);
        let deifac = collision_pairs::dei_factors(thermo);
        let dijfac = collision_pairs::dij_factors(thermo);
        let n_species = thermo.n_species();
        let e = if thermo.has_electrons() { 1 } else { 0 };

        info!(
            "collision database: {} species ({} heavy), {} pairs, tabulation {}",
            n_species,
            n_species - e,
            pairs.len(),
            if settings.tabulate { "on" } else { "off" }
        );

        Ok(CollisionDatabase {
            settings,
            pairs,
            groups: HashMap::new(),
            evaluator,
            etafac,
            deifac,
            dijfac,
            n_species,
            e,
        })
    }

    /// Convenience constructor reading the settings from a JSON file.
    pub fn from_settings_file(
        file_name: &str,
        thermo: &dyn ThermoState,
        evaluator: Box<dyn PairEvaluator>,
    ) -> Result<Self, TransportDbError> {
        let settings = TransportDbSettings::from_file(file_name)?;
        Self::new(settings, thermo, evaluator)
    }

    pub fn settings(&self) -> &TransportDbSettings {
        &self.settings
    }

    pub fn n_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// number of groups created so far
    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    /// Returns the named group, freshly evaluated at the temperature of its
    /// category. The cache entry is created on first use and its identity is
    /// stable across calls; re-borrowing through `&mut self` makes the
    /// in-place refresh explicit to the caller.
    pub fn group(
        &mut self,
        name: &str,
        thermo: &dyn ThermoState,
    ) -> Result<&CollisionGroup, TransportDbError> {
        let (kind, gtype) = split_group_name(name)?;
        let temp = if gtype.is_electron() {
            thermo.Te()
        } else {
            thermo.T()
        };

        let group = match self.groups.entry(name.to_owned()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let members = selection_for(gtype, self.n_species, self.e);
                info!(
                    "creating collision integral group '{}' with {} pairs",
                    name,
                    members.len()
                );
                entry.insert(CollisionGroup::new(
                    kind.to_owned(),
                    members,
                    &self.settings,
                ))
            }
        };
        group.update(temp, &self.pairs, self.evaluator.as_ref())?;
        Ok(group)
    }

    fn q(&mut self, name: &str, thermo: &dyn ThermoState) -> Result<DVector<f64>, TransportDbError> {
        Ok(self.group(name, thermo)?.values().clone())
    }

    /// Single-species viscosity numerators over the heavy species:
    /// `sqrt(T) * etafac / Q22ii`.
    #[allow(non_snake_case)]
    pub fn etai(&mut self, thermo: &dyn ThermoState) -> Result<DVector<f64>, TransportDbError> {
        let q22 = self.q("Q22ii", thermo)?;
        Ok(self.etafac.scale(thermo.T().sqrt()).component_div(&q22))
    }

    /// Electron-species diffusion numerators over all species:
    /// `sqrt(Te) * Deifac / Q11ei`. Empty without electrons.
    #[allow(non_snake_case)]
    pub fn nDei(&mut self, thermo: &dyn ThermoState) -> Result<DVector<f64>, TransportDbError> {
        if self.e == 0 {
            return Ok(DVector::zeros(0));
        }
        let q11 = self.q("Q11ei", thermo)?;
        Ok(self.deifac.scale(thermo.Te().sqrt()).component_div(&q11))
    }

    /// Heavy-pair diffusion numerators over the heavy pairs in triangular
    /// order: `sqrt(T) * Dijfac / Q11ij`.
    #[allow(non_snake_case)]
    pub fn nDij(&mut self, thermo: &dyn ThermoState) -> Result<DVector<f64>, TransportDbError> {
        let q11 = self.q("Q11ij", thermo)?;
        Ok(self.dijfac.scale(thermo.T().sqrt()).component_div(&q11))
    }

    /// Effective mixture diffusion coefficients. Not implemented: always the
    /// zero vector of length `n_species`, kept as an explicit stub so that a
    /// future completion is a visible behavior change.
    #[allow(non_snake_case)]
    pub fn Dim(&self) -> DVector<f64> {
        DVector::zeros(self.n_species)
    }

    /// Prints a table of the cached groups to stdout.
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("group"),
            Cell::new("kind"),
            Cell::new("pairs"),
            Cell::new("tabulated"),
        ]));
        for (name, group) in &self.groups {
            table.add_row(Row::new(vec![
                Cell::new(name),
                Cell::new(group.kind()),
                Cell::new(&group.size().to_string()),
                Cell::new(if group.is_tabulated() { "yes" } else { "no" }),
            ]));
        }
        table.printstd();
    }
}

impl std::fmt::Debug for CollisionDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionDatabase")
            .field("settings", &self.settings)
            .field("n_species", &self.n_species)
            .field("e", &self.e)
            .field("n_pairs", &self.pairs.len())
            .field("groups", &self.groups.keys().collect::<Vec<_>>())
            .field("evaluator", &"<evaluator>")
            .finish_non_exhaustive()
    }
}
