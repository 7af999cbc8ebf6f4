//! # Cached Integral Group Module
//!
//! ## Aim
//! One `CollisionGroup` manages the collision-integral values of a named
//! group: a single integral kind (e.g. "Q11") evaluated over a subset of the
//! species pairs. The group recomputes its value vector on every temperature
//! update, either directly through the pair evaluator or, when tabulation is
//! enabled and the temperature falls inside the grid, by linear interpolation
//! in a dense table built lazily on first use.
//!
//! ## Key Properties
//! - the table is built once per group and never invalidated; updates at a
//!   different temperature only rewrite the value vector
//! - at an exact grid node the interpolated value equals the direct
//!   evaluation to floating-point round-off
//! - temperatures outside `[Tmin, Tmax]` fall back to direct evaluation and
//!   leave any built table intact

use log::info;
use nalgebra::{DMatrix, DVector};

use super::collision_pairs::{PairIndex, PairSelection};
use super::transport_api::{PairEvaluator, TransportDbError};
use super::transport_settings::TransportDbSettings;

#[derive(Debug)]
pub struct CollisionGroup {
    kind: String,
    members: PairSelection,
    settings: TransportDbSettings,
    /// members x grid nodes, built lazily on first in-range update
    table: Option<DMatrix<f64>>,
    values: DVector<f64>,
    last_temp: Option<f64>,
}

impl CollisionGroup {
    pub fn new(kind: String, members: PairSelection, settings: &TransportDbSettings) -> Self {
        let n = members.len();
        CollisionGroup {
            kind,
            members,
            settings: settings.clone(),
            table: None,
            values: DVector::zeros(n),
            last_temp: None,
        }
    }

    /// integral kind passed to the pair evaluator
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// number of member pairs
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_tabulated(&self) -> bool {
        self.table.is_some()
    }

    /// Value vector from the most recent `update`, one entry per member pair
    /// in member order.
    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    /// Recomputes the value vector at temperature `t`. Same `t` twice in a
    /// row is served from the last-evaluated snapshot.
    pub fn update(
        &mut self,
        t: f64,
        pairs: &PairIndex,
        evaluator: &dyn PairEvaluator,
    ) -> Result<&DVector<f64>, TransportDbError> {
        if self.last_temp == Some(t) {
            return Ok(&self.values);
        }

        if self.settings.tabulate && t >= self.settings.Tmin && t <= self.settings.Tmax {
            if self.table.is_none() {
                self.table = Some(self.build_table(pairs, evaluator)?);
            }
            self.interpolate(t);
        } else {
            self.evaluate_direct(t, pairs, evaluator)?;
        }

        self.last_temp = Some(t);
        Ok(&self.values)
    }

    fn evaluate_direct(
        &mut self,
        t: f64,
        pairs: &PairIndex,
        evaluator: &dyn PairEvaluator,
    ) -> Result<(), TransportDbError> {
        for (row, k) in self.members.indices().enumerate() {
            let pair = pairs.get(k);
            self.values[row] =
                evaluator
                    .evaluate(pair, &self.kind, t)
                    .map_err(|msg| TransportDbError::EvaluationFailed {
                        kind: self.kind.clone(),
                        i: pair.i,
                        j: pair.j,
                        temp: t,
                        msg,
                    })?;
        }
        Ok(())
    }

    fn build_table(
        &self,
        pairs: &PairIndex,
        evaluator: &dyn PairEvaluator,
    ) -> Result<DMatrix<f64>, TransportDbError> {
        let npoints = self.settings.n_points();
        let n = self.members.len();
        info!(
            "tabulating collision integral group '{}': {} pairs on {} grid nodes in [{}, {}] K",
            self.kind, n, npoints, self.settings.Tmin, self.settings.Tmax
        );

        let mut table = DMatrix::zeros(n, npoints);
        for (row, k) in self.members.indices().enumerate() {
            let pair = pairs.get(k);
            for col in 0..npoints {
                let t = self.settings.Tmin + col as f64 * self.settings.dT;
                table[(row, col)] = evaluator.evaluate(pair, &self.kind, t).map_err(|msg| {
                    TransportDbError::EvaluationFailed {
                        kind: self.kind.clone(),
                        i: pair.i,
                        j: pair.j,
                        temp: t,
                        msg,
                    }
                })?;
            }
        }
        Ok(table)
    }

    /// Linear interpolation between the two bracketing grid nodes. Caller
    /// guarantees the table exists and `t` is in range.
    fn interpolate(&mut self, t: f64) {
        if let Some(table) = &self.table {
            let npoints = self.settings.n_points();
            let pos = (t - self.settings.Tmin) / self.settings.dT;
            let cell = (pos.floor() as usize).min(npoints - 2);
            let w = pos - cell as f64;
            for row in 0..self.values.len() {
                self.values[row] = (1.0 - w) * table[(row, cell)] + w * table[(row, cell + 1)];
            }
        }
    }
}
