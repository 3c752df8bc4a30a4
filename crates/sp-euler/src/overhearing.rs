//! Building the overhearing complex: the clique complex of the "fields
//! overlap" relation among counting sensors.
//!
//! # Cost
//!
//! Every `(k + 1)`-subset of sensors is examined for each order `k`, so the
//! build is exponential in the worst case (a cluster of mutually overlapping
//! sensors).  Overlap is evaluated once per pair up front; the subset scan
//! only reads the resulting matrix.  [`OverhearingConfig::max_dimension`]
//! caps the ascent for dense deployments.

use tracing::debug;

use sp_core::{SensorId, SpResult};
use sp_sensor::{SensorField, SensorSource};

use crate::{Combinations, SimplicialComplex};

/// Settings for [`OverhearingBuilder`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverhearingConfig {
    /// Highest simplex order to build.  `None` builds the full clique
    /// complex.
    pub max_dimension: Option<usize>,
}

/// Turns a snapshot of sensor fields into an overhearing complex.
#[derive(Clone, Debug, Default)]
pub struct OverhearingBuilder {
    config: OverhearingConfig,
}

impl OverhearingBuilder {
    pub fn new(config: OverhearingConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &OverhearingConfig {
        &self.config
    }

    /// Build from every counting sensor of `source`.
    pub fn from_source<S: SensorSource + ?Sized>(&self, source: &S) -> SpResult<SimplicialComplex> {
        let fields = source
            .counting_sensors()
            .into_iter()
            .map(|id| Ok((id, source.sensor_field(id)?)))
            .collect::<SpResult<Vec<_>>>()?;
        self.build(&fields)
    }

    /// Build from explicit `(sensor, field)` pairs.
    ///
    /// A k-simplex is added for every `k + 1` sensors whose fields overlap
    /// pairwise.  The ascent stops once an order yields fewer than `k + 2`
    /// simplices, since a `(k + 1)`-simplex needs `k + 2` faces.
    ///
    /// # Errors
    /// Any error from [`SensorField::overlaps`], e.g. comparing a ball with a
    /// region.
    pub fn build(&self, fields: &[(SensorId, SensorField)]) -> SpResult<SimplicialComplex> {
        let mut sensors = fields.to_vec();
        sensors.sort_by_key(|&(id, _)| id);
        let n = sensors.len();

        let mut overlap = vec![false; n * n];
        for i in 0..n {
            for j in i + 1..n {
                let o = sensors[i].1.overlaps(&sensors[j].1)?;
                overlap[i * n + j] = o;
                overlap[j * n + i] = o;
            }
        }

        let mut complex = SimplicialComplex::new();
        for &(id, _) in &sensors {
            complex.add_vertex(id);
        }

        let top = match self.config.max_dimension {
            Some(cap) => cap.min(n.saturating_sub(1)),
            None => n.saturating_sub(1),
        };
        for k in 1..=top {
            let mut created = 0;
            for combo in Combinations::new(n, k + 1) {
                let clique = Combinations::new(combo.len(), 2)
                    .all(|pair| overlap[combo[pair[0]] * n + combo[pair[1]]]);
                if clique {
                    let basis: Vec<SensorId> = combo.iter().map(|&i| sensors[i].0).collect();
                    complex.add_simplex(&basis)?;
                    created += 1;
                }
            }
            if created < k + 2 {
                break;
            }
        }

        debug!(
            sensors = n,
            simplices = complex.len(),
            max_order = ?complex.max_order(),
            "overhearing complex built"
        );
        Ok(complex)
    }
}
