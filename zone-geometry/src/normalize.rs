use serde::{Deserialize, Serialize};

use crate::clamp::clamp_zone;
use crate::overlap::overlap_ratio;
use crate::reposition::reposition;
use crate::units::Canvas;
use crate::zone::Zone;

pub const DEFAULT_MIN_ZONE_DIMENSION: f64 = 50.0;
pub const DEFAULT_MAX_OVERLAP: f64 = 0.30;
pub const DEFAULT_REPOSITION_MAX_OVERLAP: f64 = 0.20;

/// Order in which zones claim space. Earlier zones keep their position; later ones yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceOrder {
    /// First zone in the input wins
    #[default]
    InputOrder,
    /// Biggest (clamped) zone wins; equal areas keep input order
    LargestAreaFirst,
}

impl AcceptanceOrder {
    fn processing_order(&self, zones: &[Zone]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..zones.len()).collect();
        if let AcceptanceOrder::LargestAreaFirst = self {
            // sort_by is stable, so ties stay in input order
            order.sort_by(|&a, &b| {
                zones[b]
                    .rect()
                    .area()
                    .total_cmp(&zones[a].rect().area())
            });
        }
        order
    }
}

/// Tunables for [`normalize_zones`]. Every field has a default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Width/height floor in centimeters
    pub min_zone_dimension: f64,
    /// Overlap ratio above which a zone must move
    pub max_overlap: f64,
    /// Overlap ratio a repositioned zone must get down to
    pub reposition_max_overlap: f64,
    pub acceptance_order: AcceptanceOrder,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            min_zone_dimension: DEFAULT_MIN_ZONE_DIMENSION,
            max_overlap: DEFAULT_MAX_OVERLAP,
            reposition_max_overlap: DEFAULT_REPOSITION_MAX_OVERLAP,
            acceptance_order: AcceptanceOrder::InputOrder,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneOutcome {
    Accepted,
    Repositioned,
    Dropped,
}

/// What happened to each input zone, keyed by `zone_id`, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizeReport {
    pub accepted: Vec<String>,
    pub repositioned: Vec<String>,
    pub dropped: Vec<String>,
}

impl NormalizeReport {
    fn record(&mut self, zone_id: &str, outcome: ZoneOutcome) {
        let bucket = match outcome {
            ZoneOutcome::Accepted => &mut self.accepted,
            ZoneOutcome::Repositioned => &mut self.repositioned,
            ZoneOutcome::Dropped => &mut self.dropped,
        };
        bucket.push(zone_id.to_string());
    }

    pub fn outcome_of(&self, zone_id: &str) -> Option<ZoneOutcome> {
        if self.accepted.iter().any(|id| id == zone_id) {
            Some(ZoneOutcome::Accepted)
        } else if self.repositioned.iter().any(|id| id == zone_id) {
            Some(ZoneOutcome::Repositioned)
        } else if self.dropped.iter().any(|id| id == zone_id) {
            Some(ZoneOutcome::Dropped)
        } else {
            None
        }
    }

    /// True when nothing had to move or be dropped
    pub fn is_clean(&self) -> bool {
        self.repositioned.is_empty() && self.dropped.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLayout {
    pub zones: Vec<Zone>,
    pub report: NormalizeReport,
}

/// Clamp, de-overlap and bound a zone list. Zones that cannot be placed are omitted.
///
/// See [`normalize_zones_with_report`] to learn which zones were moved or dropped.
pub fn normalize_zones(zones: &[Zone], canvas: &Canvas, config: &NormalizerConfig) -> Vec<Zone> {
    normalize_zones_with_report(zones, canvas, config).zones
}

/// Single greedy pass over the zones in `config.acceptance_order`.
///
/// Each zone is clamped, then compared against every zone already accepted.
/// If none of those cover more than `max_overlap` of it, it is accepted where
/// it is. Otherwise it gets one [`reposition`] attempt at the relaxed
/// threshold and is dropped if that fails. Accepted zones are never revisited.
pub fn normalize_zones_with_report(
    zones: &[Zone],
    canvas: &Canvas,
    config: &NormalizerConfig,
) -> NormalizedLayout {
    let clamped: Vec<Zone> = zones
        .iter()
        .map(|zone| clamp_zone(zone, config.min_zone_dimension, canvas))
        .collect();

    let mut placed: Vec<Zone> = Vec::with_capacity(clamped.len());
    let mut report = NormalizeReport::default();

    for index in config.acceptance_order.processing_order(&clamped) {
        let zone = &clamped[index];
        let rect = zone.rect();

        let conflicts = placed
            .iter()
            .any(|other| overlap_ratio(&rect, &other.rect()) > config.max_overlap);

        if !conflicts {
            report.record(&zone.zone_id, ZoneOutcome::Accepted);
            placed.push(zone.clone());
            continue;
        }

        match reposition(zone, &placed, canvas, config.reposition_max_overlap) {
            Some(moved) => {
                report.record(&zone.zone_id, ZoneOutcome::Repositioned);
                placed.push(moved);
            }
            None => report.record(&zone.zone_id, ZoneOutcome::Dropped),
        }
    }

    NormalizedLayout {
        zones: placed,
        report,
    }
}
