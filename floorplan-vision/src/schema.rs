use std::collections::HashSet;

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use zone_geometry::{Rect, Zone};

use crate::response::extract_json_from_response;

/// Overall floor plan size in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// One zone as reported by the vision model. Geometry is percent (0-100) of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSpec {
    pub name: String,
    pub zone_id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_furniture: Option<Vec<String>>,
}

impl ZoneSpec {
    /// Same zone with its geometry swapped for centimeter values
    pub fn to_zone(&self, rect: Rect) -> Zone {
        let mut zone = Zone::new(&self.zone_id, &self.name, &self.kind, rect);
        zone.suggested_furniture = self.suggested_furniture.clone();
        zone
    }
}

/// Structured floor plan analysis returned by the vision model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorplanAnalysis {
    pub total_area: f64,
    pub dimensions: Dimensions,
    pub zones: Vec<ZoneSpec>,
    pub scale: f64,
}

impl FloorplanAnalysis {
    /// Checks serde cannot express: finite numbers, positive sizes, unique ids
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.total_area.is_finite() || !self.scale.is_finite() {
            bail!("totalArea and scale must be finite numbers");
        }
        let Dimensions { width, height } = self.dimensions;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            bail!("dimensions must be positive, got {} x {}", width, height);
        }

        let mut seen = HashSet::new();
        for (idx, zone) in self.zones.iter().enumerate() {
            let finite = [zone.x, zone.y, zone.w, zone.h].iter().all(|v| v.is_finite());
            if !finite {
                bail!("zone {} ({}) has non-finite geometry", idx, zone.zone_id);
            }
            if zone.w <= 0.0 || zone.h <= 0.0 {
                bail!(
                    "zone {} ({}) must have positive size, got {} x {}",
                    idx,
                    zone.zone_id,
                    zone.w,
                    zone.h
                );
            }
            if !seen.insert(zone.zone_id.as_str()) {
                bail!("duplicate zoneId '{}'", zone.zone_id);
            }
        }

        Ok(())
    }
}

/// Clean up a raw model reply, deserialize it and validate it
pub fn parse_analysis(content: &str) -> anyhow::Result<FloorplanAnalysis> {
    let json_str = extract_json_from_response(content)?;
    let analysis: FloorplanAnalysis = serde_json::from_str(&json_str)
        .map_err(|e| anyhow!("Failed to parse floor plan analysis: {}. Response: {}", e, json_str))?;
    analysis.validate().context("Floor plan analysis failed validation")?;
    Ok(analysis)
}
