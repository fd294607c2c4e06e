use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use zone_geometry::{
    auto_place_furniture, meters_to_cm, normalize_zones_with_report, percent_to_cm, Canvas,
    FurnitureCatalog, FurnitureItem, NormalizeReport, NormalizerConfig, Rect, Zone,
};

use crate::schema::{Dimensions, FloorplanAnalysis};

/// Smallest floor plan edge accepted from the model (cm)
pub const MIN_PLAN_CM: f64 = 300.0;
/// Largest floor plan edge accepted from the model (cm)
pub const MAX_PLAN_CM: f64 = 2000.0;

/// Normalized result of importing a vision-model analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedLayout {
    pub canvas: Canvas,
    pub zones: Vec<Zone>,
    pub report: NormalizeReport,
    pub furniture: Vec<FurnitureItem>,
}

/// Plan dimensions (meters) to a working canvas, each axis clamped to 300-2000 cm
pub fn canvas_from_dimensions(dimensions: &Dimensions) -> Canvas {
    Canvas::new(
        meters_to_cm(dimensions.width).clamp(MIN_PLAN_CM, MAX_PLAN_CM),
        meters_to_cm(dimensions.height).clamp(MIN_PLAN_CM, MAX_PLAN_CM),
    )
}

/// Percent geometry to centimeters against the canvas, input order preserved
pub fn zones_to_cm(analysis: &FloorplanAnalysis, canvas: &Canvas) -> Vec<Zone> {
    analysis
        .zones
        .iter()
        .map(|spec| {
            spec.to_zone(Rect::new(
                percent_to_cm(spec.x, canvas.width),
                percent_to_cm(spec.y, canvas.height),
                percent_to_cm(spec.w, canvas.width),
                percent_to_cm(spec.h, canvas.height),
            ))
        })
        .collect()
}

/// Convert, normalize and furnish a validated analysis.
///
/// Zones the normalizer could not place are logged here; the geometry core
/// itself stays silent about them. The reported pixels-per-cm scale only
/// affects rendering; a non-positive scale keeps the canvas default of 1.
pub fn import_analysis(
    analysis: &FloorplanAnalysis,
    config: &NormalizerConfig,
    catalog: &FurnitureCatalog,
) -> ImportedLayout {
    let mut canvas = canvas_from_dimensions(&analysis.dimensions);
    if analysis.scale.is_finite() && analysis.scale > 0.0 {
        canvas = canvas.with_scale(analysis.scale);
    }
    debug!(
        "Plan {}m x {}m mapped to {}cm x {}cm canvas",
        analysis.dimensions.width, analysis.dimensions.height, canvas.width, canvas.height
    );

    let raw_zones = zones_to_cm(analysis, &canvas);
    let layout = normalize_zones_with_report(&raw_zones, &canvas, config);

    if !layout.report.repositioned.is_empty() {
        info!("Repositioned overlapping zones: {:?}", layout.report.repositioned);
    }
    if !layout.report.dropped.is_empty() {
        warn!(
            "Dropped {} zone(s) that could not be placed: {:?}",
            layout.report.dropped.len(),
            layout.report.dropped
        );
    }

    let furniture = auto_place_furniture(&layout.zones, catalog);
    info!(
        "Imported {} of {} zones with {} furniture items",
        layout.zones.len(),
        raw_zones.len(),
        furniture.len()
    );

    ImportedLayout {
        canvas,
        zones: layout.zones,
        report: layout.report,
        furniture,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ZoneSpec;

    fn spec(id: &str, x: f64, y: f64, w: f64, h: f64) -> ZoneSpec {
        ZoneSpec {
            name: id.to_string(),
            zone_id: id.to_string(),
            x,
            y,
            w,
            h,
            kind: "room".to_string(),
            suggested_furniture: None,
        }
    }

    fn analysis(width: f64, height: f64, zones: Vec<ZoneSpec>) -> FloorplanAnalysis {
        FloorplanAnalysis {
            total_area: width * height,
            dimensions: Dimensions { width, height },
            zones,
            scale: 1.0,
        }
    }

    #[test]
    fn test_canvas_window() {
        let canvas = canvas_from_dimensions(&Dimensions { width: 1.5, height: 8.0 });
        assert_eq!((canvas.width, canvas.height), (300.0, 800.0));
        let canvas = canvas_from_dimensions(&Dimensions { width: 45.0, height: 20.0 });
        assert_eq!((canvas.width, canvas.height), (2000.0, 2000.0));
    }

    #[test]
    fn test_zones_to_cm() {
        let analysis = analysis(10.0, 8.0, vec![spec("a", 25.0, 50.0, 50.0, 25.0)]);
        let canvas = canvas_from_dimensions(&analysis.dimensions);
        let zones = zones_to_cm(&analysis, &canvas);
        assert_eq!(zones[0].rect(), Rect::new(250.0, 400.0, 500.0, 200.0));
        assert_eq!(zones[0].zone_id, "a");
    }

    #[test]
    fn test_import_drops_stacked_zone() {
        let analysis = analysis(
            3.0,
            3.0,
            vec![spec("a", 0.0, 0.0, 33.4, 33.4), spec("b", 3.0, 0.0, 33.4, 33.4)],
        );
        let imported = import_analysis(
            &analysis,
            &NormalizerConfig::default(),
            &FurnitureCatalog::default(),
        );
        assert_eq!(imported.zones.len(), 1);
        assert_eq!(imported.report.dropped, vec!["b"]);
    }

    #[test]
    fn test_import_places_suggested_furniture() {
        let mut living = spec("living", 0.0, 0.0, 60.0, 60.0);
        living.suggested_furniture = Some(vec!["sofa".to_string(), "unicorn".to_string()]);
        let analysis = analysis(10.0, 10.0, vec![living]);
        let imported = import_analysis(
            &analysis,
            &NormalizerConfig::default(),
            &FurnitureCatalog::default(),
        );
        assert_eq!(imported.furniture.len(), 1);
        assert_eq!(imported.furniture[0].zone_id.as_deref(), Some("living"));
        assert_eq!(imported.zones[0].rect(), Rect::new(0.0, 0.0, 600.0, 600.0));
    }

    #[test]
    fn test_import_carries_reported_scale() {
        let mut scaled = analysis(5.0, 5.0, vec![spec("a", 0.0, 0.0, 50.0, 50.0)]);
        scaled.scale = 2.0;
        let imported = import_analysis(
            &scaled,
            &NormalizerConfig::default(),
            &FurnitureCatalog::default(),
        );
        assert_eq!(imported.canvas.scale, 2.0);
        assert_eq!(imported.canvas.to_px(&imported.zones[0].rect()).w, 500.0);

        scaled.scale = 0.0;
        let imported = import_analysis(
            &scaled,
            &NormalizerConfig::default(),
            &FurnitureCatalog::default(),
        );
        assert_eq!(imported.canvas.scale, 1.0);
    }
}
