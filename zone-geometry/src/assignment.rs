use crate::units::px_to_cm;
use crate::zone::{FurnitureItem, Zone};

/// First zone, in list order, whose rectangle contains the point (edges inclusive)
pub fn find_zone_at_position(x_cm: f64, y_cm: f64, zones: &[Zone]) -> Option<&Zone> {
    zones.iter().find(|zone| zone.rect().contains_point(x_cm, y_cm))
}

/// Screen pixels to centimeters, then [`find_zone_at_position`].
/// A non-positive scale maps every point to the origin.
pub fn screen_to_zone(screen_x: f64, screen_y: f64, scale: f64, zones: &[Zone]) -> Option<&Zone> {
    find_zone_at_position(px_to_cm(screen_x, scale), px_to_cm(screen_y, scale), zones)
}

/// Result of dropping `item` at a point in centimeters.
///
/// The drop point becomes the item's center (rounded to whole centimeters) and
/// `zone_id` follows whichever zone contains the drop point, cleared if none.
/// Zones are never modified and no overlap resolution is applied.
pub fn drop_item(item: &FurnitureItem, drop_x: f64, drop_y: f64, zones: &[Zone]) -> FurnitureItem {
    FurnitureItem {
        x: (drop_x - item.w / 2.0).round(),
        y: (drop_y - item.h / 2.0).round(),
        zone_id: find_zone_at_position(drop_x, drop_y, zones).map(|zone| zone.zone_id.clone()),
        ..item.clone()
    }
}

/// Normalize into `[0, 360)` and snap to the nearest multiple of `step`.
/// A non-positive step only normalizes.
pub fn snap_rotation(degrees: f64, step: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    if step.is_nan() || step <= 0.0 {
        return normalized;
    }
    ((normalized / step).round() * step).rem_euclid(360.0)
}
