use crate::units::Canvas;
use crate::zone::{Rect, Zone};

/// Raise width and height to `min_dimension`. A floor only; oversize stays oversize.
pub fn enforce_min_size(rect: Rect, min_dimension: f64) -> Rect {
    Rect {
        w: if rect.w < min_dimension { min_dimension } else { rect.w },
        h: if rect.h < min_dimension { min_dimension } else { rect.h },
        ..rect
    }
}

/// Keep the rect's bounding box inside the canvas by moving it, never resizing.
/// A rect wider (or taller) than the canvas collapses to 0 on that axis and overflows.
pub fn clamp_position(rect: Rect, canvas: &Canvas) -> Rect {
    Rect {
        x: rect.x.min(canvas.width - rect.w).max(0.0),
        y: rect.y.min(canvas.height - rect.h).max(0.0),
        ..rect
    }
}

/// Minimum-size floor followed by position clamp. Returns a new zone.
pub fn clamp_zone(zone: &Zone, min_dimension: f64, canvas: &Canvas) -> Zone {
    let sized = enforce_min_size(zone.rect(), min_dimension);
    zone.with_rect(clamp_position(sized, canvas))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(x: f64, y: f64, w: f64, h: f64) -> Zone {
        Zone::new("z", "Zone", "living", Rect::new(x, y, w, h))
    }

    #[test]
    fn test_small_zone_grows_to_minimum() {
        let canvas = Canvas::new(300.0, 300.0);
        let clamped = clamp_zone(&zone(0.0, 0.0, 10.0, 10.0), 50.0, &canvas);
        assert_eq!(clamped.rect(), Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_large_zone_is_not_shrunk() {
        let rect = enforce_min_size(Rect::new(0.0, 0.0, 900.0, 60.0), 50.0);
        assert_eq!(rect.w, 900.0);
        assert_eq!(rect.h, 60.0);
    }

    #[test]
    fn test_position_pulled_back_inside() {
        let canvas = Canvas::new(300.0, 300.0);
        let clamped = clamp_zone(&zone(280.0, -20.0, 100.0, 100.0), 50.0, &canvas);
        assert_eq!(clamped.rect(), Rect::new(200.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_growth_near_edge_shifts_position() {
        let canvas = Canvas::new(300.0, 300.0);
        let clamped = clamp_zone(&zone(290.0, 290.0, 5.0, 5.0), 50.0, &canvas);
        assert_eq!(clamped.rect(), Rect::new(250.0, 250.0, 50.0, 50.0));
    }

    #[test]
    fn test_zone_wider_than_canvas_collapses_to_origin() {
        let canvas = Canvas::new(300.0, 300.0);
        let clamped = clamp_zone(&zone(40.0, 10.0, 500.0, 100.0), 50.0, &canvas);
        assert_eq!(clamped.x, 0.0);
        assert_eq!(clamped.w, 500.0);
        assert_eq!(clamped.y, 10.0);
    }

    #[test]
    fn test_clamp_keeps_descriptive_fields() {
        let canvas = Canvas::new(300.0, 300.0);
        let mut original = zone(400.0, 0.0, 100.0, 100.0);
        original.suggested_furniture = Some(vec!["sofa".to_string()]);
        let clamped = clamp_zone(&original, 50.0, &canvas);
        assert_eq!(clamped.zone_id, original.zone_id);
        assert_eq!(clamped.suggested_furniture, original.suggested_furniture);
        assert_eq!(original.x, 400.0);
    }
}
