use std::collections::BTreeMap;

use crate::zone::{FurnitureItem, Zone};

/// Gap kept between furniture and zone walls, and between neighbouring items (cm)
pub const PLACEMENT_PADDING: f64 = 20.0;

/// Default footprints (width, depth) in centimeters, keyed by furniture type
#[derive(Debug, Clone)]
pub struct FurnitureCatalog {
    footprints: BTreeMap<String, (f64, f64)>,
}

impl Default for FurnitureCatalog {
    fn default() -> Self {
        let entries: [(&str, f64, f64); 17] = [
            ("sofa", 200.0, 90.0),
            ("armchair", 80.0, 80.0),
            ("coffee_table", 100.0, 60.0),
            ("tv_stand", 150.0, 40.0),
            ("bookshelf", 80.0, 30.0),
            ("bed", 160.0, 200.0),
            ("single_bed", 90.0, 200.0),
            ("nightstand", 45.0, 40.0),
            ("wardrobe", 120.0, 60.0),
            ("desk", 120.0, 60.0),
            ("chair", 45.0, 45.0),
            ("dining_table", 160.0, 90.0),
            ("kitchen_island", 180.0, 90.0),
            ("toilet", 40.0, 65.0),
            ("sink", 60.0, 45.0),
            ("bathtub", 170.0, 75.0),
            ("shower", 90.0, 90.0),
        ];
        let mut catalog = Self::empty();
        for (kind, w, h) in entries {
            catalog.insert(kind, w, h);
        }
        catalog
    }
}

impl FurnitureCatalog {
    pub fn empty() -> Self {
        Self {
            footprints: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, kind: &str, w: f64, h: f64) {
        self.footprints.insert(canonical_kind(kind), (w, h));
    }

    /// Footprint for a type name; matching ignores case, spaces and hyphens
    pub fn footprint(&self, kind: &str) -> Option<(f64, f64)> {
        self.footprints.get(&canonical_kind(kind)).copied()
    }
}

fn canonical_kind(kind: &str) -> String {
    kind.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Lay out each zone's suggested furniture in rows from its top-left corner.
///
/// Unknown types and items that no longer fit are skipped. Every placed item
/// is assigned to its zone with `r = 0` and an id of `{zoneId}-{type}-{n}`.
/// Items are not checked against other zones or other items.
pub fn auto_place_furniture(zones: &[Zone], catalog: &FurnitureCatalog) -> Vec<FurnitureItem> {
    let mut items = Vec::new();

    for zone in zones {
        let Some(suggestions) = zone.suggested_furniture.as_ref() else {
            continue;
        };

        let right = zone.x + zone.w - PLACEMENT_PADDING;
        let bottom = zone.y + zone.h - PLACEMENT_PADDING;
        let mut cursor_x = zone.x + PLACEMENT_PADDING;
        let mut cursor_y = zone.y + PLACEMENT_PADDING;
        let mut row_depth: f64 = 0.0;
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();

        for suggestion in suggestions {
            let kind = canonical_kind(suggestion);
            let Some((w, h)) = catalog.footprint(&kind) else {
                continue;
            };

            if cursor_x + w > right && cursor_x > zone.x + PLACEMENT_PADDING {
                cursor_x = zone.x + PLACEMENT_PADDING;
                cursor_y += row_depth + PLACEMENT_PADDING;
                row_depth = 0.0;
            }
            if cursor_x + w > right || cursor_y + h > bottom {
                continue;
            }

            let n = counts.entry(kind.clone()).or_insert(0);
            *n += 1;

            items.push(FurnitureItem {
                id: format!("{}-{}-{}", zone.zone_id, kind, n),
                kind,
                x: cursor_x.round(),
                y: cursor_y.round(),
                w,
                h,
                r: 0.0,
                zone_id: Some(zone.zone_id.clone()),
            });

            cursor_x += w + PLACEMENT_PADDING;
            row_depth = row_depth.max(h);
        }
    }

    items
}
