use serde::{Deserialize, Serialize};

use crate::units::{percent_to_cm, Canvas};
use crate::zone::{Rect, Zone};

/// Built-in starting layouts, expressed in percent of the floor plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutTemplate {
    Studio,
    OneBedroom,
    TwoBedroom,
}

struct TemplateZone {
    zone_id: &'static str,
    name: &'static str,
    kind: &'static str,
    /// x, y, w, h in percent
    pct: [f64; 4],
    furniture: &'static [&'static str],
}

const STUDIO: &[TemplateZone] = &[
    TemplateZone {
        zone_id: "living",
        name: "Living Area",
        kind: "living",
        pct: [0.0, 0.0, 60.0, 60.0],
        furniture: &["sofa", "coffee_table", "tv_stand"],
    },
    TemplateZone {
        zone_id: "sleeping",
        name: "Sleeping Area",
        kind: "bedroom",
        pct: [60.0, 0.0, 40.0, 60.0],
        furniture: &["bed", "nightstand"],
    },
    TemplateZone {
        zone_id: "kitchen",
        name: "Kitchen",
        kind: "kitchen",
        pct: [0.0, 60.0, 50.0, 40.0],
        furniture: &["dining_table", "chair", "chair"],
    },
    TemplateZone {
        zone_id: "bathroom",
        name: "Bathroom",
        kind: "bathroom",
        pct: [50.0, 60.0, 50.0, 40.0],
        furniture: &["toilet", "sink", "shower"],
    },
];

const ONE_BEDROOM: &[TemplateZone] = &[
    TemplateZone {
        zone_id: "living",
        name: "Living Room",
        kind: "living",
        pct: [0.0, 0.0, 55.0, 55.0],
        furniture: &["sofa", "armchair", "coffee_table", "tv_stand"],
    },
    TemplateZone {
        zone_id: "kitchen",
        name: "Kitchen",
        kind: "kitchen",
        pct: [55.0, 0.0, 45.0, 35.0],
        furniture: &["kitchen_island"],
    },
    TemplateZone {
        zone_id: "dining",
        name: "Dining",
        kind: "dining",
        pct: [55.0, 35.0, 45.0, 20.0],
        furniture: &["dining_table"],
    },
    TemplateZone {
        zone_id: "bedroom",
        name: "Bedroom",
        kind: "bedroom",
        pct: [0.0, 55.0, 60.0, 45.0],
        furniture: &["bed", "nightstand", "nightstand", "wardrobe"],
    },
    TemplateZone {
        zone_id: "bathroom",
        name: "Bathroom",
        kind: "bathroom",
        pct: [60.0, 55.0, 40.0, 45.0],
        furniture: &["bathtub", "toilet", "sink"],
    },
];

const TWO_BEDROOM: &[TemplateZone] = &[
    TemplateZone {
        zone_id: "living",
        name: "Living Room",
        kind: "living",
        pct: [0.0, 0.0, 50.0, 50.0],
        furniture: &["sofa", "coffee_table", "tv_stand", "bookshelf"],
    },
    TemplateZone {
        zone_id: "kitchen",
        name: "Kitchen",
        kind: "kitchen",
        pct: [50.0, 0.0, 50.0, 30.0],
        furniture: &["kitchen_island"],
    },
    TemplateZone {
        zone_id: "dining",
        name: "Dining",
        kind: "dining",
        pct: [50.0, 30.0, 50.0, 20.0],
        furniture: &["dining_table"],
    },
    TemplateZone {
        zone_id: "bedroom-1",
        name: "Main Bedroom",
        kind: "bedroom",
        pct: [0.0, 50.0, 35.0, 50.0],
        furniture: &["bed", "nightstand", "wardrobe"],
    },
    TemplateZone {
        zone_id: "bedroom-2",
        name: "Second Bedroom",
        kind: "bedroom",
        pct: [35.0, 50.0, 35.0, 50.0],
        furniture: &["single_bed", "desk", "chair"],
    },
    TemplateZone {
        zone_id: "bathroom",
        name: "Bathroom",
        kind: "bathroom",
        pct: [70.0, 50.0, 30.0, 50.0],
        furniture: &["shower", "toilet", "sink"],
    },
];

impl LayoutTemplate {
    pub const ALL: [LayoutTemplate; 3] = [
        LayoutTemplate::Studio,
        LayoutTemplate::OneBedroom,
        LayoutTemplate::TwoBedroom,
    ];

    fn entries(&self) -> &'static [TemplateZone] {
        match self {
            LayoutTemplate::Studio => STUDIO,
            LayoutTemplate::OneBedroom => ONE_BEDROOM,
            LayoutTemplate::TwoBedroom => TWO_BEDROOM,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LayoutTemplate::Studio => "studio",
            LayoutTemplate::OneBedroom => "one_bedroom",
            LayoutTemplate::TwoBedroom => "two_bedroom",
        }
    }

    /// Template zones in centimeters for the given canvas. Not yet normalized.
    pub fn zones(&self, canvas: &Canvas) -> Vec<Zone> {
        self.entries()
            .iter()
            .map(|entry| {
                let [x, y, w, h] = entry.pct;
                let rect = Rect::new(
                    percent_to_cm(x, canvas.width),
                    percent_to_cm(y, canvas.height),
                    percent_to_cm(w, canvas.width),
                    percent_to_cm(h, canvas.height),
                );
                let mut zone = Zone::new(entry.zone_id, entry.name, entry.kind, rect);
                zone.suggested_furniture =
                    Some(entry.furniture.iter().map(|kind| kind.to_string()).collect());
                zone
            })
            .collect()
    }
}
