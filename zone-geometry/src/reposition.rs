use crate::clamp::clamp_position;
use crate::overlap::max_overlap_against;
use crate::units::Canvas;
use crate::zone::Zone;

/// Candidate nudges in centimeters, tried in this order:
/// right, left, down, up, down-right, up-left.
pub const CANDIDATE_OFFSETS: [(f64, f64); 6] = [
    (50.0, 0.0),
    (-50.0, 0.0),
    (0.0, 50.0),
    (0.0, -50.0),
    (30.0, 30.0),
    (-30.0, -30.0),
];

/// Try each candidate offset from the zone's current position and return the
/// first one whose worst overlap against `placed` is at most `max_overlap`.
///
/// Candidates are clamped to the canvas on position only; size is untouched.
/// `None` means the zone cannot be placed and should be dropped.
pub fn reposition(
    zone: &Zone,
    placed: &[Zone],
    canvas: &Canvas,
    max_overlap: f64,
) -> Option<Zone> {
    let origin = zone.rect();

    CANDIDATE_OFFSETS.iter().find_map(|&(dx, dy)| {
        let candidate = clamp_position(origin.translated(dx, dy), canvas);
        let worst = max_overlap_against(&candidate, placed.iter().map(Zone::rect));
        (worst <= max_overlap).then(|| zone.with_rect(candidate))
    })
}
