use crate::zone::Rect;

/// Area of the axis-aligned intersection of `a` and `b`, 0 when disjoint
pub fn intersection_area(a: &Rect, b: &Rect) -> f64 {
    let overlap_w = (a.right().min(b.right()) - a.x.max(b.x)).max(0.0);
    let overlap_h = (a.bottom().min(b.bottom()) - a.y.max(b.y)).max(0.0);
    overlap_w * overlap_h
}

/// Fraction of `a`'s area covered by `b`.
///
/// Asymmetric on purpose: the denominator is always `a`, so
/// `overlap_ratio(a, b)` and `overlap_ratio(b, a)` differ when the areas differ.
/// A zero-area `a` reports 0.
pub fn overlap_ratio(a: &Rect, b: &Rect) -> f64 {
    let area = a.area();
    if area <= 0.0 {
        return 0.0;
    }
    intersection_area(a, b) / area
}

/// Largest [`overlap_ratio`] of `rect` against any of `others`; 0 for none
pub fn max_overlap_against<I>(rect: &Rect, others: I) -> f64
where
    I: IntoIterator<Item = Rect>,
{
    others
        .into_iter()
        .map(|other| overlap_ratio(rect, &other))
        .fold(0.0, f64::max)
}
