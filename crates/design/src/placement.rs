//! Placement engine
//!
//! All functions are pure: they take the current placement rect and return
//! a corrected copy. The interactive front end calls [`clamp_position`] on
//! drag and [`clamp_scale`] on resize; issuance calls [`is_inside_area`] as
//! the final gate.

use crate::schema::{PlacementRules, Rect, Rotation, Size};

/// Smallest allowed placement width in canvas pixels
pub const MIN_PLACEMENT_PX: f64 = 20.0;

/// Fraction of the engraving area the initial placement fills
const INITIAL_FIT: f64 = 0.9;

/// Compute the default placement for a freshly processed logo
///
/// The logo is scaled uniformly so the larger relative dimension covers
/// 90% of the engraving area, then centered inside it. Scale is not
/// capped at 1.0: a small logo is enlarged to fill the area.
pub fn initial_placement(area: &Rect, base: &Size) -> Rect {
    let scale = f64::min(
        INITIAL_FIT * area.w / base.w,
        INITIAL_FIT * area.h / base.h,
    );
    let w = base.w * scale;
    let h = base.h * scale;
    Rect {
        x: area.x + (area.w - w) / 2.0,
        y: area.y + (area.h - h) / 2.0,
        w,
        h,
    }
}

/// Clamp a placement's position so it stays inside the engraving area
///
/// Only `x` and `y` change; width and height pass through untouched. Each
/// axis clamps independently to `[area origin, area end - extent]`. When
/// the rect is larger than the area the lower bound wins and the rect
/// pins to the area origin on that axis.
pub fn clamp_position(rect: &Rect, area: &Rect) -> Rect {
    Rect {
        x: clamp_axis(rect.x, area.x, area.x + area.w - rect.w),
        y: clamp_axis(rect.y, area.y, area.y + area.h - rect.h),
        w: rect.w,
        h: rect.h,
    }
}

fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    // min wins over max so an oversized rect pins to the area origin
    f64::max(min, f64::min(value, max))
}

/// Clamp a placement's size to the template's scale limits
///
/// Width is bounded to
/// `[max(MIN_PLACEMENT_PX, base.w * min_scale), min(area.w, base.w * max_scale)]`
/// and height is always re-derived from the clamped width using the base
/// aspect ratio, so a degenerate drag can never skew the logo. Position is
/// untouched; callers re-run [`clamp_position`] afterwards if needed.
pub fn clamp_scale(rect: &Rect, base: &Size, rules: &PlacementRules, area: &Rect) -> Rect {
    let min_w = f64::max(MIN_PLACEMENT_PX, base.w * rules.min_scale);
    let max_w = f64::min(area.w, base.w * rules.max_scale);
    let w = clamp_axis(rect.w, min_w, max_w);
    Rect {
        x: rect.x,
        y: rect.y,
        w,
        h: w * base.h / base.w,
    }
}

/// Base logo size as seen on the canvas after rotation
///
/// A quarter turn swaps the visual footprint, so the scale bounds and the
/// initial fit must work against the swapped dimensions.
pub fn effective_base_size(base: &Size, rotation: Rotation) -> Size {
    if rotation.is_sideways() {
        Size {
            w: base.h,
            h: base.w,
        }
    } else {
        *base
    }
}

/// Whether a placement lies entirely inside the engraving area
///
/// Issuance gate for templates with `keepInsideEngravingArea` set.
pub fn is_inside_area(rect: &Rect, area: &Rect) -> bool {
    rect.x >= area.x
        && rect.y >= area.y
        && rect.x + rect.w <= area.x + area.w
        && rect.y + rect.h <= area.y + area.h
}
