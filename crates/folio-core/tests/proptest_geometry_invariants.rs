//! Property-based invariant tests for visible-fraction geometry.
//!
//! 1. Visible fraction is always within [0, 1].
//! 2. Intersection is commutative.
//! 3. An element inside the viewport is fully visible.
//! 4. Scrolling an element entirely past the viewport hides it.
//! 5. Threshold validation accepts exactly (0, 1].

use folio_core::{Rect, Threshold};
use proptest::prelude::*;

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (
        -2000.0f64..2000.0,
        -2000.0f64..2000.0,
        0.0f64..3000.0,
        0.0f64..3000.0,
    )
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn visible_fraction_is_bounded(el in rect_strategy(), viewport in rect_strategy()) {
        let f = el.visible_fraction(&viewport);
        prop_assert!((0.0..=1.0).contains(&f), "fraction {} out of range", f);
    }
}

proptest! {
    #[test]
    fn intersection_commutative(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.intersection_opt(&b), b.intersection_opt(&a));
    }
}

proptest! {
    #[test]
    fn contained_element_is_fully_visible(
        x in 0.0f64..500.0,
        y in 0.0f64..500.0,
        w in 1.0f64..500.0,
        h in 1.0f64..300.0,
    ) {
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let el = Rect::new(x, y, w, h);
        prop_assert_eq!(el.visible_fraction(&viewport), 1.0);
    }
}

proptest! {
    #[test]
    fn element_below_fold_is_hidden(gap in 0.0f64..5000.0, h in 1.0f64..2000.0) {
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let el = Rect::new(0.0, viewport.bottom() + gap, 1000.0, h);
        prop_assert_eq!(el.visible_fraction(&viewport), 0.0);
    }
}

proptest! {
    #[test]
    fn threshold_accepts_exactly_unit_interval(v in -2.0f64..2.0) {
        let ok = Threshold::new(v).is_ok();
        prop_assert_eq!(ok, v > 0.0 && v <= 1.0);
    }
}
