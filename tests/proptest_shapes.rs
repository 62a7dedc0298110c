use marginalia::shapes::{
    deserialize_shapes, json_to_shapes, serialize_shapes, shapes_to_json,
};
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn shape_roundtrip_preserves_order_ids_and_geometry(
        shapes in proptest::collection::vec(proptest_helpers::arb_percent_shape(), 0..16),
        (w, h) in proptest_helpers::arb_dimensions(),
    ) {
        // Treat the generated shapes as absolute pixels on a w x h canvas.
        let percent = serialize_shapes(&shapes, w, h)?;
        let back = deserialize_shapes(&percent, w, h)?;

        prop_assert_eq!(back.len(), shapes.len());
        let eps = proptest_helpers::eps_for(w, h);
        for (orig, restored) in shapes.iter().zip(&back) {
            prop_assert_eq!(&orig.id, &restored.id);
            prop_assert_eq!(&orig.kind, &restored.kind);
            prop_assert!((orig.x - restored.x).abs() <= eps);
            prop_assert!((orig.y - restored.y).abs() <= eps);
            for key in ["w", "h"] {
                match (orig.dimension(key), restored.dimension(key)) {
                    (Some(a), Some(b)) => prop_assert!((a - b).abs() <= eps),
                    (None, None) => {}
                    (a, b) => prop_assert!(false, "dimension {} mismatch: {:?} vs {:?}", key, a, b),
                }
            }
        }
    }

    #[test]
    fn sidecar_roundtrip_is_lossless_enough(
        shapes in proptest::collection::vec(proptest_helpers::arb_percent_shape(), 0..12),
    ) {
        // Percent-space inputs on a 100x100 canvas are their own pixels,
        // which keeps the sidecar's validation range satisfied.
        let json = shapes_to_json(&shapes, 100.0, 100.0).expect("sidecar encode");
        let restored = json_to_shapes(&json).expect("sidecar decode");

        prop_assert_eq!(restored.len(), shapes.len());
        for (orig, back) in shapes.iter().zip(&restored) {
            prop_assert_eq!(&orig.id, &back.id);
            prop_assert!((orig.x - back.x).abs() <= 1e-9);
            prop_assert!((orig.y - back.y).abs() <= 1e-9);
        }
    }

    #[test]
    fn json_to_shapes_is_total(input in "\\PC{0,256}") {
        let _ = json_to_shapes(&input);
    }
}
