//! Cross-filter properties, run through both the typed API and the registry.

use pictool_filters::filters::{blur, flip, mono, pixellate, rotate, transpose, vignette};
use pictool_filters::{FilterError, Grid, Params, Registry, Rgba};

/// Deterministic pseudo-random grid.
fn sample_grid(height: usize, width: usize, seed: u32) -> Grid {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        (state >> 24) as u8
    };
    let rows = (0..height)
        .map(|_| {
            (0..width)
                .map(|_| Rgba::new(next(), next(), next(), next()))
                .collect()
        })
        .collect();
    Grid::from_rows(rows).unwrap()
}

const SHAPES: [(usize, usize); 5] = [(1, 1), (1, 4), (3, 1), (4, 7), (6, 6)];

#[test]
fn flip_is_an_involution() {
    for (i, &(h, w)) in SHAPES.iter().enumerate() {
        for vertical in [false, true] {
            let original = sample_grid(h, w, i as u32);
            let mut grid = original.clone();
            flip(&mut grid, vertical).unwrap();
            flip(&mut grid, vertical).unwrap();
            assert_eq!(grid, original, "{h}x{w} vertical={vertical}");
        }
    }
}

#[test]
fn transpose_twice_restores_grid_and_dims() {
    for (i, &(h, w)) in SHAPES.iter().enumerate() {
        let original = sample_grid(h, w, 100 + i as u32);
        let mut grid = original.clone();
        transpose(&mut grid).unwrap();
        assert_eq!(grid.dim(), (w, h));
        transpose(&mut grid).unwrap();
        assert_eq!(grid, original);
    }
}

#[test]
fn four_left_rotations_restore_grid() {
    for (i, &(h, w)) in SHAPES.iter().enumerate() {
        let original = sample_grid(h, w, 200 + i as u32);
        let mut grid = original.clone();
        for turn in 1..=4 {
            rotate(&mut grid, false).unwrap();
            let expected = if turn % 2 == 1 { (w, h) } else { (h, w) };
            assert_eq!(grid.dim(), expected);
        }
        assert_eq!(grid, original);
    }
}

#[test]
fn right_rotation_inverts_left_rotation() {
    for (i, &(h, w)) in SHAPES.iter().enumerate() {
        let original = sample_grid(h, w, 300 + i as u32);
        let mut grid = original.clone();
        rotate(&mut grid, false).unwrap();
        rotate(&mut grid, true).unwrap();
        assert_eq!(grid, original);

        rotate(&mut grid, true).unwrap();
        rotate(&mut grid, false).unwrap();
        assert_eq!(grid, original);
    }
}

#[test]
fn mono_is_idempotent() {
    let mut grid = sample_grid(8, 8, 7);
    mono(&mut grid, false).unwrap();
    let once = grid.clone();
    mono(&mut grid, false).unwrap();
    assert_eq!(grid, once);
}

#[test]
fn blur_keeps_uniform_grid() {
    let fill = Rgba::new(12, 34, 56, 78);
    for radius in [1, 2, 9] {
        let mut grid = Grid::new(4, 5, fill).unwrap();
        blur(&mut grid, radius).unwrap();
        assert_eq!(grid, Grid::new(4, 5, fill).unwrap());
    }
}

#[test]
fn pixellate_step_one_is_identity() {
    let original = sample_grid(5, 3, 11);
    let mut grid = original.clone();
    assert!(pixellate(&mut grid, 1).unwrap());
    assert_eq!(grid, original);
}

#[test]
fn vignette_center_and_corner() {
    let translucent = Rgba::new(240, 120, 60, 200);
    let mut grid = Grid::new(3, 3, translucent).unwrap();
    vignette(&mut grid).unwrap();
    assert_eq!(grid.get(1, 1), Some(&translucent));
    assert_eq!(grid.get(0, 0), Some(&Rgba::new(0, 0, 0, 200)));
}

#[test]
fn invalid_parameters_leave_grid_untouched() {
    let registry = Registry::builtin();
    let original = sample_grid(4, 4, 42);
    let cases = [
        ("blur", Params::new().with("radius", 0)),
        ("blur", Params::new().with("radius", -1)),
        ("pixellate", Params::new().with("step", 0)),
        ("mono", Params::new().with("sepia", 3)),
        ("flip", Params::new().with("vertical", 1)),
        ("rotate", Params::new().with("left", true)),
        ("vignette", Params::new().with("strength", 2)),
    ];

    for (name, params) in cases {
        let mut grid = original.clone();
        let err = registry.apply(name, &mut grid, &params).unwrap_err();
        assert!(
            matches!(err, FilterError::InvalidParameter { .. }),
            "{name}: {err}"
        );
        assert_eq!(grid, original, "{name} mutated the grid");
    }
}

#[test]
fn registry_reports_mutation_flag() {
    let registry = Registry::builtin();
    for name in registry.names() {
        let mut grid = sample_grid(3, 2, 5);
        let modified = registry.apply(name, &mut grid, &Params::new()).unwrap();
        assert_eq!(modified, name != "display", "{name}");
    }
}

#[test]
fn registry_accepts_json_params() {
    let registry = Registry::builtin();
    let params: Params = serde_json::from_str(r#"{"step": 2}"#).unwrap();

    let original = sample_grid(4, 4, 9);
    let mut via_registry = original.clone();
    registry.apply("pixellate", &mut via_registry, &params).unwrap();

    let mut direct = original;
    pixellate(&mut direct, 2).unwrap();
    assert_eq!(via_registry, direct);
}

#[test]
fn string_params_coerced_for_registered_filter() {
    let registry = Registry::builtin();
    let filter = registry.get("rotate").unwrap();
    let params = Params::from_pairs(filter.name(), filter.params(), [("right", "true")]).unwrap();

    let original = sample_grid(2, 5, 3);
    let mut grid = original.clone();
    filter.apply(&mut grid, &params).unwrap();
    assert_eq!(grid.dim(), (5, 2));

    let mut expected = original;
    rotate(&mut expected, true).unwrap();
    assert_eq!(grid, expected);
}
