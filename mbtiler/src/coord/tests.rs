//! Tests for projection and tile enumeration

use super::*;
use proptest::prelude::*;

/// Sample area used by the command-line defaults.
fn sample_bbox() -> BoundingBox {
    BoundingBox::new(55.397945, 25.291090, 55.402741, 25.292889)
}

fn tiles_at(bbox: BoundingBox, from: u8, to: u8) -> Vec<TileCoord> {
    enumerate_tiles(bbox, ZoomRange::new(from, to).unwrap())
}

#[test]
fn test_round_half_away_from_zero() {
    assert_eq!(round_half_away(1.5), 2.0);
    assert_eq!(round_half_away(2.5), 3.0);
    assert_eq!(round_half_away(1.4), 1.0);
    assert_eq!(round_half_away(-1.5), -2.0);
    assert_eq!(round_half_away(-2.5), -3.0);
    assert_eq!(round_half_away(-1.2), -1.0);
    assert_eq!(round_half_away(0.0), 0.0);
}

#[test]
fn test_zoom_scale_doubles_per_level() {
    let z0 = ZoomScale::for_zoom(0);
    let z1 = ZoomScale::for_zoom(1);

    assert_eq!(z0.origin, 128.0);
    assert_eq!(z1.origin, 256.0);
    assert_eq!(z1.lon_scale, z0.lon_scale * 2.0);
    assert_eq!(z1.lat_scale, z0.lat_scale * 2.0);
}

#[test]
fn test_project_origin_is_world_center() {
    let px = project_pixels(0.0, 0.0, 0);
    assert_eq!(px, PixelCoord { x: 128.0, y: 128.0 });
}

#[test]
fn test_project_world_corners_at_zoom_0() {
    let nw = project_pixels(-180.0, 85.0511287798, 0);
    let se = project_pixels(180.0, -85.0511287798, 0);

    assert_eq!(nw, PixelCoord { x: 0.0, y: 0.0 });
    assert_eq!(se, PixelCoord { x: 256.0, y: 256.0 });
}

#[test]
fn test_poles_are_clamped_to_finite_pixels() {
    let north = project_pixels(0.0, 90.0, 4);
    let south = project_pixels(0.0, -90.0, 4);

    assert!(north.y.is_finite());
    assert!(south.y.is_finite());
    assert!(north.y < 0.0, "clamped pole still projects above the grid");
    assert!(south.y > 4096.0);
}

#[test]
fn test_known_city_tiles() {
    // New York City: 40.7128°N, 74.0060°W
    let nyc = tiles_at(BoundingBox::new(-74.0060, 40.7128, -74.0060, 40.7128), 16, 16);
    assert_eq!(nyc, vec![TileCoord::new(16, 19295, 24640)]);

    // London: 51.5074°N, 0.1278°W
    let london = tiles_at(BoundingBox::new(-0.1278, 51.5074, -0.1278, 51.5074), 10, 10);
    assert_eq!(london, vec![TileCoord::new(10, 511, 340)]);
}

#[test]
fn test_sample_bbox_at_zoom_18() {
    let tiles = tiles_at(sample_bbox(), 18, 18);

    assert_eq!(tiles.len(), 10);
    assert_eq!(tiles.first(), Some(&TileCoord::new(18, 171411, 112025)));
    assert_eq!(tiles.last(), Some(&TileCoord::new(18, 171415, 112026)));
    for tile in &tiles {
        assert!(tile.is_valid(), "{} outside grid", tile);
        assert!((171411..=171415).contains(&tile.col));
        assert!((112025..=112026).contains(&tile.row));
    }
}

#[test]
fn test_degenerate_bbox_yields_single_tile() {
    let tiles = tiles_at(BoundingBox::new(10.0, 10.0, 10.0, 10.0), 10, 10);
    assert_eq!(tiles, vec![TileCoord::new(10, 540, 483)]);
}

#[test]
fn test_zoom_range_count_is_sum_of_levels() {
    let bbox = sample_bbox();
    let per_level: Vec<usize> = (17..=19).map(|z| tiles_at(bbox, z, z).len()).collect();
    assert_eq!(per_level, vec![6, 10, 32]);

    let all = tiles_at(bbox, 17, 19);
    assert_eq!(all.len(), 48);
    assert_eq!(all.len(), per_level.iter().sum::<usize>());

    let projection = Projection::new(bbox, ZoomRange::new(17, 19).unwrap());
    assert_eq!(projection.tile_count(), 48);
}

#[test]
fn test_enumeration_order_zoom_then_column_then_row() {
    let whole_world = BoundingBox::new(-180.0, -85.0511, 180.0, 85.0511);
    let tiles = tiles_at(whole_world, 0, 2);

    assert_eq!(tiles.len(), 1 + 4 + 16);
    assert_eq!(tiles[0], TileCoord::new(0, 0, 0));
    assert_eq!(
        &tiles[1..5],
        &[
            TileCoord::new(1, 0, 0),
            TileCoord::new(1, 0, 1),
            TileCoord::new(1, 1, 0),
            TileCoord::new(1, 1, 1),
        ]
    );

    let mut sorted = tiles.clone();
    sorted.sort();
    assert_eq!(tiles, sorted);
}

#[test]
fn test_eastern_edge_at_antimeridian_is_clipped() {
    // 180° projects exactly onto the grid's right edge (pixel 2048 at z3),
    // i.e. column 8, which does not exist and is dropped.
    let tiles = tiles_at(BoundingBox::new(179.9, 0.0, 180.0, 1.0), 3, 3);
    assert_eq!(tiles, vec![TileCoord::new(3, 7, 3), TileCoord::new(3, 7, 4)]);

    let range = Projection::new(
        BoundingBox::new(179.9, 0.0, 180.0, 1.0),
        ZoomRange::single(3).unwrap(),
    )
    .tile_range(3);
    assert_eq!(range.x_end, 8);
    assert_eq!(range.count(), 2);
}

#[test]
fn test_west_of_antimeridian_truncates_onto_column_zero() {
    // Pixels in (-256, 0) truncate toward zero, so a box just west of -180°
    // still lands on column 0 instead of being dropped.
    let tiles = tiles_at(BoundingBox::new(-190.0, 0.0, -185.0, 1.0), 3, 3);
    assert_eq!(tiles, vec![TileCoord::new(3, 0, 3), TileCoord::new(3, 0, 4)]);
}

#[test]
fn test_box_far_outside_grid_is_empty() {
    let tiles = tiles_at(BoundingBox::new(400.0, 0.0, 500.0, 1.0), 5, 5);
    assert!(tiles.is_empty());
}

#[test]
fn test_huge_box_is_clipped_before_iterating() {
    let projection = Projection::new(
        BoundingBox::new(-1e15, 0.0, 1e15, 1.0),
        ZoomRange::single(0).unwrap(),
    );
    let range = projection.tile_range(0);
    assert!(range.x_start < -1_000_000 && range.x_end > 1_000_000);

    assert_eq!(projection.tile_count(), 1);
    assert_eq!(projection.tiles(), vec![TileCoord::new(0, 0, 0)]);
}

#[test]
fn test_inverted_box_yields_nothing() {
    let tiles = tiles_at(BoundingBox::new(10.0, 10.0, 5.0, 5.0), 8, 8);
    assert!(tiles.is_empty());
}

#[test]
fn test_tms_row_flip() {
    let tile = TileCoord::new(5, 3, 10);
    assert_eq!(tile.tms_row(), 21);
    assert_eq!(flip_row(0, 0), 0);
    assert_eq!(flip_row(1, 0), 1);
}

#[test]
fn test_flip_row_outside_grid_does_not_underflow() {
    assert_eq!(flip_row(2, 10), 0);
    assert_eq!(flip_row(0, u32::MAX), 0);
    assert_eq!(tiles_per_side(64), u64::MAX);
    assert!(!TileCoord::new(2, 0, 4).is_valid());
    assert_eq!(TileCoord::new(2, 0, 4).tms_row(), 0);
}

#[test]
fn test_zoom_range_validation() {
    assert!(ZoomRange::new(3, 5).is_ok());
    assert_eq!(
        ZoomRange::new(6, 5),
        Err(CoordError::InvalidZoomRange { from: 6, to: 5 })
    );
    assert_eq!(
        ZoomRange::new(0, MAX_ZOOM + 1),
        Err(CoordError::InvalidZoom(MAX_ZOOM + 1))
    );
    let range = ZoomRange::new(17, 19).unwrap();
    assert_eq!((range.from(), range.to()), (17, 19));
    assert_eq!(range.levels().collect::<Vec<_>>(), vec![17, 18, 19]);
}

#[test]
fn test_bbox_validation() {
    assert!(sample_bbox().validate().is_ok());
    assert!(BoundingBox::new(1.0, 1.0, 1.0, 1.0).validate().is_ok());
    assert!(matches!(
        BoundingBox::new(2.0, 0.0, 1.0, 1.0).validate(),
        Err(CoordError::InvalidBounds(_))
    ));
    assert!(matches!(
        BoundingBox::new(0.0, 2.0, 1.0, 1.0).validate(),
        Err(CoordError::InvalidBounds(_))
    ));
    assert!(matches!(
        BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0).validate(),
        Err(CoordError::InvalidBounds(_))
    ));
}

#[test]
fn test_bounds_string() {
    assert_eq!(
        sample_bbox().to_bounds_string(),
        "55.397945,25.291090,55.402741,25.292889"
    );
}

prop_compose! {
    fn arb_bbox()(
        lon in -200.0f64..200.0,
        lat in -89.0f64..89.0,
        width in 0.0f64..5.0,
        height in 0.0f64..5.0,
    ) -> BoundingBox {
        BoundingBox::new(lon, lat, lon + width, (lat + height).min(90.0))
    }
}

proptest! {
    /// Property: every enumerated coordinate lies inside the 2^z grid.
    #[test]
    fn prop_tiles_within_grid(bbox in arb_bbox(), zoom in 0u8..=12) {
        for tile in tiles_at(bbox, zoom, zoom) {
            let side = tiles_per_side(tile.zoom);
            prop_assert!(u64::from(tile.col) < side);
            prop_assert!(u64::from(tile.row) < side);
        }
    }

    /// Property: enlarging a box never removes tiles.
    #[test]
    fn prop_enlarging_bbox_is_monotonic(
        bbox in arb_bbox(),
        grow in 0.0f64..3.0,
        zoom in 0u8..=10,
    ) {
        // Latitudes past the poles fold back under sin(), so stay within them.
        let larger = BoundingBox::new(
            bbox.min_lon - grow,
            (bbox.min_lat - grow).max(-90.0),
            bbox.max_lon + grow,
            (bbox.max_lat + grow).min(90.0),
        );
        let small = tiles_at(bbox, zoom, zoom);
        let large = tiles_at(larger, zoom, zoom);
        for tile in &small {
            prop_assert!(large.contains(tile), "{} missing after enlarging", tile);
        }
    }

    /// Property: projection is a pure function.
    #[test]
    fn prop_projection_is_deterministic(
        lon in -180.0f64..180.0,
        lat in -90.0f64..90.0,
        zoom in 0u8..=MAX_ZOOM,
    ) {
        prop_assert_eq!(project_pixels(lon, lat, zoom), project_pixels(lon, lat, zoom));
    }

    /// Property: flipping a row twice returns the original row.
    #[test]
    fn prop_row_flip_is_involution(zoom in 0u8..=MAX_ZOOM, seed in any::<u32>()) {
        let row = (u64::from(seed) % tiles_per_side(zoom)) as u32;
        prop_assert_eq!(flip_row(zoom, flip_row(zoom, row)), row);
    }

    /// Property: the counted size matches the enumerated size.
    #[test]
    fn prop_tile_count_matches_enumeration(bbox in arb_bbox(), from in 0u8..=6, extra in 0u8..=3) {
        let projection = Projection::new(bbox, ZoomRange::new(from, from + extra).unwrap());
        prop_assert_eq!(projection.tile_count(), projection.tiles().len());
    }
}
