//! Tests for the distance field.

use approx::assert_abs_diff_eq;

use super::*;
use crate::core::vec3::Vec3;
use crate::error::ProximityError;
use crate::source::{DeformingMesh, FacetField};
use crate::test_support::{facing_plates, grid_facets, grid_positions};

fn plates_field(
    n: usize,
    gap: f64,
    settings: DistanceSettings,
) -> (DeformingMesh, DistanceField, Vec<usize>, Vec<usize>) {
    let (mesh, a, b) = facing_plates(n, gap, false);
    let mut map = DistanceField::with_settings(settings);
    map.set_selection(&mesh, SurfaceSlot::Primary, a.clone()).unwrap();
    map.set_selection(&mesh, SurfaceSlot::Secondary, b.clone()).unwrap();
    (mesh, map, a, b)
}

/// Every corner value written for `facets` at sample 0.
fn corner_values(field: &FacetField, facets: &[usize]) -> Vec<f64> {
    facets
        .iter()
        .flat_map(|&f| field.facet_values(0, f).unwrap().to_vec())
        .collect()
}

#[test]
fn test_default_settings() {
    let map = DistanceField::new();
    assert!(!map.signed());
    assert!(!map.flip(SurfaceSlot::Primary));
    assert!(!map.flip(SurfaceSlot::Secondary));
    assert_eq!(map.sign_convention(), SignConvention::HitFacetNormal);
    assert_eq!(map.search_strategy(), SearchStrategy::Tiered);
    assert_eq!(map.surface_size(SurfaceSlot::Primary), 0);
    assert_eq!(*map.config(), ProximityConfig::default());
}

#[test]
fn test_setters_round_trip() {
    let mut map = DistanceField::new();
    map.set_signed(true);
    map.set_flip(SurfaceSlot::Primary, true);
    map.set_sign_convention(SignConvention::QueryNodeNormal);
    map.set_search_strategy(SearchStrategy::Exhaustive);
    map.set_projection_tolerance(0.05).unwrap();

    assert_eq!(
        map.settings(),
        DistanceSettings {
            signed: true,
            flip_primary: true,
            flip_secondary: false,
            sign_convention: SignConvention::QueryNodeNormal,
            search: SearchStrategy::Exhaustive,
        }
    );
    assert_eq!(map.config().projection_tolerance, 0.05);

    let err = map.set_projection_tolerance(-1.0).unwrap_err();
    assert!(matches!(err, ProximityError::Config(_)));
    assert_eq!(map.config().projection_tolerance, 0.05);
}

#[test]
fn test_unsigned_distance_between_facing_plates() {
    let (mesh, mut map, a, b) = plates_field(2, 1.0, DistanceSettings::default());
    let mut field = FacetField::for_source(&mesh);
    let report = map.apply_state(&mesh, &mut field, 0).unwrap();

    assert_eq!(report, SampleReport::default());
    for value in corner_values(&field, &a).into_iter().chain(corner_values(&field, &b)) {
        assert_abs_diff_eq!(value, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn test_coincident_surfaces_have_zero_distance() {
    let (mesh, mut map, a, b) = plates_field(3, 0.0, DistanceSettings::default());
    let mut field = FacetField::for_source(&mesh);
    map.apply_state(&mesh, &mut field, 0).unwrap();

    for value in corner_values(&field, &a).into_iter().chain(corner_values(&field, &b)) {
        assert_abs_diff_eq!(value, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_sign_conventions_on_facing_plates() {
    let signed = DistanceSettings {
        signed: true,
        ..DistanceSettings::default()
    };

    // The hit facet faces back towards the querying node
    let (mesh, mut map, a, b) = plates_field(2, 0.5, signed);
    let mut hit_facet = FacetField::for_source(&mesh);
    map.apply_state(&mesh, &mut hit_facet, 0).unwrap();

    // The querying node's normal points at the opposite plate
    map.set_sign_convention(SignConvention::QueryNodeNormal);
    let mut query_node = FacetField::for_source(&mesh);
    map.apply_state(&mesh, &mut query_node, 0).unwrap();

    let all: Vec<usize> = a.iter().chain(&b).copied().collect();
    for value in corner_values(&hit_facet, &all) {
        assert_abs_diff_eq!(value, -0.5, epsilon = 1e-9);
    }
    for value in corner_values(&query_node, &all) {
        assert_abs_diff_eq!(value, 0.5, epsilon = 1e-9);
    }
}

#[test]
fn test_flipping_both_surfaces_negates_signed_values() {
    for convention in [SignConvention::HitFacetNormal, SignConvention::QueryNodeNormal] {
        let settings = DistanceSettings {
            signed: true,
            sign_convention: convention,
            ..DistanceSettings::default()
        };
        let (mesh, mut map, a, b) = plates_field(2, 0.8, settings);
        let all: Vec<usize> = a.iter().chain(&b).copied().collect();

        let mut plain = FacetField::for_source(&mesh);
        map.apply_state(&mesh, &mut plain, 0).unwrap();

        map.set_flip(SurfaceSlot::Primary, true);
        map.set_flip(SurfaceSlot::Secondary, true);
        let mut flipped = FacetField::for_source(&mesh);
        map.apply_state(&mesh, &mut flipped, 0).unwrap();

        for (p, f) in corner_values(&plain, &all)
            .into_iter()
            .zip(corner_values(&flipped, &all))
        {
            assert_abs_diff_eq!(p, -f, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_flipping_one_surface_only_affects_its_reference() {
    let settings = DistanceSettings {
        signed: true,
        sign_convention: SignConvention::QueryNodeNormal,
        ..DistanceSettings::default()
    };
    let (mesh, mut map, a, b) = plates_field(1, 1.0, settings);
    map.set_flip(SurfaceSlot::Primary, true);
    let mut field = FacetField::for_source(&mesh);
    map.apply_state(&mesh, &mut field, 0).unwrap();

    for value in corner_values(&field, &a) {
        assert_abs_diff_eq!(value, -1.0, epsilon = 1e-9);
    }
    for value in corner_values(&field, &b) {
        assert_abs_diff_eq!(value, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn test_exhaustive_strategy_counts_every_projection() {
    let settings = DistanceSettings {
        search: SearchStrategy::Exhaustive,
        ..DistanceSettings::default()
    };
    let (mesh, mut map, a, _) = plates_field(2, 1.0, settings);
    let mut field = FacetField::for_source(&mesh);
    let report = map.apply_state(&mesh, &mut field, 0).unwrap();

    assert_eq!(report.fallback_projections, 18);
    assert_eq!(report.unresolved_nodes, 0);
    for value in corner_values(&field, &a) {
        assert_abs_diff_eq!(value, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn test_nodes_without_projection_are_zeroed() {
    let (plates, a, b) = facing_plates(2, 1.0, false);
    let facets: Vec<Vec<usize>> = (0..plates.facet_count())
        .map(|f| plates.facet_nodes(f).to_vec())
        .collect();
    // Slide the secondary plate far to the side
    let frame: Vec<Vec3> = plates
        .frame(0)
        .unwrap()
        .iter()
        .enumerate()
        .map(|(node, &p)| if node >= 9 { p + Vec3::X * 5.0 } else { p })
        .collect();
    let mesh = DeformingMesh::new(facets, vec![frame]).unwrap();

    let mut map = DistanceField::new();
    map.set_selection(&mesh, SurfaceSlot::Primary, a.clone()).unwrap();
    map.set_selection(&mesh, SurfaceSlot::Secondary, b).unwrap();

    let mut field = FacetField::for_source(&mesh);
    for f in 0..field.facet_count() {
        for c in 0..3 {
            field.write(0, f, c, 7.0);
        }
    }
    let report = map.apply_state(&mesh, &mut field, 0).unwrap();

    assert_eq!(report.unresolved_nodes, 18);
    assert!(corner_values(&field, &a).iter().all(|&v| v == 0.0));
}

/// Flat plate at `z = 0` facing up, under a valley whose crease runs along
/// `x = 0.5` at `z = 1` and whose walls rise to `z = 1.25` and face up.
fn plate_under_valley() -> (DeformingMesh, Vec<usize>, Vec<usize>) {
    let mut facets = grid_facets(2, 0, true, false);
    let plate: Vec<usize> = (0..facets.len()).collect();
    facets.extend(grid_facets(2, 9, true, false));
    let valley: Vec<usize> = (plate.len()..facets.len()).collect();

    let mut frame = grid_positions(2, |_, _| 0.0);
    frame.extend(grid_positions(2, |x, _| 1.0 + 0.5 * (x - 0.5).abs()));
    (DeformingMesh::new(facets, vec![frame]).unwrap(), plate, valley)
}

#[test]
fn test_sign_conventions_agree_where_normals_align() {
    let (mesh, plate, valley) = plate_under_valley();
    let mut map = DistanceField::with_settings(DistanceSettings {
        signed: true,
        ..DistanceSettings::default()
    });
    map.set_selection(&mesh, SurfaceSlot::Primary, plate.clone()).unwrap();
    map.set_selection(&mesh, SurfaceSlot::Secondary, valley.clone()).unwrap();
    let all: Vec<usize> = plate.iter().chain(&valley).copied().collect();

    let mut hit_facet = FacetField::for_source(&mesh);
    map.apply_state(&mesh, &mut hit_facet, 0).unwrap();
    map.set_sign_convention(SignConvention::QueryNodeNormal);
    let mut query_node = FacetField::for_source(&mesh);
    map.apply_state(&mesh, &mut query_node, 0).unwrap();

    // Plate nodes look up into the valley, whose walls face up as well;
    // valley nodes look down onto the up-facing plate
    let mut agreeing = 0;
    for (h, q) in corner_values(&hit_facet, &all)
        .into_iter()
        .zip(corner_values(&query_node, &all))
    {
        assert_abs_diff_eq!(h, q, epsilon = 1e-12);
        if h != 0.0 {
            agreeing += 1;
        }
    }
    assert!(agreeing > 0);

    // Plate node (0, 0, 0) projects onto the crease, valley rim node
    // (0, 0, 1.25) straight down onto the plate
    assert_abs_diff_eq!(
        hit_facet.value(0, plate[0], 0).unwrap(),
        1.25f64.sqrt(),
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        query_node.value(0, valley[0], 0).unwrap(),
        -1.25,
        epsilon = 1e-9
    );
}
