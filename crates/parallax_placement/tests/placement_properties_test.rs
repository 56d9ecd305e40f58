//! # Placement Properties Integration Test
//!
//! Proves the accepted set is non-overlapping on screen, stays inside the
//! domain, is reproducible from a seed, and that runs always terminate.

use parallax_placement::{
    overlaps, Camera, Domain, ExhaustionPolicy, MarkerCollection, PlacementConfig,
    PlacementEngine, PlacementReport, PlacementStatus, Projection, ScatterConfig, ScatterSeed,
};
use parallax_shared::Vec3;

/// Camera on +Z at `distance`, looking at the origin.
fn front_camera(distance: f32) -> Camera {
    let projection = Projection::perspective(std::f32::consts::FRAC_PI_3, 1.0, 0.1, 100.0)
        .expect("valid projection");
    Camera::look_at(Vec3::new(0.0, 0.0, distance), Vec3::ZERO, Vec3::Y, projection)
        .expect("valid pose")
}

fn assert_invariants(engine: &PlacementEngine, report: &PlacementReport) {
    for (i, a) in report.markers.iter().enumerate() {
        assert!(
            engine.domain().contains(a.position),
            "marker {} at {:?} left the domain",
            i,
            a.position
        );
        for (j, b) in report.markers.iter().enumerate().skip(i + 1) {
            assert!(
                !overlaps(engine.camera(), a, b),
                "markers {} and {} overlap on screen",
                i,
                j
            );
        }
    }
    assert!(report.stats.peak_attempts <= engine.config().attempt_budget);
}

/// Test: two markers in a unit box seen from five units away.
#[test]
fn test_two_markers_in_unit_box() {
    let domain = Domain::new(Vec3::ZERO, Vec3::ONE).expect("valid domain");
    let config = PlacementConfig {
        target_count: 2,
        ..PlacementConfig::default()
    };
    let engine = PlacementEngine::new(front_camera(5.0), domain, config).expect("valid engine");

    let report = engine.place(&mut ScatterSeed::new(42).rng());

    assert_eq!(report.status, PlacementStatus::Complete);
    assert_eq!(report.markers.len(), 2);
    for p in report.positions() {
        for v in p.to_array() {
            assert!((-1.0..=1.0).contains(&v));
        }
    }
    assert_invariants(&engine, &report);
}

/// Test: a dense request with a tight budget still terminates.
#[test]
fn test_dense_request_terminates() {
    let domain = Domain::new(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.5)).expect("valid domain");
    let config = PlacementConfig {
        target_count: 100,
        attempt_budget: 1000,
        marker_radius: 0.1,
        ..PlacementConfig::default()
    };
    let engine = PlacementEngine::new(front_camera(5.0), domain, config).expect("valid engine");

    let report = engine.place(&mut ScatterSeed::new(7).rng());

    assert!(report.markers.len() <= 100);
    if report.status == PlacementStatus::BudgetExhausted {
        assert_eq!(report.stats.peak_attempts, 1000);
        assert_eq!(report.stats.abandoned, 1);
    }
    // Each commit resets the counter, so the whole run is bounded.
    let commits = report.markers.len() as u64 + 1;
    assert!(report.stats.total_attempts <= commits * 1000);
    assert_invariants(&engine, &report);
}

/// Test: the same seed reproduces the same markers, a different seed does not.
#[test]
fn test_same_seed_same_markers() {
    let domain = Domain::new(Vec3::ZERO, Vec3::ONE).expect("valid domain");
    let config = PlacementConfig {
        target_count: 40,
        ..PlacementConfig::default()
    };
    let engine = PlacementEngine::new(front_camera(5.0), domain, config).expect("valid engine");

    let first = engine.place(&mut ScatterSeed::new(1234).rng());
    let second = engine.place(&mut ScatterSeed::new(1234).rng());
    let other = engine.place(&mut ScatterSeed::new(4321).rng());

    assert_eq!(first, second);
    assert_ne!(first.positions(), other.positions());
}

/// Test: the markers left in the container are exactly the accepted ones.
#[test]
fn test_container_matches_report_under_discard_policy() {
    let domain = Domain::new(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.5)).expect("valid domain");
    let config = PlacementConfig {
        target_count: 60,
        attempt_budget: 50,
        exhaustion: ExhaustionPolicy::DiscardCandidate { max_abandoned: 10 },
        ..PlacementConfig::default()
    };
    let engine = PlacementEngine::new(front_camera(4.0), domain, config).expect("valid engine");
    let mut spheres = MarkerCollection::new("Spheres");

    let report = engine.run(&mut spheres, &mut ScatterSeed::new(99).rng());

    assert_eq!(spheres.positions(), report.positions());
    assert!(report.stats.abandoned <= 10);
    if report.status == PlacementStatus::BudgetExhausted {
        assert_eq!(report.stats.abandoned, 10);
    }
    assert_invariants(&engine, &report);
}

/// Test: a scene file drives a full run end to end.
#[test]
fn test_scene_file_round_trip() {
    let text = r#"
        seed = 2024

        [domain]
        half_extents = [0.5, 0.5, 0.5]

        [camera]
        eye = [3.0, 0.0, 0.0]
        up = [0.0, 0.0, 1.0]

        [placement]
        target_count = 30
    "#;
    let scene = ScatterConfig::from_toml_str(text).expect("valid scene");
    let engine = scene.build_engine().expect("valid engine");

    let report = engine.place(&mut scene.seed().rng());
    assert_invariants(&engine, &report);

    // Reports serialize back to TOML for hand-off.
    let written = toml::to_string(&report).expect("serializable report");
    let parsed: PlacementReport = toml::from_str(&written).expect("parsable report");
    assert_eq!(parsed.markers.len(), report.markers.len());
    assert_eq!(parsed.status, report.status);
}
