//! # Projection Integration Test
//!
//! Checks the projection against known camera setups and the domain's
//! inclusive boundary.

use parallax_placement::{Camera, Domain, Projection};
use parallax_shared::{Mat4, Vec3};

/// Test: points on the principal axis land in the image center at any depth.
#[test]
fn test_principal_axis_is_image_center() {
    let projection = Projection::from_lens(50.0, 36.0, 16.0 / 9.0, 0.1, 100.0).expect("lens");
    let eye = Vec3::new(3.0, 0.0, 1.0);
    let camera = Camera::look_at(eye, Vec3::ZERO, Vec3::Z, projection).expect("pose");
    let axis = (Vec3::ZERO - eye).normalized().expect("direction");

    for distance in [0.5_f32, 1.0, 3.0, 10.0, 50.0] {
        let p = camera.project_point(eye + axis * distance).expect("in front");
        assert!((p.x - 0.5).abs() < 1e-4, "x = {} at distance {}", p.x, distance);
        assert!((p.y - 0.5).abs() < 1e-4, "y = {} at distance {}", p.y, distance);
    }
}

/// Test: a host-supplied pose and projection matrix behave like look-at.
#[test]
fn test_explicit_matrices_match_look_at() {
    let projection = Projection::from_matrix(Mat4::perspective_rh_gl(0.8, 1.5, 0.1, 50.0))
        .expect("finite matrix");
    let eye = Vec3::new(-2.0, 1.0, 4.0);
    let pose = Mat4::look_at_pose(eye, Vec3::ZERO, Vec3::Y).expect("pose");

    let explicit = Camera::new(pose, projection).expect("invertible");
    let looked = Camera::look_at(eye, Vec3::ZERO, Vec3::Y, projection).expect("pose");

    let point = Vec3::new(0.3, -0.2, 0.1);
    let a = explicit.project(point, 0.1).expect("visible");
    let b = looked.project(point, 0.1).expect("visible");
    assert!(a.center.distance(b.center) < 1e-6);
    assert!((a.radius - b.radius).abs() < 1e-6);
}

/// Test: sampled-boundary points are inside, points just past it are not.
#[test]
fn test_domain_boundary_inclusive() {
    let half = Vec3::new(0.5, 0.25, 2.0);
    let domain = Domain::new(Vec3::ZERO, half).expect("domain");
    assert!(domain.contains(Vec3::new(half.x, 0.0, 0.0)));
    assert!(domain.contains(Vec3::new(0.0, -half.y, half.z)));
    assert!(domain.contains(half));
    assert!(!domain.contains(Vec3::new(half.x + 1e-4, 0.0, 0.0)));
}
