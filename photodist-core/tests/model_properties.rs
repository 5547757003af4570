//! Integration tests for the annotation model
//!
//! These exercise the public API the way an interactive session does: clicks,
//! right-clicks to end paths, pointer motion, and a final triangulation.

use approx::assert_relative_eq;
use photodist_core::{
    EndPathOutcome, Error, GeometryModel, ImageIndex, PixelPoint, StereoCalibration,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

#[test]
fn test_random_sessions_only_keep_complete_paths() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let mut model = GeometryModel::new();
        let mut expected_lengths = Vec::new();

        let paths = rng.gen_range(0..8);
        for _ in 0..paths {
            let points = rng.gen_range(1..5);
            for _ in 0..points {
                let image = if rng.gen_bool(0.5) { ImageIndex::Left } else { ImageIndex::Right };
                model.add_point(rng.gen_range(0..640), rng.gen_range(0..480), image);
            }
            let outcome = model.end_path().unwrap();
            if points >= 2 {
                assert!(matches!(outcome, EndPathOutcome::Closed(_)));
                expected_lengths.push(points);
            } else {
                assert!(matches!(outcome, EndPathOutcome::Discarded(_)));
            }
        }

        let lengths: Vec<usize> = model.paths().iter().map(|p| p.len()).collect();
        assert_eq!(lengths, expected_lengths);
        assert!(model.paths().iter().all(|p| p.len() >= 2));
        assert!(model.open_path().is_none());
    }
}

#[test]
fn test_open_path_is_always_last() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut model = GeometryModel::new();

    for _ in 0..500 {
        match rng.gen_range(0..10) {
            0..=5 => {
                model.add_point(rng.gen_range(0..640), rng.gen_range(0..480), ImageIndex::Left);
            }
            6..=7 => {
                let _ = model.end_path();
            }
            8 => {
                model.update_focused_point(rng.gen_range(0..640), rng.gen_range(0..480), ImageIndex::Left);
            }
            _ => {
                if rng.gen_bool(0.1) {
                    model.reset();
                }
            }
        }

        if let Some(open) = model.open_path_id() {
            assert_eq!(model.paths().last().map(|p| p.id()), Some(open));
        }
        if let Some(focused) = model.focused_point_id() {
            assert!(model.point(focused).is_some());
        }
    }
}

#[test]
fn test_reset_from_any_state() {
    let mut rng = StdRng::seed_from_u64(3);
    let calibration = StereoCalibration::new(42.0, 30.0, 2.5).unwrap();

    for _ in 0..50 {
        let mut model = GeometryModel::with_calibration(calibration);
        for _ in 0..rng.gen_range(0..20) {
            model.add_point(rng.gen_range(0..100), rng.gen_range(0..100), ImageIndex::Right);
            if rng.gen_bool(0.3) {
                model.end_path().unwrap();
            }
        }
        model.update_focused_point(50, 50, ImageIndex::Right);

        model.reset();
        assert!(model.paths().is_empty());
        assert!(model.open_path().is_none());
        assert!(model.focused_point().is_none());
        assert_eq!(*model.calibration(), calibration);
    }
}

#[test]
fn test_focus_idempotent_under_repeated_query() {
    let mut model = GeometryModel::new();
    let id = model.add_point(320, 240, ImageIndex::Left);
    model.add_point(500, 240, ImageIndex::Left);
    model.end_path().unwrap();

    assert!(model.update_focused_point(325, 240, ImageIndex::Left));
    assert_eq!(model.focused_point_id(), Some(id));
    assert!(!model.update_focused_point(325, 240, ImageIndex::Left));
    assert_eq!(model.focused_point_id(), Some(id));
}

#[test]
fn test_focus_distances_10_and_40_and_60() {
    let mut model = GeometryModel::new();
    let at_40 = model.add_point(140, 100, ImageIndex::Left);
    let at_10 = model.add_point(100, 110, ImageIndex::Left);
    model.end_path().unwrap();

    assert!(model.update_focused_point(100, 100, ImageIndex::Left));
    assert_eq!(model.focused_point_id(), Some(at_10));
    assert_ne!(model.focused_point_id(), Some(at_40));

    let mut lonely = GeometryModel::new();
    lonely.add_point(160, 100, ImageIndex::Left);
    lonely.add_point(400, 400, ImageIndex::Left);
    lonely.end_path().unwrap();
    assert!(!lonely.update_focused_point(100, 100, ImageIndex::Left));
    assert!(lonely.focused_point().is_none());
}

#[test]
fn test_focus_does_not_mutate_pairs() {
    let mut model = GeometryModel::new();
    model.add_point(10, 10, ImageIndex::Left);
    model.add_point(20, 20, ImageIndex::Left);
    model.end_path().unwrap();
    let before = model.paths().to_vec();

    model.update_focused_point(12, 12, ImageIndex::Left);
    model.update_focused_point(19, 21, ImageIndex::Right);
    assert_eq!(model.paths(), &before[..]);
}

#[test]
fn test_triangulation_reference_pair() {
    let mut model = GeometryModel::new();
    let id = model.add_point(40, 30, ImageIndex::Left);
    model.set_point_coordinate(id, ImageIndex::Right, 60, 30).unwrap();
    model.add_point(70, 10, ImageIndex::Left);
    model.end_path().unwrap();

    model.triangulate(100, 80).unwrap();

    let theta_scale = 15.0 / (2.0 * 100.0) * (PI / 180.0);
    let phi_scale = 15.0 / (2.0 * 80.0) * (PI / 180.0);
    let tan_theta0 = ((40.0 - 50.0) * theta_scale).tan();
    let tan_theta1 = ((60.0 - 50.0) * theta_scale).tan();
    let tan_phi = ((30.0 - 40.0) * phi_scale).tan();
    let depth = 0.3 / (tan_theta1 - tan_theta0) + 0.5 * 0.3;
    let lateral = depth * tan_theta1;
    let vertical = lateral * tan_phi;

    let p = model.point(id).unwrap().position().unwrap();
    assert_relative_eq!(p.x, depth, max_relative = 1e-9);
    assert_relative_eq!(p.y, lateral, max_relative = 1e-9);
    assert_relative_eq!(p.z, vertical, max_relative = 1e-9);
}

#[test]
fn test_triangulation_follows_calibration_changes() {
    let mut model = GeometryModel::new();
    let id = model.add_point(300, 240, ImageIndex::Left);
    model.set_point_coordinate(id, ImageIndex::Right, 340, 240).unwrap();
    model.add_point(0, 0, ImageIndex::Left);
    model.end_path().unwrap();

    model.triangulate(640, 480).unwrap();
    let near = model.point(id).unwrap().position().unwrap().x;

    model.set_separation(0.6);
    model.triangulate(640, 480).unwrap();
    let far = model.point(id).unwrap().position().unwrap().x;
    assert_relative_eq!(far, 2.0 * near, max_relative = 1e-12);

    model.set_separation(0.3);
    model.triangulate(640, 480).unwrap();
    assert_eq!(model.point(id).unwrap().position().unwrap().x, near);
}

#[test]
fn test_every_mutation_notifies_subscribers_in_order() {
    let mut model = GeometryModel::new();
    let calls = Rc::new(Cell::new(0u32));
    let order = Rc::new(std::cell::RefCell::new(Vec::new()));

    let c = Rc::clone(&calls);
    let o = Rc::clone(&order);
    model.subscribe(move || {
        c.set(c.get() + 1);
        o.borrow_mut().push(1);
    });
    let o = Rc::clone(&order);
    let second = model.subscribe(move || o.borrow_mut().push(2));

    let id = model.add_point(0, 0, ImageIndex::Left); // 1
    model.add_point(5, 0, ImageIndex::Left); // 2
    model.set_point_coordinate(id, ImageIndex::Right, 9, 0).unwrap(); // 3
    model.update_focused_point(1, 0, ImageIndex::Left); // 4
    model.update_focused_point(1, 0, ImageIndex::Left);
    model.end_path().unwrap(); // 5
    let _ = model.end_path();
    model.reset(); // 6
    assert_eq!(calls.get(), 6);
    assert_eq!(order.borrow().len(), 12);
    assert!(order.borrow().chunks(2).all(|pair| pair == [1, 2]));

    assert!(model.unsubscribe(second));
    model.add_point(0, 0, ImageIndex::Left);
    assert_eq!(calls.get(), 7);
    assert_eq!(order.borrow().len(), 13);
}

#[test]
fn test_three_point_scenario_positions() {
    let mut model = GeometryModel::new();
    model.add_point(100, 100, ImageIndex::Left);
    model.add_point(200, 150, ImageIndex::Left);
    model.add_point(300, 200, ImageIndex::Left);
    model.end_path().unwrap();

    let report = model.triangulate(640, 480).unwrap();
    assert_eq!(report.triangulated, 3);
    // Seeded pairs were never corrected, so every one has zero disparity
    assert_eq!(report.non_finite.len(), 3);

    let rows = model.triangulated_points().unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|(path, _)| *path == 0));
}

#[test]
fn test_dimension_check_before_triangulation() {
    use photodist_core::ImageDimensions;

    let left = ImageDimensions::new(640, 480);
    let right = ImageDimensions::new(640, 481);
    assert!(matches!(
        ImageDimensions::common(left, right),
        Err(Error::DimensionMismatch { .. })
    ));
}

#[test]
fn test_add_path_counts_as_pixels_given() {
    let mut model = GeometryModel::new();
    let id = model
        .add_path(vec![
            [PixelPoint::new(100, 50), PixelPoint::new(130, 50)],
            [PixelPoint::new(120, 80), PixelPoint::new(155, 80)],
            [PixelPoint::new(140, 90), PixelPoint::new(170, 90)],
        ])
        .unwrap();
    assert_eq!(model.path_index(id), Some(0));
    let report = model.triangulate(640, 480).unwrap();
    assert!(report.is_clean());
}
