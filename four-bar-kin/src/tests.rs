use crate::*;
use approx::assert_abs_diff_eq;

const LINKAGES: [[f64; 4]; 5] = [
    [100., 40., 120., 80.],
    [90., 35., 70., 70.],
    [30., 60., 60., 75.],
    [85., 75., 65., 70.],
    [85., 75., 65., 20.],
];

fn spec([d, a, b, c]: [f64; 4]) -> LinkageSpec {
    LinkageSpec::new(d, a, b, c).unwrap()
}

fn angle_diff(a: f64, b: f64) -> f64 {
    wrap_deg(a - b).abs()
}

#[test]
fn link_lengths_preserved() {
    for fb in LINKAGES.map(spec) {
        for branch in Branch::ALL {
            for t in sample_angles(0., 360., 1.) {
                let Some(pose) = solve(&fb, t, branch) else {
                    continue;
                };
                assert_eq!(pose.a(), [0., 0.]);
                assert_eq!(pose.d(), [fb.d(), 0.]);
                assert_eq!(pose.a().dist(&pose.d()), fb.d());
                assert_abs_diff_eq!(pose.a().dist(&pose.b()), fb.a(), epsilon = 1e-9);
                assert_abs_diff_eq!(pose.b().dist(&pose.c()), fb.b(), epsilon = 1e-9);
                assert_abs_diff_eq!(pose.c().dist(&pose.d()), fb.c(), epsilon = 1e-9);
                assert!(pose.coupler_angle > -180. && pose.coupler_angle <= 180.);
                assert!(pose.output_angle > -180. && pose.output_angle <= 180.);
            }
        }
    }
}

#[test]
fn deterministic() {
    let fb = spec(LINKAGES[0]);
    for t in [0., 33.3, 181., 359.] {
        assert_eq!(solve(&fb, t, Branch::Closed), solve(&fb, t, Branch::Closed));
    }
}

#[test]
fn branches_are_mirrored() {
    let fb = spec(LINKAGES[1]);
    for t in sample_angles(0., 360., 5.) {
        let open = solve(&fb, t, Branch::Open).unwrap();
        let closed = solve(&fb, t, Branch::Closed).unwrap();
        assert_eq!(open.b(), closed.b());
        // Reflect the open joint C across the line B-D
        let [bx, by] = open.b();
        let [dx, dy] = open.d();
        let [cx, cy] = open.c();
        let (ux, uy) = (dx - bx, dy - by);
        let k = ((cx - bx) * ux + (cy - by) * uy) / (ux * ux + uy * uy);
        let (fx, fy) = (bx + k * ux, by + k * uy);
        let [rx, ry] = closed.c();
        assert_abs_diff_eq!(2. * fx - cx, rx, epsilon = 1e-9);
        assert_abs_diff_eq!(2. * fy - cy, ry, epsilon = 1e-9);
        // Open is on the left of B->D
        assert!(ux * (cy - by) - uy * (cx - bx) > 0.);
    }
}

#[test]
fn crank_rocker_at_zero() {
    let fb = spec([100., 40., 120., 80.]);
    let pose = solve(&fb, 0., Branch::Open).unwrap();
    assert_eq!(pose.b(), [40., 0.]);
    assert_eq!(pose.d(), [100., 0.]);
    assert_abs_diff_eq!(pose.b().dist(&pose.d()), 60.);
    assert_abs_diff_eq!(pose.b().dist(&pose.c()), 120., epsilon = 1e-6);
    assert_abs_diff_eq!(pose.c().dist(&pose.d()), 80., epsilon = 1e-6);
    let [cx, cy] = pose.c();
    assert_abs_diff_eq!(cx, 40. + 290. / 3., epsilon = 1e-9);
    assert!(cy > 0.);
    let closed = solve(&fb, 0., Branch::Closed).unwrap();
    assert_abs_diff_eq!(closed.c()[1], -cy, epsilon = 1e-9);
    assert_abs_diff_eq!(closed.output_angle, -pose.output_angle, epsilon = 1e-9);
}

#[test]
fn tangent_configuration() {
    let fb = spec([100., 200., 50., 50.]);
    let open = solve(&fb, 0., Branch::Open).unwrap();
    let closed = solve(&fb, 0., Branch::Closed).unwrap();
    assert_eq!(open.b(), [200., 0.]);
    assert_eq!(open.c(), closed.c());
    assert_eq!(open.c(), [150., 0.]);
    assert_eq!(open.coupler_angle, 180.);
    assert_eq!(open.output_angle, 0.);
    // The input link cannot pass the output pivot
    assert!(solve(&fb, 90., Branch::Open).is_none());
}

#[test]
fn inner_tangent_configuration() {
    // |BD| = b - c, the output link folds back onto the coupler
    let fb = spec([100., 40., 80., 20.]);
    let open = solve(&fb, 0., Branch::Open).unwrap();
    let closed = solve(&fb, 0., Branch::Closed).unwrap();
    assert_eq!(open.c(), closed.c());
    assert_eq!(open.c(), [120., 0.]);
    assert_eq!(open.coupler_angle, 0.);
    assert_eq!(open.output_angle, 0.);
    assert!(solve(&fb, 1., Branch::Open).is_some());
}

#[test]
fn coincident_joints_have_no_solution() {
    // B lands on D with equal coupler and output links
    let fb = spec([50., 50., 30., 30.]);
    assert!(solve(&fb, 0., Branch::Open).is_none());
    assert!(solve(&fb, f64::NAN, Branch::Open).is_none());
}

#[test]
fn coupler_point_is_rigid() {
    let fb = spec(LINKAGES[1]);
    let point = CouplerPoint::new(45., 30.).unwrap();
    for t in sample_angles(0., 360., 10.) {
        let pose = solve(&fb, t, Branch::Open).unwrap();
        let p = pose.coupler_point(&point);
        assert_abs_diff_eq!(pose.b().dist(&p), 45., epsilon = 1e-9);
        let rel = pose.b().angle_to(&p) - pose.b().angle_to(&pose.c());
        assert_abs_diff_eq!(angle_diff(rel.to_degrees(), 30.), 0., epsilon = 1e-9);
    }
    // Zero offset traces joint B
    let pose = solve(&fb, 10., Branch::Open).unwrap();
    assert_eq!(pose.coupler_point(&CouplerPoint::default()), pose.b());
}

#[test]
fn non_grashof_sweep_has_gaps() {
    let fb = spec([85., 75., 65., 70.]);
    assert!(!fb.ty().is_grashof());
    let locus = sweep(&fb, &CouplerPoint::example(), Branch::Open, DEFAULT_STEP).unwrap();
    assert_eq!(locus.samples, 181);
    assert!(!locus.is_empty());
    assert!(locus.gaps() > 0);
    assert_eq!(locus.segments().len(), 2);
    let len = locus.len();
    assert_eq!(locus.trajectory.len(), len);
    assert_eq!(locus.coupler_angles.len(), len);
    assert_eq!(locus.output_angles.len(), len);
    // The gaps are the angles outside of the bound
    let bound = fb.angle_bound();
    for t in sample_angles(0., 360., DEFAULT_STEP) {
        assert_eq!(bound.contains(t), locus.input_angles.contains(&t), "at {t}");
    }
}

#[test]
fn angle_bound_matches_solver() {
    for fb in LINKAGES.map(spec) {
        let bound = fb.angle_bound();
        for t in sample_angles(0., 359., 1.) {
            let solved = solve(&fb, t, Branch::Open).is_some();
            assert_eq!(bound.contains(t), solved, "{fb:?} at {t}");
        }
    }
}

#[test]
fn sweep_samples() {
    let fb = LinkageSpec::example();
    let point = CouplerPoint::example();
    let locus = sweep(&fb, &point, Branch::Open, 7.).unwrap();
    assert_eq!(locus.samples, 52);
    assert_eq!(locus.input_angles.last(), Some(&357.));
    let locus = sweep(&fb, &point, Branch::Open, 2.).unwrap();
    assert_eq!(locus.input_angles.first(), Some(&0.));
    assert_eq!(locus.input_angles.last(), Some(&360.));
    assert_eq!(locus.segments(), [0..181]);
    // A closed curve ends where it starts
    let [x0, y0] = locus.trajectory[0];
    let [x1, y1] = locus.trajectory[180];
    assert_abs_diff_eq!(x0, x1, epsilon = 1e-9);
    assert_abs_diff_eq!(y0, y1, epsilon = 1e-9);
}

#[test]
fn single_step_sweep() {
    let fb = spec(LINKAGES[0]);
    let point = CouplerPoint::new(60., 30.).unwrap();
    for branch in Branch::ALL {
        let locus = sweep(&fb, &point, branch, 360.).unwrap();
        assert_eq!(locus.samples, 1);
        assert!(locus.trajectory.len() <= 1);
        let pose = solve(&fb, 0., branch).unwrap();
        assert_eq!(locus.trajectory, [pose.coupler_point(&point)]);
        assert_eq!(locus.coupler_angles, [pose.coupler_angle]);
        assert_eq!(locus.output_angles, [pose.output_angle]);
    }
    let locus = sweep(&fb, &point, Branch::Open, 720.).unwrap();
    assert_eq!(locus.samples, 1);
}

#[test]
fn invalid_sweep_inputs() {
    let fb = LinkageSpec::example();
    let point = CouplerPoint::example();
    for step in [0., -2., f64::NAN, f64::INFINITY] {
        assert!(matches!(
            sweep(&fb, &point, Branch::Open, step),
            Err(Error::InvalidStep(_))
        ));
    }
    assert_eq!(
        sweep_in(&fb, &point, Branch::Open, 10., 0., 1.),
        Err(Error::InvalidRange { start: 10., end: 0. })
    );
    assert!(matches!(
        sweep_in(&fb, &point, Branch::Open, f64::NAN, 0., 1.),
        Err(Error::InvalidAngle(_))
    ));
}

#[test]
fn sweep_in_range() {
    let fb = LinkageSpec::example();
    let point = CouplerPoint::example();
    let locus = sweep_in(&fb, &point, Branch::Closed, -30., 30., 15.).unwrap();
    assert_eq!(locus.input_angles, [-30., -15., 0., 15., 30.]);
    let full = sweep(&fb, &point, Branch::Closed, 15.).unwrap();
    assert_eq!(locus.trajectory[2], full.trajectory[0]);
}

#[test]
fn unwrapped_angles_are_continuous() {
    // Drag-link, the coupler and the output link rotate fully
    let fb = spec([30., 60., 60., 75.]);
    assert_eq!(fb.ty(), FourBarTy::GCCC);
    let locus = sweep(&fb, &CouplerPoint::default(), Branch::Open, 1.).unwrap();
    assert_eq!(locus.gaps(), 0);
    let jumps = |angles: &[f64]| angles.windows(2).any(|w| (w[1] - w[0]).abs() > 180.);
    assert!(jumps(&locus.output_angles));
    let unwrapped = locus.unwrap();
    assert!(!jumps(&unwrapped.output_angles));
    assert!(!jumps(&unwrapped.coupler_angles));
    assert_eq!(unwrapped.output_angles[0], locus.output_angles[0]);
    assert_eq!(unwrapped.trajectory, locus.trajectory);
    // Each unwrapped angle is the wrapped one plus whole turns
    for (u, w) in unwrapped.output_angles.iter().zip(&locus.output_angles) {
        assert_abs_diff_eq!(angle_diff(*u, *w), 0., epsilon = 1e-9);
    }
    // One turn of the output link
    let turn = unwrapped.output_angles[360] - unwrapped.output_angles[0];
    assert_abs_diff_eq!(turn.abs(), 360., epsilon = 1e-6);
}

#[test]
fn unwrap_restarts_after_gap() {
    let locus = Locus {
        step: 10.,
        samples: 6,
        trajectory: vec![[0.; 2]; 4],
        input_angles: vec![0., 10., 40., 50.],
        coupler_angles: vec![170., -170., 175., -175.],
        output_angles: vec![0.; 4],
    };
    assert_eq!(locus.segments(), [0..2, 2..4]);
    assert_eq!(locus.unwrap().coupler_angles, [170., 190., 175., 185.]);
    assert_eq!(locus.trajectory_segments().len(), 2);
}

#[test]
fn freudenstein_matches_circle_intersection() {
    for fb in LINKAGES.map(spec) {
        for branch in Branch::ALL {
            for t in sample_angles(0., 360., 3.) {
                let pose = solve(&fb, t, branch);
                let t4 = freudenstein(&fb, t, branch);
                let (Some(pose), Some(t4)) = (pose, t4) else {
                    continue;
                };
                assert_abs_diff_eq!(angle_diff(pose.output_angle, t4), 0., epsilon = 1e-7);
            }
        }
    }
    let fb = spec([85., 75., 65., 70.]);
    assert!(freudenstein(&fb, 180., Branch::Open).is_none());
}

#[test]
fn newton_follows_branch() {
    let fb = LinkageSpec::example();
    let solver = NewtonSolver::new();
    for branch in Branch::ALL {
        let start = solve(&fb, 0., branch).unwrap();
        let guess = [start.coupler_angle + 5., start.output_angle - 5.];
        let ans = solver.continuation(&fb, sample_angles(0., 360., 1.), guess);
        assert_eq!(ans.len(), 361);
        for (t, ans) in sample_angles(0., 360., 1.).zip(ans) {
            let [t3, t4] = ans.unwrap();
            let pose = solve(&fb, t, branch).unwrap();
            assert_abs_diff_eq!(angle_diff(t3, pose.coupler_angle), 0., epsilon = 1e-6);
            assert_abs_diff_eq!(angle_diff(t4, pose.output_angle), 0., epsilon = 1e-6);
        }
    }
}

#[test]
fn newton_pose() {
    let fb = spec(LINKAGES[0]);
    let exact = solve(&fb, 20., Branch::Closed).unwrap();
    let guess = [exact.coupler_angle - 10., exact.output_angle + 10.];
    let pose = NewtonSolver::new().pose(&fb, 20., guess).unwrap();
    for (p, q) in pose.joints.iter().zip(&exact.joints) {
        assert_abs_diff_eq!(p[0], q[0], epsilon = 1e-6);
        assert_abs_diff_eq!(p[1], q[1], epsilon = 1e-6);
    }
    // Unreachable input angle never converges
    let fb = spec([85., 75., 65., 70.]);
    assert!(NewtonSolver::new().max_iter(20).solve(&fb, 180., [0., 90.]).is_none());
}
