//! The functions used to plot the coupler curve and the angle curves.
//!
//! ```
//! use four_bar_kin::{plot::*, solve, sweep, Branch, CouplerPoint, LinkageSpec};
//!
//! let spec = LinkageSpec::example();
//! let point = CouplerPoint::example();
//! let locus = sweep(&spec, &point, Branch::Open, 2.).unwrap();
//! let pose = solve(&spec, 30., Branch::Open);
//! let mut buf = String::new();
//! let svg = SVGBackend::with_string(&mut buf, (800, 800));
//! plot_locus(svg, "Coupler curve", &locus, pose.as_ref().map(|p| (p, &point))).unwrap();
//! ```
use crate::{CouplerPoint, Locus, Pose};
#[doc(no_inline)]
pub use plotters::{prelude::*, *};

/// Result type of the drawing functions.
pub type PResult<T, B> = Result<T, DrawingAreaErrorKind<<B as DrawingBackend>::ErrorType>>;

/// Get font setting.
pub fn font() -> TextStyle<'static> {
    ("Times New Roman", 24).into_font().color(&BLACK)
}

/// Plot the coupler curve, optionally with the linkage at a pose.
///
/// The curve is broken at the unsolvable input angles.
pub fn plot_locus<B>(
    backend: B,
    title: &str,
    locus: &Locus,
    pose: Option<(&Pose, &CouplerPoint)>,
) -> PResult<(), B>
where
    B: DrawingBackend,
{
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    let mut pts = locus.trajectory.clone();
    if let Some((pose, point)) = pose {
        pts.extend(pose.joints);
        pts.push(pose.coupler_point(point));
    }
    let [x_min, x_max, y_min, y_max] = bounding_box(&pts);
    let mut chart = ChartBuilder::on(&root)
        .caption(title, font())
        .set_label_area_size(LabelAreaPosition::Left, (8).percent())
        .set_label_area_size(LabelAreaPosition::Bottom, (4).percent())
        .margin((8).percent())
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_label_style(font())
        .y_label_style(font())
        .draw()?;
    let color = Palette99::pick(0).stroke_width(2);
    for (i, curve) in locus.trajectory_segments().into_iter().enumerate() {
        let line = LineSeries::new(curve.iter().map(|&[x, y]| (x, y)), color);
        let anno = chart.draw_series(line)?;
        if i == 0 {
            anno.label("Coupler curve")
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
    }
    if let Some((pose, point)) = pose {
        let [a, b, c, d] = pose.joints.map(|[x, y]| (x, y));
        let [px, py] = pose.coupler_point(point);
        let link = BLACK.stroke_width(3);
        chart
            .draw_series(LineSeries::new([a, b, c, d], link))?
            .label("Linkage")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], link));
        let coupler = Palette99::pick(1).mix(0.4).filled();
        chart.draw_series([Polygon::new(vec![b, (px, py), c], coupler)])?;
        chart.draw_series([a, d].map(|p| TriangleMarker::new(p, 10, BLACK.filled())))?;
        chart.draw_series([b, c].map(|p| Circle::new(p, 5, BLACK.filled())))?;
        chart.draw_series([Circle::new((px, py), 5, Palette99::pick(1).filled())])?;
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE)
        .border_style(&BLACK)
        .label_font(font())
        .draw()?;
    root.present()?;
    Ok(())
}

/// Plot the unwrapped coupler and output angles over the input angle.
pub fn plot_angles<B>(backend: B, title: &str, locus: &Locus) -> PResult<(), B>
where
    B: DrawingBackend,
{
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    let locus = locus.unwrap();
    let (y_min, y_max) = locus
        .coupler_angles
        .iter()
        .chain(&locus.output_angles)
        .fold((0f64, 0f64), |(lo, hi), &t| (lo.min(t), hi.max(t)));
    let x_max = locus.input_angles.last().copied().unwrap_or(360.).max(360.);
    let mut chart = ChartBuilder::on(&root)
        .caption(title, font())
        .set_label_area_size(LabelAreaPosition::Left, (10).percent())
        .set_label_area_size(LabelAreaPosition::Bottom, (6).percent())
        .margin((8).percent())
        .build_cartesian_2d(0f64..x_max, y_min - 10.0..y_max + 10.)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Input angle (deg)")
        .x_label_style(font())
        .y_desc("Angle (deg)")
        .y_label_style(font())
        .draw()?;
    let segments = locus.segments();
    let curves = [
        ("Coupler angle", &locus.coupler_angles),
        ("Output angle", &locus.output_angles),
    ];
    for (i, (label, angles)) in curves.into_iter().enumerate() {
        let color = Palette99::pick(i).stroke_width(2);
        for (j, r) in segments.iter().enumerate() {
            let line = r.clone().map(|k| (locus.input_angles[k], angles[k]));
            let anno = chart.draw_series(LineSeries::new(line, color))?;
            if j == 0 {
                anno.label(label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }
        }
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE)
        .border_style(&BLACK)
        .label_font(font())
        .draw()?;
    root.present()?;
    Ok(())
}

/// Get the bounding box `[x_min, x_max, y_min, y_max]` of the points with
/// equal aspect ratio.
pub fn bounding_box(pts: &[[f64; 2]]) -> [f64; 4] {
    if pts.is_empty() {
        return [-1., 1., -1., 1.];
    }
    let [mut x_min, mut x_max] = [f64::INFINITY, -f64::INFINITY];
    let [mut y_min, mut y_max] = [f64::INFINITY, -f64::INFINITY];
    for &[x, y] in pts {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    let dx = (x_max - x_min).abs();
    let dy = (y_max - y_min).abs();
    // Keep a margin and avoid an empty range
    let r = dx.max(dy).max(f64::EPSILON) * 0.55;
    let cx = (x_min + x_max) * 0.5;
    let cy = (y_min + y_max) * 0.5;
    [cx - r, cx + r, cy - r, cy + r]
}

#[test]
fn plot_svg() {
    use crate::{solve, sweep, Branch, LinkageSpec};
    let spec = LinkageSpec::new(85., 75., 65., 20.).unwrap();
    let point = CouplerPoint::new(30., 45.).unwrap();
    let locus = sweep(&spec, &point, Branch::Open, 1.).unwrap();
    assert!(locus.segments().len() > 1);
    let pose = solve(&spec, 45., Branch::Open).unwrap();
    let mut buf = String::new();
    plot_locus(
        SVGBackend::with_string(&mut buf, (800, 800)),
        "Coupler curve",
        &locus,
        Some((&pose, &point)),
    )
    .unwrap();
    assert!(buf.contains("<svg"));
    let mut buf = String::new();
    plot_angles(SVGBackend::with_string(&mut buf, (800, 600)), "Angles", &locus).unwrap();
    assert!(buf.contains("<svg"));
}

#[test]
fn square_bounding_box() {
    let [x0, x1, y0, y1] = bounding_box(&[[0., 0.], [4., 1.]]);
    assert!((x1 - x0 - (y1 - y0)).abs() < 1e-12);
    assert!(x0 < 0. && x1 > 4.);
}
