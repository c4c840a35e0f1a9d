//! Turning samples into smooth SVG path geometry
//!
//! The curve is a cardinal spline drawn as a chain of cubic Béziers.
//! It reproduces the output of the `d3-shape` cardinal curve feeding a `d3-path` context,
//! down to the formatting of the numbers, so geometry produced here
//! can be diffed against paths produced by browser frontends.
use {
    crate::{sampler::Sample, viewport::ScalePair},
    std::fmt::{self, Write as _},
};

/// Tension of the cardinal spline.
///
/// Part of the output format: changing it changes every path.
pub const CARDINAL_TENSION: f64 = 0.7;

/// SVG path data (the `d` attribute of a `<path>`) for one curve.
///
/// Empty when there was nothing to draw.
#[derive(Clone, PartialEq, Eq, Debug, Default, Hash)]
pub struct PathGeometry(String);

impl PathGeometry {
    /// The path data as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
    /// Whether the path draws nothing at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PathGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Write `v` the way JavaScript's `Number.prototype.toString` does.
///
/// Shortest round-trip digits, `-0` as `0`, and exponent notation outside `[1e-6, 1e21)`.
fn write_num(out: &mut String, v: f64) {
    // Writing into a `String` can't fail
    let _ = if v == 0.0 {
        out.write_str("0")
    } else if v.is_nan() {
        out.write_str("NaN")
    } else if v.is_infinite() {
        out.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" })
    } else if (1e-6..1e21).contains(&v.abs()) {
        write!(out, "{v}")
    } else {
        let exp = format!("{v:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(out, "{mantissa}e+{power}")
            }
            _ => out.write_str(&exp),
        }
    };
}

/// Accumulates path commands
struct PathWriter {
    d: String,
}

impl PathWriter {
    fn move_to(&mut self, (x, y): (f64, f64)) {
        self.d.push('M');
        self.coord(x, y);
    }
    fn line_to(&mut self, (x, y): (f64, f64)) {
        self.d.push('L');
        self.coord(x, y);
    }
    fn bezier_to(&mut self, c1: (f64, f64), c2: (f64, f64), to: (f64, f64)) {
        self.d.push('C');
        self.coord(c1.0, c1.1);
        self.d.push(',');
        self.coord(c2.0, c2.1);
        self.d.push(',');
        self.coord(to.0, to.1);
    }
    fn close(&mut self) {
        self.d.push('Z');
    }
    fn coord(&mut self, x: f64, y: f64) {
        write_num(&mut self.d, x);
        self.d.push(',');
        write_num(&mut self.d, y);
    }
}

/// Cardinal spline with a given tension
#[derive(Clone, Copy, Debug)]
pub struct Cardinal {
    /// Tangent scale per Bézier control point, `(1 - tension) / 6`
    k: f64,
}

impl Default for Cardinal {
    fn default() -> Self {
        Self::new(CARDINAL_TENSION)
    }
}

impl Cardinal {
    /// Create a spline with `tension`. `0` gives a Catmull-Rom like curve, `1` straight lines.
    #[must_use]
    pub fn new(tension: f64) -> Self {
        Self {
            k: (1.0 - tension) / 6.0,
        }
    }
    /// Control point leaving `from`, with the tangent taken along the chord `back -> ahead`
    #[expect(clippy::suboptimal_flops)]
    fn control(self, from: (f64, f64), ahead: (f64, f64), back: (f64, f64)) -> (f64, f64) {
        (
            from.0 + self.k * (ahead.0 - back.0),
            from.1 + self.k * (ahead.1 - back.1),
        )
    }
    /// Draw a curve through already projected pixel points.
    ///
    /// - no points: empty path
    /// - one point: a move followed by a close
    /// - two points: a straight line
    /// - otherwise one cubic segment between each pair of neighbors.
    ///   At the two ends the tangent is one sided: the control point next to
    ///   an endpoint lies on the endpoint itself.
    #[must_use]
    pub fn curve(self, pts: &[(f64, f64)]) -> PathGeometry {
        let mut path = PathWriter {
            d: String::with_capacity(pts.len() * 64),
        };
        match pts {
            [] => {}
            [p] => {
                path.move_to(*p);
                path.close();
            }
            [p0, p1] => {
                path.move_to(*p0);
                path.line_to(*p1);
            }
            _ => {
                path.move_to(pts[0]);
                let last = pts.len() - 1;
                for i in 0..last {
                    let (p, next) = (pts[i], pts[i + 1]);
                    let back = if i == 0 { next } else { pts[i - 1] };
                    let ahead = if i + 1 == last { p } else { pts[i + 2] };
                    let c1 = self.control(p, next, back);
                    let c2 = self.control(next, p, ahead);
                    path.bezier_to(c1, c2, next);
                }
            }
        }
        PathGeometry(path.d)
    }
}

/// Scale `samples` into pixel space with `scales` and draw them as a
/// cardinal spline with [`CARDINAL_TENSION`].
#[must_use]
pub fn to_path(samples: &[Sample], scales: &ScalePair) -> PathGeometry {
    to_path_with(samples, scales, Cardinal::default())
}

/// [`to_path`] with a custom spline
#[must_use]
pub fn to_path_with(samples: &[Sample], scales: &ScalePair, curve: Cardinal) -> PathGeometry {
    let pts: Vec<(f64, f64)> = samples
        .iter()
        .map(|s| (scales.x.apply(s.x), scales.y.apply(s.y)))
        .collect();
    curve.curve(&pts)
}
