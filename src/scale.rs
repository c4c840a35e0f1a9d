//! Linear scales mapping an abstract domain into pixel space
use crate::{
    config::DEFAULT_AMPLITUDE_DOMAIN,
    result::{ConfigError, ConfigResult},
};

/// Interpolate between `a` and `b` at `t`.
///
/// Written as `a * (1 - t) + b * t`, which yields `a` at `t == 0` and `b` at `t == 1` exactly.
#[expect(clippy::suboptimal_flops)]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// A `[start, end]` pair of real numbers with distinct, finite bounds.
///
/// The bounds may be descending. Use [`Domain::new`] to construct one.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Domain {
    start: f64,
    end: f64,
}

impl Domain {
    /// Create a new domain
    #[expect(clippy::float_cmp)]
    pub fn new(start: f64, end: f64) -> ConfigResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ConfigError::NonFiniteBound);
        }
        if start == end {
            return Err(ConfigError::InvalidScaleDomain(start));
        }
        Ok(Self { start, end })
    }
    /// `[0, 2π]`, one full period of a unit-frequency sine
    pub const FULL_PERIOD: Self = Self {
        start: 0.0,
        end: std::f64::consts::TAU,
    };
    /// [`DEFAULT_AMPLITUDE_DOMAIN`] as a [`Domain`]
    pub const DEFAULT_AMPLITUDE: Self = Self {
        start: DEFAULT_AMPLITUDE_DOMAIN.0,
        end: DEFAULT_AMPLITUDE_DOMAIN.1,
    };
    /// First bound of the domain, as given at construction
    #[must_use]
    pub const fn start(self) -> f64 {
        self.start
    }
    /// Second bound of the domain, as given at construction
    #[must_use]
    pub const fn end(self) -> f64 {
        self.end
    }
}

/// An affine map from a [`Domain`] to a pixel range.
///
/// Values outside the domain are extrapolated, never clamped.
/// The range can be inverted (`range_start > range_end`), which is what
/// a top-down pixel coordinate system wants for the y axis.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Scale {
    domain: Domain,
    range: (f64, f64),
}

impl Scale {
    /// Create a scale from an already validated domain. This can't fail.
    #[must_use]
    pub const fn new(domain: Domain, range_start: f64, range_end: f64) -> Self {
        Self {
            domain,
            range: (range_start, range_end),
        }
    }
    /// Map a domain value to the range
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let t = (value - self.domain.start) / (self.domain.end - self.domain.start);
        lerp(self.range.0, self.range.1, t)
    }
    /// Map a range value back to the domain.
    ///
    /// A degenerate range (both ends equal) gives non-finite results.
    #[must_use]
    pub fn invert(&self, pixel: f64) -> f64 {
        let t = (pixel - self.range.0) / (self.range.1 - self.range.0);
        lerp(self.domain.start, self.domain.end, t)
    }
    /// The domain this scale maps from
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }
    /// The `(start, end)` range this scale maps to
    #[must_use]
    pub const fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Build a linear scale mapping `[domain_min, domain_max]` onto `[range_min, range_max]`.
///
/// Fails with [`ConfigError::InvalidScaleDomain`] if the domain bounds are equal.
pub fn make_scale(
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
) -> ConfigResult<Scale> {
    Ok(Scale::new(
        Domain::new(domain_min, domain_max)?,
        range_min,
        range_max,
    ))
}
