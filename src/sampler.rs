//! Sampling harmonics and their sum over a shared x grid
use crate::{
    config::DEFAULT_RESOLUTION,
    harmonic::{Harmonic, HarmonicSet},
    result::{ConfigError, ConfigResult},
    scale::{Domain, lerp},
};

/// One point of a sampled curve
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Sample {
    /// Domain value
    pub x: f64,
    /// Amplitude
    pub y: f64,
}

/// Ordered samples of a curve
pub type SampleSeq = Vec<Sample>;

/// The x positions every waveform is sampled at.
///
/// Every harmonic and the sum are sampled on the same grid,
/// which is what makes pointwise summation well defined.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Grid {
    domain: Domain,
    resolution: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            domain: Domain::FULL_PERIOD,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl Grid {
    /// Create a grid of `resolution` samples spanning `domain`.
    ///
    /// The domain must be ascending and the resolution at least 2.
    pub fn new(domain: Domain, resolution: usize) -> ConfigResult<Self> {
        if domain.start() > domain.end() {
            return Err(ConfigError::ReversedGridDomain {
                start: domain.start(),
                end: domain.end(),
            });
        }
        if resolution < 2 {
            return Err(ConfigError::ResolutionTooLow(resolution));
        }
        Ok(Self { domain, resolution })
    }
    /// The domain the grid spans
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }
    /// Number of samples
    #[must_use]
    pub const fn resolution(&self) -> usize {
        self.resolution
    }
    /// The x value of sample `i`
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn x_at(&self, i: usize) -> f64 {
        let t = i as f64 / (self.resolution - 1) as f64;
        lerp(self.domain.start(), self.domain.end(), t)
    }
    /// All x values of the grid, ascending
    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.resolution).map(|i| self.x_at(i))
    }
}

/// Sample a single harmonic over `grid`.
///
/// Returns exactly `grid.resolution()` samples with strictly increasing x.
#[must_use]
pub fn sample(harmonic: &Harmonic, grid: &Grid) -> SampleSeq {
    grid.xs()
        .map(|x| Sample {
            x,
            y: harmonic.eval(x),
        })
        .collect()
}

/// Sample the pointwise sum of every harmonic in `set` over `grid`.
///
/// Each harmonic is evaluated on the same grid here rather than accepting
/// presampled input, so mismatched grids can't happen.
/// The sum is accumulated in ascending index order, starting from zero.
/// An empty set gives a flat zero line.
#[must_use]
pub fn sum(set: &HarmonicSet, grid: &Grid) -> SampleSeq {
    let mut out: SampleSeq = grid.xs().map(|x| Sample { x, y: 0.0 }).collect();
    for (_, harmonic) in set.iter() {
        for smp in &mut out {
            smp.y += harmonic.eval(smp.x);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::harmonic::HarmonicIdx,
        std::f64::consts::{FRAC_PI_2, PI},
    };

    const EPS: f64 = 1e-12;

    fn grid(resolution: usize) -> Grid {
        Grid::new(Domain::FULL_PERIOD, resolution).unwrap()
    }

    fn set(pairs: &[(f64, f64, f64)]) -> HarmonicSet {
        HarmonicSet::from_descriptors(
            pairs.iter().enumerate().map(|(i, &(amplitude, frequency, phase))| {
                (
                    HarmonicIdx(u8::try_from(i + 1).unwrap()),
                    Harmonic {
                        amplitude,
                        frequency,
                        phase,
                    },
                )
            }),
            HarmonicIdx::FIRST,
        )
        .unwrap()
    }

    #[test]
    fn unit_sine_at_five_points() {
        let g = grid(5);
        let single = set(&[(1.0, 1.0, 0.0)]);
        let (_, h) = single.iter().next().unwrap();
        let smps = sample(h, &g);
        let xs: Vec<f64> = smps.iter().map(|s| s.x).collect();
        assert_eq!(xs, [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2, 2.0 * PI]);
        for (smp, want) in smps.iter().zip([0.0, 1.0, 0.0, -1.0, 0.0]) {
            assert!((smp.y - want).abs() < EPS, "{smp:?} vs {want}");
        }
        assert_eq!(sum(&single, &g), smps);
    }

    #[test]
    fn two_harmonics_sum_pointwise() {
        let g = grid(5);
        let pair = set(&[(1.0, 1.0, 0.0), (0.5, 2.0, 0.0)]);
        let parts: Vec<SampleSeq> = pair.iter().map(|(_, h)| sample(h, &g)).collect();
        let total = sum(&pair, &g);
        for i in 0..g.resolution() {
            assert_eq!(total[i].x, parts[0][i].x);
            assert_eq!(total[i].y, parts[0][i].y + parts[1][i].y);
        }
        // x = 0
        assert_eq!(parts[0][0].y, 0.0);
        assert_eq!(parts[1][0].y, 0.0);
        assert_eq!(total[0].y, 0.0);
        // x = π/2
        assert!((parts[0][1].y - 1.0).abs() < EPS);
        assert!(parts[1][1].y.abs() < EPS);
        assert!((total[1].y - 1.0).abs() < EPS);
    }

    #[test]
    fn x_strictly_increasing_and_sized() {
        let h = Harmonic {
            amplitude: 3.0,
            frequency: 7.5,
            phase: -1.0,
        };
        for n in [2, 3, 17, 500] {
            let smps = sample(&h, &grid(n));
            assert_eq!(smps.len(), n);
            assert!(smps.windows(2).all(|w| w[0].x < w[1].x));
            assert_eq!(smps[0].x, 0.0);
            assert_eq!(smps[n - 1].x, 2.0 * PI);
        }
    }

    #[test]
    fn sampling_is_deterministic() {
        let s = set(&[(1.0, 1.0, 0.3), (0.25, 4.0, 1.1), (0.1, 9.0, 2.0)]);
        let g = grid(64);
        assert_eq!(sum(&s, &g), sum(&s, &g));
    }

    #[test]
    fn empty_set_sums_to_zero() {
        let g = grid(10);
        let total = sum(&HarmonicSet::default(), &g);
        assert_eq!(total.len(), 10);
        assert!(total.iter().all(|s| s.y == 0.0));
    }

    #[test]
    fn bad_grids_rejected() {
        assert_eq!(
            Grid::new(Domain::FULL_PERIOD, 1),
            Err(ConfigError::ResolutionTooLow(1))
        );
        let reversed = Domain::new(1.0, 0.0).unwrap();
        assert!(matches!(
            Grid::new(reversed, 10),
            Err(ConfigError::ReversedGridDomain { .. })
        ));
    }
}
