//! Configuration for synthesis
use crate::{
    harmonic::HarmonicIdx,
    result::ConfigResult,
    sampler::Grid,
    scale::Domain,
    viewport::Margin,
};

/// Number of samples per waveform
pub const DEFAULT_RESOLUTION: usize = 100;

/// Amplitude range the y axis covers, both initially and after every resize.
pub const DEFAULT_AMPLITUDE_DOMAIN: (f64, f64) = (-4.0, 4.0);

/// Pixel margin around the plot on every side
pub const DEFAULT_MARGIN: f64 = 10.0;

/// Everything the synthesis pipeline needs to know that doesn't come from events
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SynthConfig {
    /// The x grid shared by every waveform. Its domain is also the x scale's domain.
    pub grid: Grid,
    /// Domain of the y scale
    pub amplitude_domain: Domain,
    /// Space left free around the plot
    pub margin: Margin,
    /// The index harmonic sets are expected to start at
    pub first_index: HarmonicIdx,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            amplitude_domain: Domain::DEFAULT_AMPLITUDE,
            margin: Margin::uniform(DEFAULT_MARGIN),
            first_index: HarmonicIdx::FIRST,
        }
    }
}

impl SynthConfig {
    /// Create a config, validating the domains and the resolution.
    pub fn new(
        domain: (f64, f64),
        resolution: usize,
        amplitude_domain: (f64, f64),
        margin: Margin,
    ) -> ConfigResult<Self> {
        Ok(Self {
            grid: Grid::new(Domain::new(domain.0, domain.1)?, resolution)?,
            amplitude_domain: Domain::new(amplitude_domain.0, amplitude_domain.1)?,
            margin,
            first_index: HarmonicIdx::FIRST,
        })
    }
}
