use {crate::harmonic::HarmonicIdx, thiserror::Error};

/// Error that can happen when building scales, domains or sampling grids
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// A scale needs two distinct domain bounds, otherwise mapping divides by zero.
    #[error("Invalid scale domain: both bounds are {0}")]
    InvalidScaleDomain(f64),
    /// Domain bounds must be finite numbers
    #[error("Domain bound is not finite")]
    NonFiniteBound,
    /// A sampling grid must run from a smaller to a larger x, so that x is strictly increasing.
    #[error("Grid domain is reversed ({start} > {end})")]
    ReversedGridDomain {
        /// Start of the rejected domain
        start: f64,
        /// End of the rejected domain
        end: f64,
    },
    /// A grid needs at least 2 samples to span its domain.
    #[error("Resolution {0} is too low (need at least 2 samples)")]
    ResolutionTooLow(usize),
}

/// Error that can happen when assembling a [`HarmonicSet`](crate::HarmonicSet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HarmonicSetError {
    /// Indices must be contiguous, since color and legend lookup is keyed by index.
    #[error("Harmonic index gap: expected {expected:?}, found {found:?}")]
    Gap {
        /// The index that should have come next
        expected: HarmonicIdx,
        /// The index that came instead
        found: HarmonicIdx,
    },
    /// The same index was given twice
    #[error("Duplicate harmonic index {0:?}")]
    Duplicate(HarmonicIdx),
    /// The set doesn't start at the index the pipeline is configured for
    #[error("Harmonic set starts at {found:?}, expected {expected:?}")]
    WrongStart {
        /// The configured first index
        expected: HarmonicIdx,
        /// Where the set actually starts
        found: HarmonicIdx,
    },
    /// More harmonics than fit into the index type
    #[error("Too many harmonics for the index range")]
    IndexOverflow,
}

/// Result of building configuration values (scales, domains, grids)
pub type ConfigResult<T = ()> = Result<T, ConfigError>;

/// Result of assembling a harmonic set
pub type SetResult<T = ()> = Result<T, HarmonicSetError>;
