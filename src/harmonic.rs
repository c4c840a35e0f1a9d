use crate::result::{HarmonicSetError, SetResult};

/// Harmonic index
///
/// Determines draw order, and is what the rendering side uses to look up colors and legends.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct HarmonicIdx(pub u8);

impl HarmonicIdx {
    /// Where harmonic numbering starts by default (the fundamental)
    pub const FIRST: Self = Self(1);
    /// Get the index as a usize
    #[must_use]
    pub fn usize(self) -> usize {
        usize::from(self.0)
    }
    fn offset(self, by: usize) -> Option<Self> {
        let n = u8::try_from(by).ok()?;
        self.0.checked_add(n).map(Self)
    }
}

/// A single sinusoidal component: `amplitude * sin(frequency * x + phase)`
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Harmonic {
    /// Peak value of the sine
    pub amplitude: f64,
    /// Angular frequency (cycles per `2π` of x)
    pub frequency: f64,
    /// Phase offset in radians
    pub phase: f64,
}

impl Harmonic {
    /// Evaluate the harmonic at `x`
    // Keep unfused, fma changes the rounding of the output geometry.
    #[expect(clippy::suboptimal_flops)]
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        self.amplitude * (self.frequency * x + self.phase).sin()
    }
}

/// A set of [`Harmonic`]s keyed by contiguous [`HarmonicIdx`]s.
///
/// INVARIANT: the indices are `start, start + 1, ..., start + len - 1`, without gaps.
/// The set is immutable; an update replaces the whole set.
#[derive(Clone, PartialEq, Debug)]
pub struct HarmonicSet {
    start: HarmonicIdx,
    harmonics: Vec<Harmonic>,
}

impl Default for HarmonicSet {
    fn default() -> Self {
        Self::empty(HarmonicIdx::FIRST)
    }
}

impl HarmonicSet {
    /// A set with no harmonics in it
    #[must_use]
    pub const fn empty(start: HarmonicIdx) -> Self {
        Self {
            start,
            harmonics: Vec::new(),
        }
    }
    /// Build a set from `(index, harmonic)` pairs in any order.
    ///
    /// The indices must be unique and cover `start..` without gaps.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = (HarmonicIdx, Harmonic)>,
        start: HarmonicIdx,
    ) -> SetResult<Self> {
        let mut pairs: Vec<_> = descriptors.into_iter().collect();
        pairs.sort_by_key(|(idx, _)| *idx);
        let mut harmonics = Vec::with_capacity(pairs.len());
        for (i, (idx, harmonic)) in pairs.into_iter().enumerate() {
            let expected = start.offset(i).ok_or(HarmonicSetError::IndexOverflow)?;
            if idx != expected {
                if i > 0 && start.offset(i - 1) == Some(idx) {
                    return Err(HarmonicSetError::Duplicate(idx));
                }
                return Err(HarmonicSetError::Gap {
                    expected,
                    found: idx,
                });
            }
            harmonics.push(harmonic);
        }
        Ok(Self { start, harmonics })
    }
    /// Build a Fourier series style set from a list of amplitudes.
    ///
    /// The harmonic at index `n` gets frequency `n` and phase `0`.
    pub fn from_amplitudes(amplitudes: &[f64], start: HarmonicIdx) -> SetResult<Self> {
        let mut harmonics = Vec::with_capacity(amplitudes.len());
        for (i, &amplitude) in amplitudes.iter().enumerate() {
            let idx = start.offset(i).ok_or(HarmonicSetError::IndexOverflow)?;
            harmonics.push(Harmonic {
                amplitude,
                frequency: f64::from(idx.0),
                phase: 0.0,
            });
        }
        Ok(Self { start, harmonics })
    }
    /// The index of the first harmonic
    #[must_use]
    pub const fn start(&self) -> HarmonicIdx {
        self.start
    }
    /// Number of harmonics in the set
    #[must_use]
    pub const fn len(&self) -> usize {
        self.harmonics.len()
    }
    /// Whether the set contains no harmonics
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.harmonics.is_empty()
    }
    /// Look up the harmonic at `idx`
    #[must_use]
    pub fn get(&self, idx: HarmonicIdx) -> Option<&Harmonic> {
        let i = idx.usize().checked_sub(self.start.usize())?;
        self.harmonics.get(i)
    }
    /// Iterate the harmonics in ascending index order
    // Indices were checked to fit into `u8` when the set was built
    #[expect(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (HarmonicIdx, &Harmonic)> {
        self.harmonics
            .iter()
            .enumerate()
            .map(|(i, h)| (HarmonicIdx(self.start.0 + i as u8), h))
    }
}
