use {
    crate::{
        sampler::{Grid, Sample, SampleSeq},
        scale::Domain,
    },
    arrayvec::ArrayVec,
};

/// Which reference line an [`AxisLine`] is
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum AxisKind {
    /// Horizontal line at `y = 0` across the whole grid
    Zero,
    /// Vertical line at the start of the grid domain
    DomainStart,
    /// Vertical line at the end of the grid domain
    DomainEnd,
}

/// A reference line drawn behind the waveforms
#[derive(Clone, PartialEq, Debug)]
pub struct AxisLine {
    /// What this line marks
    pub kind: AxisKind,
    /// Samples of the line, in domain/amplitude coordinates
    pub samples: SampleSeq,
}

/// Every axis line, in draw order
pub type Axes = ArrayVec<AxisLine, 3>;

/// Generate the reference lines for `grid`.
///
/// The zero line is sampled on the grid itself. The domain bound lines
/// span `amplitude` vertically with two samples each.
/// Only depends on the grid and the amplitude domain, never on harmonics.
#[must_use]
pub fn axes(grid: &Grid, amplitude: Domain) -> Axes {
    let vertical = |kind, x| AxisLine {
        kind,
        samples: vec![
            Sample {
                x,
                y: amplitude.start(),
            },
            Sample {
                x,
                y: amplitude.end(),
            },
        ],
    };
    let mut out = Axes::new();
    out.push(AxisLine {
        kind: AxisKind::Zero,
        samples: grid.xs().map(|x| Sample { x, y: 0.0 }).collect(),
    });
    out.push(vertical(AxisKind::DomainStart, grid.domain().start()));
    out.push(vertical(AxisKind::DomainEnd, grid.domain().end()));
    out
}
