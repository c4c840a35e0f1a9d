#![doc = include_str!("../README.md")]
// When we return an error type, the possible errors are encoded within it.
#![allow(clippy::missing_errors_doc)]

mod axis;
pub mod config;
mod harmonic;
mod path;
pub mod pipeline;
mod result;
mod sampler;
mod scale;
mod viewport;

pub use {
    axis::{AxisKind, AxisLine, Axes, axes},
    config::SynthConfig,
    harmonic::{Harmonic, HarmonicIdx, HarmonicSet},
    path::{CARDINAL_TENSION, Cardinal, PathGeometry, to_path, to_path_with},
    pipeline::{
        AxisPath, Changed, Event, EventKind, Frame, FrameSink, Inbox, Pipeline, Seq,
        WavePath, recompute,
    },
    result::{ConfigError, ConfigResult, HarmonicSetError, SetResult},
    sampler::{Grid, Sample, SampleSeq, sample, sum},
    scale::{Domain, Scale, lerp, make_scale},
    viewport::{Margin, ScalePair, Viewport, ViewportAdapter},
};
