//! Event driven synthesis of the paths a frontend draws
//!
//! The [`Pipeline`] keeps the latest harmonic set, viewport size and scales.
//! Events are queued in an [`Inbox`] and absorbed all at once before a pass,
//! so a pass always works from one consistent snapshot of the newest inputs.
use {
    crate::{
        axis::{AxisKind, Axes, axes},
        config::SynthConfig,
        harmonic::{HarmonicIdx, HarmonicSet},
        path::{PathGeometry, to_path},
        result::{HarmonicSetError, SetResult},
        sampler::{Grid, sample, sum},
        viewport::{ScalePair, Viewport, ViewportAdapter},
    },
    arrayvec::ArrayVec,
    std::collections::VecDeque,
};

/// Sequence number the event source stamps each event with.
///
/// Must increase with every event of the same kind the source emits.
pub type Seq = u64;

/// What happened
#[derive(Clone, Debug)]
pub enum EventKind {
    /// A new harmonic set replaces the old one
    Harmonics(HarmonicSet),
    /// The viewport was resized
    Resize(Viewport),
}

/// An input notification for the [`Pipeline`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Position of this event in its source's ordering
    pub seq: Seq,
    /// The payload
    pub kind: EventKind,
}

bitflags::bitflags! {
    /// Which inputs changed since the previous pass
    #[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
    pub struct Changed: u8 {
        /// The harmonic set was replaced
        const HARMONICS = 0b01;
        /// The viewport (and with it the scales) changed
        const VIEWPORT  = 0b10;
    }
}

/// Path of one harmonic
#[derive(Clone, PartialEq, Debug)]
pub struct WavePath {
    /// Which harmonic this is
    pub index: HarmonicIdx,
    /// Its geometry in pixel space
    pub path: PathGeometry,
}

/// Path of one reference line
#[derive(Clone, PartialEq, Debug)]
pub struct AxisPath {
    /// Which line this is
    pub kind: AxisKind,
    /// Its geometry in pixel space
    pub path: PathGeometry,
}

/// Everything one synthesis pass produces
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Frame {
    /// One path per harmonic, ascending by index
    pub waves: Vec<WavePath>,
    /// The composite waveform
    pub sum: PathGeometry,
    /// Reference lines
    pub axes: ArrayVec<AxisPath, 3>,
    /// What changed compared to the previous frame
    pub changed: Changed,
    /// Sequence number of the harmonic set this frame was built from
    pub harmonics_seq: Option<Seq>,
    /// Sequence number of the viewport this frame was built from
    pub viewport_seq: Option<Seq>,
}

/// Compute the per-harmonic paths and the sum path
#[must_use]
pub fn synthesize_waves(
    set: &HarmonicSet,
    scales: &ScalePair,
    grid: &Grid,
) -> (Vec<WavePath>, PathGeometry) {
    let waves = set
        .iter()
        .map(|(index, harmonic)| WavePath {
            index,
            path: to_path(&sample(harmonic, grid), scales),
        })
        .collect();
    (waves, to_path(&sum(set, grid), scales))
}

/// Compute the paths of the reference lines
#[must_use]
pub fn synthesize_axes(axes: &Axes, scales: &ScalePair) -> ArrayVec<AxisPath, 3> {
    axes.iter()
        .map(|line| AxisPath {
            kind: line.kind,
            path: to_path(&line.samples, scales),
        })
        .collect()
}

/// Compute a whole frame from scratch.
///
/// Pure: the same inputs always give the same frame.
#[must_use]
pub fn recompute(set: &HarmonicSet, scales: &ScalePair, axes: &Axes, grid: &Grid) -> Frame {
    let (waves, sum) = synthesize_waves(set, scales, grid);
    Frame {
        waves,
        sum,
        axes: synthesize_axes(axes, scales),
        changed: Changed::all(),
        harmonics_seq: None,
        viewport_seq: None,
    }
}

/// Queue of events waiting for the next pass
#[derive(Debug)]
pub struct Inbox {
    events: VecDeque<Event>,
    /// Index every queued harmonic set has to start at
    first_index: HarmonicIdx,
}

impl Inbox {
    const fn new(first_index: HarmonicIdx) -> Self {
        Self {
            events: VecDeque::new(),
            first_index,
        }
    }
    /// Queue an event.
    ///
    /// Harmonic sets not starting at the configured first index are rejected,
    /// since the rendering side looks up colors and legends by index.
    pub fn post(&mut self, event: Event) -> SetResult {
        if let EventKind::Harmonics(set) = &event.kind
            && set.start() != self.first_index
        {
            return Err(HarmonicSetError::WrongStart {
                expected: self.first_index,
                found: set.start(),
            });
        }
        self.events.push_back(event);
        Ok(())
    }
    /// Number of queued events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }
    /// Whether nothing is queued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Receives every frame the pipeline completes.
///
/// Events posted to `inbox` while presenting are handled after the current
/// pass, by the same [`Pipeline::process_with`] call.
pub trait FrameSink {
    /// Present a freshly completed frame
    fn present(&mut self, frame: &Frame, inbox: &mut Inbox);
}

impl<F: FnMut(&Frame, &mut Inbox)> FrameSink for F {
    fn present(&mut self, frame: &Frame, inbox: &mut Inbox) {
        self(frame, inbox);
    }
}

/// Keeps the latest inputs and turns events into [`Frame`]s.
///
/// The pipeline is idle whenever it can be reached through a reference.
/// A pass (synthesizing, then presenting) runs inside [`Pipeline::process_with`],
/// which holds it mutably borrowed, so its inputs can't be touched mid-pass.
/// The only way in during a pass is the [`Inbox`] handed to the [`FrameSink`].
pub struct Pipeline {
    config: SynthConfig,
    adapter: ViewportAdapter,
    axes: Axes,
    harmonics: HarmonicSet,
    harmonics_seq: Option<Seq>,
    viewport: Viewport,
    viewport_seq: Option<Seq>,
    scales: ScalePair,
    pending: Changed,
    inbox: Inbox,
    frame: Option<Frame>,
}

impl Pipeline {
    /// Create a pipeline for an initial viewport.
    ///
    /// The first pass draws the axes and a flat sum even if no harmonics arrived yet.
    #[must_use]
    pub fn new(config: SynthConfig, viewport: Viewport) -> Self {
        let adapter = ViewportAdapter::from_config(&config);
        Self {
            axes: axes(&config.grid, config.amplitude_domain),
            harmonics: HarmonicSet::empty(config.first_index),
            harmonics_seq: None,
            viewport,
            viewport_seq: None,
            scales: adapter.on_resize(viewport, config.margin),
            pending: Changed::all(),
            inbox: Inbox::new(config.first_index),
            frame: None,
            adapter,
            config,
        }
    }
    /// Queue an event for the next pass. See [`Inbox::post`].
    pub fn post(&mut self, event: Event) -> SetResult {
        self.inbox.post(event)
    }
    /// Queue an event and run passes until everything is processed
    pub fn submit(&mut self, event: Event) -> SetResult<Option<&Frame>> {
        self.post(event)?;
        Ok(self.process())
    }
    /// Run passes until the inbox is drained, without a sink
    pub fn process(&mut self) -> Option<&Frame> {
        self.process_with(&mut |_: &Frame, _: &mut Inbox| {})
    }
    /// Run passes until the inbox is drained, presenting every completed frame to `sink`.
    ///
    /// Returns the latest frame.
    pub fn process_with(&mut self, sink: &mut impl FrameSink) -> Option<&Frame> {
        loop {
            let changed = self.absorb();
            if changed.is_empty() {
                break;
            }
            let frame = self.synthesize(changed);
            let frame = self.frame.insert(frame);
            sink.present(frame, &mut self.inbox);
        }
        self.frame.as_ref()
    }
    /// Move queued events into the current inputs, dropping stale ones
    fn absorb(&mut self) -> Changed {
        let mut changed = std::mem::take(&mut self.pending);
        while let Some(Event { seq, kind }) = self.inbox.events.pop_front() {
            match kind {
                EventKind::Harmonics(set) => {
                    if self.harmonics_seq.is_some_and(|last| seq <= last) {
                        continue;
                    }
                    self.harmonics = set;
                    self.harmonics_seq = Some(seq);
                    changed |= Changed::HARMONICS;
                }
                EventKind::Resize(size) => {
                    if self.viewport_seq.is_some_and(|last| seq <= last) {
                        continue;
                    }
                    self.viewport = size;
                    self.viewport_seq = Some(seq);
                    changed |= Changed::VIEWPORT;
                }
            }
        }
        changed
    }
    fn synthesize(&mut self, changed: Changed) -> Frame {
        if changed.contains(Changed::VIEWPORT) {
            self.scales = self.adapter.on_resize(self.viewport, self.config.margin);
        }
        let (waves, sum) = synthesize_waves(&self.harmonics, &self.scales, &self.config.grid);
        let axes = match self.frame.take() {
            Some(prev) if !changed.contains(Changed::VIEWPORT) => prev.axes,
            _ => synthesize_axes(&self.axes, &self.scales),
        };
        Frame {
            waves,
            sum,
            axes,
            changed,
            harmonics_seq: self.harmonics_seq,
            viewport_seq: self.viewport_seq,
        }
    }
    /// The latest completed frame
    #[must_use]
    pub const fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }
    /// The scales of the latest viewport
    #[must_use]
    pub const fn scales(&self) -> &ScalePair {
        &self.scales
    }
    /// The configuration this pipeline was built with
    #[must_use]
    pub const fn config(&self) -> &SynthConfig {
        &self.config
    }
    /// (testing-only) The inputs the next pass would read
    #[cfg(feature = "testing")]
    #[must_use]
    pub const fn snapshot(&self) -> (&HarmonicSet, Viewport, &ScalePair) {
        (&self.harmonics, self.viewport, &self.scales)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{harmonic::Harmonic, viewport::Margin},
    };

    fn cfg() -> SynthConfig {
        SynthConfig::default()
    }

    fn size(width: f64, height: f64) -> Viewport {
        Viewport { width, height }
    }

    fn harmonics(seq: Seq, amplitudes: &[f64]) -> Event {
        Event {
            seq,
            kind: EventKind::Harmonics(
                HarmonicSet::from_amplitudes(amplitudes, HarmonicIdx::FIRST).unwrap(),
            ),
        }
    }

    fn resize(seq: Seq, width: f64, height: f64) -> Event {
        Event {
            seq,
            kind: EventKind::Resize(size(width, height)),
        }
    }

    #[test]
    fn first_pass_without_harmonics() {
        let mut p = Pipeline::new(cfg(), size(800.0, 600.0));
        let frame = p.process().unwrap();
        assert!(frame.waves.is_empty());
        assert!(!frame.sum.is_empty());
        assert_eq!(frame.axes.len(), 3);
        assert_eq!(frame.harmonics_seq, None);
        // Nothing new, nothing to do
        let before = p.frame().cloned();
        assert_eq!(p.process().cloned(), before);
    }

    #[test]
    fn frame_matches_pure_recompute() {
        let config = cfg();
        let mut p = Pipeline::new(config, size(640.0, 480.0));
        p.post(harmonics(1, &[1.0, 0.5, 0.25])).unwrap();
        p.post(resize(1, 400.0, 300.0)).unwrap();
        let frame = p.process().unwrap().clone();
        let set = HarmonicSet::from_amplitudes(&[1.0, 0.5, 0.25], HarmonicIdx::FIRST).unwrap();
        let scales = ViewportAdapter::from_config(&config).on_resize(size(400.0, 300.0), config.margin);
        let pure = recompute(
            &set,
            &scales,
            &axes(&config.grid, config.amplitude_domain),
            &config.grid,
        );
        assert_eq!(frame.waves, pure.waves);
        assert_eq!(frame.sum, pure.sum);
        assert_eq!(frame.axes, pure.axes);
        let order: Vec<u8> = frame.waves.iter().map(|w| w.index.0).collect();
        assert_eq!(order, [1, 2, 3]);
        assert_eq!(frame.harmonics_seq, Some(1));
        assert_eq!(frame.viewport_seq, Some(1));
    }

    #[test]
    fn harmonic_update_keeps_axes() {
        let mut p = Pipeline::new(cfg(), size(800.0, 600.0));
        let axes_before = p.process().unwrap().axes.clone();
        let frame = p.submit(harmonics(1, &[2.0])).unwrap().unwrap();
        assert_eq!(frame.changed, Changed::HARMONICS);
        assert_eq!(frame.axes, axes_before);
        assert_eq!(frame.waves.len(), 1);
        let frame = p.submit(resize(1, 300.0, 200.0)).unwrap().unwrap();
        assert_eq!(frame.changed, Changed::VIEWPORT);
        assert_ne!(frame.axes, axes_before);
        // Harmonics survive a resize
        assert_eq!(frame.waves.len(), 1);
    }

    #[test]
    fn stale_events_are_dropped() {
        let mut p = Pipeline::new(cfg(), size(800.0, 600.0));
        p.post(harmonics(5, &[1.0, 1.0])).unwrap();
        p.post(harmonics(3, &[1.0, 1.0, 1.0])).unwrap();
        p.post(resize(2, 500.0, 400.0)).unwrap();
        p.post(resize(2, 100.0, 100.0)).unwrap();
        let frame = p.process().unwrap();
        assert_eq!(frame.waves.len(), 2);
        assert_eq!(frame.harmonics_seq, Some(5));
        assert_eq!(p.scales().x.range(), (10.0, 490.0));
        // A late event on its own doesn't cause a pass
        let before = p.frame().cloned();
        assert_eq!(p.submit(harmonics(4, &[9.0])).unwrap().cloned(), before);
    }

    #[test]
    fn events_posted_while_presenting_run_next() {
        let mut p = Pipeline::new(cfg(), size(800.0, 600.0));
        p.post(harmonics(1, &[1.0])).unwrap();
        let mut seen = Vec::new();
        let mut sink = |frame: &Frame, inbox: &mut Inbox| {
            seen.push((frame.harmonics_seq, frame.viewport_seq));
            if frame.harmonics_seq == Some(1) {
                inbox.post(harmonics(2, &[1.0, 0.5])).unwrap();
                inbox.post(resize(7, 200.0, 100.0)).unwrap();
                assert_eq!(inbox.len(), 2);
            }
        };
        let last = p.process_with(&mut sink).unwrap().clone();
        assert_eq!(seen, [(Some(1), None), (Some(2), Some(7))]);
        assert_eq!(last.waves.len(), 2);
        assert!(p.inbox.is_empty());
    }

    #[test]
    fn resize_round_trip_reproduces_frame() {
        let mut p = Pipeline::new(cfg(), size(800.0, 600.0));
        p.post(Event {
            seq: 1,
            kind: EventKind::Harmonics(
                HarmonicSet::from_descriptors(
                    [(
                        HarmonicIdx(1),
                        Harmonic {
                            amplitude: 1.5,
                            frequency: 3.0,
                            phase: 0.25,
                        },
                    )],
                    HarmonicIdx::FIRST,
                )
                .unwrap(),
            ),
        })
        .unwrap();
        p.post(resize(1, 800.0, 600.0)).unwrap();
        let first = p.process().unwrap().clone();
        p.submit(resize(2, 321.0, 123.0)).unwrap();
        let back = p.submit(resize(3, 800.0, 600.0)).unwrap().unwrap();
        assert_eq!(first.waves, back.waves);
        assert_eq!(first.sum, back.sum);
        assert_eq!(first.axes, back.axes);
    }

    #[test]
    fn sets_must_start_at_configured_index() {
        let mut p = Pipeline::new(cfg(), size(800.0, 600.0));
        let offset = HarmonicSet::from_descriptors(
            [(
                HarmonicIdx(5),
                Harmonic {
                    amplitude: 1.0,
                    frequency: 5.0,
                    phase: 0.0,
                },
            )],
            HarmonicIdx(5),
        )
        .unwrap();
        let err = p
            .submit(Event {
                seq: 1,
                kind: EventKind::Harmonics(offset.clone()),
            })
            .map(|frame| frame.cloned());
        assert_eq!(
            err,
            Err(HarmonicSetError::WrongStart {
                expected: p.config().first_index,
                found: HarmonicIdx(5),
            })
        );
        assert!(p.inbox.is_empty());
        assert!(p.frame().is_none());
        // Sets posted while presenting go through the same check
        let mut rejected = None;
        let mut sink = |_: &Frame, inbox: &mut Inbox| {
            if rejected.is_none() {
                rejected = Some(inbox.post(Event {
                    seq: 2,
                    kind: EventKind::Harmonics(offset.clone()),
                }));
            }
        };
        let frame = p.process_with(&mut sink).unwrap();
        assert!(frame.waves.is_empty());
        assert!(matches!(rejected, Some(Err(HarmonicSetError::WrongStart { .. }))));
        // A pipeline configured to start there takes it
        let mut config = cfg();
        config.first_index = HarmonicIdx(5);
        let mut p = Pipeline::new(config, size(800.0, 600.0));
        let frame = p
            .submit(Event {
                seq: 1,
                kind: EventKind::Harmonics(offset),
            })
            .unwrap()
            .unwrap();
        assert_eq!(frame.waves[0].index, HarmonicIdx(5));
    }

    #[test]
    fn margins_come_from_config() {
        let mut config = cfg();
        config.margin = Margin {
            top: 5.0,
            right: 20.0,
            bottom: 15.0,
            left: 30.0,
        };
        let p = Pipeline::new(config, size(200.0, 100.0));
        assert_eq!(p.scales().x.range(), (30.0, 180.0));
        assert_eq!(p.scales().y.range(), (85.0, 5.0));
    }
}
