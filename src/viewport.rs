use crate::{
    config::SynthConfig,
    scale::{Domain, Scale},
};

/// Size of the area the plot is drawn into, in pixels
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Viewport {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl Viewport {
    /// Create a viewport whose height is `ratio * width`
    #[must_use]
    pub fn with_aspect(width: f64, ratio: f64) -> Self {
        Self {
            width,
            height: ratio * width,
        }
    }
}

/// Space kept free around the plot, in pixels
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Margin {
    /// Above the plot
    pub top: f64,
    /// Right of the plot
    pub right: f64,
    /// Below the plot
    pub bottom: f64,
    /// Left of the plot
    pub left: f64,
}

impl Margin {
    /// The same margin on all four sides
    #[must_use]
    pub const fn uniform(px: f64) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }
}

/// The x and y scales of one render
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ScalePair {
    /// Domain (x) axis
    pub x: Scale,
    /// Amplitude (y) axis
    pub y: Scale,
}

/// Builds the [`ScalePair`] for a given viewport size.
///
/// The domains are fixed at construction, so this never fails and can be
/// called at any time, including before any harmonic data arrived.
#[derive(Clone, Copy, Debug)]
pub struct ViewportAdapter {
    x_domain: Domain,
    y_domain: Domain,
}

impl ViewportAdapter {
    /// Adapter mapping `x_domain` horizontally and `y_domain` vertically
    #[must_use]
    pub const fn new(x_domain: Domain, y_domain: Domain) -> Self {
        Self { x_domain, y_domain }
    }
    /// Adapter for the grid domain and amplitude domain of `cfg`
    #[must_use]
    pub const fn from_config(cfg: &SynthConfig) -> Self {
        Self::new(cfg.grid.domain(), cfg.amplitude_domain)
    }
    /// Compute the scales for a viewport of `size` with `margin`.
    ///
    /// x maps into `[left, width - right]`.
    /// y maps into `[height - bottom, top]`, inverted so that larger amplitudes
    /// end up higher on a top-down pixel grid.
    #[must_use]
    pub fn on_resize(&self, size: Viewport, margin: Margin) -> ScalePair {
        ScalePair {
            x: Scale::new(self.x_domain, margin.left, size.width - margin.right),
            y: Scale::new(self.y_domain, size.height - margin.bottom, margin.top),
        }
    }
}
