//! Frame-level utilities for `[T, D]` sequences.
//!
//! - Trimming and removal of silent (low-energy) frames
//! - Length alignment of two sequences by zero-padding or truncation
//! - Delta features by centered correlation along time
//!
//! All operations leave their inputs untouched and return new tensors. Time
//! order is always preserved.

mod cpu;
pub(crate) mod frame_core;
pub(crate) mod impl_generic;
pub mod traits;

pub use traits::FrameAlgorithms;

/// Default energy threshold below which a frame counts as silent.
pub const DEFAULT_EPS: f64 = 1e-7;

/// Length alignment policy for [`FrameAlgorithms::adjust_frame_length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAlignParams {
    /// Zero-pad the shorter sequence to the longer one (`true`) or truncate the
    /// longer one to the shorter (`false`).
    pub pad: bool,
    /// Round the target length to an even number: up when padding, down when
    /// truncating.
    pub ensure_even: bool,
}

impl Default for FrameAlignParams {
    fn default() -> Self {
        Self {
            pad: true,
            ensure_even: false,
        }
    }
}

impl FrameAlignParams {
    /// Create alignment parameters.
    pub fn new(pad: bool, ensure_even: bool) -> Self {
        Self { pad, ensure_even }
    }

    /// Set padding mode.
    pub fn with_pad(mut self, pad: bool) -> Self {
        self.pad = pad;
        self
    }

    /// Set even-length rounding.
    pub fn with_ensure_even(mut self, ensure_even: bool) -> Self {
        self.ensure_even = ensure_even;
        self
    }
}

/// Common length two sequences of `tx` and `ty` frames are aligned to.
pub fn adjusted_length(tx: usize, ty: usize, params: FrameAlignParams) -> usize {
    let target = if params.pad { tx.max(ty) } else { tx.min(ty) };

    if params.ensure_even && target % 2 != 0 {
        if params.pad { target + 1 } else { target - 1 }
    } else {
        target
    }
}
