//! Modulation spectrum and its analytic gradient.
//!
//! The modulation spectrum of a `[T, D]` sequence is the power spectrum of each
//! feature column along the time axis:
//!
//! ```text
//! S[k, d]   = rfft(y[:, d], n)[k]            k = 0 .. n/2
//! ms[k, d]  = Re(S[k, d])² + Im(S[k, d])²
//! ```
//!
//! # Algorithm: backward pass
//!
//! The DFT is linear in `y`, so the gradient of the power with respect to each
//! sample has a closed form:
//!
//! ```text
//! Re[k, d] =  Σ_t y[t, d]·cos(2πkt/n)
//! Im[k, d] = -Σ_t y[t, d]·sin(2πkt/n)
//!
//! grad_y[t, d] = Σ_k g[k, d] · C · (Re[k, d]·cos(-2πkt/n) + Im[k, d]·sin(-2πkt/n))
//! ```
//!
//! with `C = 2` (unnormalized) or `C = 2/√T` (orthonormal). The backward pass
//! recomputes `Re`/`Im` from the saved input and evaluates this sum directly,
//! which costs `O(D·T·n/2)` time and `O(T·n/2)` memory for the twiddle tables.
//! It is not FFT-accelerated.
//!
//! # Context passing
//!
//! [`ModulationSpectrumAlgorithms::modspec_forward`] returns the spectrum together
//! with a [`ModSpecContext`] that must be handed to
//! [`ModulationSpectrumAlgorithms::modspec_backward`]. The pair is pure, so any
//! number of forward/backward pairs may be in flight at once. [`ModulationSpectrum`]
//! wraps the pair behind a single-slot forward/backward object for callers that
//! want that shape.

mod cpu;
mod function;
pub(crate) mod impl_generic;
pub(crate) mod spectrum_core;
pub mod traits;

pub use function::ModulationSpectrum;
pub use traits::ModulationSpectrumAlgorithms;

use crate::error::{ModSpecError, ModSpecResult};
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Default DFT length.
pub const DEFAULT_DFT_LENGTH: usize = 2048;

/// Normalization applied to the DFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModSpecNorm {
    /// Plain DFT, no scaling.
    #[default]
    Unnormalized,

    /// Coefficients scaled by `1/√T`, where `T` is the sequence length.
    ///
    /// The spectrum is therefore the unnormalized spectrum divided by `T`.
    Orthonormal,
}

impl ModSpecNorm {
    /// Amplitude scale applied to the DFT coefficients of a length-`t` sequence.
    pub fn amplitude_scale(&self, t: usize) -> f64 {
        match self {
            ModSpecNorm::Unnormalized => 1.0,
            ModSpecNorm::Orthonormal => 1.0 / (t as f64).sqrt(),
        }
    }

    /// Constant `C` of the backward pass for a length-`t` sequence.
    pub fn gradient_scale(&self, t: usize) -> f64 {
        2.0 * self.amplitude_scale(t)
    }
}

/// Parameters for the modulation spectrum transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModSpecParams {
    /// DFT length. Input shorter than `n` is zero-padded, longer input is truncated.
    pub n: usize,
    /// DFT normalization.
    pub norm: ModSpecNorm,
}

impl Default for ModSpecParams {
    fn default() -> Self {
        Self {
            n: DEFAULT_DFT_LENGTH,
            norm: ModSpecNorm::default(),
        }
    }
}

impl ModSpecParams {
    /// Create parameters with an explicit DFT length and normalization.
    pub fn new(n: usize, norm: ModSpecNorm) -> Self {
        Self { n, norm }
    }

    /// Set DFT length.
    pub fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Set normalization.
    pub fn with_norm(mut self, norm: ModSpecNorm) -> Self {
        self.norm = norm;
        self
    }

    /// Number of non-negative frequency bins (`n/2 + 1`).
    pub fn n_freqs(&self) -> usize {
        self.n / 2 + 1
    }

    /// Check that the DFT length is usable.
    pub fn validate(&self) -> ModSpecResult<()> {
        if self.n == 0 {
            return Err(ModSpecError::InvalidArgument {
                arg: "n",
                reason: "DFT length must be a positive integer, got 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Saved state of a forward evaluation, consumed by the matching backward pass.
#[derive(Debug, Clone)]
pub struct ModSpecContext<R: Runtime> {
    input: Tensor<R>,
    params: ModSpecParams,
}

impl<R: Runtime> ModSpecContext<R> {
    pub(crate) fn new(input: Tensor<R>, params: ModSpecParams) -> Self {
        Self { input, params }
    }

    /// The sequence passed to the forward call.
    pub fn input(&self) -> &Tensor<R> {
        &self.input
    }

    /// Parameters used by the forward call.
    pub fn params(&self) -> ModSpecParams {
        self.params
    }

    /// `(T, D)` of the saved sequence.
    pub fn sequence_shape(&self) -> (usize, usize) {
        let shape = self.input.shape();
        (shape[0], shape[1])
    }

    /// Shape a gradient passed to backward must have: `[n/2 + 1, D]`.
    pub fn spectrum_shape(&self) -> [usize; 2] {
        [self.params.n_freqs(), self.sequence_shape().1]
    }
}
