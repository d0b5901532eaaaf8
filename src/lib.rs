//! modspec - Differentiable modulation spectrum for feature trajectories
//!
//! modspec compares two time-varying feature trajectories (for example predicted
//! and reference acoustic parameter sequences) in the frequency domain of their
//! temporal modulation. It provides the forward transform together with its
//! exact, closed-form gradient, plus the frame utilities needed to make two
//! trajectories of different lengths comparable. Built on numr tensors.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │   external feature pipeline  →  [T, D] trajectories     │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │
//! ┌──────────────────────────▼──────────────────────────────┐
//! │  frames   trim / remove silent frames, align lengths,   │
//! │           delta features                                │
//! ├─────────────────────────────────────────────────────────┤
//! │  modspec  [T, D] → [n/2+1, D] power spectrum, and the   │
//! │           analytic backward [n/2+1, D] → [T, D]         │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │ uses
//! ┌──────────────────────────▼──────────────────────────────┐
//! │                       numr                               │
//! │          (tensors, rfft, shape and reduce ops)          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`modspec`] - Modulation spectrum forward/backward
//! - [`frames`] - Frame trimming, length alignment, delta features
//! - [`error`] - Error type shared by both
//!
//! # Backend Support
//!
//! The algorithms are written once, generic over numr's `Runtime`, and exposed as
//! traits implemented for `CpuClient`. F32 and F64 inputs are accepted; all
//! arithmetic runs in F64 and results come back in the input dtype.
//!
//! # Example
//!
//! ```ignore
//! use modspec::frames::{FrameAlgorithms, FrameAlignParams};
//! use modspec::modspec::{ModSpecParams, ModulationSpectrumAlgorithms};
//! use numr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
//! use numr::tensor::Tensor;
//!
//! let device = CpuDevice::new();
//! let client = CpuClient::new(device.clone());
//!
//! let (pred, target) = client.adjust_frame_length(&pred, &target, FrameAlignParams::default())?;
//!
//! let params = ModSpecParams::default();
//! let (ms_pred, ctx) = client.modspec_forward(&pred, params)?;
//! let ms_target = client.modspec(&target, params)?;
//!
//! // grad_ms = dLoss/d(ms_pred), computed by the caller's loss
//! let grad_pred = client.modspec_backward(&ctx, &grad_ms)?;
//! ```

pub mod error;
pub mod frames;
mod helpers;
pub mod modspec;

pub use error::{ModSpecError, ModSpecResult};
