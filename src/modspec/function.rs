//! Single-slot forward/backward wrapper around the modulation spectrum.

use super::traits::ModulationSpectrumAlgorithms;
use super::{ModSpecContext, ModSpecParams};
use crate::error::{ModSpecError, ModSpecResult};
use numr::runtime::Runtime;
use numr::tensor::Tensor;
use tracing::debug;

/// Modulation spectrum with a remembered forward input.
///
/// `forward` stores the context of its input and `backward` consumes it, so a
/// value of this type supports one outstanding forward/backward pair at a time.
/// A second `forward` before `backward` replaces the saved context. Use
/// [`ModulationSpectrumAlgorithms`] directly to keep several pairs in flight.
///
/// # Example
///
/// ```ignore
/// use modspec::modspec::{ModSpecParams, ModulationSpectrum};
///
/// let mut ms = ModulationSpectrum::new(ModSpecParams::default());
/// let spectrum = ms.forward(&client, &y)?;
/// let grad_y = ms.backward(&client, &grad_spectrum)?;
/// ```
#[derive(Debug)]
pub struct ModulationSpectrum<R: Runtime> {
    params: ModSpecParams,
    saved: Option<ModSpecContext<R>>,
}

impl<R: Runtime> ModulationSpectrum<R> {
    /// Create a transform with the given DFT length and normalization.
    pub fn new(params: ModSpecParams) -> Self {
        Self {
            params,
            saved: None,
        }
    }

    /// Parameters of this transform.
    pub fn params(&self) -> ModSpecParams {
        self.params
    }

    /// True if a forward context is waiting for its backward call.
    pub fn has_saved_context(&self) -> bool {
        self.saved.is_some()
    }

    /// Compute the modulation spectrum of `y` and remember `y` for `backward`.
    pub fn forward<C>(&mut self, client: &C, y: &Tensor<R>) -> ModSpecResult<Tensor<R>>
    where
        C: ModulationSpectrumAlgorithms<R>,
    {
        let (spectrum, ctx) = client.modspec_forward(y, self.params)?;
        if self.saved.replace(ctx).is_some() {
            debug!("modspec forward replaced an unconsumed context");
        }
        Ok(spectrum)
    }

    /// Gradient with respect to the input of the last `forward` call.
    ///
    /// Fails with `StateError` when no forward context is saved. The context is
    /// consumed only on success, so a shape error leaves it in place.
    pub fn backward<C>(
        &mut self,
        client: &C,
        grad_spectrum: &Tensor<R>,
    ) -> ModSpecResult<Tensor<R>>
    where
        C: ModulationSpectrumAlgorithms<R>,
    {
        let ctx = self.saved.as_ref().ok_or_else(|| ModSpecError::StateError {
            context: "modspec backward called without a preceding forward".to_string(),
        })?;
        let grad = client.modspec_backward(ctx, grad_spectrum)?;
        self.saved = None;
        Ok(grad)
    }
}
