//! Modulation spectrum trait.

use super::{ModSpecContext, ModSpecParams};
use crate::error::ModSpecResult;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Algorithmic contract for the modulation spectrum transform.
///
/// All backends implementing this trait MUST use the EXACT SAME ALGORITHMS to
/// ensure numerical parity.
pub trait ModulationSpectrumAlgorithms<R: Runtime> {
    /// Forward modulation spectrum.
    ///
    /// # Arguments
    ///
    /// * `y` - Sequence of shape `[T, D]` (F32 or F64)
    /// * `params` - DFT length and normalization
    ///
    /// # Returns
    ///
    /// Power spectrum of shape `[n/2 + 1, D]` in the dtype of `y`, and the
    /// context required by [`modspec_backward`](Self::modspec_backward).
    ///
    /// # Errors
    ///
    /// `ShapeError` if `y` is not rank-2 or empty, `InvalidArgument` if `n == 0`.
    fn modspec_forward(
        &self,
        y: &Tensor<R>,
        params: ModSpecParams,
    ) -> ModSpecResult<(Tensor<R>, ModSpecContext<R>)>;

    /// Gradient of the modulation spectrum with respect to the input sequence.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context returned by the forward call
    /// * `grad_spectrum` - Upstream gradient of shape `[n/2 + 1, D]`
    ///
    /// # Returns
    ///
    /// Gradient of shape `[T, D]`, matching the forward input.
    fn modspec_backward(
        &self,
        ctx: &ModSpecContext<R>,
        grad_spectrum: &Tensor<R>,
    ) -> ModSpecResult<Tensor<R>>;

    /// Forward modulation spectrum without keeping a context.
    fn modspec(&self, y: &Tensor<R>, params: ModSpecParams) -> ModSpecResult<Tensor<R>> {
        let (spectrum, _ctx) = self.modspec_forward(y, params)?;
        Ok(spectrum)
    }
}
