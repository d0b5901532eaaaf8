//! Frame utility trait.

use super::FrameAlignParams;
use crate::error::ModSpecResult;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Algorithmic contract for frame trimming, alignment and delta features.
///
/// All backends implementing this trait MUST use the EXACT SAME ALGORITHMS to
/// ensure numerical parity.
pub trait FrameAlgorithms<R: Runtime> {
    /// Drop trailing silent frames.
    ///
    /// Keeps the first `T'` frames, where `T'` is the number of frames whose
    /// sum of absolute values exceeds `eps`. This equals "drop the trailing
    /// silent frames" as long as every silent frame is trailing. If silent
    /// frames also occur inside the sequence, `T'` counts only the loud ones
    /// and the result is cut short by that many frames at the end. Callers
    /// that need every quiet frame gone should use
    /// [`remove_zeros_frames`](Self::remove_zeros_frames).
    ///
    /// `T' = 0` yields an empty `[0, D]` sequence.
    fn trim_zeros_frames(&self, x: &Tensor<R>, eps: f64) -> ModSpecResult<Tensor<R>>;

    /// Remove every frame whose (signed) sum across features is at most `eps`.
    ///
    /// Surviving frames keep their relative order.
    fn remove_zeros_frames(&self, x: &Tensor<R>, eps: f64) -> ModSpecResult<Tensor<R>>;

    /// Bring two sequences to a common length.
    ///
    /// # Arguments
    ///
    /// * `x` - Sequence of shape `[Tx, D]`
    /// * `y` - Sequence of shape `[Ty, D]`
    /// * `params` - Pad or truncate, and whether to force an even length
    ///
    /// # Returns
    ///
    /// Both sequences with `T = adjusted_length(Tx, Ty, params)` frames. Padding
    /// appends zero frames, truncation drops trailing frames.
    ///
    /// # Errors
    ///
    /// `ShapeError` if either input is not rank-2 or their `D` differ.
    fn adjust_frame_length(
        &self,
        x: &Tensor<R>,
        y: &Tensor<R>,
        params: FrameAlignParams,
    ) -> ModSpecResult<(Tensor<R>, Tensor<R>)>;

    /// Centered correlation of a 1-D signal with a 1-D window.
    ///
    /// Output has the same length as `x`; samples outside `x` count as zero.
    fn delta(&self, x: &Tensor<R>, window: &Tensor<R>) -> ModSpecResult<Tensor<R>>;

    /// Apply [`delta`](Self::delta) to every column of a `[T, D]` sequence.
    fn dimension_wise_delta(&self, x: &Tensor<R>, window: &Tensor<R>)
    -> ModSpecResult<Tensor<R>>;
}
