//! Shared validation and host transfer helpers.
//!
//! The transforms in this crate do their arithmetic in `f64` on host slices
//! (see the `core` modules). These helpers move tensor data in and out of that
//! representation while preserving the caller's dtype.

use crate::error::{ModSpecError, ModSpecResult};
use numr::dtype::DType;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Validate sequence dtype (must be F32 or F64).
pub(crate) fn validate_sequence_dtype(dtype: DType, op: &'static str) -> ModSpecResult<()> {
    match dtype {
        DType::F32 | DType::F64 => Ok(()),
        _ => Err(ModSpecError::UnsupportedDType { dtype, op }),
    }
}

/// Validate that `tensor` is a `[T, D]` sequence and return `(T, D)`.
pub(crate) fn validate_sequence<R: Runtime>(
    tensor: &Tensor<R>,
    op: &'static str,
) -> ModSpecResult<(usize, usize)> {
    validate_sequence_dtype(tensor.dtype(), op)?;
    let shape = tensor.shape();
    if shape.len() != 2 {
        return Err(ModSpecError::rank2(shape, op));
    }
    Ok((shape[0], shape[1]))
}

/// Copy tensor contents to a host `f64` buffer in row-major order.
///
/// Callers must have validated the dtype first.
pub(crate) fn to_host_f64<R: Runtime>(tensor: &Tensor<R>) -> Vec<f64> {
    let contig = tensor.contiguous();
    match contig.dtype() {
        DType::F32 => {
            let data: Vec<f32> = contig.to_vec();
            data.into_iter().map(f64::from).collect()
        }
        _ => contig.to_vec(),
    }
}

/// Build a tensor of `dtype` from a host `f64` buffer.
pub(crate) fn from_host_f64<R: Runtime>(
    data: &[f64],
    shape: &[usize],
    dtype: DType,
    device: &R::Device,
) -> Tensor<R> {
    match dtype {
        DType::F32 => {
            let narrowed: Vec<f32> = data.iter().map(|&v| v as f32).collect();
            Tensor::<R>::from_slice(&narrowed, shape, device)
        }
        _ => Tensor::<R>::from_slice(data, shape, device),
    }
}
