//! Generic frame utility implementations.
//!
//! Frame energies and length alignment stay on device (`abs`, `sum`, `pad`,
//! `narrow`). Selecting the surviving frames and the delta correlation go
//! through host buffers, the same API boundary the other generic
//! implementations use for per-element bookkeeping.

use super::frame_core::{correlate_same, kept_frames, trimmed_length};
use super::{FrameAlignParams, adjusted_length};
use crate::error::{ModSpecError, ModSpecResult};
use crate::helpers::{from_host_f64, to_host_f64, validate_sequence, validate_sequence_dtype};
use numr::ops::{ReduceOps, ShapeOps, UnaryOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;
use tracing::debug;

/// Generic implementation of trailing silent frame trimming.
pub fn trim_zeros_frames_impl<R, C>(
    client: &C,
    x: &Tensor<R>,
    eps: f64,
) -> ModSpecResult<Tensor<R>>
where
    R: Runtime,
    C: UnaryOps<R> + ReduceOps<R> + RuntimeClient<R>,
{
    let (t, d) = validate_sequence(x, "trim_zeros_frames")?;
    if t == 0 {
        return Ok(x.clone());
    }

    let magnitude = client.abs(x)?;
    let energies = to_host_f64(&client.sum(&magnitude, &[1], false)?);
    let kept = trimmed_length(&energies, eps);

    debug!(t, d, kept, eps, "trim_zeros_frames");
    take_leading_frames(client, x, kept, d)
}

/// Generic implementation of silent frame removal.
pub fn remove_zeros_frames_impl<R, C>(
    client: &C,
    x: &Tensor<R>,
    eps: f64,
) -> ModSpecResult<Tensor<R>>
where
    R: Runtime,
    C: ReduceOps<R> + RuntimeClient<R>,
{
    let (t, d) = validate_sequence(x, "remove_zeros_frames")?;
    if t == 0 {
        return Ok(x.clone());
    }

    let row_sums = to_host_f64(&client.sum(x, &[1], false)?);
    let kept = kept_frames(&row_sums, eps);
    debug!(t, d, kept = kept.len(), eps, "remove_zeros_frames");

    let data = to_host_f64(x);
    let mut output = Vec::with_capacity(kept.len() * d);
    for &frame in &kept {
        output.extend_from_slice(&data[frame * d..(frame + 1) * d]);
    }

    Ok(from_host_f64::<R>(
        &output,
        &[kept.len(), d],
        x.dtype(),
        client.device(),
    ))
}

/// Generic implementation of two-sequence length alignment.
pub fn adjust_frame_length_impl<R, C>(
    client: &C,
    x: &Tensor<R>,
    y: &Tensor<R>,
    params: FrameAlignParams,
) -> ModSpecResult<(Tensor<R>, Tensor<R>)>
where
    R: Runtime,
    C: ShapeOps<R> + RuntimeClient<R>,
{
    let (tx, dx) = validate_sequence(x, "adjust_frame_length")?;
    let (ty, dy) = validate_sequence(y, "adjust_frame_length")?;
    if dx != dy {
        return Err(ModSpecError::shape(
            &[ty, dx],
            y.shape(),
            "adjust_frame_length (feature dimensions differ)",
        ));
    }

    let target = adjusted_length(tx, ty, params);
    debug!(tx, ty, target, pad = params.pad, "adjust_frame_length");

    Ok((
        fit_to_length(client, x, target, dx)?,
        fit_to_length(client, y, target, dy)?,
    ))
}

/// Generic implementation of 1-D delta correlation.
pub fn delta_impl<R, C>(
    client: &C,
    x: &Tensor<R>,
    window: &Tensor<R>,
) -> ModSpecResult<Tensor<R>>
where
    R: Runtime,
    C: RuntimeClient<R>,
{
    validate_sequence_dtype(x.dtype(), "delta")?;
    if x.ndim() != 1 {
        return Err(ModSpecError::ShapeError {
            expected: "rank-1 [T]".to_string(),
            got: x.shape().to_vec(),
            context: "delta".to_string(),
        });
    }
    let win = window_data(window, "delta")?;

    let signal = to_host_f64(x);
    let mut output = vec![0.0f64; signal.len()];
    correlate_same(&signal, &win, &mut output);

    Ok(from_host_f64::<R>(&output, x.shape(), x.dtype(), client.device()))
}

/// Generic implementation of column-wise delta correlation.
pub fn dimension_wise_delta_impl<R, C>(
    client: &C,
    x: &Tensor<R>,
    window: &Tensor<R>,
) -> ModSpecResult<Tensor<R>>
where
    R: Runtime,
    C: RuntimeClient<R>,
{
    let (t, d) = validate_sequence(x, "dimension_wise_delta")?;
    let win = window_data(window, "dimension_wise_delta")?;
    debug!(t, d, window = win.len(), "dimension_wise_delta");

    let data = to_host_f64(x);
    let mut output = vec![0.0f64; t * d];
    let mut column = vec![0.0f64; t];
    let mut filtered = vec![0.0f64; t];

    for col in 0..d {
        for (frame, value) in column.iter_mut().enumerate() {
            *value = data[frame * d + col];
        }
        correlate_same(&column, &win, &mut filtered);
        for (frame, &value) in filtered.iter().enumerate() {
            output[frame * d + col] = value;
        }
    }

    Ok(from_host_f64::<R>(&output, &[t, d], x.dtype(), client.device()))
}

/// Validate a 1-D, non-empty window and copy it to the host.
fn window_data<R: Runtime>(window: &Tensor<R>, op: &'static str) -> ModSpecResult<Vec<f64>> {
    validate_sequence_dtype(window.dtype(), op)?;
    if window.ndim() != 1 || window.shape()[0] == 0 {
        return Err(ModSpecError::ShapeError {
            expected: "non-empty rank-1 window [M]".to_string(),
            got: window.shape().to_vec(),
            context: op.to_string(),
        });
    }
    Ok(to_host_f64(window))
}

/// Leading `len` frames of a `[T, D]` sequence as a new contiguous tensor.
fn take_leading_frames<R, C>(
    client: &C,
    x: &Tensor<R>,
    len: usize,
    d: usize,
) -> ModSpecResult<Tensor<R>>
where
    R: Runtime,
    C: RuntimeClient<R>,
{
    if len == 0 {
        return Ok(from_host_f64::<R>(&[], &[0, d], x.dtype(), client.device()));
    }
    Ok(x.narrow(0, 0, len)?.contiguous())
}

/// Zero-pad or truncate a `[T, D]` sequence along time to `target` frames.
fn fit_to_length<R, C>(
    client: &C,
    x: &Tensor<R>,
    target: usize,
    d: usize,
) -> ModSpecResult<Tensor<R>>
where
    R: Runtime,
    C: ShapeOps<R> + RuntimeClient<R>,
{
    let t = x.shape()[0];
    if t < target {
        // Padding pairs run from the last axis to the first: [D.., T..].
        Ok(client.pad(x, &[0, 0, 0, target - t], 0.0)?)
    } else if t > target {
        take_leading_frames(client, x, target, d)
    } else {
        Ok(x.contiguous())
    }
}
