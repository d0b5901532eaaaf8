//! Generic modulation spectrum implementation.
//!
//! Works with any numr backend. The forward pass batches all feature columns
//! into one `[D, n]` rfft when `n` is a power of two (and at least 2) and falls
//! back to a direct DFT otherwise. The backward pass is always the direct
//! correlation against the twiddle tables.

use super::spectrum_core::{TrigTables, accumulate_column_gradient, dft_column, power};
use super::{ModSpecContext, ModSpecParams};
use crate::error::{ModSpecError, ModSpecResult};
use crate::helpers::{from_host_f64, to_host_f64, validate_sequence, validate_sequence_dtype};
use numr::algorithm::fft::{FftAlgorithms, FftNormalization};
use numr::dtype::{Complex128, DType};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;
use tracing::{debug, trace};

/// Real and imaginary DFT parts of every column, stored column-major:
/// bin `k` of column `d` lives at `d * n_freqs + k`.
struct ColumnSpectra {
    re: Vec<f64>,
    im: Vec<f64>,
}

/// Generic implementation of the forward modulation spectrum.
pub fn modspec_forward_impl<R, C>(
    client: &C,
    y: &Tensor<R>,
    params: ModSpecParams,
) -> ModSpecResult<(Tensor<R>, ModSpecContext<R>)>
where
    R: Runtime,
    C: FftAlgorithms<R> + RuntimeClient<R>,
{
    params.validate()?;
    let (t, d) = validate_sequence(y, "modspec_forward")?;
    validate_non_empty(t, d, y.shape(), "modspec_forward")?;

    debug!(t, d, n = params.n, norm = ?params.norm, "modspec forward");

    let data = to_host_f64(y);
    let spectra = column_spectra(client, &data, t, d, params)?;

    let n_freqs = params.n_freqs();
    let mut output = vec![0.0f64; n_freqs * d];
    for col in 0..d {
        let offset = col * n_freqs;
        for k in 0..n_freqs {
            output[k * d + col] = power(spectra.re[offset + k], spectra.im[offset + k]);
        }
    }

    let spectrum = from_host_f64::<R>(&output, &[n_freqs, d], y.dtype(), client.device());
    Ok((spectrum, ModSpecContext::new(y.clone(), params)))
}

/// Generic implementation of the modulation spectrum gradient.
pub fn modspec_backward_impl<R, C>(
    client: &C,
    ctx: &ModSpecContext<R>,
    grad_spectrum: &Tensor<R>,
) -> ModSpecResult<Tensor<R>>
where
    R: Runtime,
    C: FftAlgorithms<R> + RuntimeClient<R>,
{
    let params = ctx.params();
    let (t, d) = ctx.sequence_shape();
    let expected = ctx.spectrum_shape();

    validate_sequence_dtype(grad_spectrum.dtype(), "modspec_backward")?;
    if grad_spectrum.shape() != expected {
        return Err(ModSpecError::shape(
            &expected,
            grad_spectrum.shape(),
            "modspec_backward",
        ));
    }

    debug!(t, d, n = params.n, norm = ?params.norm, "modspec backward");

    let data = to_host_f64(ctx.input());
    let spectra = column_spectra(client, &data, t, d, params)?;
    let grad = to_host_f64(grad_spectrum);

    // Frames at or past n never reach the DFT, so their gradient stays zero.
    let active = t.min(params.n);
    let tables = TrigTables::new(params.n, active);
    let scale = params.norm.gradient_scale(t);
    let n_freqs = params.n_freqs();

    let mut output = vec![0.0f64; t * d];
    let mut grad_col = vec![0.0f64; n_freqs];
    let mut out_col = vec![0.0f64; active];

    for col in 0..d {
        for k in 0..n_freqs {
            grad_col[k] = grad[k * d + col];
        }
        let offset = col * n_freqs;
        accumulate_column_gradient(
            &grad_col,
            &spectra.re[offset..offset + n_freqs],
            &spectra.im[offset..offset + n_freqs],
            scale,
            &tables,
            &mut out_col,
        );
        for (frame, &value) in out_col.iter().enumerate() {
            output[frame * d + col] = value;
        }
        trace!(col, "accumulated column gradient");
    }

    Ok(from_host_f64::<R>(
        &output,
        &[t, d],
        ctx.input().dtype(),
        client.device(),
    ))
}

fn validate_non_empty(t: usize, d: usize, shape: &[usize], op: &str) -> ModSpecResult<()> {
    if t == 0 || d == 0 {
        return Err(ModSpecError::ShapeError {
            expected: "[T, D] with T >= 1 and D >= 1".to_string(),
            got: shape.to_vec(),
            context: op.to_string(),
        });
    }
    Ok(())
}

/// DFT of every column of a row-major `[t, d]` buffer, with normalization applied.
fn column_spectra<R, C>(
    client: &C,
    data: &[f64],
    t: usize,
    d: usize,
    params: ModSpecParams,
) -> ModSpecResult<ColumnSpectra>
where
    R: Runtime,
    C: FftAlgorithms<R> + RuntimeClient<R>,
{
    let n = params.n;
    let n_freqs = params.n_freqs();
    let active = t.min(n);

    let mut spectra = if n >= 2 && n.is_power_of_two() {
        fft_column_spectra(client, data, t, d, n)?
    } else {
        trace!(n, "non power-of-two DFT length, using direct DFT");
        let tables = TrigTables::new(n, active);
        let mut re = vec![0.0f64; n_freqs * d];
        let mut im = vec![0.0f64; n_freqs * d];
        let mut column = vec![0.0f64; active];
        for col in 0..d {
            for (frame, value) in column.iter_mut().enumerate() {
                *value = data[frame * d + col];
            }
            let offset = col * n_freqs;
            dft_column(
                &column,
                &tables,
                &mut re[offset..offset + n_freqs],
                &mut im[offset..offset + n_freqs],
            );
        }
        ColumnSpectra { re, im }
    };

    let scale = params.norm.amplitude_scale(t);
    if scale != 1.0 {
        spectra.re.iter_mut().for_each(|v| *v *= scale);
        spectra.im.iter_mut().for_each(|v| *v *= scale);
    }

    Ok(spectra)
}

/// Batched rfft over the `[d, n]` transposed, zero-padded or truncated sequence.
fn fft_column_spectra<R, C>(
    client: &C,
    data: &[f64],
    t: usize,
    d: usize,
    n: usize,
) -> ModSpecResult<ColumnSpectra>
where
    R: Runtime,
    C: FftAlgorithms<R> + RuntimeClient<R>,
{
    let n_freqs = n / 2 + 1;
    let active = t.min(n);

    let mut frames = vec![0.0f64; d * n];
    for col in 0..d {
        let row = col * n;
        for frame in 0..active {
            frames[row + frame] = data[frame * d + col];
        }
    }

    let frames_tensor = Tensor::<R>::from_slice(&frames, &[d, n], client.device());
    let spectrum = client.rfft(&frames_tensor, FftNormalization::None)?;
    if spectrum.dtype() != DType::Complex128 {
        return Err(ModSpecError::UnsupportedDType {
            dtype: spectrum.dtype(),
            op: "modspec rfft",
        });
    }
    let coeffs: Vec<Complex128> = spectrum.contiguous().to_vec();

    let mut re = vec![0.0f64; n_freqs * d];
    let mut im = vec![0.0f64; n_freqs * d];
    for (i, c) in coeffs.iter().take(n_freqs * d).enumerate() {
        re[i] = c.re;
        im[i] = c.im;
    }

    Ok(ColumnSpectra { re, im })
}
