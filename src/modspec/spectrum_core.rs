//! Slice kernels shared by the modulation spectrum forward and backward passes.
//!
//! Everything here works on plain `f64` slices so that every backend computes
//! the trigonometric tables and the gradient accumulation in exactly the same
//! order.

use std::f64::consts::PI;

/// Twiddle tables `cos(-2πkt/n)` and `sin(-2πkt/n)` for `k < n/2+1`, `t < len`.
///
/// Rows are indexed by frequency bin, columns by frame. The negative angle
/// matches the forward DFT convention, so that `Re = Σ y·cos` and `Im = Σ y·sin`.
#[derive(Debug, Clone)]
pub struct TrigTables {
    n_freqs: usize,
    len: usize,
    cos: Vec<f64>,
    sin: Vec<f64>,
}

impl TrigTables {
    /// Build tables for DFT length `n` over `len` frames.
    pub fn new(n: usize, len: usize) -> Self {
        let n_freqs = n / 2 + 1;
        let mut cos = vec![0.0f64; n_freqs * len];
        let mut sin = vec![0.0f64; n_freqs * len];

        for k in 0..n_freqs {
            let row = k * len;
            for t in 0..len {
                // Reduce k*t modulo n before scaling to keep the angle small.
                let phase = (k * t) % n;
                let angle = -2.0 * PI * phase as f64 / n as f64;
                cos[row + t] = angle.cos();
                sin[row + t] = angle.sin();
            }
        }

        Self {
            n_freqs,
            len,
            cos,
            sin,
        }
    }

    /// Number of frequency bins (`n/2 + 1`).
    pub fn n_freqs(&self) -> usize {
        self.n_freqs
    }

    /// Number of frames covered by each row.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the tables cover no frames.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn cos_row(&self, k: usize) -> &[f64] {
        &self.cos[k * self.len..(k + 1) * self.len]
    }

    #[inline]
    pub fn sin_row(&self, k: usize) -> &[f64] {
        &self.sin[k * self.len..(k + 1) * self.len]
    }
}

/// Direct real DFT of one column.
///
/// Only the first `tables.len()` samples of `column` take part, which gives
/// the truncation semantics of an rfft with an explicit length shorter than
/// the signal. Shorter columns are implicitly zero-padded.
pub fn dft_column(column: &[f64], tables: &TrigTables, re_out: &mut [f64], im_out: &mut [f64]) {
    let active = column.len().min(tables.len());
    let samples = &column[..active];

    for k in 0..tables.n_freqs() {
        let cos_row = &tables.cos_row(k)[..active];
        let sin_row = &tables.sin_row(k)[..active];

        let mut re = 0.0;
        let mut im = 0.0;
        for ((&y, &c), &s) in samples.iter().zip(cos_row).zip(sin_row) {
            re += y * c;
            im += y * s;
        }
        re_out[k] = re;
        im_out[k] = im;
    }
}

/// Squared magnitude of a complex coefficient.
#[inline]
pub fn power(re: f64, im: f64) -> f64 {
    re * re + im * im
}

/// Accumulate the input gradient of one feature column.
///
/// ```text
/// grad[t] = Σ_k g[k] · C · (Re[k]·cos[k, t] + Im[k]·sin[k, t])
/// ```
///
/// `grad_out` must have `tables.len()` elements; it is overwritten.
pub fn accumulate_column_gradient(
    grad_spectrum: &[f64],
    re: &[f64],
    im: &[f64],
    scale: f64,
    tables: &TrigTables,
    grad_out: &mut [f64],
) {
    grad_out.iter_mut().for_each(|v| *v = 0.0);

    for k in 0..tables.n_freqs() {
        let g = grad_spectrum[k];
        if g == 0.0 {
            continue;
        }
        let coef_re = g * scale * re[k];
        let coef_im = g * scale * im[k];

        for ((out, &c), &s) in grad_out
            .iter_mut()
            .zip(tables.cos_row(k))
            .zip(tables.sin_row(k))
        {
            *out += coef_re * c + coef_im * s;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trig_tables_shape() {
        let tables = TrigTables::new(8, 5);
        assert_eq!(tables.n_freqs(), 5);
        assert_eq!(tables.len(), 5);
        assert_eq!(tables.cos_row(4).len(), 5);

        // DC row is all ones / zeros
        assert!(tables.cos_row(0).iter().all(|&c| (c - 1.0).abs() < 1e-15));
        assert!(tables.sin_row(0).iter().all(|&s| s.abs() < 1e-15));
    }

    #[test]
    fn test_trig_tables_sign_convention() {
        // k=1, t=1, n=4 -> angle -π/2
        let tables = TrigTables::new(4, 2);
        assert!(tables.cos_row(1)[1].abs() < 1e-15);
        assert!((tables.sin_row(1)[1] + 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_dft_column_impulse() {
        // Unit impulse at t=0 has a flat spectrum.
        let tables = TrigTables::new(6, 3);
        let mut re = vec![0.0; 4];
        let mut im = vec![0.0; 4];
        dft_column(&[1.0, 0.0, 0.0], &tables, &mut re, &mut im);
        for k in 0..4 {
            assert!((re[k] - 1.0).abs() < 1e-12);
            assert!(im[k].abs() < 1e-12);
        }
    }

    #[test]
    fn test_dft_column_truncates() {
        // Samples past the table length must be ignored.
        let tables = TrigTables::new(2, 2);
        let mut re = vec![0.0; 2];
        let mut im = vec![0.0; 2];
        dft_column(&[1.0, 2.0, 100.0], &tables, &mut re, &mut im);
        assert!((re[0] - 3.0).abs() < 1e-12);
        assert!((re[1] - (-1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_accumulate_column_gradient_dc() {
        // With only the DC bin active: grad[t] = g0 * C * Re0.
        let tables = TrigTables::new(4, 3);
        let mut grad = vec![9.0; 3];
        accumulate_column_gradient(
            &[1.0, 0.0, 0.0],
            &[5.0, 1.0, 1.0],
            &[0.0, 1.0, 0.0],
            2.0,
            &tables,
            &mut grad,
        );
        for v in grad {
            assert!((v - 10.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_power() {
        assert_eq!(power(3.0, 4.0), 25.0);
    }
}
