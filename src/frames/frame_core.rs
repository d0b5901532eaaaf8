//! Slice kernels for frame trimming and delta features.

/// Number of frames whose energy exceeds `eps`.
///
/// This is the length the trimming operation keeps; see
/// [`FrameAlgorithms::trim_zeros_frames`](super::FrameAlgorithms::trim_zeros_frames)
/// for what that implies when quiet frames are not all trailing.
pub fn trimmed_length(energies: &[f64], eps: f64) -> usize {
    energies.iter().filter(|&&e| e > eps).count()
}

/// Indices of the frames whose row sum exceeds `eps`, in original order.
pub fn kept_frames(row_sums: &[f64], eps: f64) -> Vec<usize> {
    row_sums
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s > eps)
        .map(|(i, _)| i)
        .collect()
}

/// Centered ("same") cross-correlation of `signal` with `window`.
///
/// ```text
/// out[i] = Σ_j signal[i - M/2 + j] · window[j]     (M = window.len())
/// ```
///
/// Samples outside the signal count as zero. The output has the signal's
/// length, which matches numpy's `correlate(x, w, mode="same")` whenever the
/// window is not longer than the signal.
pub fn correlate_same(signal: &[f64], window: &[f64], out: &mut [f64]) {
    let len = signal.len() as isize;
    let half = (window.len() / 2) as isize;

    for (i, value) in out.iter_mut().enumerate() {
        let start = i as isize - half;
        let mut acc = 0.0;
        for (j, &w) in window.iter().enumerate() {
            let idx = start + j as isize;
            if idx >= 0 && idx < len {
                acc += signal[idx as usize] * w;
            }
        }
        *value = acc;
    }
}
