//! Align two trajectories, compare their modulation spectra and check the
//! gradient that flows back to the prediction.

use modspec::frames::{DEFAULT_EPS, FrameAlgorithms, FrameAlignParams};
use modspec::modspec::{ModSpecNorm, ModSpecParams, ModulationSpectrumAlgorithms};
use numr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
use numr::tensor::Tensor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn setup() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuClient::new(device.clone());
    (client, device)
}

fn random_sequence(rng: &mut StdRng, t: usize, d: usize) -> Vec<f64> {
    (0..t * d).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

#[test]
fn test_one_hot_gradient_matches_perturbation() {
    let (client, device) = setup();
    let (t, d, n) = (100, 4, 2048);
    let params = ModSpecParams::new(n, ModSpecNorm::Unnormalized);

    let mut rng = StdRng::seed_from_u64(42);
    let y = random_sequence(&mut rng, t, d);
    let y_tensor = Tensor::<CpuRuntime>::from_slice(&y, &[t, d], &device);

    let (spectrum, ctx) = client.modspec_forward(&y_tensor, params).unwrap();
    assert_eq!(spectrum.shape(), &[1025, 4]);
    let base: Vec<f64> = spectrum.to_vec();

    let delta = 1e-5;
    let mut perturbed = y.clone();
    perturbed[50 * d + 2] += delta;
    let perturbed_tensor = Tensor::<CpuRuntime>::from_slice(&perturbed, &[t, d], &device);
    let shifted: Vec<f64> = client.modspec(&perturbed_tensor, params).unwrap().to_vec();

    for k in [0usize, 1, 17, 512, 1024] {
        let mut one_hot = vec![0.0f64; 1025 * d];
        one_hot[k * d + 2] = 1.0;
        let g = Tensor::<CpuRuntime>::from_slice(&one_hot, &[1025, d], &device);
        let jacobian_row: Vec<f64> = client.modspec_backward(&ctx, &g).unwrap().to_vec();

        // Other columns do not depend on column 2.
        assert_eq!(jacobian_row[50 * d], 0.0);

        let predicted = jacobian_row[50 * d + 2] * delta;
        let observed = shifted[k * d + 2] - base[k * d + 2];
        // Second-order term of a quadratic: |δ|² at most.
        assert!(
            (predicted - observed).abs() < 1e-8,
            "bin {k}: predicted {predicted}, observed {observed}"
        );
        // Untouched columns keep their spectrum.
        assert!((shifted[k * d + 1] - base[k * d + 1]).abs() < 1e-9);
    }
}

#[test]
fn test_aligned_pair_loss_gradient() {
    let (client, device) = setup();
    let d = 3;
    let params = ModSpecParams::new(64, ModSpecNorm::Orthonormal);

    let mut rng = StdRng::seed_from_u64(7);
    let mut natural = random_sequence(&mut rng, 40, d);
    // Trailing silence on the reference.
    natural[36 * d..].iter_mut().for_each(|v| *v = 0.0);
    let synthesized = random_sequence(&mut rng, 33, d);

    let natural = Tensor::<CpuRuntime>::from_slice(&natural, &[40, d], &device);
    let synthesized = Tensor::<CpuRuntime>::from_slice(&synthesized, &[33, d], &device);

    let natural = client.trim_zeros_frames(&natural, DEFAULT_EPS).unwrap();
    assert_eq!(natural.shape(), &[36, d]);

    let (natural, synthesized) = client
        .adjust_frame_length(&natural, &synthesized, FrameAlignParams::new(true, true))
        .unwrap();
    assert_eq!(natural.shape(), &[36, d]);
    assert_eq!(synthesized.shape(), &[36, d]);

    let target: Vec<f64> = client.modspec(&natural, params).unwrap().to_vec();
    let (pred, ctx) = client.modspec_forward(&synthesized, params).unwrap();
    let pred: Vec<f64> = pred.to_vec();

    // Squared error loss: dL/dpred = 2 (pred - target)
    let grad_ms: Vec<f64> = pred
        .iter()
        .zip(&target)
        .map(|(p, q)| 2.0 * (p - q))
        .collect();
    let grad_ms = Tensor::<CpuRuntime>::from_slice(&grad_ms, &[params.n_freqs(), d], &device);
    let grad = client.modspec_backward(&ctx, &grad_ms).unwrap();
    assert_eq!(grad.shape(), &[36, d]);

    let loss = |seq: &[f64]| -> f64 {
        let tensor = Tensor::<CpuRuntime>::from_slice(seq, &[36, d], &device);
        let ms: Vec<f64> = client.modspec(&tensor, params).unwrap().to_vec();
        ms.iter().zip(&target).map(|(p, q)| (p - q) * (p - q)).sum()
    };

    let synth: Vec<f64> = synthesized.to_vec();
    let grad: Vec<f64> = grad.to_vec();
    let h = 1e-6;
    for i in [0usize, 5, 31, 33 * d - 1, 34 * d] {
        let mut plus = synth.clone();
        let mut minus = synth.clone();
        plus[i] += h;
        minus[i] -= h;
        let numeric = (loss(&plus) - loss(&minus)) / (2.0 * h);
        assert!(
            (grad[i] - numeric).abs() < 1e-4 * numeric.abs().max(1.0),
            "index {i}: analytic {} numeric {numeric}",
            grad[i]
        );
    }
}
