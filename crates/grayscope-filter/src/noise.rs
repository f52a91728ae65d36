//! Noise models
//!
//! Probability density tables for the Gaussian and Rayleigh models,
//! min-max feature scaling, and seeded additive noise.

use crate::{FilterError, FilterResult};
use grayscope_core::{GRAY_LEVELS, PixelBuffer, PixelBufferMut, clamp_level};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Step between consecutive Rayleigh table entries.
pub const RAYLEIGH_STEP: f64 = 0.01;

/// Additive noise distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseModel {
    /// Normal distribution
    Gaussian { mean: f64, std_dev: f64 },
    /// Rayleigh distribution with offset `a` and scale `b`
    Rayleigh { a: f64, b: f64 },
}

impl NoiseModel {
    fn validate(self) -> FilterResult<Self> {
        match self {
            NoiseModel::Gaussian { mean, std_dev } => check_gaussian(mean, std_dev)?,
            NoiseModel::Rayleigh { a, b } => check_rayleigh(a, b)?,
        }
        Ok(self)
    }

    /// Draw one sample.
    fn sample<R: Rng>(self, rng: &mut R) -> f64 {
        match self {
            NoiseModel::Gaussian { mean, std_dev } => {
                // Box-Muller; 1 - U keeps the logarithm finite
                let u1 = 1.0 - rng.random::<f64>();
                let u2 = rng.random::<f64>();
                let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
                mean + std_dev * z
            }
            NoiseModel::Rayleigh { a, b } => {
                let u = rng.random::<f64>();
                a + (-b * (1.0 - u).ln()).sqrt()
            }
        }
    }
}

fn check_gaussian(mean: f64, std_dev: f64) -> FilterResult<()> {
    if !mean.is_finite() || !(std_dev.is_finite() && std_dev > 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "Gaussian needs a finite mean and a positive standard deviation, got {mean} and {std_dev}"
        )));
    }
    Ok(())
}

fn check_rayleigh(a: f64, b: f64) -> FilterResult<()> {
    if !a.is_finite() || !(b.is_finite() && b > 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "Rayleigh needs a finite a and a positive b, got {a} and {b}"
        )));
    }
    Ok(())
}

/// Rescale `values` linearly so that they span `[lo, hi]`.
///
/// A constant input (including an empty one) is returned unchanged.
pub fn normalize_range(values: &[f64], lo: f64, hi: f64) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if values.is_empty() || min == max {
        return values.to_vec();
    }
    values
        .iter()
        .map(|&v| lo + (v - min) * (hi - lo) / (max - min))
        .collect()
}

/// Gaussian density over the 256 intensity levels, scaled to `[0, 1]`.
pub fn gaussian_pdf(mean: f64, std_dev: f64) -> FilterResult<Vec<f64>> {
    check_gaussian(mean, std_dev)?;
    let norm = 1.0 / ((2.0 * PI).sqrt() * std_dev);
    let pdf: Vec<f64> = (0..GRAY_LEVELS)
        .map(|i| {
            let d = i as f64 - mean;
            norm * (-(d * d) / (2.0 * std_dev * std_dev)).exp()
        })
        .collect();
    Ok(normalize_range(&pdf, 0.0, 1.0))
}

/// Rayleigh density sampled at `z = i * 0.01`, scaled to `[0, 1]`.
///
/// Entries with `z < a` are 0.
pub fn rayleigh_pdf(a: f64, b: f64) -> FilterResult<Vec<f64>> {
    check_rayleigh(a, b)?;
    let pdf: Vec<f64> = (0..GRAY_LEVELS)
        .map(|i| {
            let z = i as f64 * RAYLEIGH_STEP;
            if z < a {
                0.0
            } else {
                let d = z - a;
                (2.0 / b) * d * (-(d * d) / b).exp()
            }
        })
        .collect();
    Ok(normalize_range(&pdf, 0.0, 1.0))
}

/// Add noise drawn from `model` to every pixel.
///
/// The generator is seeded with `seed`, so equal seeds give equal output.
/// Each noisy level is truncated and clamped to `[0, 255]`.
pub fn add_noise(buf: &PixelBuffer, model: NoiseModel, seed: u64) -> FilterResult<PixelBuffer> {
    let model = model.validate()?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut out = PixelBufferMut::new_like(buf);
    for (dst, &v) in out.data_mut().iter_mut().zip(buf.data()) {
        let noisy = v as f64 + model.sample(&mut rng);
        *dst = clamp_level(noisy as i64);
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range() {
        assert_eq!(normalize_range(&[2.0, 4.0, 6.0], 0.0, 1.0), vec![0.0, 0.5, 1.0]);
        assert_eq!(normalize_range(&[3.0, 3.0], 0.0, 1.0), vec![3.0, 3.0]);
        assert!(normalize_range(&[], 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_gaussian_pdf_peaks_at_mean() {
        let pdf = gaussian_pdf(100.0, 15.0).unwrap();
        assert_eq!(pdf.len(), GRAY_LEVELS);
        assert_eq!(pdf[100], 1.0);
        let (argmax, _) = pdf
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap();
        assert_eq!(argmax, 100);
        assert!(pdf.iter().all(|&p| (0.0..=1.0).contains(&p)));
        assert!((pdf[90] - pdf[110]).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_pdf_invalid() {
        assert!(gaussian_pdf(0.0, 0.0).is_err());
        assert!(gaussian_pdf(0.0, -1.0).is_err());
        assert!(gaussian_pdf(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_rayleigh_pdf_zero_below_a() {
        let pdf = rayleigh_pdf(0.5, 0.25).unwrap();
        assert!(pdf[..50].iter().all(|&p| p == 0.0));
        assert_eq!(pdf[50], 0.0);
        assert!(pdf[60] > 0.0);
        assert!(pdf.iter().any(|&p| p == 1.0));
        assert!(rayleigh_pdf(0.0, 0.0).is_err());
    }

    #[test]
    fn test_add_noise_reproducible() {
        let buf = PixelBuffer::filled(16, 16, 128).unwrap();
        let model = NoiseModel::Gaussian {
            mean: 0.0,
            std_dev: 20.0,
        };
        let a = add_noise(&buf, model, 7).unwrap();
        let b = add_noise(&buf, model, 7).unwrap();
        let c = add_noise(&buf, model, 8).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, buf);
    }

    #[test]
    fn test_rayleigh_noise_never_darkens() {
        let buf = PixelBuffer::filled(8, 8, 10).unwrap();
        let model = NoiseModel::Rayleigh { a: 0.0, b: 400.0 };
        let out = add_noise(&buf, model, 1).unwrap();
        assert!(out.data().iter().all(|&v| v >= 10));
    }

    #[test]
    fn test_add_noise_invalid_model() {
        let buf = PixelBuffer::new(2, 2).unwrap();
        let model = NoiseModel::Gaussian {
            mean: 0.0,
            std_dev: 0.0,
        };
        assert!(matches!(
            add_noise(&buf, model, 0),
            Err(FilterError::InvalidParameters(_))
        ));
    }
}
