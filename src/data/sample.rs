//! Synthetic bilinear sample generation.
//!
//! Produces evenly spaced x values with `y` taken from a continuous two-segment
//! line plus Gaussian noise. The RNG is seeded so a given config always
//! yields the same dataset.

use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::domain::{Coefficients, SampleSet};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    pub n: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub xth: f64,
    pub a1: f64,
    pub b1: f64,
    pub a2: f64,
    /// Standard deviation of the additive noise on y.
    pub noise: f64,
    pub seed: u64,
}

impl SampleConfig {
    /// Coefficients of the generating line; `b2` is chosen so both lines meet at `xth`.
    pub fn coefficients(&self) -> Coefficients {
        Coefficients {
            a1: self.a1,
            b1: self.b1,
            a2: self.a2,
            b2: self.a1 * self.xth + self.b1 - self.a2 * self.xth,
        }
    }
}

pub fn generate_sample(config: &SampleConfig) -> Result<SampleSet, AppError> {
    if config.n < 2 {
        return Err(AppError::new(2, "Sample count must be >= 2."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::new(2, "Invalid x range for sample generation."));
    }
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(2, format!("Invalid noise level {}: {e}", config.noise)))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let coefficients = config.coefficients();
    let step = (config.x_max - config.x_min) / (config.n as f64 - 1.0);

    let samples = (0..config.n)
        .map(|i| {
            let x = config.x_min + step * i as f64;
            let y = coefficients.predict(x, config.xth) + normal.sample(&mut rng);
            (x, y)
        })
        .collect();

    Ok(samples)
}

/// Write samples in the two-column dataset format.
pub fn write_dataset(path: &Path, samples: &SampleSet) -> Result<(), AppError> {
    let mut text = String::with_capacity(samples.len() * 24);
    for (x, y) in samples.iter() {
        text.push_str(&format!("{x}\t{y}\n"));
    }
    fs::write(path, text)
        .map_err(|e| AppError::new(2, format!("Failed to write dataset '{}': {e}", path.display())))
}

/// Write a single-line threshold file.
pub fn write_threshold(path: &Path, xth: f64) -> Result<(), AppError> {
    fs::write(path, format!("{xth}\n"))
        .map_err(|e| AppError::new(2, format!("Failed to write threshold '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::{parse_dataset, parse_threshold};

    fn config() -> SampleConfig {
        SampleConfig {
            n: 21,
            x_min: 0.0,
            x_max: 10.0,
            xth: 4.0,
            a1: 2.0,
            b1: 1.0,
            a2: -0.5,
            noise: 0.1,
            seed: 7,
        }
    }

    #[test]
    fn same_seed_same_sample() {
        let a = generate_sample(&config()).unwrap();
        let b = generate_sample(&config()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 21);
        assert_eq!(a.x()[0], 0.0);
        assert_eq!(a.x()[20], 10.0);
    }

    #[test]
    fn zero_noise_is_exactly_on_the_line() {
        let cfg = SampleConfig { noise: 0.0, ..config() };
        let s = generate_sample(&cfg).unwrap();
        let c = cfg.coefficients();
        for (x, y) in s.iter() {
            assert_eq!(y, c.predict(x, cfg.xth));
        }
        assert!(c.continuity_gap(cfg.xth).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_config() {
        assert!(generate_sample(&SampleConfig { n: 1, ..config() }).is_err());
        assert!(generate_sample(&SampleConfig { x_max: -1.0, ..config() }).is_err());
        assert!(generate_sample(&SampleConfig { noise: -1.0, ..config() }).is_err());
    }

    #[test]
    fn written_files_parse_back() {
        let dir = tempfile::tempdir().unwrap();
        let s = generate_sample(&config()).unwrap();
        write_dataset(&dir.path().join("dataset.txt"), &s).unwrap();
        write_threshold(&dir.path().join("threshold.txt"), 4.0).unwrap();

        let text = std::fs::read_to_string(dir.path().join("dataset.txt")).unwrap();
        let parsed = parse_dataset(&text);
        assert!(parsed.row_errors.is_empty());
        assert_eq!(parsed.samples, s);

        let text = std::fs::read_to_string(dir.path().join("threshold.txt")).unwrap();
        assert_eq!(parse_threshold(&text).unwrap(), 4.0);
    }
}
