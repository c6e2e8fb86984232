//! Evaluate a bilinear fit against the full dataset.
//!
//! `fx[i]` uses the left line when `x[i] <= xth` and the right line otherwise,
//! including right-hand x values beyond anything the right subset saw.
//!
//! `R² = 1 - Σ(y - fx)² / Σ(y - ȳ)²` with `ȳ` the mean of the full y sequence.

use crate::domain::{Coefficients, Evaluation};
use crate::error::FitError;
use crate::math::has_distinct_values;

/// Compute fitted values and goodness of fit.
pub fn evaluate(x: &[f64], y: &[f64], coeffs: &Coefficients, xth: f64) -> Result<Evaluation, FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if !has_distinct_values(y) {
        return Err(FitError::DegenerateVariance);
    }

    let fitted: Vec<f64> = x.iter().map(|&xi| coeffs.predict(xi, xth)).collect();

    let n = y.len() as f64;
    let y_bar = y.iter().sum::<f64>() / n;
    let ss_tot: f64 = y.iter().map(|&yi| (yi - y_bar) * (yi - y_bar)).sum();
    if !(ss_tot > 0.0 && ss_tot.is_finite()) {
        return Err(FitError::DegenerateVariance);
    }

    let sse: f64 = y
        .iter()
        .zip(&fitted)
        .map(|(&yi, &fi)| (yi - fi) * (yi - fi))
        .sum();

    Ok(Evaluation {
        r2: 1.0 - sse / ss_tot,
        rmse: (sse / n).sqrt(),
        sse,
        fitted,
    })
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    const TENT: Coefficients = Coefficients {
        a1: 1.0,
        b1: 0.0,
        a2: -1.0,
        b2: 4.0,
    };

    #[test]
    fn perfect_fit_has_unit_r2() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [0.0, 1.0, 2.0, 1.0, 0.0, -1.0];
        let eval = evaluate(&x, &y, &TENT, 2.0).unwrap();

        assert_relative_eq!(eval.r2, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eval.sse, 0.0, epsilon = 1e-24);
        for (f, yi) in eval.fitted.iter().zip(y) {
            assert_abs_diff_eq!(*f, yi, epsilon = 1e-12);
        }
    }

    #[test]
    fn boundary_uses_left_line_and_right_line_extrapolates() {
        // Deliberately discontinuous coefficients make the branch visible.
        let c = Coefficients {
            a1: 1.0,
            b1: 0.0,
            a2: 0.0,
            b2: 100.0,
        };
        let x = [2.0, 2.0 + 1e-9, 50.0];
        let y = [1.0, 2.0, 3.0];
        let eval = evaluate(&x, &y, &c, 2.0).unwrap();
        assert_eq!(eval.fitted, vec![2.0, 100.0, 100.0]);
    }

    #[test]
    fn r2_matches_hand_computation() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [0.0, 2.0, 2.0, 4.0];
        let c = Coefficients {
            a1: 1.0,
            b1: 0.0,
            a2: 1.0,
            b2: 0.0,
        };
        // fx = x; residuals [0, 1, 0, 1]; ȳ = 2; ss_tot = 4 + 0 + 0 + 4.
        let eval = evaluate(&x, &y, &c, 1.5).unwrap();
        assert_relative_eq!(eval.r2, 1.0 - 2.0 / 8.0, epsilon = 1e-12);
        assert_relative_eq!(eval.rmse, (2.0f64 / 4.0).sqrt(), epsilon = 1e-12);
        let residuals: Vec<f64> = eval.residuals(&y).collect();
        assert_eq!(residuals, vec![0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn constant_y_is_degenerate_variance() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [5.0; 6];
        assert_eq!(
            evaluate(&x, &y, &TENT, 2.0).unwrap_err(),
            FitError::DegenerateVariance
        );

        // Values whose mean is not exactly representable still count as constant.
        let y = [0.1; 3];
        assert_eq!(
            evaluate(&x[..3], &y, &TENT, 2.0).unwrap_err(),
            FitError::DegenerateVariance
        );
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = evaluate(&[1.0, 2.0], &[1.0, 2.0, 3.0], &TENT, 2.0).unwrap_err();
        assert_eq!(err, FitError::LengthMismatch { x_len: 2, y_len: 3 });
    }
}
