//! Ordinary least squares with one regressor and an intercept.
//!
//! Fits `y ~ const + x` and reports the usual summary statistics: estimates
//! with standard errors, t statistics, two-sided p-values and 95% confidence
//! intervals, R², adjusted R², the F statistic and its p-value,
//! log-likelihood, AIC and BIC. Sampling distributions come from `statrs`.

use std::f64::consts::PI;
use std::fmt;

use devstats_core::DevstatsError;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};
use statrs::statistics::Statistics;

/// Coverage of the reported confidence intervals.
pub const CONFIDENCE: f64 = 0.95;

/// One fitted parameter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coefficient {
    /// `const` for the intercept, the regressor name for the slope.
    pub name: String,
    pub estimate: f64,
    pub std_error: f64,
    /// `estimate / std_error`; infinite or NaN for a perfect fit.
    pub t_value: f64,
    /// Two-sided `P>|t|` under Student's t with the residual degrees of freedom.
    pub p_value: f64,
    pub conf_low: f64,
    pub conf_high: f64,
}

impl Coefficient {
    fn new(name: &str, estimate: f64, std_error: f64, t_dist: &StudentsT) -> Self {
        let t_value = estimate / std_error;
        let p_value = if t_value.is_nan() {
            f64::NAN
        } else {
            2.0 * t_dist.sf(t_value.abs())
        };
        let margin = t_dist.inverse_cdf(0.5 + CONFIDENCE / 2.0) * std_error;
        Self {
            name: name.to_string(),
            estimate,
            std_error,
            t_value,
            p_value,
            conf_low: estimate - margin,
            conf_high: estimate + margin,
        }
    }
}

/// Result of [`ols`].
///
/// # Examples
///
/// ```
/// use devstats_stats::ols;
///
/// let fit = ols("followers", "public_repos", [(1.0, 3.0), (2.0, 5.0), (3.0, 7.5), (4.0, 9.0)]).unwrap();
/// assert_eq!(fit.observations, 4);
/// assert!(fit.slope.estimate > 1.9 && fit.slope.estimate < 2.1);
/// assert!(fit.slope.p_value < 0.01);
/// assert!(fit.to_string().contains("public_repos"));
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionSummary {
    /// Name of the dependent variable.
    pub dependent: String,
    pub observations: usize,
    /// `observations - 2`.
    pub df_residuals: usize,
    pub intercept: Coefficient,
    pub slope: Coefficient,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub f_statistic: f64,
    /// `Prob (F-statistic)`.
    pub f_p_value: f64,
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
}

fn stats_error(e: impl fmt::Display) -> DevstatsError {
    DevstatsError::Stats(e.to_string())
}

/// Fit `dependent ~ const + regressor` over `(x, y)` pairs.
///
/// Pairs with a non-finite component are dropped before fitting.
///
/// # Errors
///
/// Returns [`DevstatsError::Stats`] with fewer than three usable pairs or
/// when `x` is constant (the slope is then not identifiable).
pub fn ols<I>(dependent: &str, regressor: &str, pairs: I) -> Result<RegressionSummary, DevstatsError>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (xs, ys): (Vec<f64>, Vec<f64>) = pairs
        .into_iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .unzip();
    let n = xs.len();
    if n < 3 {
        return Err(DevstatsError::Stats(format!(
            "regression of {dependent} on {regressor} needs at least 3 observations, got {n}"
        )));
    }

    let nf = n as f64;
    let mean_x = xs.iter().mean();
    let mean_y = ys.iter().mean();
    // Sums of squares and cross-products around the means.
    let sxx = xs.iter().variance() * (nf - 1.0);
    let syy = ys.iter().variance() * (nf - 1.0);
    let sxy = xs.iter().covariance(ys.iter()) * (nf - 1.0);
    if sxx == 0.0 {
        return Err(DevstatsError::Stats(format!(
            "{regressor} is constant; cannot regress {dependent} on it"
        )));
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let ssr: f64 = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| {
            let residual = y - (intercept + slope * x);
            residual * residual
        })
        .sum();

    let df_residuals = n - 2;
    let df = df_residuals as f64;
    let sigma2 = ssr / df;

    let se_slope = (sigma2 / sxx).sqrt();
    let se_intercept = (sigma2 * (1.0 / nf + mean_x * mean_x / sxx)).sqrt();

    let (r_squared, adj_r_squared) = if syy > 0.0 {
        let r2 = 1.0 - ssr / syy;
        (r2, 1.0 - (1.0 - r2) * (nf - 1.0) / df)
    } else {
        (f64::NAN, f64::NAN)
    };
    let f_statistic = (syy - ssr) / sigma2;

    let t_dist = StudentsT::new(0.0, 1.0, df).map_err(stats_error)?;
    let f_dist = FisherSnedecor::new(1.0, df).map_err(stats_error)?;
    let f_p_value = if f_statistic.is_nan() {
        f64::NAN
    } else if f_statistic.is_infinite() {
        0.0
    } else if f_statistic <= 0.0 {
        1.0
    } else {
        f_dist.sf(f_statistic)
    };

    let log_likelihood = -nf / 2.0 * ((2.0 * PI).ln() + (ssr / nf).ln() + 1.0);
    let k = 2.0;

    Ok(RegressionSummary {
        dependent: dependent.to_string(),
        observations: n,
        df_residuals,
        intercept: Coefficient::new("const", intercept, se_intercept, &t_dist),
        slope: Coefficient::new(regressor, slope, se_slope, &t_dist),
        r_squared,
        adj_r_squared,
        f_statistic,
        f_p_value,
        log_likelihood,
        aic: -2.0 * log_likelihood + 2.0 * k,
        bic: -2.0 * log_likelihood + k * nf.ln(),
    })
}

impl RegressionSummary {
    fn name_width(&self) -> usize {
        self.slope.name.len().max(self.intercept.name.len()).max(5)
    }

    /// Render the summary as a Markdown table.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "`{} ~ const + {}`, {} observations\n\n",
            self.dependent, self.slope.name, self.observations
        ));
        out.push_str("| Term | Coef | Std err | t | P>\\|t\\| | [0.025 | 0.975] |\n");
        out.push_str("|------|------|---------|---|--------|--------|--------|\n");
        for c in [&self.intercept, &self.slope] {
            out.push_str(&format!(
                "| `{}` | {:.4} | {:.4} | {:.3} | {:.3} | {:.3} | {:.3} |\n",
                c.name, c.estimate, c.std_error, c.t_value, c.p_value, c.conf_low, c.conf_high
            ));
        }
        out.push_str(&format!(
            "\nR² {:.4} · adj. R² {:.4} · F {:.4} (p {:.4}) · log-likelihood {:.2} · AIC {:.2} · BIC {:.2}\n",
            self.r_squared,
            self.adj_r_squared,
            self.f_statistic,
            self.f_p_value,
            self.log_likelihood,
            self.aic,
            self.bic
        ));
        out
    }
}

impl fmt::Display for RegressionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.name_width();
        writeln!(
            f,
            "OLS: {} ~ const + {}  (observations: {}, df residuals: {})",
            self.dependent, self.slope.name, self.observations, self.df_residuals
        )?;
        writeln!(
            f,
            "  {:<w$} {:>12} {:>12} {:>10} {:>8} {:>12} {:>12}",
            "", "coef", "std err", "t", "P>|t|", "[0.025", "0.975]"
        )?;
        for c in [&self.intercept, &self.slope] {
            writeln!(
                f,
                "  {:<w$} {:>12.4} {:>12.4} {:>10.3} {:>8.3} {:>12.3} {:>12.3}",
                c.name, c.estimate, c.std_error, c.t_value, c.p_value, c.conf_low, c.conf_high
            )?;
        }
        writeln!(
            f,
            "  R-squared: {:.4}   Adj. R-squared: {:.4}   F-statistic: {:.4}   Prob (F-statistic): {:.4}",
            self.r_squared, self.adj_r_squared, self.f_statistic, self.f_p_value
        )?;
        write!(
            f,
            "  Log-likelihood: {:.2}   AIC: {:.2}   BIC: {:.2}",
            self.log_likelihood, self.aic, self.bic
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn textbook() -> RegressionSummary {
        ols(
            "y",
            "x",
            [(1.0, 2.0), (2.0, 4.0), (3.0, 5.0), (4.0, 4.0), (5.0, 5.0)],
        )
        .unwrap()
    }

    #[test]
    fn estimates_and_standard_errors() {
        let fit = textbook();
        assert!(close(fit.intercept.estimate, 2.2));
        assert!(close(fit.slope.estimate, 0.6));
        assert!(close(fit.slope.std_error, 0.08f64.sqrt()));
        assert!(close(fit.intercept.std_error, 0.88f64.sqrt()));
        assert!(close(fit.slope.t_value, 0.6 / 0.08f64.sqrt()));
        assert_eq!(fit.df_residuals, 3);
    }

    #[test]
    fn fit_statistics() {
        let fit = textbook();
        assert!(close(fit.r_squared, 0.6));
        assert!(close(fit.adj_r_squared, 1.0 - 0.4 * 4.0 / 3.0));
        assert!(close(fit.f_statistic, 4.5));
        let llf = -2.5 * ((2.0 * PI).ln() + (0.48f64).ln() + 1.0);
        assert!(close(fit.log_likelihood, llf));
        assert!(close(fit.aic, -2.0 * llf + 4.0));
        assert!(close(fit.bic, -2.0 * llf + 2.0 * 5f64.ln()));
    }

    #[test]
    fn p_values_and_confidence_intervals() {
        let fit = textbook();
        // Student's t with 3 degrees of freedom.
        assert!(close(fit.slope.p_value, 0.124_027_062_657_554_6));
        assert!(close(fit.intercept.p_value, 0.100_743_456_085_422));
        assert!((fit.slope.conf_low - -0.300_131_745_291_272_8).abs() < 1e-4);
        assert!((fit.slope.conf_high - 1.500_131_745_291_272_8).abs() < 1e-4);
        // With one regressor F = t², so both tests agree.
        assert!(close(fit.f_p_value, fit.slope.p_value));
    }

    #[test]
    fn perfect_fit_has_zero_p_value() {
        let fit = ols("y", "x", [(1.0, 3.0), (2.0, 5.0), (3.0, 7.0), (4.0, 9.0)]).unwrap();
        assert!(close(fit.slope.estimate, 2.0));
        assert!(fit.slope.p_value < 1e-6);
        assert!(fit.f_p_value < 1e-6);
        assert!(close(fit.slope.conf_low, 2.0) && close(fit.slope.conf_high, 2.0));
    }

    #[test]
    fn json_carries_inference_fields() {
        let json = serde_json::to_value(textbook()).unwrap();
        assert!(json["slope"]["pValue"].is_f64());
        assert!(json["slope"]["confLow"].is_f64());
        assert!(json["slope"]["confHigh"].is_f64());
        assert!(json["fPValue"].is_f64());
    }

    #[test]
    fn too_few_observations() {
        let err = ols("y", "x", [(1.0, 1.0), (2.0, 2.0)]).unwrap_err();
        assert!(err.to_string().contains("at least 3"));
    }

    #[test]
    fn constant_regressor() {
        let err = ols("y", "x", [(1.0, 1.0), (1.0, 2.0), (1.0, 3.0)]).unwrap_err();
        assert!(matches!(err, DevstatsError::Stats(_)));
    }

    #[test]
    fn non_finite_pairs_are_dropped() {
        let fit = ols(
            "y",
            "x",
            [(1.0, 2.0), (f64::NAN, 3.0), (2.0, 4.0), (3.0, 6.0), (4.0, f64::INFINITY)],
        )
        .unwrap();
        assert_eq!(fit.observations, 3);
        assert!(close(fit.slope.estimate, 2.0));
    }

    #[test]
    fn text_rendering_lists_both_terms() {
        let text = textbook().to_string();
        assert!(text.contains("y ~ const + x"));
        assert!(text.contains("const"));
        assert!(text.contains("R-squared: 0.6000"));
        assert!(text.contains("F-statistic: 4.5000"));
        assert!(text.contains("Prob (F-statistic): 0.1240"));
        assert!(text.contains("P>|t|"));
        assert!(text.contains("[0.025"));
        let md = textbook().to_markdown();
        assert!(md.contains("| `x` | 0.6000 | 0.2828 | 2.121 | 0.124 |"));
    }
}
