//! Ordinary least squares over decimal points

use rust_decimal::Decimal;

use crate::descriptive::{checked_sum, raw_mean, raw_variance};
use crate::{NumericContext, Result, StatsError};

/// A sample: `x` is time (seconds), `y` is price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: Decimal,
    pub y: Decimal,
}

impl Point {
    pub fn new(x: Decimal, y: Decimal) -> Self {
        Self { x, y }
    }
}

/// Fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegressionLine {
    pub slope: Decimal,
    pub intercept: Decimal,
    /// Variance of the residuals relative to the mean `y` of the fitted
    /// points. `Decimal::MAX` when that mean is zero.
    pub volatility: Decimal,
}

impl RegressionLine {
    pub fn y_for_x(&self, x: Decimal) -> Option<Decimal> {
        self.slope.checked_mul(x)?.checked_add(self.intercept)
    }
}

/// Least-squares fitter rounding its outputs to a [`NumericContext`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRegression {
    context: NumericContext,
}

impl LinearRegression {
    pub fn new(context: NumericContext) -> Self {
        Self { context }
    }

    /// Fit a line through `points`.
    ///
    /// Needs at least two points with distinct `x` values.
    pub fn fit(&self, points: &[Point]) -> Result<RegressionLine> {
        if points.len() < 2 {
            return Err(StatsError::InsufficientData {
                required: 2,
                actual: points.len(),
            });
        }

        let xs: Vec<Decimal> = points.iter().map(|p| p.x).collect();
        let ys: Vec<Decimal> = points.iter().map(|p| p.y).collect();
        let mean_x = raw_mean(&xs)?;
        let mean_y = raw_mean(&ys)?;

        let mut deviations_xx = Vec::with_capacity(points.len());
        let mut deviations_xy = Vec::with_capacity(points.len());
        for point in points {
            let dx = point.x.checked_sub(mean_x).ok_or(StatsError::Overflow)?;
            let dy = point.y.checked_sub(mean_y).ok_or(StatsError::Overflow)?;
            deviations_xx.push(dx.checked_mul(dx).ok_or(StatsError::Overflow)?);
            deviations_xy.push(dx.checked_mul(dy).ok_or(StatsError::Overflow)?);
        }
        let sxx = checked_sum(deviations_xx)?;
        let sxy = checked_sum(deviations_xy)?;
        if sxx.is_zero() {
            return Err(StatsError::VerticalRegression);
        }

        let slope = sxy.checked_div(sxx).ok_or(StatsError::Overflow)?;
        let intercept = slope
            .checked_mul(mean_x)
            .and_then(|offset| mean_y.checked_sub(offset))
            .ok_or(StatsError::Overflow)?;

        let residuals = points
            .iter()
            .map(|p| {
                slope
                    .checked_mul(p.x)
                    .and_then(|fitted| fitted.checked_add(intercept))
                    .and_then(|fitted| p.y.checked_sub(fitted))
                    .ok_or(StatsError::Overflow)
            })
            .collect::<Result<Vec<_>>>()?;
        let residual_variance = raw_variance(&residuals)?;

        let volatility = if mean_y.is_zero() {
            Decimal::MAX
        } else {
            self.context.round(
                residual_variance
                    .checked_div(mean_y)
                    .ok_or(StatsError::Overflow)?,
            )
        };

        Ok(RegressionLine {
            slope: self.context.round(slope),
            intercept: self.context.round(intercept),
            volatility,
        })
    }
}
