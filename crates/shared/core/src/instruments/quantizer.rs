use rust_decimal::Decimal;
use thiserror::Error;

/// Rounding mode used when snapping a value onto a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Nearest grid point, ties toward the upper one
    HalfUp,
    /// Largest grid point not above the value
    Down,
    /// Smallest grid point not below the value
    Up,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantizeError {
    #[error("Invalid grid bounds: max {max} is below min {min}")]
    InvalidBounds { min: Decimal, max: Decimal },

    #[error("Invalid grid step: {0} (must be positive)")]
    InvalidStep(Decimal),

    #[error("Value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("Arithmetic overflow while quantizing {0}")]
    Arithmetic(Decimal),
}

/// Exchange grid: values must be `min + k * step` and lie within `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalQuantizer {
    min: Decimal,
    max: Decimal,
    step: Decimal,
}

impl DecimalQuantizer {
    pub fn new(min: Decimal, max: Decimal, step: Decimal) -> Result<Self, QuantizeError> {
        if max < min {
            return Err(QuantizeError::InvalidBounds { min, max });
        }
        if step <= Decimal::ZERO {
            return Err(QuantizeError::InvalidStep(step));
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Decimal {
        self.max
    }

    pub fn step(&self) -> Decimal {
        self.step
    }

    /// Snap `value` onto the grid using `rounding`.
    ///
    /// The result is normalized (no trailing zeros). Quantizing an already
    /// quantized value returns it unchanged. Values below `min` are out of
    /// range under [`Rounding::Down`], since no grid point lies beneath them.
    pub fn quantize(&self, value: Decimal, rounding: Rounding) -> Result<Decimal, QuantizeError> {
        let arithmetic = || QuantizeError::Arithmetic(value);

        // Exact remainder in [0, step); no division, so no precision loss
        let offset = value.checked_sub(self.min).ok_or_else(arithmetic)?;
        let mut remainder = offset.checked_rem(self.step).ok_or_else(arithmetic)?;
        if remainder < Decimal::ZERO {
            remainder = remainder.checked_add(self.step).ok_or_else(arithmetic)?;
        }
        let floor = value.checked_sub(remainder).ok_or_else(arithmetic)?;

        let round_up = match rounding {
            Rounding::Down => false,
            Rounding::Up => !remainder.is_zero(),
            Rounding::HalfUp => remainder >= self.step - remainder,
        };
        let result = if round_up {
            floor.checked_add(self.step).ok_or_else(arithmetic)?
        } else {
            floor
        };

        if result < self.min || result > self.max {
            return Err(QuantizeError::OutOfRange {
                value: value.normalize(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(result.normalize())
    }

    /// Whether `value` already sits on the grid
    pub fn is_on_grid(&self, value: Decimal) -> bool {
        if value < self.min || value > self.max {
            return false;
        }
        (value - self.min) % self.step == Decimal::ZERO
    }

    /// Decimal places of the step once trailing zeros are stripped
    pub fn step_scale(&self) -> u32 {
        self.step.normalize().scale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn grid(min: Decimal, max: Decimal, step: Decimal) -> DecimalQuantizer {
        DecimalQuantizer::new(min, max, step).unwrap()
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = DecimalQuantizer::new(dec!(10), dec!(1), dec!(1)).unwrap_err();
        assert!(matches!(err, QuantizeError::InvalidBounds { .. }));
    }

    #[test]
    fn test_rejects_non_positive_step() {
        assert_eq!(
            DecimalQuantizer::new(dec!(0), dec!(1), dec!(0)),
            Err(QuantizeError::InvalidStep(dec!(0)))
        );
        assert!(DecimalQuantizer::new(dec!(0), dec!(1), dec!(-0.1)).is_err());
    }

    #[test]
    fn test_half_up_snaps_to_nearest_step_from_min() {
        let q = grid(dec!(1), dec!(10), dec!(2));
        assert_eq!(q.quantize(dec!(2.9), Rounding::HalfUp).unwrap(), dec!(3));
        assert_eq!(q.quantize(dec!(2), Rounding::HalfUp).unwrap(), dec!(3));
        assert_eq!(q.quantize(dec!(1.9), Rounding::HalfUp).unwrap(), dec!(1));
    }

    #[test]
    fn test_value_above_max_is_out_of_range() {
        let q = grid(dec!(1), dec!(10), dec!(2));
        let err = q.quantize(dec!(11), Rounding::HalfUp).unwrap_err();
        assert_eq!(
            err,
            QuantizeError::OutOfRange {
                value: dec!(11),
                min: dec!(1),
                max: dec!(10)
            }
        );
    }

    #[test]
    fn test_value_below_min_is_out_of_range() {
        let q = grid(dec!(0.001), dec!(100), dec!(0.001));
        assert!(matches!(
            q.quantize(dec!(0.0004), Rounding::Down),
            Err(QuantizeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_dust_never_rounds_down_onto_min() {
        let q = grid(dec!(0.0001), dec!(9000), dec!(0.0001));
        for dust in [dec!(0.00005), dec!(0.00009999), dec!(0)] {
            assert!(
                matches!(q.quantize(dust, Rounding::Down), Err(QuantizeError::OutOfRange { .. })),
                "{dust} rounded down onto the grid"
            );
        }
    }

    #[test]
    fn test_up_and_half_up_below_min() {
        let q = grid(dec!(1), dec!(10), dec!(2));
        // Up is a ceiling: the first grid point above is min itself
        assert_eq!(q.quantize(dec!(0.2), Rounding::Up).unwrap(), dec!(1));
        // HalfUp picks the nearest grid point, which may be below min
        assert_eq!(q.quantize(dec!(0.5), Rounding::HalfUp).unwrap(), dec!(1));
        assert!(matches!(
            q.quantize(dec!(-0.5), Rounding::HalfUp),
            Err(QuantizeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rounding_exact_when_ratio_exceeds_precision() {
        // value / step needs more than 28 significant digits
        let q = grid(dec!(0), dec!(1), dec!(0.0000000000000000000000000003));
        let value = dec!(0.7000000000000000000000000001);

        let down = q.quantize(value, Rounding::Down).unwrap();
        let up = q.quantize(value, Rounding::Up).unwrap();
        assert_eq!(down, dec!(0.6999999999999999999999999999));
        assert_eq!(up, dec!(0.7000000000000000000000000002));
        assert!(down <= value && value <= up);
    }

    #[test]
    fn test_down_and_up_truncate_in_step_units() {
        let q = grid(dec!(0), dec!(1000), dec!(0.01));
        assert_eq!(q.quantize(dec!(12.3456), Rounding::Down).unwrap(), dec!(12.34));
        assert_eq!(q.quantize(dec!(12.3456), Rounding::Up).unwrap(), dec!(12.35));
        assert_eq!(q.quantize(dec!(12.34), Rounding::Up).unwrap(), dec!(12.34));
    }

    #[test]
    fn test_result_is_normalized() {
        let q = grid(dec!(0.00000100), dec!(9000.00000000), dec!(0.00000100));
        let value = q.quantize(dec!(0.5), Rounding::Down).unwrap();
        assert_eq!(value.to_string(), "0.5");
    }

    #[test]
    fn test_quantize_is_idempotent_and_on_grid() {
        let grids = [
            grid(dec!(0.0001), dec!(9000), dec!(0.0001)),
            grid(dec!(1), dec!(10), dec!(2)),
            grid(dec!(0.5), dec!(50), dec!(0.25)),
        ];
        let values = [dec!(0.5), dec!(1.23456), dec!(3.3), dec!(7.77777), dec!(9.99)];
        let modes = [Rounding::HalfUp, Rounding::Down, Rounding::Up];

        for q in &grids {
            for value in values {
                for mode in modes {
                    let Ok(once) = q.quantize(value, mode) else {
                        continue;
                    };
                    assert!(q.is_on_grid(once), "{once} not on grid {q:?}");
                    assert_eq!(q.quantize(once, mode).unwrap(), once);
                }
            }
        }
    }

    #[test]
    fn test_step_scale_ignores_trailing_zeros() {
        let q = grid(dec!(0.00010000), dec!(100), dec!(0.00010000));
        assert_eq!(q.step_scale(), 4);
        assert_eq!(grid(dec!(1), dec!(10), dec!(2)).step_scale(), 0);
    }
}
