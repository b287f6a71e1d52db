use rust_decimal::Decimal;

use crate::{NumericContext, Result, StatsError};

pub(crate) fn checked_sum<I>(values: I) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
        .ok_or(StatsError::Overflow)
}

/// Full-precision arithmetic mean
pub(crate) fn raw_mean(values: &[Decimal]) -> Result<Decimal> {
    if values.is_empty() {
        return Err(StatsError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    checked_sum(values.iter().copied())?
        .checked_div(Decimal::from(values.len()))
        .ok_or(StatsError::Overflow)
}

/// Full-precision population variance: sum of squared deviations over n
pub(crate) fn raw_variance(values: &[Decimal]) -> Result<Decimal> {
    let mean = raw_mean(values)?;
    let squares = values
        .iter()
        .map(|value| {
            let diff = value.checked_sub(mean).ok_or(StatsError::Overflow)?;
            diff.checked_mul(diff).ok_or(StatsError::Overflow)
        })
        .collect::<Result<Vec<_>>>()?;
    checked_sum(squares)?
        .checked_div(Decimal::from(values.len()))
        .ok_or(StatsError::Overflow)
}

/// Arithmetic mean, rounded to `ctx`
pub fn mean(values: &[Decimal], ctx: &NumericContext) -> Result<Decimal> {
    raw_mean(values).map(|m| ctx.round(m))
}

/// Population (biased) variance, rounded to `ctx`
pub fn variance(values: &[Decimal], ctx: &NumericContext) -> Result<Decimal> {
    raw_variance(values).map(|v| ctx.round(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mean() {
        let ctx = NumericContext::default();
        assert_eq!(mean(&[dec!(1), dec!(2), dec!(3), dec!(4)], &ctx).unwrap(), dec!(2.5));
    }

    #[test]
    fn test_mean_rounds_only_the_result() {
        let ctx = NumericContext::new(4);
        assert_eq!(mean(&[dec!(1), dec!(1), dec!(2)], &ctx).unwrap(), dec!(1.3333));
    }

    #[test]
    fn test_empty_input_is_insufficient() {
        let ctx = NumericContext::default();
        assert_eq!(
            mean(&[], &ctx),
            Err(StatsError::InsufficientData {
                required: 1,
                actual: 0
            })
        );
        assert!(variance(&[], &ctx).is_err());
    }

    #[test]
    fn test_biased_variance() {
        let ctx = NumericContext::default();
        // deviations from 5: 9,1,1,1,0,0,4,16 -> 32 / 8
        let values = [
            dec!(2),
            dec!(4),
            dec!(4),
            dec!(4),
            dec!(5),
            dec!(5),
            dec!(7),
            dec!(9),
        ];
        assert_eq!(variance(&values, &ctx).unwrap(), dec!(4));
        assert_eq!(variance(&[dec!(3)], &ctx).unwrap(), dec!(0));
    }

    #[test]
    fn test_overflow_is_reported() {
        let ctx = NumericContext::default();
        assert_eq!(mean(&[Decimal::MAX, Decimal::MAX], &ctx), Err(StatsError::Overflow));
    }
}
