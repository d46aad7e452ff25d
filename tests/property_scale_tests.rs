use gcview_chart::core::calculate_adjusted_max;
use proptest::prelude::*;

fn leading_digit(value: f64) -> f64 {
    let exponent = value.log10().floor();
    let digit = value / 10f64.powf(exponent);
    // log10 can land a hair below an exact power of ten.
    if digit >= 9.999_999 { digit / 10.0 } else { digit }
}

proptest! {
    #[test]
    fn adjusted_max_never_truncates(
        mantissa in 0.0f64..10.0,
        exponent in -9i32..12
    ) {
        let max = mantissa * 10f64.powi(exponent);
        let adjusted = calculate_adjusted_max(Some(max)).expect("axis in use");
        prop_assert!(adjusted.adjusted_max >= max * (1.0 - 1e-9));
    }

    #[test]
    fn adjusted_max_is_five_or_ten_times_power_of_ten(
        mantissa in 0.001f64..10.0,
        exponent in -9i32..12
    ) {
        let max = mantissa * 10f64.powi(exponent);
        let adjusted = calculate_adjusted_max(Some(max)).expect("axis in use");
        let digit = leading_digit(adjusted.adjusted_max);
        prop_assert!(
            (digit - 1.0).abs() < 1e-6 || (digit - 5.0).abs() < 1e-6,
            "leading digit {} of {}",
            digit,
            adjusted.adjusted_max
        );
    }

    #[test]
    fn presentation_values_stay_consistent(max in 0.0f64..1e9) {
        let adjusted = calculate_adjusted_max(Some(max)).expect("axis in use");
        let multiplier = f64::from(adjusted.presentation_multiplier);
        prop_assert!((adjusted.presentation_max * multiplier - adjusted.adjusted_max).abs()
            <= adjusted.adjusted_max * 1e-12);
        if max >= 1.0 {
            prop_assert_eq!(adjusted.fixed_digits, 0);
        }
        if adjusted.adjusted_max > 1000.0 {
            prop_assert_eq!(adjusted.presentation_multiplier, 1000);
        } else {
            prop_assert_eq!(adjusted.presentation_multiplier, 1);
        }
    }
}
