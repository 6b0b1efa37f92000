//! Property tests: alignment and warm-up behaviour of indicators and signals
//! across all strategy kinds.

use chrono::NaiveDate;
use core_types::{PriceSeries, StrategyKind, StrategyParams};
use proptest::prelude::*;
use strategies::{compute_indicators, generate_signals, IndicatorOutput};

fn series(closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    PriceSeries::from_closes(start, closes).unwrap()
}

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..500.0, 40..120)
}

fn arb_params() -> impl Strategy<Value = StrategyParams> {
    prop_oneof![
        (1i64..10, 10i64..35).prop_map(|(s, l)| StrategyParams::new(StrategyKind::Sma, s, l)),
        (1i64..10, 10i64..35).prop_map(|(s, l)| StrategyParams::new(StrategyKind::Ema, s, l)),
        (1i64..30, 1i64..50).prop_map(|(s, l)| StrategyParams::new(StrategyKind::Rsi, s, l)),
        Just(StrategyParams::new(StrategyKind::Macd, 12, 26)),
    ]
}

fn undefined_at(output: &IndicatorOutput, i: usize) -> bool {
    match output {
        IndicatorOutput::Crossover { short, long } => short[i].is_none() || long[i].is_none(),
        IndicatorOutput::Oscillator { rsi } => rsi[i].is_none(),
        IndicatorOutput::Macd { macd, signal } => macd[i].is_none() || signal[i].is_none(),
    }
}

proptest! {
    #[test]
    fn signals_are_aligned_and_false_while_undefined(closes in arb_closes(), params in arb_params()) {
        let s = series(&closes);
        let output = compute_indicators(&s, &params).unwrap();
        let signals = generate_signals(&output);

        prop_assert_eq!(output.len(), closes.len());
        prop_assert_eq!(signals.buy.len(), closes.len());
        prop_assert_eq!(signals.sell.len(), closes.len());

        for i in 0..closes.len() {
            if undefined_at(&output, i) {
                prop_assert!(!signals.buy[i] && !signals.sell[i], "signal during warm-up at {}", i);
            }
            prop_assert!(!(signals.buy[i] && signals.sell[i]), "buy and sell both set at {}", i);
        }
    }

    #[test]
    fn warm_up_matches_window(closes in arb_closes(), params in arb_params()) {
        let s = series(&closes);
        let output = compute_indicators(&s, &params).unwrap();
        let expected = match params.kind {
            StrategyKind::Sma | StrategyKind::Ema => params.long_window as usize - 1,
            StrategyKind::Rsi => params.short_window as usize,
            StrategyKind::Macd => 33,
        };
        prop_assert_eq!(output.warm_up(), expected);
    }

    #[test]
    fn rsi_stays_in_range(closes in arb_closes(), period in 1i64..30) {
        let s = series(&closes);
        let params = StrategyParams::new(StrategyKind::Rsi, period, period + 1);
        if let IndicatorOutput::Oscillator { rsi } = compute_indicators(&s, &params).unwrap() {
            for v in rsi.into_iter().flatten() {
                prop_assert!((0.0..=100.0).contains(&v));
            }
        } else {
            prop_assert!(false, "RSI must produce an oscillator output");
        }
    }
}

#[test]
fn sma_example_from_flat_then_rising_prices() {
    let s = series(&[10.0, 10.0, 10.0, 12.0, 12.0, 12.0, 15.0]);
    let output = compute_indicators(&s, &StrategyParams::new(StrategyKind::Sma, 2, 3)).unwrap();
    let IndicatorOutput::Crossover { short, long } = &output else {
        panic!("SMA must produce a crossover output");
    };

    assert_eq!(short[0], None);
    assert_eq!(long[0], None);
    assert_eq!(long[1], None);
    assert!((short[3].unwrap() - 11.0).abs() < 1e-12);
    assert!((long[3].unwrap() - 32.0 / 3.0).abs() < 1e-12);

    let signals = generate_signals(&output);
    assert!(!signals.buy[0] && !signals.buy[1]);
    assert!(signals.buy[3]);
}
