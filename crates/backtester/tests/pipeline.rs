//! End-to-end tests of `backtester::evaluate`.

use backtester::evaluate;
use chrono::NaiveDate;
use core_types::{Error, PriceSeries, StrategyKind, StrategyParams};
use proptest::prelude::*;

fn series(closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    PriceSeries::from_closes(start, closes).unwrap()
}

fn all_kinds() -> [StrategyParams; 4] {
    [
        StrategyParams::new(StrategyKind::Sma, 2, 3),
        StrategyParams::new(StrategyKind::Ema, 5, 10),
        StrategyParams::new(StrategyKind::Rsi, 14, 30),
        StrategyParams::new(StrategyKind::Macd, 12, 26),
    ]
}

#[test]
fn sma_example_lags_signal_by_one_day() {
    let s = series(&[10.0, 10.0, 10.0, 12.0, 12.0, 12.0, 15.0]);
    let eval = evaluate(&s, &StrategyParams::new(StrategyKind::Sma, 2, 3)).unwrap();

    assert!(!eval.signals.buy[0] && !eval.signals.buy[1]);
    assert!(eval.signals.buy[3]);
    // close[3] == close[4], so the trade entered on day 3 earns nothing on day 4.
    assert_eq!(eval.returns.daily[4], Some(0.0));
    assert_eq!(eval.returns.strategy[4], Some(0.0));
    // Day 2 had no buy, so day 3's 20% jump is not captured.
    assert_eq!(eval.returns.strategy[3], Some(0.0));
    // Both averages equal 12 on day 5: no buy, so day 6's 25% jump is missed.
    assert!(!eval.signals.buy[5] && !eval.signals.sell[5]);
    assert_eq!(eval.returns.strategy[6], Some(0.0));
    assert_eq!(eval.returns.final_value(), 1.0);
}

#[test]
fn constant_prices_are_fully_degenerate() {
    let s = series(&[50.0; 40]);
    for params in all_kinds() {
        let eval = evaluate(&s, &params).unwrap();
        assert!(eval.returns.daily.iter().skip(1).all(|r| *r == Some(0.0)));
        assert!(eval.returns.cumulative.iter().all(|&c| c == 1.0));
        assert_eq!(eval.report.annualized_return, 0.0, "{}", params.kind);
        assert_eq!(eval.report.annualized_volatility, 0.0, "{}", params.kind);
        assert_eq!(eval.report.sharpe_ratio, 0.0, "{}", params.kind);
        assert_eq!(eval.summary().gmrr, "0.00%");
        assert_eq!(eval.summary().sharpe_ratio, "0.00");
    }
}

#[test]
fn single_point_is_insufficient_for_every_kind() {
    let s = series(&[100.0]);
    for params in all_kinds() {
        let err = evaluate(&s, &params).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { available: 1, .. }), "{err:?}");
    }
    let rsi_one = StrategyParams::new(StrategyKind::Rsi, 1, 2);
    assert!(matches!(
        evaluate(&s, &rsi_one),
        Err(Error::InsufficientData { required: 2, available: 1 })
    ));
}

#[test]
fn invalid_parameters_abort_before_any_report() {
    let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let err = evaluate(&s, &StrategyParams::new(StrategyKind::Sma, 3, 2)).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
}

#[test]
fn trace_matches_signals() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 / 3.0).sin() * 4.0).collect();
    let s = series(&closes);
    let eval = evaluate(&s, &StrategyParams::new(StrategyKind::Ema, 3, 8)).unwrap();
    assert_eq!(eval.trace.len(), closes.len());
    for (i, point) in eval.trace.iter().enumerate() {
        assert_eq!(point.close, closes[i]);
        assert_eq!(point.buy_signal, eval.signals.buy[i]);
        assert_eq!(point.sell_signal, eval.signals.sell[i]);
    }
}

#[test]
fn stop_loss_does_not_change_the_result() {
    let closes: Vec<f64> = (0..50).map(|i| 20.0 + (i as f64 / 5.0).cos() * 2.0).collect();
    let s = series(&closes);
    let plain = StrategyParams::new(StrategyKind::Sma, 3, 9);
    let with_stop = plain.clone().with_stop_loss(0.05);
    assert_eq!(evaluate(&s, &plain).unwrap().report, evaluate(&s, &with_stop).unwrap().report);
}

proptest! {
    #[test]
    fn evaluation_is_bit_identical_on_repeat(
        closes in prop::collection::vec(5.0f64..200.0, 40..100),
        kind in prop::sample::select(vec![StrategyKind::Sma, StrategyKind::Ema, StrategyKind::Rsi, StrategyKind::Macd]),
    ) {
        let s = series(&closes);
        let params = StrategyParams::new(kind, 5, 20);
        let first = evaluate(&s, &params).unwrap();
        let second = evaluate(&s, &params).unwrap();

        prop_assert_eq!(first.report.annualized_return.to_bits(), second.report.annualized_return.to_bits());
        prop_assert_eq!(first.report.annualized_volatility.to_bits(), second.report.annualized_volatility.to_bits());
        prop_assert_eq!(first.report.sharpe_ratio.to_bits(), second.report.sharpe_ratio.to_bits());
        prop_assert_eq!(first.summary(), second.summary());
    }
}
