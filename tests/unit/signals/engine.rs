//! Unit tests for the trigger decision

use crate::support::base_time;
use trendscan::indicators::Window3;
use trendscan::models::signal::{SignalDirection, TriggerKind};
use trendscan::signals::engine::{
    Decision, ExecutionReadings, OscillatorState, SignalEngine, SkipReason, TriggerConditions,
};

const OVERSOLD: f64 = 40.0;
const OVERBOUGHT: f64 = 60.0;

fn readings(price: f64, fast: Window3, slow: Window3, trend: f64, k: Window3) -> ExecutionReadings {
    ExecutionReadings {
        price,
        bar_time: base_time(),
        ema_fast: fast,
        ema_slow: slow,
        ema_trend: trend,
        stoch_k: k,
    }
}

fn decide(r: &ExecutionReadings, gap_threshold: f64) -> Decision {
    let conditions = TriggerConditions::derive(r, gap_threshold, OVERSOLD, OVERBOUGHT);
    SignalEngine::decide(r, &conditions)
}

#[test]
fn test_gap_is_non_negative_and_zero_only_when_equal() {
    assert_eq!(SignalEngine::gap(100.0, 100.0), 0.0);
    assert!((SignalEngine::gap(101.0, 100.0) - 1.0).abs() < 1e-12);
    assert!((SignalEngine::gap(99.0, 100.0) - 1.0).abs() < 1e-12);
    for (fast, slow) in [(1.0, 2.0), (2.0, 1.0), (50.5, 50.4), (0.001, 0.002)] {
        assert!(SignalEngine::gap(fast, slow) > 0.0);
    }
}

#[test]
fn test_trend_gate() {
    assert_eq!(
        SignalEngine::trend_gate(18.0, 25.0),
        Err(SkipReason::WeakTrend { adx: 18.0 })
    );
    assert_eq!(SignalEngine::trend_gate(25.0, 25.0), Ok(25.0));
    assert_eq!(SignalEngine::trend_gate(40.0, 25.0), Ok(40.0));
}

#[test]
fn test_long_cross() {
    let r = readings(
        110.0,
        Window3::new(99.0, 99.5, 100.6),
        Window3::new(100.0, 100.0, 100.2),
        90.0,
        Window3::new(20.0, 30.0, 45.0),
    );
    assert_eq!(
        decide(&r, 0.5),
        Decision::Trigger {
            direction: SignalDirection::Long,
            trigger: TriggerKind::Cross,
        }
    );
}

#[test]
fn test_cross_wins_over_curve() {
    // EMA13 troughs and crosses on the same bar with a tiny gap.
    let r = readings(
        110.0,
        Window3::new(100.1, 99.9, 100.3),
        Window3::new(100.2, 100.2, 100.2),
        90.0,
        Window3::new(20.0, 30.0, 45.0),
    );
    let conditions = TriggerConditions::derive(&r, 0.5, OVERSOLD, OVERBOUGHT);
    assert!(conditions.bullish_cross && conditions.bullish_curve);
    assert_eq!(
        SignalEngine::decide(&r, &conditions),
        Decision::Trigger {
            direction: SignalDirection::Long,
            trigger: TriggerKind::Cross,
        }
    );
}

#[test]
fn test_long_curve_depends_on_gap_threshold() {
    // V-turn above EMA21, gap ~0.7%.
    let r = readings(
        110.0,
        Window3::new(101.0, 100.6, 100.7),
        Window3::new(100.0, 100.0, 100.0),
        90.0,
        Window3::new(50.0, 35.0, 45.0),
    );
    assert_eq!(decide(&r, 0.5), Decision::Waiting(SignalDirection::Long));
    assert_eq!(
        decide(&r, 0.9),
        Decision::Trigger {
            direction: SignalDirection::Long,
            trigger: TriggerKind::Curve,
        }
    );
}

#[test]
fn test_short_cross_and_curve() {
    let cross = readings(
        80.0,
        Window3::new(101.0, 100.5, 99.4),
        Window3::new(100.0, 100.0, 99.8),
        110.0,
        Window3::new(80.0, 70.0, 55.0),
    );
    assert_eq!(
        decide(&cross, 0.5),
        Decision::Trigger {
            direction: SignalDirection::Short,
            trigger: TriggerKind::Cross,
        }
    );

    let curve = readings(
        80.0,
        Window3::new(99.0, 99.4, 99.3),
        Window3::new(100.0, 100.0, 100.0),
        110.0,
        Window3::new(50.0, 70.0, 55.0),
    );
    assert_eq!(
        decide(&curve, 0.9),
        Decision::Trigger {
            direction: SignalDirection::Short,
            trigger: TriggerKind::Curve,
        }
    );
}

#[test]
fn test_oscillator_reads_current_or_previous_bar() {
    let r = readings(
        110.0,
        Window3::new(99.0, 99.5, 100.6),
        Window3::new(100.0, 100.0, 100.2),
        90.0,
        Window3::new(20.0, 45.0, 45.0),
    );
    let conditions = TriggerConditions::derive(&r, 0.5, OVERSOLD, OVERBOUGHT);
    assert_eq!(conditions.oscillator_state(), OscillatorState::Neutral);
    assert_eq!(
        SignalEngine::decide(&r, &conditions),
        Decision::Skip(SkipReason::NotOversold)
    );
}

#[test]
fn test_skip_reasons() {
    let oversold = Window3::new(20.0, 30.0, 35.0);
    let overbought = Window3::new(80.0, 70.0, 65.0);

    // Bull side, oversold, but price below EMA100.
    let below = readings(
        85.0,
        Window3::new(99.0, 99.5, 100.6),
        Window3::new(100.0, 100.0, 100.2),
        90.0,
        oversold,
    );
    assert_eq!(
        decide(&below, 0.5),
        Decision::Skip(SkipReason::PriceBelowTrendEma)
    );

    // Bear side, not overbought.
    let bear_neutral = readings(
        80.0,
        Window3::new(101.0, 100.5, 99.4),
        Window3::new(100.0, 100.0, 99.8),
        110.0,
        Window3::new(50.0, 50.0, 50.0),
    );
    assert_eq!(
        decide(&bear_neutral, 0.5),
        Decision::Skip(SkipReason::NotOverbought)
    );

    // Bear side, overbought, price above EMA100.
    let above = readings(
        115.0,
        Window3::new(101.0, 100.5, 99.4),
        Window3::new(100.0, 100.0, 99.8),
        110.0,
        overbought,
    );
    assert_eq!(
        decide(&above, 0.5),
        Decision::Skip(SkipReason::PriceAboveTrendEma)
    );

    // Price above EMA100 but the EMAs are below it.
    let misaligned = readings(
        100.0,
        Window3::new(94.0, 94.5, 95.6),
        Window3::new(95.0, 95.0, 95.2),
        98.0,
        oversold,
    );
    assert_eq!(
        decide(&misaligned, 0.5),
        Decision::Skip(SkipReason::Misaligned)
    );
}

#[test]
fn test_at_most_one_trigger() {
    let fasts = [
        Window3::new(99.0, 99.5, 100.6),
        Window3::new(101.0, 100.6, 100.7),
        Window3::new(101.0, 100.5, 99.4),
        Window3::new(99.0, 99.4, 99.3),
        Window3::new(100.0, 100.0, 100.0),
    ];
    let ks = [
        Window3::new(20.0, 30.0, 35.0),
        Window3::new(80.0, 70.0, 65.0),
        Window3::new(50.0, 30.0, 70.0),
    ];
    for fast in fasts {
        for k in ks {
            for (price, trend) in [(110.0, 90.0), (80.0, 110.0)] {
                let r = readings(price, fast, Window3::new(100.0, 100.0, 100.0), trend, k);
                match decide(&r, 0.9) {
                    Decision::Trigger { direction, .. } => {
                        let long = price > trend;
                        assert_eq!(direction == SignalDirection::Long, long);
                    }
                    Decision::Waiting(_) | Decision::Skip(_) => {}
                }
            }
        }
    }
}
