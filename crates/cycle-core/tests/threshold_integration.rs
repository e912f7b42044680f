//! 동적 기준값 조정 통합 테스트
//!
//! 단계 조회 → 기준값 조정 → 종목 해석까지 하나의 조정값이 전달되는 흐름을 검증

use cycle_core::{
    adjust, AppConfig, CyclePhase, PerLabel, ThresholdAdjustment, ValuationBenchmarks,
    ValuationInput, ValuationView,
};
use proptest::prelude::*;
use rust_decimal_macros::dec;

fn phase_strategy() -> impl Strategy<Value = CyclePhase> {
    prop::sample::select(CyclePhase::ALL.to_vec())
}

proptest! {
    #[test]
    fn adjust_is_total_and_idempotent(phase in phase_strategy()) {
        let first = adjust(phase);
        let second = adjust(phase);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first, ThresholdAdjustment::for_phase(phase));
        prop_assert_eq!(first.per_multiplier, first.pbr_multiplier);
    }
}

#[test]
fn test_adjusted_bands_keep_order() {
    let base = ValuationBenchmarks::default();
    for phase in CyclePhase::ALL {
        let adjusted = adjust(phase).apply(&base);
        assert!(adjusted.per_low < adjusted.per_fair, "{}", phase);
        assert!(adjusted.per_fair < adjusted.per_high, "{}", phase);
        assert!(adjusted.pbr_low < adjusted.pbr_high, "{}", phase);
        assert!(adjusted.vix_normal < adjusted.vix_elevated, "{}", phase);
    }
}

#[test]
fn test_overheating_tolerates_higher_per() {
    let base = ValuationBenchmarks::default();
    let input = ValuationInput {
        per: Some(dec!(21.5)),
        pbr: Some(dec!(3.0)),
    };

    let expansion = ValuationView::interpret(&input, &adjust(CyclePhase::Expansion).apply(&base));
    let overheating =
        ValuationView::interpret(&input, &adjust(CyclePhase::Overheating).apply(&base));

    assert_eq!(expansion.per_label, Some(PerLabel::Fair));
    assert_eq!(overheating.per_label, Some(PerLabel::Fair));
    assert_eq!(overheating.adjusted_fair_per, dec!(22));
    assert!(overheating.per_text().contains("22"));
}

#[test]
fn test_default_config_round_trips_through_json() {
    let config = AppConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let parsed: AppConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.cycle, config.cycle);
    assert_eq!(parsed.valuation, config.valuation);
    assert!(parsed.validate().is_ok());
}
