//! 경제 사이클 분류기.
//!
//! 4개 지표를 각각 -1.0(수축 성향) ~ +1.0(확장/과열 성향)으로 정규화한 뒤
//! 고정 가중치로 합산한 종합 점수를 5단계로 구간화합니다.
//!
//! # 차원별 점수
//!
//! | 지표 | 기준 |
//! |---|---|
//! | VIX | < 15 확장 성향, 15~22 중립, 22~30 완만한 감점, > 30 급격한 감점 |
//! | 10년물 금리 추세 | ±0.10%p 이내 보합, ±0.50%p 이상 급등/급락 |
//! | Forward P/E | 역사적 평균 대비 ±5% 이내 중립, ±25% 이상 극단 |
//! | 공포탐욕 | (값 - 50) / 25, < 25 극도의 공포, > 75 극도의 탐욕 |
//!
//! # 구간화
//!
//! - 종합 < recession → 침체기
//! - recession ≤ 종합 < contraction → 수축기
//! - contraction ≤ 종합 ≤ upper → 확장기
//! - 종합 > upper → P/E 또는 금리 신호가 과열이면 과열기, 아니면 회복기
//!
//! 경계값과 정확히 같은 점수는 중앙에 가까운 단계로 판정하여
//! 잡음 섞인 입력에서 인접 단계 사이를 오가는 것을 막습니다. 종합 점수는
//! 구간화 전에 소수점 9자리로 반올림하므로 부동소수점 합산 오차
//! (예: 0.35000000000000003)가 경계 판정을 뒤집지 않습니다.
//!
//! 나머지 지표를 고정하고 VIX만 높이면 단계는 상단 구간 → 확장기 → 수축기
//! → 침체기 방향으로만 이동합니다.

use chrono::{DateTime, Utc};
use tracing::debug;

use cycle_core::{
    CycleAssessment, CycleConfig, CyclePhase, CycleResult, DimensionScore, IndicatorKind,
    IndicatorReading, IndicatorSnapshot,
};

/// 10년물 금리 보합 판정 폭 (%p).
pub const YIELD_FLAT_BAND: f64 = 0.10;
/// 10년물 금리 급변 판정 폭 (%p).
pub const YIELD_SHARP_MOVE: f64 = 0.50;
/// P/E 편차 중립 폭.
pub const PE_NEUTRAL_BAND: f64 = 0.05;
/// P/E 편차 극단 폭.
pub const PE_EXTREME_DEVIATION: f64 = 0.25;

/// 종합 점수 반올림 배율 (소수점 9자리).
const SCORE_SCALE: f64 = 1e9;

const YIELD_CHANGE_LIMIT: f64 = 2.0;
const LEAN_EPSILON: f64 = 0.05;

/// VIX 수준 점수.
///
/// VIX에 대해 단조 감소(비증가)합니다.
pub fn vix_score(vix: f64) -> f64 {
    if vix < 15.0 {
        ((15.0 - vix) / 5.0).min(1.0)
    } else if vix <= 22.0 {
        0.0
    } else if vix <= 30.0 {
        -0.4 * (vix - 22.0) / 8.0
    } else {
        (-0.4 - 0.6 * (vix - 30.0) / 10.0).max(-1.0)
    }
}

/// 10년물 금리 변화량(%p) 점수.
pub fn yield_trend_score(change: f64) -> f64 {
    let change = change.clamp(-YIELD_CHANGE_LIMIT, YIELD_CHANGE_LIMIT);
    banded_score(change, YIELD_FLAT_BAND, YIELD_SHARP_MOVE)
}

/// Forward P/E 점수 (역사적 평균 대비 편차).
pub fn forward_pe_score(pe: f64, historical_avg: f64) -> f64 {
    let deviation = (pe - historical_avg) / historical_avg;
    banded_score(deviation, PE_NEUTRAL_BAND, PE_EXTREME_DEVIATION)
}

/// 공포탐욕 지수 점수.
pub fn fear_greed_score(value: f64) -> f64 {
    ((value - 50.0) / 25.0).clamp(-1.0, 1.0)
}

/// `|x| <= neutral`이면 0, `|x| >= extreme`이면 ±1, 사이는 선형.
fn banded_score(x: f64, neutral: f64, extreme: f64) -> f64 {
    let magnitude = x.abs();
    if magnitude <= neutral {
        return 0.0;
    }
    let scaled = ((magnitude - neutral) / (extreme - neutral)).min(1.0);
    scaled.copysign(x)
}

/// 점수를 소수점 9자리로 반올림합니다.
fn snap_score(score: f64) -> f64 {
    (score * SCORE_SCALE).round() / SCORE_SCALE
}

fn lean_label(score: f64) -> &'static str {
    if score > LEAN_EPSILON {
        "확장/과열 성향"
    } else if score < -LEAN_EPSILON {
        "수축/침체 성향"
    } else {
        "중립"
    }
}

/// 차원 하나의 채점 결과.
struct Scored {
    score: f64,
    defaulted: bool,
    note: String,
}

impl Scored {
    fn defaulted(note: String) -> Self {
        Self {
            score: 0.0,
            defaulted: true,
            note,
        }
    }
}

/// 단계 구간화에 필요한 보조 신호.
#[derive(Debug, Clone, Copy, Default)]
struct PhaseSignals {
    pe_score: f64,
    yield_score: f64,
}

/// 경제 사이클 분류기.
///
/// 생성 시 가중치/구간 테이블을 검증하며, 생성된 분류기는
/// 어떤 스냅샷에 대해서도 실패하지 않습니다.
///
/// # 사용 예시
///
/// ```rust
/// use cycle_analytics::CycleClassifier;
/// use cycle_core::{CyclePhase, IndicatorReading, IndicatorSnapshot};
///
/// let classifier = CycleClassifier::with_defaults();
/// let snapshot = IndicatorSnapshot::new()
///     .with_vix(IndicatorReading::new(18.0))
///     .with_treasury_10y(IndicatorReading::with_previous(4.2, 4.2))
///     .with_forward_pe(IndicatorReading::new(17.0))
///     .with_fear_greed(IndicatorReading::new(50.0));
///
/// let assessment = classifier.classify(&snapshot);
/// assert_eq!(assessment.phase, CyclePhase::Expansion);
/// ```
#[derive(Debug, Clone)]
pub struct CycleClassifier {
    config: CycleConfig,
}

impl CycleClassifier {
    /// 설정을 검증하고 분류기를 생성합니다.
    ///
    /// # 에러
    /// - 가중치 합계가 1.0이 아니거나 음수/비유한 가중치
    /// - 구간 경계 순서 오류
    /// - P/E 역사적 평균이 양수가 아님
    pub fn new(config: CycleConfig) -> CycleResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 기본 설정으로 생성합니다 (기본 테이블은 항상 유효).
    pub fn with_defaults() -> Self {
        Self {
            config: CycleConfig::default(),
        }
    }

    /// 현재 설정.
    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// 스냅샷을 분류합니다.
    pub fn classify(&self, snapshot: &IndicatorSnapshot) -> CycleAssessment {
        self.classify_at(snapshot, Utc::now())
    }

    /// 계산 시각을 지정해 분류합니다.
    pub fn classify_at(&self, snapshot: &IndicatorSnapshot, now: DateTime<Utc>) -> CycleAssessment {
        let mut rationale = Vec::with_capacity(IndicatorKind::ALL.len() + 2);
        let mut dimensions = Vec::with_capacity(IndicatorKind::ALL.len());

        for kind in IndicatorKind::ALL {
            let scored = self.score_dimension(kind, snapshot.get(kind));
            rationale.push(scored.note);
            dimensions.push(DimensionScore {
                indicator: kind,
                score: scored.score,
                weight: self.config.weights.weight(kind),
                defaulted: scored.defaulted,
            });
        }

        let composite = snap_score(
            dimensions
                .iter()
                .map(DimensionScore::contribution)
                .sum::<f64>()
                .clamp(-1.0, 1.0),
        );

        let score_of = |kind: IndicatorKind| {
            dimensions
                .iter()
                .find(|d| d.indicator == kind)
                .map(|d| d.score)
                .unwrap_or(0.0)
        };
        let signals = PhaseSignals {
            pe_score: score_of(IndicatorKind::ForwardPe),
            yield_score: score_of(IndicatorKind::TreasuryYield10y),
        };

        let phase = self.resolve_phase(composite, &signals);
        rationale.push(format!(
            "종합 점수 {:+.2} → {} ({})",
            composite,
            phase.label(),
            phase
        ));
        if let Some(note) = disambiguation_note(phase, &signals) {
            rationale.push(note);
        }

        let confidence = confidence(&dimensions, composite);

        debug!(
            phase = %phase,
            score = composite,
            confidence = confidence,
            defaulted = dimensions.iter().filter(|d| d.defaulted).count(),
            "경제 사이클 분류 완료"
        );

        CycleAssessment {
            phase,
            score: composite,
            confidence,
            dimensions,
            rationale,
            snapshot: snapshot.clone(),
            computed_at: now,
        }
    }

    fn score_dimension(&self, kind: IndicatorKind, reading: Option<&IndicatorReading>) -> Scored {
        let reading = match reading {
            Some(r) if r.is_finite() => r,
            Some(_) => {
                return Scored::defaulted(format!("{}: 비정상 값, 중립 기본값 적용", kind));
            }
            None => {
                return Scored::defaulted(format!("{}: 데이터 없음, 중립 기본값 적용", kind));
            }
        };

        let (low, high) = kind.valid_range();
        let value = reading.current.clamp(low, high);
        let clamp_note = if value != reading.current {
            format!(" (범위 밖 값 {:.2} → {:.2})", reading.current, value)
        } else {
            String::new()
        };

        let (score, detail) = match kind {
            IndicatorKind::Vix => (vix_score(value), format!("{:.2}", value)),
            IndicatorKind::TreasuryYield10y => match reading.change() {
                Some(change) => (
                    yield_trend_score(change),
                    format!("{:.2}% (변화 {:+.2}%p)", value, change),
                ),
                None => {
                    return Scored::defaulted(format!(
                        "{}: {:.2}%, 추세 데이터 없음, 중립 기본값 적용",
                        kind, value
                    ));
                }
            },
            IndicatorKind::ForwardPe => {
                let avg = self.config.pe_historical_avg;
                (
                    forward_pe_score(value, avg),
                    format!("{:.2} (역사적 평균 {:.1})", value, avg),
                )
            }
            IndicatorKind::FearGreed => (fear_greed_score(value), format!("{:.1}", value)),
        };

        Scored {
            score,
            defaulted: false,
            note: format!(
                "{}: {}{} → {:+.2} ({})",
                kind,
                detail,
                clamp_note,
                score,
                lean_label(score)
            ),
        }
    }

    /// 종합 점수를 단계로 구간화합니다.
    ///
    /// 경계값과 같은 점수는 중앙 쪽 단계로 판정합니다.
    fn resolve_phase(&self, composite: f64, signals: &PhaseSignals) -> CyclePhase {
        let bp = &self.config.breakpoints;

        if composite < bp.recession {
            CyclePhase::Recession
        } else if composite < bp.contraction {
            CyclePhase::Contraction
        } else if composite <= bp.upper {
            CyclePhase::Expansion
        } else if signals.pe_score > 0.0 || signals.yield_score > 0.0 {
            CyclePhase::Overheating
        } else {
            CyclePhase::Recovery
        }
    }
}

impl Default for CycleClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn disambiguation_note(phase: CyclePhase, signals: &PhaseSignals) -> Option<String> {
    match phase {
        CyclePhase::Overheating => Some(format!(
            "상단 구간: P/E {:+.2}, 금리 추세 {:+.2} 중 과열 신호 확인 → 과열기",
            signals.pe_score, signals.yield_score
        )),
        CyclePhase::Recovery => Some(format!(
            "상단 구간이지만 P/E {:+.2}, 금리 추세 {:+.2} 중 과열 신호 없음 → 회복기",
            signals.pe_score, signals.yield_score
        )),
        _ => None,
    }
}

/// 판단 신뢰도.
///
/// 데이터가 있는 차원의 가중치 합(커버리지)과, 각 차원 점수가 종합 점수와
/// 얼마나 일치하는지(일관성)를 곱합니다.
fn confidence(dimensions: &[DimensionScore], composite: f64) -> f64 {
    let coverage: f64 = dimensions
        .iter()
        .filter(|d| !d.defaulted)
        .map(|d| d.weight)
        .sum();
    if coverage <= 0.0 {
        return 0.0;
    }

    let dispersion: f64 = dimensions
        .iter()
        .filter(|d| !d.defaulted)
        .map(|d| d.weight * (d.score - composite).abs())
        .sum::<f64>()
        / coverage;
    let agreement = 1.0 - dispersion / 2.0;

    (coverage * agreement).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cycle_core::{CycleWeights, PhaseBreakpoints};

    fn full_snapshot(vix: f64, yield_change: f64, pe: f64, fg: f64) -> IndicatorSnapshot {
        IndicatorSnapshot::new()
            .with_vix(IndicatorReading::new(vix))
            .with_treasury_10y(IndicatorReading::with_previous(4.0 + yield_change, 4.0))
            .with_forward_pe(IndicatorReading::new(pe))
            .with_fear_greed(IndicatorReading::new(fg))
    }

    #[test]
    fn test_vix_score_breakpoints() {
        assert_eq!(vix_score(10.0), 1.0);
        assert_eq!(vix_score(5.0), 1.0);
        assert_eq!(vix_score(15.0), 0.0);
        assert_eq!(vix_score(22.0), 0.0);
        assert!((vix_score(30.0) + 0.4).abs() < 1e-9);
        assert!((vix_score(35.0) + 0.7).abs() < 1e-9);
        assert_eq!(vix_score(40.0), -1.0);
        assert_eq!(vix_score(80.0), -1.0);
    }

    #[test]
    fn test_vix_penalty_steeper_above_30() {
        let below = vix_score(26.0) - vix_score(30.0);
        let above = vix_score(30.0) - vix_score(34.0);
        assert!(above > below);
    }

    #[test]
    fn test_yield_trend_score() {
        assert_eq!(yield_trend_score(0.0), 0.0);
        assert_eq!(yield_trend_score(0.10), 0.0);
        assert_eq!(yield_trend_score(-0.05), 0.0);
        assert!((yield_trend_score(0.30) - 0.5).abs() < 1e-9);
        assert_eq!(yield_trend_score(0.8), 1.0);
        assert_eq!(yield_trend_score(-0.8), -1.0);
        assert_eq!(yield_trend_score(-5.0), -1.0);
    }

    #[test]
    fn test_forward_pe_score() {
        assert_eq!(forward_pe_score(17.0, 17.0), 0.0);
        assert_eq!(forward_pe_score(23.0, 17.0), 1.0);
        assert_eq!(forward_pe_score(12.0, 17.0), -1.0);
        assert!(forward_pe_score(19.0, 17.0) > 0.0);
        assert!(forward_pe_score(19.0, 17.0) < 1.0);
    }

    #[test]
    fn test_fear_greed_score() {
        assert_eq!(fear_greed_score(50.0), 0.0);
        assert_eq!(fear_greed_score(85.0), 1.0);
        assert_eq!(fear_greed_score(10.0), -1.0);
        assert!((fear_greed_score(62.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_breakpoint_ties_prefer_central_phase() {
        let classifier = CycleClassifier::with_defaults();
        let neutral = PhaseSignals::default();
        let bp = PhaseBreakpoints::default();

        assert_eq!(classifier.resolve_phase(bp.recession, &neutral), CyclePhase::Contraction);
        assert_eq!(classifier.resolve_phase(bp.contraction, &neutral), CyclePhase::Expansion);
        assert_eq!(classifier.resolve_phase(bp.upper, &neutral), CyclePhase::Expansion);

        assert_eq!(classifier.resolve_phase(bp.recession - 1e-9, &neutral), CyclePhase::Recession);
        assert_eq!(classifier.resolve_phase(bp.contraction - 1e-9, &neutral), CyclePhase::Contraction);
        assert_eq!(classifier.resolve_phase(bp.upper + 1e-9, &neutral), CyclePhase::Recovery);
    }

    #[test]
    fn test_upper_band_disambiguation() {
        let classifier = CycleClassifier::with_defaults();
        let hot = PhaseSignals {
            pe_score: 0.0,
            yield_score: 0.6,
        };
        assert_eq!(classifier.resolve_phase(0.6, &hot), CyclePhase::Overheating);

        let cool = PhaseSignals {
            pe_score: -0.2,
            yield_score: -0.3,
        };
        assert_eq!(classifier.resolve_phase(0.6, &cool), CyclePhase::Recovery);
    }

    #[test]
    fn test_composite_rounding_keeps_upper_tie_in_expansion() {
        let classifier = CycleClassifier::with_defaults();
        // 0.3 * 0.9 + 0.25 * 0.32 의 부동소수점 합은 0.35000000000000003
        let snapshot = IndicatorSnapshot::new()
            .with_vix(IndicatorReading::new(10.5))
            .with_treasury_10y(IndicatorReading::with_previous(4.2, 4.2))
            .with_forward_pe(IndicatorReading::new(17.0))
            .with_fear_greed(IndicatorReading::new(58.0));

        let assessment = classifier.classify(&snapshot);
        assert_eq!(assessment.score, 0.35);
        assert_eq!(assessment.phase, CyclePhase::Expansion);
    }

    #[test]
    fn test_snap_score() {
        assert_eq!(snap_score(0.35000000000000003), 0.35);
        assert_eq!(snap_score(-0.19999999999999998), -0.2);
        assert!(snap_score(0.35 + 1e-9) > 0.35);
        assert_eq!(snap_score(-1.0), -1.0);
    }

    #[test]
    fn test_cheap_rebounding_pe_stays_contraction() {
        let classifier = CycleClassifier::with_defaults();
        // VIX 28, 금리 급락, 저평가 P/E 반등 중, 공포 35
        let snapshot = IndicatorSnapshot::new()
            .with_vix(IndicatorReading::new(28.0))
            .with_treasury_10y(IndicatorReading::with_previous(3.6, 4.0))
            .with_forward_pe(IndicatorReading::with_previous(14.0, 13.0))
            .with_fear_greed(IndicatorReading::new(35.0));

        let assessment = classifier.classify(&snapshot);
        assert!(assessment.score < -0.2 && assessment.score >= -0.6, "{}", assessment.score);
        assert_eq!(assessment.phase, CyclePhase::Contraction);
    }

    #[test]
    fn test_cheap_falling_pe_stays_contraction() {
        let classifier = CycleClassifier::with_defaults();
        let snapshot = IndicatorSnapshot::new()
            .with_vix(IndicatorReading::new(28.0))
            .with_treasury_10y(IndicatorReading::with_previous(3.6, 4.0))
            .with_forward_pe(IndicatorReading::with_previous(14.0, 15.0))
            .with_fear_greed(IndicatorReading::new(35.0));

        assert_eq!(classifier.classify(&snapshot).phase, CyclePhase::Contraction);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let classifier = CycleClassifier::with_defaults();
        let snapshot = full_snapshot(-5.0, 0.0, 17.0, 140.0);

        let assessment = classifier.classify(&snapshot);
        let vix = assessment.dimension(IndicatorKind::Vix).unwrap();
        let fg = assessment.dimension(IndicatorKind::FearGreed).unwrap();
        assert_eq!(vix.score, 1.0);
        assert_eq!(fg.score, 1.0);
        assert!(!vix.defaulted);
        assert!(assessment.rationale[0].contains("범위 밖"));
    }

    #[test]
    fn test_non_finite_value_is_defaulted() {
        let classifier = CycleClassifier::with_defaults();
        let snapshot = full_snapshot(f64::NAN, 0.0, 17.0, 50.0);

        let assessment = classifier.classify(&snapshot);
        assert_eq!(assessment.defaulted_dimensions(), vec![IndicatorKind::Vix]);
        assert!(assessment.rationale[0].contains("비정상 값"));
        assert!(assessment.score.is_finite());
    }

    #[test]
    fn test_yield_without_previous_is_defaulted() {
        let classifier = CycleClassifier::with_defaults();
        let snapshot = IndicatorSnapshot::new()
            .with_vix(IndicatorReading::new(18.0))
            .with_treasury_10y(IndicatorReading::new(4.3))
            .with_forward_pe(IndicatorReading::new(17.0))
            .with_fear_greed(IndicatorReading::new(50.0));

        let assessment = classifier.classify(&snapshot);
        assert_eq!(
            assessment.defaulted_dimensions(),
            vec![IndicatorKind::TreasuryYield10y]
        );
        assert!(assessment.rationale[1].contains("추세 데이터 없음"));
    }

    #[test]
    fn test_confidence_drops_with_missing_data() {
        let classifier = CycleClassifier::with_defaults();
        let full = classifier.classify(&full_snapshot(10.0, 0.0, 23.0, 85.0));
        let partial = classifier.classify(&IndicatorSnapshot::new().with_vix(IndicatorReading::new(10.0)));
        let empty = classifier.classify(&IndicatorSnapshot::new());

        assert!(full.confidence > partial.confidence);
        assert_eq!(empty.confidence, 0.0);
        assert_eq!(empty.phase, CyclePhase::Expansion);
        assert!((0.0..=1.0).contains(&full.confidence));
    }

    #[test]
    fn test_new_rejects_invalid_weights() {
        let config = CycleConfig {
            weights: CycleWeights {
                vix: 0.5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(CycleClassifier::new(config).is_err());
    }

    #[test]
    fn test_custom_weights_change_composite() {
        let config = CycleConfig {
            weights: CycleWeights {
                vix: 1.0,
                treasury_yield: 0.0,
                forward_pe: 0.0,
                fear_greed: 0.0,
            },
            ..Default::default()
        };
        let classifier = CycleClassifier::new(config).unwrap();
        let assessment = classifier.classify(&full_snapshot(40.0, 0.0, 17.0, 90.0));
        assert_eq!(assessment.score, -1.0);
        assert_eq!(assessment.phase, CyclePhase::Recession);
    }
}
