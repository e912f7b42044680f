//! 경제 사이클별 동적 기준값 조정.
//!
//! [`adjust`]는 사이클 단계만으로 결정되는 고정 조회 테이블입니다.
//! 모든 밸류에이션 해석(PER/PBR 저평가/적정/고평가 판정)은 이 테이블을
//! 유일한 기준으로 사용하며, 평가 1회당 한 번 조회한 [`ThresholdAdjustment`]를
//! 소비자에게 명시적으로 전달해야 합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::cycle_phase::CyclePhase;
use crate::error::{CycleError, CycleResult};

/// VIX 허용 폭 계산의 기준 VIX 수준.
pub const BASE_VIX_LEVEL: Decimal = dec!(20);

/// 단계별 기준값 조정 계수.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdAdjustment {
    /// 조정 대상 단계
    pub phase: CyclePhase,
    /// PER 기준 배수
    pub per_multiplier: Decimal,
    /// PBR 기준 배수
    pub pbr_multiplier: Decimal,
    /// VIX 허용 배수 (1.0 = 기준)
    pub vix_tolerance_multiplier: Decimal,
    /// VIX 허용 폭 변화 (포인트, 기준 VIX 20 대비, 표시용)
    pub vix_tolerance_delta: Decimal,
    /// 공포탐욕 중립값 배수
    pub fear_greed_multiplier: Decimal,
}

/// 단계별 조정 계수 조회.
///
/// 전체 함수이며 실패하지 않습니다. 같은 단계에 대해 항상 같은 값을 반환합니다.
///
/// | 단계 | PER × | VIX 허용 × | 공포탐욕 × |
/// |---|---|---|---|
/// | 회복기 | 0.90 | 1.2 (+4pt) | 1.0 |
/// | 확장기 | 1.00 | 1.0 | 1.0 |
/// | 과열기 | 1.10 | 0.8 (-4pt) | 0.9 |
/// | 수축기 | 0.85 | 1.3 (+6pt) | 1.1 |
/// | 침체기 | 0.80 | 1.5 (+10pt) | 1.2 |
///
/// VIX 정상/경계 기준은 모두 허용 배수로 스케일됩니다. `vix_tolerance_delta`는
/// 기준 VIX 20에서 늘어나거나 줄어든 폭을 포인트로 보여주는 값입니다.
///
/// ```rust
/// use cycle_core::{adjust, CyclePhase};
/// use rust_decimal_macros::dec;
///
/// let adj = adjust(CyclePhase::Overheating);
/// assert_eq!(adj.per_multiplier, dec!(1.10));
/// assert!(adj.vix_tolerance_delta < dec!(0));
/// ```
pub fn adjust(phase: CyclePhase) -> ThresholdAdjustment {
    ThresholdAdjustment::for_phase(phase)
}

impl ThresholdAdjustment {
    /// 단계별 조정 계수 (고정 테이블).
    pub fn for_phase(phase: CyclePhase) -> Self {
        let (per, vix_tolerance, fear_greed) = match phase {
            CyclePhase::Recovery => (dec!(0.90), dec!(1.2), dec!(1.0)),
            CyclePhase::Expansion => (dec!(1.00), dec!(1.0), dec!(1.0)),
            CyclePhase::Overheating => (dec!(1.10), dec!(0.8), dec!(0.9)),
            CyclePhase::Contraction => (dec!(0.85), dec!(1.3), dec!(1.1)),
            CyclePhase::Recession => (dec!(0.80), dec!(1.5), dec!(1.2)),
        };

        Self {
            phase,
            per_multiplier: per,
            pbr_multiplier: per,
            vix_tolerance_multiplier: vix_tolerance,
            vix_tolerance_delta: BASE_VIX_LEVEL * (vix_tolerance - Decimal::ONE),
            fear_greed_multiplier: fear_greed,
        }
    }

    /// 기준값에 조정 계수 적용.
    pub fn apply(&self, base: &ValuationBenchmarks) -> AdjustedBenchmarks {
        let per = |v: Decimal| (v * self.per_multiplier).round_dp(2);
        let pbr = |v: Decimal| (v * self.pbr_multiplier).round_dp(2);
        let vix = |v: Decimal| (v * self.vix_tolerance_multiplier).round_dp(2);

        AdjustedBenchmarks {
            phase: self.phase,
            per_low: per(base.per_low),
            per_fair: per(base.per_fair),
            per_high: per(base.per_high),
            pbr_low: pbr(base.pbr_low),
            pbr_fair: pbr(base.pbr_fair),
            pbr_high: pbr(base.pbr_high),
            vix_normal: vix(base.vix_normal),
            vix_elevated: vix(base.vix_elevated),
            fear_greed_neutral: (base.fear_greed_neutral * self.fear_greed_multiplier).round_dp(1),
        }
    }

    /// 조정 근거 문장.
    pub fn rationale(&self) -> String {
        format!(
            "{} 단계에서는 PER 기준 {}배, VIX 허용 범위 {}배({:+}pt) 적용",
            self.phase.label(),
            self.per_multiplier,
            self.vix_tolerance_multiplier,
            self.vix_tolerance_delta
        )
    }
}

/// 경제 사이클 조정 전 기본 밸류에이션 기준값.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationBenchmarks {
    pub per_low: Decimal,
    pub per_fair: Decimal,
    pub per_high: Decimal,
    pub pbr_low: Decimal,
    pub pbr_fair: Decimal,
    pub pbr_high: Decimal,
    pub vix_normal: Decimal,
    pub vix_elevated: Decimal,
    pub fear_greed_neutral: Decimal,
}

impl Default for ValuationBenchmarks {
    fn default() -> Self {
        Self {
            per_low: dec!(15),
            per_fair: dec!(20),
            per_high: dec!(25),
            pbr_low: dec!(2.5),
            pbr_fair: dec!(3.5),
            pbr_high: dec!(4.5),
            vix_normal: dec!(20),
            vix_elevated: dec!(25),
            fear_greed_neutral: dec!(50),
        }
    }
}

impl ValuationBenchmarks {
    /// 기준값 테이블 검증 (시작 시 1회).
    ///
    /// 모든 값은 양수여야 하고, 각 밴드는 low < fair < high 순서여야 합니다.
    pub fn validate(&self) -> CycleResult<()> {
        const TABLE: &str = "valuation_benchmarks";

        let bands = [
            ("per", self.per_low, self.per_fair, self.per_high),
            ("pbr", self.pbr_low, self.pbr_fair, self.pbr_high),
        ];
        for (name, low, fair, high) in bands {
            if low <= Decimal::ZERO {
                return Err(CycleError::config(
                    TABLE,
                    format!("{}_low는 양수여야 합니다 (현재 {})", name, low),
                ));
            }
            if !(low < fair && fair < high) {
                return Err(CycleError::config(
                    TABLE,
                    format!(
                        "{} 밴드 순서 오류: low {} < fair {} < high {} 이어야 합니다",
                        name, low, fair, high
                    ),
                ));
            }
        }

        if self.vix_normal <= Decimal::ZERO || self.vix_elevated <= self.vix_normal {
            return Err(CycleError::config(
                TABLE,
                format!(
                    "VIX 기준 오류: 0 < normal {} < elevated {} 이어야 합니다",
                    self.vix_normal, self.vix_elevated
                ),
            ));
        }

        if self.fear_greed_neutral <= Decimal::ZERO || self.fear_greed_neutral >= dec!(100) {
            return Err(CycleError::config(
                TABLE,
                format!(
                    "공포탐욕 중립값은 0~100 사이여야 합니다 (현재 {})",
                    self.fear_greed_neutral
                ),
            ));
        }

        Ok(())
    }
}

/// 경제 사이클이 반영된 기준값.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustedBenchmarks {
    pub phase: CyclePhase,
    pub per_low: Decimal,
    pub per_fair: Decimal,
    pub per_high: Decimal,
    pub pbr_low: Decimal,
    pub pbr_fair: Decimal,
    pub pbr_high: Decimal,
    pub vix_normal: Decimal,
    pub vix_elevated: Decimal,
    pub fear_greed_neutral: Decimal,
}
