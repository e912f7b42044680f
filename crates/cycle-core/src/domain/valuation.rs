//! 조정된 기준값을 이용한 밸류에이션 해석.
//!
//! 해석 함수는 모두 [`AdjustedBenchmarks`]를 인자로 받습니다. 기준값을
//! 내부에서 다시 계산하지 않으므로, 한 번의 사이클 평가에서 나온 조정값이
//! 모든 해석에 동일하게 적용됩니다.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::threshold::AdjustedBenchmarks;

/// PER 판정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PerLabel {
    /// 음수 PER (적자)
    Deficit,
    Undervalued,
    SlightlyUndervalued,
    Fair,
    SlightlyOvervalued,
    Overvalued,
}

impl PerLabel {
    /// 적정 PER 대비 비율로 판정.
    ///
    /// 0.6배 미만 저평가, 0.9배 미만 약간 저평가, 1.1배 미만 적정,
    /// 1.4배 미만 약간 고평가, 그 이상 고평가.
    pub fn classify(per: Decimal, fair_per: Decimal) -> Self {
        if per < Decimal::ZERO {
            Self::Deficit
        } else if per < fair_per * dec!(0.6) {
            Self::Undervalued
        } else if per < fair_per * dec!(0.9) {
            Self::SlightlyUndervalued
        } else if per < fair_per * dec!(1.1) {
            Self::Fair
        } else if per < fair_per * dec!(1.4) {
            Self::SlightlyOvervalued
        } else {
            Self::Overvalued
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Deficit => "적자 (주의 필요)",
            Self::Undervalued => "저평가",
            Self::SlightlyUndervalued => "약간 저평가",
            Self::Fair => "적정 수준",
            Self::SlightlyOvervalued => "약간 고평가",
            Self::Overvalued => "고평가",
        }
    }
}

/// PBR 판정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PbrLabel {
    /// 음수 PBR (자본잠식)
    Impaired,
    Undervalued,
    Fair,
    Overvalued,
}

impl PbrLabel {
    /// 조정된 PBR 밴드(low~high)로 판정.
    pub fn classify(pbr: Decimal, low: Decimal, high: Decimal) -> Self {
        if pbr < Decimal::ZERO {
            Self::Impaired
        } else if pbr < low {
            Self::Undervalued
        } else if pbr <= high {
            Self::Fair
        } else {
            Self::Overvalued
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Impaired => "자본잠식 (주의)",
            Self::Undervalued => "저평가",
            Self::Fair => "적정 수준",
            Self::Overvalued => "고평가",
        }
    }
}

/// VIX 수준 판정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VixLevel {
    /// 정상 기준 미만
    Calm,
    /// 정상~경계 구간
    Elevated,
    /// 경계 기준 초과
    Stressed,
}

impl VixLevel {
    /// 조정된 VIX 기준으로 판정.
    pub fn classify(vix: Decimal, normal: Decimal, elevated: Decimal) -> Self {
        if vix <= normal {
            Self::Calm
        } else if vix <= elevated {
            Self::Elevated
        } else {
            Self::Stressed
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Calm => "안정 (정상 범위)",
            Self::Elevated => "불안 (방어적 포지션 고려)",
            Self::Stressed => "공포 (역발상 매수 기회 가능)",
        }
    }
}

const NEUTRAL_FEAR_GREED: f64 = 50.0;

/// 공포탐욕 지수 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FearGreedRating {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl FearGreedRating {
    /// 25/45/55/75 경계로 판정.
    pub fn from_score(score: f64) -> Self {
        if score < 25.0 {
            Self::ExtremeFear
        } else if score < 45.0 {
            Self::Fear
        } else if score < 55.0 {
            Self::Neutral
        } else if score < 75.0 {
            Self::Greed
        } else {
            Self::ExtremeGreed
        }
    }

    /// 단계별로 조정된 중립값 기준으로 판정.
    ///
    /// 중립값이 50에서 벗어난 만큼 지수를 옮긴 뒤 25/45/55/75 경계를 적용합니다.
    /// 침체기(중립 60)의 58은 중립, 과열기(중립 45)의 42는 중립으로 읽힙니다.
    pub fn relative_to(score: f64, neutral: Decimal) -> Self {
        let shift = neutral.to_f64().unwrap_or(NEUTRAL_FEAR_GREED) - NEUTRAL_FEAR_GREED;
        Self::from_score(score - shift)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ExtremeFear => "극도의 공포",
            Self::Fear => "공포",
            Self::Neutral => "중립",
            Self::Greed => "탐욕",
            Self::ExtremeGreed => "극도의 탐욕",
        }
    }

    /// 역발상 관점의 행동 제안.
    pub fn contrarian_view(self) -> &'static str {
        match self {
            Self::ExtremeFear => "매수 기회",
            Self::Fear => "매수 고려",
            Self::Neutral => "관망",
            Self::Greed => "차익 실현 고려",
            Self::ExtremeGreed => "주의 필요",
        }
    }
}

impl fmt::Display for FearGreedRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// 종목 밸류에이션 해석 입력.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValuationInput {
    pub per: Option<Decimal>,
    pub pbr: Option<Decimal>,
}

/// 종목 밸류에이션 해석 결과.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationView {
    /// 적용된 적정 PER
    pub adjusted_fair_per: Decimal,
    pub per: Option<Decimal>,
    pub per_label: Option<PerLabel>,
    pub pbr: Option<Decimal>,
    pub pbr_label: Option<PbrLabel>,
}

impl ValuationView {
    /// 조정 기준값으로 PER/PBR 해석.
    pub fn interpret(input: &ValuationInput, benchmarks: &AdjustedBenchmarks) -> Self {
        Self {
            adjusted_fair_per: benchmarks.per_fair,
            per: input.per,
            per_label: input
                .per
                .map(|per| PerLabel::classify(per, benchmarks.per_fair)),
            pbr: input.pbr,
            pbr_label: input
                .pbr
                .map(|pbr| PbrLabel::classify(pbr, benchmarks.pbr_low, benchmarks.pbr_high)),
        }
    }

    /// PER 해석 문장 (데이터 없으면 "데이터 없음").
    pub fn per_text(&self) -> String {
        match self.per_label {
            Some(label) => format!("{} (적정 PER {})", label.description(), self.adjusted_fair_per),
            None => "데이터 없음".to_string(),
        }
    }

    /// PBR 해석 문장.
    pub fn pbr_text(&self) -> String {
        self.pbr_label
            .map(|label| label.description().to_string())
            .unwrap_or_else(|| "데이터 없음".to_string())
    }
}
