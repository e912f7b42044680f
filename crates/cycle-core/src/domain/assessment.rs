//! CycleAssessment - 경제 사이클 분류 결과.
//!
//! 분류 결과는 생성 후 절대 수정되지 않습니다. 새로 고침은 새 값을 만듭니다.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::cycle_phase::CyclePhase;
use super::indicator::{IndicatorKind, IndicatorSnapshot};
use super::threshold::{adjust, ThresholdAdjustment};

/// 차원별 점수.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    /// 지표 종류
    pub indicator: IndicatorKind,
    /// 정규화 점수 (-1.0 수축 성향 ~ +1.0 확장/과열 성향)
    pub score: f64,
    /// 가중치
    pub weight: f64,
    /// 데이터 부재로 중립 기본값이 적용되었는지 여부
    pub defaulted: bool,
}

impl DimensionScore {
    /// 가중 기여도.
    pub fn contribution(&self) -> f64 {
        self.score * self.weight
    }
}

/// 경제 사이클 분류 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleAssessment {
    /// 판정 단계
    pub phase: CyclePhase,
    /// 종합 점수 (-1.0 ~ 1.0)
    pub score: f64,
    /// 판단 신뢰도 (0.0 ~ 1.0)
    pub confidence: f64,
    /// 차원별 점수
    pub dimensions: Vec<DimensionScore>,
    /// 판단 근거 (순서 유지)
    pub rationale: Vec<String>,
    /// 입력 스냅샷
    pub snapshot: IndicatorSnapshot,
    /// 계산 시각
    pub computed_at: DateTime<Utc>,
}

impl CycleAssessment {
    /// 단계별 기준값 조정 계수.
    pub fn threshold_adjustment(&self) -> ThresholdAdjustment {
        adjust(self.phase)
    }

    /// 기본값이 적용된 차원 목록.
    pub fn defaulted_dimensions(&self) -> Vec<IndicatorKind> {
        self.dimensions
            .iter()
            .filter(|d| d.defaulted)
            .map(|d| d.indicator)
            .collect()
    }

    /// 지표별 점수 조회.
    pub fn dimension(&self, kind: IndicatorKind) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|d| d.indicator == kind)
    }

    /// 계산 후 경과 시간.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.computed_at
    }

    /// `max_age` 기준 만료 여부.
    pub fn is_stale_at(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.age_at(now) >= max_age
    }

    /// 요약 문자열 생성 (로그/CLI용).
    ///
    /// # 예시
    ///
    /// ```text
    /// 경제 사이클: 과열기 🔥 (OVERHEATING)
    /// 종합 점수: +0.80 / 신뢰도: 85.0%
    /// 추천 섹터: 에너지, 소재, 유틸리티
    /// 기준값 조정: 과열기 단계에서는 PER 기준 1.10배, VIX 허용 범위 0.8배(-4.0pt) 적용
    /// ```
    pub fn summary(&self) -> String {
        format!(
            "경제 사이클: {} {} ({})\n종합 점수: {:+.2} / 신뢰도: {:.1}%\n추천 섹터: {}\n기준값 조정: {}",
            self.phase.label(),
            self.phase.icon(),
            self.phase,
            self.score,
            self.confidence * 100.0,
            self.phase.recommended_sectors().join(", "),
            self.threshold_adjustment().rationale()
        )
    }
}
