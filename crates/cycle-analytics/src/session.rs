//! 경제 사이클 분석 세션.
//!
//! 지표 수집 → 분류 → 캐시 → 기준값 조정까지의 흐름을 묶습니다.
//! 한 번의 분류 결과에서 나온 [`CycleContext`]를 하위 분석(밸류에이션 해석 등)에
//! 그대로 전달하여, 같은 요청 안에서는 모두 같은 조정값을 쓰도록 합니다.

use std::sync::Arc;

use tracing::{info, Instrument};

use cycle_core::{
    cycle_span, AdjustedBenchmarks, AppConfig, CycleAssessment, CycleResult, FearGreedRating,
    ThresholdAdjustment, ValuationBenchmarks, ValuationInput, ValuationView, VixLevel,
};
use rust_decimal::Decimal;

use crate::cache::AssessmentCache;
use crate::classifier::CycleClassifier;
use crate::source::{collect_snapshot, IndicatorSource};

/// 한 번의 분류 결과와 그에 따른 조정 기준값.
#[derive(Debug, Clone)]
pub struct CycleContext {
    pub assessment: Arc<CycleAssessment>,
    pub adjustment: ThresholdAdjustment,
    pub benchmarks: AdjustedBenchmarks,
}

impl CycleContext {
    /// 분류 결과에 기준값 조정을 적용합니다.
    pub fn new(assessment: Arc<CycleAssessment>, base: &ValuationBenchmarks) -> Self {
        let adjustment = assessment.threshold_adjustment();
        let benchmarks = adjustment.apply(base);
        Self {
            assessment,
            adjustment,
            benchmarks,
        }
    }

    /// 종목 PER/PBR 해석.
    pub fn interpret(&self, input: &ValuationInput) -> ValuationView {
        ValuationView::interpret(input, &self.benchmarks)
    }

    /// 조정된 VIX 허용 범위로 VIX 수준 판정.
    pub fn vix_level(&self, vix: Decimal) -> VixLevel {
        VixLevel::classify(vix, self.benchmarks.vix_normal, self.benchmarks.vix_elevated)
    }

    /// 조정된 공포탐욕 중립값 기준 등급.
    pub fn fear_greed_rating(&self, value: f64) -> FearGreedRating {
        FearGreedRating::relative_to(value, self.benchmarks.fear_greed_neutral)
    }
}

/// 경제 사이클 분석 세션.
pub struct CycleSession {
    id: String,
    classifier: CycleClassifier,
    source: Arc<dyn IndicatorSource>,
    cache: AssessmentCache,
    base_benchmarks: ValuationBenchmarks,
}

impl CycleSession {
    /// 설정을 검증하고 세션을 생성합니다.
    pub fn new(
        id: impl Into<String>,
        config: &AppConfig,
        source: Arc<dyn IndicatorSource>,
    ) -> CycleResult<Self> {
        config.validate()?;
        let classifier = CycleClassifier::new(config.cycle.clone())?;

        Ok(Self {
            id: id.into(),
            classifier,
            source,
            cache: AssessmentCache::with_max_age_secs(config.cycle.cache_max_age_secs),
            base_benchmarks: config.valuation.clone(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn classifier(&self) -> &CycleClassifier {
        &self.classifier
    }

    pub fn cache(&self) -> &AssessmentCache {
        &self.cache
    }

    /// 현재 경제 사이클 분류 결과.
    ///
    /// 캐시가 유효하고 `refresh`가 아니면 캐시를 반환하고,
    /// 그렇지 않으면 지표를 다시 수집해 분류한 뒤 캐시를 교체합니다.
    pub async fn current_assessment(&self, refresh: bool) -> Arc<CycleAssessment> {
        let span = cycle_span!("cycle_assessment", self.id, refresh);
        async {
            if !refresh {
                if let Some(cached) = self.cache.get().await {
                    return cached;
                }
            }

            let snapshot = collect_snapshot(self.source.as_ref()).await;
            let assessment = self.classifier.classify(&snapshot);

            info!(
                phase = %assessment.phase,
                score = assessment.score,
                confidence = assessment.confidence,
                missing = snapshot.missing().len(),
                "경제 사이클 판단 갱신"
            );

            self.cache.store(assessment).await
        }
        .instrument(span)
        .await
    }

    /// 현재 분류 결과와 조정 기준값.
    pub async fn context(&self, refresh: bool) -> CycleContext {
        let assessment = self.current_assessment(refresh).await;
        CycleContext::new(assessment, &self.base_benchmarks)
    }

    /// 캐시 무효화.
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }
}
