//! 경제 사이클 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 4개 시장 지표 기반 경제 사이클 분류기
//! - 분류 결과 캐시 (유효 시간, 강제 갱신, 무효화)
//! - 지표 소스 추상화 및 동시 수집
//! - 분류 → 기준값 조정 → 밸류에이션 해석을 잇는 분석 세션

pub mod cache;
pub mod classifier;
pub mod session;
pub mod source;

pub use cache::AssessmentCache;
pub use classifier::{
    fear_greed_score, forward_pe_score, vix_score, yield_trend_score, CycleClassifier,
};
pub use session::{CycleContext, CycleSession};
pub use source::{collect_snapshot, FallbackSource, IndicatorSource, StaticIndicatorSource};
