//! 지표 소스 추상화.
//!
//! 실제 시세 조회(HTTP 등)는 이 크레이트 밖에서 [`IndicatorSource`]를 구현해 주입합니다.
//! 조회 실패는 복구 가능한 에러로 취급되어 해당 지표가 비어 있는 스냅샷이 되고,
//! 분류기가 중립 기본값으로 처리합니다.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

use cycle_core::{CycleError, CycleResult, IndicatorKind, IndicatorReading, IndicatorSnapshot};

/// 지표 소스 트레잇.
#[async_trait]
pub trait IndicatorSource: Send + Sync {
    /// 소스 이름 (로그용).
    fn name(&self) -> &str;

    /// 단일 지표 조회.
    async fn fetch(&self, kind: IndicatorKind) -> CycleResult<IndicatorReading>;
}

/// 고정된 스냅샷을 반환하는 소스.
///
/// CLI의 플래그/파일 입력과 테스트에서 사용합니다.
#[derive(Debug, Clone, Default)]
pub struct StaticIndicatorSource {
    snapshot: IndicatorSnapshot,
}

impl StaticIndicatorSource {
    pub fn new(snapshot: IndicatorSnapshot) -> Self {
        Self { snapshot }
    }

    /// JSON 스냅샷 파일에서 생성합니다.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> CycleResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let snapshot: IndicatorSnapshot = serde_json::from_str(&content)?;
        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &IndicatorSnapshot {
        &self.snapshot
    }
}

#[async_trait]
impl IndicatorSource for StaticIndicatorSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, kind: IndicatorKind) -> CycleResult<IndicatorReading> {
        self.snapshot
            .get(kind)
            .copied()
            .ok_or_else(|| CycleError::fetch_failed(kind, "값 없음"))
    }
}

/// 우선순위 순서로 소스를 시도하는 대체 소스.
///
/// 지표별로 첫 번째 성공한 소스의 값을 사용합니다.
pub struct FallbackSource {
    sources: Vec<Arc<dyn IndicatorSource>>,
}

impl FallbackSource {
    pub fn new(sources: Vec<Arc<dyn IndicatorSource>>) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl IndicatorSource for FallbackSource {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn fetch(&self, kind: IndicatorKind) -> CycleResult<IndicatorReading> {
        let mut last_error = None;
        for source in &self.sources {
            match source.fetch(kind).await {
                Ok(reading) => return Ok(reading),
                Err(e) => {
                    debug!(source = source.name(), indicator = %kind, error = %e, "대체 소스로 전환");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| CycleError::fetch_failed(kind, "등록된 소스 없음")))
    }
}

/// 4개 지표를 동시에 조회해 스냅샷을 만듭니다.
///
/// 개별 조회 실패는 경고 로그를 남기고 해당 지표를 비워 둡니다.
pub async fn collect_snapshot(source: &dyn IndicatorSource) -> IndicatorSnapshot {
    let (vix, treasury, pe, fear_greed) = tokio::join!(
        source.fetch(IndicatorKind::Vix),
        source.fetch(IndicatorKind::TreasuryYield10y),
        source.fetch(IndicatorKind::ForwardPe),
        source.fetch(IndicatorKind::FearGreed),
    );

    let snapshot = IndicatorSnapshot::new()
        .with_reading(IndicatorKind::Vix, settle(source, IndicatorKind::Vix, vix))
        .with_reading(
            IndicatorKind::TreasuryYield10y,
            settle(source, IndicatorKind::TreasuryYield10y, treasury),
        )
        .with_reading(IndicatorKind::ForwardPe, settle(source, IndicatorKind::ForwardPe, pe))
        .with_reading(
            IndicatorKind::FearGreed,
            settle(source, IndicatorKind::FearGreed, fear_greed),
        )
        .captured_at(Utc::now());

    debug!(
        source = source.name(),
        available = snapshot.available_count(),
        "지표 스냅샷 수집 완료"
    );
    snapshot
}

fn settle(
    source: &dyn IndicatorSource,
    kind: IndicatorKind,
    result: CycleResult<IndicatorReading>,
) -> Option<IndicatorReading> {
    match result {
        Ok(reading) => Some(reading),
        Err(e) => {
            warn!(source = source.name(), indicator = %kind, error = %e, "지표 조회 실패, 중립 기본값 사용");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    #[async_trait]
    impl IndicatorSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch(&self, kind: IndicatorKind) -> CycleResult<IndicatorReading> {
            Err(CycleError::fetch_failed(kind, "timeout"))
        }
    }

    #[tokio::test]
    async fn test_static_source_missing_indicator() {
        let source = StaticIndicatorSource::new(
            IndicatorSnapshot::new().with_vix(IndicatorReading::new(18.0)),
        );
        assert_eq!(source.fetch(IndicatorKind::Vix).await.unwrap().current, 18.0);

        let err = source.fetch(IndicatorKind::FearGreed).await.unwrap_err();
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_collect_snapshot_tolerates_failures() {
        let snapshot = collect_snapshot(&FailingSource).await;
        assert_eq!(snapshot.available_count(), 0);
        assert_eq!(snapshot.missing().len(), 4);
    }

    #[tokio::test]
    async fn test_fallback_uses_first_success() {
        let secondary = StaticIndicatorSource::new(
            IndicatorSnapshot::new().with_fear_greed(IndicatorReading::new(40.0)),
        );
        let sources: Vec<Arc<dyn IndicatorSource>> =
            vec![Arc::new(FailingSource), Arc::new(secondary)];
        let source = FallbackSource::new(sources);

        let snapshot = collect_snapshot(&source).await;
        assert_eq!(snapshot.fear_greed.map(|r| r.current), Some(40.0));
        assert!(snapshot.vix.is_none());
    }

    #[tokio::test]
    async fn test_empty_fallback_errors() {
        let source = FallbackSource::new(Vec::new());
        assert!(source.fetch(IndicatorKind::Vix).await.is_err());
    }
}
