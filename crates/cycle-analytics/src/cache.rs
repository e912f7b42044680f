//! 분류 결과 캐시.
//!
//! 마지막 분류 결과를 `Arc`로 보관하고 교체 시 통째로 바꿉니다.
//! 읽는 쪽은 항상 완전한 이전 결과 또는 완전한 새 결과만 보게 됩니다.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use cycle_core::CycleAssessment;

/// 유효 시간이 있는 단일 분류 결과 캐시.
#[derive(Debug)]
pub struct AssessmentCache {
    entry: RwLock<Option<Arc<CycleAssessment>>>,
    max_age: Duration,
}

impl AssessmentCache {
    pub fn new(max_age: Duration) -> Self {
        Self {
            entry: RwLock::new(None),
            max_age,
        }
    }

    /// 초 단위 유효 시간으로 생성합니다.
    pub fn with_max_age_secs(secs: u64) -> Self {
        let secs = i64::try_from(secs).unwrap_or(i64::MAX);
        Self::new(Duration::try_seconds(secs).unwrap_or(Duration::MAX))
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// 유효한 캐시 결과를 반환합니다. 만료되었거나 비어 있으면 `None`.
    pub async fn get(&self) -> Option<Arc<CycleAssessment>> {
        self.get_at(Utc::now()).await
    }

    /// 기준 시각에서 유효한 캐시 결과를 반환합니다.
    pub async fn get_at(&self, now: DateTime<Utc>) -> Option<Arc<CycleAssessment>> {
        let guard = self.entry.read().await;
        match guard.as_ref() {
            Some(assessment) if !assessment.is_stale_at(now, self.max_age) => {
                Some(Arc::clone(assessment))
            }
            Some(assessment) => {
                debug!(
                    age_secs = assessment.age_at(now).num_seconds(),
                    "캐시된 분류 결과 만료"
                );
                None
            }
            None => None,
        }
    }

    /// 만료 여부와 관계없이 마지막 결과를 반환합니다.
    pub async fn peek(&self) -> Option<Arc<CycleAssessment>> {
        self.entry.read().await.clone()
    }

    /// 새 결과로 교체하고 공유 핸들을 반환합니다.
    pub async fn store(&self, assessment: CycleAssessment) -> Arc<CycleAssessment> {
        let assessment = Arc::new(assessment);
        *self.entry.write().await = Some(Arc::clone(&assessment));
        assessment
    }

    /// 캐시를 비웁니다.
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
        debug!("분류 결과 캐시 무효화");
    }
}

impl Default for AssessmentCache {
    fn default() -> Self {
        Self::with_max_age_secs(3600)
    }
}
