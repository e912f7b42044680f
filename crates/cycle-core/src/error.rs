//! 경제 사이클 분석 시스템의 에러 타입.
//!
//! 분류기는 정상적인 시장 데이터에 대해 절대 실패하지 않습니다.
//! 사용자에게 노출되는 실패는 시작 시점의 설정 검증 에러뿐입니다.

use thiserror::Error;

/// 경제 사이클 분석 에러.
#[derive(Debug, Error)]
pub enum CycleError {
    /// 설정 테이블 검증 실패 (가중치, 구간 경계, 밸류에이션 기준값)
    #[error("설정 에러 [{table}]: {reason}")]
    Config {
        /// 검증에 실패한 테이블 이름
        table: &'static str,
        /// 실패 사유
        reason: String,
    },

    /// 지표 소스 조회 실패
    #[error("지표 소스 에러 [{indicator}]: {reason}")]
    Source {
        /// 지표 이름
        indicator: String,
        /// 실패 사유
        reason: String,
    },

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),
}

/// 경제 사이클 작업을 위한 Result 타입.
pub type CycleResult<T> = Result<T, CycleError>;

impl CycleError {
    /// 설정 에러 생성 헬퍼.
    pub fn config(table: &'static str, reason: impl Into<String>) -> Self {
        CycleError::Config {
            table,
            reason: reason.into(),
        }
    }

    /// 소스 에러 생성 헬퍼.
    pub fn fetch_failed(indicator: impl ToString, reason: impl Into<String>) -> Self {
        CycleError::Source {
            indicator: indicator.to_string(),
            reason: reason.into(),
        }
    }

    /// 시작을 중단해야 하는 치명적 에러인지 확인합니다.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CycleError::Config { .. })
    }

    /// 기본값으로 대체해 복구 가능한 에러인지 확인합니다.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CycleError::Source { .. })
    }
}

impl From<serde_json::Error> for CycleError {
    fn from(err: serde_json::Error) -> Self {
        CycleError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for CycleError {
    fn from(err: std::io::Error) -> Self {
        CycleError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for CycleError {
    fn from(err: config::ConfigError) -> Self {
        CycleError::config("app_config", err.to_string())
    }
}
