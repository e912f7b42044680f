//! 설정 관리.
//!
//! 분류기 가중치, 단계 구간 경계, 밸류에이션 기준값을 정의합니다.
//! 모든 테이블은 시작 시 [`AppConfig::validate`]로 한 번 검증되며,
//! 검증에 실패하면 분류를 시도하기 전에 종료해야 합니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::{IndicatorKind, ValuationBenchmarks};
use crate::error::{CycleError, CycleResult};

/// 가중치 합계 허용 오차.
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 사이클 분류 설정
    #[serde(default)]
    pub cycle: CycleConfig,
    /// 기본 밸류에이션 기준값
    #[serde(default)]
    pub valuation: ValuationBenchmarks,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 사이클 분류 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CycleConfig {
    /// 차원별 가중치
    #[serde(default)]
    pub weights: CycleWeights,
    /// 단계 구간 경계
    #[serde(default)]
    pub breakpoints: PhaseBreakpoints,
    /// Forward P/E 역사적 평균
    #[serde(default = "default_pe_historical_avg")]
    pub pe_historical_avg: f64,
    /// 분류 결과 캐시 유효 시간 (초)
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age_secs: u64,
}

fn default_pe_historical_avg() -> f64 {
    17.0
}
fn default_cache_max_age() -> u64 {
    3600
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            weights: CycleWeights::default(),
            breakpoints: PhaseBreakpoints::default(),
            pe_historical_avg: default_pe_historical_avg(),
            cache_max_age_secs: default_cache_max_age(),
        }
    }
}

impl CycleConfig {
    /// 분류 설정 검증.
    pub fn validate(&self) -> CycleResult<()> {
        self.weights.validate()?;
        self.breakpoints.validate()?;

        if !self.pe_historical_avg.is_finite() || self.pe_historical_avg <= 0.0 {
            return Err(CycleError::config(
                "pe_historical_avg",
                format!("양수여야 합니다 (현재 {})", self.pe_historical_avg),
            ));
        }
        if self.cache_max_age_secs == 0 {
            return Err(CycleError::config(
                "cache_max_age_secs",
                "0보다 커야 합니다",
            ));
        }
        Ok(())
    }
}

/// 차원별 가중치 테이블.
///
/// 모든 가중치는 0 이상의 유한한 값이고 합계가 1.0(± [`WEIGHT_EPSILON`])이어야 합니다.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CycleWeights {
    pub vix: f64,
    pub treasury_yield: f64,
    pub forward_pe: f64,
    pub fear_greed: f64,
}

impl Default for CycleWeights {
    fn default() -> Self {
        Self {
            vix: 0.30,
            treasury_yield: 0.20,
            forward_pe: 0.25,
            fear_greed: 0.25,
        }
    }
}

impl CycleWeights {
    /// 지표별 가중치.
    pub fn weight(&self, kind: IndicatorKind) -> f64 {
        match kind {
            IndicatorKind::Vix => self.vix,
            IndicatorKind::TreasuryYield10y => self.treasury_yield,
            IndicatorKind::ForwardPe => self.forward_pe,
            IndicatorKind::FearGreed => self.fear_greed,
        }
    }

    /// 가중치 합계.
    pub fn sum(&self) -> f64 {
        IndicatorKind::ALL.iter().map(|k| self.weight(*k)).sum()
    }

    /// 가중치 테이블 검증.
    pub fn validate(&self) -> CycleResult<()> {
        const TABLE: &str = "cycle_weights";

        for kind in IndicatorKind::ALL {
            let w = self.weight(kind);
            if !w.is_finite() || w < 0.0 {
                return Err(CycleError::config(
                    TABLE,
                    format!("{} 가중치는 0 이상의 유한한 값이어야 합니다 (현재 {})", kind, w),
                ));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(CycleError::config(
                TABLE,
                format!("가중치 합계는 1.0이어야 합니다 (현재 {:.4})", sum),
            ));
        }
        Ok(())
    }
}

/// 종합 점수 → 단계 구간 경계.
///
/// `recession < contraction < upper` 순서이며 모두 [-1, 1] 안에 있어야 합니다.
/// 경계값과 정확히 같은 점수는 중앙에 가까운 단계로 판정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PhaseBreakpoints {
    /// 이 값 미만이면 침체기
    pub recession: f64,
    /// 이 값 미만이면 수축기
    pub contraction: f64,
    /// 이 값 초과이면 회복기 또는 과열기
    pub upper: f64,
}

impl Default for PhaseBreakpoints {
    fn default() -> Self {
        Self {
            recession: -0.60,
            contraction: -0.20,
            upper: 0.35,
        }
    }
}

impl PhaseBreakpoints {
    /// 구간 경계 검증.
    pub fn validate(&self) -> CycleResult<()> {
        const TABLE: &str = "phase_breakpoints";

        let values = [self.recession, self.contraction, self.upper];
        if values.iter().any(|v| !v.is_finite() || *v < -1.0 || *v > 1.0) {
            return Err(CycleError::config(
                TABLE,
                format!("경계값은 [-1, 1] 범위여야 합니다 (현재 {:?})", values),
            ));
        }
        if !(self.recession < self.contraction && self.contraction < self.upper) {
            return Err(CycleError::config(
                TABLE,
                format!(
                    "recession {} < contraction {} < upper {} 순서여야 합니다",
                    self.recession, self.contraction, self.upper
                ),
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값을 사용하고, `CYCLE__` 접두사 환경 변수로 오버라이드합니다.
    /// (예: `CYCLE__CYCLE__WEIGHTS__VIX=0.4`)
    pub fn load<P: AsRef<Path>>(path: P) -> CycleResult<Self> {
        let builder = config::Config::builder()
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("CYCLE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> CycleResult<Self> {
        Self::load("config/default.toml")
    }

    /// 전체 설정 검증.
    pub fn validate(&self) -> CycleResult<()> {
        self.cycle.validate()?;
        self.valuation.validate()?;
        Ok(())
    }
}
