//! 시장 지표 스냅샷.
//!
//! 지표 수집기는 모든 지표를 `{current, previous, change}` 형태로 반환합니다.
//! 분류기는 이 스냅샷 하나만 입력으로 받으며, 스냅샷은 생성 후 변경되지 않습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 사이클 분류에 사용되는 지표 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorKind {
    /// VIX 변동성 지수
    Vix,
    /// 미국 10년물 국채 금리 (%)
    TreasuryYield10y,
    /// S&P 500 Forward P/E
    ForwardPe,
    /// 공포탐욕 지수 (0~100)
    FearGreed,
}

impl IndicatorKind {
    /// 분류에 사용되는 모든 지표 (고정 순서).
    pub const ALL: [IndicatorKind; 4] = [
        Self::Vix,
        Self::TreasuryYield10y,
        Self::ForwardPe,
        Self::FearGreed,
    ];

    /// 값의 유효 범위 (범위를 벗어나면 경계값으로 클램핑).
    pub fn valid_range(self) -> (f64, f64) {
        match self {
            Self::Vix => (0.0, 100.0),
            Self::TreasuryYield10y => (-5.0, 25.0),
            Self::ForwardPe => (0.0, 100.0),
            Self::FearGreed => (0.0, 100.0),
        }
    }

    /// 한글 이름.
    pub fn label(self) -> &'static str {
        match self {
            Self::Vix => "VIX 변동성 지수",
            Self::TreasuryYield10y => "10년물 국채 금리",
            Self::ForwardPe => "Forward P/E",
            Self::FearGreed => "공포탐욕 지수",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Vix => "VIX",
            Self::TreasuryYield10y => "TREASURY_10Y",
            Self::ForwardPe => "FORWARD_PE",
            Self::FearGreed => "FEAR_GREED",
        };
        write!(f, "{}", s)
    }
}

/// 단일 지표 측정값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReading {
    /// 현재 값
    pub current: f64,
    /// 비교 시점 값 (전일, 1개월 전 등)
    #[serde(default)]
    pub previous: Option<f64>,
}

impl IndicatorReading {
    /// 현재 값만 있는 측정값.
    pub fn new(current: f64) -> Self {
        Self {
            current,
            previous: None,
        }
    }

    /// 비교 값이 있는 측정값.
    pub fn with_previous(current: f64, previous: f64) -> Self {
        Self {
            current,
            previous: Some(previous),
        }
    }

    /// 변화량 (current - previous).
    ///
    /// 비교 값이 없거나 둘 중 하나라도 유한하지 않으면 `None`.
    pub fn change(&self) -> Option<f64> {
        let previous = self.previous?;
        let delta = self.current - previous;
        delta.is_finite().then_some(delta)
    }

    /// 변화율 (%).
    pub fn change_pct(&self) -> Option<f64> {
        let previous = self.previous?;
        if previous == 0.0 {
            return None;
        }
        let pct = (self.current - previous) / previous * 100.0;
        pct.is_finite().then_some(pct)
    }

    /// 현재 값이 유한한 숫자인지 확인합니다.
    pub fn is_finite(&self) -> bool {
        self.current.is_finite()
    }
}

/// 분류 1회에 사용된 지표 스냅샷.
///
/// 각 지표는 수집 실패 시 `None`이 될 수 있으며, 분류기는 해당 차원만
/// 중립 기본값으로 대체합니다.
///
/// # 예시
///
/// ```rust
/// use cycle_core::{IndicatorReading, IndicatorSnapshot};
///
/// let snapshot = IndicatorSnapshot::new()
///     .with_vix(IndicatorReading::new(18.0))
///     .with_fear_greed(IndicatorReading::new(50.0));
///
/// assert_eq!(snapshot.available_count(), 2);
/// assert!(snapshot.treasury_10y.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// VIX 지수
    #[serde(default)]
    pub vix: Option<IndicatorReading>,
    /// 10년물 국채 금리 (%)
    #[serde(default)]
    pub treasury_10y: Option<IndicatorReading>,
    /// Forward P/E
    #[serde(default)]
    pub forward_pe: Option<IndicatorReading>,
    /// 공포탐욕 지수
    #[serde(default)]
    pub fear_greed: Option<IndicatorReading>,
    /// 수집 시각
    #[serde(default = "Utc::now")]
    pub captured_at: DateTime<Utc>,
}

impl IndicatorSnapshot {
    /// 빈 스냅샷 (모든 지표 없음).
    pub fn new() -> Self {
        Self {
            vix: None,
            treasury_10y: None,
            forward_pe: None,
            fear_greed: None,
            captured_at: Utc::now(),
        }
    }

    /// VIX 설정.
    pub fn with_vix(mut self, reading: IndicatorReading) -> Self {
        self.vix = Some(reading);
        self
    }

    /// 10년물 금리 설정.
    pub fn with_treasury_10y(mut self, reading: IndicatorReading) -> Self {
        self.treasury_10y = Some(reading);
        self
    }

    /// Forward P/E 설정.
    pub fn with_forward_pe(mut self, reading: IndicatorReading) -> Self {
        self.forward_pe = Some(reading);
        self
    }

    /// 공포탐욕 지수 설정.
    pub fn with_fear_greed(mut self, reading: IndicatorReading) -> Self {
        self.fear_greed = Some(reading);
        self
    }

    /// 수집 시각 설정.
    pub fn captured_at(mut self, at: DateTime<Utc>) -> Self {
        self.captured_at = at;
        self
    }

    /// 종류별 측정값 설정 (수집기에서 사용).
    pub fn with_reading(self, kind: IndicatorKind, reading: Option<IndicatorReading>) -> Self {
        let mut snapshot = self;
        match kind {
            IndicatorKind::Vix => snapshot.vix = reading,
            IndicatorKind::TreasuryYield10y => snapshot.treasury_10y = reading,
            IndicatorKind::ForwardPe => snapshot.forward_pe = reading,
            IndicatorKind::FearGreed => snapshot.fear_greed = reading,
        }
        snapshot
    }

    /// 종류별 측정값 조회.
    pub fn get(&self, kind: IndicatorKind) -> Option<&IndicatorReading> {
        match kind {
            IndicatorKind::Vix => self.vix.as_ref(),
            IndicatorKind::TreasuryYield10y => self.treasury_10y.as_ref(),
            IndicatorKind::ForwardPe => self.forward_pe.as_ref(),
            IndicatorKind::FearGreed => self.fear_greed.as_ref(),
        }
    }

    /// 값이 있는 지표 수.
    pub fn available_count(&self) -> usize {
        IndicatorKind::ALL
            .iter()
            .filter(|kind| self.get(**kind).is_some())
            .count()
    }

    /// 값이 없는 지표 목록.
    pub fn missing(&self) -> Vec<IndicatorKind> {
        IndicatorKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_none())
            .collect()
    }
}

impl Default for IndicatorSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
