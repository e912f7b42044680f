//! CyclePhase - 경제 사이클 단계.
//!
//! 거시 경제 상태를 5단계로 분류합니다. 단계 간에 대소 관계는 없으며,
//! 관례적으로 회복 → 확장 → 과열 → 수축 → 침체 순으로 순환합니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 경제 사이클 단계.
///
/// # 상태 설명
///
/// - **Recovery**: 저점 통과 후 회복 (금리 낮음, 실업률 감소 시작)
/// - **Expansion**: 확장 (기업 실적 개선, 고용 증가)
/// - **Overheating**: 과열 (인플레이션 상승, 금리 인상)
/// - **Contraction**: 수축 (기업 실적 악화, 신용 경색)
/// - **Recession**: 침체 저점 (금리 인하, 경기 부양책)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CyclePhase {
    /// 회복기
    Recovery,
    /// 확장기
    #[default]
    Expansion,
    /// 과열기
    Overheating,
    /// 수축기
    Contraction,
    /// 침체기
    Recession,
}

/// 단계별 권장 자산 배분 (%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAllocation {
    /// 주식
    pub stocks: u8,
    /// 채권
    pub bonds: u8,
    /// 현금
    pub cash: u8,
    /// 원자재
    pub commodities: u8,
}

impl AssetAllocation {
    /// 비중 합계.
    pub fn total(&self) -> u16 {
        self.stocks as u16 + self.bonds as u16 + self.cash as u16 + self.commodities as u16
    }
}

impl CyclePhase {
    /// 모든 단계 (순환 순서).
    pub const ALL: [CyclePhase; 5] = [
        Self::Recovery,
        Self::Expansion,
        Self::Overheating,
        Self::Contraction,
        Self::Recession,
    ];

    /// 관례상 다음 단계.
    pub fn next(self) -> Self {
        match self {
            Self::Recovery => Self::Expansion,
            Self::Expansion => Self::Overheating,
            Self::Overheating => Self::Contraction,
            Self::Contraction => Self::Recession,
            Self::Recession => Self::Recovery,
        }
    }

    /// 한글 단계명.
    pub fn label(self) -> &'static str {
        match self {
            Self::Recovery => "회복기",
            Self::Expansion => "확장기",
            Self::Overheating => "과열기",
            Self::Contraction => "수축기",
            Self::Recession => "침체기",
        }
    }

    /// 단계 설명.
    pub fn description(self) -> &'static str {
        match self {
            Self::Recovery => "경기 저점 통과 후 회복 단계. 금리 낮음, 실업률 감소 시작",
            Self::Expansion => "경기 확장 단계. 기업 실적 개선, 고용 증가",
            Self::Overheating => "경기 과열 단계. 인플레이션 상승, 금리 인상",
            Self::Contraction => "경기 수축 단계. 기업 실적 악화, 신용 경색",
            Self::Recession => "경기 침체 저점. 금리 인하, 경기 부양책",
        }
    }

    /// 추천 섹터.
    pub fn recommended_sectors(self) -> &'static [&'static str] {
        match self {
            Self::Recovery => &["금융", "부동산", "소비재", "산업재"],
            Self::Expansion => &["기술", "소비재", "산업재", "헬스케어"],
            Self::Overheating => &["에너지", "소재", "유틸리티"],
            Self::Contraction => &["유틸리티", "헬스케어", "필수소비재"],
            Self::Recession => &["필수소비재", "유틸리티", "헬스케어"],
        }
    }

    /// 권장 자산 배분.
    pub fn asset_allocation(self) -> AssetAllocation {
        let (stocks, bonds, cash, commodities) = match self {
            Self::Recovery => (60, 30, 5, 5),
            Self::Expansion => (70, 20, 5, 5),
            Self::Overheating => (50, 25, 15, 10),
            Self::Contraction => (30, 40, 25, 5),
            Self::Recession => (40, 35, 20, 5),
        };
        AssetAllocation {
            stocks,
            bonds,
            cash,
            commodities,
        }
    }

    /// 위험 수준 설명.
    pub fn risk_level(self) -> &'static str {
        match self {
            Self::Recovery => "중간 (기회 우위)",
            Self::Expansion => "낮음-중간",
            Self::Overheating => "높음",
            Self::Contraction => "매우 높음",
            Self::Recession => "높음 (기회와 위험 공존)",
        }
    }

    /// 방어적 포지셔닝이 필요한 단계인지 확인.
    pub fn is_defensive(self) -> bool {
        matches!(self, Self::Overheating | Self::Contraction | Self::Recession)
    }

    /// 아이콘 (UI용).
    pub fn icon(self) -> &'static str {
        match self {
            Self::Recovery => "🌱",
            Self::Expansion => "📈",
            Self::Overheating => "🔥",
            Self::Contraction => "📉",
            Self::Recession => "🧊",
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Recovery => "RECOVERY",
            Self::Expansion => "EXPANSION",
            Self::Overheating => "OVERHEATING",
            Self::Contraction => "CONTRACTION",
            Self::Recession => "RECESSION",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for CyclePhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RECOVERY" | "회복기" => Ok(Self::Recovery),
            "EXPANSION" | "확장기" => Ok(Self::Expansion),
            "OVERHEATING" | "PEAK" | "과열기" => Ok(Self::Overheating),
            "CONTRACTION" | "수축기" => Ok(Self::Contraction),
            "RECESSION" | "TROUGH" | "침체기" => Ok(Self::Recession),
            _ => Err(format!("Unknown cycle phase: {}", s)),
        }
    }
}
