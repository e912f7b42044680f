//! 단계별 시장 전망.
//!
//! [`MarketOutlook::for_phase`]는 단계만으로 결정되는 고정 조회 테이블입니다.

use serde::Serialize;

use super::cycle_phase::CyclePhase;

/// 단계별 시장 전망.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarketOutlook {
    pub phase: CyclePhase,
    /// 거시 경제 관점
    pub macro_view: &'static str,
    /// 단기 전망 (1~3개월)
    pub short_term: &'static str,
    /// 중기 전망 (3~12개월)
    pub medium_term: &'static str,
    /// 장기 전망
    pub long_term: &'static str,
    pub risk_factors: &'static [&'static str],
    pub opportunity_factors: &'static [&'static str],
    /// 확인할 핵심 지표
    pub key_indicators: &'static [&'static str],
    /// 투자 전략
    pub strategy: &'static str,
    pub risk_level: &'static str,
    /// 전망 확신도
    pub conviction: &'static str,
}

impl MarketOutlook {
    /// 단계별 시장 전망 조회.
    pub fn for_phase(phase: CyclePhase) -> Self {
        let risk_level = phase.risk_level();
        match phase {
            CyclePhase::Recovery => Self {
                phase,
                macro_view: "경기 저점을 지나 초기 회복 국면에 진입했습니다. 완화적 통화정책이 유지되고 \
                             신용 스프레드가 좁아지면서 위험자산 선호가 점차 살아나고 있으며, \
                             실적 바닥 확인 후 어닝 서프라이즈 가능성이 커지는 시기입니다.",
                short_term: "긍정적 - 저점 확인 후 반등 모멘텀 형성",
                medium_term: "강세 전환 - 펀더멘털 개선과 함께 상승 사이클 초입",
                long_term: "새로운 강세장 시작 가능성, 조기 진입 시 높은 기대 수익",
                risk_factors: &["경기 회복 지연", "더블딥", "통화정책 전환 시점"],
                opportunity_factors: &["저평가 우량주", "경기민감주 반등", "금융주 실적 개선"],
                key_indicators: &["ISM 제조업 PMI 반등", "신규 실업수당 청구 감소", "소비자 신뢰지수"],
                strategy: "위험자산 비중을 단계적으로 늘립니다. 금융, 산업재, 소비재 비중을 \
                           분할 매수로 확대하고 채권 듀레이션 축소를 검토합니다.",
                risk_level,
                conviction: "높음",
            },
            CyclePhase::Expansion => Self {
                phase,
                macro_view: "경기 확장이 이어지고 있습니다. 기업 실적 개선과 견조한 고용이 유지되며, \
                             중앙은행은 정상화 경로를 모색하지만 아직 긴축적이지 않습니다.",
                short_term: "긍정적 - 상승 추세 지속, 신고가 경신 가능",
                medium_term: "강세 지속 - 실적 성장이 밸류에이션 부담을 상쇄",
                long_term: "확장 후반 진입 시 조정 가능성 대비",
                risk_factors: &["밸류에이션 부담 누적", "금리 인상 우려", "지정학적 리스크"],
                opportunity_factors: &["실적 모멘텀 지속", "M&A 활성화", "IPO 시장 호황"],
                key_indicators: &["기업 이익 성장률", "설비투자 증가", "CEO 신뢰지수"],
                strategy: "위험자산 비중을 유지하거나 늘립니다. 이익 성장률이 높은 기술주와 \
                           경기소비재 중심으로 구성하되 과열 신호를 보며 차익 실현 시점을 잡습니다.",
                risk_level,
                conviction: "매우 높음",
            },
            CyclePhase::Overheating => Self {
                phase,
                macro_view: "경기 사이클 후반부입니다. 인플레이션 압력과 긴축 기조가 강해지고 \
                             임금 상승이 기업 마진을 압박하며, 금리 상승으로 밸류에이션 하향 압력이 있습니다.",
                short_term: "중립~부정적 - 상승 탄력 둔화, 변동성 확대",
                medium_term: "조정 가능성 상승 - 실적 피크아웃 우려",
                long_term: "사이클 전환점 접근, 방어적 포지셔닝 필요",
                risk_factors: &["인플레이션 고착화", "금리 급등", "신용 사이클 전환", "마진 압축"],
                opportunity_factors: &["인플레이션 수혜 섹터", "필수재 기업", "배당주"],
                key_indicators: &["근원 CPI 추이", "임금 상승률", "회사채 스프레드"],
                strategy: "성장주에서 가치주로 옮기고 에너지, 소재, 유틸리티 비중을 늘립니다. \
                           현금 비중을 10~15%로 높이고 차익 실현을 적극 검토합니다.",
                risk_level,
                conviction: "높음",
            },
            CyclePhase::Contraction => Self {
                phase,
                macro_view: "경기 수축이 확인되었습니다. 지표 악화가 광범위하고 실적 하향 조정이 \
                             본격화되었으며, 신용 경색 우려 속에 변동성이 높은 상태입니다.",
                short_term: "부정적 - 추가 하락과 변동성 확대",
                medium_term: "관망 - 저점 확인 전까지 방어적 스탠스 유지",
                long_term: "저점 근접 시 장기 투자 기회",
                risk_factors: &["실적 하향 사이클", "신용 경색", "유동성 위기", "시스템 리스크"],
                opportunity_factors: &["방어주 상대 강세", "채권 가격 상승", "안전자산 수요"],
                key_indicators: &["실업률 추이", "ISM PMI", "소비자 지출", "회사채 스프레드"],
                strategy: "현금과 채권 비중을 늘립니다. 주식은 유틸리티, 헬스케어, 필수소비재로 \
                           압축하고 레버리지 축소와 유동성 확보를 우선합니다.",
                risk_level,
                conviction: "높음",
            },
            CyclePhase::Recession => Self {
                phase,
                macro_view: "침체 저점 국면입니다. 지표는 최악 수준이나 악화 속도가 둔화되고 있고, \
                             통화 완화와 재정 부양이 시행 중이며 시장이 실물보다 먼저 바닥을 만들 수 있습니다.",
                short_term: "변동성 극대화 - 저점 테스트 후 기술적 반등 시도",
                medium_term: "역발상 매수 기회 - 장기 투자자에게 유리한 진입점",
                long_term: "새로운 사이클 시작점, 비중 확대 검토",
                risk_factors: &["침체 장기화", "디플레이션", "정책 실패", "2차 충격"],
                opportunity_factors: &["극단적 저평가 종목", "구조조정 완료 기업", "정책 수혜주"],
                key_indicators: &["선행지표 반등", "신용 스프레드 축소", "주가 바닥 패턴"],
                strategy: "우량 대형주와 배당주 중심으로 3~6개월에 걸쳐 분할 매수를 시작합니다. \
                           저평가 경기민감주는 변동성을 감수할 수 있을 때만 편입합니다.",
                risk_level,
                conviction: "중간-높음",
            },
        }
    }
}

impl CyclePhase {
    /// 단계별 시장 전망.
    pub fn market_outlook(self) -> MarketOutlook {
        MarketOutlook::for_phase(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_phase_has_outlook() {
        for phase in CyclePhase::ALL {
            let outlook = phase.market_outlook();
            assert_eq!(outlook.phase, phase);
            assert_eq!(outlook.risk_level, phase.risk_level());
            assert!(!outlook.macro_view.is_empty());
            assert!(!outlook.strategy.is_empty());
            assert!(outlook.risk_factors.len() >= 3, "{}", phase);
            assert!(outlook.opportunity_factors.len() >= 3, "{}", phase);
            assert!(!outlook.key_indicators.is_empty());
        }
    }

    #[test]
    fn test_defensive_outlooks() {
        let contraction = MarketOutlook::for_phase(CyclePhase::Contraction);
        assert!(contraction.strategy.contains("현금"));
        assert!(contraction.risk_factors.contains(&"신용 경색"));

        let expansion = MarketOutlook::for_phase(CyclePhase::Expansion);
        assert_eq!(expansion.conviction, "매우 높음");
    }

    #[test]
    fn test_outlook_serializes_with_phase_tag() {
        let value = serde_json::to_value(CyclePhase::Recession.market_outlook()).unwrap();
        assert_eq!(value["phase"], "RECESSION");
        assert_eq!(value["conviction"], "중간-높음");
        assert!(value["risk_factors"].is_array());
    }
}
