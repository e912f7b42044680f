//! 경제 사이클을 반영한 종목 밸류에이션 해석.

use anyhow::Result;
use cycle_core::{
    AppConfig, CyclePhase, FearGreedRating, ValuationInput, ValuationView, VixLevel,
};
use rust_decimal::Decimal;
use serde::Serialize;

use super::classify::classify_context;
use super::input::{OutputFormat, SnapshotInput};

/// 밸류에이션 명령 설정.
#[derive(Debug, Clone, Default)]
pub struct ValuationConfig {
    pub input: SnapshotInput,
    pub per: Option<Decimal>,
    pub pbr: Option<Decimal>,
    pub format: OutputFormat,
}

/// 밸류에이션 해석 결과.
#[derive(Debug, Serialize)]
pub struct ValuationReport {
    pub phase: CyclePhase,
    pub confidence: f64,
    pub view: ValuationView,
    pub vix_level: Option<VixLevel>,
    pub fear_greed: Option<FearGreedRating>,
}

/// 현재 단계의 조정 기준값으로 PER/PBR, VIX, 공포탐욕을 해석합니다.
pub async fn evaluate(app: &AppConfig, config: &ValuationConfig) -> Result<ValuationReport> {
    let context = classify_context(app, config.input.clone()).await?;
    let snapshot = &context.assessment.snapshot;

    let view = context.interpret(&ValuationInput {
        per: config.per,
        pbr: config.pbr,
    });
    let vix_level = snapshot
        .vix
        .and_then(|r| Decimal::try_from(r.current).ok())
        .map(|vix| context.vix_level(vix));
    let fear_greed = snapshot
        .fear_greed
        .filter(|r| r.is_finite())
        .map(|r| context.fear_greed_rating(r.current));

    Ok(ValuationReport {
        phase: context.assessment.phase,
        confidence: context.assessment.confidence,
        view,
        vix_level,
        fear_greed,
    })
}

/// 밸류에이션 명령 실행 결과를 문자열로 반환합니다.
pub async fn run_valuation(app: &AppConfig, config: ValuationConfig) -> Result<String> {
    let report = evaluate(app, &config).await?;
    match config.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => Ok(render_text(&report)),
    }
}

fn render_text(report: &ValuationReport) -> String {
    let vix = match report.vix_level {
        Some(level) => level.description().to_string(),
        None => "데이터 없음".to_string(),
    };
    let fear_greed = match report.fear_greed {
        Some(rating) => format!("{} ({})", rating, rating.contrarian_view()),
        None => "데이터 없음".to_string(),
    };

    [
        format!(
            "경제 사이클: {} {} (신뢰도 {:.1}%)",
            report.phase.label(),
            report.phase.icon(),
            report.confidence * 100.0
        ),
        format!("PER: {}", report.view.per_text()),
        format!("PBR: {}", report.view.pbr_text()),
        format!("VIX: {}", vix),
        format!("공포탐욕: {}", fear_greed),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cycle_core::PerLabel;
    use rust_decimal_macros::dec;

    fn recession_input() -> SnapshotInput {
        SnapshotInput {
            vix: Some(35.0),
            treasury_10y: Some(3.4),
            treasury_10y_prev: Some(4.0),
            forward_pe: Some(12.0),
            fear_greed: Some(10.0),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_recession_reads_per_strictly() {
        let config = ValuationConfig {
            input: recession_input(),
            per: Some(dec!(19)),
            pbr: Some(dec!(1.5)),
            ..Default::default()
        };
        let report = evaluate(&AppConfig::default(), &config).await.unwrap();

        assert_eq!(report.phase, CyclePhase::Recession);
        assert_eq!(report.view.per_label, Some(PerLabel::SlightlyOvervalued));
        assert_eq!(report.fear_greed, Some(FearGreedRating::ExtremeFear));
        // 침체기 VIX 허용 범위 확대 (정상 30, 경계 37.5)
        assert_eq!(report.vix_level, Some(VixLevel::Elevated));
    }

    #[tokio::test]
    async fn test_recession_vix_bands_scale_with_tolerance() {
        // 침체기 경계 37.5: VIX 36은 공포가 아닌 불안 구간
        let config = ValuationConfig {
            input: SnapshotInput {
                vix: Some(36.0),
                ..recession_input()
            },
            per: Some(dec!(12)),
            ..Default::default()
        };
        let report = evaluate(&AppConfig::default(), &config).await.unwrap();

        assert_eq!(report.phase, CyclePhase::Recession);
        assert_eq!(report.vix_level, Some(VixLevel::Elevated));
    }

    #[tokio::test]
    async fn test_text_output_without_inputs() {
        let output = run_valuation(&AppConfig::default(), ValuationConfig::default())
            .await
            .unwrap();
        assert!(output.contains("PER: 데이터 없음"));
        assert!(output.contains("VIX: 데이터 없음"));
    }
}
