//! 경제 사이클 분류 명령.

use std::sync::Arc;

use anyhow::Result;
use cycle_analytics::{CycleContext, CycleSession, StaticIndicatorSource};
use cycle_core::{
    AdjustedBenchmarks, AppConfig, CycleAssessment, MarketOutlook, ThresholdAdjustment,
};
use serde::Serialize;
use tracing::info;

use super::input::{OutputFormat, SnapshotInput};

/// 분류 명령 설정.
#[derive(Debug, Clone, Default)]
pub struct ClassifyConfig {
    pub input: SnapshotInput,
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ClassifyReport<'a> {
    assessment: &'a CycleAssessment,
    adjustment: &'a ThresholdAdjustment,
    benchmarks: &'a AdjustedBenchmarks,
    outlook: MarketOutlook,
}

/// 입력 지표로 분류하고 조정 기준값까지 계산합니다.
pub async fn classify_context(app: &AppConfig, input: SnapshotInput) -> Result<CycleContext> {
    let snapshot = input.into_snapshot()?;
    info!(available = snapshot.available_count(), "지표 입력 로드");

    let source = Arc::new(StaticIndicatorSource::new(snapshot));
    let session = CycleSession::new("cli", app, source)?;
    Ok(session.context(true).await)
}

/// 분류 명령 실행 결과를 문자열로 반환합니다.
pub async fn run_classify(app: &AppConfig, config: ClassifyConfig) -> Result<String> {
    let context = classify_context(app, config.input).await?;
    render(&context, config.format)
}

fn render(context: &CycleContext, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let report = ClassifyReport {
                assessment: &context.assessment,
                adjustment: &context.adjustment,
                benchmarks: &context.benchmarks,
                outlook: context.assessment.phase.market_outlook(),
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Text => Ok(render_text(context)),
    }
}

fn render_text(context: &CycleContext) -> String {
    let assessment = &context.assessment;
    let allocation = assessment.phase.asset_allocation();
    let outlook = assessment.phase.market_outlook();

    let mut lines = vec![
        assessment.summary(),
        format!("설명: {}", assessment.phase.description()),
        format!(
            "자산 배분: 주식 {}% / 채권 {}% / 현금 {}% / 원자재 {}% (위험 수준: {})",
            allocation.stocks,
            allocation.bonds,
            allocation.cash,
            allocation.commodities,
            assessment.phase.risk_level()
        ),
        String::new(),
        "[지표별 점수]".to_string(),
    ];
    lines.extend(assessment.dimensions.iter().map(|dim| {
        format!(
            "  {:<14} {:+.2} x {:.2} = {:+.3}{}",
            dim.indicator.to_string(),
            dim.score,
            dim.weight,
            dim.contribution(),
            if dim.defaulted { " (기본값)" } else { "" }
        )
    }));

    lines.push(String::new());
    lines.push("[판단 근거]".to_string());
    lines.extend(assessment.rationale.iter().map(|line| format!("  - {}", line)));

    let b = &context.benchmarks;
    lines.push(String::new());
    lines.push("[조정 기준값]".to_string());
    lines.push(format!("  PER: 저평가 {} / 적정 {} / 고평가 {}", b.per_low, b.per_fair, b.per_high));
    lines.push(format!("  PBR: 저평가 {} / 적정 {} / 고평가 {}", b.pbr_low, b.pbr_fair, b.pbr_high));
    lines.push(format!("  VIX: 정상 ≤ {} / 경계 ≤ {}", b.vix_normal, b.vix_elevated));
    lines.push(format!("  공포탐욕 중립: {}", b.fear_greed_neutral));

    lines.push(String::new());
    lines.push(format!("[시장 전망] (확신도: {})", outlook.conviction));
    lines.push(format!("  거시: {}", outlook.macro_view));
    lines.push(format!("  단기: {}", outlook.short_term));
    lines.push(format!("  중기: {}", outlook.medium_term));
    lines.push(format!("  장기: {}", outlook.long_term));
    lines.push(format!("  위험 요인: {}", outlook.risk_factors.join(", ")));
    lines.push(format!("  기회 요인: {}", outlook.opportunity_factors.join(", ")));
    lines.push(format!("  핵심 지표: {}", outlook.key_indicators.join(", ")));
    lines.push(format!("  전략: {}", outlook.strategy));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cycle_core::CyclePhase;

    fn overheated() -> SnapshotInput {
        SnapshotInput {
            vix: Some(10.0),
            treasury_10y: Some(4.3),
            treasury_10y_prev: Some(4.3),
            forward_pe: Some(23.0),
            fear_greed: Some(85.0),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_classify_text_output() {
        let output = run_classify(
            &AppConfig::default(),
            ClassifyConfig {
                input: overheated(),
                format: OutputFormat::Text,
            },
        )
        .await
        .unwrap();

        assert!(output.contains("과열기"));
        assert!(output.contains("[판단 근거]"));
        assert!(output.contains("적정 22"));
        assert!(output.contains("[시장 전망]"));
        assert!(output.contains("인플레이션 고착화"));
        assert!(!output.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_classify_json_output() {
        let output = run_classify(
            &AppConfig::default(),
            ClassifyConfig {
                input: overheated(),
                format: OutputFormat::Json,
            },
        )
        .await
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["assessment"]["phase"], "OVERHEATING");
        assert_eq!(value["adjustment"]["phase"], "OVERHEATING");
        assert_eq!(value["outlook"]["phase"], "OVERHEATING");
        assert_eq!(value["outlook"]["conviction"], "높음");
        assert_eq!(value["outlook"]["key_indicators"][0], "근원 CPI 추이");
    }

    #[tokio::test]
    async fn test_empty_input_defaults_to_expansion() {
        let context = classify_context(&AppConfig::default(), SnapshotInput::default())
            .await
            .unwrap();
        assert_eq!(context.assessment.phase, CyclePhase::Expansion);
        assert_eq!(context.assessment.defaulted_dimensions().len(), 4);
    }
}
