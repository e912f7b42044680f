//! 단계별 기준값 조정 테이블 출력.

use anyhow::Result;
use cycle_core::{adjust, AdjustedBenchmarks, CyclePhase, ThresholdAdjustment, ValuationBenchmarks};
use serde::Serialize;

use super::input::OutputFormat;

#[derive(Debug, Serialize)]
struct PhaseThresholds {
    label: &'static str,
    adjustment: ThresholdAdjustment,
    benchmarks: AdjustedBenchmarks,
    recommended_sectors: &'static [&'static str],
}

impl PhaseThresholds {
    fn new(phase: CyclePhase, base: &ValuationBenchmarks) -> Self {
        let adjustment = adjust(phase);
        Self {
            label: phase.label(),
            benchmarks: adjustment.apply(base),
            adjustment,
            recommended_sectors: phase.recommended_sectors(),
        }
    }
}

/// 기준값 조정 테이블을 문자열로 반환합니다.
///
/// `phase`가 없으면 5단계 전체를 출력합니다.
pub fn render_thresholds(
    base: &ValuationBenchmarks,
    phase: Option<CyclePhase>,
    format: OutputFormat,
) -> Result<String> {
    let phases: Vec<CyclePhase> = match phase {
        Some(phase) => vec![phase],
        None => CyclePhase::ALL.to_vec(),
    };
    let rows: Vec<PhaseThresholds> = phases
        .into_iter()
        .map(|p| PhaseThresholds::new(p, base))
        .collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => Ok(render_table(&rows)),
    }
}

fn render_table(rows: &[PhaseThresholds]) -> String {
    let mut lines = vec![format!(
        "{:<8} {:>6} {:>8} {:>8} {:>10} {:>10} {:>8}",
        "단계", "PER×", "적정PER", "적정PBR", "VIX정상", "VIX경계", "공포탐욕"
    )];
    lines.extend(rows.iter().map(|row| {
        let b = &row.benchmarks;
        format!(
            "{:<8} {:>6} {:>8} {:>8} {:>10} {:>10} {:>8}",
            row.label,
            row.adjustment.per_multiplier,
            b.per_fair,
            b.pbr_fair,
            b.vix_normal,
            b.vix_elevated,
            b.fear_greed_neutral
        )
    }));
    for row in rows {
        lines.push(String::new());
        lines.push(format!("{}: {}", row.label, row.adjustment.rationale()));
        lines.push(format!("  추천 섹터: {}", row.recommended_sectors.join(", ")));
    }
    lines.join("\n")
}
