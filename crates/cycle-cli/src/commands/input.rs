//! 지표 입력 및 출력 형식.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cycle_analytics::StaticIndicatorSource;
use cycle_core::{IndicatorKind, IndicatorReading, IndicatorSnapshot};

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid format: {}. Use: text, json", s)),
        }
    }
}

/// 지표 입력.
///
/// JSON 스냅샷 파일을 먼저 읽고, 명령줄 플래그로 지정한 값이 있으면 덮어씁니다.
#[derive(Debug, Clone, Default)]
pub struct SnapshotInput {
    /// JSON 스냅샷 파일 경로
    pub snapshot_file: Option<PathBuf>,
    pub vix: Option<f64>,
    pub vix_prev: Option<f64>,
    pub treasury_10y: Option<f64>,
    pub treasury_10y_prev: Option<f64>,
    pub forward_pe: Option<f64>,
    pub forward_pe_prev: Option<f64>,
    pub fear_greed: Option<f64>,
    pub fear_greed_prev: Option<f64>,
}

impl SnapshotInput {
    /// 입력을 하나의 스냅샷으로 합칩니다.
    pub fn into_snapshot(self) -> Result<IndicatorSnapshot> {
        let base = match &self.snapshot_file {
            Some(path) => StaticIndicatorSource::from_json_file(path)
                .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?
                .snapshot()
                .clone(),
            None => IndicatorSnapshot::new(),
        };

        let overrides = [
            (IndicatorKind::Vix, self.vix, self.vix_prev),
            (IndicatorKind::TreasuryYield10y, self.treasury_10y, self.treasury_10y_prev),
            (IndicatorKind::ForwardPe, self.forward_pe, self.forward_pe_prev),
            (IndicatorKind::FearGreed, self.fear_greed, self.fear_greed_prev),
        ];

        let snapshot = overrides
            .into_iter()
            .fold(base, |snapshot, (kind, current, previous)| {
                let existing = snapshot.get(kind).copied();
                let merged = merge_reading(existing, current, previous);
                snapshot.with_reading(kind, merged)
            });

        Ok(snapshot)
    }
}

fn merge_reading(
    existing: Option<IndicatorReading>,
    current: Option<f64>,
    previous: Option<f64>,
) -> Option<IndicatorReading> {
    match (current, existing) {
        (Some(current), _) => Some(IndicatorReading {
            current,
            previous: previous.or_else(|| existing.and_then(|r| r.previous)),
        }),
        (None, Some(reading)) => Some(IndicatorReading {
            previous: previous.or(reading.previous),
            ..reading
        }),
        (None, None) => None,
    }
}
