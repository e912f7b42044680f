//! 경제 사이클 분석 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 지표 직접 입력으로 분류
//! cycle classify --vix 18.5 --yield 4.3 --yield-prev 4.1 --pe 19.2 --fear-greed 62
//!
//! # JSON 스냅샷 파일로 분류 (JSON 출력)
//! cycle classify --snapshot demos/snapshot.json --format json
//!
//! # 단계별 기준값 조정 테이블
//! cycle thresholds
//! cycle thresholds --phase recession
//!
//! # 현재 단계 기준 종목 PER/PBR 해석
//! cycle valuation --per 21.5 --pbr 3.2 --vix 24 --fear-greed 30
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{error, info};

use cycle_cli::classify::{run_classify, ClassifyConfig};
use cycle_cli::thresholds::render_thresholds;
use cycle_cli::valuation::{run_valuation, ValuationConfig};
use cycle_cli::{OutputFormat, SnapshotInput};
use cycle_core::{init_logging, AppConfig, CyclePhase, LogConfig};

#[derive(Parser)]
#[command(name = "cycle")]
#[command(about = "Economic cycle CLI - 시장 지표 기반 경제 사이클 판단 및 기준값 조정", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// 지표 입력 인자.
#[derive(Args, Debug, Default)]
struct IndicatorArgs {
    /// JSON 스냅샷 파일 (플래그 값이 있으면 플래그 우선)
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// VIX 현재 값
    #[arg(long)]
    vix: Option<f64>,

    /// VIX 비교 값
    #[arg(long)]
    vix_prev: Option<f64>,

    /// 미국 10년물 국채 금리 (%)
    #[arg(long = "yield")]
    treasury_10y: Option<f64>,

    /// 10년물 금리 비교 값 (1개월 전 등)
    #[arg(long = "yield-prev")]
    treasury_10y_prev: Option<f64>,

    /// S&P 500 Forward P/E
    #[arg(long = "pe")]
    forward_pe: Option<f64>,

    /// Forward P/E 비교 값
    #[arg(long = "pe-prev")]
    forward_pe_prev: Option<f64>,

    /// 공포탐욕 지수 (0-100)
    #[arg(long)]
    fear_greed: Option<f64>,

    /// 공포탐욕 지수 비교 값
    #[arg(long)]
    fear_greed_prev: Option<f64>,
}

impl From<IndicatorArgs> for SnapshotInput {
    fn from(args: IndicatorArgs) -> Self {
        Self {
            snapshot_file: args.snapshot,
            vix: args.vix,
            vix_prev: args.vix_prev,
            treasury_10y: args.treasury_10y,
            treasury_10y_prev: args.treasury_10y_prev,
            forward_pe: args.forward_pe,
            forward_pe_prev: args.forward_pe_prev,
            fear_greed: args.fear_greed,
            fear_greed_prev: args.fear_greed_prev,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// 경제 사이클 단계 판단
    Classify {
        #[command(flatten)]
        indicators: IndicatorArgs,

        /// 출력 형식 (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// 단계별 밸류에이션 기준값 조정 테이블
    Thresholds {
        /// 특정 단계만 출력 (recovery, expansion, overheating, contraction, recession)
        #[arg(short, long)]
        phase: Option<String>,

        /// 출력 형식 (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// 현재 단계 기준 종목 밸류에이션 해석
    Valuation {
        /// 종목 PER
        #[arg(long)]
        per: Decimal,

        /// 종목 PBR
        #[arg(long)]
        pbr: Option<Decimal>,

        #[command(flatten)]
        indicators: IndicatorArgs,

        /// 출력 형식 (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // 설정 검증 실패 시 분류 전에 종료
    let app_config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config: {}", cli.config.display()))?;

    let log_config = LogConfig::from_settings(&app_config.logging).override_from_env();
    if let Err(e) = init_logging(log_config) {
        eprintln!("로깅 초기화 실패: {}", e);
    }

    info!(config = %cli.config.display(), "설정 로드 완료");

    let output = match cli.command {
        Commands::Classify { indicators, format } => {
            let config = ClassifyConfig {
                input: indicators.into(),
                format: OutputFormat::parse(&format)?,
            };
            run_classify(&app_config, config).await
        }

        Commands::Thresholds { phase, format } => {
            let phase = phase
                .map(|p| p.parse::<CyclePhase>())
                .transpose()
                .map_err(|e| anyhow::anyhow!(e))?;
            render_thresholds(&app_config.valuation, phase, OutputFormat::parse(&format)?)
        }

        Commands::Valuation {
            per,
            pbr,
            indicators,
            format,
        } => {
            let config = ValuationConfig {
                input: indicators.into(),
                per: Some(per),
                pbr,
                format: OutputFormat::parse(&format)?,
            };
            run_valuation(&app_config, config).await
        }
    };

    match output {
        Ok(text) => {
            println!("{}", text);
            Ok(())
        }
        Err(e) => {
            error!("명령 실행 실패: {:#}", e);
            Err(e)
        }
    }
}
