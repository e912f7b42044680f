//! # Cycle Core
//!
//! 경제 사이클 분석의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! - 시장 지표 스냅샷 (VIX, 10년물 금리, Forward P/E, 공포탐욕 지수)
//! - 경제 사이클 단계 및 분류 결과
//! - 단계별 동적 기준값 조정 테이블
//! - 조정 기준값을 이용한 PER/PBR/VIX 해석
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use self::config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
