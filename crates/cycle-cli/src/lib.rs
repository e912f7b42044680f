//! 경제 사이클 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 지표 입력(플래그/JSON 파일)으로 경제 사이클 분류
//! - 단계별 기준값 조정 테이블 출력
//! - 현재 단계를 반영한 종목 PER/PBR 해석

pub mod commands;

pub use commands::*;
