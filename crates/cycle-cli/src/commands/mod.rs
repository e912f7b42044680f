//! CLI 명령어 구현 모듈.

pub mod classify;
pub mod input;
pub mod thresholds;
pub mod valuation;

pub use input::{OutputFormat, SnapshotInput};
