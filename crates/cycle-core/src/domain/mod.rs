//! 경제 사이클 분석을 위한 도메인 모델.

mod assessment;
mod cycle_phase;
mod indicator;
mod outlook;
mod threshold;
mod valuation;

pub use assessment::*;
pub use cycle_phase::*;
pub use indicator::*;
pub use outlook::*;
pub use threshold::*;
pub use valuation::*;
