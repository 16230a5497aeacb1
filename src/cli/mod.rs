//! 命令行输出支持

mod printer;

pub use printer::{PrintMode, Printer};

use crate::algorithm::{FlowStats, MaxFlowAlgorithm};
use crate::graph::Capacity;
use serde::Serialize;

/// 一次算法运行的摘要
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunSummary {
    pub algorithm: MaxFlowAlgorithm,
    pub value: Capacity,
    #[serde(flatten)]
    pub stats: FlowStats,
}

/// 所有运行结果是否一致
pub fn all_agree(runs: &[RunSummary]) -> bool {
    runs.windows(2).all(|w| w[0].value == w[1].value)
}
