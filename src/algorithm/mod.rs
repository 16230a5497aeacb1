//! 最大流算法模块
//!
//! 包含通用遍历、增广路径搜索以及 Ford-Fulkerson、Edmonds-Karp、Dinic 三种求解器

mod dinic;
mod edmonds_karp;
mod ford_fulkerson;
mod search;
pub mod traversal;

pub use dinic::Dinic;
pub use edmonds_karp::{BreadthFirst, EdmondsKarp};
pub use ford_fulkerson::{DepthFirst, FordFulkerson};
pub use search::{AugmentingPath, AugmentingPathSolver, PathSearch};

use crate::error::Error;
use crate::flow::ResidualNetwork;
use crate::graph::{Capacity, VertexId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 最大流求解器
///
/// 求解器在构造时独占借用一个残量网络，计算结束后网络中保留最终的流分配
pub trait MaxFlowSolver {
    /// 计算从 source 到 sink 的最大流
    ///
    /// 汇点不可达是正常的终止条件，返回已累计的流量（可能为 0）
    fn compute_max_flow(&mut self, source: VertexId, sink: VertexId) -> Capacity;

    /// 最近一次计算的统计
    fn stats(&self) -> &FlowStats;
}

/// 单次计算的统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStats {
    /// 成功增广的路径数
    pub augmentations: usize,
    /// 阶段数：增广路径算法每找到一条路径算一个阶段，
    /// Dinic 每个可达汇点的层次图算一个阶段
    pub phases: usize,
    /// 耗时（微秒）
    pub elapsed_us: u64,
}

/// 最大流算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MaxFlowAlgorithm {
    /// DFS 增广路径
    #[value(alias = "ff")]
    FordFulkerson,
    /// BFS 最短增广路径
    #[value(alias = "ek")]
    EdmondsKarp,
    /// 层次图 + 阻塞流
    Dinic,
}

impl MaxFlowAlgorithm {
    /// 全部算法
    pub const ALL: [MaxFlowAlgorithm; 3] = [
        MaxFlowAlgorithm::FordFulkerson,
        MaxFlowAlgorithm::EdmondsKarp,
        MaxFlowAlgorithm::Dinic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MaxFlowAlgorithm::FordFulkerson => "ford-fulkerson",
            MaxFlowAlgorithm::EdmondsKarp => "edmonds-karp",
            MaxFlowAlgorithm::Dinic => "dinic",
        }
    }
}

impl fmt::Display for MaxFlowAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaxFlowAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ford-fulkerson" | "ford_fulkerson" | "ff" => Ok(MaxFlowAlgorithm::FordFulkerson),
            "edmonds-karp" | "edmonds_karp" | "ek" => Ok(MaxFlowAlgorithm::EdmondsKarp),
            "dinic" => Ok(MaxFlowAlgorithm::Dinic),
            other => Err(Error::ParseError(format!("未知的最大流算法: {}", other))),
        }
    }
}

/// 使用指定算法在网络上求最大流
pub fn solve(
    network: &mut ResidualNetwork,
    algorithm: MaxFlowAlgorithm,
    source: VertexId,
    sink: VertexId,
) -> (Capacity, FlowStats) {
    match algorithm {
        MaxFlowAlgorithm::FordFulkerson => run(FordFulkerson::new(network), source, sink),
        MaxFlowAlgorithm::EdmondsKarp => run(EdmondsKarp::new(network), source, sink),
        MaxFlowAlgorithm::Dinic => run(Dinic::new(network), source, sink),
    }
}

fn run<S: MaxFlowSolver>(
    mut solver: S,
    source: VertexId,
    sink: VertexId,
) -> (Capacity, FlowStats) {
    let value = solver.compute_max_flow(source, sink);
    (value, *solver.stats())
}
