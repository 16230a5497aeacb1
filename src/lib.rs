//! flownet - 残量网络上的最大流求解库
//!
//! 在带容量的有向图上计算单源单汇最大流，支持：
//! - 成对存放正反向边的残量网络
//! - Ford-Fulkerson（DFS）、Edmonds-Karp（BFS）、Dinic 三种求解器
//! - 最大流结果与最小割
//! - CSV / JSON Lines 边列表导入

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod flow;
pub mod graph;
pub mod import;

// 重导出常用类型
pub use algorithm::{
    solve, Dinic, EdmondsKarp, FlowStats, FordFulkerson, MaxFlowAlgorithm, MaxFlowSolver,
};
pub use error::{Error, Result};
pub use flow::{EdgeFlow, EdgeIndex, FlowEdge, MaxFlow, ResidualNetwork};
pub use graph::{Capacity, CapacityGraph, Edge, FlowGraph, VertexId};
pub use import::{EdgeListImporter, ImportFormat, ImportStats};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
