//! Edmonds-Karp 最大流算法
//!
//! 基于 BFS 的 Ford-Fulkerson：每轮增广的都是边数最少的路径，
//! 总轮数为 O(VE)

use super::search::{AugmentingPath, AugmentingPathSolver, ParentRecorder, PathSearch};
use super::traversal::breadth_first_search;
use crate::flow::ResidualNetwork;
use crate::graph::VertexId;

/// 广度优先的增广路径搜索
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl PathSearch for BreadthFirst {
    fn name(&self) -> &'static str {
        "edmonds-karp"
    }

    fn find_path(
        &mut self,
        network: &ResidualNetwork,
        source: VertexId,
        sink: VertexId,
    ) -> Option<AugmentingPath> {
        let mut recorder = ParentRecorder::new(sink);
        breadth_first_search(network, source, |e| e.has_residual(), &mut recorder);
        AugmentingPath::from_parents(network, &recorder.parents, source, sink)
    }
}

/// Edmonds-Karp 求解器
pub type EdmondsKarp<'a> = AugmentingPathSolver<'a, BreadthFirst>;
