//! Ford-Fulkerson 最大流算法
//!
//! 用不限深度的 DFS 寻找增广路径。路径数只受最大流值约束，
//! 在对抗性容量下可能需要很多轮，这是该算法本身的性质。

use super::search::{AugmentingPath, AugmentingPathSolver, ParentRecorder, PathSearch};
use super::traversal::depth_first_search;
use crate::flow::ResidualNetwork;
use crate::graph::VertexId;

/// 深度优先的增广路径搜索
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl PathSearch for DepthFirst {
    fn name(&self) -> &'static str {
        "ford-fulkerson"
    }

    fn find_path(
        &mut self,
        network: &ResidualNetwork,
        source: VertexId,
        sink: VertexId,
    ) -> Option<AugmentingPath> {
        let mut recorder = ParentRecorder::new(sink);
        depth_first_search(network, source, |e| e.has_residual(), &mut recorder);
        AugmentingPath::from_parents(network, &recorder.parents, source, sink)
    }
}

/// Ford-Fulkerson 求解器
pub type FordFulkerson<'a> = AugmentingPathSolver<'a, DepthFirst>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::MaxFlowSolver;
    use crate::graph::{Capacity, CapacityGraph};

    fn v(id: u64) -> VertexId {
        VertexId::new(id)
    }

    #[test]
    fn test_simple_graph() {
        let graph =
            CapacityGraph::with_edges([(1, 2, 10), (1, 3, 10), (2, 3, 2), (2, 4, 8), (3, 4, 10)])
                .unwrap();
        let mut network = ResidualNetwork::from_graph(&graph).unwrap();

        let max_flow = FordFulkerson::new(&mut network).compute_max_flow(v(1), v(4));
        assert_eq!(max_flow, 18);
        assert!(network.check_invariants(v(1), v(4)).is_ok());
    }

    #[test]
    fn test_single_path() {
        let graph = CapacityGraph::with_edges([(1, 2, 5), (2, 3, 5)]).unwrap();
        let mut network = ResidualNetwork::from_graph(&graph).unwrap();

        let mut solver = FordFulkerson::new(&mut network);
        assert_eq!(solver.compute_max_flow(v(1), v(3)), 5);
        assert_eq!(solver.stats().augmentations, 1);

        for (_, edge) in network.forward_edges() {
            assert_eq!(edge.flow, 5);
        }
    }

    #[test]
    fn test_dfs_path_follows_adjacency_order() {
        // DFS 先走 1 -> 2 -> 3 -> 4，而不是更短的 1 -> 4
        let graph =
            CapacityGraph::with_edges([(1, 2, 1), (1, 4, 1), (2, 3, 1), (3, 4, 1)]).unwrap();
        let network = ResidualNetwork::from_graph(&graph).unwrap();

        let path = DepthFirst.find_path(&network, v(1), v(4)).unwrap();
        assert_eq!(path.vertices(&network), vec![v(1), v(2), v(3), v(4)]);
        assert_eq!(path.bottleneck, 1);
    }

    #[test]
    fn test_uses_reverse_edges() {
        // 第一条 DFS 路径 1-2-3-4 占用了 2->3，需要沿反向边 3->2 撤销
        let graph =
            CapacityGraph::with_edges([(1, 2, 1), (1, 3, 1), (2, 3, 1), (2, 4, 1), (3, 4, 1)])
                .unwrap();
        let mut network = ResidualNetwork::from_graph(&graph).unwrap();

        assert_eq!(FordFulkerson::new(&mut network).compute_max_flow(v(1), v(4)), 2);
        assert!(network.check_invariants(v(1), v(4)).is_ok());
    }

    #[test]
    fn test_long_chain_does_not_overflow_stack() {
        let edges: Vec<(u64, u64, Capacity)> = (0..20_000).map(|i| (i, i + 1, 3)).collect();
        let graph = CapacityGraph::with_edges(edges).unwrap();
        let mut network = ResidualNetwork::from_graph(&graph).unwrap();

        let path = DepthFirst.find_path(&network, v(0), v(20_000)).unwrap();
        assert_eq!(path.len(), 20_000);

        let mut solver = FordFulkerson::new(&mut network);
        assert_eq!(solver.compute_max_flow(v(0), v(20_000)), 3);
        assert_eq!(solver.stats().augmentations, 1);
    }

    #[test]
    fn test_no_path() {
        let graph = CapacityGraph::with_edges([(1, 2, 10), (3, 4, 10)]).unwrap();
        let mut network = ResidualNetwork::from_graph(&graph).unwrap();

        let mut solver = FordFulkerson::new(&mut network);
        assert_eq!(solver.compute_max_flow(v(1), v(4)), 0);
        assert_eq!(solver.stats().augmentations, 0);
    }
}
