//! 残量网络上的通用遍历
//!
//! 广度优先与深度优先遍历，通过 [`Visitor`] 回调暴露遍历事件。
//! 每次调用中每个顶点至多访问一次；`tree_edge` 恰好在某个顶点第一次被到达时触发。

use crate::flow::{EdgeIndex, FlowEdge, ResidualNetwork};
use crate::graph::VertexId;
use std::collections::{HashSet, VecDeque};

/// 遍历控制
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// 继续遍历
    Continue,
    /// 立即结束遍历
    Break,
}

/// 遍历回调
pub trait Visitor {
    /// 顶点第一次被发现
    fn discover_vertex(&mut self, _vertex: VertexId) {}

    /// 检查一条出边（无论是否可通行）
    fn examine_edge(&mut self, _idx: EdgeIndex, _edge: &FlowEdge) {}

    /// 经由该边第一次到达目标顶点
    fn tree_edge(&mut self, _idx: EdgeIndex, _edge: &FlowEdge) -> Control {
        Control::Continue
    }

    /// 顶点的全部出边处理完毕
    fn finish_vertex(&mut self, _vertex: VertexId) {}
}

/// 广度优先遍历
///
/// `filter` 决定一条边是否可以通行
pub fn breadth_first_search<F, V>(
    network: &ResidualNetwork,
    start: VertexId,
    mut filter: F,
    visitor: &mut V,
) where
    F: FnMut(&FlowEdge) -> bool,
    V: Visitor + ?Sized,
{
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    visited.insert(start);
    visitor.discover_vertex(start);
    queue.push_back(start);

    while let Some(u) = queue.pop_front() {
        for (idx, edge) in network.adjacent(u).iter() {
            visitor.examine_edge(idx, edge);

            if !filter(edge) || !visited.insert(edge.target) {
                continue;
            }

            visitor.discover_vertex(edge.target);
            if visitor.tree_edge(idx, edge) == Control::Break {
                return;
            }
            queue.push_back(edge.target);
        }

        visitor.finish_vertex(u);
    }
}

/// 深度优先遍历
///
/// 使用显式栈保存 (顶点, 下一条待检查出边) 帧，调用栈深度与路径长度无关
pub fn depth_first_search<F, V>(
    network: &ResidualNetwork,
    start: VertexId,
    mut filter: F,
    visitor: &mut V,
) where
    F: FnMut(&FlowEdge) -> bool,
    V: Visitor + ?Sized,
{
    let mut visited = HashSet::new();
    let mut stack: Vec<(VertexId, usize)> = Vec::new();

    visited.insert(start);
    visitor.discover_vertex(start);
    stack.push((start, 0));

    while let Some(frame) = stack.last_mut() {
        let (u, cursor) = *frame;

        let Some((idx, edge)) = network.adjacent(u).get(cursor) else {
            visitor.finish_vertex(u);
            stack.pop();
            continue;
        };
        frame.1 += 1;

        visitor.examine_edge(idx, edge);

        if !filter(edge) || !visited.insert(edge.target) {
            continue;
        }

        visitor.discover_vertex(edge.target);
        if visitor.tree_edge(idx, edge) == Control::Break {
            return;
        }
        stack.push((edge.target, 0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CapacityGraph;

    /// 记录事件顺序
    #[derive(Default)]
    struct Recorder {
        discovered: Vec<u64>,
        tree: Vec<(u64, u64)>,
        finished: Vec<u64>,
        examined: usize,
        stop_at: Option<u64>,
    }

    impl Visitor for Recorder {
        fn discover_vertex(&mut self, vertex: VertexId) {
            self.discovered.push(vertex.as_u64());
        }

        fn examine_edge(&mut self, _idx: EdgeIndex, _edge: &FlowEdge) {
            self.examined += 1;
        }

        fn tree_edge(&mut self, _idx: EdgeIndex, edge: &FlowEdge) -> Control {
            self.tree.push((edge.source.as_u64(), edge.target.as_u64()));
            if Some(edge.target.as_u64()) == self.stop_at {
                Control::Break
            } else {
                Control::Continue
            }
        }

        fn finish_vertex(&mut self, vertex: VertexId) {
            self.finished.push(vertex.as_u64());
        }
    }

    fn network() -> ResidualNetwork {
        //   1 -> 2 -> 4
        //   |         ^
        //   +--> 3 ---+
        let graph =
            CapacityGraph::with_edges([(1, 2, 1), (1, 3, 1), (2, 4, 1), (3, 4, 1)]).unwrap();
        ResidualNetwork::from_graph(&graph).unwrap()
    }

    #[test]
    fn test_bfs_order() {
        let network = network();
        let mut recorder = Recorder::default();
        breadth_first_search(&network, VertexId::new(1), |e| e.has_residual(), &mut recorder);

        assert_eq!(recorder.discovered, vec![1, 2, 3, 4]);
        assert_eq!(recorder.tree, vec![(1, 2), (1, 3), (2, 4)]);
        assert_eq!(recorder.finished, vec![1, 2, 3, 4]);
        // 每条正向边与反向边都被检查一次
        assert_eq!(recorder.examined, 8);
    }

    #[test]
    fn test_dfs_order() {
        let network = network();
        let mut recorder = Recorder::default();
        depth_first_search(&network, VertexId::new(1), |e| e.has_residual(), &mut recorder);

        assert_eq!(recorder.discovered, vec![1, 2, 4, 3]);
        assert_eq!(recorder.tree, vec![(1, 2), (2, 4), (1, 3)]);
        assert_eq!(recorder.finished, vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_traversal_break() {
        let network = network();
        let mut recorder = Recorder {
            stop_at: Some(2),
            ..Default::default()
        };
        depth_first_search(&network, VertexId::new(1), |e| e.has_residual(), &mut recorder);

        assert_eq!(recorder.tree, vec![(1, 2)]);
        assert!(recorder.finished.is_empty());
    }

    #[test]
    fn test_filter_excludes_saturated_edges() {
        let mut network = network();
        let (idx, _) = network.adjacent(VertexId::new(1)).get(0).unwrap();
        network.push_flow(idx, 1);

        let mut recorder = Recorder::default();
        breadth_first_search(&network, VertexId::new(1), |e| e.has_residual(), &mut recorder);

        assert_eq!(recorder.tree, vec![(1, 3), (3, 4)]);
        // 2 只能经由 4 的反向边到达，而该反向边残量为 0
        assert!(!recorder.discovered.contains(&2));
    }

    #[test]
    fn test_unknown_start_visits_only_start() {
        let network = network();
        let mut recorder = Recorder::default();
        breadth_first_search(&network, VertexId::new(99), |_| true, &mut recorder);

        assert_eq!(recorder.discovered, vec![99]);
        assert!(recorder.tree.is_empty());
    }
}
