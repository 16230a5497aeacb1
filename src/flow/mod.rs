//! 流网络模块
//!
//! 残量网络、流边以及求解后的结果视图

mod edge;
mod network;
mod result;

pub use edge::{EdgeIndex, FlowEdge};
pub use network::{Adjacent, AdjacentMut, ResidualNetwork};
pub use result::{EdgeFlow, MaxFlow};
