//! 图核心模块
//!
//! 定义顶点、边和基础容量图

mod edge;
mod graph;
mod vertex;

pub use edge::{Capacity, Edge};
pub use graph::{CapacityGraph, FlowGraph};
pub use vertex::VertexId;
