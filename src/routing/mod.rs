//! 路由求解
//!
//! 两种求解器都在一次计算私有的 [`Network`](crate::net::Network) 上运行：
//! - 最短路径：带宽过滤后的最少跳数路径；
//! - 最宽路径：跳数上限内瓶颈带宽最大的路径。

mod path;
mod shortest;
mod widest;

pub use path::{ComputedPath, Hop, NoPathReason};
pub use shortest::shortest_path;
pub use widest::widest_path;
