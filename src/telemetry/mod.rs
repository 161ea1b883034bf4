//! 带宽遥测（外部协作方）接口
//!
//! 路径计算只需要一个同步的“端口当前可用带宽”查询。
//! 查询失败、超时都在建图时降级为带宽 0。

mod provider;
mod timeout;

pub use provider::{BandwidthProvider, StaticBandwidth};
pub use timeout::{CancelToken, DEFAULT_TELEMETRY_WORKERS, TimeoutProvider};
