//! 路径计算单元（PCE）
//!
//! 对外入口：约束求值、引擎配置、请求/应答格式，以及两种计算模式。

mod config;
mod constraint;
mod engine;
mod request;

pub use config::{DEFAULT_HOST_MARKER, DEFAULT_TELEMETRY_TIMEOUT_MS, EngineConfig};
pub use constraint::{Constraint, Metric, Thresholds};
pub use engine::PathComputation;
pub use request::{Objective, PathReply, PathRequest};
