//! 错误类型

use std::time::Duration;

use thiserror::Error;

use crate::routing::NoPathReason;

pub type Result<T> = std::result::Result<T, Error>;

/// 调用方可见的错误
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid endpoint identifier {0:?}: expected `device:port[:...]`")]
    InvalidEndpointIdentifier(String),

    #[error("no path from {src} to {dst}: {reason}")]
    NoPathFound {
        src: String,
        dst: String,
        reason: NoPathReason,
    },

    #[error("conflicting constraints: {0}")]
    ConflictingConstraints(String),

    #[error("path computation cancelled")]
    Cancelled,

    #[error("malformed input: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 带宽遥测查询失败
///
/// 除 `Cancelled` 外均在建图时就地降级为带宽 0，不会传给调用方。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("no bandwidth reading for {0}")]
    UnknownEndpoint(String),

    #[error("telemetry unavailable: {0}")]
    Unavailable(String),

    #[error("telemetry query timed out after {0:?}")]
    Timeout(Duration),

    #[error("telemetry query cancelled")]
    Cancelled,
}
