//! 约束求值
//!
//! 把异构的约束列表归约成每种度量一个标量阈值。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 约束度量
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// 使用 `min`：链路可用带宽下限
    Bandwidth,
    /// 使用 `max`：路径跳数上限
    #[serde(alias = "hopcount")]
    HopCount,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Constraint {
    pub metric: Metric,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
}

impl Constraint {
    pub fn min_bandwidth(bandwidth: u64) -> Self {
        Self {
            metric: Metric::Bandwidth,
            min: Some(bandwidth),
            max: None,
        }
    }

    pub fn max_hops(hops: u64) -> Self {
        Self {
            metric: Metric::HopCount,
            min: None,
            max: Some(hops),
        }
    }
}

/// 归约后的阈值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// 所有带宽约束 `min` 的最大值，缺省 0
    pub min_bandwidth: u64,
    /// 所有跳数约束 `max` 的最小值，缺省不限
    pub max_hops: Option<u64>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_bandwidth: 0,
            max_hops: None,
        }
    }
}

impl Thresholds {
    /// 同类约束取最严格者：下限取最大，上限取最小。
    pub fn evaluate(constraints: &[Constraint]) -> Self {
        constraints
            .iter()
            .fold(Thresholds::default(), |mut th, c| {
                match (c.metric, c.min, c.max) {
                    (Metric::Bandwidth, Some(min), _) => {
                        th.min_bandwidth = th.min_bandwidth.max(min);
                    }
                    (Metric::HopCount, _, Some(max)) => {
                        th.max_hops = Some(th.max_hops.map_or(max, |cur| cur.min(max)));
                    }
                    _ => {}
                }
                th
            })
    }

    /// 拒绝自相矛盾的单条约束（`min > max`）。
    pub fn validate(constraints: &[Constraint]) -> Result<()> {
        for c in constraints {
            if let (Some(min), Some(max)) = (c.min, c.max) {
                if min > max {
                    return Err(Error::ConflictingConstraints(format!(
                        "{:?} constraint has min {min} > max {max}",
                        c.metric
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn allows_hops(&self, hops: usize) -> bool {
        self.max_hops.is_none_or(|max| hops as u64 <= max)
    }
}
