//! 带超时与取消的遥测查询
//!
//! 查询交给固定数量的常驻工作线程执行，调用线程按截止时间等待结果。
//! 超时后放弃等待；工作线程若仍卡在该查询上，会被记为“卡住”，
//! 全部工作线程都卡住时新的查询直接按不可用处理，不再排队等待。
//! 线程数在构造时确定，卡住的查询不会让线程数增长。

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use super::provider::BandwidthProvider;
use crate::error::TelemetryError;
use crate::net::TpId;

/// 等待期间检查取消标志的间隔
const CANCEL_POLL: Duration = Duration::from_millis(10);

pub const DEFAULT_TELEMETRY_WORKERS: usize = 4;

/// 取消信号（可跨线程克隆共享）
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// 查询状态
const QUEUED: u8 = 0;
const RUNNING: u8 = 1;
const DONE: u8 = 2;
/// 调用方已放弃（查询可能仍在执行）
const ABANDONED: u8 = 3;

struct Job {
    tp: TpId,
    deadline: Instant,
    state: Arc<AtomicU8>,
    reply: Sender<Result<u64, TelemetryError>>,
}

struct Pool<P> {
    inner: P,
    /// 正在执行已被放弃的查询的工作线程数
    stuck: AtomicUsize,
}

/// 给任意 [`BandwidthProvider`] 加上超时与取消
pub struct TimeoutProvider<P> {
    pool: Arc<Pool<P>>,
    jobs: Sender<Job>,
    workers: usize,
    timeout: Duration,
    cancel: CancelToken,
}

impl<P: BandwidthProvider + 'static> TimeoutProvider<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self::with_workers(inner, timeout, DEFAULT_TELEMETRY_WORKERS)
    }

    /// 指定工作线程数（至少 1）。
    pub fn with_workers(inner: P, timeout: Duration, workers: usize) -> Self {
        let pool = Arc::new(Pool {
            inner,
            stuck: AtomicUsize::new(0),
        });
        let (jobs, rx) = mpsc::channel::<Job>();
        let rx = Arc::new(Mutex::new(rx));

        let mut spawned = 0;
        for i in 0..workers.max(1) {
            let pool = Arc::clone(&pool);
            let rx = Arc::clone(&rx);
            match thread::Builder::new()
                .name(format!("spce-telemetry-{i}"))
                .spawn(move || worker_loop(&pool, &rx))
            {
                Ok(_) => spawned += 1,
                Err(e) => warn!(error = %e, "无法启动遥测工作线程"),
            }
        }

        Self {
            pool,
            jobs,
            workers: spawned,
            timeout,
            cancel: CancelToken::new(),
        }
    }

    /// 使用外部的取消信号（调用方放弃计算时触发）。
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn inner(&self) -> &P {
        &self.pool.inner
    }

    /// 调用方放弃等待：若查询已在执行，记一个卡住的工作线程。
    fn abandon(&self, state: &AtomicU8) {
        // 先加后减，工作线程的递减总在这次递增之后
        self.pool.stuck.fetch_add(1, Ordering::AcqRel);
        if state
            .compare_exchange(RUNNING, ABANDONED, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            self.pool.stuck.fetch_sub(1, Ordering::AcqRel);
            let _ = state.compare_exchange(QUEUED, ABANDONED, Ordering::AcqRel, Ordering::Acquire);
        }
    }
}

fn worker_loop<P: BandwidthProvider>(pool: &Pool<P>, rx: &Mutex<Receiver<Job>>) {
    loop {
        let job = match rx.lock() {
            Ok(rx) => rx.recv(),
            Err(_) => return,
        };
        // 发送端随 TimeoutProvider 一起释放，空闲线程随之退出
        let Ok(job) = job else {
            return;
        };

        if Instant::now() >= job.deadline
            || job
                .state
                .compare_exchange(QUEUED, RUNNING, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
        {
            trace!(tp = %job.tp, "跳过已放弃的查询");
            continue;
        }

        let reply = panic::catch_unwind(AssertUnwindSafe(|| pool.inner.tx_bandwidth(&job.tp)))
            .unwrap_or_else(|_| Err(TelemetryError::Unavailable("provider panicked".to_string())));

        if job
            .state
            .compare_exchange(RUNNING, DONE, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            pool.stuck.fetch_sub(1, Ordering::AcqRel);
            debug!(tp = %job.tp, "迟到的查询结束，工作线程恢复");
        }
        let _ = job.reply.send(reply);
    }
}

impl<P: BandwidthProvider + 'static> BandwidthProvider for TimeoutProvider<P> {
    #[tracing::instrument(skip(self), fields(tp = %tp, timeout = ?self.timeout))]
    fn tx_bandwidth(&self, tp: &TpId) -> Result<u64, TelemetryError> {
        if self.cancel.is_cancelled() {
            return Err(TelemetryError::Cancelled);
        }
        if self.pool.stuck.load(Ordering::Acquire) >= self.workers {
            debug!("所有工作线程都卡住，直接按不可用处理");
            return Err(TelemetryError::Unavailable(
                "all telemetry workers are stuck".to_string(),
            ));
        }

        let deadline = Instant::now() + self.timeout;
        let state = Arc::new(AtomicU8::new(QUEUED));
        let (reply, rx) = mpsc::channel();
        self.jobs
            .send(Job {
                tp: tp.clone(),
                deadline,
                state: Arc::clone(&state),
                reply,
            })
            .map_err(|_| TelemetryError::Unavailable("telemetry workers exited".to_string()))?;

        loop {
            if self.cancel.is_cancelled() {
                debug!("查询被取消");
                self.abandon(&state);
                return Err(TelemetryError::Cancelled);
            }
            let now = Instant::now();
            if now >= deadline {
                debug!("查询超时");
                self.abandon(&state);
                return Err(TelemetryError::Timeout(self.timeout));
            }
            match rx.recv_timeout((deadline - now).min(CANCEL_POLL)) {
                Ok(reply) => {
                    trace!(reply = ?reply, "收到查询结果");
                    return reply;
                }
                Err(RecvTimeoutError::Timeout) => continue,
                // 工作线程在截止时间之后才取到这个查询，未执行就丢弃了
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(TelemetryError::Timeout(self.timeout));
                }
            }
        }
    }
}
