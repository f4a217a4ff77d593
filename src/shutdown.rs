//! 优雅退出管理模块
//!
//! 监听 SIGINT/SIGTERM（Windows 下为 Ctrl+C），把第一个退出原因广播给所有等待者。

use tokio::sync::watch;
use tracing::{debug, info};

/// 退出原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// 用户中断信号 (Ctrl+C)
    Interrupt,
    /// 终止信号 (SIGTERM)
    Terminate,
    /// 应用请求退出
    Application,
}

/// 优雅退出错误类型
#[derive(Debug, thiserror::Error)]
pub enum ShutdownError {
    #[error("信号设置失败: {0}")]
    SignalSetup(String),
}

/// 优雅退出管理器
///
/// 克隆后共享同一个状态；只有第一次触发生效。
#[derive(Debug, Clone)]
pub struct ShutdownManager {
    tx: watch::Sender<Option<ShutdownReason>>,
}

impl ShutdownManager {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    /// 触发优雅退出（重复触发被忽略）
    pub fn trigger_shutdown(&self, reason: ShutdownReason) {
        let first = self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        });
        if first {
            info!("触发优雅退出: {:?}", reason);
        } else {
            debug!("重复的退出信号被忽略: {:?}", reason);
        }
    }

    /// 等待退出信号；已触发时立即返回
    pub async fn wait_for_shutdown(&self) -> ShutdownReason {
        let mut rx = self.tx.subscribe();
        match rx.wait_for(Option::is_some).await {
            Ok(reason) => (*reason).unwrap_or(ShutdownReason::Application),
            // 发送端与 self 同生命周期，不会先于接收端关闭
            Err(_) => ShutdownReason::Application,
        }
    }

    /// 启动信号处理器
    pub fn start_signal_handler(&self) -> Result<(), ShutdownError> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            let mut sigint = signal(SignalKind::interrupt())
                .map_err(|e| ShutdownError::SignalSetup(e.to_string()))?;
            let mut sigterm = signal(SignalKind::terminate())
                .map_err(|e| ShutdownError::SignalSetup(e.to_string()))?;

            let manager = self.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = sigint.recv() => {
                        info!("接收到SIGINT信号 (Ctrl+C)");
                        manager.trigger_shutdown(ShutdownReason::Interrupt);
                    }
                    _ = sigterm.recv() => {
                        info!("接收到SIGTERM信号");
                        manager.trigger_shutdown(ShutdownReason::Terminate);
                    }
                }
            });
        }

        #[cfg(windows)]
        {
            let manager = self.clone();
            tokio::spawn(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("监听Ctrl+C信号失败: {}", e);
                    return;
                }
                info!("接收到Ctrl+C信号");
                manager.trigger_shutdown(ShutdownReason::Interrupt);
            });
        }

        Ok(())
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn first_reason_wins() {
        let manager = ShutdownManager::new();
        manager.trigger_shutdown(ShutdownReason::Interrupt);
        manager.trigger_shutdown(ShutdownReason::Terminate);

        assert_eq!(manager.wait_for_shutdown().await, ShutdownReason::Interrupt);
    }

    #[tokio::test]
    async fn waiters_registered_before_trigger_are_woken() {
        let manager = ShutdownManager::new();
        let waiter = {
            let m = manager.clone();
            tokio::spawn(async move { m.wait_for_shutdown().await })
        };
        tokio::task::yield_now().await;
        manager.trigger_shutdown(ShutdownReason::Application);
        assert_eq!(waiter.await.expect("join"), ShutdownReason::Application);
    }

    #[tokio::test]
    async fn waiting_without_trigger_times_out() {
        let manager = ShutdownManager::new();
        let result =
            tokio::time::timeout(Duration::from_millis(50), manager.wait_for_shutdown()).await;
        assert!(result.is_err());
    }
}
