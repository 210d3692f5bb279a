use std::sync::Arc;

use anyhow::Result;
use hmms_core::AppConfig;
use hmms_dispatcher::{NotificationDispatcher, PlanScanner};
use hmms_infrastructure::{
    create_embedded_pool, ExpoPushClient, InMemoryRoomBroadcaster, SqlitePlanRepository,
    SqliteUserRepository, SqliteWorkOrderRepository,
};
use tokio::sync::broadcast;
use tracing::{error, info};

/// 主应用程序
///
/// 组装存储、通知通道与扫描器，并驱动扫描循环。
pub struct Application {
    config: AppConfig,
    scanner: Arc<PlanScanner>,
}

impl Application {
    /// 创建新的应用实例
    pub async fn new(config: AppConfig) -> Result<Self> {
        info!("初始化应用程序");

        // 创建嵌入式数据库连接池
        info!("连接数据库: {}", config.database.url);
        let pool = create_embedded_pool(&config.database).await?;
        info!("数据库连接成功");

        // 创建Repository实例
        let plan_repo = Arc::new(SqlitePlanRepository::new(pool.clone()));
        let work_order_repo = Arc::new(SqliteWorkOrderRepository::new(pool.clone()));
        let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));

        // 创建通知通道
        let broadcaster = Arc::new(InMemoryRoomBroadcaster::new());
        let push_gateway = Arc::new(ExpoPushClient::new(&config.push)?);

        // 创建通知分发器和扫描器
        let dispatcher = Arc::new(NotificationDispatcher::new(
            user_repo,
            broadcaster,
            push_gateway,
        ));
        let scanner = Arc::new(PlanScanner::new(
            plan_repo,
            work_order_repo,
            dispatcher,
            config.scheduler.system_user_id.clone(),
        ));

        Ok(Self { config, scanner })
    }

    /// 运行应用程序，直到收到关闭信号
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        if !self.config.scheduler.enabled {
            info!("扫描器被禁用，等待关闭信号");
            let _ = shutdown_rx.recv().await;
            return Ok(());
        }

        info!(
            "启动维护计划扫描循环，间隔 {} 秒",
            self.config.scheduler.scan_interval_seconds
        );

        run_scanner_loop(
            Arc::clone(&self.scanner),
            self.config.scheduler.scan_interval_seconds,
            shutdown_rx,
        )
        .await;

        info!("扫描循环已停止");
        Ok(())
    }
}

/// 运行扫描器循环
///
/// 每个tick的错误在这里被捕获记录，循环继续；
/// 仍然到期的计划由下一个tick重试。
async fn run_scanner_loop(
    scanner: Arc<PlanScanner>,
    interval_seconds: u64,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_seconds));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match scanner.scan_and_generate().await {
                    Ok(work_orders) => {
                        if !work_orders.is_empty() {
                            info!("本次扫描生成了 {} 个工单", work_orders.len());
                        }
                    }
                    Err(e) => {
                        error!("预防性维护扫描失败: {e}");
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                info!("扫描循环收到关闭信号");
                break;
            }
        }
    }
}
