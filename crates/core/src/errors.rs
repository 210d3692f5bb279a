use thiserror::Error;

/// 维护引擎错误类型定义
#[derive(Debug, Error)]
pub enum MaintenanceError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("维护计划未找到: {id}")]
    PlanNotFound { id: String },

    #[error("工单未找到: {id}")]
    WorkOrderNotFound { id: String },

    #[error("无效的维护频率: {0}")]
    InvalidFrequency(String),

    #[error("推送网关错误: {0}")]
    PushGateway(String),

    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 统一的Result类型
pub type MaintenanceResult<T> = std::result::Result<T, MaintenanceError>;
