use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::MaintenanceError;

/// 预防性维护计划
///
/// 表示一条周期性维护排程，绑定可选的设备与负责人。
///
/// # 字段说明
///
/// - `id`: 计划的唯一标识符（UUID字符串）
/// - `name`: 计划名称，生成的工单标题为 "PM: {name}"
/// - `description`: 计划描述，复制到生成的工单中
/// - `frequency`: 维护频率（每日/每周/每月/每年）
/// - `asset_id`: 关联设备ID（弱引用，仅用于查询）
/// - `assigned_to_id`: 负责技术员的用户ID
/// - `next_due`: 下一次触发时间，仅由扫描器或管理员编辑推进
/// - `is_active`: 非活跃计划永远不会被扫描
///
/// # 使用示例
///
/// ```rust
/// use hmms_core::models::{Frequency, PreventivePlan};
/// use chrono::{Duration, Utc};
///
/// let plan = PreventivePlan::new(
///     "CT扫描仪月度保养".to_string(),
///     Some("检查冷却系统和校准参数".to_string()),
///     Frequency::Monthly,
///     None,
///     None,
///     Utc::now() + Duration::days(30),
/// );
/// assert!(plan.is_active);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreventivePlan {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub asset_id: Option<String>,
    pub assigned_to_id: Option<String>,
    pub next_due: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PreventivePlan {
    /// 创建新的维护计划
    ///
    /// 首次到期时间由调用方计算（创建时刻 + 一个频率周期）。
    pub fn new(
        name: String,
        description: Option<String>,
        frequency: Frequency,
        asset_id: Option<String>,
        assigned_to_id: Option<String>,
        next_due: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            frequency,
            asset_id,
            assigned_to_id,
            next_due,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// 检查计划在给定时间点是否到期
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.next_due <= now
    }
}

/// 维护频率
///
/// 封闭枚举：未知的频率值在解析/解码边界即被拒绝，
/// 不存在的频率无法进入系统。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Frequency {
    #[serde(rename = "DAILY")]
    Daily,
    #[serde(rename = "WEEKLY")]
    Weekly,
    #[serde(rename = "MONTHLY")]
    Monthly,
    #[serde(rename = "YEARLY")]
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        }
    }
}

impl FromStr for Frequency {
    type Err = MaintenanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DAILY" => Ok(Frequency::Daily),
            "WEEKLY" => Ok(Frequency::Weekly),
            "MONTHLY" => Ok(Frequency::Monthly),
            "YEARLY" => Ok(Frequency::Yearly),
            other => Err(MaintenanceError::InvalidFrequency(other.to_string())),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl sqlx::Type<sqlx::Sqlite> for Frequency {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <str as sqlx::Type<sqlx::Sqlite>>::type_info()
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for Frequency {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Frequency::from_str(s).map_err(|_| format!("Invalid frequency: {s}").into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for Frequency {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <&str as sqlx::Encode<sqlx::Sqlite>>::encode(self.as_str(), buf)
    }
}

/// 计划过滤器
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    pub is_active: Option<bool>,
    pub assigned_to_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_frequency_from_str() {
        assert_eq!(Frequency::from_str("DAILY").unwrap(), Frequency::Daily);
        assert_eq!(Frequency::from_str("WEEKLY").unwrap(), Frequency::Weekly);
        assert_eq!(Frequency::from_str("MONTHLY").unwrap(), Frequency::Monthly);
        assert_eq!(Frequency::from_str("YEARLY").unwrap(), Frequency::Yearly);
    }

    #[test]
    fn test_frequency_rejects_unknown_values() {
        assert!(Frequency::from_str("HOURLY").is_err());
        assert!(Frequency::from_str("daily").is_err());
        assert!(Frequency::from_str("").is_err());
    }

    #[test]
    fn test_frequency_serde_wire_format() {
        let json = serde_json::to_string(&Frequency::Monthly).unwrap();
        assert_eq!(json, "\"MONTHLY\"");
        let parsed: Frequency = serde_json::from_str("\"WEEKLY\"").unwrap();
        assert_eq!(parsed, Frequency::Weekly);
        assert!(serde_json::from_str::<Frequency>("\"QUARTERLY\"").is_err());
    }

    #[test]
    fn test_plan_is_due() {
        let now = Utc::now();
        let mut plan = PreventivePlan::new(
            "呼吸机周检".to_string(),
            None,
            Frequency::Weekly,
            None,
            None,
            now - Duration::minutes(1),
        );
        assert!(plan.is_due(now));

        plan.is_active = false;
        assert!(!plan.is_due(now));

        plan.is_active = true;
        plan.next_due = now + Duration::days(1);
        assert!(!plan.is_due(now));
    }
}
