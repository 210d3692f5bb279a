//! 到期时间计算
//!
//! 纯函数：给定当前到期时间与维护频率，计算下一次到期时间。
//! 下次到期时间永远由上一次到期时间推导，而不是由"现在"推导，
//! 错过多个周期也不会产生漂移。

use chrono::{DateTime, Days, Months, Utc};

use hmms_core::models::Frequency;

/// 计算下一次到期时间
///
/// - `Daily` → 当前时间 + 1个日历日
/// - `Weekly` → 当前时间 + 7个日历日
/// - `Monthly` → 当前时间 + 1个日历月（保持日号，目标月无该日时
///   收敛到月末：2026-01-31 → 2026-02-28）
/// - `Yearly` → 当前时间 + 12个日历月（闰日同样收敛：
///   2024-02-29 → 2025-02-28）
pub fn next_due(current: DateTime<Utc>, frequency: Frequency) -> DateTime<Utc> {
    let next = match frequency {
        Frequency::Daily => current.checked_add_days(Days::new(1)),
        Frequency::Weekly => current.checked_add_days(Days::new(7)),
        Frequency::Monthly => current.checked_add_months(Months::new(1)),
        Frequency::Yearly => current.checked_add_months(Months::new(12)),
    };
    // chrono可表示范围耗尽时保持原值
    next.unwrap_or(current)
}

/// 计划创建时的首次到期时间：创建时刻 + 一个频率周期
pub fn initial_due(now: DateTime<Utc>, frequency: Frequency) -> DateTime<Utc> {
    next_due(now, frequency)
}
