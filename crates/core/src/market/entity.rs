use serde::{Deserialize, Serialize};

/// 归一化后的标准列名，顺序即输出字段顺序。
pub const KLINE_SCHEMA: [&str; 6] = ["date", "open", "close", "high", "low", "volume"];

/// # Summary
/// 单根 K 线数据实体，字段已归一化为统一 schema。
///
/// # Invariants
/// - `date` 为 `YYYY-MM-DD`、`YYYY-MM-DD HH:MM` 或 `YYYY-MM-DD HH:MM:SS`。
/// - 五个数值字段必须有限（非 NaN / 非无穷）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KlineRecord {
    // 交易日期或分钟时间戳
    pub date: String,
    // 开盘价
    pub open: f64,
    // 收盘价
    pub close: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 成交量
    pub volume: f64,
}

/// # Summary
/// 叠加肯特纳通道指标后的 K 线实体。
///
/// # Invariants
/// - `upper = middle + k * atr`，`lower = middle - k * atr`（k 为倍数参数）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeltnerRecord {
    pub date: String,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    // 中轨：典型价格的 EWMA
    pub middle: f64,
    // 平均真实波幅
    pub atr: f64,
    // 上轨
    pub upper: f64,
    // 下轨
    pub lower: f64,
}
