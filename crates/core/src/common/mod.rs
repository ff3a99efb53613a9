use crate::market::error::MarketError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// # Summary
/// 查询日期入参，兼容日历日期与 `YYYY-MM-DD` 字符串两种形态。
///
/// # Invariants
/// - 字符串形态必须能按 `%Y-%m-%d` 解析，否则在使用时报 `Parse` 错误。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DateInput {
    // 日历日期
    Calendar(NaiveDate),
    // "YYYY-MM-DD" 字符串
    Text(String),
}

impl DateInput {
    /// 归一化为 `YYYY-MM-DD` 字符串
    pub fn as_ymd(&self) -> String {
        match self {
            DateInput::Calendar(d) => d.format("%Y-%m-%d").to_string(),
            DateInput::Text(s) => s.clone(),
        }
    }

    /// # Summary
    /// 解析为当日零点的时间戳，用作区间过滤的边界。
    ///
    /// # Returns
    /// 成功返回 `NaiveDateTime`，字符串非法时返回 `MarketError::Parse`。
    pub fn midnight(&self) -> Result<NaiveDateTime, MarketError> {
        let date = match self {
            DateInput::Calendar(d) => *d,
            DateInput::Text(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|e| MarketError::Parse(format!("invalid date '{s}': {e}")))?,
        };
        Ok(date.and_time(NaiveTime::MIN))
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Calendar(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

/// # Summary
/// 复权方式枚举。
///
/// # Invariants
/// - 各数据源自行决定如何编码（如 Eastmoney 的 fqt 参数），本层仅表达语义。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Adjust {
    // 不复权
    Raw,
    // 前复权
    Qfq,
    // 后复权
    Hfq,
}

impl FromStr for Adjust {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "raw" | "bfq" => Ok(Adjust::Raw),
            "qfq" => Ok(Adjust::Qfq),
            "hfq" => Ok(Adjust::Hfq),
            _ => Err(format!("Unknown Adjust: {}", s)),
        }
    }
}

impl fmt::Display for Adjust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjust::Raw => write!(f, "raw"),
            Adjust::Qfq => write!(f, "qfq"),
            Adjust::Hfq => write!(f, "hfq"),
        }
    }
}

/// # Summary
/// A 股日线级别 K 线周期。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum KlinePeriod {
    // 日线
    Daily,
    // 周线
    Weekly,
    // 月线
    Monthly,
}

impl FromStr for KlinePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "1d" => Ok(KlinePeriod::Daily),
            "weekly" | "1wk" => Ok(KlinePeriod::Weekly),
            "monthly" | "1mo" => Ok(KlinePeriod::Monthly),
            _ => Err(format!("Unknown KlinePeriod: {}", s)),
        }
    }
}

impl fmt::Display for KlinePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KlinePeriod::Daily => write!(f, "daily"),
            KlinePeriod::Weekly => write!(f, "weekly"),
            KlinePeriod::Monthly => write!(f, "monthly"),
        }
    }
}

/// # Summary
/// A 股分钟级别 K 线周期。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MinutePeriod {
    Min1,
    Min5,
    Min15,
    Min30,
    Min60,
}

impl FromStr for MinutePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "1m" => Ok(MinutePeriod::Min1),
            "5" | "5m" => Ok(MinutePeriod::Min5),
            "15" | "15m" => Ok(MinutePeriod::Min15),
            "30" | "30m" => Ok(MinutePeriod::Min30),
            "60" | "60m" => Ok(MinutePeriod::Min60),
            _ => Err(format!("Unknown MinutePeriod: {}", s)),
        }
    }
}

impl fmt::Display for MinutePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinutePeriod::Min1 => write!(f, "1"),
            MinutePeriod::Min5 => write!(f, "5"),
            MinutePeriod::Min15 => write!(f, "15"),
            MinutePeriod::Min30 => write!(f, "30"),
            MinutePeriod::Min60 => write!(f, "60"),
        }
    }
}

/// # Summary
/// Yahoo Finance 支持的 K 线粒度。
///
/// # Invariants
/// - `Display` 输出与 Yahoo chart API 的 `interval` 参数一一对应。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Interval {
    Min1,
    Min2,
    Min5,
    Min15,
    Min30,
    Min60,
    Min90,
    Day1,
    Week1,
    Month1,
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" => Ok(Interval::Min1),
            "2m" => Ok(Interval::Min2),
            "5m" => Ok(Interval::Min5),
            "15m" => Ok(Interval::Min15),
            "30m" => Ok(Interval::Min30),
            "60m" => Ok(Interval::Min60),
            "90m" => Ok(Interval::Min90),
            "1d" => Ok(Interval::Day1),
            "1wk" => Ok(Interval::Week1),
            "1mo" => Ok(Interval::Month1),
            _ => Err(format!("Unknown Interval: {}", s)),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Min1 => write!(f, "1m"),
            Interval::Min2 => write!(f, "2m"),
            Interval::Min5 => write!(f, "5m"),
            Interval::Min15 => write!(f, "15m"),
            Interval::Min30 => write!(f, "30m"),
            Interval::Min60 => write!(f, "60m"),
            Interval::Min90 => write!(f, "90m"),
            Interval::Day1 => write!(f, "1d"),
            Interval::Week1 => write!(f, "1wk"),
            Interval::Month1 => write!(f, "1mo"),
        }
    }
}
