//! A 股与美股 K 线抓取适配器。
//!
//! 数据源：Eastmoney（A 股日线/分钟线）与 Yahoo Finance（美股）。
//! 所有抓取函数均为无状态调用：校验标的 → 请求上游 → 归一化 →
//! （分钟线）区间过滤；上游错误原样上抛，不做重试。

pub mod eastmoney;
pub mod yahoo;

pub use kline_core::common::{Adjust, DateInput, Interval, KlinePeriod, MinutePeriod};
pub use kline_core::indicator::keltner::{KeltnerParams, compute_keltner};
pub use kline_core::market::entity::{KLINE_SCHEMA, KeltnerRecord, KlineRecord};
pub use kline_core::market::error::MarketError;
pub use kline_core::market::series::filter_date_range;

use eastmoney::EastmoneyProvider;
use yahoo::YahooProvider;

/// # Summary
/// 抓取 A 股日线级别 K 线（日/周/月）。
///
/// # Arguments
/// * `symbol`: 六位股票代码（如 "600519"）。
/// * `start` / `end`: 日历日期或 `YYYY-MM-DD` 字符串，闭区间。
/// * `adjust`: 复权方式。
/// * `period`: 粒度。
///
/// # Returns
/// 归一化 K 线序列，日期为上游原样的 `YYYY-MM-DD`。
pub async fn fetch_cn_daily(
    symbol: &str,
    start: impl Into<DateInput>,
    end: impl Into<DateInput>,
    adjust: Adjust,
    period: KlinePeriod,
) -> Result<Vec<KlineRecord>, MarketError> {
    EastmoneyProvider::new()
        .fetch_daily(symbol, period, &start.into(), &end.into(), adjust)
        .await
}

/// # Summary
/// 抓取 A 股分钟级别 K 线，并按可选闭区间过滤。
///
/// # Logic
/// 1. 请求上游全部可得的分钟线窗口。
/// 2. 本地排序后按 [start, end] 过滤（省略的一侧不设限）。
/// 3. 日期统一重写为 `YYYY-MM-DD HH:MM:SS`。
///
/// # Arguments
/// * `symbol`: 六位股票代码。
/// * `start` / `end`: 可选边界。
/// * `adjust`: 复权方式。
/// * `period`: 分钟粒度。
pub async fn fetch_cn_intraday(
    symbol: &str,
    start: Option<DateInput>,
    end: Option<DateInput>,
    adjust: Adjust,
    period: MinutePeriod,
) -> Result<Vec<KlineRecord>, MarketError> {
    let records = EastmoneyProvider::new()
        .fetch_minute(symbol, period, adjust)
        .await?;
    filter_date_range(records, start.as_ref(), end.as_ref())
}

/// # Summary
/// 抓取美股日线级别 K 线。
///
/// # Arguments
/// * `symbol`: Yahoo 代码（如 "AAPL"）。
/// * `start` / `end`: 日历日期或 `YYYY-MM-DD` 字符串。
/// * `interval`: 粒度（1d/1wk/1mo）。
/// * `prepost`: 是否包含盘前盘后数据。
pub async fn fetch_us_daily(
    symbol: &str,
    start: impl Into<DateInput>,
    end: impl Into<DateInput>,
    interval: Interval,
    prepost: bool,
) -> Result<Vec<KlineRecord>, MarketError> {
    YahooProvider::new()
        .fetch_history(symbol, interval, &start.into(), &end.into(), prepost)
        .await
}

/// # Summary
/// 抓取美股分钟级别 K 线。
///
/// # Logic
/// 1. 时间范围已由请求参数限定，本地仅做排序并统一日期格式。
///
/// # Arguments
/// * `symbol`: Yahoo 代码。
/// * `start` / `end`: 日历日期或 `YYYY-MM-DD` 字符串。
/// * `interval`: 分钟粒度（默认用 60m）。
/// * `prepost`: 是否包含盘前盘后数据。
pub async fn fetch_us_intraday(
    symbol: &str,
    start: impl Into<DateInput>,
    end: impl Into<DateInput>,
    interval: Interval,
    prepost: bool,
) -> Result<Vec<KlineRecord>, MarketError> {
    let records = YahooProvider::new()
        .fetch_history(symbol, interval, &start.into(), &end.into(), prepost)
        .await?;
    filter_date_range(records, None, None)
}
