use chrono::{DateTime, TimeZone, Utc};
use kline_core::common::{DateInput, Interval};
use kline_core::market::entity::KlineRecord;
use kline_core::market::error::MarketError;
use kline_core::market::normalize::{ColumnMap, RawTable, normalize};
use kline_core::market::series::DATETIME_FMT;
use kline_core::market::symbol::ensure_equity_symbol;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// Yahoo 原始列名（首字母大写），归一化时映射回标准 schema
const US_COLUMNS: [&str; 6] = ["date", "Open", "Close", "High", "Low", "Volume"];

const US_MAP: ColumnMap = ColumnMap {
    date: "date",
    open: "Open",
    close: "Close",
    high: "High",
    low: "Low",
    volume: "Volume",
};

/// # Summary
/// Yahoo Finance 美股行情提供者。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯。
/// - interval 与 prepost 参数原样转发给 chart API，不做重解释。
#[derive(Clone)]
pub struct YahooProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
}

impl YahooProvider {
    /// # Summary
    /// 创建一个新的 YahooProvider 实例。
    ///
    /// # Logic
    /// 1. 配置 10 秒超时。
    /// 2. 设置伪装浏览器 Header (User-Agent) 以减少被拦截风险。
    ///
    /// # Returns
    /// 返回初始化后的 YahooProvider。
    pub fn new() -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".parse().unwrap()
        );

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .default_headers(headers)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// # Summary
    /// 从 Yahoo chart API 抓取指定区间的 K 线历史数据。
    ///
    /// # Logic
    /// 1. 校验标的代码，衍生品直接拒绝（不发起网络请求）。
    /// 2. 区间边界取零点换算为秒级时间戳（period1/period2）。
    /// 3. 请求并解析嵌套 JSON；chart.error 映射为 `Unknown`，缺失结果映射为 `NotFound`。
    /// 4. 列式数组重组为原始表格后走统一归一化；含空洞的行（停牌等）被丢弃。
    ///
    /// # Arguments
    /// * `symbol`: Yahoo 代码（如 "AAPL"）。
    /// * `interval`: K 线粒度。
    /// * `start`: 起始日期（含）。
    /// * `end`: 截止日期。
    /// * `prepost`: 是否包含盘前盘后数据。
    ///
    /// # Returns
    /// 成功返回归一化 K 线序列，失败返回 MarketError。
    pub async fn fetch_history(
        &self,
        symbol: &str,
        interval: Interval,
        start: &DateInput,
        end: &DateInput,
        prepost: bool,
    ) -> Result<Vec<KlineRecord>, MarketError> {
        ensure_equity_symbol(symbol)?;

        let period1 = start.midnight()?.and_utc().timestamp();
        let period2 = end.midnight()?.and_utc().timestamp();
        let url = format!("https://query1.finance.yahoo.com/v8/finance/chart/{symbol}");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("period1", &period1.to_string()),
                ("period2", &period2.to_string()),
                ("interval", &interval.to_string()),
                ("includePrePost", if prepost { "true" } else { "false" }),
            ])
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MarketError::Network(format!("HTTP {}", resp.status())));
        }

        let json: YahooResponse = resp
            .json()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        if let Some(err) = json.chart.error {
            return Err(MarketError::Unknown(err.description));
        }

        let result = json
            .chart
            .result
            .and_then(|mut r| r.pop())
            .ok_or(MarketError::NotFound)?;

        let records = normalize(&chart_to_table(&result, interval)?, &US_MAP)?;
        debug!(symbol, rows = records.len(), %interval, "yahoo chart fetched");
        Ok(records)
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// # Summary
/// Yahoo API 响应顶层结构。
///
/// # Invariants
/// - 映射自 Yahoo v8 chart 接口。
#[derive(Deserialize, Debug)]
struct YahooResponse {
    chart: YahooChart,
}

/// # Summary
/// Yahoo API 图表数据部分。
#[derive(Deserialize, Debug)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

/// # Summary
/// Yahoo API 错误详情。
#[derive(Deserialize, Debug)]
struct YahooError {
    description: String,
}

/// # Summary
/// Yahoo API 单个时间序列结果。
#[derive(Deserialize, Debug)]
struct YahooResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

/// # Summary
/// Yahoo API 指标容器。
#[derive(Deserialize, Debug)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

/// # Summary
/// Yahoo API 原始报价数据，列式数组逐项对齐 timestamp。
#[derive(Deserialize, Debug)]
struct YahooQuote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

/// 列式数组重组为行式原始表格；任一 OHLCV 为空的行（停牌时段）直接丢弃
fn chart_to_table(result: &YahooResult, interval: Interval) -> Result<RawTable, MarketError> {
    let quote = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| MarketError::Parse("No quote data".into()))?;

    let date_fmt = if is_intraday(interval) {
        DATETIME_FMT
    } else {
        "%Y-%m-%d"
    };

    let mut rows = Vec::with_capacity(result.timestamp.len());
    let mut dropped = 0usize;
    for (i, &ts) in result.timestamp.iter().enumerate() {
        if let (Some(o), Some(h), Some(l), Some(c), Some(v)) = (
            quote.open.get(i).and_then(|x| *x),
            quote.high.get(i).and_then(|x| *x),
            quote.low.get(i).and_then(|x| *x),
            quote.close.get(i).and_then(|x| *x),
            quote.volume.get(i).and_then(|x| *x),
        ) {
            let time: DateTime<Utc> = Utc
                .timestamp_opt(ts, 0)
                .single()
                .ok_or_else(|| MarketError::Parse(format!("invalid timestamp {ts}")))?;
            rows.push(vec![
                Value::String(time.format(date_fmt).to_string()),
                json!(o),
                json!(c),
                json!(h),
                json!(l),
                json!(v),
            ]);
        } else {
            dropped += 1;
        }
    }
    if dropped > 0 {
        debug!(dropped, "yahoo chart rows with null cells dropped");
    }

    Ok(RawTable {
        columns: US_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
    })
}

fn is_intraday(interval: Interval) -> bool {
    !matches!(
        interval,
        Interval::Day1 | Interval::Week1 | Interval::Month1
    )
}
