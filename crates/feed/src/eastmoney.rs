use kline_core::common::{Adjust, DateInput, KlinePeriod, MinutePeriod};
use kline_core::market::entity::KlineRecord;
use kline_core::market::error::MarketError;
use kline_core::market::normalize::{ColumnMap, RawTable, normalize};
use kline_core::market::symbol::ensure_equity_symbol;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const KLINE_URL: &str = "https://push2his.eastmoney.com/api/qt/stock/kline/get";

/// fields2 参数 f51..f61 对应的列名，与 akshare 的行情表头同义
const CN_COLUMNS: [&str; 11] = [
    "日期",
    "开盘",
    "收盘",
    "最高",
    "最低",
    "成交量",
    "成交额",
    "振幅",
    "涨跌幅",
    "涨跌额",
    "换手率",
];

const CN_MAP: ColumnMap = ColumnMap {
    date: "日期",
    open: "开盘",
    close: "收盘",
    high: "最高",
    low: "最低",
    volume: "成交量",
};

/// # Summary
/// 东方财富 A 股行情提供者，覆盖日线/周线/月线与分钟线。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯。
/// - 复权与粒度参数原样编码转发给上游，本层不做重解释。
#[derive(Clone)]
pub struct EastmoneyProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
}

impl EastmoneyProvider {
    /// # Summary
    /// 创建一个新的 EastmoneyProvider 实例。
    ///
    /// # Logic
    /// 1. 配置 10 秒超时。
    /// 2. 设置伪装浏览器 Header (User-Agent) 以减少被拦截风险。
    ///
    /// # Returns
    /// 返回初始化后的 EastmoneyProvider。
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
    /// 抓取日线级别 K 线（日/周/月）。
    ///
    /// # Logic
    /// 1. 校验标的代码，衍生品直接拒绝（不发起网络请求）。
    /// 2. 粒度映射为 klt（101/102/103），复权映射为 fqt，日期压缩为 `YYYYMMDD`。
    /// 3. 请求上游并将响应行归一化为标准序列。
    ///
    /// # Arguments
    /// * `symbol`: 六位股票代码（如 "600519"）。
    /// * `period`: 日线级别粒度。
    /// * `start`: 起始日期（含）。
    /// * `end`: 截止日期（含）。
    /// * `adjust`: 复权方式。
    ///
    /// # Returns
    /// 成功返回归一化 K 线序列，无数据时为空序列。
    pub async fn fetch_daily(
        &self,
        symbol: &str,
        period: KlinePeriod,
        start: &DateInput,
        end: &DateInput,
        adjust: Adjust,
    ) -> Result<Vec<KlineRecord>, MarketError> {
        ensure_equity_symbol(symbol)?;
        let klt = match period {
            KlinePeriod::Daily => "101",
            KlinePeriod::Weekly => "102",
            KlinePeriod::Monthly => "103",
        };
        let beg = start.as_ymd().replace('-', "");
        let end = end.as_ymd().replace('-', "");
        self.request(symbol, klt, fqt_code(adjust), &beg, &end).await
    }

    /// # Summary
    /// 抓取分钟级别 K 线。
    ///
    /// # Logic
    /// 1. 校验标的代码。
    /// 2. 粒度映射为 klt（1/5/15/30/60），时间范围放开，由调用方在本地过滤。
    ///
    /// # Arguments
    /// * `symbol`: 六位股票代码。
    /// * `period`: 分钟粒度。
    /// * `adjust`: 复权方式。
    ///
    /// # Returns
    /// 成功返回归一化 K 线序列（上游能给到的全部历史窗口）。
    pub async fn fetch_minute(
        &self,
        symbol: &str,
        period: MinutePeriod,
        adjust: Adjust,
    ) -> Result<Vec<KlineRecord>, MarketError> {
        ensure_equity_symbol(symbol)?;
        let klt = match period {
            MinutePeriod::Min1 => "1",
            MinutePeriod::Min5 => "5",
            MinutePeriod::Min15 => "15",
            MinutePeriod::Min30 => "30",
            MinutePeriod::Min60 => "60",
        };
        self.request(symbol, klt, fqt_code(adjust), "0", "20500101")
            .await
    }

    async fn request(
        &self,
        symbol: &str,
        klt: &str,
        fqt: &str,
        beg: &str,
        end: &str,
    ) -> Result<Vec<KlineRecord>, MarketError> {
        let secid = secid(symbol);
        let resp = self
            .client
            .get(KLINE_URL)
            .query(&[
                ("secid", secid.as_str()),
                ("fields1", "f1,f2,f3,f4,f5,f6"),
                ("fields2", "f51,f52,f53,f54,f55,f56,f57,f58,f59,f60,f61"),
                ("klt", klt),
                ("fqt", fqt),
                ("beg", beg),
                ("end", end),
            ])
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MarketError::Network(format!("HTTP {}", resp.status())));
        }

        let json: EmResponse = resp
            .json()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        // data 为 null 表示无数据（含未知代码），按空序列处理
        let Some(data) = json.data else {
            return Ok(Vec::new());
        };

        let records = normalize(&klines_to_table(&data.klines), &CN_MAP)?;
        debug!(symbol, rows = records.len(), klt, fqt, "eastmoney kline fetched");
        Ok(records)
    }
}

impl Default for EastmoneyProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// # Summary
/// Eastmoney API 响应顶层结构。
#[derive(Deserialize, Debug)]
struct EmResponse {
    data: Option<EmData>,
}

/// # Summary
/// Eastmoney API K 线数据部分，每行为逗号拼接的字符串。
#[derive(Deserialize, Debug)]
struct EmData {
    klines: Vec<String>,
}

/// secid 前缀：6/9 开头为沪市（1），其余为深市/北交所（0）
fn secid(symbol: &str) -> String {
    if symbol.starts_with('6') || symbol.starts_with('9') {
        format!("1.{symbol}")
    } else {
        format!("0.{symbol}")
    }
}

fn fqt_code(adjust: Adjust) -> &'static str {
    match adjust {
        Adjust::Raw => "0",
        Adjust::Qfq => "1",
        Adjust::Hfq => "2",
    }
}

/// 将逗号拼接的 kline 行还原为按列对齐的原始表格
fn klines_to_table(klines: &[String]) -> RawTable {
    let rows = klines
        .iter()
        .map(|line| {
            line.split(',')
                .map(|cell| Value::String(cell.to_string()))
                .collect()
        })
        .collect();
    RawTable {
        columns: CN_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
    }
}
