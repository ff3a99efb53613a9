use crate::market::entity::{KeltnerRecord, KlineRecord};
use crate::market::error::MarketError;
use crate::market::series::{DATETIME_FMT, sort_with_timestamps};
use std::collections::VecDeque;

/// # Summary
/// 肯特纳通道参数。
///
/// # Invariants
/// - `window` 必须大于等于 1。
#[derive(Debug, Clone, Copy)]
pub struct KeltnerParams {
    // EWMA 跨度，同时作为 ATR 的滑动窗口长度
    pub window: usize,
    // 上下轨相对中轨的 ATR 倍数
    pub multiplier: f64,
}

impl Default for KeltnerParams {
    fn default() -> Self {
        Self {
            window: 20,
            multiplier: 2.0,
        }
    }
}

/// # Summary
/// 由 K 线序列计算肯特纳通道（中轨 / ATR / 上轨 / 下轨）。
///
/// # Logic
/// 1. 按日期升序稳定排序（已有序时无副作用）。
/// 2. 逐根计算典型价格 `(high + low + close) / 3`。
/// 3. 中轨为典型价格的递归 EWMA：首根为种子，`alpha = 2 / (window + 1)`，
///    不做初始偏差修正。
/// 4. 真实波幅取 `max(high-low, |high-prev_close|, |low-prev_close|)`；
///    首根没有前收盘价，只取 `high-low`。
/// 5. ATR 为真实波幅的滑动简单均值，起始阶段窗口随样本数收缩
///    （第 i 根取 `min(i+1, window)` 个样本）。
/// 6. 上下轨为中轨 ± `multiplier * atr`。
///
/// # Arguments
/// * `records`: 输入 K 线序列（被消费）；空序列返回空结果。
/// * `params`: 窗口与倍数参数。
///
/// # Returns
/// 与输入等长且同序的通道序列，日期重写为 `YYYY-MM-DD HH:MM:SS`；
/// `window = 0` 返回 `InvalidParameter`，日期非法返回 `Parse`。
pub fn compute_keltner(
    records: Vec<KlineRecord>,
    params: &KeltnerParams,
) -> Result<Vec<KeltnerRecord>, MarketError> {
    if params.window == 0 {
        return Err(MarketError::InvalidParameter(
            "keltner window must be >= 1".to_string(),
        ));
    }
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let sorted = sort_with_timestamps(records)?;
    let alpha = 2.0 / (params.window as f64 + 1.0);

    let mut middle = 0.0;
    let mut seeded = false;
    let mut true_ranges: VecDeque<f64> = VecDeque::with_capacity(params.window);
    let mut tr_sum = 0.0;
    let mut prev_close: Option<f64> = None;

    let mut output = Vec::with_capacity(sorted.len());
    for (ts, record) in sorted {
        let typical = (record.high + record.low + record.close) / 3.0;
        middle = if seeded {
            alpha * typical + (1.0 - alpha) * middle
        } else {
            seeded = true;
            typical
        };

        let true_range = match prev_close {
            // 首根没有前收盘价，退化为当根振幅
            None => record.high - record.low,
            Some(pc) => (record.high - record.low)
                .max((record.high - pc).abs())
                .max((record.low - pc).abs()),
        };
        if true_ranges.len() == params.window {
            if let Some(oldest) = true_ranges.pop_front() {
                tr_sum -= oldest;
            }
        }
        true_ranges.push_back(true_range);
        tr_sum += true_range;
        let atr = tr_sum / true_ranges.len() as f64;

        prev_close = Some(record.close);
        output.push(KeltnerRecord {
            date: ts.format(DATETIME_FMT).to_string(),
            open: record.open,
            close: record.close,
            high: record.high,
            low: record.low,
            volume: record.volume,
            middle,
            atr,
            upper: middle + params.multiplier * atr,
            lower: middle - params.multiplier * atr,
        });
    }
    Ok(output)
}
