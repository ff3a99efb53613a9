use crate::common::DateInput;
use crate::market::entity::KlineRecord;
use crate::market::error::MarketError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// 区间过滤与指标输出统一使用的日期序列化格式
pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// # Summary
/// 解析 K 线记录的日期字段，兼容三种常见形态。
///
/// # Logic
/// 1. 依次尝试 `%Y-%m-%d %H:%M:%S`、`%Y-%m-%d %H:%M`（Eastmoney 分钟线）、`%Y-%m-%d`。
/// 2. 纯日期按当日零点处理。
///
/// # Returns
/// 成功返回 `NaiveDateTime`，三种格式都不匹配时返回 `MarketError::Parse`。
pub fn parse_kline_date(raw: &str) -> Result<NaiveDateTime, MarketError> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, DATETIME_FMT) {
        return Ok(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M") {
        return Ok(ts);
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN));
    }
    Err(MarketError::Parse(format!("unrecognized date '{raw}'")))
}

/// 解析全部日期并按时间升序稳定排序，供过滤与指标共用
pub(crate) fn sort_with_timestamps(
    records: Vec<KlineRecord>,
) -> Result<Vec<(NaiveDateTime, KlineRecord)>, MarketError> {
    let mut parsed = Vec::with_capacity(records.len());
    for record in records {
        let ts = parse_kline_date(&record.date)?;
        parsed.push((ts, record));
    }
    parsed.sort_by_key(|(ts, _)| *ts);
    Ok(parsed)
}

/// # Summary
/// 按可选的闭区间 [start, end] 过滤 K 线序列。
///
/// # Logic
/// 1. 解析日期并升序排序。
/// 2. 边界取给定日历日的零点；省略的一侧不设限。
/// 3. 输出日期统一重写为 `YYYY-MM-DD HH:MM:SS`。
///
/// # Arguments
/// * `records`: 输入序列（被消费）。
/// * `start`: 可选起始日期（含）。
/// * `end`: 可选截止日期（含，按零点比较）。
///
/// # Returns
/// 成功返回过滤后的新序列，日期非法时返回 `MarketError::Parse`。
pub fn filter_date_range(
    records: Vec<KlineRecord>,
    start: Option<&DateInput>,
    end: Option<&DateInput>,
) -> Result<Vec<KlineRecord>, MarketError> {
    let lower = start.map(DateInput::midnight).transpose()?;
    let upper = end.map(DateInput::midnight).transpose()?;

    let mut result = Vec::new();
    for (ts, mut record) in sort_with_timestamps(records)? {
        if lower.is_some_and(|bound| ts < bound) {
            continue;
        }
        if upper.is_some_and(|bound| ts > bound) {
            continue;
        }
        record.date = ts.format(DATETIME_FMT).to_string();
        result.push(record);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str) -> KlineRecord {
        KlineRecord {
            date: date.to_string(),
            open: 10.0,
            close: 11.0,
            high: 12.0,
            low: 9.0,
            volume: 1000.0,
        }
    }

    #[test]
    fn test_parse_kline_date_formats() {
        assert!(parse_kline_date("2023-01-03").is_ok());
        assert!(parse_kline_date("2023-01-03 10:30").is_ok());
        assert!(parse_kline_date("2023-01-03 10:30:00").is_ok());
        assert!(parse_kline_date("03/01/2023").is_err());
    }

    #[test]
    fn test_filter_inclusive_bounds() {
        let records: Vec<KlineRecord> = (1..=10)
            .map(|day| record(&format!("2023-01-{day:02}")))
            .collect();

        let start = DateInput::from("2023-01-03");
        let end = DateInput::from("2023-01-05");
        let filtered = filter_date_range(records, Some(&start), Some(&end)).unwrap();

        let dates: Vec<&str> = filtered.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(
            dates,
            vec![
                "2023-01-03 00:00:00",
                "2023-01-04 00:00:00",
                "2023-01-05 00:00:00",
            ]
        );
    }

    #[test]
    fn test_filter_unbounded_sides() {
        let records = vec![record("2023-01-02"), record("2023-01-01")];
        let filtered = filter_date_range(records, None, None).unwrap();
        // 无边界时仍然排序并重写日期格式
        assert_eq!(filtered[0].date, "2023-01-01 00:00:00");
        assert_eq!(filtered[1].date, "2023-01-02 00:00:00");
    }

    #[test]
    fn test_filter_end_bound_is_midnight() {
        let records = vec![
            record("2023-01-05 00:00:00"),
            record("2023-01-05 10:30:00"),
            record("2023-01-04 14:00:00"),
        ];
        let end = DateInput::from("2023-01-05");
        let filtered = filter_date_range(records, None, Some(&end)).unwrap();
        // 截止边界取零点：当日盘中的分钟线不在区间内
        let dates: Vec<&str> = filtered.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2023-01-04 14:00:00", "2023-01-05 00:00:00"]);
    }
}
