use crate::market::entity::KlineRecord;
use crate::market::error::MarketError;
use serde_json::Value;

/// # Summary
/// 数据源返回的原始表格，按列名 + 行单元格的松散形态承载。
///
/// # Invariants
/// - 每行单元格数量应与 `columns` 对齐，归一化时按列下标取值。
#[derive(Debug, Clone)]
pub struct RawTable {
    // 数据源给出的列名，顺序与行内单元格一致
    pub columns: Vec<String>,
    // 行数据，单元格保留 JSON 原始类型
    pub rows: Vec<Vec<Value>>,
}

/// # Summary
/// 源列名到标准 schema 的映射表，六列缺一不可。
///
/// # Invariants
/// - 字段顺序与 `KLINE_SCHEMA` 一致：date/open/close/high/low/volume。
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    pub date: &'static str,
    pub open: &'static str,
    pub close: &'static str,
    pub high: &'static str,
    pub low: &'static str,
    pub volume: &'static str,
}

impl ColumnMap {
    fn sources(&self) -> [&'static str; 6] {
        [
            self.date, self.open, self.close, self.high, self.low, self.volume,
        ]
    }
}

/// # Summary
/// 将原始表格按映射表归一化为标准 K 线序列。
///
/// # Logic
/// 1. 空表直接返回空序列（不视为错误）。
/// 2. 校验映射表指向的源列全部存在，缺失则报 `SchemaMismatch` 并列出缺失列。
/// 3. 丢弃映射之外的列；日期列无条件转为字符串，数值列兼容 JSON 数字与数字字符串。
///
/// # Arguments
/// * `table`: 数据源原始表格。
/// * `map`: 源列名映射表。
///
/// # Returns
/// 成功返回归一化序列，列缺失或单元格非法时返回错误。
pub fn normalize(table: &RawTable, map: &ColumnMap) -> Result<Vec<KlineRecord>, MarketError> {
    if table.rows.is_empty() {
        return Ok(Vec::new());
    }

    let mut indices = [0usize; 6];
    let mut missing = Vec::new();
    for (slot, source) in indices.iter_mut().zip(map.sources()) {
        match table.columns.iter().position(|c| c == source) {
            Some(idx) => *slot = idx,
            None => missing.push(source.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(MarketError::SchemaMismatch {
            missing,
            available: table.columns.clone(),
        });
    }

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let [date_idx, open_idx, close_idx, high_idx, low_idx, volume_idx] = indices;
        records.push(KlineRecord {
            date: coerce_string(cell(row, date_idx, map.date)?),
            open: coerce_number(cell(row, open_idx, map.open)?, map.open)?,
            close: coerce_number(cell(row, close_idx, map.close)?, map.close)?,
            high: coerce_number(cell(row, high_idx, map.high)?, map.high)?,
            low: coerce_number(cell(row, low_idx, map.low)?, map.low)?,
            volume: coerce_number(cell(row, volume_idx, map.volume)?, map.volume)?,
        });
    }
    Ok(records)
}

fn cell<'a>(row: &'a [Value], idx: usize, column: &str) -> Result<&'a Value, MarketError> {
    row.get(idx)
        .ok_or_else(|| MarketError::Parse(format!("row too short, no cell for column '{column}'")))
}

/// 日期列无条件转字符串，数字时间戳也照转
fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_number(value: &Value, column: &str) -> Result<f64, MarketError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| MarketError::Parse(format!("column '{column}' is not representable as f64"))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| MarketError::Parse(format!("column '{column}' value '{s}': {e}"))),
        other => Err(MarketError::Parse(format!(
            "column '{column}' has non-numeric value: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CN_MAP: ColumnMap = ColumnMap {
        date: "日期",
        open: "开盘",
        close: "收盘",
        high: "最高",
        low: "最低",
        volume: "成交量",
    };

    fn cn_table() -> RawTable {
        RawTable {
            columns: vec![
                "日期".into(),
                "开盘".into(),
                "收盘".into(),
                "最高".into(),
                "最低".into(),
                "成交量".into(),
                "成交额".into(),
            ],
            rows: vec![vec![
                json!("2023-01-03"),
                json!("1689.0"),
                json!(1720.5),
                json!("1725.0"),
                json!(1680.0),
                json!("31156"),
                json!("5.3e9"),
            ]],
        }
    }

    #[test]
    fn test_normalize_drops_unmapped_columns() {
        let records = normalize(&cn_table(), &CN_MAP).unwrap();
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.date, "2023-01-03");
        assert_eq!(rec.open, 1689.0);
        assert_eq!(rec.close, 1720.5);
        assert_eq!(rec.high, 1725.0);
        assert_eq!(rec.low, 1680.0);
        assert_eq!(rec.volume, 31156.0);
    }

    #[test]
    fn test_normalize_empty_table_is_not_an_error() {
        let table = RawTable {
            columns: Vec::new(),
            rows: Vec::new(),
        };
        assert!(normalize(&table, &CN_MAP).unwrap().is_empty());
    }

    #[test]
    fn test_normalize_reports_missing_columns() {
        let mut table = cn_table();
        table.columns[5] = "量".into();
        let err = normalize(&table, &CN_MAP).unwrap_err();
        match err {
            MarketError::SchemaMismatch { missing, available } => {
                assert_eq!(missing, vec!["成交量".to_string()]);
                assert!(available.contains(&"日期".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_normalize_coerces_numeric_date_to_string() {
        let table = RawTable {
            columns: vec![
                "date".into(),
                "Open".into(),
                "Close".into(),
                "High".into(),
                "Low".into(),
                "Volume".into(),
            ],
            rows: vec![vec![
                json!(20230103),
                json!(130.28),
                json!(125.07),
                json!(130.9),
                json!(124.17),
                json!(112117500.0),
            ]],
        };
        let map = ColumnMap {
            date: "date",
            open: "Open",
            close: "Close",
            high: "High",
            low: "Low",
            volume: "Volume",
        };
        let records = normalize(&table, &map).unwrap();
        assert_eq!(records[0].date, "20230103");
    }

    #[test]
    fn test_normalize_rejects_non_numeric_cell() {
        let mut table = cn_table();
        table.rows[0][1] = json!(null);
        assert!(matches!(
            normalize(&table, &CN_MAP),
            Err(MarketError::Parse(_))
        ));
    }
}
