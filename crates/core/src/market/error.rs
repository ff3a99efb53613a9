use thiserror::Error;

/// # Summary
/// 市场数据域错误枚举，覆盖本地校验失败与上游数据源故障两类。
///
/// # Invariants
/// - 上游错误（网络、解析、数据缺失）原样上抛，本层不做重试或降级。
#[derive(Error, Debug)]
pub enum MarketError {
    // 标的代码疑似衍生品（指数、期权、权证、优先股等）
    #[error("symbol '{0}' looks like a derivative instrument; provide a common stock ticker instead")]
    InvalidSymbol(String),
    // 上游返回的表缺少映射所需的列
    #[error("upstream data is missing expected columns: {missing:?}; available columns: {available:?}")]
    SchemaMismatch {
        missing: Vec<String>,
        available: Vec<String>,
    },
    // 调用方给出的参数非法（如 window = 0）
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    // 网络层错误，包含底层 HTTP 客户端错误信息
    #[error("network error: {0}")]
    Network(String),
    // 数据解析错误，如 JSON 格式或日期格式不匹配
    #[error("parse error: {0}")]
    Parse(String),
    // 请求的数据未找到 (404 或内容为空)
    #[error("data not found")]
    NotFound,
    // 未知或未分类的错误
    #[error("unknown error: {0}")]
    Unknown(String),
}
