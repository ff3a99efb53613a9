use crate::market::error::MarketError;

/// 衍生品标的常见的代码特征，命中任意一个即拒绝。
const DERIVATIVE_MARKERS: [&str; 6] = ["=", "^", ".P", ".W", "-P", "-W"];

/// # Summary
/// 校验标的代码是否为普通股票，过滤指数、期权、权证、优先股等衍生品。
///
/// # Logic
/// 1. 对代码做大小写敏感的子串匹配。
/// 2. 命中任一标记则返回 `InvalidSymbol`。
///
/// # Arguments
/// * `symbol`: 待校验的标的代码。
///
/// # Returns
/// 普通股票返回 `Ok(())`，否则返回 `MarketError::InvalidSymbol`。
pub fn ensure_equity_symbol(symbol: &str) -> Result<(), MarketError> {
    if DERIVATIVE_MARKERS.iter().any(|m| symbol.contains(m)) {
        return Err(MarketError::InvalidSymbol(symbol.to_string()));
    }
    Ok(())
}
