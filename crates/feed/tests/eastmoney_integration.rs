use kline_feed::{Adjust, KlinePeriod, MarketError, MinutePeriod};

/// # Summary
/// 衍生品代码必须在发起网络请求前被拒绝。
#[tokio::test]
async fn test_derivative_symbols_rejected_offline() {
    for symbol in ["600519^", "USDCNY=X", "600519.P", "600519-W"] {
        let result =
            kline_feed::fetch_cn_daily(symbol, "2023-01-03", "2023-01-10", Adjust::Qfq, KlinePeriod::Daily)
                .await;
        assert!(
            matches!(result, Err(MarketError::InvalidSymbol(_))),
            "expected InvalidSymbol for {symbol}"
        );

        let result =
            kline_feed::fetch_cn_intraday(symbol, None, None, Adjust::Qfq, MinutePeriod::Min60).await;
        assert!(matches!(result, Err(MarketError::InvalidSymbol(_))));
    }
}

/// # Summary
/// 东方财富日线抓取的集成测试。
///
/// # Logic
/// 1. 抓取贵州茅台 2023-01-03..2023-01-10 的前复权日线。
/// 2. 断言返回非空、日期升序且落在请求区间内。
#[tokio::test]
#[ignore = "requires network access"]
async fn test_eastmoney_real_daily_fetch() {
    let records = kline_feed::fetch_cn_daily(
        "600519",
        "2023-01-03",
        "2023-01-10",
        Adjust::Qfq,
        KlinePeriod::Daily,
    )
    .await
    .unwrap();

    assert!(!records.is_empty(), "records should not be empty");
    for pair in records.windows(2) {
        assert!(pair[0].date <= pair[1].date);
    }
    assert!(records[0].date.as_str() >= "2023-01-03");
    assert!(records[records.len() - 1].date.as_str() <= "2023-01-10");
}

/// # Summary
/// 东方财富分钟线抓取 + 区间过滤的集成测试。
#[tokio::test]
#[ignore = "requires network access"]
async fn test_eastmoney_real_minute_fetch() {
    let records =
        kline_feed::fetch_cn_intraday("600519", None, None, Adjust::Qfq, MinutePeriod::Min60)
            .await
            .unwrap();

    assert!(!records.is_empty());
    // 分钟线输出日期统一为 YYYY-MM-DD HH:MM:SS
    assert_eq!(records[0].date.len(), 19);
}
