//! K 线抓取与肯特纳通道的冒烟脚本。
//!
//! ```bash
//! cargo run -p kline-feed --example fetch_demo
//! ```

use kline_feed::{Adjust, Interval, KeltnerParams, KlinePeriod, compute_keltner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // A 股：贵州茅台日线，前复权
    let cn = kline_feed::fetch_cn_daily(
        "600519",
        "2023-01-03",
        "2023-01-10",
        Adjust::Qfq,
        KlinePeriod::Daily,
    )
    .await?;
    println!("CN rows fetched: {}", cn.len());
    if let Some(first) = cn.first() {
        println!("First row: {first:?}");
    }

    let channel = compute_keltner(cn, &KeltnerParams::default())?;
    if let Some(last) = channel.last() {
        println!(
            "Keltner @ {}: middle={:.2} upper={:.2} lower={:.2}",
            last.date, last.middle, last.upper, last.lower
        );
    }

    // 美股：AAPL 日线，常规交易时段
    let us = kline_feed::fetch_us_daily("AAPL", "2023-01-03", "2023-01-10", Interval::Day1, false)
        .await?;
    println!("US rows fetched: {}", us.len());
    if let Some(first) = us.first() {
        println!("First row: {first:?}");
    }

    Ok(())
}
