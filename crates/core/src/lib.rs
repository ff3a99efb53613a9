//! K 线数据领域核心：实体、错误、归一化、区间过滤与肯特纳通道指标。
//!
//! 本 crate 不做任何网络 I/O，所有运算均为纯函数，供 `kline-feed` 等
//! 上层适配器复用。

pub mod common;
pub mod indicator;
pub mod market;
