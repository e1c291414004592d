//! 进度模型：由传输计数器得到的瞬时快照，以及交给回调的进度报告。
//!
//! 两者都是一次性的值：每次通知时新建，回调返回后即丢弃，下载器不持有。

pub mod eta;
pub mod structs;
