/// 内部实现模块
mod internal;


/// 进度模型：快照、进度报告、ETA 文案
pub mod progress {
    use crate::internal;
    pub use internal::progress::eta::*;
    pub use internal::progress::structs::*;
}

/// 下载器：类型与入口统一在此导出
pub mod downloader {
    use crate::internal;
    pub use internal::downloader::structs::*;
    pub use internal::downloader::traits::*;
    pub use internal::downloader::structs::streaming_downloader::{
        download, run_transfer,
    };
}

/// 终端渲染：把进度报告画成一行文本，供 CLI 使用
pub mod render {
    use crate::internal;
    pub use internal::render::*;
}

pub mod states {
    pub mod reactive {
        use crate::internal;
        pub use internal::states::reactive_core::*;
    }
}
