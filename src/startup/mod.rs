/// 启动检查（数据目录 / 上传目录）
pub mod checks;
/// 首次启动写入的默认内容
pub mod seed;

pub use checks::run_startup_checks;
