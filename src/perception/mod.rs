// ==========================================
// 日期感知 - 对外查询与文本组装
// ==========================================

pub mod assembler;
pub mod facade;

pub use assembler::DateInfoAssembler;
pub use facade::{DatePerception, DateResolution};
