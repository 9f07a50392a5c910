//! 数据适配层
//!
//! 纯函数，不做任何 I/O：把 LMS 聚合结果与自定义课程记录统一映射为 `Subject`。

mod subject;
pub mod term;

pub use subject::{
    assignment_status, material_to_resource, merge_subjects, subject_from_custom,
    subject_from_lms,
};
pub use term::{ParsedTerm, parse_term, resolve_term};
