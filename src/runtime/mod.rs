//! C ABI over `SimpleVector<i64>`.

pub mod array;
