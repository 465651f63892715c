#![doc = include_str!("../README.md")]

pub mod logger;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
