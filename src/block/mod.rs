mod basic;

pub use basic::BlockId;
