pub mod cursor;
pub mod engine;
pub mod message;
pub mod sequence;
pub mod topic;

pub use engine::Registry;
