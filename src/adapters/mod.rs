// Adapters layer: concrete dataset sources, in-memory surfaces and output storage.

pub mod scene;
pub mod source;
pub mod storage;
