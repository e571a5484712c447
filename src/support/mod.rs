pub mod keyed_lock;

#[cfg(any(test, feature = "test-support"))]
pub mod memory_backend;
