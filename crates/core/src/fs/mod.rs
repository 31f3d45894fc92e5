//! FileSystem abstraction for testable directory scans

mod mock;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub use r#trait::FileSystem;
pub use real::RealFileSystem;
