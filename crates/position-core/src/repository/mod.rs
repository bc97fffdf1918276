//! Repository Layer
//!
//! Access to the remote positions collection.

mod traits;
mod http;
mod memory;


pub use traits::PositionRepository;
pub use http::HttpPositionRepository;
pub use memory::InMemoryPositionRepository;
