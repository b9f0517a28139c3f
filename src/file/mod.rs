pub mod error;
pub mod materializer;
pub mod resolver;
