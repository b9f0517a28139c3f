pub mod brace_expansion;
pub mod paths;
