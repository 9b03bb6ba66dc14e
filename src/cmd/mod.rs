mod fetch;
mod headers;

pub use fetch::cmd_fetch;
pub use headers::cmd_headers;
