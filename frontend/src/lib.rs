pub mod line_stream;
pub mod logging;
pub mod protocol;
pub mod session;
