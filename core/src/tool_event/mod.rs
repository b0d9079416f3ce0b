pub mod extract;
pub mod model;
pub mod stream_json;

pub use extract::{extract_stream, StreamExtraction, StreamExtractor};
pub use model::{truncate_chars, StreamEvent, ToolCall, MAX_ERROR_CHARS};
pub use stream_json::parse_stream_line;
