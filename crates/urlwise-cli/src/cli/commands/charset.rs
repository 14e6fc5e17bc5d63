//! Charset command: resolve the charset of a Content-Type value.

use urlwise_core::charset;

pub fn run_charset(content_type: Option<&str>) {
    println!("{}", charset::resolve_charset(content_type));
}
