//! CLI command handlers. Each command is in its own file.

mod charset;
mod check_put;
mod decode;
mod normalize;

pub use charset::run_charset;
pub use check_put::{check_put_file, run_check_put};
pub use decode::{decode_file, run_decode};
pub use normalize::run_normalize;
