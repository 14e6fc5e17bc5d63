pub mod config;
pub mod logging;

pub mod bounded;
pub mod charset;
pub mod decoding;
pub mod put_status;
pub mod response;
pub mod url_info;
pub mod url_model;
