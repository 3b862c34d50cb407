pub mod config;
pub mod logging;

pub mod check;
pub mod request;
pub mod verdict;
