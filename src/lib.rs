pub mod api;
pub mod config;
pub mod context;
pub mod forwarder;
pub mod global;
pub mod logging;
pub mod signal;
pub mod store;
pub mod submission;

#[cfg(test)]
mod tests;
