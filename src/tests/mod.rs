mod config;
mod forwarder;
