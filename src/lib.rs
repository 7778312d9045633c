// Library target shared by the binary, integration tests and criterion
// benchmarks. The REPL front end lives in main.rs.

pub mod app;
pub mod config;
pub mod engine;
pub mod logging;
pub mod preferences;
pub mod session;
pub mod store;
