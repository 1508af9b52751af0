//! Test harness for CLI integration tests.
//!
//! Provides isolated vaults and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;

#[allow(unused_imports)]
pub use command::MetricsCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
