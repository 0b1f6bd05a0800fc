pub mod aggregate;
pub mod exec;
pub mod output;
pub mod resolve;

pub use aggregate::{accumulate, RepoTotals};
pub use exec::{exec, run};
pub use output::{output_json, output_ndjson, output_table};
pub use resolve::unique_commits;
