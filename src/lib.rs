pub mod cache;
pub mod cli;
pub mod crawl;
pub mod error;
pub mod fetch;
pub mod github;
pub mod members;
pub mod model;
pub mod rate;
pub mod repos;
pub mod roster;
pub mod util;
