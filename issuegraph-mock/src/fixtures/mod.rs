pub mod github;
pub mod scenarios;
