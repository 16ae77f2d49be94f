pub mod account;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod ledger;
pub mod maintenance;
pub mod rpc;
