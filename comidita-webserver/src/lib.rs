#[macro_use]
extern crate log;

mod adapters;
mod core;
mod web;

pub use web::{run, Cfg, Gateways, RateLimitCfg};
