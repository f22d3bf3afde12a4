//! Route planner - cycling routes from a free-text request
//!
//! A request runs through a three-stage [`pipeline`]: a completion service
//! turns the prompt into route outlines, a geocoder resolves the named
//! places, and a directions service measures each route (falling back to a
//! straight-line estimate). The [`api`] module serves it over HTTP.

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod provider;
