//! Waterfall contact discovery.
//!
//! Eligible providers are tried one at a time in priority order until one
//! returns a usable email. Lower-priority providers are never consulted
//! once a higher-priority one has answered.

mod resolver;

pub use resolver::WaterfallResolver;
