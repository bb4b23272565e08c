//! Oskar Fischer Prize Site - Core
//!
//! Headless engine behind the prize site: engagement analytics
//! (event emitter, session timers, scroll depth, interaction heuristics,
//! error hooks), the email signup flow, the video listing client, and the
//! static prize content the views render from.

pub mod constants;
pub mod logic;
