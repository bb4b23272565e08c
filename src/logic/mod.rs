//! Logic Module - Trackers, Flows & Content
//!
//! ## Structure
//! - `config` - injected analytics configuration + runtime kill-switch
//! - `analytics/` - event emitter, session timers, scroll depth, heuristics
//! - `signup/` - email validation, local dedup cache, Formbricks flow
//! - `videos` - video listing client with local cache
//! - `content` - static prize/winner/navigation data
//! - `shell` - application shell wiring the trackers to the view router

pub mod analytics;
pub mod config;
pub mod content;
pub mod shell;
pub mod signup;
pub mod videos;
