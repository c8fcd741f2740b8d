// src/slackdesc/mod.rs

//! Slackware package description (`install/slack-desc`) support
//!
//! - `parse`: recover summary and description from an existing file
//! - `layout`: render summary and description into the fixed 11-line layout

pub mod layout;
pub mod parse;

pub use layout::{validate_name, SlackDesc, BASE_WIDTH, DESCRIPTION_LINES, MIN_CONTENT_WIDTH};
pub use parse::{parse, ParsedDesc, FALLBACK_SUMMARY};

/// Path of the descriptive block inside a package
pub const SLACK_DESC_PATH: &str = "install/slack-desc";
