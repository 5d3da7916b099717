//! # PIRANIA Telegram Bot
//!
//! A Telegram bot that greets visitors, shows the agency's portfolio and
//! contact link, resolves public handles to numeric ids, and records every
//! interaction in a local SQLite log served as an HTML report.

pub mod bot;
pub mod config;
pub mod db;
pub mod error;
pub mod event_log;
pub mod localization;
pub mod report;
pub mod web;
