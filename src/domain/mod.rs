//! Core domain types and the crossover pipeline stages.

pub mod ohlcv;
pub mod bar_series;
pub mod interval;
pub mod indicator;
pub mod signal;
pub mod trade_grouper;
pub mod threshold;
pub mod exit;
pub mod trade;
pub mod pipeline;
pub mod metrics;
pub mod strategy;
pub mod data_request;
pub mod config_validation;
pub mod alert;
pub mod error;
