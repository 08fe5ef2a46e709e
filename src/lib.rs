//! VinScout CLI
//!
//! 車両書類（PDF/Word/Excel）を受け付け、VIN・ナンバープレートを抽出し、
//! 車両データと保険条件をJSONにエクスポートする。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod scanner;
