//! Return-to-office attendance compliance engine.
//!
//! This crate tracks daily attendance (in-office or remote) against reporting
//! periods that each require a minimum number of in-office days, reduced by
//! holidays that fall on weekdays. It answers three questions:
//!
//! - which reporting period a date belongs to and how many days it requires
//! - whether the requirement is met so far, and how risky the remainder is
//! - what the outcome would be if the user attended on a set of planned dates
//!
//! The [`calculation`] module is pure and does no I/O. [`config`] and
//! [`storage`] load its inputs from disk, and [`cli`] drives the `rto` binary.

#![warn(missing_docs)]

pub mod calculation;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
