//! # Sched Core Library
//!
//! Personal task scheduling with compact recurrence rules.
//!
//! ## Core Modules
//!
//! - [`date`]: `YYYYMMDD` calendar dates and the "after now" comparison
//! - [`recurrence`]: repeat-rule parsing and next-date resolution
//! - [`schedule`]: date policy for created and edited tasks
//! - [`models`]: task data structures and transfer objects
//! - [`db`]: database connection and migration management
//! - [`repository`]: data access layer with Repository pattern
//! - [`error`]: error types
//!
//! ## Repeat rules
//!
//! | Rule           | Meaning                                      |
//! |----------------|----------------------------------------------|
//! | `d 7`          | every 7 days (1..=400)                        |
//! | `y`            | every year                                   |
//! | `w 1,3,5`      | Mondays, Wednesdays and Fridays              |
//! | `m 1,-1`       | first and last day of every month            |
//! | `m 15 3,9`     | the 15th of March and September              |
//!
//! ## Example Usage
//!
//! ```rust
//! use sched_core::date::CalendarDate;
//! use sched_core::recurrence::next_date;
//!
//! let now: CalendarDate = "20240115".parse().unwrap();
//! let next = next_date(now, "20240101", "m -1").unwrap();
//! assert_eq!(next.to_string(), "20240131");
//! ```

pub mod date;
pub mod db;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod schedule;
