//! Core systems for Horizon Columns.
//!
//! This crate provides the foundational pieces shared by the column engine:
//!
//! - **Signal/Slot System**: Type-safe observer lists used for change
//!   notification between columns, collections, layouts and headers
//! - **Logging**: `tracing` targets and performance spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_columns_core::Signal;
//!
//! let resized = Signal::<f32>::new();
//!
//! let conn_id = resized.connect(|width| {
//!     println!("Resized to: {}", width);
//! });
//!
//! resized.emit(150.0);
//! resized.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
