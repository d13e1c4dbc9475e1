//! Core primitives for Horizon Mosaic.
//!
//! This crate provides the foundational components of the Horizon Mosaic
//! composition engine:
//!
//! - **Signal/Slot System**: Type-safe notification between the engine and its host
//! - **Geometry**: Point/size/rect value types shared by every layout strategy
//! - **Logging**: `tracing` targets, macros, and perf-span helpers
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_mosaic_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Geometry Example
//!
//! ```
//! use horizon_mosaic_core::{Point, Rect};
//!
//! let frame = Rect::new(0.0, 0.0, 320.0, 44.0);
//! assert!(frame.contains(Point::new(10.0, 10.0)));
//! assert_eq!(frame.bottom(), 44.0);
//! ```

mod geometry;
pub mod logging;
pub mod signal;

pub use geometry::{Point, Rect, Size};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
