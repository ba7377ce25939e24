//! Live hex-cell streams.
//!
//! Each SSE connection gets its own [`run_broadcast`] task that pushes a
//! randomized [`CellUpdate`] at a fixed cadence until the client leaves,
//! the preset's deadline passes, or a write fails. Streams share nothing.

pub mod broadcast;
pub mod cell;
pub mod sse;

pub use broadcast::{BroadcastSummary, CellSink, StopReason, run_broadcast};
pub use cell::{BroadcastSettings, CellStream, CellUpdate, HERO_GRID, MATRIX_RAIN, WIDE_GRID};
pub use sse::{SseCellSink, open_cell_stream, spawn_cell_stream};
