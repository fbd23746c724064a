//! Terminal output for the dotship binary.
//!
//! - `theme` - the only place colors and icons are defined
//! - `terminal` - capability detection (tty, color, unicode)
//! - `primitives` - icons and colored text
//! - `blocks` - multi-line result and error blocks
//! - `events` - console rendering of batch progress

pub mod blocks;
pub mod events;
pub mod primitives;
pub mod terminal;
pub mod theme;
