//! Constants shared by the engine and its front ends.
//!
//! The board itself is sized at runtime, so unlike a fixed-size Go engine
//! there is no geometry here: only the rules constants, the glyphs used by
//! the text rendering and the key codes of the interactive mode.

// =============================================================================
// Rules
// =============================================================================

/// Number of golden moves every player may make during a game.
pub const GOLDEN_MOVES: u32 = 1;

// =============================================================================
// Rendering
// =============================================================================

/// Glyph of an empty field.
pub const EMPTY_GLYPH: char = '.';

/// Smallest player count whose ids need more than one digit.
pub const WIDE_IDS_FROM: u32 = 10;

// =============================================================================
// Input
// =============================================================================

/// First character of a comment line (batch mode and mode selection).
pub const COMMENT: char = '#';

/// Mode line selecting batch mode.
pub const BATCH_MODE: char = 'B';

/// Mode line selecting interactive mode.
pub const INTERACTIVE_MODE: char = 'I';

// =============================================================================
// Logging
// =============================================================================

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";
