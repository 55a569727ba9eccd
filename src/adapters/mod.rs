//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter     | Implements | Connects to                        |
//! |-------------|------------|------------------------------------|
//! | `ram_flash` | FlashPort  | In-memory blob (simulation, tests) |
//!
//! The production flash writer (sector programming, wear leveling,
//! checksumming) ships with the board support layer, outside this crate.

pub mod ram_flash;
