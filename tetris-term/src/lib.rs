//! Terminal front-end for tetris-engine: a renderer drawing with `console`
//! and a keyboard input source

pub mod keyboard;
pub mod term_render;

pub use keyboard::{key_to_command, spawn_key_reader, wait_for_restart};
pub use term_render::{AnsiTermStyle, PlainTermStyle, TermRender, TermRenderer, TermStyle};
