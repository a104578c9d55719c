//! Views for the refund calculator.
//!
//! Each view owns one piece of terminal output and reads its data from the
//! [`Session`](crate::app::Session).

pub mod instructions;
pub mod prompt;
pub mod summary;

pub use instructions::{COMMANDS, INSTRUCTIONS, instructions_title};
pub use prompt::{
    Command, DialoguerInteraction, Interaction, LineInteraction, Prompt, PromptInput, quit_question,
};
pub use summary::{SummaryLayout, render_summary, tie_break_line};
