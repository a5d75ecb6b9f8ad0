mod command_input;
mod input;
mod key_result;
mod resource_list;

pub use command_input::{CommandEvent, CommandInput};
pub use key_result::KeyResult;
pub use resource_list::{display_state, DisplayState, ListEvent, ResourceList};
