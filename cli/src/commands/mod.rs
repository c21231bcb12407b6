mod entry;
mod food;
mod helpers;
mod summary;

pub(crate) use entry::{cmd_add, cmd_edit, cmd_find, cmd_list, cmd_remove};
pub(crate) use food::{cmd_food_add, cmd_food_edit, cmd_food_find, cmd_food_list, cmd_food_remove};
pub(crate) use summary::{Period, cmd_summary};
