pub mod cli;
pub mod desktop_item_edit;
pub mod preferred_applications;
