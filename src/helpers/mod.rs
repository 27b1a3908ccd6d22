pub mod category;
pub mod chooser;
pub mod database;
pub mod registry;

pub use category::{ChooserPage, HelperCategory, ALL_CHOOSER_PAGES, ALL_HELPER_CATEGORIES};
pub use chooser::{chooser_action_from_key, ChooserAction, ChooserModel, ChooserResponse};
pub use database::{HelperDatabase, HelperPreferences, HELPERS_DIR_NAME, PREFERENCES_FILE_NAME};
pub use registry::{Helper, HelperError, HelperRegistry};
