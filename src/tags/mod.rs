//! Tag lists, dataset-wide tag indices and bulk tag edits

pub mod bulk;
pub mod index;
pub mod list;

pub use bulk::{add_tag_to_all, delete_tag_from_all, replace_tag_in_all, set_tag_list_to_all};
pub use index::TagIndex;
pub use list::{AddPosition, TAG_SEPARATOR, TagList};
