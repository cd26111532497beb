//! Static tag mapping: which tags each post carries

mod post_id;
mod table;

pub use post_id::PostId;
pub use table::{MappingError, MappingResult, TagCount, TagMapping};
