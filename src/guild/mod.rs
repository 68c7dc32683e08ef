//! Guild snapshot model and the views derived from it.

pub mod members;
pub mod model;
pub mod tree;

pub use members::filter_members;
pub use model::{GuildSnapshot, Member};
pub use tree::TreeRow;
