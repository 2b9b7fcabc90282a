pub mod find_directive;
pub mod highlight_rules;
pub mod inspect_directive;
pub mod list_directives;
pub mod search_directives;

pub use find_directive::*;
pub use highlight_rules::*;
pub use inspect_directive::*;
pub use list_directives::*;
pub use search_directives::*;
