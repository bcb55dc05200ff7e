pub mod in_memory_file_system;
pub mod node_js_file_system;
pub mod types;
pub mod util;

pub use in_memory_file_system::*;
pub use node_js_file_system::*;
pub use types::*;
pub use util::*;
