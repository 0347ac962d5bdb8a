mod lsp;
mod registry;

#[allow(unused_imports)]
pub use lsp::*;
#[allow(unused_imports)]
pub use registry::*;
