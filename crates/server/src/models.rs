mod candidate;
mod settings;
mod tracked;

pub use candidate::*;
pub use settings::*;
pub use tracked::*;
