mod tracked;

pub use tracked::*;
