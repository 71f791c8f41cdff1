#![forbid(unsafe_code)]

pub mod cli;
pub mod headings;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod renumber;
pub mod sidebar;
pub mod split;
