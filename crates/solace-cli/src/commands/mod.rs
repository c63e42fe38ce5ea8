pub mod context;
pub mod entries;
pub mod gate;
pub mod logging;
pub mod migrate;
pub mod reset;
