pub mod edges;
pub mod labels;
pub mod nodes;
pub mod orb;
pub mod plugin;
pub mod setup;
pub mod ui;
pub mod utils;
