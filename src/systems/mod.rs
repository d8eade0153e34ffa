pub mod interaction;
pub mod lighting;
pub mod mesh;
pub mod scenery;
pub mod ui;
