mod entity;

pub use entity::EntityCommands;
