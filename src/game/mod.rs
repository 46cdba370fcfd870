pub mod components;
pub mod cooldown;
pub mod events;
pub mod gate;
pub mod item;
pub mod types;
pub mod velocity;
