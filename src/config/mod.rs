pub mod grapple;
pub mod messages;
