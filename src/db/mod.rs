pub mod entities;
pub mod enums;
pub mod repositories;

pub use entities::*;
pub use enums::*;
