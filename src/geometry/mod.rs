mod anchor;
mod bounds;
mod value;

pub use anchor::*;
pub use bounds::*;
pub use value::*;
