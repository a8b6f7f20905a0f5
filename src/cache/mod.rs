mod reclaimable;

pub use reclaimable::*;
