mod rig;

pub use rig::*;
