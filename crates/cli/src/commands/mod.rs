pub mod boundcheck;
pub mod disfunc;
pub mod util;

pub use boundcheck::*;
pub use disfunc::*;
pub use util::*;
