mod error;
mod message;
mod visual;

pub use error::{Error, ErrorKind};
pub use message::*;
pub use visual::{Pointer, Visual};
