mod block;
mod encoder;
mod galois;

pub(crate) use block::*;
pub(crate) use encoder::*;
