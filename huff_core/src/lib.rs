pub mod artifact;
pub mod bitio;
pub mod codebook;
pub mod decode;
pub mod encode;
pub mod error;
pub mod freq;
pub mod tree;

pub use codebook::{Code, CodeBook};
pub use decode::decompress;
pub use encode::compress;
pub use error::CodecError;
pub use freq::FreqTable;
pub use tree::Node;
