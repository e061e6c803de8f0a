//! DTMF symbol decoding on top of sparse Goertzel bins.

pub mod decode;
pub mod table;

pub use decode::{decode, Decision, Decoder, DecoderBuilder};
pub use table::{TableError, TonePair, ToneTable};
