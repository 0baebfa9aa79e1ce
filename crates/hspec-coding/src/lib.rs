//! This crate provides [`BitString`], the classic (non-adaptive) Huffman
//! codec in [`huffman`], and run-length encoding in [`rle`].

mod bitstring;
mod error;
mod huffman;
mod rle;

pub use bitstring::BitString;
pub use error::{Error, Result};
pub use huffman::{build_dict, decode, decode_run, encode, HuffmanDict, Stop};
pub use rle::{rle_decode, rle_encode};
