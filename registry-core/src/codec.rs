//! Fixture codec.
//!
//! Every structured fixture (spec blobs, index files, dependency API bodies)
//! is MessagePack with named fields. `.rz` files are zlib streams of such an
//! encoding, `.gz` files are gzip streams of one. Clients decode with the same
//! functions.

use flate2::{
    Compression,
    read::{GzDecoder, ZlibDecoder},
    write::{GzEncoder, ZlibEncoder},
};
use serde::{Serialize, de::DeserializeOwned};
use std::io::{Read, Write};

pub fn encode<T: Serialize + ?Sized>(value: &T) -> crate::Result<Vec<u8>> {
    Ok(rmp_serde::to_vec_named(value)?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> crate::Result<T> {
    Ok(rmp_serde::from_slice(bytes)?)
}

pub fn deflate(bytes: &[u8]) -> crate::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .map_err(stream_error)?;
    encoder.finish().map_err(stream_error)
}

pub fn inflate(bytes: &[u8]) -> crate::Result<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(stream_error)?;
    Ok(out)
}

pub fn gzip(bytes: &[u8]) -> crate::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .map_err(stream_error)?;
    encoder.finish().map_err(stream_error)
}

pub fn gunzip(bytes: &[u8]) -> crate::Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(stream_error)?;
    Ok(out)
}

// corrupt compressed data surfaces as a decode failure, not as a missing file
fn stream_error(err: std::io::Error) -> crate::Error {
    crate::Error::Decode(rmp_serde::decode::Error::InvalidDataRead(err))
}
