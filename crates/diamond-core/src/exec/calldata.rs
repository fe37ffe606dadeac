//! Calldata framing: a 4-byte selector followed by opaque argument bytes.
//! Built-in facets encode their arguments with candid.

use crate::{exec::Revert, ids::Selector};
use candid::{
    CandidType,
    utils::{ArgumentDecoder, ArgumentEncoder},
};
use serde::Deserialize;

/// Frame `args` behind `selector`.
#[must_use]
pub fn encode(selector: Selector, args: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + args.len());
    out.extend_from_slice(&selector.to_bytes());
    out.extend_from_slice(args);

    out
}

/// Split calldata into selector and argument bytes. `None` when shorter than
/// a selector.
#[must_use]
pub fn split(calldata: &[u8]) -> Option<(Selector, &[u8])> {
    let (head, rest) = calldata.split_first_chunk::<4>()?;

    Some((Selector::from_bytes(*head), rest))
}

/// Frame candid-encoded `args` behind `selector`.
pub fn encode_args<A: ArgumentEncoder>(selector: Selector, args: A) -> Result<Vec<u8>, Revert> {
    let bytes = candid::encode_args(args).map_err(|e| Revert::message(&e.to_string()))?;

    Ok(encode(selector, &bytes))
}

/// Decode a single candid value, reverting with the decoder message on error.
pub fn decode_one<T>(bytes: &[u8]) -> Result<T, Revert>
where
    T: CandidType + for<'de> Deserialize<'de>,
{
    candid::decode_one(bytes).map_err(|e| Revert::message(&e.to_string()))
}

/// Decode a candid argument tuple.
pub fn decode_args<T>(bytes: &[u8]) -> Result<T, Revert>
where
    T: for<'de> ArgumentDecoder<'de>,
{
    candid::decode_args(bytes).map_err(|e| Revert::message(&e.to_string()))
}

/// Encode a single candid value, reverting with the encoder message on error.
pub fn encode_one<T: CandidType>(value: T) -> Result<Vec<u8>, Revert> {
    candid::encode_one(value).map_err(|e| Revert::message(&e.to_string()))
}

///
/// TESTS
///
