//! Call data encoding and result decoding.
//!
//! Arguments are checked against the planned input shape (arity and type)
//! before anything is serialized, then laid out as the usual head/tail
//! encoding: static values occupy one 32 byte word in the head, dynamic
//! values put an offset in the head and their payload in the tail.
//! Decoding walks the head words of a raw result per the planned output
//! shape. Mismatches surface verbatim as `Encode`/`Decode` errors, never
//! as silently coerced values.

use crate::error::Error;
use crate::plan::{OutputShape, PrimitiveType};
use crate::value::{MethodOutput, Value};
use clarity::{Address, Uint256};
use sha3::{Digest, Keccak256};

const WORD: usize = 32;

/// Given a canonical signature derives the four byte method selector
pub fn derive_method_id(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    let mut result: [u8; 4] = Default::default();
    result.copy_from_slice(&digest[0..4]);
    result
}

/// Representation of one serialized argument
enum SerializedValue {
    /// This data can be appended to the head directly
    Static([u8; WORD]),
    /// This data goes in the tail, the head gets an offset to it
    Dynamic(Vec<u8>),
}

fn serialize(name: &str, expected: PrimitiveType, value: &Value) -> Result<SerializedValue, Error> {
    if !value.matches(expected) {
        return Err(Error::Encode(format!(
            "argument {name} expects {expected:?}, got {}",
            value.type_name()
        )));
    }
    match value {
        Value::Uint(v) => Ok(SerializedValue::Static(v.to_be_bytes())),
        Value::Bool(v) => {
            let mut res: [u8; WORD] = Default::default();
            res[WORD - 1] = *v as u8;
            Ok(SerializedValue::Static(res))
        }
        Value::Address(v) => {
            let mut res: [u8; WORD] = Default::default();
            res[12..].copy_from_slice(v.as_bytes());
            Ok(SerializedValue::Static(res))
        }
        Value::Text(v) => {
            let bytes = v.as_bytes();
            let mut payload = Vec::with_capacity(WORD + padded_len(bytes.len()));
            payload.extend_from_slice(&Uint256::from(bytes.len() as u64).to_be_bytes());
            payload.extend_from_slice(bytes);
            payload.resize(WORD + padded_len(bytes.len()), 0);
            Ok(SerializedValue::Dynamic(payload))
        }
        Value::Opaque(v) => {
            // opaque values pass through unmodified, so they must already
            // be exactly one encoded word
            if v.len() != WORD {
                return Err(Error::Encode(format!(
                    "opaque argument {name} must be exactly 32 bytes, got {}",
                    v.len()
                )));
            }
            let mut res: [u8; WORD] = Default::default();
            res.copy_from_slice(v);
            Ok(SerializedValue::Static(res))
        }
    }
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

/// Serializes arguments against the planned inputs, without a selector.
/// The inverse of [`decode_output`] for the primitive types.
pub fn encode_arguments(
    inputs: &[(String, PrimitiveType)],
    args: &[Value],
) -> Result<Vec<u8>, Error> {
    if inputs.len() != args.len() {
        return Err(Error::Encode(format!(
            "expected {} arguments, got {}",
            inputs.len(),
            args.len()
        )));
    }

    let mut serialized = Vec::with_capacity(args.len());
    for ((name, expected), value) in inputs.iter().zip(args.iter()) {
        serialized.push(serialize(name, *expected, value)?);
    }

    let head_len = WORD * serialized.len();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for value in serialized {
        match value {
            SerializedValue::Static(data) => head.extend_from_slice(&data),
            SerializedValue::Dynamic(data) => {
                let offset = Uint256::from((head_len + tail.len()) as u64);
                head.extend_from_slice(&offset.to_be_bytes());
                tail.extend_from_slice(&data);
            }
        }
    }
    head.extend_from_slice(&tail);
    Ok(head)
}

/// Produces complete call data: the method selector followed by the
/// encoded arguments
pub fn encode_call(
    signature: &str,
    inputs: &[(String, PrimitiveType)],
    args: &[Value],
) -> Result<Vec<u8>, Error> {
    let mut payload = derive_method_id(signature).to_vec();
    payload.extend_from_slice(&encode_arguments(inputs, args)?);
    Ok(payload)
}

fn head_word(buf: &[u8], index: usize) -> Result<&[u8], Error> {
    buf.get(index * WORD..(index + 1) * WORD).ok_or_else(|| {
        Error::Decode(format!(
            "result of {} bytes has no word at position {index}",
            buf.len()
        ))
    })
}

fn word_to_usize(word: &[u8]) -> Result<usize, Error> {
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(Error::Decode("offset word out of range".to_string()));
    }
    let mut tail: [u8; 8] = Default::default();
    tail.copy_from_slice(&word[WORD - 8..]);
    Ok(u64::from_be_bytes(tail) as usize)
}

fn decode_value(buf: &[u8], index: usize, type_: PrimitiveType) -> Result<Value, Error> {
    let word = head_word(buf, index)?;
    match type_ {
        PrimitiveType::Integer => Ok(Value::Uint(Uint256::from_be_bytes(word))),
        PrimitiveType::Boolean => Ok(Value::Bool(word[WORD - 1] != 0)),
        PrimitiveType::Address => {
            let address = Address::from_slice(&word[12..])
                .map_err(|e| Error::Decode(format!("invalid address word {e}")))?;
            Ok(Value::Address(address))
        }
        PrimitiveType::Text => {
            let offset = word_to_usize(word)?;
            // a hostile endpoint can return offset or length words near
            // usize::MAX, the additions must not wrap
            let payload_start = offset.checked_add(WORD).ok_or_else(|| {
                Error::Decode(format!("string offset {offset} past end of result"))
            })?;
            let len_word = buf.get(offset..payload_start).ok_or_else(|| {
                Error::Decode(format!("string offset {offset} past end of result"))
            })?;
            let len = word_to_usize(len_word)?;
            let payload_end = payload_start.checked_add(len).ok_or_else(|| {
                Error::Decode(format!("string of length {len} past end of result"))
            })?;
            let bytes = buf.get(payload_start..payload_end).ok_or_else(|| {
                Error::Decode(format!("string of length {len} past end of result"))
            })?;
            let text = String::from_utf8(bytes.to_vec())
                .map_err(|_| Error::Decode("string output is not valid utf8".to_string()))?;
            Ok(Value::Text(text))
        }
        PrimitiveType::Opaque => Ok(Value::Opaque(word.to_vec())),
    }
}

/// Decodes a raw call result against the planned output shape
pub fn decode_output(shape: &OutputShape, buf: &[u8]) -> Result<MethodOutput, Error> {
    match shape {
        OutputShape::Empty => Ok(MethodOutput::Empty),
        OutputShape::Single(type_) => Ok(MethodOutput::Single(decode_value(buf, 0, *type_)?)),
        OutputShape::Record(fields) => {
            let mut record = Vec::with_capacity(fields.len());
            for (index, (name, type_)) in fields.iter().enumerate() {
                record.push((name.clone(), decode_value(buf, index, *type_)?));
            }
            Ok(MethodOutput::Record(record))
        }
    }
}
