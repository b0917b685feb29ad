use crate::error::CodecResult;
use bincode::{config::standard, decode_from_slice, encode_to_vec};
use std::fmt;
use std::marker::PhantomData;

/// A bidirectional transform between a typed item and its byte string.
///
/// Implementations should satisfy `decode(&encode(x)?)? == x` for every item
/// the application stores; the store does not check this. Ordering of keys is
/// the engine's byte-wise order of the *encoded* form, so a key codec is only
/// order-preserving if its encoding is.
pub trait Codec: Send + Sync + 'static {
    type Item;

    fn encode(&self, item: &Self::Item) -> CodecResult<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> CodecResult<Self::Item>;
}

/// The key codec and value codec a store is bound to.
#[derive(Debug, Clone, Default)]
pub struct Codecs<KC, VC> {
    pub key: KC,
    pub value: VC,
}

impl<KC, VC> Codecs<KC, VC>
where
    KC: Codec,
    VC: Codec,
{
    pub fn new(key: KC, value: VC) -> Self {
        Self { key, value }
    }
}

/// Encodes items with bincode's standard configuration.
///
/// bincode's varint integers do not sort byte-wise, so prefer
/// [`RawCodec`] or [`Utf8Codec`] for keys that must iterate in order.
pub struct BincodeCodec<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T> BincodeCodec<T> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for BincodeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for BincodeCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for BincodeCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BincodeCodec<{}>", std::any::type_name::<T>())
    }
}

impl<T> Codec for BincodeCodec<T>
where
    T: bincode::Encode + bincode::Decode<()> + 'static,
{
    type Item = T;

    fn encode(&self, item: &T) -> CodecResult<Vec<u8>> {
        Ok(encode_to_vec(item, standard())?)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<T> {
        let (decoded, _) = decode_from_slice(bytes, standard())?;
        Ok(decoded)
    }
}

/// Encodes serde types through bincode's serde bridge, for items that derive
/// `Serialize`/`Deserialize` rather than bincode's own traits.
pub struct SerdeCodec<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T> SerdeCodec<T> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for SerdeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerdeCodec<{}>", std::any::type_name::<T>())
    }
}

impl<T> Codec for SerdeCodec<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + 'static,
{
    type Item = T;

    fn encode(&self, item: &T) -> CodecResult<Vec<u8>> {
        Ok(bincode::serde::encode_to_vec(item, standard())?)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<T> {
        let (decoded, _) = bincode::serde::decode_from_slice(bytes, standard())?;
        Ok(decoded)
    }
}

/// Stores byte vectors unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCodec;

impl Codec for RawCodec {
    type Item = Vec<u8>;

    fn encode(&self, item: &Vec<u8>) -> CodecResult<Vec<u8>> {
        Ok(item.clone())
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Vec<u8>> {
        Ok(bytes.to_vec())
    }
}

/// Stores strings as their UTF-8 bytes. Byte order equals string order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Codec;

impl Codec for Utf8Codec {
    type Item = String;

    fn encode(&self, item: &String) -> CodecResult<Vec<u8>> {
        Ok(item.as_bytes().to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<String> {
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

/// A codec built from a caller-supplied pair of functions.
///
/// ```
/// use netabase_kv::traits::codec::{Codec, FnCodec};
///
/// let codec = FnCodec::new(
///     |n: &u32| Ok(n.to_be_bytes().to_vec()),
///     |bytes: &[u8]| {
///         let array: [u8; 4] = bytes
///             .try_into()
///             .map_err(|_| netabase_kv::error::CodecError::custom("expected 4 bytes"))?;
///         Ok(u32::from_be_bytes(array))
///     },
/// );
///
/// let bytes = codec.encode(&7).unwrap();
/// assert_eq!(codec.decode(&bytes).unwrap(), 7);
/// ```
pub struct FnCodec<T, E, D> {
    encode: E,
    decode: D,
    _phantom: PhantomData<fn() -> T>,
}

impl<T, E, D> FnCodec<T, E, D>
where
    E: Fn(&T) -> CodecResult<Vec<u8>>,
    D: Fn(&[u8]) -> CodecResult<T>,
{
    pub fn new(encode: E, decode: D) -> Self {
        Self {
            encode,
            decode,
            _phantom: PhantomData,
        }
    }
}

impl<T, E: Clone, D: Clone> Clone for FnCodec<T, E, D> {
    fn clone(&self) -> Self {
        Self {
            encode: self.encode.clone(),
            decode: self.decode.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T, E, D> fmt::Debug for FnCodec<T, E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnCodec<{}>", std::any::type_name::<T>())
    }
}

impl<T, E, D> Codec for FnCodec<T, E, D>
where
    T: 'static,
    E: Fn(&T) -> CodecResult<Vec<u8>> + Send + Sync + 'static,
    D: Fn(&[u8]) -> CodecResult<T> + Send + Sync + 'static,
{
    type Item = T;

    fn encode(&self, item: &T) -> CodecResult<Vec<u8>> {
        (self.encode)(item)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<T> {
        (self.decode)(bytes)
    }
}
