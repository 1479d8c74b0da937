//! `serde` support for [`Sequence`].
//!
//! - **Serialize**: as a sequence of elements.
//! - **Deserialize**: element by element, failing when a fixed storage
//!   runs out of room.

use std::fmt;
use std::marker::PhantomData;

use ::serde::de::{self, SeqAccess, Visitor};
use ::serde::ser::SerializeSeq;
use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::seq::Sequence;
use crate::store::Store;

impl<S: Store> Serialize for Sequence<S>
where
    S::Item: Serialize,
{
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        let slice = self.as_slice();
        let mut seq = serializer.serialize_seq(Some(slice.len()))?;
        for item in slice {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

struct SeqVisitor<S>(PhantomData<S>);

impl<'de, S: Store + Default> Visitor<'de> for SeqVisitor<S>
where
    S::Item: Deserialize<'de>,
{
    type Value = Sequence<S>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a sequence of at most {} elements", S::MAX_LEN)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut seq = Sequence::<S>::new();
        while let Some(value) = access.next_element::<S::Item>()? {
            seq.try_push_back(value)
                .map_err(|_| de::Error::custom("too many elements for the sequence storage"))?;
        }
        Ok(seq)
    }
}

impl<'de, S: Store + Default> Deserialize<'de> for Sequence<S>
where
    S::Item: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SeqVisitor::<S>(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Seq, SmallSeq, StaticSeq};

    #[test]
    fn round_trip_json() {
        let seq: Seq<i32> = Seq::try_from_slice(&[1, 2, 3]).unwrap();
        let json = serde_json::to_string(&seq).unwrap();
        assert_eq!(json, "[1,2,3]");

        let back: Seq<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seq);
    }

    #[test]
    fn round_trip_small_buffer() {
        let seq: SmallSeq<i32, 4> = serde_json::from_str("[1,2,3]").unwrap();
        assert!(!seq.is_dynamic());
        assert_eq!(seq, [1, 2, 3]);

        let spilled: SmallSeq<i32, 4> = serde_json::from_str("[1,2,3,4,5,6]").unwrap();
        assert!(spilled.is_dynamic());
        assert_eq!(spilled, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn fixed_capacity_overflow_errors() {
        let err = serde_json::from_str::<StaticSeq<i32, 3>>("[1,2,3,4]").unwrap_err();
        assert!(err.to_string().contains("too many elements"));
    }

    #[test]
    fn empty_round_trip() {
        let seq: StaticSeq<i32, 4> = serde_json::from_str("[]").unwrap();
        assert!(seq.is_empty());
        assert_eq!(serde_json::to_string(&seq).unwrap(), "[]");
    }
}
