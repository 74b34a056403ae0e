//! Equality between an ObjectId and the values it is commonly compared to.
//!
//! Comparison is not a symmetric relation: strings are checked against the
//! id, never the other way round, and which rule applies depends on how the
//! string classifies. The branch order is load-bearing.

use crate::bytes;
use crate::object_id::{ObjectId, ObjectIdLike};
use crate::{HEX_LEN, OBJECT_ID_LEN};

/// The right-hand side of [`ObjectId::equals`].
#[derive(Clone, Copy)]
pub enum Comparand<'a> {
    /// Nothing to compare against; never equal.
    Absent,
    /// Another ObjectId.
    Id(&'a ObjectId),
    /// A valid 12-character string read as one byte per char.
    Latin1String(&'a str),
    /// A valid 24-character hex string, compared case-insensitively.
    HexString(&'a str),
    /// A valid 12-character string compared by its UTF-8 encoding.
    Utf8String(&'a str),
    /// A foreign id value compared by its hex form.
    IdLike(&'a dyn ObjectIdLike),
    /// Anything else; never equal.
    Other,
}

impl<'a> Comparand<'a> {
    /// Classifies a string the way [`ObjectId::equals`] does.
    ///
    /// Valid 12-character strings take the Latin-1 path; the UTF-8 path is
    /// only reached through [`Comparand::Utf8String`] directly.
    pub fn classify(s: &'a str) -> Self {
        if !ObjectId::is_valid_str(s) {
            return Comparand::Other;
        }
        match s.chars().count() {
            OBJECT_ID_LEN => Comparand::Latin1String(s),
            HEX_LEN => Comparand::HexString(s),
            _ => Comparand::Other,
        }
    }
}

impl<'a> From<&'a ObjectId> for Comparand<'a> {
    fn from(id: &'a ObjectId) -> Self {
        Comparand::Id(id)
    }
}

impl<'a> From<&'a str> for Comparand<'a> {
    fn from(s: &'a str) -> Self {
        Comparand::classify(s)
    }
}

impl<'a> From<Option<&'a ObjectId>> for Comparand<'a> {
    fn from(id: Option<&'a ObjectId>) -> Self {
        id.map_or(Comparand::Absent, Comparand::Id)
    }
}

impl ObjectId {
    /// Compares this id with `other` using the rule for its variant.
    pub fn equals<'a>(&self, other: impl Into<Comparand<'a>>) -> bool {
        match other.into() {
            Comparand::Absent | Comparand::Other => false,
            Comparand::Id(other) => self.equals_id(other),
            Comparand::Latin1String(s) => {
                is_legacy_str(s) && bytes::equals(self.as_bytes(), &bytes::from_iso88591(s))
            }
            Comparand::HexString(s) => {
                is_valid_hex_str(s) && s.to_lowercase() == self.to_hex_string()
            }
            Comparand::Utf8String(s) => {
                is_legacy_str(s) && bytes::equals(&bytes::from_utf8(s), self.as_bytes())
            }
            Comparand::IdLike(like) => {
                like.to_hex_string().to_lowercase() == self.to_hex_string().to_lowercase()
            }
        }
    }

    fn equals_id(&self, other: &ObjectId) -> bool {
        // The counter's low byte differs most often, so check it first.
        self.as_bytes()[11] == other.as_bytes()[11]
            && bytes::equals(self.as_bytes(), other.as_bytes())
    }
}

fn is_legacy_str(s: &str) -> bool {
    ObjectId::is_valid_str(s) && s.chars().count() == OBJECT_ID_LEN
}

fn is_valid_hex_str(s: &str) -> bool {
    ObjectId::is_valid_str(s) && s.chars().count() == HEX_LEN
}

impl PartialEq<str> for ObjectId {
    fn eq(&self, other: &str) -> bool {
        self.equals(other)
    }
}

impl PartialEq<&str> for ObjectId {
    fn eq(&self, other: &&str) -> bool {
        self.equals(*other)
    }
}
