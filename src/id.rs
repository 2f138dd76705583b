use std::{fmt, str};

use fstr::FStr;

/// Mask applied to the timestamp before it is packed into the `unix_ts_ms` field.
pub const TIMESTAMP_MASK: u64 = 0x0000_ffff_ffff_ffff;

const RAND_A_MASK: u16 = 0x0fff;
const RAND_B_MASK: u64 = 0x3fff_ffff_ffff_ffff;

/// Represents a Universally Unique IDentifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUIDv7 from its field values.
    ///
    /// Every field is truncated to its width rather than rejected: `unix_ts_ms` keeps its low 48
    /// bits, `rand_a` its low 12 bits and `rand_b` its low 62 bits. The version and variant bits
    /// are always written as `0111` and `10`, whatever the random inputs hold.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_migrate::Uuid;
    ///
    /// let x = Uuid::from_fields_v7(0x017f_22e2_79b0, 0xcc3, 0x18c4_dc0c_0c07_398f);
    /// assert_eq!(x.to_string(), "017f22e2-79b0-7cc3-98c4-dc0c0c07398f");
    ///
    /// // timestamps wrap at 2^48
    /// let y = Uuid::from_fields_v7(0x017f_22e2_79b0 + (1 << 48), 0xcc3, 0x18c4_dc0c_0c07_398f);
    /// assert_eq!(x, y);
    /// ```
    pub const fn from_fields_v7(unix_ts_ms: u64, rand_a: u16, rand_b: u64) -> Self {
        let hi =
            ((unix_ts_ms & TIMESTAMP_MASK) << 16) | (0x7 << 12) | (rand_a & RAND_A_MASK) as u64;
        let lo = (0b10 << 62) | (rand_b & RAND_B_MASK);
        Self::from_u128(((hi as u128) << 64) | lo as u128)
    }

    /// Creates a UUID from its 128-bit big-endian integer value.
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    /// Returns the 128-bit big-endian integer value.
    pub const fn as_u128(&self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    /// Returns the 48-bit `unix_ts_ms` field.
    pub const fn timestamp_ms(&self) -> u64 {
        (self.as_u128() >> 80) as u64
    }

    /// Returns the value of the version field.
    pub const fn version(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Returns `true` if the variant field holds `10`, the variant defined by RFC 4122.
    pub const fn is_rfc_variant(&self) -> bool {
        self.0[8] >> 6 == 0b10
    }

    /// Returns the 8-4-4-4-12 lowercase hexadecimal string representation stored in a
    /// stack-allocated fixed-length string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_migrate::Uuid;
    ///
    /// let x = "01809424-3E59-7C05-9219-566F82FFF672".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(y, "01809424-3e59-7c05-9219-566f82fff672");
    /// assert_eq!(format!("{}", y), "01809424-3e59-7c05-9219-566f82fff672");
    /// # Ok::<(), uuid7_migrate::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let value = self.as_u128();
        let mut buffer = [b'-'; 36];
        let mut shift = 128;
        for (pos, slot) in buffer.iter_mut().enumerate() {
            if !HYPHENS.contains(&pos) {
                shift -= 4;
                *slot = DIGITS[((value >> shift) & 0xf) as usize];
            }
        }
        match FStr::from_bytes(buffer) {
            Ok(text) => text,
            Err(_) => unreachable!("hex digits and hyphens are ASCII"),
        }
    }
}

/// Offsets of the hyphens in the 36-character canonical form.
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Parses the 8-4-4-4-12 form. Hex digits may be of either case; braces, `urn:uuid:`
    /// prefixes, surrounding whitespace and the hyphen-less form are rejected.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if src.len() != 36 {
            return Err(ParseError {});
        }

        let mut value = 0u128;
        for (pos, byte) in src.bytes().enumerate() {
            if HYPHENS.contains(&pos) {
                if byte != b'-' {
                    return Err(ParseError {});
                }
            } else {
                let digit = char::from(byte).to_digit(16).ok_or(ParseError {})?;
                value = (value << 4) | digit as u128;
            }
        }
        Ok(Self::from_u128(value))
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        src.as_u128()
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self::from_u128(src)
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("invalid string representation")]
pub struct ParseError {}

/// Text in human-readable formats, the raw 16 bytes otherwise.
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(UuidVisitor)
            } else {
                deserializer.deserialize_bytes(UuidVisitor)
            }
        }
    }

    struct UuidVisitor;

    impl de::Visitor<'_> for UuidVisitor {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("an 8-4-4-4-12 UUID string or 16 bytes")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Uuid, E> {
            value
                .parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Uuid, E> {
            match <[u8; 16]>::try_from(value) {
                Ok(bytes) => Ok(Uuid::from(bytes)),
                Err(_) => Err(E::invalid_length(value.len(), &self)),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Uuid;
        use serde_test::{assert_de_tokens_error, assert_tokens, Configure, Token};

        /// Serializes legacy and migrated ids as text or bytes
        #[test]
        fn serializes_legacy_and_migrated_ids_as_text_or_bytes() {
            static CASES: [(&str, [u8; 16]); 3] = [
                ("00000000-0000-0000-0000-000000000000", [0u8; 16]),
                ("11111111-1111-1111-1111-111111111111", [0x11; 16]),
                (
                    "0176bb3e-7000-7abc-8123-456789abcdef",
                    [
                        0x01, 0x76, 0xbb, 0x3e, 0x70, 0x00, 0x7a, 0xbc, 0x81, 0x23, 0x45, 0x67,
                        0x89, 0xab, 0xcd, 0xef,
                    ],
                ),
            ];

            for (text, bytes) in &CASES {
                let e = text.parse::<Uuid>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(*text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }

        /// Rejects malformed text and short byte arrays
        #[test]
        fn rejects_malformed_text_and_short_byte_arrays() {
            assert_de_tokens_error::<serde_test::Readable<Uuid>>(
                &[Token::Str("0176bb3e70007abc8123456789abcdef")],
                "invalid value: string \"0176bb3e70007abc8123456789abcdef\", expected an 8-4-4-4-12 UUID string or 16 bytes",
            );
            assert_de_tokens_error::<serde_test::Compact<Uuid>>(
                &[Token::Bytes(&[0x11; 15])],
                "invalid length 15, expected an 8-4-4-4-12 UUID string or 16 bytes",
            );
        }
    }
}
