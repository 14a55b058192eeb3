//! Object identifiers (X.690 8.19)

use crate::error::DerError;
use std::fmt;
use std::slice;
use std::str::FromStr;

/// Largest content handled for an object identifier, in octets
pub const MAX_OID_CONTENT_LEN: usize = 127;

/// Object identifier, as a list of arcs
///
/// The first two arcs follow X.660: the first arc is 0, 1 or 2, and the second arc is lower than
/// 40 when the first one is 0 or 1.
#[derive(PartialEq, Eq, Clone, Hash)]
pub struct Oid(Vec<u64>);

impl Oid {
    /// Build an OID from its arcs
    ///
    /// ```rust
    /// # use der_codec::oid::Oid;
    /// let oid = Oid::from(&[1, 2, 840, 113549]).expect("valid arcs");
    /// assert_eq!(oid.to_id_string(), "1.2.840.113549");
    /// assert!(Oid::from(&[1, 40]).is_err());
    /// ```
    pub fn from(s: &[u64]) -> Result<Oid, DerError> {
        match s {
            [] => return Err(DerError::InvalidOidString),
            [first, ..] if *first > 2 => return Err(DerError::InvalidOidString),
            [first, second, ..] if *first < 2 && *second >= 40 => {
                return Err(DerError::InvalidOidString)
            }
            [2, second, ..] if *second > u64::MAX - 80 => return Err(DerError::InvalidOidString),
            _ => (),
        }
        Ok(Oid(s.to_vec()))
    }

    #[inline]
    pub fn arcs(&self) -> &[u64] {
        &self.0
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, u64> {
        self.0.iter()
    }

    /// Dotted decimal representation
    pub fn to_id_string(&self) -> String {
        let v: Vec<String> = self.0.iter().map(|arc| arc.to_string()).collect();
        v.join(".")
    }

    /// Encode the OID as DER content octets (without identifier and length)
    ///
    /// A single arc is encoded with a second arc of 0.
    pub fn to_der_content(&self) -> Result<Vec<u8>, DerError> {
        let first = self.0.first().copied().unwrap_or(0);
        let second = self.0.get(1).copied().unwrap_or(0);
        let mut content = Vec::with_capacity(self.0.len() * 2);
        // X.690 8.19.4: the first two arcs share one subidentifier
        encode_subidentifier(&mut content, first * 40 + second);
        for &arc in self.0.iter().skip(2) {
            encode_subidentifier(&mut content, arc);
        }
        if content.len() > MAX_OID_CONTENT_LEN {
            return Err(DerError::OidTooLong);
        }
        Ok(content)
    }

    /// Decode DER content octets
    pub fn from_der_content(bytes: &[u8]) -> Result<Oid, DerError> {
        if bytes.is_empty() {
            return Err(DerError::InvalidOid);
        }
        if bytes.len() > MAX_OID_CONTENT_LEN {
            return Err(DerError::OidTooLong);
        }
        if let [b] = bytes {
            if b & 0x80 == 0 {
                let (first, second) = split_first_subidentifier(u64::from(*b));
                return Ok(Oid(vec![first, second]));
            }
        }
        let mut arcs = Vec::with_capacity(bytes.len() + 1);
        let mut acc: u64 = 0;
        let mut pending = false;
        for &b in bytes {
            // X.690 8.19.2: subidentifiers are minimal, no leading 0x80
            if !pending && b == 0x80 {
                return Err(DerError::InvalidOid);
            }
            if acc > (u64::MAX >> 7) {
                return Err(DerError::InvalidOid);
            }
            acc = (acc << 7) | u64::from(b & 0x7f);
            pending = b & 0x80 != 0;
            if !pending {
                if arcs.is_empty() {
                    let (first, second) = split_first_subidentifier(acc);
                    arcs.push(first);
                    arcs.push(second);
                } else {
                    arcs.push(acc);
                }
                acc = 0;
            }
        }
        if pending {
            return Err(DerError::InvalidOid);
        }
        Ok(Oid(arcs))
    }
}

fn split_first_subidentifier(v: u64) -> (u64, u64) {
    if v < 120 {
        (v / 40, v % 40)
    } else {
        (2, v - 80)
    }
}

fn encode_subidentifier(out: &mut Vec<u8>, mut value: u64) {
    let mut groups = [0u8; 10];
    let mut n = 0;
    loop {
        groups[n] = (value & 0x7f) as u8;
        n += 1;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    for idx in (0..n).rev() {
        let continuation = if idx > 0 { 0x80 } else { 0x00 };
        out.push(groups[idx] | continuation);
    }
}

impl FromStr for Oid {
    type Err = DerError;

    /// Parse the dotted decimal form (`"1.2.840.113549"`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arcs = s
            .split('.')
            .map(|arc| {
                if arc.is_empty() || !arc.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(DerError::InvalidOidString);
                }
                arc.parse::<u64>().or(Err(DerError::InvalidOidString))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Oid::from(&arcs)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_id_string())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OID({})", self.to_id_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oid_fmt() {
        let oid = Oid::from(&[1, 2, 840, 113549, 1, 1, 5]).unwrap();
        assert_eq!(format!("{}", oid), "1.2.840.113549.1.1.5".to_owned());
        assert_eq!(format!("{:?}", oid), "OID(1.2.840.113549.1.1.5)".to_owned());
    }

    #[test]
    fn test_oid_from_str() {
        let oid: Oid = "1.2.840.113549.1.1.1".parse().unwrap();
        assert_eq!(oid.arcs(), &[1, 2, 840, 113549, 1, 1, 1]);
        assert_eq!(oid.iter().count(), 7);
        for s in &["", "1..2", "1.2.", "3.1", "1.40", "1.-2", "1.+2", "1.a", "1.18446744073709551616"] {
            assert_eq!(s.parse::<Oid>(), Err(DerError::InvalidOidString), "{:?}", s);
        }
        assert!("2.999".parse::<Oid>().is_ok());
    }

    #[test]
    fn test_oid_content() {
        let oid: Oid = "1.2".parse().unwrap();
        assert_eq!(oid.to_der_content(), Ok(vec![0x2a]));
        let oid: Oid = "1.2.840.113549".parse().unwrap();
        assert_eq!(
            oid.to_der_content(),
            Ok(vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d])
        );
        let oid: Oid = "2.999.3".parse().unwrap();
        assert_eq!(oid.to_der_content(), Ok(vec![0x88, 0x37, 0x03]));
        let oid: Oid = "2".parse().unwrap();
        assert_eq!(oid.to_der_content(), Ok(vec![0x50]));
    }

    #[test]
    fn test_oid_decode() {
        assert_eq!(
            Oid::from_der_content(&[0x2a]).map(|o| o.to_id_string()),
            Ok("1.2".to_owned())
        );
        assert_eq!(
            Oid::from_der_content(&[0x78]).map(|o| o.to_id_string()),
            Ok("2.40".to_owned())
        );
        assert_eq!(
            Oid::from_der_content(&[0x88, 0x37, 0x03]).map(|o| o.to_id_string()),
            Ok("2.999.3".to_owned())
        );
        assert_eq!(
            Oid::from_der_content(&[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d]).map(|o| o.to_id_string()),
            Ok("1.2.840.113549".to_owned())
        );
    }

    #[test]
    fn test_oid_decode_errors() {
        assert_eq!(Oid::from_der_content(&[]), Err(DerError::InvalidOid));
        assert_eq!(Oid::from_der_content(&[0x2a, 0x86]), Err(DerError::InvalidOid));
        assert_eq!(
            Oid::from_der_content(&[0x2a, 0x80, 0x01]),
            Err(DerError::InvalidOid)
        );
        let mut overflow = vec![0x2a];
        overflow.extend_from_slice(&[0xff; 10]);
        overflow.push(0x7f);
        assert_eq!(Oid::from_der_content(&overflow), Err(DerError::InvalidOid));
        let long = vec![0x01; 128];
        assert_eq!(Oid::from_der_content(&long), Err(DerError::OidTooLong));
    }
}
