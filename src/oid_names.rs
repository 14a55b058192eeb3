//! Well-known object identifiers
//!
//! Dotted string constants for X.509 and PKCS identifiers, and a static table mapping each one to
//! its name and to its DER content octets. The codec itself does not use this table.

// X.509 Distinguished Name attributes (RFC 4519 / X.520)

pub const COMMON_NAME: &str = "2.5.4.3";
pub const SURNAME: &str = "2.5.4.4";
pub const SERIAL_NUMBER: &str = "2.5.4.5";
pub const COUNTRY_NAME: &str = "2.5.4.6";
pub const LOCALITY_NAME: &str = "2.5.4.7";
pub const STATE_OR_PROVINCE_NAME: &str = "2.5.4.8";
pub const ORGANIZATION_NAME: &str = "2.5.4.10";
pub const ORGANIZATIONAL_UNIT_NAME: &str = "2.5.4.11";
pub const EMAIL_ADDRESS: &str = "1.2.840.113549.1.9.1";

// PKCS #1 algorithms (RFC 8017)

pub const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
pub const MD5_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.4";
pub const SHA1_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.5";
pub const SHA256_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.11";
pub const SHA384_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.12";
pub const SHA512_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.13";

// Elliptic curves and ECDSA (RFC 5480, RFC 5758)

pub const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
pub const PRIME256V1: &str = "1.2.840.10045.3.1.7";
pub const SECP384R1: &str = "1.3.132.0.34";
pub const ECDSA_WITH_SHA256: &str = "1.2.840.10045.4.3.2";
pub const ECDSA_WITH_SHA384: &str = "1.2.840.10045.4.3.3";

// Digests

pub const SHA1: &str = "1.3.14.3.2.26";
pub const SHA256: &str = "2.16.840.1.101.3.4.2.1";

// X.509v3 extensions (RFC 5280 section 4.2)

pub const SUBJECT_KEY_IDENTIFIER: &str = "2.5.29.14";
pub const KEY_USAGE: &str = "2.5.29.15";
pub const SUBJECT_ALT_NAME: &str = "2.5.29.17";
pub const ISSUER_ALT_NAME: &str = "2.5.29.18";
pub const BASIC_CONSTRAINTS: &str = "2.5.29.19";
pub const CRL_DISTRIBUTION_POINTS: &str = "2.5.29.31";
pub const CERTIFICATE_POLICIES: &str = "2.5.29.32";
pub const AUTHORITY_KEY_IDENTIFIER: &str = "2.5.29.35";
pub const EXT_KEY_USAGE: &str = "2.5.29.37";
pub const AUTHORITY_INFO_ACCESS: &str = "1.3.6.1.5.5.7.1.1";

// Extended key usages (RFC 5280 section 4.2.1.12)

pub const SERVER_AUTH: &str = "1.3.6.1.5.5.7.3.1";
pub const CLIENT_AUTH: &str = "1.3.6.1.5.5.7.3.2";
pub const CODE_SIGNING: &str = "1.3.6.1.5.5.7.3.3";

/// One entry of the named OID table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OidEntry {
    /// Short name, as used in the defining document
    pub name: &'static str,
    /// Dotted decimal form
    pub oid: &'static str,
    /// DER content octets
    pub der: &'static [u8],
}

macro_rules! oid_entry {
    ($name:expr, $oid:ident, $($arcs:tt)*) => {
        OidEntry {
            name: $name,
            oid: $oid,
            der: &oid_der!($($arcs)*),
        }
    };
}

/// Known object identifiers, with their names and encodings
#[rustfmt::skip]
pub static OID_NAMES: &[OidEntry] = &[
    oid_entry!("commonName", COMMON_NAME, 2.5.4.3),
    oid_entry!("surname", SURNAME, 2.5.4.4),
    oid_entry!("serialNumber", SERIAL_NUMBER, 2.5.4.5),
    oid_entry!("countryName", COUNTRY_NAME, 2.5.4.6),
    oid_entry!("localityName", LOCALITY_NAME, 2.5.4.7),
    oid_entry!("stateOrProvinceName", STATE_OR_PROVINCE_NAME, 2.5.4.8),
    oid_entry!("organizationName", ORGANIZATION_NAME, 2.5.4.10),
    oid_entry!("organizationalUnitName", ORGANIZATIONAL_UNIT_NAME, 2.5.4.11),
    oid_entry!("emailAddress", EMAIL_ADDRESS, 1.2.840.113549.1.9.1),

    oid_entry!("rsaEncryption", RSA_ENCRYPTION, 1.2.840.113549.1.1.1),
    oid_entry!("md5WithRSAEncryption", MD5_WITH_RSA_ENCRYPTION, 1.2.840.113549.1.1.4),
    oid_entry!("sha1WithRSAEncryption", SHA1_WITH_RSA_ENCRYPTION, 1.2.840.113549.1.1.5),
    oid_entry!("sha256WithRSAEncryption", SHA256_WITH_RSA_ENCRYPTION, 1.2.840.113549.1.1.11),
    oid_entry!("sha384WithRSAEncryption", SHA384_WITH_RSA_ENCRYPTION, 1.2.840.113549.1.1.12),
    oid_entry!("sha512WithRSAEncryption", SHA512_WITH_RSA_ENCRYPTION, 1.2.840.113549.1.1.13),

    oid_entry!("id-ecPublicKey", EC_PUBLIC_KEY, 1.2.840.10045.2.1),
    oid_entry!("prime256v1", PRIME256V1, 1.2.840.10045.3.1.7),
    oid_entry!("secp384r1", SECP384R1, 1.3.132.0.34),
    oid_entry!("ecdsa-with-SHA256", ECDSA_WITH_SHA256, 1.2.840.10045.4.3.2),
    oid_entry!("ecdsa-with-SHA384", ECDSA_WITH_SHA384, 1.2.840.10045.4.3.3),

    oid_entry!("sha1", SHA1, 1.3.14.3.2.26),
    oid_entry!("sha256", SHA256, 2.16.840.1.101.3.4.2.1),

    oid_entry!("subjectKeyIdentifier", SUBJECT_KEY_IDENTIFIER, 2.5.29.14),
    oid_entry!("keyUsage", KEY_USAGE, 2.5.29.15),
    oid_entry!("subjectAltName", SUBJECT_ALT_NAME, 2.5.29.17),
    oid_entry!("issuerAltName", ISSUER_ALT_NAME, 2.5.29.18),
    oid_entry!("basicConstraints", BASIC_CONSTRAINTS, 2.5.29.19),
    oid_entry!("cRLDistributionPoints", CRL_DISTRIBUTION_POINTS, 2.5.29.31),
    oid_entry!("certificatePolicies", CERTIFICATE_POLICIES, 2.5.29.32),
    oid_entry!("authorityKeyIdentifier", AUTHORITY_KEY_IDENTIFIER, 2.5.29.35),
    oid_entry!("extKeyUsage", EXT_KEY_USAGE, 2.5.29.37),
    oid_entry!("authorityInfoAccess", AUTHORITY_INFO_ACCESS, 1.3.6.1.5.5.7.1.1),

    oid_entry!("serverAuth", SERVER_AUTH, 1.3.6.1.5.5.7.3.1),
    oid_entry!("clientAuth", CLIENT_AUTH, 1.3.6.1.5.5.7.3.2),
    oid_entry!("codeSigning", CODE_SIGNING, 1.3.6.1.5.5.7.3.3),
];

/// Find an entry by its short name
///
/// ```rust
/// use der_codec::oid_names::{oid_by_name, SUBJECT_ALT_NAME};
///
/// let entry = oid_by_name("subjectAltName").expect("known name");
/// assert_eq!(entry.oid, SUBJECT_ALT_NAME);
/// assert_eq!(entry.der, &[0x55, 0x1d, 0x11]);
/// ```
pub fn oid_by_name(name: &str) -> Option<&'static OidEntry> {
    OID_NAMES.iter().find(|entry| entry.name == name)
}

/// Short name of a dotted OID, if known
pub fn name_of(oid: &str) -> Option<&'static str> {
    OID_NAMES
        .iter()
        .find(|entry| entry.oid == oid)
        .map(|entry| entry.name)
}

/// Find an entry by the DER content octets of the OID
pub fn oid_by_der(content: &[u8]) -> Option<&'static OidEntry> {
    OID_NAMES.iter().find(|entry| entry.der == content)
}
