/// Encode an object identifier literal as DER content octets, at compile time
///
/// The expansion is an array of `u8` (no identifier or length octets), so it can be used in
/// constants and patterns.
///
/// ```rust
/// # #[macro_use] extern crate der_codec;
/// const RSA: &[u8] = &oid_der!(1.2.840.113549.1.1.1);
/// assert_eq!(RSA, &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01]);
///
/// let bytes = [0x06, 0x03, 0x55, 0x1d, 0x11];
/// match &bytes[2..] {
///     &oid_der!(2.5.29.17) => (),
///     _ => panic!("not subjectAltName"),
/// }
/// ```
#[macro_export]
macro_rules! oid_der {
    ($($arcs:tt)*) => {
        $crate::encode_oid!($($arcs)*)
    };
}
