use num_bigint::BigUint;
use num_traits::cast::ToPrimitive;
use num_traits::Zero;
use proc_macro::TokenStream;

/// Encode one subidentifier as base-128 groups, continuation bit on all but the last
fn encode_subidentifier(enc: &mut Vec<u8>, value: &BigUint) {
    if value.is_zero() {
        enc.push(0);
        return;
    }
    let groups = value.to_radix_be(128);
    let last = groups.len() - 1;
    for (idx, group) in groups.into_iter().enumerate() {
        if idx == last {
            enc.push(group);
        } else {
            enc.push(group | 0x80);
        }
    }
}

fn encode_components(components: &[BigUint]) -> Vec<u8> {
    let mut enc = Vec::new();
    let first = match components.first().and_then(|c| c.to_u8()) {
        Some(arc) if arc <= 2 => arc,
        _ => panic!("First component must be 0, 1 or 2"),
    };
    let second = components.get(1).cloned().unwrap_or_else(BigUint::zero);
    if first < 2 && second >= BigUint::from(40u8) {
        panic!("Second component must be lower than 40 under arcs 0 and 1");
    }
    // X.690 8.19.4: the first two arcs share one subidentifier
    let combined = BigUint::from(first) * BigUint::from(40u8) + second;
    encode_subidentifier(&mut enc, &combined);

    for arc in components.iter().skip(2) {
        encode_subidentifier(&mut enc, arc);
    }
    enc
}

/// Encode a dotted OID literal (`1.2.840.113549`) into DER content octets.
///
/// Expands to an array expression of `u8`.
#[proc_macro]
pub fn encode_oid(input: TokenStream) -> TokenStream {
    let s = input.to_string();

    let ints: Vec<BigUint> = s
        .split('.')
        .map(|segment| segment.trim())
        .map(|segment| {
            segment
                .parse()
                .unwrap_or_else(|_| panic!("Invalid OID component '{}'", segment))
        })
        .collect();

    let enc = encode_components(&ints);

    let mut s = String::with_capacity(2 + 6 * enc.len());
    s.push('[');
    for byte in enc.iter() {
        s.insert_str(s.len(), &format!("0x{:02x}u8, ", byte));
    }
    s.push(']');
    s.parse().unwrap()
}
