#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok((rem, value)) = der_codec::parse_der(data) {
        // anything accepted by the decoder is canonical
        let consumed = &data[..data.len() - rem.len()];
        let encoded = der_codec::encode(&value).expect("decoded value must be encodable");
        assert_eq!(&encoded[..], consumed);
    }
});
