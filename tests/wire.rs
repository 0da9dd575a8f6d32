//! Codec-only tests: framing and header shape, no RSA involved.

use bastion_envelope::wire::{
    frame, parse_header, unframe, EnvelopeHeader, AEAD_TAG_BYTES, AES_KEY_BYTES, IV_BYTES,
    LEN_PREFIX_BYTES, RSA_MODULUS_BITS, WRAPPED_SECRET_BYTES,
};
use bastion_envelope::EnvelopeError;
use proptest::prelude::*;

#[test]
fn test_wire_constants() {
    assert_eq!(LEN_PREFIX_BYTES, 4);
    assert_eq!(AES_KEY_BYTES, 32);
    assert_eq!(IV_BYTES, 12);
    assert_eq!(AEAD_TAG_BYTES, 16);
    assert_eq!(RSA_MODULUS_BITS, 4096);
    assert_eq!(WRAPPED_SECRET_BYTES, 512);
}

#[test]
fn test_frame_layout() {
    let envelope = frame(b"hdr", b"ct").unwrap();
    assert_eq!(hex::encode(&envelope), "000000036864726374");

    let parts = unframe(&envelope).unwrap();
    assert_eq!(parts.header, b"hdr");
    assert_eq!(parts.ciphertext, b"ct");
}

#[test]
fn test_empty_segments() {
    // Zero-length header and zero-length ciphertext are both representable.
    let envelope = frame(b"", b"").unwrap();
    assert_eq!(envelope, 0u32.to_be_bytes());

    let parts = unframe(&envelope).unwrap();
    assert!(parts.header.is_empty());
    assert!(parts.ciphertext.is_empty());
}

#[test]
fn test_unframe_rejects_truncation() {
    for bad in [&b""[..], &b"\x00"[..], &b"\x00\x00\x00"[..]] {
        assert!(matches!(
            unframe(bad),
            Err(EnvelopeError::MalformedEnvelope)
        ));
    }

    // Prefix declares more header bytes than the buffer holds.
    let mut envelope = frame(b"header", b"ciphertext").unwrap();
    envelope[..LEN_PREFIX_BYTES].copy_from_slice(&u32::MAX.to_be_bytes());
    assert!(matches!(
        unframe(&envelope),
        Err(EnvelopeError::MalformedEnvelope)
    ));
}

#[test]
fn test_header_member_order() {
    let header = EnvelopeHeader {
        wrapped_key: "a2V5".into(),
        wrapped_iv: "aXY=".into(),
        auth_tag: "dGFn".into(),
    };
    assert_eq!(
        serde_json::to_string(&header).unwrap(),
        r#"{"wrappedKey":"a2V5","wrappedIV":"aXY=","authTag":"dGFn"}"#
    );
}

#[test]
fn test_parse_header_shapes() {
    let ok = parse_header(br#"{"wrappedKey":"a","wrappedIV":"b","authTag":"c"}"#).unwrap();
    assert_eq!(ok.wrapped_key, "a");
    assert_eq!(ok.wrapped_iv, "b");
    assert_eq!(ok.auth_tag, "c");

    // Unknown extra members are tolerated.
    assert!(
        parse_header(br#"{"wrappedKey":"a","wrappedIV":"b","authTag":"c","extra":1}"#).is_ok()
    );

    // Missing or mistyped members are not.
    for bad in [
        &b"not json"[..],
        br#"{"wrappedKey":"a","wrappedIV":"b"}"#,
        br#"{"wrappedKey":1,"wrappedIV":"b","authTag":"c"}"#,
        br#"[]"#,
    ] {
        assert!(matches!(
            parse_header(bad),
            Err(EnvelopeError::MalformedEnvelope)
        ));
    }
}

#[test]
fn test_auth_tag_validation() {
    let mut header = EnvelopeHeader {
        wrapped_key: String::new(),
        wrapped_iv: String::new(),
        auth_tag: "AAAAAAAAAAAAAAAAAAAAAA==".into(), // 16 zero bytes
    };
    assert_eq!(header.auth_tag_bytes().unwrap(), [0u8; AEAD_TAG_BYTES]);

    header.auth_tag = "AAAA".into(); // 3 bytes, wrong length
    assert_eq!(
        header.auth_tag_bytes().unwrap_err(),
        EnvelopeError::MalformedEnvelope
    );

    header.auth_tag = "!!!".into(); // not base64
    assert_eq!(
        header.auth_tag_bytes().unwrap_err(),
        EnvelopeError::MalformedEnvelope
    );
}

proptest! {
    #[test]
    fn frame_unframe_roundtrip(
        header in proptest::collection::vec(any::<u8>(), 0..2048),
        ciphertext in proptest::collection::vec(any::<u8>(), 0..4096),
    ) {
        let envelope = frame(&header, &ciphertext).unwrap();

        // The prefix always equals the exact header byte length.
        let declared = u32::from_be_bytes(envelope[..LEN_PREFIX_BYTES].try_into().unwrap());
        prop_assert_eq!(declared as usize, header.len());

        let parts = unframe(&envelope).unwrap();
        prop_assert_eq!(parts.header, &header[..]);
        prop_assert_eq!(parts.ciphertext, &ciphertext[..]);
    }

    #[test]
    fn unframe_never_panics(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = unframe(&data);
        let _ = parse_header(&data);
    }
}
