// ============================================
// File: crates/hubcast-core/src/protocol/wire.rs
// ============================================
//! # Canonical Wire Encoder
//!
//! ## Creation Reason
//! Provides the deterministic binary serialization of message data that
//! the content hash is computed over. Hubs recompute this encoding on
//! their side, so it must match the reference implementation bit for
//! bit - a single divergent byte produces a different hash and a
//! rejected message.
//!
//! ## Main Functionality
//! - Varint writer (base-128, little-endian groups, 0x80 continuation)
//! - Tag writer (`field_number << 3 | wire_type`)
//! - `encode_message_data`: the canonical `MessageData` encoding
//! - `encode_message_envelope`: the outer `Message` wire serialization
//!
//! ## Wire Format
//! A protobuf-wire-compatible subset. Two wire types are used:
//!
//! | Wire type | Value | Used for |
//! |-----------|-------|----------|
//! | varint | 0 | integers, enums |
//! | length-delimited | 2 | strings, bytes, nested messages |
//!
//! Fields are emitted in ascending field-number order with no padding.
//! Scalar fields holding their default value (zero, empty string) are
//! omitted entirely, as are empty repeated fields; one-of members are
//! always emitted, even when their payload is empty, because their
//! presence is the information.
//!
//! ## Field Maps
//! ```text
//! MessageData:  1=type 2=fid 3=timestamp 4=network
//!               5=cast_add_body 6=cast_remove_body 7=reaction_body
//!               8=link_body 9=user_data_body
//! CastAddBody:  1=text 2=embeds* 3=mentions* 4=mention_positions*
//!               5=parent_cast_id 6=parent_url
//! Embed:        1=url | 2=cast_id
//! CastId:       1=fid 2=hash
//! CastRemove:   1=target_hash
//! ReactionBody: 1=type 2=target_cast_id | 3=target_url
//! LinkBody:     1=type 2=display_timestamp 3=target_fid
//! UserDataBody: 1=type 2=value
//! Message:      1=data 2=hash 3=hash_scheme 4=signature
//!               5=signature_scheme 6=signer
//! ```
//! (`*` = repeated, one tag per element, never packed.)
//!
//! ## ⚠️ Important Note for Next Developer
//! - This is deliberately NOT a generic protobuf codec. Field numbers
//!   and omission rules are protocol constants; keeping them spelled
//!   out here is what makes divergence reviewable
//! - Do not "optimize" repeated scalars into packed encoding - the
//!   reference hubs expect one tag per element
//! - `VerificationAdd` is declared in the model but has no top-level
//!   encoding; the encoder rejects it with a typed error
//!
//! ## Last Modified
//! v0.1.0 - Initial encoder implementation

use bytes::{BufMut, BytesMut};

use crate::error::{CoreError, Result};
use crate::protocol::bodies::{
    CastAddBody, CastId, CastParent, CastRemoveBody, Embed, LinkBody, MessageBody, MessageData,
    ReactionBody, ReactionTarget, UserDataBody,
};

// ============================================
// Wire Types
// ============================================

/// Wire type for varint-encoded integers and enums.
const WIRE_VARINT: u8 = 0;

/// Wire type for length-delimited strings, bytes, and nested messages.
const WIRE_LEN: u8 = 2;

// ============================================
// Field Numbers
// ============================================

// MessageData
const DATA_TYPE: u32 = 1;
const DATA_FID: u32 = 2;
const DATA_TIMESTAMP: u32 = 3;
const DATA_NETWORK: u32 = 4;
const DATA_CAST_ADD_BODY: u32 = 5;
const DATA_CAST_REMOVE_BODY: u32 = 6;
const DATA_REACTION_BODY: u32 = 7;
const DATA_LINK_BODY: u32 = 8;
const DATA_USER_DATA_BODY: u32 = 9;

// CastAddBody
const CAST_ADD_TEXT: u32 = 1;
const CAST_ADD_EMBEDS: u32 = 2;
const CAST_ADD_MENTIONS: u32 = 3;
const CAST_ADD_MENTION_POSITIONS: u32 = 4;
const CAST_ADD_PARENT_CAST_ID: u32 = 5;
const CAST_ADD_PARENT_URL: u32 = 6;

// Embed
const EMBED_URL: u32 = 1;
const EMBED_CAST_ID: u32 = 2;

// CastId
const CAST_ID_FID: u32 = 1;
const CAST_ID_HASH: u32 = 2;

// CastRemoveBody
const CAST_REMOVE_TARGET_HASH: u32 = 1;

// ReactionBody
const REACTION_TYPE: u32 = 1;
const REACTION_TARGET_CAST_ID: u32 = 2;
const REACTION_TARGET_URL: u32 = 3;

// LinkBody
const LINK_TYPE: u32 = 1;
const LINK_DISPLAY_TIMESTAMP: u32 = 2;
const LINK_TARGET_FID: u32 = 3;

// UserDataBody
const USER_DATA_TYPE: u32 = 1;
const USER_DATA_VALUE: u32 = 2;

// Message envelope
const MESSAGE_DATA: u32 = 1;
const MESSAGE_HASH: u32 = 2;
const MESSAGE_HASH_SCHEME: u32 = 3;
const MESSAGE_SIGNATURE: u32 = 4;
const MESSAGE_SIGNATURE_SCHEME: u32 = 5;
const MESSAGE_SIGNER: u32 = 6;

// ============================================
// Primitive Writers
// ============================================

/// Writes a varint: base-128 little-endian groups, 0x80 continuation bit.
///
/// Matches protobuf varint semantics exactly; hub-side compatibility
/// depends on it.
pub fn put_varint(buf: &mut BytesMut, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.put_u8(byte);
            return;
        }
        buf.put_u8(byte | 0x80);
    }
}

/// Writes a field tag: `(field_number << 3) | wire_type`, varint-encoded.
fn put_tag(buf: &mut BytesMut, field_number: u32, wire_type: u8) {
    put_varint(buf, (u64::from(field_number) << 3) | u64::from(wire_type));
}

/// Writes a varint field (tag + value). Caller decides presence.
fn put_varint_field(buf: &mut BytesMut, field_number: u32, value: u64) {
    put_tag(buf, field_number, WIRE_VARINT);
    put_varint(buf, value);
}

/// Writes a length-delimited field (tag + length + raw bytes).
fn put_len_field(buf: &mut BytesMut, field_number: u32, bytes: &[u8]) {
    put_tag(buf, field_number, WIRE_LEN);
    put_varint(buf, bytes.len() as u64);
    buf.put_slice(bytes);
}

/// Writes a varint field only when the value is non-zero.
///
/// Default-valued scalars are omitted, never emitted as zero.
fn put_nonzero_field(buf: &mut BytesMut, field_number: u32, value: u64) {
    if value != 0 {
        put_varint_field(buf, field_number, value);
    }
}

/// Writes a string field only when the string is non-empty.
fn put_nonempty_str_field(buf: &mut BytesMut, field_number: u32, value: &str) {
    if !value.is_empty() {
        put_len_field(buf, field_number, value.as_bytes());
    }
}

// ============================================
// Nested Encoders
// ============================================

/// Encodes a `CastId`: 1=fid (varint), 2=hash (20 raw bytes).
fn encode_cast_id(cast_id: &CastId) -> BytesMut {
    let mut buf = BytesMut::with_capacity(32);
    put_nonzero_field(&mut buf, CAST_ID_FID, cast_id.fid.value());
    put_len_field(&mut buf, CAST_ID_HASH, cast_id.hash.as_bytes());
    buf
}

/// Encodes an `Embed` one-of: 1=url or 2=cast_id.
fn encode_embed(embed: &Embed) -> BytesMut {
    let mut buf = BytesMut::new();
    match embed {
        // One-of members are emitted even when empty: presence is the point
        Embed::Url(url) => put_len_field(&mut buf, EMBED_URL, url.as_bytes()),
        Embed::Cast(cast_id) => put_len_field(&mut buf, EMBED_CAST_ID, &encode_cast_id(cast_id)),
    }
    buf
}

fn encode_cast_add_body(body: &CastAddBody) -> BytesMut {
    let mut buf = BytesMut::with_capacity(64);
    put_nonempty_str_field(&mut buf, CAST_ADD_TEXT, &body.text);
    for embed in &body.embeds {
        put_len_field(&mut buf, CAST_ADD_EMBEDS, &encode_embed(embed));
    }
    for mention in &body.mentions {
        put_varint_field(&mut buf, CAST_ADD_MENTIONS, mention.value());
    }
    for position in &body.mention_positions {
        put_varint_field(&mut buf, CAST_ADD_MENTION_POSITIONS, u64::from(*position));
    }
    match &body.parent {
        Some(CastParent::Cast(cast_id)) => {
            put_len_field(&mut buf, CAST_ADD_PARENT_CAST_ID, &encode_cast_id(cast_id));
        }
        Some(CastParent::Url(url)) => {
            put_len_field(&mut buf, CAST_ADD_PARENT_URL, url.as_bytes());
        }
        None => {}
    }
    buf
}

fn encode_cast_remove_body(body: &CastRemoveBody) -> BytesMut {
    let mut buf = BytesMut::with_capacity(24);
    put_len_field(&mut buf, CAST_REMOVE_TARGET_HASH, body.target_hash.as_bytes());
    buf
}

fn encode_reaction_body(body: &ReactionBody) -> BytesMut {
    let mut buf = BytesMut::with_capacity(32);
    put_nonzero_field(&mut buf, REACTION_TYPE, body.reaction_type.as_u64());
    match &body.target {
        ReactionTarget::Cast(cast_id) => {
            put_len_field(&mut buf, REACTION_TARGET_CAST_ID, &encode_cast_id(cast_id));
        }
        ReactionTarget::Url(url) => {
            put_len_field(&mut buf, REACTION_TARGET_URL, url.as_bytes());
        }
    }
    buf
}

fn encode_link_body(body: &LinkBody) -> BytesMut {
    let mut buf = BytesMut::with_capacity(24);
    put_nonempty_str_field(&mut buf, LINK_TYPE, &body.link_type);
    if let Some(display) = body.display_timestamp {
        put_varint_field(&mut buf, LINK_DISPLAY_TIMESTAMP, u64::from(display.as_secs()));
    }
    put_nonzero_field(&mut buf, LINK_TARGET_FID, body.target_fid.value());
    buf
}

fn encode_user_data_body(body: &UserDataBody) -> BytesMut {
    let mut buf = BytesMut::with_capacity(32);
    put_nonzero_field(&mut buf, USER_DATA_TYPE, body.data_type.as_u64());
    put_nonempty_str_field(&mut buf, USER_DATA_VALUE, &body.value);
    buf
}

// ============================================
// MessageData Encoder
// ============================================

/// Encodes `MessageData` into its canonical bytes.
///
/// Pure and deterministic: the same value always produces the same
/// bytes, which is what makes the content hash stable.
///
/// # Errors
/// Returns `UnsupportedBody` for `VerificationAdd`, which is declared
/// in the data model but outside the encoded protocol subset.
pub fn encode_message_data(data: &MessageData) -> Result<Vec<u8>> {
    let body_bytes = match data.body() {
        MessageBody::CastAdd(body) => (DATA_CAST_ADD_BODY, encode_cast_add_body(body)),
        MessageBody::CastRemove(body) => (DATA_CAST_REMOVE_BODY, encode_cast_remove_body(body)),
        MessageBody::Reaction(body) => (DATA_REACTION_BODY, encode_reaction_body(body)),
        MessageBody::Link(body) => (DATA_LINK_BODY, encode_link_body(body)),
        MessageBody::UserData(body) => (DATA_USER_DATA_BODY, encode_user_data_body(body)),
        MessageBody::VerificationAdd(_) => {
            return Err(CoreError::unsupported_body("VerificationAdd"));
        }
    };

    let mut buf = BytesMut::with_capacity(body_bytes.1.len() + 24);
    put_nonzero_field(&mut buf, DATA_TYPE, data.message_type().as_u64());
    put_nonzero_field(&mut buf, DATA_FID, data.fid().value());
    put_nonzero_field(&mut buf, DATA_TIMESTAMP, u64::from(data.timestamp().as_secs()));
    put_nonzero_field(&mut buf, DATA_NETWORK, data.network().as_u64());
    // The body is a one-of member: emitted even when its encoding is empty
    put_len_field(&mut buf, body_bytes.0, &body_bytes.1);

    Ok(buf.to_vec())
}

// ============================================
// Message Envelope Encoder
// ============================================

/// Encodes the outer `Message` wire serialization posted to hubs.
///
/// Field order is fixed: data, hash, hash scheme, signature, signature
/// scheme, signer.
#[must_use]
pub fn encode_message_envelope(
    data_bytes: &[u8],
    hash: &[u8],
    hash_scheme: u64,
    signature: &[u8],
    signature_scheme: u64,
    signer: &[u8],
) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(data_bytes.len() + 140);
    put_len_field(&mut buf, MESSAGE_DATA, data_bytes);
    put_len_field(&mut buf, MESSAGE_HASH, hash);
    put_nonzero_field(&mut buf, MESSAGE_HASH_SCHEME, hash_scheme);
    put_len_field(&mut buf, MESSAGE_SIGNATURE, signature);
    put_nonzero_field(&mut buf, MESSAGE_SIGNATURE_SCHEME, signature_scheme);
    put_len_field(&mut buf, MESSAGE_SIGNER, signer);
    buf.to_vec()
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::bodies::{
        FarcasterNetwork, MessageType, ReactionType, UserDataType, VerificationAddBody,
    };
    use hubcast_common::time::FarcasterTime;
    use hubcast_common::types::{Fid, MessageHash};

    fn varint_bytes(value: u64) -> Vec<u8> {
        let mut buf = BytesMut::new();
        put_varint(&mut buf, value);
        buf.to_vec()
    }

    fn cast_add_data(text: &str, fid: u64, timestamp: u32) -> MessageData {
        MessageData::new(
            MessageType::CastAdd,
            Fid::new(fid),
            FarcasterTime::from_secs(timestamp),
            FarcasterNetwork::Mainnet,
            MessageBody::CastAdd(CastAddBody::from_text(text)),
        )
        .unwrap()
    }

    #[test]
    fn test_varint_single_byte_range() {
        assert_eq!(varint_bytes(0), vec![0x00]);
        assert_eq!(varint_bytes(1), vec![0x01]);
        assert_eq!(varint_bytes(127), vec![0x7f]);
    }

    #[test]
    fn test_varint_multi_byte() {
        // Reference values from the protobuf specification
        assert_eq!(varint_bytes(128), vec![0x80, 0x01]);
        assert_eq!(varint_bytes(300), vec![0xac, 0x02]);
        assert_eq!(varint_bytes(16_384), vec![0x80, 0x80, 0x01]);
    }

    #[test]
    fn test_varint_u64_max() {
        assert_eq!(
            varint_bytes(u64::MAX),
            vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]
        );
    }

    #[test]
    fn test_reaction_body_tag_byte() {
        // Field 7, length-delimited: (7 << 3) | 2 == 0x3a
        let mut buf = BytesMut::new();
        put_tag(&mut buf, DATA_REACTION_BODY, WIRE_LEN);
        assert_eq!(buf.to_vec(), vec![0x3a]);
    }

    #[test]
    fn test_cast_add_known_bytes() {
        // CastAdd "hello", fid 123, timestamp 100, mainnet
        let data = cast_add_data("hello", 123, 100);
        let encoded = encode_message_data(&data).unwrap();

        let expected = vec![
            0x08, 0x01, // type = CastAdd(1)
            0x10, 0x7b, // fid = 123
            0x18, 0x64, // timestamp = 100
            0x20, 0x01, // network = Mainnet(1)
            0x2a, 0x07, // cast_add_body, 7 bytes
            0x0a, 0x05, b'h', b'e', b'l', b'l', b'o', // text = "hello"
        ];
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let data = cast_add_data("determinism check", 456, 77_777_777);
        let first = encode_message_data(&data).unwrap();
        let second = encode_message_data(&data).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_repeated_fields_omitted() {
        // No embeds, no mentions: the body encoding is text only
        let data = cast_add_data("x", 1, 1);
        let encoded = encode_message_data(&data).unwrap();
        // body = tag(0x2a) len(3) [0x0a 0x01 'x']
        assert_eq!(&encoded[encoded.len() - 5..], &[0x2a, 0x03, 0x0a, 0x01, b'x']);
    }

    #[test]
    fn test_empty_body_still_emitted() {
        // A cast with no text at all: the one-of member is present with
        // a zero-length payload, not omitted
        let data = cast_add_data("", 1, 1);
        let encoded = encode_message_data(&data).unwrap();
        assert_eq!(&encoded[encoded.len() - 2..], &[0x2a, 0x00]);
    }

    #[test]
    fn test_mentions_are_not_packed() {
        let body = CastAddBody {
            text: String::new(),
            embeds: Vec::new(),
            mentions: vec![Fid::new(1), Fid::new(2)],
            mention_positions: vec![0, 4],
            parent: None,
        };
        let encoded = encode_cast_add_body(&body);
        // One tag per element: field 3 (0x18) twice, field 4 (0x20) twice.
        // Position 0 is a present repeated element, so it IS emitted.
        assert_eq!(
            encoded.to_vec(),
            vec![0x18, 0x01, 0x18, 0x02, 0x20, 0x00, 0x20, 0x04]
        );
    }

    #[test]
    fn test_cast_id_encoding() {
        let cast_id = CastId::new(Fid::new(5), MessageHash::from_array([0xaa; 20]));
        let encoded = encode_cast_id(&cast_id);
        let mut expected = vec![0x08, 0x05, 0x12, 0x14];
        expected.extend_from_slice(&[0xaa; 20]);
        assert_eq!(encoded.to_vec(), expected);
    }

    #[test]
    fn test_embed_one_of() {
        let url = encode_embed(&Embed::Url("https://a.io".into()));
        assert_eq!(url[0], 0x0a); // field 1, length-delimited

        let cast = encode_embed(&Embed::Cast(CastId::new(
            Fid::new(9),
            MessageHash::from_array([0; 20]),
        )));
        assert_eq!(cast[0], 0x12); // field 2, length-delimited
    }

    #[test]
    fn test_parent_one_of_fields() {
        let mut body = CastAddBody::from_text("reply");
        body.parent = Some(CastParent::Url("chain://channel".into()));
        let encoded = encode_cast_add_body(&body);
        // Parent URL lands at field 6: tag (6 << 3) | 2 == 0x32
        assert!(encoded.to_vec().contains(&0x32));

        body.parent = Some(CastParent::Cast(CastId::new(
            Fid::new(2),
            MessageHash::from_array([1; 20]),
        )));
        let encoded = encode_cast_add_body(&body);
        // Parent cast id lands at field 5: tag (5 << 3) | 2 == 0x2a
        assert!(encoded.to_vec().contains(&0x2a));
    }

    #[test]
    fn test_reaction_encoding() {
        let data = MessageData::new(
            MessageType::ReactionAdd,
            Fid::new(7),
            FarcasterTime::from_secs(50),
            FarcasterNetwork::Mainnet,
            MessageBody::Reaction(ReactionBody {
                reaction_type: ReactionType::Like,
                target: ReactionTarget::Cast(CastId::new(
                    Fid::new(3),
                    MessageHash::from_array([0x11; 20]),
                )),
            }),
        )
        .unwrap();
        let encoded = encode_message_data(&data).unwrap();

        // Header, then reaction body at field 7 (tag 0x3a)
        assert_eq!(&encoded[..8], &[0x08, 0x03, 0x10, 0x07, 0x18, 0x32, 0x20, 0x01]);
        assert_eq!(encoded[8], 0x3a);
        // Body: type=Like(1) then nested target cast id at field 2
        assert_eq!(&encoded[10..12], &[0x08, 0x01]);
        assert_eq!(encoded[12], 0x12);
    }

    #[test]
    fn test_link_and_user_data_bodies() {
        let link = encode_link_body(&LinkBody {
            link_type: "follow".into(),
            display_timestamp: None,
            target_fid: Fid::new(42),
        });
        let mut expected = vec![0x0a, 0x06];
        expected.extend_from_slice(b"follow");
        expected.extend_from_slice(&[0x18, 0x2a]);
        assert_eq!(link.to_vec(), expected);

        let user_data = encode_user_data_body(&UserDataBody {
            data_type: UserDataType::Bio,
            value: "hi".into(),
        });
        assert_eq!(user_data.to_vec(), vec![0x08, 0x03, 0x12, 0x02, b'h', b'i']);
    }

    #[test]
    fn test_verification_body_rejected() {
        let data = MessageData::new(
            MessageType::VerificationAdd,
            Fid::new(1),
            FarcasterTime::from_secs(1),
            FarcasterNetwork::Mainnet,
            MessageBody::VerificationAdd(VerificationAddBody {
                address: vec![0; 20],
                claim_signature: vec![0; 65],
                block_hash: vec![0; 32],
            }),
        )
        .unwrap();
        let result = encode_message_data(&data);
        assert!(matches!(result, Err(CoreError::UnsupportedBody { .. })));
    }

    #[test]
    fn test_envelope_field_order() {
        let envelope = encode_message_envelope(
            &[0x08, 0x01],
            &[0xaa; 20],
            1,
            &[0xbb; 64],
            1,
            &[0xcc; 32],
        );

        // 1=data
        assert_eq!(&envelope[..4], &[0x0a, 0x02, 0x08, 0x01]);
        // 2=hash
        assert_eq!(&envelope[4..6], &[0x12, 0x14]);
        // 3=hash_scheme follows the 20 hash bytes
        assert_eq!(&envelope[26..28], &[0x18, 0x01]);
        // 4=signature
        assert_eq!(&envelope[28..30], &[0x22, 0x40]);
        // 5=signature_scheme follows the 64 signature bytes
        assert_eq!(&envelope[94..96], &[0x28, 0x01]);
        // 6=signer
        assert_eq!(&envelope[96..98], &[0x32, 0x20]);
        assert_eq!(envelope.len(), 98 + 32);
    }
}
