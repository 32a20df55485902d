// ============================================
// File: crates/hubcast-core/src/protocol/mod.rs
// ============================================
//! # Protocol Module
//!
//! ## Creation Reason
//! Defines the hub wire protocol from the client side: typed message
//! bodies and their canonical binary encoding.
//!
//! ## Main Functionality
//!
//! ### Submodules
//! - [`bodies`]: Typed message structures and wire-value enums
//! - [`wire`]: Deterministic tag/varint encoder
//!
//! ## Protocol Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Authoring Phase                         │
//! │                                                             │
//! │  MessageData ──── encode_message_data ────► canonical bytes │
//! │                                                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     Submission Phase                        │
//! │                                                             │
//! │  Message ──── encode_message_envelope ────► POST body       │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format Principles
//! - Protobuf-wire-compatible subset: varint (0) and length-delimited (2)
//! - Ascending field-number order, no padding
//! - Default-valued scalars and empty repeated fields are omitted
//! - One-of members are always emitted
//!
//! ## ⚠️ Important Note for Next Developer
//! - Field numbers are protocol constants shared with every hub
//! - Byte-level test vectors in [`wire`] are the compatibility contract;
//!   keep them in sync with the reference implementation
//!
//! ## Last Modified
//! v0.1.0 - Initial protocol definitions

pub mod bodies;
pub mod wire;

// Re-export primary types
pub use bodies::{
    CastAddBody, CastId, CastParent, CastRemoveBody, Embed, FarcasterNetwork, HashScheme,
    LinkBody, MessageBody, MessageData, MessageType, ReactionBody, ReactionTarget, ReactionType,
    SignatureScheme, UserDataBody, UserDataType, VerificationAddBody,
};
pub use wire::{encode_message_data, encode_message_envelope};
