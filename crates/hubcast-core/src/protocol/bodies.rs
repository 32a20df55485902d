// ============================================
// File: crates/hubcast-core/src/protocol/bodies.rs
// ============================================
//! # Protocol Message Definitions
//!
//! ## Creation Reason
//! Defines the typed structure of all hub protocol messages this client
//! can author, plus the enums that select and scope them.
//!
//! ## Main Functionality
//! - `MessageType` / `FarcasterNetwork` / scheme enums with wire values
//! - `MessageBody`: tagged union enforcing "exactly one body present"
//! - Body structs (`CastAddBody`, `ReactionBody`, ...) and references
//!   (`CastId`, `Embed`)
//! - `MessageData`: the signed envelope contents, validated on creation
//!
//! ## Wire Values
//! | Value | MessageType |
//! |-------|-------------|
//! | 1 | CastAdd |
//! | 2 | CastRemove |
//! | 3 | ReactionAdd |
//! | 4 | ReactionRemove |
//! | 5 | LinkAdd |
//! | 6 | LinkRemove |
//! | 7 | VerificationAdd |
//! | 11 | UserDataAdd |
//!
//! ## ⚠️ Important Note for Next Developer
//! - Enum values are wire constants shared with every hub - DO NOT renumber
//! - `MessageData::new` is the only constructor; it enforces that the
//!   body variant matches the declared type
//! - Add new body variants at the end and teach the encoder about them
//!   in the same change
//!
//! ## Last Modified
//! v0.1.0 - Initial message definitions

use serde::{Deserialize, Serialize};

use hubcast_common::time::FarcasterTime;
use hubcast_common::types::{Fid, MessageHash};

use crate::error::{CoreError, Result};

// ============================================
// MessageType
// ============================================

/// Protocol message type identifier.
///
/// Selects which body variant a message carries. Add/remove pairs share
/// a body shape (a `ReactionAdd` and a `ReactionRemove` both carry a
/// `ReactionBody`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    /// Add a new cast.
    CastAdd = 1,
    /// Remove an existing cast by hash.
    CastRemove = 2,
    /// Add a reaction to a cast.
    ReactionAdd = 3,
    /// Remove a previously added reaction.
    ReactionRemove = 4,
    /// Add a link (e.g. follow) to a target account.
    LinkAdd = 5,
    /// Remove a previously added link.
    LinkRemove = 6,
    /// Add an address verification.
    VerificationAdd = 7,
    /// Set a user-data field (display name, bio, ...).
    UserDataAdd = 11,
}

impl MessageType {
    /// Converts a wire value to a `MessageType`.
    #[must_use]
    pub const fn from_u64(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::CastAdd),
            2 => Some(Self::CastRemove),
            3 => Some(Self::ReactionAdd),
            4 => Some(Self::ReactionRemove),
            5 => Some(Self::LinkAdd),
            6 => Some(Self::LinkRemove),
            7 => Some(Self::VerificationAdd),
            11 => Some(Self::UserDataAdd),
            _ => None,
        }
    }

    /// Returns the wire value for this message type.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        *self as u64
    }

    /// Human-readable name, used in errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CastAdd => "CastAdd",
            Self::CastRemove => "CastRemove",
            Self::ReactionAdd => "ReactionAdd",
            Self::ReactionRemove => "ReactionRemove",
            Self::LinkAdd => "LinkAdd",
            Self::LinkRemove => "LinkRemove",
            Self::VerificationAdd => "VerificationAdd",
            Self::UserDataAdd => "UserDataAdd",
        }
    }
}

// ============================================
// FarcasterNetwork
// ============================================

/// Target network for a message.
///
/// Hubs reject messages stamped for a different network, so the value
/// is part of the signed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FarcasterNetwork {
    /// Production network.
    Mainnet = 1,
    /// Public test network.
    Testnet = 2,
    /// Local development network.
    Devnet = 3,
}

impl FarcasterNetwork {
    /// Returns the wire value for this network.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        *self as u64
    }
}

// ============================================
// Scheme Enums
// ============================================

/// Hash scheme for the message content hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HashScheme {
    /// BLAKE3 truncated to 20 bytes (the only accepted scheme).
    Blake3 = 1,
}

impl HashScheme {
    /// Returns the wire value for this scheme.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        *self as u64
    }
}

/// Signature scheme for the message signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SignatureScheme {
    /// Ed25519 over the 20-byte content hash (the only accepted scheme).
    Ed25519 = 1,
}

impl SignatureScheme {
    /// Returns the wire value for this scheme.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        *self as u64
    }
}

// ============================================
// ReactionType / UserDataType
// ============================================

/// Kind of reaction carried by a `ReactionBody`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ReactionType {
    /// A like.
    Like = 1,
    /// A recast (share).
    Recast = 2,
}

impl ReactionType {
    /// Returns the wire value for this reaction type.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        *self as u64
    }
}

/// Which user-data field a `UserDataBody` sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum UserDataType {
    /// Profile picture URL.
    Pfp = 1,
    /// Display name.
    Display = 2,
    /// Profile bio text.
    Bio = 3,
    /// Profile URL.
    Url = 5,
    /// Preferred username.
    Username = 6,
}

impl UserDataType {
    /// Returns the wire value for this user-data field.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        *self as u64
    }
}

// ============================================
// CastId / Embed
// ============================================

/// Reference to a specific cast: its author plus the truncated content
/// hash that identifies it on the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastId {
    /// FID of the cast author.
    pub fid: Fid,
    /// Truncated content hash of the cast.
    pub hash: MessageHash,
}

impl CastId {
    /// Creates a new `CastId`.
    #[must_use]
    pub const fn new(fid: Fid, hash: MessageHash) -> Self {
        Self { fid, hash }
    }
}

/// Content embedded in a cast: either an external URL or another cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Embed {
    /// An external URL.
    Url(String),
    /// A reference to another cast.
    Cast(CastId),
}

// ============================================
// Cast Bodies
// ============================================

/// The parent a cast replies to: another cast or an external channel URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastParent {
    /// Reply to another cast.
    Cast(CastId),
    /// Reply into a URL-addressed channel.
    Url(String),
}

/// Body of a `CastAdd` message: the text and attachments of a new cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CastAddBody {
    /// Cast text (may be empty when the cast is only embeds).
    pub text: String,
    /// Embedded URLs or cast references.
    pub embeds: Vec<Embed>,
    /// FIDs mentioned in the text.
    pub mentions: Vec<Fid>,
    /// Byte offsets into `text` where each mention is spliced.
    pub mention_positions: Vec<u32>,
    /// Optional parent this cast replies to.
    pub parent: Option<CastParent>,
}

impl CastAddBody {
    /// Creates a plain text cast body with no embeds or mentions.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Body of a `CastRemove` message: the hash of the cast to tombstone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastRemoveBody {
    /// Hash of the cast being removed.
    pub target_hash: MessageHash,
}

// ============================================
// Reaction / Link / UserData Bodies
// ============================================

/// Target of a reaction: a cast or a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionTarget {
    /// React to a cast.
    Cast(CastId),
    /// React to an external URL.
    Url(String),
}

/// Body shared by `ReactionAdd` and `ReactionRemove` messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionBody {
    /// Kind of reaction.
    pub reaction_type: ReactionType,
    /// What is being reacted to.
    pub target: ReactionTarget,
}

/// Body shared by `LinkAdd` and `LinkRemove` messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkBody {
    /// Link relationship, e.g. `"follow"`.
    pub link_type: String,
    /// Optional display timestamp distinct from the message timestamp.
    pub display_timestamp: Option<FarcasterTime>,
    /// FID the link points at.
    pub target_fid: Fid,
}

/// Body of a `UserDataAdd` message: one profile field and its new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDataBody {
    /// Which profile field is being set.
    pub data_type: UserDataType,
    /// The new value.
    pub value: String,
}

// ============================================
// Verification Body
// ============================================

/// Body of a `VerificationAdd` message.
///
/// Declared for model completeness; the wire encoder does not implement
/// this variant (see [`crate::protocol::wire`]) and rejects it with
/// [`CoreError::UnsupportedBody`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationAddBody {
    /// Address being verified.
    pub address: Vec<u8>,
    /// Signature over the verification claim.
    pub claim_signature: Vec<u8>,
    /// Block hash anchoring the claim.
    pub block_hash: Vec<u8>,
}

// ============================================
// MessageBody
// ============================================

/// The body of a message: exactly one variant, selected by
/// [`MessageType`].
///
/// Modeled as a sum type rather than optional-fields-on-one-struct so
/// that "exactly one body present" holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageBody {
    /// New cast.
    CastAdd(CastAddBody),
    /// Cast tombstone.
    CastRemove(CastRemoveBody),
    /// Reaction add/remove.
    Reaction(ReactionBody),
    /// Link add/remove.
    Link(LinkBody),
    /// User-data field update.
    UserData(UserDataBody),
    /// Address verification (declared; not wire-encodable).
    VerificationAdd(VerificationAddBody),
}

impl MessageBody {
    /// Human-readable variant name, used in errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CastAdd(_) => "CastAdd",
            Self::CastRemove(_) => "CastRemove",
            Self::Reaction(_) => "Reaction",
            Self::Link(_) => "Link",
            Self::UserData(_) => "UserData",
            Self::VerificationAdd(_) => "VerificationAdd",
        }
    }

    /// Checks whether this body variant is the one `message_type` selects.
    #[must_use]
    pub const fn matches_type(&self, message_type: MessageType) -> bool {
        matches!(
            (message_type, self),
            (MessageType::CastAdd, Self::CastAdd(_))
                | (MessageType::CastRemove, Self::CastRemove(_))
                | (MessageType::ReactionAdd | MessageType::ReactionRemove, Self::Reaction(_))
                | (MessageType::LinkAdd | MessageType::LinkRemove, Self::Link(_))
                | (MessageType::UserDataAdd, Self::UserData(_))
                | (MessageType::VerificationAdd, Self::VerificationAdd(_))
        )
    }
}

// ============================================
// MessageData
// ============================================

/// The signed contents of a protocol message.
///
/// # Lifecycle
/// Caller-constructed via [`MessageData::new`] and immutable from then
/// on: the hashing and signing pipeline consumes it by reference, and
/// [`crate::message::Message`] never exposes it mutably.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageData {
    message_type: MessageType,
    fid: Fid,
    timestamp: FarcasterTime,
    network: FarcasterNetwork,
    body: MessageBody,
}

impl MessageData {
    /// Creates message data, enforcing the type/body pairing.
    ///
    /// # Errors
    /// - `BodyMismatch` if `body` is not the variant `message_type` selects
    /// - `InvalidInput` (via `CommonError`) if `fid` is the reserved zero value
    pub fn new(
        message_type: MessageType,
        fid: Fid,
        timestamp: FarcasterTime,
        network: FarcasterNetwork,
        body: MessageBody,
    ) -> Result<Self> {
        if !fid.is_valid() {
            return Err(CoreError::Common(
                hubcast_common::error::CommonError::invalid_input("fid", "must be non-zero"),
            ));
        }
        if !body.matches_type(message_type) {
            return Err(CoreError::body_mismatch(message_type.name(), body.name()));
        }
        Ok(Self {
            message_type,
            fid,
            timestamp,
            network,
            body,
        })
    }

    /// Returns the message type.
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// Returns the author FID.
    #[must_use]
    pub const fn fid(&self) -> Fid {
        self.fid
    }

    /// Returns the protocol timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> FarcasterTime {
        self.timestamp
    }

    /// Returns the target network.
    #[must_use]
    pub const fn network(&self) -> FarcasterNetwork {
        self.network
    }

    /// Returns the message body.
    #[must_use]
    pub const fn body(&self) -> &MessageBody {
        &self.body
    }
}

// ============================================
// Tests
// ============================================
