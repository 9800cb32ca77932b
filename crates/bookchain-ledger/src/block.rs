use bookchain_crypto::ContentHasher;
use bookchain_types::{Checkout, Digest, Timestamp};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::LedgerError;

/// One link of the checkout chain.
///
/// Fields are private to the crate: the only public constructors compute the
/// digest, so a block built here always satisfies its own digest. Blocks that
/// arrive through deserialization carry whatever digest they were given and
/// must go through [`crate::ChainValidator`] before being trusted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "hash")]
    pub(crate) digest: Digest,
    #[serde(
        rename = "prevHash",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_digest_as_none"
    )]
    pub(crate) previous_digest: Option<Digest>,
    #[serde(rename = "data")]
    pub(crate) payload: Checkout,
    pub(crate) position: u64,
    pub(crate) timestamp: Timestamp,
}

impl Block {
    /// Build a block and compute its digest.
    pub fn new(
        position: u64,
        timestamp: Timestamp,
        payload: Checkout,
        previous_digest: Option<Digest>,
    ) -> Result<Self, LedgerError> {
        let digest = compute_digest(position, &timestamp, &payload, previous_digest.as_ref())?;
        Ok(Self {
            digest,
            previous_digest,
            payload,
            position,
            timestamp,
        })
    }

    /// The genesis block: position 0, no predecessor, genesis-flagged payload.
    pub fn genesis(timestamp: Timestamp) -> Result<Self, LedgerError> {
        Self::new(0, timestamp, Checkout::genesis(), None)
    }

    /// Build the successor of `predecessor` carrying `payload`.
    pub fn next(
        predecessor: &Block,
        payload: Checkout,
        timestamp: Timestamp,
    ) -> Result<Self, LedgerError> {
        let position = predecessor
            .position
            .checked_add(1)
            .ok_or(LedgerError::PositionOverflow(predecessor.position))?;
        Self::new(position, timestamp, payload, Some(predecessor.digest))
    }

    pub fn digest(&self) -> Digest {
        self.digest
    }

    pub fn previous_digest(&self) -> Option<Digest> {
        self.previous_digest
    }

    pub fn payload(&self) -> &Checkout {
        &self.payload
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// Position 0, no predecessor, genesis-flagged payload.
    pub fn is_genesis(&self) -> bool {
        self.position == 0 && self.previous_digest.is_none() && self.payload.is_genesis
    }

    /// Recompute the digest from the block's other four fields.
    pub fn recompute_digest(&self) -> Result<Digest, LedgerError> {
        compute_digest(
            self.position,
            &self.timestamp,
            &self.payload,
            self.previous_digest.as_ref(),
        )
    }

    /// `true` when the stored digest matches the block's content.
    pub fn verify_digest(&self) -> bool {
        self.recompute_digest()
            .map(|digest| digest == self.digest)
            .unwrap_or(false)
    }
}

/// Bytes hashed into a block digest.
///
/// Concatenation, in order, of: `position` as decimal digits, the timestamp
/// text, the canonical JSON of the payload, and the previous digest as
/// lowercase hex (nothing for genesis).
pub fn digest_input(
    position: u64,
    timestamp: &Timestamp,
    payload: &Checkout,
    previous_digest: Option<&Digest>,
) -> Result<Vec<u8>, LedgerError> {
    let mut input = position.to_string().into_bytes();
    input.extend_from_slice(timestamp.as_str().as_bytes());
    input.extend_from_slice(&payload.canonical_bytes()?);
    if let Some(previous) = previous_digest {
        input.extend_from_slice(previous.to_hex().as_bytes());
    }
    Ok(input)
}

/// SHA-256 of [`digest_input`].
pub fn compute_digest(
    position: u64,
    timestamp: &Timestamp,
    payload: &Checkout,
    previous_digest: Option<&Digest>,
) -> Result<Digest, LedgerError> {
    let input = digest_input(position, timestamp, payload, previous_digest)?;
    Ok(ContentHasher::hash(&input))
}

fn empty_digest_as_none<'de, D>(deserializer: D) -> Result<Option<Digest>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(hex) => Digest::from_hex(hex).map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::from(s)
    }

    fn checkout() -> Checkout {
        Checkout::new("B1", "alice", "2024-01-01")
    }

    #[test]
    fn genesis_digest_covers_its_fields() {
        let genesis = Block::genesis(ts("2024-01-01T00:00:00Z")).unwrap();
        assert_eq!(genesis.position(), 0);
        assert!(genesis.previous_digest().is_none());
        assert!(genesis.payload().is_genesis);
        assert!(genesis.is_genesis());
        let expected = compute_digest(0, genesis.timestamp(), genesis.payload(), None).unwrap();
        assert_eq!(genesis.digest(), expected);
    }

    #[test]
    fn next_links_and_increments() {
        let genesis = Block::genesis(ts("t0")).unwrap();
        let block = Block::next(&genesis, checkout(), ts("t1")).unwrap();
        assert_eq!(block.position(), 1);
        assert_eq!(block.previous_digest(), Some(genesis.digest()));
        assert!(block.verify_digest());
        assert!(!block.is_genesis());
    }

    #[test]
    fn position_is_encoded_as_decimal_digits() {
        let input = digest_input(300, &ts("T"), &checkout(), None).unwrap();
        assert!(input.starts_with(b"300T{"));
    }

    #[test]
    fn previous_digest_is_appended_as_hex() {
        let prev = Digest::from_hash([0xab; 32]);
        let input = digest_input(1, &ts("T"), &checkout(), Some(&prev)).unwrap();
        assert!(input.ends_with("ab".repeat(32).as_bytes()));
    }

    #[test]
    fn each_field_changes_the_digest() {
        let prev = Digest::from_hash([1; 32]);
        let base = compute_digest(1, &ts("t"), &checkout(), Some(&prev)).unwrap();

        let moved = compute_digest(2, &ts("t"), &checkout(), Some(&prev)).unwrap();
        let later = compute_digest(1, &ts("u"), &checkout(), Some(&prev)).unwrap();
        let other_user = Checkout::new("B1", "bob", "2024-01-01");
        let changed = compute_digest(1, &ts("t"), &other_user, Some(&prev)).unwrap();
        let relinked =
            compute_digest(1, &ts("t"), &checkout(), Some(&Digest::from_hash([2; 32]))).unwrap();

        for other in [moved, later, changed, relinked] {
            assert_ne!(base, other);
        }
    }

    #[test]
    fn tampered_payload_fails_digest_check() {
        let genesis = Block::genesis(ts("t0")).unwrap();
        let mut block = Block::next(&genesis, checkout(), ts("t1")).unwrap();
        block.payload.user = "mallory".into();
        assert!(!block.verify_digest());
    }

    #[test]
    fn wire_format_uses_short_names_and_omits_empty_link() {
        let genesis = Block::genesis(ts("t0")).unwrap();
        let value = serde_json::to_value(&genesis).unwrap();
        assert_eq!(value["hash"], genesis.digest().to_hex());
        assert_eq!(value["position"], 0);
        assert_eq!(value["timestamp"], "t0");
        assert_eq!(value["data"]["is_genesis"], true);
        assert!(value.get("prevHash").is_none());

        let block = Block::next(&genesis, checkout(), ts("t1")).unwrap();
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["prevHash"], genesis.digest().to_hex());
        assert_eq!(value["data"]["user"], "alice");
    }

    #[test]
    fn empty_prev_hash_decodes_as_none() {
        let genesis = Block::genesis(ts("t0")).unwrap();
        let mut value = serde_json::to_value(&genesis).unwrap();
        value["prevHash"] = serde_json::Value::from("");
        let decoded: Block = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, genesis);
    }

    #[test]
    fn next_refuses_to_overflow() {
        let mut tail = Block::genesis(ts("t0")).unwrap();
        tail.position = u64::MAX;
        let err = Block::next(&tail, checkout(), ts("t1")).unwrap_err();
        assert_eq!(err, LedgerError::PositionOverflow(u64::MAX));
    }

    proptest! {
        #[test]
        fn digest_is_deterministic(
            position in any::<u64>(),
            stamp in ".{0,32}",
            user in "[a-z]{0,12}",
        ) {
            let payload = Checkout::new("B", user, "2024-01-01");
            let a = compute_digest(position, &ts(&stamp), &payload, None).unwrap();
            let b = compute_digest(position, &ts(&stamp), &payload, None).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn distinct_positions_give_distinct_digests(a in any::<u64>(), b in any::<u64>()) {
            prop_assume!(a != b);
            let payload = checkout();
            let da = compute_digest(a, &ts("t"), &payload, None).unwrap();
            let db = compute_digest(b, &ts("t"), &payload, None).unwrap();
            prop_assert_ne!(da, db);
        }
    }
}
