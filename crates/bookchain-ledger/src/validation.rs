use serde::Serialize;

use crate::block::Block;
use crate::error::Rejection;

/// Result of whole-chain validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub block_count: u64,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific integrity violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub position: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingGenesis,
    MalformedGenesis,
    MisplacedGenesis,
    BrokenLink,
    DigestMismatch,
    PositionGap,
}

/// Rules deciding whether a block may follow another.
pub struct ChainValidator;

impl ChainValidator {
    /// `true` if `candidate` legitimately extends `predecessor`.
    pub fn is_valid_extension(candidate: &Block, predecessor: &Block) -> bool {
        Self::check_extension(candidate, predecessor).is_ok()
    }

    /// Run the extension checks in order and name the first one that fails:
    /// link to the predecessor's digest, self-digest integrity, then position.
    pub fn check_extension(candidate: &Block, predecessor: &Block) -> Result<(), Rejection> {
        if !links_to(candidate, predecessor) {
            return Err(Rejection::BrokenLink {
                position: candidate.position(),
            });
        }
        if !candidate.verify_digest() {
            return Err(Rejection::DigestMismatch {
                position: candidate.position(),
            });
        }
        if !follows(candidate, predecessor) {
            return Err(Rejection::PositionGap {
                expected: predecessor.position().saturating_add(1),
                actual: candidate.position(),
            });
        }
        Ok(())
    }

    /// Walk a whole chain and collect every violation.
    pub fn validate_chain(blocks: &[Block]) -> ValidationReport {
        let mut violations = Vec::new();

        match blocks.first() {
            None => violations.push(Violation {
                position: 0,
                kind: ViolationKind::MissingGenesis,
                description: "chain has no genesis block".into(),
            }),
            Some(genesis) => {
                if !genesis.is_genesis() {
                    violations.push(Violation {
                        position: genesis.position(),
                        kind: ViolationKind::MalformedGenesis,
                        description: "first block is not a genesis block".into(),
                    });
                }
                if !genesis.verify_digest() {
                    violations.push(Violation {
                        position: genesis.position(),
                        kind: ViolationKind::DigestMismatch,
                        description: "genesis digest does not match computed".into(),
                    });
                }
            }
        }

        for pair in blocks.windows(2) {
            let (predecessor, block) = (&pair[0], &pair[1]);
            let position = block.position();

            if block.payload().is_genesis {
                violations.push(Violation {
                    position,
                    kind: ViolationKind::MisplacedGenesis,
                    description: "genesis payload after the first block".into(),
                });
            }
            if !links_to(block, predecessor) {
                violations.push(Violation {
                    position,
                    kind: ViolationKind::BrokenLink,
                    description: "previous digest link mismatch".into(),
                });
            }
            if !block.verify_digest() {
                violations.push(Violation {
                    position,
                    kind: ViolationKind::DigestMismatch,
                    description: "block digest does not match computed".into(),
                });
            }
            if !follows(block, predecessor) {
                violations.push(Violation {
                    position,
                    kind: ViolationKind::PositionGap,
                    description: format!(
                        "expected position {}, got {position}",
                        predecessor.position().saturating_add(1)
                    ),
                });
            }
        }

        ValidationReport {
            block_count: blocks.len() as u64,
            violations,
        }
    }
}

fn links_to(candidate: &Block, predecessor: &Block) -> bool {
    candidate.previous_digest() == Some(predecessor.digest())
}

fn follows(candidate: &Block, predecessor: &Block) -> bool {
    predecessor.position().checked_add(1) == Some(candidate.position())
}

#[cfg(test)]
mod tests {
    use bookchain_types::{Checkout, Digest, Timestamp};

    use super::*;

    fn chain(len: usize) -> Vec<Block> {
        let mut blocks = vec![Block::genesis(Timestamp::from("t0")).unwrap()];
        for i in 1..len {
            let next = Block::next(
                &blocks[i - 1],
                Checkout::new(format!("B{i}"), "alice", "2024-01-01"),
                Timestamp::from(format!("t{i}")),
            )
            .unwrap();
            blocks.push(next);
        }
        blocks
    }

    #[test]
    fn successor_is_valid_extension() {
        let blocks = chain(2);
        assert!(ChainValidator::is_valid_extension(&blocks[1], &blocks[0]));
    }

    #[test]
    fn position_off_by_one_is_rejected() {
        let genesis = Block::genesis(Timestamp::from("t0")).unwrap();
        let skipped = Block::new(
            2,
            Timestamp::from("t1"),
            Checkout::new("B1", "alice", "2024-01-01"),
            Some(genesis.digest()),
        )
        .unwrap();
        assert!(!ChainValidator::is_valid_extension(&skipped, &genesis));
        assert_eq!(
            ChainValidator::check_extension(&skipped, &genesis),
            Err(Rejection::PositionGap {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn wrong_link_is_rejected_first() {
        let genesis = Block::genesis(Timestamp::from("t0")).unwrap();
        let stray = Block::new(
            1,
            Timestamp::from("t1"),
            Checkout::new("B1", "alice", "2024-01-01"),
            Some(Digest::from_hash([9; 32])),
        )
        .unwrap();
        assert_eq!(
            ChainValidator::check_extension(&stray, &genesis),
            Err(Rejection::BrokenLink { position: 1 })
        );
    }

    #[test]
    fn forged_digest_is_rejected() {
        let mut blocks = chain(2);
        blocks[1].digest = Digest::from_hash([7; 32]);
        assert_eq!(
            ChainValidator::check_extension(&blocks[1], &blocks[0]),
            Err(Rejection::DigestMismatch { position: 1 })
        );
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let mut blocks = chain(2);
        blocks[1].payload.book_id = "B999".into();
        assert!(!ChainValidator::is_valid_extension(&blocks[1], &blocks[0]));
    }

    #[test]
    fn predecessor_at_max_position_has_no_successor() {
        let mut blocks = chain(2);
        blocks[0].position = u64::MAX;
        blocks[1].previous_digest = Some(blocks[0].digest);
        blocks[1].digest = blocks[1].recompute_digest().unwrap();
        assert!(matches!(
            ChainValidator::check_extension(&blocks[1], &blocks[0]),
            Err(Rejection::PositionGap { .. })
        ));
    }

    #[test]
    fn valid_chain_passes() {
        let report = ChainValidator::validate_chain(&chain(4));
        assert!(report.is_valid());
        assert_eq!(report.block_count, 4);
    }

    #[test]
    fn empty_chain_misses_genesis() {
        let report = ChainValidator::validate_chain(&[]);
        assert!(!report.is_valid());
        assert_eq!(report.violations[0].kind, ViolationKind::MissingGenesis);
    }

    #[test]
    fn report_collects_every_violation() {
        let mut blocks = chain(4);
        blocks[1].payload.user = "mallory".into();
        blocks[3].previous_digest = Some(Digest::from_hash([0; 32]));

        let report = ChainValidator::validate_chain(&blocks);
        let kinds: Vec<_> = report
            .violations
            .iter()
            .map(|v| (v.position, v.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (1, ViolationKind::DigestMismatch),
                (3, ViolationKind::BrokenLink),
                (3, ViolationKind::DigestMismatch),
            ]
        );
    }

    #[test]
    fn non_genesis_first_block_is_flagged() {
        let blocks = chain(3);
        let report = ChainValidator::validate_chain(&blocks[1..]);
        assert_eq!(report.violations[0].kind, ViolationKind::MalformedGenesis);
    }

    #[test]
    fn report_serializes_kinds_in_snake_case() {
        let report = ChainValidator::validate_chain(&[]);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["violations"][0]["kind"], "missing_genesis");
    }
}
