//! Error taxonomy of the protocol core.
//!
//! Each component reports its own failure kind synchronously; nothing here is
//! retried internally and no variant stands in for a transport failure.

use solana_sdk::program_error::ProgramError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Account bytes could not be decoded as an order record.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Buffer length matches neither the current 169-byte layout nor the
    /// legacy 137-byte layout. Partial records are never parsed.
    #[error("account data is {actual} bytes, not a p2p-swap order record")]
    SizeMismatch { actual: usize },
}

/// A decoded record contradicts its derived addresses. A record failing any
/// of these checks must be discarded, not trusted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("order seller does not match the expected seller")]
    SellerMismatch,

    #[error("order account address does not match, expected {expected}")]
    AddressMismatch { expected: Pubkey },

    #[error("order wallet does not match, expected {expected}")]
    WalletMismatch { expected: Pubkey },

    /// The record carries no sell-token mint (legacy layout) and none was
    /// resolved for it, so the order-wallet check cannot run.
    #[error("sell token mint of the order is not known")]
    SellMintUnknown,

    #[error(transparent)]
    Derivation(#[from] DerivationError),
}

/// Zero or out-of-range amount in a create or fill request. Detected before
/// any network or signing call is attempted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("{field} must be greater than zero")]
    ZeroAmount { field: &'static str },

    #[error("minimum fill amount {min} exceeds sell amount {sell}")]
    MinAboveSellAmount { min: u64, sell: u64 },

    #[error("fill amount {requested} exceeds remaining order amount {remaining}")]
    FillExceedsRemaining { requested: u64, remaining: u64 },

    #[error("order remains-to-fill {remains} exceeds its sell amount {sell}")]
    RemainsExceedsSellAmount { remains: u64, sell: u64 },
}

/// Address derivation exhausted its bump-seed search space. Effectively
/// fatal; never retried.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationError {
    #[error("no valid bump seed exists for the requested derived address")]
    BumpSeedNotFound,
}

/// Failure while sequencing instructions for a transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Derivation(#[from] DerivationError),

    /// The order is private and no unlock signature was supplied.
    #[error("order is private and no unlock signature was supplied")]
    MissingUnlockKey,

    #[error("token instruction construction failed: {0}")]
    TokenInstruction(#[from] ProgramError),
}
