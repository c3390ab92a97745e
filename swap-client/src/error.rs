//! Error types for the p2p-swap RPC client library.

use solana_sdk::pubkey::Pubkey;
use swap_base::{BuildError, DecodeError, DerivationError, ValidationError};
use thiserror::Error;

/// Main error type for the p2p-swap client.
///
/// Transport failures wrap the underlying RPC error unchanged; the caller
/// decides whether to retry. Protocol failures carry the core taxonomy
/// through transparently.
#[derive(Error, Debug)]
pub enum ClientError {
    /// RPC transport errors, propagated as-is.
    #[error("rpc error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    /// The requested order account does not exist.
    #[error("order {0} not found")]
    OrderNotFound(Pubkey),

    /// A supporting account (order wallet, mint) does not exist.
    #[error("account {0} not found")]
    AccountNotFound(Pubkey),

    /// The order wallet is not a parseable SPL token account.
    #[error("account {0} is not a valid SPL token account")]
    InvalidTokenAccount(Pubkey),

    /// A referenced mint account is not a parseable SPL mint.
    #[error("account {0} is not a valid SPL token mint")]
    InvalidMint(Pubkey),

    /// Every order address derivable for the current slot is taken.
    #[error("order address {0} for the current slot is already in use")]
    OrderSlotTaken(Pubkey),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Derivation(#[from] DerivationError),

    #[error(transparent)]
    Build(#[from] BuildError),
}
