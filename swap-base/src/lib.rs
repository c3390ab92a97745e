//! Protocol core for the p2p-swap on-chain program.
//!
//! Everything here is pure: decoding and encoding of the fixed-layout order
//! account, derivation of the program's deterministic addresses, consistency
//! checks of decoded records, byte-exact instruction construction and the
//! unlock-key text codec. Network access, signing and submission live in the
//! `swap-client` crate.

pub mod derive;
pub mod error;
pub mod instruction;
pub mod order;
pub mod txn;
pub mod unlock;
pub mod validate;


use solana_sdk::pubkey::Pubkey;

/// Devnet deployment of the p2p-swap program.
pub const P2P_SWAP_DEVNET: Pubkey =
    solana_sdk::pubkey!("AzVuKVf8qQjHBTyjEUZbr6zRvinZvjpuFZWMXPd76Fzx");

// re-export the component surface
pub use derive::{order_address, order_wallet_address, order_wallet_authority};
pub use error::{BuildError, DecodeError, DerivationError, DomainError, ValidationError};
pub use instruction::{
    SwapInstruction, create_order_instruction, fill_order_instruction,
    unlock_signature_instruction,
};
pub use order::{
    LEGACY_ORDER_RECORD_LEN, ORDER_RECORD_LEN, OrderDescriptor, OrderLayout, OrderRecord,
    TokenInfo, amount_to_display,
};
pub use txn::{
    CreateOrderRequest, FillOrderRequest, buy_token_amount, create_order_instructions,
    fill_order_instructions,
};
pub use unlock::{UNLOCK_KEY_LEN, decode_unlock_key, encode_unlock_key, is_unlock_key};
pub use validate::{check_descriptor, check_order};
