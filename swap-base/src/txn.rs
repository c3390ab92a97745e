//! Instruction sequencing for order creation and filling.
//!
//! The builders here are pure: the only facts an assembled transaction needs
//! from the chain (order-wallet existence, recent blockhash) are supplied by
//! the caller, so every failure in this module surfaces before any network
//! or signing call.

use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;
use spl_associated_token_account::instruction::create_associated_token_account;

use crate::derive;
use crate::error::{BuildError, DomainError};
use crate::instruction::{
    create_order_instruction, fill_order_instruction, unlock_signature_instruction,
};
use crate::order::{OrderDescriptor, OrderRecord};

/// Parameters for creating a new order.
#[derive(Debug, Clone)]
pub struct CreateOrderRequest {
    pub program_id: Pubkey,
    pub signer: Pubkey,
    pub sell_token: Pubkey,
    pub buy_token: Pubkey,
    pub sell_amount: u64,
    pub buy_amount: u64,
    pub min_sell_amount: u64,
    pub creation_slot: u64,
    pub is_private: bool,
}

impl CreateOrderRequest {
    /// Rejects zero or inconsistent amounts before anything is built.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.sell_amount == 0 {
            return Err(DomainError::ZeroAmount { field: "sell_amount" });
        }
        if self.buy_amount == 0 {
            return Err(DomainError::ZeroAmount { field: "buy_amount" });
        }
        if self.min_sell_amount == 0 {
            return Err(DomainError::ZeroAmount { field: "min_sell_amount" });
        }
        if self.min_sell_amount > self.sell_amount {
            return Err(DomainError::MinAboveSellAmount {
                min: self.min_sell_amount,
                sell: self.sell_amount,
            });
        }
        Ok(())
    }
}

/// Parameters for filling an existing order.
#[derive(Debug, Clone)]
pub struct FillOrderRequest {
    pub program_id: Pubkey,
    pub signer: Pubkey,
    pub order_address: Pubkey,
    pub order: OrderDescriptor,
    /// Amount of the order's sell token to acquire.
    pub sell_token_amount: u64,
    /// Seller signature over the order address; required iff the order is
    /// private.
    pub unlock_key: Option<[u8; 64]>,
}

impl FillOrderRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        let order = &self.order.record;
        if self.sell_token_amount == 0 {
            return Err(DomainError::ZeroAmount {
                field: "sell_token_amount",
            });
        }
        if self.sell_token_amount > order.remains_to_fill {
            return Err(DomainError::FillExceedsRemaining {
                requested: self.sell_token_amount,
                remaining: order.remains_to_fill,
            });
        }
        if order.remains_to_fill > order.sell_amount {
            return Err(DomainError::RemainsExceedsSellAmount {
                remains: order.remains_to_fill,
                sell: order.sell_amount,
            });
        }
        Ok(())
    }
}

/// Buy-token amount owed for acquiring `sell_token_amount` of the order's
/// sell token: `floor(amount * buy_amount / sell_amount)`.
///
/// Computed in u128 so full-range u64 amounts cannot overflow. The order's
/// `sell_amount` must be non-zero, which [`FillOrderRequest::validate`]
/// guarantees for any positive fill of a well-formed order.
pub fn buy_token_amount(sell_token_amount: u64, order: &OrderRecord) -> u64 {
    ((sell_token_amount as u128 * order.buy_amount as u128) / order.sell_amount as u128) as u64
}

/// Instruction sequence for order creation: an associated-token-account
/// creation for the order wallet when it does not exist yet, a delegate
/// approval letting the program move `sell_amount` of the signer's sell
/// token, and the create-order instruction itself.
pub fn create_order_instructions(
    req: &CreateOrderRequest,
    order_wallet_exists: bool,
) -> Result<Vec<Instruction>, BuildError> {
    req.validate()?;

    let mut instructions = Vec::with_capacity(3);

    if !order_wallet_exists {
        let (authority, _) = derive::order_wallet_authority(&req.program_id, &req.signer)?;
        instructions.push(create_associated_token_account(
            &req.signer,
            &authority,
            &req.sell_token,
            &spl_token::id(),
        ));
    }

    // The program moves the funds itself; the client only delegates.
    let signer_wallet = get_associated_token_address(&req.signer, &req.sell_token);
    instructions.push(spl_token::instruction::approve(
        &spl_token::id(),
        &signer_wallet,
        &req.program_id,
        &req.signer,
        &[],
        req.sell_amount,
    )?);

    instructions.push(create_order_instruction(req)?);
    Ok(instructions)
}

/// Instruction sequence for filling an order: a delegate approval for the
/// proportional buy-token amount, the ed25519 unlock verification for
/// private orders, and the fill instruction itself.
///
/// Fails with [`BuildError::MissingUnlockKey`] before building anything if
/// the order is private and no signature was supplied.
pub fn fill_order_instructions(req: &FillOrderRequest) -> Result<Vec<Instruction>, BuildError> {
    req.validate()?;

    let order = &req.order.record;
    let unlock_key = match (order.is_private, req.unlock_key) {
        (true, None) => return Err(BuildError::MissingUnlockKey),
        (true, Some(key)) => Some(key),
        (false, _) => None,
    };

    let mut instructions = Vec::with_capacity(3);

    let buyer_buy_wallet = get_associated_token_address(&req.signer, &req.order.buy_token.mint);
    instructions.push(spl_token::instruction::approve(
        &spl_token::id(),
        &buyer_buy_wallet,
        &req.program_id,
        &req.signer,
        &[],
        buy_token_amount(req.sell_token_amount, order),
    )?);

    if let Some(key) = unlock_key {
        instructions.push(unlock_signature_instruction(
            &order.seller,
            &req.order_address,
            &key,
        ));
    }

    instructions.push(fill_order_instruction(req)?);
    Ok(instructions)
}
