//! Byte-exact instruction construction for the p2p-swap program.
//!
//! The account order, writability and signer flags of every instruction are
//! part of the wire contract with the on-chain program; nothing here may be
//! reordered, merged or omitted.

use bytemuck::{Pod, Zeroable, bytes_of};
use solana_sdk::ed25519_program;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;
use solana_sdk::sysvar;
use spl_associated_token_account::get_associated_token_address;

use crate::derive;
use crate::error::BuildError;
use crate::txn::{CreateOrderRequest, FillOrderRequest};

/// Program operation discriminants; the leading byte of every payload.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapInstruction {
    CreatePublicOrder = 1,
    CreatePrivateOrder = 2,
    /// Reserved by the program; this client never issues it.
    RevokeOrder = 3,
    FillOrder = 4,
}

/// Builds the create-order instruction.
///
/// Payload: discriminant, then sell amount, buy amount, minimum sell amount
/// and creation slot as little-endian u64.
pub fn create_order_instruction(req: &CreateOrderRequest) -> Result<Instruction, BuildError> {
    let signer_wallet = get_associated_token_address(&req.signer, &req.sell_token);
    let (authority, _) = derive::order_wallet_authority(&req.program_id, &req.signer)?;
    let order_wallet = derive::order_wallet_address(&req.sell_token, &authority);
    let (order_account, _) =
        derive::order_address(&req.program_id, &req.signer, req.creation_slot)?;

    let discriminant = if req.is_private {
        SwapInstruction::CreatePrivateOrder
    } else {
        SwapInstruction::CreatePublicOrder
    };

    let mut data = Vec::with_capacity(33);
    data.push(discriminant as u8);
    data.extend_from_slice(&req.sell_amount.to_le_bytes());
    data.extend_from_slice(&req.buy_amount.to_le_bytes());
    data.extend_from_slice(&req.min_sell_amount.to_le_bytes());
    data.extend_from_slice(&req.creation_slot.to_le_bytes());

    let accounts = vec![
        AccountMeta::new_readonly(sysvar::clock::id(), false),
        AccountMeta::new(req.signer, true),
        AccountMeta::new(signer_wallet, false),
        AccountMeta::new_readonly(req.sell_token, false),
        AccountMeta::new_readonly(authority, false),
        AccountMeta::new_readonly(req.buy_token, false),
        AccountMeta::new(order_wallet, false),
        AccountMeta::new_readonly(spl_token::id(), false),
        AccountMeta::new(order_account, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Ok(Instruction {
        program_id: req.program_id,
        accounts,
        data,
    })
}

/// Builds the fill-order instruction.
///
/// For private orders the instructions sysvar is inserted after the order
/// account; the program uses it to locate the preceding ed25519
/// verification instruction.
pub fn fill_order_instruction(req: &FillOrderRequest) -> Result<Instruction, BuildError> {
    let order = &req.order.record;
    let sell_mint = req.order.sell_token.mint;
    let buy_mint = req.order.buy_token.mint;

    let (authority, _) = derive::order_wallet_authority(&req.program_id, &order.seller)?;
    let buyer_buy_wallet = get_associated_token_address(&req.signer, &buy_mint);
    let seller_buy_wallet = get_associated_token_address(&order.seller, &buy_mint);
    let buyer_sell_wallet = get_associated_token_address(&req.signer, &sell_mint);

    let mut accounts = vec![
        AccountMeta::new_readonly(order.seller, false),
        AccountMeta::new(req.signer, true),
        AccountMeta::new(req.order_address, false),
    ];
    if order.is_private {
        accounts.push(AccountMeta::new_readonly(sysvar::instructions::id(), false));
    }
    accounts.extend([
        AccountMeta::new_readonly(authority, false),
        AccountMeta::new_readonly(sell_mint, false),
        AccountMeta::new(order.order_wallet, false),
        AccountMeta::new_readonly(buy_mint, false),
        AccountMeta::new(buyer_buy_wallet, false),
        AccountMeta::new(seller_buy_wallet, false),
        AccountMeta::new(buyer_sell_wallet, false),
        AccountMeta::new_readonly(spl_token::id(), false),
    ]);

    let mut data = Vec::with_capacity(9);
    data.push(SwapInstruction::FillOrder as u8);
    data.extend_from_slice(&req.sell_token_amount.to_le_bytes());

    Ok(Instruction {
        program_id: req.program_id,
        accounts,
        data,
    })
}

const PUBKEY_SERIALIZED_SIZE: usize = 32;
const SIGNATURE_SERIALIZED_SIZE: usize = 64;
const SIGNATURE_OFFSETS_SERIALIZED_SIZE: usize = 14;
const SIGNATURE_OFFSETS_START: usize = 2;
const DATA_START: usize = SIGNATURE_OFFSETS_SERIALIZED_SIZE + SIGNATURE_OFFSETS_START;

/// Offsets header of the native ed25519 program's instruction data.
#[derive(Default, Debug, Copy, Clone, Zeroable, Pod)]
#[repr(C)]
struct Ed25519SignatureOffsets {
    signature_offset: u16,
    signature_instruction_index: u16,
    public_key_offset: u16,
    public_key_instruction_index: u16,
    message_data_offset: u16,
    message_data_size: u16,
    message_instruction_index: u16,
}

/// Builds the native ed25519 verification instruction that binds the
/// seller's public key, the order address bytes as message and the unlock
/// signature. All offsets point into this instruction's own data
/// (instruction index `u16::MAX`).
pub fn unlock_signature_instruction(
    seller: &Pubkey,
    order_address: &Pubkey,
    signature: &[u8; 64],
) -> Instruction {
    let pubkey = seller.to_bytes();
    let message = order_address.to_bytes();

    let num_signatures: u8 = 1;
    let public_key_offset = DATA_START;
    let signature_offset = public_key_offset + PUBKEY_SERIALIZED_SIZE;
    let message_data_offset = signature_offset + SIGNATURE_SERIALIZED_SIZE;

    let mut data = Vec::with_capacity(message_data_offset + message.len());
    // padding byte keeps the offsets struct u16-aligned
    data.extend_from_slice(&[num_signatures, 0]);

    let offsets = Ed25519SignatureOffsets {
        signature_offset: signature_offset as u16,
        signature_instruction_index: u16::MAX,
        public_key_offset: public_key_offset as u16,
        public_key_instruction_index: u16::MAX,
        message_data_offset: message_data_offset as u16,
        message_data_size: message.len() as u16,
        message_instruction_index: u16::MAX,
    };
    data.extend_from_slice(bytes_of(&offsets));

    debug_assert_eq!(data.len(), public_key_offset);
    data.extend_from_slice(&pubkey);

    debug_assert_eq!(data.len(), signature_offset);
    data.extend_from_slice(signature);

    debug_assert_eq!(data.len(), message_data_offset);
    data.extend_from_slice(&message);

    Instruction {
        program_id: ed25519_program::id(),
        accounts: vec![],
        data,
    }
}
