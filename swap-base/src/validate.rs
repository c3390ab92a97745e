//! Consistency checks between a decoded order record and its derived
//! addresses.
//!
//! The three checks are independent, but they run seller first, order
//! address second and order wallet last so the first failure is the most
//! specific diagnostic.

use crate::derive;
use crate::error::ValidationError;
use crate::order::{OrderDescriptor, OrderRecord};
use solana_sdk::pubkey::Pubkey;

/// Verifies a decoded record against the expected seller, its on-chain
/// address and the derived order wallet.
///
/// The order-wallet check needs the sell-token mint, which only the current
/// record layout carries; a legacy record fails with
/// [`ValidationError::SellMintUnknown`] here and must be checked through
/// [`check_descriptor`] instead.
pub fn check_order(
    program_id: &Pubkey,
    order: &OrderRecord,
    expected_address: Option<&Pubkey>,
    expected_seller: Option<&Pubkey>,
) -> Result<(), ValidationError> {
    check_identity(program_id, order, expected_address, expected_seller)?;
    let sell_mint = order
        .token_mint
        .as_ref()
        .ok_or(ValidationError::SellMintUnknown)?;
    check_order_wallet(program_id, order, sell_mint)
}

/// [`check_order`] for a descriptor, using the RPC-resolved sell mint so
/// legacy-layout records are checkable as well.
pub fn check_descriptor(
    program_id: &Pubkey,
    order: &OrderDescriptor,
    expected_address: Option<&Pubkey>,
    expected_seller: Option<&Pubkey>,
) -> Result<(), ValidationError> {
    check_identity(program_id, &order.record, expected_address, expected_seller)?;
    check_order_wallet(program_id, &order.record, &order.sell_token.mint)
}

fn check_identity(
    program_id: &Pubkey,
    order: &OrderRecord,
    expected_address: Option<&Pubkey>,
    expected_seller: Option<&Pubkey>,
) -> Result<(), ValidationError> {
    if let Some(seller) = expected_seller {
        if order.seller != *seller {
            return Err(ValidationError::SellerMismatch);
        }
    }

    if let Some(address) = expected_address {
        let (expected, _) =
            derive::order_address(program_id, &order.seller, order.creation_slot)?;
        if expected != *address {
            return Err(ValidationError::AddressMismatch { expected });
        }
    }

    Ok(())
}

fn check_order_wallet(
    program_id: &Pubkey,
    order: &OrderRecord,
    sell_mint: &Pubkey,
) -> Result<(), ValidationError> {
    let (authority, _) = derive::order_wallet_authority(program_id, &order.seller)?;
    let expected = derive::order_wallet_address(sell_mint, &authority);
    if expected != order.order_wallet {
        return Err(ValidationError::WalletMismatch { expected });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_order(program_id: &Pubkey) -> (OrderRecord, Pubkey) {
        let seller = Pubkey::new_unique();
        let sell_mint = Pubkey::new_unique();
        let creation_slot = 1234u64;

        let (authority, _) = derive::order_wallet_authority(program_id, &seller).unwrap();
        let order_wallet = derive::order_wallet_address(&sell_mint, &authority);
        let (address, _) = derive::order_address(program_id, &seller, creation_slot).unwrap();

        let record = OrderRecord {
            creation_slot,
            seller,
            sell_amount: 300,
            order_wallet,
            token_mint: Some(sell_mint),
            price_mint: Pubkey::new_unique(),
            buy_amount: 900,
            min_sell_amount: 10,
            remains_to_fill: 300,
            is_private: false,
        };
        (record, address)
    }

    #[test]
    fn accepts_a_consistent_record() {
        let program_id = Pubkey::new_unique();
        let (record, address) = valid_order(&program_id);
        check_order(&program_id, &record, Some(&address), Some(&record.seller)).unwrap();
    }

    #[test]
    fn rejects_seller_mismatch_first() {
        let program_id = Pubkey::new_unique();
        let (record, address) = valid_order(&program_id);
        let stranger = Pubkey::new_unique();
        assert_eq!(
            check_order(&program_id, &record, Some(&address), Some(&stranger)),
            Err(ValidationError::SellerMismatch)
        );
    }

    #[test]
    fn rejects_tampered_seller() {
        let program_id = Pubkey::new_unique();
        let (mut record, address) = valid_order(&program_id);
        record.seller = Pubkey::new_unique();
        // the recomputed order PDA no longer matches the account address
        assert!(matches!(
            check_order(&program_id, &record, Some(&address), None),
            Err(ValidationError::AddressMismatch { .. })
        ));
    }

    #[test]
    fn rejects_tampered_creation_slot() {
        let program_id = Pubkey::new_unique();
        let (mut record, address) = valid_order(&program_id);
        record.creation_slot += 1;
        let err = check_order(&program_id, &record, Some(&address), None).unwrap_err();
        match err {
            ValidationError::AddressMismatch { expected } => assert_ne!(expected, address),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn rejects_tampered_order_wallet() {
        let program_id = Pubkey::new_unique();
        let (mut record, address) = valid_order(&program_id);
        record.order_wallet = Pubkey::new_unique();
        assert!(matches!(
            check_order(&program_id, &record, Some(&address), None),
            Err(ValidationError::WalletMismatch { .. })
        ));
    }

    #[test]
    fn rejects_tampered_sell_mint() {
        let program_id = Pubkey::new_unique();
        let (mut record, address) = valid_order(&program_id);
        record.token_mint = Some(Pubkey::new_unique());
        assert!(matches!(
            check_order(&program_id, &record, Some(&address), None),
            Err(ValidationError::WalletMismatch { .. })
        ));
    }

    #[test]
    fn legacy_record_needs_a_resolved_mint() {
        let program_id = Pubkey::new_unique();
        let (mut record, address) = valid_order(&program_id);
        let sell_mint = record.token_mint.take().unwrap();

        assert_eq!(
            check_order(&program_id, &record, Some(&address), None),
            Err(ValidationError::SellMintUnknown)
        );

        // through the descriptor the same record checks out
        let descriptor = OrderDescriptor {
            record,
            sell_token: crate::order::TokenInfo { mint: sell_mint, decimals: 6 },
            buy_token: crate::order::TokenInfo { mint: Pubkey::new_unique(), decimals: 6 },
        };
        check_descriptor(&program_id, &descriptor, Some(&address), None).unwrap();
    }

    #[test]
    fn checks_pass_without_optional_expectations() {
        let program_id = Pubkey::new_unique();
        let (record, _) = valid_order(&program_id);
        check_order(&program_id, &record, None, None).unwrap();
    }
}
