//! On-chain order record layout and codec.
//!
//! The record is a fixed-size little-endian structure. Two revisions exist on
//! chain: the current 169-byte layout carrying the sell-token mint, and the
//! legacy 137-byte layout without it. The two are told apart strictly by
//! exact account size; a buffer of any other length is rejected outright.

use crate::error::DecodeError;
use solana_sdk::pubkey::Pubkey;

/// Size of the current order record.
pub const ORDER_RECORD_LEN: usize = 169;
/// Size of the pre-token-mint record still found on older deployments.
pub const LEGACY_ORDER_RECORD_LEN: usize = 137;

/// Wire-format revision of an order record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderLayout {
    /// 137 bytes, no sell-token mint field.
    Legacy,
    /// 169 bytes, sell-token mint at offset 80.
    Current,
}

/// A decoded p2p-swap order account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    /// Slot the order was created in; part of the order PDA seeds.
    pub creation_slot: u64,
    pub seller: Pubkey,
    /// Total amount of the sell token offered by this order.
    pub sell_amount: u64,
    /// SPL token account holding the offered tokens, owned by the
    /// program-derived wallet authority.
    pub order_wallet: Pubkey,
    /// Mint of the token being sold. Absent on the legacy layout, where it
    /// is only discoverable through the order wallet's token account.
    pub token_mint: Option<Pubkey>,
    /// Mint of the token the seller wants in exchange.
    pub price_mint: Pubkey,
    /// Amount of the price token expected for a complete fill.
    pub buy_amount: u64,
    /// Minimum amount of the sell token per single fill.
    pub min_sell_amount: u64,
    /// Amount of the sell token still available.
    pub remains_to_fill: u64,
    /// Private orders require a seller-signed unlock key to fill.
    pub is_private: bool,
}

impl OrderRecord {
    pub fn layout(&self) -> OrderLayout {
        if self.token_mint.is_some() {
            OrderLayout::Current
        } else {
            OrderLayout::Legacy
        }
    }

    /// Exact packed size of this record.
    pub fn packed_len(&self) -> usize {
        match self.layout() {
            OrderLayout::Current => ORDER_RECORD_LEN,
            OrderLayout::Legacy => LEGACY_ORDER_RECORD_LEN,
        }
    }

    /// Decodes an order record from raw account bytes.
    ///
    /// The layout revision is selected by exact buffer length; anything else
    /// fails with [`DecodeError::SizeMismatch`]. No truncation or padding is
    /// ever applied.
    pub fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        match data.len() {
            ORDER_RECORD_LEN => Ok(Self::unpack_current(data)),
            LEGACY_ORDER_RECORD_LEN => Ok(Self::unpack_legacy(data)),
            actual => Err(DecodeError::SizeMismatch { actual }),
        }
    }

    fn unpack_current(data: &[u8]) -> Self {
        OrderRecord {
            creation_slot: read_u64(data, 0),
            seller: read_pubkey(data, 8),
            sell_amount: read_u64(data, 40),
            order_wallet: read_pubkey(data, 48),
            token_mint: Some(read_pubkey(data, 80)),
            price_mint: read_pubkey(data, 112),
            buy_amount: read_u64(data, 144),
            min_sell_amount: read_u64(data, 152),
            remains_to_fill: read_u64(data, 160),
            is_private: data[168] != 0,
        }
    }

    fn unpack_legacy(data: &[u8]) -> Self {
        OrderRecord {
            creation_slot: read_u64(data, 0),
            seller: read_pubkey(data, 8),
            sell_amount: read_u64(data, 40),
            order_wallet: read_pubkey(data, 48),
            token_mint: None,
            price_mint: read_pubkey(data, 80),
            buy_amount: read_u64(data, 112),
            min_sell_amount: read_u64(data, 120),
            remains_to_fill: read_u64(data, 128),
            is_private: data[136] != 0,
        }
    }

    /// Encodes the record to its exact wire form; the inverse of
    /// [`OrderRecord::unpack`] for the record's own layout.
    pub fn pack(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.packed_len());
        out.extend_from_slice(&self.creation_slot.to_le_bytes());
        out.extend_from_slice(self.seller.as_ref());
        out.extend_from_slice(&self.sell_amount.to_le_bytes());
        out.extend_from_slice(self.order_wallet.as_ref());
        if let Some(token_mint) = &self.token_mint {
            out.extend_from_slice(token_mint.as_ref());
        }
        out.extend_from_slice(self.price_mint.as_ref());
        out.extend_from_slice(&self.buy_amount.to_le_bytes());
        out.extend_from_slice(&self.min_sell_amount.to_le_bytes());
        out.extend_from_slice(&self.remains_to_fill.to_le_bytes());
        out.push(self.is_private as u8);
        out
    }
}

/// Resolved metadata for one mint of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
    pub mint: Pubkey,
    pub decimals: u8,
}

/// A decoded order record together with the resolved sell- and buy-token
/// metadata. Built on demand from RPC reads, never persisted; a fresh fetch
/// produces a new instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDescriptor {
    pub record: OrderRecord,
    pub sell_token: TokenInfo,
    pub buy_token: TokenInfo,
}

impl OrderDescriptor {
    pub fn sell_mint(&self) -> &Pubkey {
        &self.sell_token.mint
    }

    pub fn buy_mint(&self) -> &Pubkey {
        &self.buy_token.mint
    }
}

/// Renders a raw token amount as a decimal string scaled by mint decimals.
pub fn amount_to_display(value: u64, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let scale = 10u128.pow(decimals as u32);
    let whole = value as u128 / scale;
    let frac = value as u128 % scale;
    if frac == 0 {
        whole.to_string()
    } else {
        let frac = format!("{:0width$}", frac, width = decimals as usize);
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }
}

fn read_u64(data: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}

fn read_pubkey(data: &[u8], offset: usize) -> Pubkey {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&data[offset..offset + 32]);
    Pubkey::new_from_array(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(layout: OrderLayout) -> OrderRecord {
        OrderRecord {
            creation_slot: 0x0102030405060708,
            seller: Pubkey::new_from_array([0x11; 32]),
            sell_amount: 1_000,
            order_wallet: Pubkey::new_from_array([0x22; 32]),
            token_mint: match layout {
                OrderLayout::Current => Some(Pubkey::new_from_array([0x33; 32])),
                OrderLayout::Legacy => None,
            },
            price_mint: Pubkey::new_from_array([0x44; 32]),
            buy_amount: 3_000,
            min_sell_amount: 10,
            remains_to_fill: 500,
            is_private: true,
        }
    }

    #[test]
    fn roundtrip_current_layout() {
        let record = sample_record(OrderLayout::Current);
        let packed = record.pack();
        assert_eq!(packed.len(), ORDER_RECORD_LEN);
        assert_eq!(OrderRecord::unpack(&packed).unwrap(), record);
    }

    #[test]
    fn roundtrip_legacy_layout() {
        let record = sample_record(OrderLayout::Legacy);
        let packed = record.pack();
        assert_eq!(packed.len(), LEGACY_ORDER_RECORD_LEN);
        assert_eq!(OrderRecord::unpack(&packed).unwrap(), record);
    }

    #[test]
    fn field_offsets_are_wire_exact() {
        let record = sample_record(OrderLayout::Current);
        let packed = record.pack();
        assert_eq!(&packed[0..8], &0x0102030405060708u64.to_le_bytes());
        assert_eq!(&packed[8..40], &[0x11; 32]);
        assert_eq!(&packed[40..48], &1_000u64.to_le_bytes());
        assert_eq!(&packed[48..80], &[0x22; 32]);
        assert_eq!(&packed[80..112], &[0x33; 32]);
        assert_eq!(&packed[112..144], &[0x44; 32]);
        assert_eq!(&packed[144..152], &3_000u64.to_le_bytes());
        assert_eq!(&packed[152..160], &10u64.to_le_bytes());
        assert_eq!(&packed[160..168], &500u64.to_le_bytes());
        assert_eq!(packed[168], 1);
    }

    #[test]
    fn rejects_any_other_size() {
        for len in [0usize, 1, 136, 138, 168, 170, 512] {
            let data = vec![0u8; len];
            assert_eq!(
                OrderRecord::unpack(&data),
                Err(DecodeError::SizeMismatch { actual: len }),
                "length {} must be rejected",
                len
            );
        }
    }

    #[test]
    fn any_nonzero_privacy_byte_decodes_true() {
        let mut packed = sample_record(OrderLayout::Current).pack();
        for byte in [0u8, 1, 2, 0x80, 0xFF] {
            packed[168] = byte;
            let record = OrderRecord::unpack(&packed).unwrap();
            assert_eq!(record.is_private, byte != 0);
        }
    }

    #[test]
    fn layout_follows_token_mint_presence() {
        assert_eq!(sample_record(OrderLayout::Current).layout(), OrderLayout::Current);
        assert_eq!(sample_record(OrderLayout::Legacy).layout(), OrderLayout::Legacy);
    }

    #[test]
    fn amount_display_scales_by_decimals() {
        assert_eq!(amount_to_display(1_500_000, 6), "1.5");
        assert_eq!(amount_to_display(1_000_000, 6), "1");
        assert_eq!(amount_to_display(1, 6), "0.000001");
        assert_eq!(amount_to_display(42, 0), "42");
        assert_eq!(amount_to_display(0, 9), "0");
    }
}
