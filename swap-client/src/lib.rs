//! High-level RPC client library for the p2p-swap program.
//!
//! This crate wraps the nonblocking Solana RPC client with the read paths
//! and transaction assembly the swap protocol needs: validated order
//! fetches, order listing and unsigned transaction construction. All reads
//! are single-shot and idempotent; retry policy belongs to the caller, and
//! signing belongs to the wallet.
//!
//! # Example
//!
//! ```no_run
//! use solana_sdk::pubkey::Pubkey;
//! use swap_client::SwapClient;
//!
//! # async fn example(order_address: Pubkey) -> Result<(), Box<dyn std::error::Error>> {
//! let client = SwapClient::new("https://api.devnet.solana.com", swap_base::P2P_SWAP_DEVNET);
//! let order = client.get_order_checked(&order_address).await?;
//! println!(
//!     "{} of mint {} still available",
//!     order.record.remains_to_fill,
//!     order.sell_mint()
//! );
//! # Ok(())
//! # }
//! ```

pub mod error;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use spl_token::state::{Account as TokenAccount, Mint};
use tracing::debug;

use swap_base::{
    CreateOrderRequest, FillOrderRequest, OrderDescriptor, OrderRecord, TokenInfo,
    check_descriptor,
};

pub use error::ClientError;

/// Convenience alias for results of this crate.
pub type Result<T> = std::result::Result<T, ClientError>;

/// RPC client bound to one deployment of the p2p-swap program.
pub struct SwapClient {
    rpc: RpcClient,
    program_id: Pubkey,
}

impl SwapClient {
    /// Creates a client for the given RPC endpoint and program deployment,
    /// using the default commitment level.
    pub fn new(url: impl ToString, program_id: Pubkey) -> Self {
        Self {
            rpc: RpcClient::new(url.to_string()),
            program_id,
        }
    }

    pub fn new_with_commitment(
        url: impl ToString,
        program_id: Pubkey,
        commitment: CommitmentConfig,
    ) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(url.to_string(), commitment),
            program_id,
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// The underlying RPC client, for calls this wrapper does not cover.
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        debug!(%address, "reading account");
        let response = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await?;
        Ok(response.value.map(|account| account.data))
    }

    /// Whether an account exists at `address`. Read-only, no retry.
    pub async fn account_exists(&self, address: &Pubkey) -> Result<bool> {
        Ok(self.account_data(address).await?.is_some())
    }

    /// Resolves decimals for a mint.
    pub async fn mint_info(&self, mint: &Pubkey) -> Result<TokenInfo> {
        let data = self
            .account_data(mint)
            .await?
            .ok_or(ClientError::AccountNotFound(*mint))?;
        let parsed = Mint::unpack(&data).map_err(|_| ClientError::InvalidMint(*mint))?;
        Ok(TokenInfo {
            mint: *mint,
            decimals: parsed.decimals,
        })
    }

    /// Fetches and decodes an order account together with its token
    /// metadata, without validating it against its derived addresses.
    pub async fn get_order(&self, order_address: &Pubkey) -> Result<OrderDescriptor> {
        let data = self
            .account_data(order_address)
            .await?
            .ok_or(ClientError::OrderNotFound(*order_address))?;
        let record = OrderRecord::unpack(&data)?;

        // The order wallet's token account names the sell mint even for
        // legacy records that do not carry it themselves.
        let wallet_data = self
            .account_data(&record.order_wallet)
            .await?
            .ok_or(ClientError::AccountNotFound(record.order_wallet))?;
        let wallet = TokenAccount::unpack(&wallet_data)
            .map_err(|_| ClientError::InvalidTokenAccount(record.order_wallet))?;

        let sell_token = self.mint_info(&wallet.mint).await?;
        let buy_token = self.mint_info(&record.price_mint).await?;

        Ok(OrderDescriptor {
            record,
            sell_token,
            buy_token,
        })
    }

    /// Fetches an order and verifies it against its own on-chain address
    /// before returning it. An inconsistent record is rejected, never
    /// returned.
    pub async fn get_order_checked(&self, order_address: &Pubkey) -> Result<OrderDescriptor> {
        let order = self.get_order(order_address).await?;
        check_descriptor(&self.program_id, &order, Some(order_address), None)?;
        Ok(order)
    }

    /// All order accounts owned by the program, decoded. Accounts whose size
    /// matches neither record layout are filtered out, the way a size filter
    /// on the RPC query would drop them.
    pub async fn list_orders(&self) -> Result<Vec<(Pubkey, OrderRecord)>> {
        debug!(program_id = %self.program_id, "listing program accounts");
        let accounts = self.rpc.get_program_accounts(&self.program_id).await?;
        Ok(accounts
            .into_iter()
            .filter_map(|(address, account)| {
                OrderRecord::unpack(&account.data)
                    .ok()
                    .map(|record| (address, record))
            })
            .collect())
    }

    pub async fn get_slot(&self) -> Result<u64> {
        Ok(self.rpc.get_slot().await?)
    }

    /// Derives the order address for the current slot and confirms it is
    /// still unused, returning both the address and the slot to put into a
    /// create request.
    pub async fn find_free_order_slot(&self, seller: &Pubkey) -> Result<(Pubkey, u64)> {
        let slot = self.rpc.get_slot().await?;
        let (address, _) = swap_base::order_address(&self.program_id, seller, slot)?;
        if self.account_exists(&address).await? {
            return Err(ClientError::OrderSlotTaken(address));
        }
        Ok((address, slot))
    }

    /// Assembles the unsigned create-order transaction and returns it with
    /// the derived order address. Prepends order-wallet creation when the
    /// wallet does not exist yet; fee payer is the signer.
    pub async fn create_order_transaction(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<(Transaction, Pubkey)> {
        // Domain failures must surface before the existence check below.
        req.validate().map_err(swap_base::BuildError::from)?;

        let (authority, _) = swap_base::order_wallet_authority(&req.program_id, &req.signer)?;
        let order_wallet = swap_base::order_wallet_address(&req.sell_token, &authority);
        let (order_address, _) =
            swap_base::order_address(&req.program_id, &req.signer, req.creation_slot)?;

        let wallet_exists = self.account_exists(&order_wallet).await?;
        let instructions = swap_base::create_order_instructions(req, wallet_exists)?;

        let blockhash = self.rpc.get_latest_blockhash().await?;
        let mut transaction = Transaction::new_with_payer(&instructions, Some(&req.signer));
        transaction.message.recent_blockhash = blockhash;

        Ok((transaction, order_address))
    }

    /// Assembles the unsigned fill-order transaction. Domain and
    /// unlock-key failures surface before any network read happens.
    pub async fn fill_order_transaction(&self, req: &FillOrderRequest) -> Result<Transaction> {
        let instructions = swap_base::fill_order_instructions(req)?;

        let blockhash = self.rpc.get_latest_blockhash().await?;
        let mut transaction = Transaction::new_with_payer(&instructions, Some(&req.signer));
        transaction.message.recent_blockhash = blockhash;

        Ok(transaction)
    }

    /// Transport passthrough for an externally signed transaction. The
    /// assembler itself never signs or submits.
    pub async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        Ok(self.rpc.send_transaction(transaction).await?)
    }
}
