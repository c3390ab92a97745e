//! CLI argument parsing and command definitions

use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;

/// Command-line interface for the p2p-swap on-chain program
#[derive(Parser)]
#[command(name = "swap-cli")]
#[command(about = "Command-line interface for the p2p-swap on-chain program")]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// RPC URL of the Solana node (defaults to the Solana CLI config)
    #[arg(long = "url", short = 'u', global = true)]
    pub url: Option<String>,

    /// Path to the signer keypair file (defaults to the Solana CLI config)
    #[arg(long = "keypair", short = 'k', global = true)]
    pub keypair: Option<String>,

    /// Address of the p2p-swap program (defaults to the devnet deployment)
    #[arg(long = "program-id", short = 'p', global = true)]
    pub program_id: Option<Pubkey>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new order selling one SPL token for another
    #[command(name = "create-order")]
    CreateOrder {
        /// Mint of the token to sell
        sell_token: Pubkey,

        /// Amount of sell-token to place into the order (raw units)
        sell_amount: u64,

        /// Minimum amount of sell-token per single fill (raw units)
        sell_minimum: u64,

        /// Mint of the token to receive
        buy_token: Pubkey,

        /// Amount of buy-token expected for a complete fill (raw units)
        buy_amount: u64,

        /// Create a private order, fillable only with an unlock key
        #[arg(long = "private")]
        private: bool,
    },

    /// Read and validate an order account
    #[command(name = "get-order")]
    GetOrder {
        /// base58 address of the order account
        order_address: Pubkey,
    },

    /// Fill an order by buying part of its sell token
    #[command(name = "buy-order")]
    BuyOrder {
        /// base58 address of the order account
        order_address: Pubkey,

        /// Amount of the order's sell token to acquire (raw units)
        amount: u64,

        /// base58 unlock key, required for private orders
        #[arg(long = "unlock-key")]
        unlock_key: Option<String>,
    },

    /// List all orders owned by the program
    #[command(name = "list-orders")]
    ListOrders,
}
