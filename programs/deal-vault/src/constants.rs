// Deal Vault Program Constants

pub const ANCHOR_DISCRIMINATOR: usize = 8;

// Seeds for PDA derivation: ["admin_config"]
pub const ADMIN_CONFIG_SEED: &[u8] = b"admin_config";

// Seeds for PDA derivation: ["deal", deal_id]
pub const DEAL_SEED: &[u8] = b"deal";

// Seeds for PDA derivation: ["stake_book", deal]
pub const STAKE_BOOK_SEED: &[u8] = b"stake_book";

// Seeds for PDA derivation: ["vault_authority", pool_key]
// Owns the custody token accounts of one pool
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

// Seeds for PDA derivation: ["pool_ledger", pool_key]
pub const POOL_LEDGER_SEED: &[u8] = b"pool_ledger";

// Seeds for PDA derivation: ["asset_ledger", pool_key, mint]
pub const ASSET_LEDGER_SEED: &[u8] = b"asset_ledger";

// Seeds for PDA derivation: ["token_balance", pool_key, investor, mint]
pub const TOKEN_BALANCE_SEED: &[u8] = b"token_balance";

// Account data limit; the stake book grows by one record per deposit
pub const MAX_ACCOUNT_DATA_LEN: usize = 10 * 1024 * 1024;

// Staking mints the admin can allow-list
pub const MAX_ALLOWED_TOKENS: usize = 8;

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_URL_LEN: usize = 128;

pub const MAX_OFFER_PERIOD_SECONDS: i64 = 31_536_000; // 1 year
