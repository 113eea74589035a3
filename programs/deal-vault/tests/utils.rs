// Test utilities for the deal vault program

#![allow(dead_code)]

use anchor_lang::{AccountDeserialize, AnchorSerialize};
use borsh::BorshDeserialize;
use deal_vault::{
    AdminConfig, AssetLedger, BonusCurve, Deal, DealFilter, DealInfo, DealParams, DealStatus,
    PoolLedger, SaleLimit, StakeBook, StakeInfo, StakeLimit, TokenBalance,
};
use litesvm::LiteSVM;
use litesvm_token::{get_spl_account, CreateAssociatedTokenAccount, CreateMint, MintTo};
use solana_sdk::{
    hash::hash,
    instruction::{AccountMeta, Instruction},
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use spl_associated_token_account::get_associated_token_address;

// Program ID matching declare_id!
pub const PROGRAM_ID: Pubkey = Pubkey::new_from_array(deal_vault::ID.to_bytes());

// Standard program IDs
pub const TOKEN_PROGRAM_ID: Pubkey = spl_token::ID;
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = spl_associated_token_account::ID;
use solana_system_interface::program::ID as system_program;

// PDA Seeds (must match constants.rs)
pub const ADMIN_CONFIG: &[u8] = b"admin_config";
pub const DEAL: &[u8] = b"deal";
pub const STAKE_BOOK: &[u8] = b"stake_book";
pub const VAULT_AUTHORITY: &[u8] = b"vault_authority";
pub const POOL_LEDGER: &[u8] = b"pool_ledger";
pub const ASSET_LEDGER: &[u8] = b"asset_ledger";
pub const TOKEN_BALANCE: &[u8] = b"token_balance";

pub const DECIMALS: u8 = 6;
pub const OFFER_PERIOD: i64 = 3_600;

// ======================== HELPERS ========================

/// Build Anchor instruction discriminator (first 8 bytes of sha256("global:method_name"))
pub fn anchor_discriminator(method: &str) -> [u8; 8] {
    let preimage = format!("global:{}", method);
    let hash = hash(preimage.as_bytes());
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash.to_bytes()[..8]);
    discriminator
}

// Program-side key type
pub fn program_key(key: &Pubkey) -> anchor_lang::prelude::Pubkey {
    anchor_lang::prelude::Pubkey::new_from_array(key.to_bytes())
}

pub fn same_key(program_side: &anchor_lang::prelude::Pubkey, key: &Pubkey) -> bool {
    program_side.to_bytes() == key.to_bytes()
}

// Setup LiteSVM with the deal vault program
pub fn setup_svm() -> LiteSVM {
    let mut svm = LiteSVM::new();
    let program_bytes = include_bytes!("../../../target/deploy/deal_vault.so");
    svm.add_program(PROGRAM_ID, program_bytes);
    svm
}

// Create and fund account
pub fn create_funded_account(svm: &mut LiteSVM, lamports: u64) -> Keypair {
    let keypair = Keypair::new();
    svm.airdrop(&keypair.pubkey(), lamports)
        .expect("Airdrop should succeed");
    keypair
}

// Advance the SVM clock by the specified number of seconds
pub fn advance_time(svm: &mut LiteSVM, seconds: u64) {
    let mut clock: solana_sdk::clock::Clock = svm.get_sysvar();
    clock.unix_timestamp += seconds as i64;
    svm.set_sysvar(&clock);

    let current_slot = clock.slot;
    svm.warp_to_slot(current_slot + (seconds * 2) + 5);
}

// ======================== PDA DERIVATION ========================

pub fn derive_admin_config_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ADMIN_CONFIG], &PROGRAM_ID)
}

pub fn derive_deal_pda(deal_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[DEAL, &deal_id.to_le_bytes()], &PROGRAM_ID)
}

pub fn derive_stake_book_pda(deal: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STAKE_BOOK, deal.as_ref()], &PROGRAM_ID)
}

pub fn derive_vault_authority_pda(pool_key: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_AUTHORITY, pool_key.as_ref()], &PROGRAM_ID)
}

pub fn derive_pool_ledger_pda(pool_key: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_LEDGER, pool_key.as_ref()], &PROGRAM_ID)
}

pub fn derive_asset_ledger_pda(pool_key: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[ASSET_LEDGER, pool_key.as_ref(), mint.as_ref()],
        &PROGRAM_ID,
    )
}

pub fn derive_token_balance_pda(pool_key: &Pubkey, investor: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[TOKEN_BALANCE, pool_key.as_ref(), investor.as_ref(), mint.as_ref()],
        &PROGRAM_ID,
    )
}

pub fn vault_address(pool_key: &Pubkey, mint: &Pubkey) -> Pubkey {
    let (vault_authority, _) = derive_vault_authority_pda(pool_key);
    get_associated_token_address(&vault_authority, mint)
}

// ======================== ADMIN INSTRUCTIONS ========================

pub fn build_initialize_ix(admin: &Pubkey, controller: &Pubkey, recipient: &Pubkey) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();

    let mut data = anchor_discriminator("initialize").to_vec();
    data.extend_from_slice(controller.as_ref());
    data.extend_from_slice(recipient.as_ref());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*admin, true),
            AccountMeta::new(admin_config, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

pub fn build_update_admin_config_ix(
    admin: &Pubkey,
    controller: Option<&Pubkey>,
    recipient: Option<&Pubkey>,
) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();

    let mut data = anchor_discriminator("update_admin_config").to_vec();
    for key in [controller, recipient] {
        match key {
            Some(key) => {
                data.push(1);
                data.extend_from_slice(key.as_ref());
            }
            None => data.push(0),
        }
    }

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*admin, true),
            AccountMeta::new(admin_config, false),
        ],
        data,
    }
}

pub fn build_add_allowed_token_ix(admin: &Pubkey, mint: &Pubkey) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*admin, true),
            AccountMeta::new(admin_config, false),
            AccountMeta::new_readonly(*mint, false),
        ],
        data: anchor_discriminator("add_allowed_token").to_vec(),
    }
}

pub fn build_toggle_close_ix(admin: &Pubkey) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*admin, true),
            AccountMeta::new(admin_config, false),
        ],
        data: anchor_discriminator("toggle_close").to_vec(),
    }
}

// ======================== DEAL INSTRUCTIONS ========================

pub fn build_create_deal_ix(
    sponsor: &Pubkey,
    mint: &Pubkey,
    deal_id: u64,
    params: &DealParams,
) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();
    let (deal, _) = derive_deal_pda(deal_id);
    let (stake_book, _) = derive_stake_book_pda(&deal);
    let (pool_ledger, _) = derive_pool_ledger_pda(&deal);
    let (asset_ledger, _) = derive_asset_ledger_pda(&deal, mint);
    let (vault_authority, _) = derive_vault_authority_pda(&deal);
    let vault = get_associated_token_address(&vault_authority, mint);

    let mut data = anchor_discriminator("create_deal").to_vec();
    data.extend_from_slice(&deal_id.to_le_bytes());
    params.serialize(&mut data).expect("params serialize");

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*sponsor, true),
            AccountMeta::new(admin_config, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(deal, false),
            AccountMeta::new(stake_book, false),
            AccountMeta::new(pool_ledger, false),
            AccountMeta::new(asset_ledger, false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

fn build_sponsor_deal_ix(method: &str, signer: &Pubkey, deal_id: u64, args: Vec<u8>) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();
    let (deal, _) = derive_deal_pda(deal_id);

    let mut data = anchor_discriminator(method).to_vec();
    data.extend_from_slice(&args);

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*signer, true),
            AccountMeta::new_readonly(admin_config, false),
            AccountMeta::new(deal, false),
        ],
        data,
    }
}

pub fn build_update_deal_ix(sponsor: &Pubkey, deal_id: u64, params: &DealParams) -> Instruction {
    let mut args = Vec::new();
    params.serialize(&mut args).expect("params serialize");
    build_sponsor_deal_ix("update_deal", sponsor, deal_id, args)
}

pub fn build_set_deal_price_ix(sponsor: &Pubkey, deal_id: u64, price: u64) -> Instruction {
    build_sponsor_deal_ix("set_deal_price", sponsor, deal_id, price.to_le_bytes().to_vec())
}

// Borsh enum index of DealStatus
pub fn status_index(status: DealStatus) -> u8 {
    match status {
        DealStatus::NotDisplaying => 0,
        DealStatus::Staking => 1,
        DealStatus::Offering => 2,
        DealStatus::Delivering => 3,
        DealStatus::Claiming => 4,
        DealStatus::Closed => 5,
    }
}

pub fn build_update_deal_status_ix(admin: &Pubkey, deal_id: u64, target: DealStatus) -> Instruction {
    build_sponsor_deal_ix("update_deal_status", admin, deal_id, vec![status_index(target)])
}

// ======================== STAKE INSTRUCTIONS ========================

pub fn build_deposit_ix(investor: &Pubkey, mint: &Pubkey, deal_id: u64, amount: u64) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();
    let (deal, _) = derive_deal_pda(deal_id);
    let (stake_book, _) = derive_stake_book_pda(&deal);
    let (pool_ledger, _) = derive_pool_ledger_pda(&deal);
    let (asset_ledger, _) = derive_asset_ledger_pda(&deal, mint);
    let (token_balance, _) = derive_token_balance_pda(&deal, investor, mint);
    let (vault_authority, _) = derive_vault_authority_pda(&deal);
    let vault = get_associated_token_address(&vault_authority, mint);
    let investor_token = get_associated_token_address(investor, mint);

    let mut data = anchor_discriminator("deposit").to_vec();
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*investor, true),
            AccountMeta::new_readonly(admin_config, false),
            AccountMeta::new(deal, false),
            AccountMeta::new(stake_book, false),
            AccountMeta::new(pool_ledger, false),
            AccountMeta::new(asset_ledger, false),
            AccountMeta::new(token_balance, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new(vault, false),
            AccountMeta::new(investor_token, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

pub fn build_commit_stake_ix(investor: &Pubkey, mint: &Pubkey, deal_id: u64, stake_index: u32) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();
    let (deal, _) = derive_deal_pda(deal_id);
    let (stake_book, _) = derive_stake_book_pda(&deal);
    let (pool_ledger, _) = derive_pool_ledger_pda(&deal);
    let (asset_ledger, _) = derive_asset_ledger_pda(&deal, mint);
    let (token_balance, _) = derive_token_balance_pda(&deal, investor, mint);

    let mut data = anchor_discriminator("commit_stake").to_vec();
    data.extend_from_slice(&stake_index.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*investor, true),
            AccountMeta::new_readonly(admin_config, false),
            AccountMeta::new(deal, false),
            AccountMeta::new(stake_book, false),
            AccountMeta::new(pool_ledger, false),
            AccountMeta::new(asset_ledger, false),
            AccountMeta::new(token_balance, false),
        ],
        data,
    }
}

// withdraw and withdraw_over_amount share one account layout
pub fn build_withdraw_ix(
    method: &str,
    investor: &Pubkey,
    mint: &Pubkey,
    deal_id: u64,
    stake_index: u32,
) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();
    let (deal, _) = derive_deal_pda(deal_id);
    let (stake_book, _) = derive_stake_book_pda(&deal);
    let (pool_ledger, _) = derive_pool_ledger_pda(&deal);
    let (asset_ledger, _) = derive_asset_ledger_pda(&deal, mint);
    let (token_balance, _) = derive_token_balance_pda(&deal, investor, mint);
    let (vault_authority, _) = derive_vault_authority_pda(&deal);
    let vault = get_associated_token_address(&vault_authority, mint);
    let investor_token = get_associated_token_address(investor, mint);

    let mut data = anchor_discriminator(method).to_vec();
    data.extend_from_slice(&stake_index.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*investor, true),
            AccountMeta::new_readonly(admin_config, false),
            AccountMeta::new(deal, false),
            AccountMeta::new(stake_book, false),
            AccountMeta::new(pool_ledger, false),
            AccountMeta::new(asset_ledger, false),
            AccountMeta::new(token_balance, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new(vault, false),
            AccountMeta::new(investor_token, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data,
    }
}

pub fn build_send_back_ix(
    authority: &Pubkey,
    investor: &Pubkey,
    mint: &Pubkey,
    deal_id: u64,
    stake_index: u32,
) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();
    let (deal, _) = derive_deal_pda(deal_id);
    let (stake_book, _) = derive_stake_book_pda(&deal);
    let (pool_ledger, _) = derive_pool_ledger_pda(&deal);
    let (asset_ledger, _) = derive_asset_ledger_pda(&deal, mint);
    let (token_balance, _) = derive_token_balance_pda(&deal, investor, mint);
    let (vault_authority, _) = derive_vault_authority_pda(&deal);
    let vault = get_associated_token_address(&vault_authority, mint);
    let investor_token = get_associated_token_address(investor, mint);

    let mut data = anchor_discriminator("send_back").to_vec();
    data.extend_from_slice(&stake_index.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new_readonly(admin_config, false),
            AccountMeta::new(deal, false),
            AccountMeta::new(stake_book, false),
            AccountMeta::new(pool_ledger, false),
            AccountMeta::new(asset_ledger, false),
            AccountMeta::new_readonly(*investor, false),
            AccountMeta::new(token_balance, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new(vault, false),
            AccountMeta::new(investor_token, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data,
    }
}

// `investors` are the owners of the TokenBalance rows passed as remaining accounts
pub fn build_claim_ix(sponsor: &Pubkey, mint: &Pubkey, deal_id: u64, investors: &[Pubkey]) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();
    let (deal, _) = derive_deal_pda(deal_id);
    let (stake_book, _) = derive_stake_book_pda(&deal);
    let (pool_ledger, _) = derive_pool_ledger_pda(&deal);
    let (asset_ledger, _) = derive_asset_ledger_pda(&deal, mint);
    let (vault_authority, _) = derive_vault_authority_pda(&deal);
    let vault = get_associated_token_address(&vault_authority, mint);
    let sponsor_token = get_associated_token_address(sponsor, mint);

    let mut accounts = vec![
        AccountMeta::new(*sponsor, true),
        AccountMeta::new_readonly(admin_config, false),
        AccountMeta::new(deal, false),
        AccountMeta::new(stake_book, false),
        AccountMeta::new(pool_ledger, false),
        AccountMeta::new(asset_ledger, false),
        AccountMeta::new_readonly(*mint, false),
        AccountMeta::new_readonly(vault_authority, false),
        AccountMeta::new(vault, false),
        AccountMeta::new(sponsor_token, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(system_program, false),
    ];
    for investor in investors {
        let (row, _) = derive_token_balance_pda(&deal, investor, mint);
        accounts.push(AccountMeta::new(row, false));
    }

    Instruction {
        program_id: PROGRAM_ID,
        accounts,
        data: anchor_discriminator("claim").to_vec(),
    }
}

// ======================== VIEW INSTRUCTIONS ========================

fn build_deal_view_ix(method: &str, deal_id: u64, args: Vec<u8>) -> Instruction {
    let (deal, _) = derive_deal_pda(deal_id);

    let mut data = anchor_discriminator(method).to_vec();
    data.extend_from_slice(&args);

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![AccountMeta::new_readonly(deal, false)],
        data,
    }
}

fn build_stake_view_ix(method: &str, deal_id: u64, stake_index: u32) -> Instruction {
    let (deal, _) = derive_deal_pda(deal_id);
    let (stake_book, _) = derive_stake_book_pda(&deal);

    let mut data = anchor_discriminator(method).to_vec();
    data.extend_from_slice(&stake_index.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(deal, false),
            AccountMeta::new_readonly(stake_book, false),
        ],
        data,
    }
}

pub fn build_check_deal_status_ix(deal_id: u64, target: DealStatus) -> Instruction {
    build_deal_view_ix("check_deal_status", deal_id, vec![status_index(target)])
}

pub fn build_deal_info_ix(deal_id: u64) -> Instruction {
    build_deal_view_ix("deal_info", deal_id, Vec::new())
}

pub fn build_get_estimate_bonus_ix(deal_id: u64, amount: u64) -> Instruction {
    build_deal_view_ix("get_estimate_bonus", deal_id, amount.to_le_bytes().to_vec())
}

pub fn build_get_bonus_ix(deal_id: u64, stake_index: u32) -> Instruction {
    build_stake_view_ix("get_bonus", deal_id, stake_index)
}

pub fn build_stake_info_ix(deal_id: u64, stake_index: u32) -> Instruction {
    build_stake_view_ix("stake_info", deal_id, stake_index)
}

pub fn build_get_deal_ids_ix(filter: DealFilter, deal_ids: &[u64]) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();

    let mut data = anchor_discriminator("get_deal_ids").to_vec();
    filter.serialize(&mut data).expect("filter serialize");

    let mut accounts = vec![AccountMeta::new_readonly(admin_config, false)];
    for deal_id in deal_ids {
        accounts.push(AccountMeta::new_readonly(derive_deal_pda(*deal_id).0, false));
    }

    Instruction {
        program_id: PROGRAM_ID,
        accounts,
        data,
    }
}

// ======================== CUSTODY INSTRUCTIONS ========================

pub fn build_open_pool_ix(controller: &Pubkey, pool_key: &Pubkey) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();
    let (pool_ledger, _) = derive_pool_ledger_pda(pool_key);
    let (vault_authority, _) = derive_vault_authority_pda(pool_key);

    let mut data = anchor_discriminator("open_pool").to_vec();
    data.extend_from_slice(pool_key.as_ref());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*controller, true),
            AccountMeta::new_readonly(admin_config, false),
            AccountMeta::new(pool_ledger, false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

pub fn build_deposit_stake_ix(
    controller: &Pubkey,
    pool_key: &Pubkey,
    investor: &Pubkey,
    mint: &Pubkey,
    amount: u64,
) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();
    let (pool_ledger, _) = derive_pool_ledger_pda(pool_key);
    let (asset_ledger, _) = derive_asset_ledger_pda(pool_key, mint);
    let (token_balance, _) = derive_token_balance_pda(pool_key, investor, mint);
    let (vault_authority, _) = derive_vault_authority_pda(pool_key);
    let vault = get_associated_token_address(&vault_authority, mint);
    let investor_token = get_associated_token_address(investor, mint);

    let mut data = anchor_discriminator("deposit_stake").to_vec();
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*controller, true),
            AccountMeta::new_readonly(admin_config, false),
            AccountMeta::new(pool_ledger, false),
            AccountMeta::new_readonly(*investor, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(asset_ledger, false),
            AccountMeta::new(token_balance, false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new(vault, false),
            AccountMeta::new(investor_token, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

pub fn build_withdraw_stake_ix(
    controller: &Pubkey,
    pool_key: &Pubkey,
    investor: &Pubkey,
    mint: &Pubkey,
    amount: u64,
) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();
    let (pool_ledger, _) = derive_pool_ledger_pda(pool_key);
    let (asset_ledger, _) = derive_asset_ledger_pda(pool_key, mint);
    let (token_balance, _) = derive_token_balance_pda(pool_key, investor, mint);
    let (vault_authority, _) = derive_vault_authority_pda(pool_key);
    let vault = get_associated_token_address(&vault_authority, mint);
    let investor_token = get_associated_token_address(investor, mint);

    let mut data = anchor_discriminator("withdraw_stake").to_vec();
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*controller, true),
            AccountMeta::new_readonly(admin_config, false),
            AccountMeta::new(pool_ledger, false),
            AccountMeta::new_readonly(*investor, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(asset_ledger, false),
            AccountMeta::new(token_balance, false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new(vault, false),
            AccountMeta::new(investor_token, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data,
    }
}

pub fn build_encumber_ix(
    authority: &Pubkey,
    pool_key: &Pubkey,
    investor: &Pubkey,
    mint: &Pubkey,
    amount: u64,
) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();
    let (pool_ledger, _) = derive_pool_ledger_pda(pool_key);
    let (asset_ledger, _) = derive_asset_ledger_pda(pool_key, mint);
    let (token_balance, _) = derive_token_balance_pda(pool_key, investor, mint);

    let mut data = anchor_discriminator("encumber").to_vec();
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new_readonly(admin_config, false),
            AccountMeta::new(pool_ledger, false),
            AccountMeta::new_readonly(*investor, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(asset_ledger, false),
            AccountMeta::new(token_balance, false),
        ],
        data,
    }
}

pub fn build_sweep_pool_ix(
    controller: &Pubkey,
    pool_key: &Pubkey,
    mint: &Pubkey,
    recipient: &Pubkey,
    investors: &[Pubkey],
) -> Instruction {
    let (admin_config, _) = derive_admin_config_pda();
    let (pool_ledger, _) = derive_pool_ledger_pda(pool_key);
    let (asset_ledger, _) = derive_asset_ledger_pda(pool_key, mint);
    let (vault_authority, _) = derive_vault_authority_pda(pool_key);
    let vault = get_associated_token_address(&vault_authority, mint);
    let recipient_token = get_associated_token_address(recipient, mint);

    let mut accounts = vec![
        AccountMeta::new_readonly(*controller, true),
        AccountMeta::new_readonly(admin_config, false),
        AccountMeta::new(pool_ledger, false),
        AccountMeta::new_readonly(*mint, false),
        AccountMeta::new(asset_ledger, false),
        AccountMeta::new_readonly(vault_authority, false),
        AccountMeta::new(vault, false),
        AccountMeta::new(recipient_token, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
    ];
    for investor in investors {
        let (row, _) = derive_token_balance_pda(pool_key, investor, mint);
        accounts.push(AccountMeta::new(row, false));
    }

    Instruction {
        program_id: PROGRAM_ID,
        accounts,
        data: anchor_discriminator("sweep_pool").to_vec(),
    }
}

// ======================== TRANSACTION HELPERS ========================

fn signed_tx(svm: &mut LiteSVM, ix: Instruction, payer: &Keypair, signers: &[&Keypair]) -> Transaction {
    // Identical transactions would be rejected as already processed
    svm.expire_blockhash();
    Transaction::new_signed_with_payer(&[ix], Some(&payer.pubkey()), signers, svm.latest_blockhash())
}

/// Send a transaction and expect success
pub fn send_tx_expect_success(svm: &mut LiteSVM, ix: Instruction, payer: &Keypair, signers: &[&Keypair]) {
    let tx = signed_tx(svm, ix, payer, signers);
    let result = svm.send_transaction(tx);
    assert!(result.is_ok(), "Transaction should succeed, got: {:?}", result.err());
}

/// Send a transaction and expect failure, returning the error with logs
pub fn send_tx_expect_failure(svm: &mut LiteSVM, ix: Instruction, payer: &Keypair, signers: &[&Keypair]) -> String {
    let tx = signed_tx(svm, ix, payer, signers);
    let result = svm.send_transaction(tx);
    assert!(result.is_err(), "Transaction should have failed");
    format!("{:?}", result.err().unwrap())
}

/// Run a view instruction and return its return data
pub fn send_view(svm: &mut LiteSVM, ix: Instruction, payer: &Keypair) -> Vec<u8> {
    let tx = signed_tx(svm, ix, payer, &[payer]);
    let meta = svm
        .send_transaction(tx)
        .unwrap_or_else(|err| panic!("View should succeed, got: {:?}", err));
    assert_eq!(meta.return_data.program_id, PROGRAM_ID);
    meta.return_data.data
}

pub fn view_u64(svm: &mut LiteSVM, ix: Instruction, payer: &Keypair) -> u64 {
    u64::try_from_slice(&send_view(svm, ix, payer)).expect("u64 return data")
}

pub fn view_bool(svm: &mut LiteSVM, ix: Instruction, payer: &Keypair) -> bool {
    bool::try_from_slice(&send_view(svm, ix, payer)).expect("bool return data")
}

pub fn view_deal_ids(svm: &mut LiteSVM, filter: DealFilter, deal_ids: &[u64], payer: &Keypair) -> Vec<u64> {
    let data = send_view(svm, build_get_deal_ids_ix(filter, deal_ids), payer);
    Vec::<u64>::try_from_slice(&data).expect("deal id list")
}

pub fn view_deal_info(svm: &mut LiteSVM, deal_id: u64, payer: &Keypair) -> DealInfo {
    let data = send_view(svm, build_deal_info_ix(deal_id), payer);
    anchor_lang::AnchorDeserialize::deserialize(&mut data.as_slice()).expect("deal info")
}

pub fn view_stake_info(svm: &mut LiteSVM, deal_id: u64, stake_index: u32, payer: &Keypair) -> StakeInfo {
    let data = send_view(svm, build_stake_info_ix(deal_id, stake_index), payer);
    anchor_lang::AnchorDeserialize::deserialize(&mut data.as_slice()).expect("stake info")
}

// ======================== ACCOUNT READERS ========================

pub fn read_account<T: AccountDeserialize>(svm: &LiteSVM, address: &Pubkey) -> T {
    let account = svm.get_account(address).expect("Account should exist");
    T::try_deserialize(&mut account.data.as_slice()).expect("Account should deserialize")
}

pub fn read_admin_config(svm: &LiteSVM) -> AdminConfig {
    read_account(svm, &derive_admin_config_pda().0)
}

pub fn read_deal(svm: &LiteSVM, deal_id: u64) -> Deal {
    read_account(svm, &derive_deal_pda(deal_id).0)
}

pub fn read_stake_book(svm: &LiteSVM, deal_id: u64) -> StakeBook {
    let (deal, _) = derive_deal_pda(deal_id);
    read_account(svm, &derive_stake_book_pda(&deal).0)
}

pub fn read_pool_ledger(svm: &LiteSVM, pool_key: &Pubkey) -> PoolLedger {
    read_account(svm, &derive_pool_ledger_pda(pool_key).0)
}

pub fn read_asset_ledger(svm: &LiteSVM, pool_key: &Pubkey, mint: &Pubkey) -> AssetLedger {
    read_account(svm, &derive_asset_ledger_pda(pool_key, mint).0)
}

pub fn read_token_balance(svm: &LiteSVM, pool_key: &Pubkey, investor: &Pubkey, mint: &Pubkey) -> TokenBalance {
    read_account(svm, &derive_token_balance_pda(pool_key, investor, mint).0)
}

pub fn token_amount(svm: &LiteSVM, token_account: &Pubkey) -> u64 {
    let account: spl_token::state::Account =
        get_spl_account(svm, token_account).expect("Token account should exist");
    account.amount
}

// ======================== SETUP HELPERS ========================

pub struct TestEnv {
    pub svm: LiteSVM,
    pub admin: Keypair,
    pub controller: Keypair,
    pub recipient: Keypair,
    pub mint: Pubkey,
}

/// Program initialized, one allow-listed mint whose authority is the admin
pub fn setup_env() -> TestEnv {
    let mut svm = setup_svm();

    let admin = create_funded_account(&mut svm, 10 * LAMPORTS_PER_SOL);
    let controller = create_funded_account(&mut svm, 10 * LAMPORTS_PER_SOL);
    let recipient = create_funded_account(&mut svm, LAMPORTS_PER_SOL);

    let mint = CreateMint::new(&mut svm, &admin)
        .authority(&admin.pubkey())
        .decimals(DECIMALS)
        .send()
        .expect("Mint creation should succeed");

    let ix = build_initialize_ix(&admin.pubkey(), &controller.pubkey(), &recipient.pubkey());
    send_tx_expect_success(&mut svm, ix, &admin, &[&admin]);

    let ix = build_add_allowed_token_ix(&admin.pubkey(), &mint);
    send_tx_expect_success(&mut svm, ix, &admin, &[&admin]);

    TestEnv {
        svm,
        admin,
        controller,
        recipient,
        mint,
    }
}

/// Funded wallet with an ATA holding `tokens` of the env mint
pub fn create_investor(env: &mut TestEnv, tokens: u64) -> Keypair {
    let investor = create_funded_account(&mut env.svm, 10 * LAMPORTS_PER_SOL);

    let ata = CreateAssociatedTokenAccount::new(&mut env.svm, &env.admin, &env.mint)
        .owner(&investor.pubkey())
        .send()
        .expect("Investor ATA creation should succeed");

    if tokens > 0 {
        MintTo::new(&mut env.svm, &env.admin, &env.mint, &ata, tokens)
            .owner(&env.admin)
            .send()
            .expect("Minting should succeed");
    }

    investor
}

pub fn deal_params(
    lead_investor: Option<&Pubkey>,
    bonus_curve: (u64, u64, u64),
    sale_limit: (u64, u64),
) -> DealParams {
    DealParams {
        name: "Seed round".to_string(),
        url: "https://deals.example/seed".to_string(),
        lead_investor: lead_investor.map(program_key),
        bonus_curve: BonusCurve {
            start_bonus: bonus_curve.0,
            end_bonus: bonus_curve.1,
            presale_amount: bonus_curve.2,
        },
        sale_limit: SaleLimit {
            min_sale_amount: sale_limit.0,
            max_sale_amount: sale_limit.1,
        },
        stake_limit: None,
        offer_period: OFFER_PERIOD,
    }
}

pub fn with_stake_limit(mut params: DealParams, min_stake: u64, max_stake: u64) -> DealParams {
    params.stake_limit = Some(StakeLimit { min_stake, max_stake });
    params
}

/// Creates the next deal for `sponsor` and returns its id
pub fn create_deal(env: &mut TestEnv, sponsor: &Keypair, params: &DealParams) -> u64 {
    let deal_id = read_admin_config(&env.svm).deal_count + 1;
    let ix = build_create_deal_ix(&sponsor.pubkey(), &env.mint, deal_id, params);
    send_tx_expect_success(&mut env.svm, ix, sponsor, &[sponsor]);
    deal_id
}

pub fn deposit(env: &mut TestEnv, investor: &Keypair, deal_id: u64, amount: u64) {
    let ix = build_deposit_ix(&investor.pubkey(), &env.mint, deal_id, amount);
    send_tx_expect_success(&mut env.svm, ix, investor, &[investor]);
}

pub fn set_status(env: &mut TestEnv, deal_id: u64, target: DealStatus) {
    let admin = env.admin.insecure_clone();
    let ix = build_update_deal_status_ix(&admin.pubkey(), deal_id, target);
    send_tx_expect_success(&mut env.svm, ix, &admin, &[&admin]);
}
