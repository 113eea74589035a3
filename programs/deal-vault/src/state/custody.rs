use anchor_lang::prelude::*;

use crate::errors::*;

// Pool-level custody totals
// A pool is keyed by an arbitrary address; deal pools use the deal account
#[account]
#[derive(InitSpace)]
pub struct PoolLedger {
    pub pool_key: Pubkey,

    // Deal pools are driven by deal instructions only, never by the controller
    pub deal_managed: bool,

    // Sum of every TokenBalance.amount in the pool
    pub total_deposited: u64,

    // Sum of every TokenBalance.encumbered in the pool
    pub total_encumbered: u64,

    pub authority_bump: u8,
    pub bump: u8,
}

// Per-asset totals of one pool
#[account]
#[derive(InitSpace)]
pub struct AssetLedger {
    pub pool_key: Pubkey,
    pub mint: Pubkey,
    pub deposited: u64,
    pub encumbered: u64,
    pub bump: u8,
}

// Balance row for (pool, investor, asset)
#[account]
#[derive(InitSpace)]
pub struct TokenBalance {
    pub pool_key: Pubkey,
    pub investor: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    // Earmarked for the settlement recipient, always <= amount
    pub encumbered: u64,
    pub bump: u8,
}

impl PoolLedger {
    pub fn assert_controller_pool(&self) -> Result<()> {
        require!(!self.deal_managed, DealVaultError::NoPermission);
        Ok(())
    }
}

impl TokenBalance {
    // Rows created through init_if_needed start zeroed
    pub fn is_new(&self) -> bool {
        self.pool_key == Pubkey::default()
    }

    pub fn unencumbered(&self) -> u64 {
        self.amount.saturating_sub(self.encumbered)
    }

    pub fn belongs_to(&self, pool_key: &Pubkey, mint: &Pubkey) -> bool {
        self.pool_key == *pool_key && self.mint == *mint
    }
}

// Ledger movements shared by deal and controller flows. Each one keeps the
// pool, asset and balance rows in step.

pub fn credit(
    pool: &mut PoolLedger,
    asset: &mut AssetLedger,
    balance: &mut TokenBalance,
    amount: u64,
) -> Result<()> {
    balance.amount = balance
        .amount
        .checked_add(amount)
        .ok_or(DealVaultError::Overflow)?;
    asset.deposited = asset
        .deposited
        .checked_add(amount)
        .ok_or(DealVaultError::Overflow)?;
    pool.total_deposited = pool
        .total_deposited
        .checked_add(amount)
        .ok_or(DealVaultError::Overflow)?;
    Ok(())
}

pub fn encumber(
    pool: &mut PoolLedger,
    asset: &mut AssetLedger,
    balance: &mut TokenBalance,
    amount: u64,
) -> Result<()> {
    require!(
        amount <= balance.unencumbered(),
        DealVaultError::InsufficientBalance
    );

    balance.encumbered = balance
        .encumbered
        .checked_add(amount)
        .ok_or(DealVaultError::Overflow)?;
    asset.encumbered = asset
        .encumbered
        .checked_add(amount)
        .ok_or(DealVaultError::Overflow)?;
    pool.total_encumbered = pool
        .total_encumbered
        .checked_add(amount)
        .ok_or(DealVaultError::Overflow)?;
    Ok(())
}

// Debits `amount` from a balance row. `released` is the encumbered part of
// it and leaves the encumbrance totals as well.
pub fn debit_balance(balance: &mut TokenBalance, amount: u64, released: u64) -> Result<()> {
    require!(released <= amount, DealVaultError::InvalidParameter);
    require!(amount <= balance.amount, DealVaultError::InsufficientBalance);
    require!(released <= balance.encumbered, DealVaultError::InsufficientBalance);

    balance.amount -= amount;
    balance.encumbered -= released;
    Ok(())
}

// Lifts `amount` of encumbrance off a balance row, funds stay deposited
pub fn release_balance(balance: &mut TokenBalance, amount: u64) -> Result<()> {
    require!(amount <= balance.encumbered, DealVaultError::InsufficientBalance);

    balance.encumbered -= amount;
    Ok(())
}

pub fn debit_totals(
    pool: &mut PoolLedger,
    asset: &mut AssetLedger,
    amount: u64,
    released: u64,
) -> Result<()> {
    asset.deposited = asset
        .deposited
        .checked_sub(amount)
        .ok_or(DealVaultError::Underflow)?;
    asset.encumbered = asset
        .encumbered
        .checked_sub(released)
        .ok_or(DealVaultError::Underflow)?;
    pool.total_deposited = pool
        .total_deposited
        .checked_sub(amount)
        .ok_or(DealVaultError::Underflow)?;
    pool.total_encumbered = pool
        .total_encumbered
        .checked_sub(released)
        .ok_or(DealVaultError::Underflow)?;
    Ok(())
}

pub fn debit(
    pool: &mut PoolLedger,
    asset: &mut AssetLedger,
    balance: &mut TokenBalance,
    amount: u64,
    released: u64,
) -> Result<()> {
    debit_balance(balance, amount, released)?;
    debit_totals(pool, asset, amount, released)
}
