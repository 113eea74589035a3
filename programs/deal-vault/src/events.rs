// Program events
//
// Emitted alongside the msg! trace so indexers can follow deal and custody
// activity without replaying account diffs.

use anchor_lang::prelude::borsh;
use anchor_lang::prelude::*;

use crate::state::DealStatus;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum WithdrawKind {
    Withdraw,
    OverCap,
    SendBack,
}

#[event]
pub struct AdminInitialized {
    pub admin: Pubkey,
    pub controller: Pubkey,
    pub settlement_recipient: Pubkey,
}

#[event]
pub struct CloseToggled {
    pub admin: Pubkey,
    pub closed: bool,
}

#[event]
pub struct DealCreated {
    pub deal_id: u64,
    pub sponsor: Pubkey,
    pub staking_mint: Pubkey,
    pub status: DealStatus,
}

#[event]
pub struct DealUpdated {
    pub deal_id: u64,
    pub status: DealStatus,
}

#[event]
pub struct DealStatusChanged {
    pub deal_id: u64,
    pub from: DealStatus,
    pub to: DealStatus,
}

#[event]
pub struct DealPriceSet {
    pub deal_id: u64,
    pub price: u64,
    pub offer_ends_at: i64,
}

#[event]
pub struct StakeDeposited {
    pub deal_id: u64,
    pub stake_index: u32,
    pub investor: Pubkey,
    pub amount: u64,
    pub position: u64,
    pub bonus_rate: u64,
}

#[event]
pub struct StakeCommitted {
    pub deal_id: u64,
    pub stake_index: u32,
    pub investor: Pubkey,
    pub amount: u64,
}

#[event]
pub struct StakeWithdrawn {
    pub deal_id: u64,
    pub stake_index: u32,
    pub investor: Pubkey,
    pub amount: u64,
    pub kind: WithdrawKind,
}

#[event]
pub struct DealClaimed {
    pub deal_id: u64,
    pub sponsor: Pubkey,
    pub amount: u64,
    pub remaining_staked: u64,
}

#[event]
pub struct CustodyDeposited {
    pub pool_key: Pubkey,
    pub investor: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct CustodyWithdrawn {
    pub pool_key: Pubkey,
    pub investor: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct BalanceEncumbered {
    pub pool_key: Pubkey,
    pub investor: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PoolSwept {
    pub pool_key: Pubkey,
    pub mint: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
}
