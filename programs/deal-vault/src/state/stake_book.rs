use anchor_lang::prelude::*;

use crate::{constants::*, errors::*};

// One investor contribution. Never removed: a withdrawn or fully claimed
// stake stays in the book with amount == 0 so indexes remain stable.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub struct StakeRecord {
    pub investor: Pubkey,
    // Live amount still held for the deal
    pub amount: u64,
    // Amount accepted at deposit time
    pub deposited: u64,
    // Deal total before this deposit; the bonus was computed from it
    pub position: u64,
    pub bonus_rate: u64,
    pub committed: bool,
    pub deposited_at: i64,
}

impl StakeRecord {
    pub fn info(&self) -> StakeInfo {
        StakeInfo {
            investor: self.investor,
            amount: self.amount,
            deposited: self.deposited,
            position: self.position,
            bonus_rate: self.bonus_rate,
            committed: self.committed,
        }
    }
}

// Returned by the stake_info view
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct StakeInfo {
    pub investor: Pubkey,
    pub amount: u64,
    pub deposited: u64,
    pub position: u64,
    pub bonus_rate: u64,
    pub committed: bool,
}

// Per-deal arena of stakes in arrival order. Created empty and reallocated
// one record larger by every deposit.
#[account]
pub struct StakeBook {
    pub deal: Pubkey,
    pub stakes: Vec<StakeRecord>,
}

impl StakeBook {
    pub const MAX_RECORDS: usize =
        (MAX_ACCOUNT_DATA_LEN - Self::space_for(0)) / StakeRecord::INIT_SPACE;

    // Account size holding `records` stakes, discriminator included
    pub const fn space_for(records: usize) -> usize {
        ANCHOR_DISCRIMINATOR + 32 + 4 + records * StakeRecord::INIT_SPACE
    }

    // Size the deposit reallocates to before appending
    pub fn grown_space(&self) -> usize {
        Self::space_for((self.stakes.len() + 1).min(Self::MAX_RECORDS))
    }

    pub fn push(&mut self, record: StakeRecord) -> Result<u32> {
        require!(
            self.stakes.len() < Self::MAX_RECORDS,
            DealVaultError::StakeBookFull
        );
        self.stakes.push(record);
        Ok((self.stakes.len() - 1) as u32)
    }

    pub fn get(&self, index: u32) -> Result<&StakeRecord> {
        self.stakes
            .get(index as usize)
            .ok_or(DealVaultError::InvalidStakeIndex.into())
    }

    pub fn get_mut(&mut self, index: u32) -> Result<&mut StakeRecord> {
        self.stakes
            .get_mut(index as usize)
            .ok_or(DealVaultError::InvalidStakeIndex.into())
    }

    pub fn has_stakes(&self) -> bool {
        !self.stakes.is_empty()
    }

    // Live amount an investor holds across all of their stakes
    pub fn live_total_of(&self, investor: &Pubkey) -> Result<u64> {
        self.stakes
            .iter()
            .filter(|stake| &stake.investor == investor)
            .try_fold(0u64, |sum, stake| sum.checked_add(stake.amount))
            .ok_or(DealVaultError::Overflow.into())
    }

    // Live amount of every stake that arrived before `index`
    pub fn live_before(&self, index: u32) -> Result<u64> {
        self.stakes
            .iter()
            .take(index as usize)
            .try_fold(0u64, |sum, stake| sum.checked_add(stake.amount))
            .ok_or(DealVaultError::Overflow.into())
    }

    // Part of the stake at `index` lying above `cap` in live arrival order.
    // Later stakes are trimmed first, so applying this to every stake leaves
    // exactly `cap` staked regardless of the order refunds are requested in.
    pub fn over_cap_amount(&self, index: u32, cap: u64) -> Result<u64> {
        let stake = self.get(index)?;
        let before = self.live_before(index)?;
        let end = before
            .checked_add(stake.amount)
            .ok_or(DealVaultError::Overflow)?;

        Ok(end.saturating_sub(cap.max(before)).min(stake.amount))
    }

    // Refund withdraw_over_amount pays for the stake at `index`. Once the
    // sponsor has claimed, the cap is spent and every live unit is refund.
    pub fn refundable_amount(&self, index: u32, cap: u64, claimed: bool) -> Result<u64> {
        if claimed {
            return Ok(self.get(index)?.amount);
        }
        self.over_cap_amount(index, cap)
    }
}
