use anchor_lang::prelude::borsh;
use anchor_lang::prelude::*;

use crate::{constants::*, errors::*};

// Deal lifecycle
//
// NotDisplaying: created with a lead investor who has not staked yet
// Staking:       open for deposits
// Offering:      price fixed by the sponsor, deposits until the offer window ends
// Delivering:    settlement window before the claim
// Claiming:      sponsor may claim the capped proceeds
// Closed:        terminal, remaining balances are refundable
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum DealStatus {
    NotDisplaying,
    Staking,
    Offering,
    Delivering,
    Claiming,
    Closed,
}

// Linear early-participation bonus: start_bonus at position 0 down to
// end_bonus at presale_amount
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub struct BonusCurve {
    pub start_bonus: u64,
    pub end_bonus: u64,
    pub presale_amount: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub struct SaleLimit {
    pub min_sale_amount: u64,
    pub max_sale_amount: u64,
}

// Per-investor bounds; a deal without them accepts any positive amount
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub struct StakeLimit {
    pub min_stake: u64,
    pub max_stake: u64,
}

// Sponsor-supplied deal parameters (create_deal / update_deal)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct DealParams {
    pub name: String,
    pub url: String,
    pub lead_investor: Option<Pubkey>,
    pub bonus_curve: BonusCurve,
    pub sale_limit: SaleLimit,
    pub stake_limit: Option<StakeLimit>,
    pub offer_period: i64,
}

impl DealParams {
    pub fn validate(&self) -> Result<()> {
        require!(self.name.len() <= MAX_NAME_LEN, DealVaultError::InvalidParameter);
        require!(self.url.len() <= MAX_URL_LEN, DealVaultError::InvalidParameter);

        self.bonus_curve.validate()?;

        require!(
            self.sale_limit.min_sale_amount <= self.sale_limit.max_sale_amount,
            DealVaultError::InvalidParameter
        );
        require!(self.sale_limit.max_sale_amount > 0, DealVaultError::InvalidParameter);

        if let Some(limit) = self.stake_limit {
            require!(limit.min_stake <= limit.max_stake, DealVaultError::InvalidParameter);
            require!(limit.max_stake > 0, DealVaultError::InvalidParameter);
        }

        require!(
            self.offer_period > 0 && self.offer_period <= MAX_OFFER_PERIOD_SECONDS,
            DealVaultError::InvalidParameter
        );

        if let Some(lead) = self.lead_investor {
            require!(lead != Pubkey::default(), DealVaultError::InvalidParameter);
        }

        Ok(())
    }
}

#[account]
#[derive(InitSpace)]
pub struct Deal {
    // Sequential id, also the PDA seed
    pub deal_id: u64,

    #[max_len(MAX_NAME_LEN)]
    pub name: String,

    #[max_len(MAX_URL_LEN)]
    pub url: String,

    pub sponsor: Pubkey,

    // Must stake before anyone else when set
    pub lead_investor: Option<Pubkey>,

    pub bonus_curve: BonusCurve,
    pub sale_limit: SaleLimit,
    pub stake_limit: Option<StakeLimit>,

    // Seconds after the price is set during which deposits stay open
    pub offer_period: i64,

    // Fixed at creation
    pub staking_mint: Pubkey,

    pub status: DealStatus,

    // Sum of live stake amounts in the stake book
    pub total_staked: u64,

    // Set once by the sponsor
    pub price: Option<u64>,
    pub price_set_at: i64,

    pub lead_staked: bool,
    pub committed_count: u32,

    pub claimed: bool,
    pub total_claimed: u64,

    pub created_at: i64,

    pub bump: u8,
    pub book_bump: u8,
    pub vault_authority_bump: u8,
}

impl Deal {
    pub fn assert_is_sponsor(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(self.sponsor, *caller, DealVaultError::NoPermission);
        Ok(())
    }

    pub fn apply_params(&mut self, params: DealParams) {
        self.name = params.name;
        self.url = params.url;
        self.lead_investor = params.lead_investor;
        self.bonus_curve = params.bonus_curve;
        self.sale_limit = params.sale_limit;
        self.stake_limit = params.stake_limit;
        self.offer_period = params.offer_period;
    }

    // An empty deal waits in NotDisplaying for a lead investor who has not staked
    pub fn opening_status(&self) -> DealStatus {
        if self.lead_pending() && self.total_staked == 0 {
            DealStatus::NotDisplaying
        } else {
            DealStatus::Staking
        }
    }

    pub fn lead_pending(&self) -> bool {
        self.lead_investor.is_some() && !self.lead_staked
    }

    pub fn is_lead(&self, investor: &Pubkey) -> bool {
        self.lead_investor.as_ref() == Some(investor)
    }

    // Lead staked or any stake opted into the commitment
    pub fn has_commitment(&self) -> bool {
        self.lead_staked || self.committed_count > 0
    }

    pub fn is_displayable(&self) -> bool {
        !matches!(self.status, DealStatus::NotDisplaying | DealStatus::Closed)
    }

    pub fn offer_ends_at(&self) -> Result<i64> {
        let ends_at = self
            .price_set_at
            .checked_add(self.offer_period)
            .ok_or(DealVaultError::Overflow)?;
        Ok(ends_at)
    }

    pub fn accepts_deposits(&self, now: i64) -> Result<bool> {
        Ok(match self.status {
            DealStatus::NotDisplaying | DealStatus::Staking => true,
            DealStatus::Offering => now < self.offer_ends_at()?,
            _ => false,
        })
    }

    // Plain withdrawals; the halt switch overrides this in the handler
    pub fn accepts_withdrawals(&self) -> bool {
        match self.status {
            DealStatus::Staking | DealStatus::Delivering | DealStatus::Closed => true,
            DealStatus::Claiming => self.claimed,
            _ => false,
        }
    }

    pub fn assert_stake_bounds(&self, amount: u64, investor_live_total: u64) -> Result<()> {
        if let Some(limit) = self.stake_limit {
            require!(amount >= limit.min_stake, DealVaultError::AmountOutOfBounds);

            let after = investor_live_total
                .checked_add(amount)
                .ok_or(DealVaultError::Overflow)?;
            require!(after <= limit.max_stake, DealVaultError::AmountOutOfBounds);
        }
        Ok(())
    }

    pub fn add_staked(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(DealVaultError::Overflow)?;
        Ok(())
    }

    pub fn remove_staked(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(DealVaultError::Underflow)?;
        Ok(())
    }

    pub fn info(&self) -> DealInfo {
        DealInfo {
            deal_id: self.deal_id,
            name: self.name.clone(),
            url: self.url.clone(),
            sponsor: self.sponsor,
            lead_investor: self.lead_investor,
            bonus_curve: self.bonus_curve,
            sale_limit: self.sale_limit,
            stake_limit: self.stake_limit,
            offer_period: self.offer_period,
            staking_mint: self.staking_mint,
            status: self.status,
            total_staked: self.total_staked,
            price: self.price,
            claimed: self.claimed,
            total_claimed: self.total_claimed,
        }
    }
}

// Snapshot returned by the deal_info view
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct DealInfo {
    pub deal_id: u64,
    pub name: String,
    pub url: String,
    pub sponsor: Pubkey,
    pub lead_investor: Option<Pubkey>,
    pub bonus_curve: BonusCurve,
    pub sale_limit: SaleLimit,
    pub stake_limit: Option<StakeLimit>,
    pub offer_period: i64,
    pub staking_mint: Pubkey,
    pub status: DealStatus,
    pub total_staked: u64,
    pub price: Option<u64>,
    pub claimed: bool,
    pub total_claimed: u64,
}

// Selector for get_deal_ids
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum DealFilter {
    All,
    Displayable,
    Status(DealStatus),
}

impl DealFilter {
    pub fn matches(&self, deal: &Deal) -> bool {
        match self {
            DealFilter::All => true,
            DealFilter::Displayable => deal.is_displayable(),
            DealFilter::Status(status) => deal.status == *status,
        }
    }
}
