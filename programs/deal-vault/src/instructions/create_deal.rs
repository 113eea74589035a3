// Create Deal Instruction
//
// Any signer opens a round as its sponsor. Creates the deal, its stake book,
// the deal's custody pool and the vault token account for the staking mint.
//
// Opening status: NotDisplaying while a designated lead investor has not
// staked, Staking when there is no lead.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, state::*};

#[derive(Accounts)]
#[instruction(deal_id: u64)]
pub struct CreateDeal<'info> {
    #[account(mut)]
    pub sponsor: Signer<'info>,

    #[account(
        mut,
        seeds = [ADMIN_CONFIG_SEED],
        bump = admin_config.bump,
    )]
    pub admin_config: Box<Account<'info, AdminConfig>>,

    pub staking_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = sponsor,
        space = ANCHOR_DISCRIMINATOR + Deal::INIT_SPACE,
        seeds = [DEAL_SEED, &deal_id.to_le_bytes()],
        bump,
    )]
    pub deal: Box<Account<'info, Deal>>,

    #[account(
        init,
        payer = sponsor,
        space = StakeBook::space_for(0),
        seeds = [STAKE_BOOK_SEED, deal.key().as_ref()],
        bump,
    )]
    pub stake_book: Box<Account<'info, StakeBook>>,

    #[account(
        init,
        payer = sponsor,
        space = ANCHOR_DISCRIMINATOR + PoolLedger::INIT_SPACE,
        seeds = [POOL_LEDGER_SEED, deal.key().as_ref()],
        bump,
    )]
    pub pool_ledger: Box<Account<'info, PoolLedger>>,

    #[account(
        init,
        payer = sponsor,
        space = ANCHOR_DISCRIMINATOR + AssetLedger::INIT_SPACE,
        seeds = [ASSET_LEDGER_SEED, deal.key().as_ref(), staking_mint.key().as_ref()],
        bump,
    )]
    pub asset_ledger: Box<Account<'info, AssetLedger>>,

    /// CHECK: PDA signer for the deal vault
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, deal.key().as_ref()],
        bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = sponsor,
        associated_token::mint = staking_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> CreateDeal<'info> {
    pub fn create_deal(
        &mut self,
        deal_id: u64,
        params: DealParams,
        bumps: &CreateDealBumps,
    ) -> Result<()> {
        // 1. Global halt
        self.admin_config.assert_not_closed()?;

        // 2. Ids are sequential so deal PDAs can be enumerated off-chain
        require!(
            deal_id == self.admin_config.next_deal_id()?,
            DealVaultError::InvalidDealId
        );

        // 3. Staking asset must be allow-listed
        require!(
            self.admin_config.is_allowed_token(&self.staking_mint.key()),
            DealVaultError::TokenNotAllowed
        );

        // 4. Curve and limits
        params.validate()?;

        let now = Clock::get()?.unix_timestamp;
        let deal_key = self.deal.key();

        self.deal.set_inner(Deal {
            deal_id,
            name: String::new(),
            url: String::new(),
            sponsor: self.sponsor.key(),
            lead_investor: None,
            bonus_curve: params.bonus_curve,
            sale_limit: params.sale_limit,
            stake_limit: None,
            offer_period: params.offer_period,
            staking_mint: self.staking_mint.key(),
            status: DealStatus::NotDisplaying,
            total_staked: 0,
            price: None,
            price_set_at: 0,
            lead_staked: false,
            committed_count: 0,
            claimed: false,
            total_claimed: 0,
            created_at: now,
            bump: bumps.deal,
            book_bump: bumps.stake_book,
            vault_authority_bump: bumps.vault_authority,
        });
        self.deal.apply_params(params);
        self.deal.status = self.deal.opening_status();

        self.stake_book.set_inner(StakeBook {
            deal: deal_key,
            stakes: Vec::new(),
        });

        self.pool_ledger.set_inner(PoolLedger {
            pool_key: deal_key,
            deal_managed: true,
            total_deposited: 0,
            total_encumbered: 0,
            authority_bump: bumps.vault_authority,
            bump: bumps.pool_ledger,
        });

        self.asset_ledger.set_inner(AssetLedger {
            pool_key: deal_key,
            mint: self.staking_mint.key(),
            deposited: 0,
            encumbered: 0,
            bump: bumps.asset_ledger,
        });

        self.admin_config.deal_count = deal_id;

        emit!(DealCreated {
            deal_id,
            sponsor: self.sponsor.key(),
            staking_mint: self.staking_mint.key(),
            status: self.deal.status,
        });

        msg!(
            "Deal {} created by {}, status {:?}",
            deal_id,
            self.sponsor.key(),
            self.deal.status
        );

        Ok(())
    }
}
