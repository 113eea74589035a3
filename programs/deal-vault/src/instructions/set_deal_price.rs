// Set Deal Price Instruction
//
// Sponsor fixes the settlement price exactly once. The deal moves to
// Offering and keeps accepting deposits for offer_period seconds.

use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

#[derive(Accounts)]
pub struct SetDealPrice<'info> {
    pub sponsor: Signer<'info>,

    #[account(
        seeds = [ADMIN_CONFIG_SEED],
        bump = admin_config.bump,
    )]
    pub admin_config: Account<'info, AdminConfig>,

    #[account(
        mut,
        seeds = [DEAL_SEED, &deal.deal_id.to_le_bytes()],
        bump = deal.bump,
    )]
    pub deal: Box<Account<'info, Deal>>,
}

impl<'info> SetDealPrice<'info> {
    pub fn set_deal_price(&mut self, price: u64) -> Result<()> {
        self.admin_config.assert_not_closed()?;
        self.deal.assert_is_sponsor(&self.sponsor.key())?;

        require!(price > 0, DealVaultError::InvalidParameter);
        require!(self.deal.price.is_none(), DealVaultError::WrongState);
        require!(
            matches!(
                self.deal.status,
                DealStatus::NotDisplaying | DealStatus::Staking
            ),
            DealVaultError::WrongState
        );

        let from = self.deal.status;

        self.deal.price = Some(price);
        self.deal.price_set_at = Clock::get()?.unix_timestamp;
        self.deal.status = DealStatus::Offering;

        let offer_ends_at = self.deal.offer_ends_at()?;

        emit!(DealPriceSet {
            deal_id: self.deal.deal_id,
            price,
            offer_ends_at,
        });
        emit!(DealStatusChanged {
            deal_id: self.deal.deal_id,
            from,
            to: DealStatus::Offering,
        });

        msg!(
            "Deal {} priced at {}, offer open until {}",
            self.deal.deal_id,
            price,
            offer_ends_at
        );

        Ok(())
    }
}
