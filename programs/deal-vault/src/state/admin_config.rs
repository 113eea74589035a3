use anchor_lang::prelude::*;

use crate::{constants::*, errors::*};

// Singleton program configuration
// Holds the global halt switch and the roles checked by every instruction
#[account]
#[derive(InitSpace)]
pub struct AdminConfig {
    // Owner of the program: status transitions, halt switch, allow-list
    pub admin: Pubkey,

    // Identity allowed to drive the raw custody instructions
    pub controller: Pubkey,

    // Destination wallet of pool sweeps
    pub settlement_recipient: Pubkey,

    // Global halt. Only exit paths run while set
    pub closed: bool,

    // Last issued deal id (ids start at 1)
    pub deal_count: u64,

    // Staking mints accepted by create_deal
    pub allowed_tokens: [Pubkey; MAX_ALLOWED_TOKENS],
    pub allowed_token_count: u8,

    pub bump: u8,
}

impl AdminConfig {
    pub fn assert_not_closed(&self) -> Result<()> {
        require!(!self.closed, DealVaultError::Closed);
        Ok(())
    }

    pub fn assert_is_admin(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(self.admin, *caller, DealVaultError::NoPermission);
        Ok(())
    }

    pub fn assert_is_controller(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(self.controller, *caller, DealVaultError::NoPermission);
        Ok(())
    }

    pub fn is_allowed_token(&self, mint: &Pubkey) -> bool {
        self.allowed_tokens
            .iter()
            .take(self.allowed_token_count as usize)
            .any(|allowed| allowed == mint)
    }

    // Returns false when the mint was already listed
    pub fn allow_token(&mut self, mint: Pubkey) -> Result<bool> {
        if self.is_allowed_token(&mint) {
            return Ok(false);
        }

        let index = self.allowed_token_count as usize;
        require!(index < MAX_ALLOWED_TOKENS, DealVaultError::TokenListFull);

        self.allowed_tokens[index] = mint;
        self.allowed_token_count += 1;
        Ok(true)
    }

    pub fn next_deal_id(&self) -> Result<u64> {
        let next = self
            .deal_count
            .checked_add(1)
            .ok_or(DealVaultError::Overflow)?;
        Ok(next)
    }
}
