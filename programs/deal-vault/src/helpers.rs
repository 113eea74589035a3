// Token movement helpers
//
// Every custody vault is an associated token account owned by the pool's
// vault authority PDA ["vault_authority", pool_key].

use anchor_lang::prelude::*;
use anchor_spl::token::{transfer, Transfer};

use crate::{constants::*, errors::*, state::TokenBalance};

// Transfer signed by the owner of `from`
// Used for deposits straight from an investor wallet
pub fn transfer_tokens<'info>(
    amount: u64,
    token_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
) -> Result<()> {
    transfer(
        CpiContext::new(
            token_program.clone(),
            Transfer {
                from: from.clone(),
                to: to.clone(),
                authority: authority.clone(),
            },
        ),
        amount,
    )
}

// Transfer signed by the vault authority PDA of `pool_key`
// Moves funds out of the vault, or out of an investor account on which the
// vault authority holds a delegate allowance
pub fn transfer_as_vault_authority<'info>(
    amount: u64,
    token_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    vault_authority: &AccountInfo<'info>,
    pool_key: &Pubkey,
    authority_bump: u8,
) -> Result<()> {
    let authority_seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, pool_key.as_ref(), &[authority_bump]];
    let signer_seeds = &[authority_seeds];

    transfer(
        CpiContext::new_with_signer(
            token_program.clone(),
            Transfer {
                from: from.clone(),
                to: to.clone(),
                authority: vault_authority.clone(),
            },
            signer_seeds,
        ),
        amount,
    )
}

// Deserializes TokenBalance rows passed as remaining accounts. Rows must
// belong to the pool and asset and appear at most once.
pub fn load_balances<'info>(
    infos: &'info [AccountInfo<'info>],
    pool_key: &Pubkey,
    mint: &Pubkey,
) -> Result<Vec<Account<'info, TokenBalance>>> {
    let mut rows: Vec<Account<'info, TokenBalance>> = Vec::with_capacity(infos.len());

    for info in infos {
        require!(info.is_writable, DealVaultError::InvalidParameter);
        require!(
            rows.iter().all(|row| row.key() != info.key()),
            DealVaultError::InvalidParameter
        );

        let row: Account<'info, TokenBalance> = Account::try_from(info)?;
        require!(row.belongs_to(pool_key, mint), DealVaultError::InvalidParameter);
        rows.push(row);
    }

    Ok(rows)
}
