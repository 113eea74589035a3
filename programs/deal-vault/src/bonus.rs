// Bonus Curve Engine
//
// Bonus rate for a contribution of `amount` landing at cumulative position
// `before` on a curve declining linearly from start_bonus (position 0) to
// end_bonus (position presale_amount):
//
//   before >= presale          -> end_bonus
//   otherwise                  -> start - (start - end) * avg / presale
//   avg = (before + min(before + amount, presale)) / 2
//
// The part of a contribution beyond the presale amount earns no extra credit.
// Integer division floors, evaluated as
// end + (start - end) * (presale - avg) / presale so no intermediate goes negative.

use anchor_lang::prelude::*;

use crate::{errors::*, state::BonusCurve};

impl BonusCurve {
    pub fn validate(&self) -> Result<()> {
        require!(self.presale_amount > 0, DealVaultError::InvalidBonusCurve);
        require!(
            self.start_bonus >= self.end_bonus,
            DealVaultError::InvalidBonusCurve
        );
        Ok(())
    }
}

pub fn compute_bonus(curve: &BonusCurve, before: u64, amount: u64) -> Result<u64> {
    let presale = curve.presale_amount as u128;
    let before = before as u128;

    if before >= presale {
        return Ok(curve.end_bonus);
    }

    let spread = (curve.start_bonus as u128)
        .checked_sub(curve.end_bonus as u128)
        .ok_or(DealVaultError::InvalidBonusCurve)?;

    // u64 + u64 always fits in u128
    let capped_end = (before + amount as u128).min(presale);
    let avg = (before + capped_end) / 2;

    let bonus = spread
        .checked_mul(presale - avg)
        .ok_or(DealVaultError::Overflow)?
        .checked_div(presale)
        .ok_or(DealVaultError::InvalidBonusCurve)?
        .checked_add(curve.end_bonus as u128)
        .ok_or(DealVaultError::Overflow)?;

    u64::try_from(bonus).map_err(|_| DealVaultError::Overflow.into())
}
