//! # Ledger Rules
//!
//! Pure balance arithmetic. Every function here either returns the updated
//! account or a [`LedgerError`]; none of them touch storage.
//!
//! | Operation | Effect | Rejected when |
//! |-----------|--------|---------------|
//! | credit | `balance += value` | inactive, overflow |
//! | reserve | `hold += value` | inactive, `hold + value > balance` |
//! | settle | `balance -= hold; hold = 0` | never |

use crate::domain::errors::LedgerError;
use shared_types::{Account, Amount, NewAccount};

/// A reservation of `value` is possible when `hold + value <= balance`.
///
/// An overflowing `hold + value` is never possible.
pub fn subtraction_is_possible(balance: Amount, hold: Amount, value: Amount) -> bool {
    hold.checked_add(value)
        .map(|total| total <= balance)
        .unwrap_or(false)
}

/// Credit `value` to the balance.
pub fn apply_credit(mut account: Account, value: Amount) -> Result<Account, LedgerError> {
    ensure_active(&account)?;
    account.balance = account
        .balance
        .checked_add(value)
        .ok_or_else(|| LedgerError::BalanceOverflow {
            id: account.id.clone(),
        })?;
    Ok(account)
}

/// Reserve `value` by growing the hold.
pub fn apply_reserve(mut account: Account, value: Amount) -> Result<Account, LedgerError> {
    ensure_active(&account)?;
    if !subtraction_is_possible(account.balance, account.hold, value) {
        return Err(LedgerError::InsufficientFunds {
            id: account.id.clone(),
            balance: account.balance,
            hold: account.hold,
            requested: value,
        });
    }
    account.hold += value;
    Ok(account)
}

/// Debit the hold from the balance and clear it.
///
/// Returns the settled amount. A hold larger than the balance can only come
/// from data written outside the ledger; the balance is floored at zero.
pub fn apply_settlement(account: &mut Account) -> Amount {
    let settled = account.hold;
    if settled > account.balance {
        tracing::warn!(
            account = %account.id,
            balance = account.balance,
            hold = settled,
            "hold exceeds balance, flooring balance at zero"
        );
    }
    account.balance = account.balance.saturating_sub(settled);
    account.hold = 0;
    settled
}

/// Check a provisioning request against the ledger invariants.
pub fn validate_new_account(account: &NewAccount) -> Result<(), LedgerError> {
    if account.hold > account.balance {
        return Err(LedgerError::InvalidAccount {
            id: account.id.clone(),
            reason: format!(
                "hold {} exceeds balance {}",
                account.hold, account.balance
            ),
        });
    }
    Ok(())
}

fn ensure_active(account: &Account) -> Result<(), LedgerError> {
    if account.active {
        Ok(())
    } else {
        Err(LedgerError::AccountInactive {
            id: account.id.clone(),
        })
    }
}
