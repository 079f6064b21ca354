use crate::api::types::{TokenBalance, TransactionMeta};
use crate::helpers::amount::Amount;
use crate::{Error, Result};
use tracing::*;

/// Most balance entries (token) or changed balances (native) the two-party heuristic can reason about.
const MAX_TRANSFER_PARTIES: usize = 2;

impl TokenBalance {
    /// The balance at the mint's precision, from the raw `amount` when the node sent it, else from `uiAmount`
    /// or `uiAmountString`.
    ///
    /// # Errors
    ///
    /// * [`Error::MalformedRecord`] if the entry carries no balance, or one that is negative or out of range.
    pub fn balance(&self) -> Result<Amount> {
        let ui = &self.ui_token_amount;

        if let Some(raw) = &ui.amount {
            let units = raw.parse::<u64>().map_err(|_| {
                Error::MalformedRecord(format!("token amount {raw:?} is not a u64"))
            })?;
            return Ok(Amount::new(i128::from(units), ui.decimals));
        }

        let value = match (ui.ui_amount, &ui.ui_amount_string) {
            (Some(value), _) => value,
            (None, Some(text)) => text.parse::<f64>().map_err(|_| {
                Error::MalformedRecord(format!("token uiAmountString {text:?} is not a number"))
            })?,
            (None, None) => {
                return Err(Error::MalformedRecord(format!(
                    "token balance of account {} carries no amount",
                    self.account_index
                )))
            }
        };

        if !value.is_finite() || value < 0.0 {
            return Err(Error::MalformedRecord(format!("token balance {value} out of range")));
        }

        Amount::from_ui(value, ui.decimals)
            .map_err(|_| Error::MalformedRecord(format!("token balance {value} out of range")))
    }
}

impl TransactionMeta {
    /// Whether the transaction moved SPL tokens.
    pub fn is_token_transfer(&self) -> bool {
        !self.pre_token_balances.is_empty()
    }

    /// Net amount moved: token branch when token balances are present, native branch otherwise.
    pub fn transfer_amount(&self) -> Result<Amount> {
        if self.is_token_transfer() {
            self.token_transfer_amount()
        } else {
            self.native_transfer_amount()
        }
    }

    /// Token amount moved, derived from the token balance snapshots.
    ///
    /// Index 0 is assumed to be the sender (`pre - post`). When there is no pre-balance at index 1, the
    /// receiver's token account was created by this transaction, so `pre[0]` is paired with `post[1]`.
    /// Otherwise, if index 0 gained tokens it was the receiver and index 1 is used instead. A result that is
    /// still negative is returned as its magnitude, at the decimals of the entry it came from.
    ///
    /// # Errors
    ///
    /// * [`Error::MalformedRecord`] if a required entry is missing or unreadable.
    /// * [`Error::UnsupportedBalanceLayout`] if either side lists more than two token accounts.
    pub fn token_transfer_amount(&self) -> Result<Amount> {
        self.ensure_two_party_tokens()?;

        let pre = &self.pre_token_balances;
        let post = &self.post_token_balances;

        let first = token_entry(pre, 0, "preTokenBalances")?;
        let mut decimals = first.ui_token_amount.decimals;
        let mut before = first.balance()?;
        let mut after = token_entry(post, 0, "postTokenBalances")?.balance()?;

        match pre.get(1) {
            None => {
                after = token_entry(post, 1, "postTokenBalances")?.balance()?;
            }
            Some(second) if token_diff(before, after)?.is_negative() => {
                decimals = second.ui_token_amount.decimals;
                before = second.balance()?;
                after = token_entry(post, 1, "postTokenBalances")?.balance()?;
            }
            Some(_) => {}
        }

        let diff = token_diff(before, after)?;
        Ok(if diff.is_negative() {
            diff.abs().rescale(decimals)
        } else {
            diff
        })
    }

    /// Native amount moved, in SOL.
    ///
    /// `post[0] - pre[0]` in lamports; if index 0 lost lamports, `post[1] - pre[1]` instead. The sign of the
    /// second difference is kept.
    ///
    /// # Errors
    ///
    /// * [`Error::MalformedRecord`] if the balance arrays differ in length or have fewer than the entries used.
    /// * [`Error::UnsupportedBalanceLayout`] if more than two accounts changed balance.
    pub fn native_transfer_amount(&self) -> Result<Amount> {
        if self.pre_balances.len() != self.post_balances.len() {
            return Err(Error::MalformedRecord(format!(
                "{} preBalances for {} postBalances",
                self.pre_balances.len(),
                self.post_balances.len()
            )));
        }

        let changed = self
            .pre_balances
            .iter()
            .zip(&self.post_balances)
            .filter(|(pre, post)| pre != post)
            .count();

        if changed > MAX_TRANSFER_PARTIES {
            warn!(changed, "native balance changes of more than two accounts");
            return Err(Error::UnsupportedBalanceLayout(format!(
                "{changed} accounts changed lamport balance"
            )));
        }

        let mut diff = self.lamport_diff(0)?;
        if diff < 0 {
            diff = self.lamport_diff(1)?;
        }

        Ok(Amount::from_lamports(diff))
    }

    /// Whether every token balance entry that names a mint names `mint`.
    pub fn only_moves_mint(&self, mint: &str) -> bool {
        self.pre_token_balances
            .iter()
            .chain(&self.post_token_balances)
            .filter_map(|balance| balance.mint.as_deref())
            .all(|entry| entry == mint)
    }

    fn lamport_diff(&self, index: usize) -> Result<i128> {
        match (self.pre_balances.get(index), self.post_balances.get(index)) {
            (Some(pre), Some(post)) => Ok(i128::from(*post) - i128::from(*pre)),
            _ => Err(Error::MalformedRecord(format!(
                "no lamport balance at index {index}"
            ))),
        }
    }

    fn ensure_two_party_tokens(&self) -> Result<()> {
        let (pre, post) = (self.pre_token_balances.len(), self.post_token_balances.len());

        if pre > MAX_TRANSFER_PARTIES || post > MAX_TRANSFER_PARTIES {
            warn!(pre, post, "token balances of more than two accounts");
            return Err(Error::UnsupportedBalanceLayout(format!(
                "{pre} preTokenBalances, {post} postTokenBalances"
            )));
        }

        Ok(())
    }
}

fn token_diff(before: Amount, after: Amount) -> Result<Amount> {
    before
        .checked_sub(after)
        .ok_or_else(|| Error::MalformedRecord(format!("token balances {before} and {after} overflow")))
}

fn token_entry<'a>(balances: &'a [TokenBalance], index: usize, field: &str) -> Result<&'a TokenBalance> {
    balances
        .get(index)
        .ok_or_else(|| Error::MalformedRecord(format!("no {field} entry at index {index}")))
}
