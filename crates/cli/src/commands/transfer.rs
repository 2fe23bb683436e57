//! One-off transfer command

use anyhow::Result;
use banco_core::{Account, Bank};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use tracing::{info, warn};

use crate::OutputFormat;

/// An account given on the command line as `OWNER=BALANCE`.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountArg {
    pub owner: String,
    pub balance: Decimal,
}

/// Parse `OWNER=BALANCE`. The owner may itself contain `=`; the balance is
/// whatever follows the last one.
pub fn parse_account_arg(s: &str) -> Result<AccountArg, String> {
    let (owner, balance) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected OWNER=BALANCE, got '{}'", s))?;

    let owner = owner.trim();
    if owner.is_empty() {
        return Err(format!("missing owner in '{}'", s));
    }

    let balance = Decimal::from_str(balance.trim())
        .map_err(|e| format!("invalid balance '{}': {}", balance, e))?;

    Ok(AccountArg {
        owner: owner.to_string(),
        balance,
    })
}

/// Move `amount` between two fresh accounts and print both balances
pub fn transfer(
    from: AccountArg,
    to: AccountArg,
    amount: Decimal,
    bank_name: &str,
    format: OutputFormat,
) -> Result<()> {
    let mut source = Account::new(from.owner, from.balance);
    let mut target = Account::new(to.owner, to.balance);
    let bank = Bank::named(bank_name);

    if let Err(err) = bank.transfer(&mut source, &mut target, amount) {
        warn!(from = source.owner(), to = target.owner(), %amount, "transfer refused: {}", err);
        return Err(err.into());
    }
    info!(
        from = source.owner(),
        to = target.owner(),
        %amount,
        "transfer done"
    );

    match format {
        OutputFormat::Text => {
            println!("Transferred {} from {} to {}", amount, source.owner(), target.owner());
            println!("  {}", source);
            println!("  {}", target);
        }
        OutputFormat::Json => {
            let output = json!({
                "bank": bank.name(),
                "amount": amount.to_string(),
                "from": source,
                "to": target,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
