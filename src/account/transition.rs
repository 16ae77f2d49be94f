//! Serializable account transitions.
//!
//! Every mutation the service accepts over the wire is one of these
//! variants. Applying a transition either succeeds completely or leaves
//! the account untouched, so a failed apply never needs a rollback.

use serde::{Deserialize, Serialize};

use crate::account::types::{Account, CardId, TeamRole};
use crate::error::LedgerError;

/// A single proposed change to one account.
///
/// Wire form is the variant name in snake_case wrapping its fields, e.g.
/// `{"debit_credits": {"amount": 30}}`; field-less transitions are the
/// bare name, e.g. `"consume_battle"`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Add credits to the balance.
    CreditCredits { amount: u64 },
    /// Spend credits. Refused when the balance is short.
    DebitCredits { amount: u64 },
    /// Add SGC to the balance.
    CreditSgc { amount: u64 },
    /// Spend SGC. Refused when the balance is short.
    DebitSgc { amount: u64 },
    /// Append a card to the inventory. Duplicates are fine.
    GrantCard { card: CardId },
    /// Put an owned card into a team slot, replacing whatever held it.
    AssignRole { role: TeamRole, card: CardId },
    /// Empty a team slot.
    ClearRole { role: TeamRole },
    /// Start a battle cooldown ending at the given unix timestamp.
    SetBattleCooldown { until: u64 },
    /// Drop the battle cooldown early.
    ClearBattleCooldown,
    /// Spend one of today's battles. Refused at zero.
    ConsumeBattle,
    /// Restore the daily battle counter and clear any cooldown.
    /// Issued by the maintenance task, one per account, at rollover.
    DailyReset { battles: u32 },
}

impl Transition {
    /// Apply this transition to an account in place.
    ///
    /// The account mutators all check before they touch state, so an
    /// `Err` here means nothing changed.
    pub fn apply(&self, account: &mut Account) -> Result<(), LedgerError> {
        match self {
            Transition::CreditCredits { amount } => account.credit_credits(*amount),
            Transition::DebitCredits { amount } => account.debit_credits(*amount),
            Transition::CreditSgc { amount } => account.credit_sgc(*amount),
            Transition::DebitSgc { amount } => account.debit_sgc(*amount),
            Transition::GrantCard { card } => {
                account.grant_card(card.clone());
                Ok(())
            }
            Transition::AssignRole { role, card } => account.assign_role(*role, card.clone()),
            Transition::ClearRole { role } => {
                account.clear_role(*role);
                Ok(())
            }
            Transition::SetBattleCooldown { until } => {
                account.set_battle_cooldown(*until);
                Ok(())
            }
            Transition::ClearBattleCooldown => {
                account.clear_battle_cooldown();
                Ok(())
            }
            Transition::ConsumeBattle => account.consume_battle(),
            Transition::DailyReset { battles } => {
                account.reset_battles(*battles);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_refusal_leaves_account_unchanged() {
        let mut account = Account::new(100);
        let before = account.clone();

        let err = Transition::DebitCredits { amount: 150 }
            .apply(&mut account)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidTransition(_)));
        assert_eq!(account, before);
    }

    #[test]
    fn grant_then_assign_fills_slot() {
        let mut account = Account::new(500);
        Transition::GrantCard {
            card: "rex".to_string(),
        }
        .apply(&mut account)
        .unwrap();
        Transition::AssignRole {
            role: TeamRole::Assault,
            card: "rex".to_string(),
        }
        .apply(&mut account)
        .unwrap();

        assert_eq!(account.team.slot(TeamRole::Assault).as_deref(), Some("rex"));
    }

    #[test]
    fn daily_reset_restores_battles_and_clears_cooldown() {
        let mut account = Account::new(500);
        account.set_battle_cooldown(1_700_000_000);
        account.battles_remaining = 0;

        Transition::DailyReset { battles: 5 }.apply(&mut account).unwrap();

        assert_eq!(account.battles_remaining, 5);
        assert_eq!(account.battle_cooldown, None);
    }

    #[test]
    fn wire_form_names_the_operation() {
        let wire = serde_json::to_value(Transition::DebitCredits { amount: 30 }).unwrap();
        assert_eq!(wire["debit_credits"]["amount"], 30);

        let parsed: Transition =
            serde_json::from_value(serde_json::json!("consume_battle")).unwrap();
        assert_eq!(parsed, Transition::ConsumeBattle);
    }
}
