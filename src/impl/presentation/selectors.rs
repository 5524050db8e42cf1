use crate::entities::{
    Account, Category, Frequency, FrequencyConfig, RootState, Transaction, TransactionType,
};

/// A transaction flagged as recurring, joined with its cadence.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringExpense<'a> {
    pub transaction: &'a Transaction,
    pub frequency: Frequency,
    pub config: Option<&'a FrequencyConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal<'a> {
    pub category: &'a Category,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CashflowTotals {
    pub income: f64,
    pub expenses: f64,
}

// --

/// Recurring IDs joined against the transaction list, in list order. IDs
/// with no cached transaction are skipped; a missing config reads as
/// monthly.
pub fn recurring_expenses(state: &RootState) -> Vec<RecurringExpense<'_>> {
    state
        .transactions
        .list
        .iter()
        .filter(|t| state.recurring.is_recurring(t.id))
        .map(|transaction| {
            let config = state.recurring.config_for(transaction.id);
            RecurringExpense {
                transaction,
                frequency: config.map(|c| c.frequency).unwrap_or_default(),
                config,
            }
        })
        .collect()
}

/// Recurring spend normalized to one month.
pub fn monthly_recurring_total(state: &RootState) -> f64 {
    recurring_expenses(state)
        .iter()
        .map(|r| r.transaction.amount * r.frequency.monthly_factor())
        .sum()
}

/// Per-category sums over the cached transactions, in category list order.
pub fn category_totals(state: &RootState) -> Vec<CategoryTotal<'_>> {
    state
        .categories
        .list
        .iter()
        .map(|category| {
            let (total, count) = state
                .transactions
                .list
                .iter()
                .filter(|t| t.category_id == category.id)
                .fold((0.0, 0), |(sum, n), t| (sum + t.amount, n + 1));
            CategoryTotal {
                category,
                total,
                count,
            }
        })
        .collect()
}

pub fn cashflow_totals(state: &RootState) -> CashflowTotals {
    state
        .transactions
        .list
        .iter()
        .fold(CashflowTotals::default(), |mut totals, t| {
            match t.transaction_type {
                TransactionType::Income => totals.income += t.amount,
                TransactionType::Expense => totals.expenses += t.amount,
            }
            totals
        })
}

pub fn total_saved(state: &RootState) -> f64 {
    state.goals.list.iter().map(|g| g.saved_amount).sum()
}

pub fn category_for<'a>(state: &'a RootState, transaction: &Transaction) -> Option<&'a Category> {
    state.categories.get(&transaction.category_id)
}

pub fn account_for<'a>(state: &'a RootState, transaction: &Transaction) -> Option<&'a Account> {
    state.accounts.get(&transaction.account_id)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::entities::{Goal, RecurringAction};

    fn tx(id: i64, category_id: i64, amount: f64, transaction_type: TransactionType) -> Transaction {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        Transaction {
            id,
            account_id: 1,
            user_id: "u-1".to_string(),
            category_id,
            amount,
            transaction_type,
            description: format!("tx {id}"),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            created_at: at,
            updated_at: at,
        }
    }

    fn category(id: i64, name: &str) -> Category {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Category {
            id,
            key: name.to_lowercase(),
            name: name.to_string(),
            icon: String::new(),
            color_fill: String::new(),
            color_bg: String::new(),
            transaction_type: TransactionType::Expense,
            created_at: at,
            updated_at: at,
        }
    }

    fn state() -> RootState {
        let mut state = RootState::default();
        state.transactions.list = vec![
            tx(1, 10, 100.0, TransactionType::Expense),
            tx(2, 10, 50.0, TransactionType::Expense),
            tx(3, 20, 1200.0, TransactionType::Expense),
            tx(4, 30, 3000.0, TransactionType::Income),
        ];
        state.categories.list = vec![category(10, "Comida"), category(20, "Seguros")];
        state
    }

    #[test]
    fn recurring_join_skips_unknown_ids_and_defaults_to_monthly() {
        let mut state = state();
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        state.reduce(crate::entities::Action::Recurring(RecurringAction::Mark {
            id: 3,
            frequency: Frequency::Yearly,
            at,
        }));
        state.recurring.recurring_ids.insert(1);
        state.recurring.recurring_ids.insert(999);

        let expenses = recurring_expenses(&state);
        assert_eq!(
            expenses.iter().map(|r| r.transaction.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(expenses[0].frequency, Frequency::Monthly);
        assert!(expenses[0].config.is_none());
        assert_eq!(expenses[1].frequency, Frequency::Yearly);

        assert_eq!(monthly_recurring_total(&state), 100.0 + 1200.0 / 12.0);
    }

    #[test]
    fn category_totals_follow_category_order() {
        let state = state();
        let totals = category_totals(&state);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].total, 150.0);
        assert_eq!(totals[0].count, 2);
        assert_eq!(totals[1].category.name, "Seguros");
        assert_eq!(totals[1].total, 1200.0);
    }

    #[test]
    fn cashflow_splits_by_type() {
        assert_eq!(
            cashflow_totals(&state()),
            CashflowTotals {
                income: 3000.0,
                expenses: 1350.0
            }
        );
    }

    #[test]
    fn lookups_resolve_relations() {
        let state = state();
        let first = &state.transactions.list[0];
        assert_eq!(category_for(&state, first).map(|c| c.id), Some(10));
        assert!(account_for(&state, first).is_none());
        assert!(category_for(&state, &state.transactions.list[3]).is_none());
    }

    #[test]
    fn total_saved_sums_goals() {
        let mut state = RootState::default();
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        for (id, saved) in [("a", 10.0), ("b", 32.5)] {
            state.goals.list.push(Goal {
                id: id.to_string(),
                name: id.to_string(),
                icon: String::new(),
                target_amount: 100.0,
                saved_amount: saved,
                monthly_contribution: 0.0,
                period_months: 0,
                created_at: at,
            });
        }
        assert_eq!(total_saved(&state), 42.5);
    }
}
