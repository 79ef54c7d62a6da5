//! Aggregation of a month's transactions and weekly earnings into the figures
//! shown on the budget page.
//!
//! Weekly expenses are attributed by date range: a transaction counts toward a
//! week if its date lies within that week's earning record. A transaction that
//! falls in the overlap of two earning ranges is counted in both weeks, and a
//! transaction outside every range only counts toward the monthly totals.

use std::collections::BTreeMap;

use time::Date;

use crate::{
    category::Category,
    earning::{WEEK_NUMBERS, WeeklyEarning},
    transaction::Transaction,
};

/// Totals for the whole month.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlySummary {
    /// Sum of the gross amount of every weekly earning.
    pub income: f64,
    /// Sum of the absolute amount of every transaction.
    pub expenses: f64,
    /// `income - expenses`
    pub balance: f64,
    /// Absolute expense totals per category. Only categories with at least one
    /// transaction are present.
    pub categories: BTreeMap<Category, f64>,
}

/// The totals for one numbered week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySummary {
    pub week: u8,
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    /// `None` for weeks without an earning record.
    pub start_date: Option<Date>,
    /// `None` for weeks without an earning record.
    pub end_date: Option<Date>,
}

impl WeeklySummary {
    /// A zero-filled week with no date range.
    pub fn placeholder(week: u8) -> Self {
        Self {
            week,
            income: 0.0,
            expenses: 0.0,
            balance: 0.0,
            start_date: None,
            end_date: None,
        }
    }

    /// Whether this week is backed by an earning record.
    pub fn has_earnings(&self) -> bool {
        self.start_date.is_some()
    }
}

/// The monthly and weekly rollups for a selected month.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialSummary {
    pub monthly: MonthlySummary,
    /// Sorted by week number.
    pub weekly: Vec<WeeklySummary>,
}

impl Default for FinancialSummary {
    fn default() -> Self {
        compute_summary(&[], &[])
    }
}

/// Compute the financial summary for a month's `transactions` and `earnings`.
///
/// The weekly rollup has one entry per earning record plus a zero-filled
/// placeholder for each week number in [WEEK_NUMBERS] that has no earning
/// record, sorted by week number. Duplicate earning records for the same week
/// are kept as separate entries.
pub fn compute_summary(transactions: &[Transaction], earnings: &[WeeklyEarning]) -> FinancialSummary {
    let income: f64 = earnings.iter().map(|earning| earning.gross_amount).sum();
    let expenses = total_expenses(transactions.iter());

    FinancialSummary {
        monthly: MonthlySummary {
            income,
            expenses,
            balance: income - expenses,
            categories: expenses_by_category(transactions),
        },
        weekly: summarise_weeks(transactions, earnings),
    }
}

fn total_expenses<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> f64 {
    transactions.map(|transaction| transaction.amount.abs()).sum()
}

/// Sums the absolute transaction amounts for each category present in `transactions`.
pub(crate) fn expenses_by_category(transactions: &[Transaction]) -> BTreeMap<Category, f64> {
    let mut totals = BTreeMap::new();

    for transaction in transactions {
        *totals.entry(transaction.category).or_insert(0.0) += transaction.amount.abs();
    }

    totals
}

fn summarise_weeks(transactions: &[Transaction], earnings: &[WeeklyEarning]) -> Vec<WeeklySummary> {
    let mut weeks: Vec<WeeklySummary> = earnings
        .iter()
        .map(|earning| {
            let expenses = total_expenses(
                transactions
                    .iter()
                    .filter(|transaction| earning.covers(transaction.date)),
            );

            WeeklySummary {
                week: earning.week_number,
                income: earning.gross_amount,
                expenses,
                balance: earning.gross_amount - expenses,
                start_date: Some(earning.start_date),
                end_date: Some(earning.end_date),
            }
        })
        .collect();

    for week in WEEK_NUMBERS {
        if !weeks.iter().any(|summary| summary.week == week) {
            weeks.push(WeeklySummary::placeholder(week));
        }
    }

    // Stable, so duplicate weeks keep the order the store returned them in.
    weeks.sort_by_key(|summary| summary.week);

    weeks
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use time::{Date, macros::date};

    use crate::{category::Category, earning::WeeklyEarning, transaction::Transaction};

    use super::{WeeklySummary, compute_summary, expenses_by_category};

    fn create_test_transaction(amount: f64, date: Date, category: Category) -> Transaction {
        Transaction {
            id: format!("t-{date}-{amount}"),
            date,
            amount,
            description: "test".to_owned(),
            category,
        }
    }

    fn create_test_earning(week: u8, gross: f64, start: Date, end: Date) -> WeeklyEarning {
        WeeklyEarning {
            id: format!("e-{week}"),
            week_number: week,
            gross_amount: gross,
            start_date: start,
            end_date: end,
            description: "test".to_owned(),
        }
    }

    #[track_caller]
    fn assert_week_numbers(weekly: &[WeeklySummary], want: &[u8]) {
        let got: Vec<u8> = weekly.iter().map(|week| week.week).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn empty_inputs_give_zero_summary_with_five_placeholder_weeks() {
        let summary = compute_summary(&[], &[]);

        assert_eq!(summary.monthly.income, 0.0);
        assert_eq!(summary.monthly.expenses, 0.0);
        assert_eq!(summary.monthly.balance, 0.0);
        assert!(summary.monthly.categories.is_empty());
        assert_week_numbers(&summary.weekly, &[1, 2, 3, 4, 5]);
        for week in &summary.weekly {
            assert_eq!(week, &WeeklySummary::placeholder(week.week));
        }
    }

    #[test]
    fn single_week_example() {
        let earnings = [create_test_earning(
            1,
            1000.0,
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 07),
        )];
        let transactions = [create_test_transaction(
            -50.0,
            date!(2024 - 01 - 03),
            Category::Leisure,
        )];

        let summary = compute_summary(&transactions, &earnings);

        assert_eq!(summary.monthly.income, 1000.0);
        assert_eq!(summary.monthly.expenses, 50.0);
        assert_eq!(summary.monthly.balance, 950.0);
        assert_eq!(
            summary.monthly.categories,
            BTreeMap::from([(Category::Leisure, 50.0)])
        );

        let week_one = &summary.weekly[0];
        assert_eq!(week_one.week, 1);
        assert_eq!(week_one.income, 1000.0);
        assert_eq!(week_one.expenses, 50.0);
        assert_eq!(week_one.balance, 950.0);
        assert_eq!(week_one.start_date, Some(date!(2024 - 01 - 01)));
        assert_eq!(week_one.end_date, Some(date!(2024 - 01 - 07)));

        assert_week_numbers(&summary.weekly, &[1, 2, 3, 4, 5]);
        for week in &summary.weekly[1..] {
            assert_eq!(week, &WeeklySummary::placeholder(week.week));
        }
    }

    #[test]
    fn weeks_are_sorted_regardless_of_input_order() {
        let earnings = [
            create_test_earning(4, 400.0, date!(2024 - 01 - 22), date!(2024 - 01 - 28)),
            create_test_earning(2, 200.0, date!(2024 - 01 - 08), date!(2024 - 01 - 14)),
        ];

        let summary = compute_summary(&[], &earnings);

        assert_week_numbers(&summary.weekly, &[1, 2, 3, 4, 5]);
        assert_eq!(summary.weekly[1].income, 200.0);
        assert_eq!(summary.weekly[3].income, 400.0);
    }

    #[test]
    fn transaction_outside_every_week_only_counts_monthly() {
        let earnings = [create_test_earning(
            1,
            1000.0,
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 07),
        )];
        let transactions = [
            create_test_transaction(-20.0, date!(2024 - 01 - 07), Category::Food),
            create_test_transaction(-30.0, date!(2024 - 01 - 20), Category::Food),
        ];

        let summary = compute_summary(&transactions, &earnings);

        assert_eq!(summary.monthly.expenses, 50.0);
        assert_eq!(summary.weekly[0].expenses, 20.0);
        let weekly_expenses: f64 = summary.weekly.iter().map(|week| week.expenses).sum();
        assert_eq!(weekly_expenses, 20.0);
    }

    #[test]
    fn positive_amounts_count_as_expenses_by_magnitude() {
        let transactions = [
            create_test_transaction(-10.0, date!(2024 - 01 - 02), Category::Food),
            create_test_transaction(5.0, date!(2024 - 01 - 02), Category::Food),
        ];

        let summary = compute_summary(&transactions, &[]);

        assert_eq!(summary.monthly.expenses, 15.0);
        assert_eq!(summary.monthly.balance, -15.0);
    }

    #[test]
    fn balance_is_income_minus_expenses() {
        let earnings = [
            create_test_earning(1, 700.0, date!(2024 - 01 - 01), date!(2024 - 01 - 07)),
            create_test_earning(2, 300.5, date!(2024 - 01 - 08), date!(2024 - 01 - 14)),
        ];
        let transactions = [
            create_test_transaction(-120.25, date!(2024 - 01 - 05), Category::Housing),
            create_test_transaction(-80.0, date!(2024 - 01 - 10), Category::Transport),
            create_test_transaction(-15.0, date!(2024 - 01 - 30), Category::Other),
        ];

        let summary = compute_summary(&transactions, &earnings);

        assert_eq!(
            summary.monthly.balance,
            summary.monthly.income - summary.monthly.expenses
        );
        for week in &summary.weekly {
            assert_eq!(week.balance, week.income - week.expenses);
        }
    }

    #[test]
    fn weekly_income_of_earning_weeks_sums_to_monthly_income() {
        let earnings = [
            create_test_earning(1, 700.0, date!(2024 - 01 - 01), date!(2024 - 01 - 07)),
            create_test_earning(3, 250.0, date!(2024 - 01 - 15), date!(2024 - 01 - 21)),
            create_test_earning(5, 50.0, date!(2024 - 01 - 29), date!(2024 - 01 - 31)),
        ];

        let summary = compute_summary(&[], &earnings);

        let weekly_income: f64 = summary
            .weekly
            .iter()
            .filter(|week| week.has_earnings())
            .map(|week| week.income)
            .sum();
        assert_eq!(weekly_income, summary.monthly.income);
    }

    #[test]
    fn duplicate_week_records_are_kept() {
        let earnings = [
            create_test_earning(2, 100.0, date!(2024 - 01 - 08), date!(2024 - 01 - 14)),
            create_test_earning(2, 50.0, date!(2024 - 01 - 08), date!(2024 - 01 - 14)),
        ];

        let summary = compute_summary(&[], &earnings);

        assert_week_numbers(&summary.weekly, &[1, 2, 2, 3, 4, 5]);
        assert_eq!(summary.weekly[1].income, 100.0);
        assert_eq!(summary.weekly[2].income, 50.0);
    }

    #[test]
    fn overlapping_weeks_count_transaction_in_both() {
        let earnings = [
            create_test_earning(1, 100.0, date!(2024 - 01 - 01), date!(2024 - 01 - 08)),
            create_test_earning(2, 100.0, date!(2024 - 01 - 08), date!(2024 - 01 - 14)),
        ];
        let transactions = [create_test_transaction(
            -40.0,
            date!(2024 - 01 - 08),
            Category::Food,
        )];

        let summary = compute_summary(&transactions, &earnings);

        assert_eq!(summary.monthly.expenses, 40.0);
        assert_eq!(summary.weekly[0].expenses, 40.0);
        assert_eq!(summary.weekly[1].expenses, 40.0);
    }

    #[test]
    fn expenses_by_category_omits_absent_categories() {
        let transactions = [
            create_test_transaction(-10.0, date!(2024 - 01 - 02), Category::Food),
            create_test_transaction(-15.0, date!(2024 - 01 - 03), Category::Food),
            create_test_transaction(-7.5, date!(2024 - 01 - 04), Category::Education),
        ];

        let categories = expenses_by_category(&transactions);

        assert_eq!(
            categories,
            BTreeMap::from([(Category::Food, 25.0), (Category::Education, 7.5)])
        );
    }
}
